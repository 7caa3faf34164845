//! EVM Wallet Core Library
//!
//! This crate provides the shared validation, normalization, and
//! message-signature-verification layer used by Ethereum wallet backends
//! (software wallets, browser-injected providers, hardware wallets) behind
//! a common interface.
//!
//! # Overview
//!
//! Wallet backends receive loosely-shaped user input: hex strings with or
//! without `0x` prefixes, derivation paths typed by hand, recovery
//! parameters in two historical encodings, value amounts that must never
//! touch floating point. This library canonicalizes all of it in one place
//! so the backends stay thin orchestration over their transports.
//!
//! It provides:
//!
//! - **Validators**: fail-fast guards for addresses, hex sequences, message
//!   payloads, safe integers, big numbers, and BIP44 derivation paths
//! - **Normalizers**: canonical forms for validated values (hex prefixing,
//!   even-length padding, derivation-path cleanup, recovery-parameter
//!   mapping)
//! - **Derivation Paths**: structured BIP44 path parsing and serialization
//! - **Signature Recovery**: public key and address recovery from signed
//!   personal messages, plus a never-throwing verification entrypoint
//! - **Assertions**: the shared severity-aware assertion engine with
//!   injected verbosity
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Wallet Backends (external callers)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │   Generic    │    Domain     │              │   Signature    │
//! │ Input Guard  │  Validators   │ Normalizers  │   Recovery     │
//! ├─────────────────────────────────────────────────────────────┤
//! │        Assertion Engine (severity, injected verbosity)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends call the layers in a fixed order: generic input guard, then
//! domain validators, then normalizers, then the cryptographic operation.
//! Normalizers assume validated input, so the ordering is part of the
//! contract. Every operation is a synchronous pure function; the library
//! performs no I/O and holds no shared state.
//!
//! # Quick Start
//!
//! ## Validating and normalizing an address
//!
//! ```rust
//! use evm_wallet_core::normalizers::normalize_address;
//! use evm_wallet_core::validators::validate_address;
//!
//! let raw = "8f94deadbeef8f94deadbeef8f94deadbeef8f94";
//! validate_address(raw)?;
//! assert_eq!(
//!     normalize_address(raw, true),
//!     "0x8f94deadbeef8f94deadbeef8f94deadbeef8f94"
//! );
//! # Ok::<(), evm_wallet_core::Error>(())
//! ```
//!
//! ## Building a derivation path
//!
//! ```rust
//! use evm_wallet_core::derivation::{serialize_derivation_path, DerivationPathComponents};
//!
//! let path = serialize_derivation_path(&DerivationPathComponents {
//!     change: Some(0),
//!     address_index: Some(0),
//!     ..Default::default()
//! });
//! assert_eq!(path, "m/44'/60'/0'/0/0");
//! ```
//!
//! ## Verifying a signed message
//!
//! ```rust
//! use evm_wallet_core::assertions::{Asserter, Environment};
//! use evm_wallet_core::recovery::{SignatureVerifier, VerifyMessageSignature};
//!
//! let verifier = SignatureVerifier::new(Asserter::new(Environment::Production));
//!
//! // A garbage signature is reported as `false`, never as an error
//! let verified = verifier.verify_message_signature(&VerifyMessageSignature {
//!     public_key: "ab".repeat(64),
//!     message: "hello".to_string(),
//!     signature: "0xdeadbeef".to_string(),
//! });
//! assert!(!verified);
//! ```
//!
//! # Diagnostics
//!
//! Low-severity failures and absorbed verification errors are emitted
//! through [`tracing`]; the crate never installs a subscriber. Verbosity is
//! controlled by the [`Environment`] injected into each [`Asserter`], not
//! by a process-wide flag, so tests can tune it per-case.

// Modules
pub mod address;
pub mod assertions;
pub mod bignumber;
pub mod derivation;
pub mod error;
pub mod input;
pub mod normalizers;
pub mod recovery;
pub mod signature;
pub mod validators;

// Re-exports for convenience
pub use address::Address;
pub use assertions::{Asserter, Assertion, Environment, Severity};
pub use bignumber::BigNumber;
pub use derivation::{parse_derivation_path, serialize_derivation_path, DerivationPathComponents};
pub use error::{Error, Result};
pub use input::{validate_user_input, KeyedInput, Requirements};
pub use recovery::{
    hash_personal_message, recover_address, recover_public_key, MessageSignature,
    SignatureVerifier, VerifyMessageSignature,
};
pub use signature::Signature;

// Re-export commonly used alloy types
pub use alloy_primitives::{B256, U256};

//! Public key recovery and message signature verification.
//!
//! Signed personal messages carry enough information to recover the
//! signer's public key: the message is hashed under the personal-message
//! convention and the key is recovered from the signature's `r`, `s`, and
//! recovery-id components. Verification then reduces to comparing the
//! recovered key against the expected one.
//!
//! # Personal Message Hashing
//!
//! ```text
//! keccak256("\x19Ethereum Signed Message:\n" || byte_length || message)
//! ```
//!
//! The fixed prefix binds signatures to the personal-message context so
//! they cannot be replayed as transaction signatures.
//!
//! # Failure Contract
//!
//! [`recover_public_key`] fails fast like every other validator-backed
//! operation. [`SignatureVerifier::verify_message_signature`] deliberately
//! does not: verification failures must be observable as `false` plus a
//! high-severity diagnostic, never as an error or panic, so a wallet
//! backend can always treat the result as a plain boolean.
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::assertions::Asserter;
//! use evm_wallet_core::recovery::{
//!     recover_public_key, MessageSignature, SignatureVerifier, VerifyMessageSignature,
//! };
//!
//! let signed = MessageSignature {
//!     message: "Some data".to_string(),
//!     signature: "0xb91467e570a6466aa9e9876cbcd013baba02900b8979d43fe208a4a4f339f5fd\
//!                 6007e74cd82e037b800186422fc2da167c747ef045e5d18a5f5d4300f8e1a0291c"
//!         .to_string(),
//! };
//! let public_key = recover_public_key(&signed).unwrap();
//!
//! let verifier = SignatureVerifier::new(Asserter::default());
//! assert!(verifier.verify_message_signature(&VerifyMessageSignature {
//!     public_key,
//!     message: signed.message.clone(),
//!     signature: signed.signature.clone(),
//! }));
//! ```

use alloy_primitives::{keccak256, B256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::assertions::{Asserter, Severity};
use crate::error::{Error, Result};
use crate::normalizers::normalize_hex_sequence;
use crate::signature::Signature;
use crate::validators::{validate_hex_sequence, validate_message};

/// The prefix of the personal-message hashing convention.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// A signed personal message: the plain-text message and the 65-byte
/// signature as a hex sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSignature {
    /// The message that was signed.
    pub message: String,

    /// The signature, hex-encoded with optional `0x` prefix.
    pub signature: String,
}

/// The arguments of [`SignatureVerifier::verify_message_signature`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyMessageSignature {
    /// The expected signer public key, hex-encoded with optional `0x`
    /// prefix.
    pub public_key: String,

    /// The message that was signed.
    pub message: String,

    /// The signature, hex-encoded with optional `0x` prefix.
    pub signature: String,
}

/// Hashes a message under the personal-message convention.
///
/// The length baked into the preimage is the message's byte length, so
/// multi-byte characters count per encoded byte.
#[must_use]
pub fn hash_personal_message(message: &str) -> B256 {
    let mut preimage = format!("{PERSONAL_MESSAGE_PREFIX}{}", message.len()).into_bytes();
    preimage.extend_from_slice(message.as_bytes());
    keccak256(&preimage)
}

/// Recovers the verifying key behind a signed personal message.
fn recover_verifying_key(message: &str, signature: &str) -> Result<VerifyingKey> {
    validate_message(message)?;
    validate_hex_sequence(signature)?;

    let signature_bytes = hex::decode(normalize_hex_sequence(signature, false))?;
    let signature = Signature::from_bytes(&signature_bytes)?;

    let recovery_id = RecoveryId::from_byte(signature.recovery_id()?).ok_or_else(|| {
        Error::RecoveryFailure("recovery bit is out of range for secp256k1".to_string())
    })?;
    let ecdsa_signature = EcdsaSignature::from_scalars(
        k256::FieldBytes::from(*signature.r()),
        k256::FieldBytes::from(*signature.s()),
    )
    .map_err(|err| Error::RecoveryFailure(format!("signature scalars rejected: {err}")))?;

    let hash = hash_personal_message(message);
    VerifyingKey::recover_from_prehash(hash.as_slice(), &ecdsa_signature, recovery_id)
        .map_err(|err| Error::RecoveryFailure(format!("curve point recovery failed: {err}")))
}

/// Recovers the public key that signed a personal message.
///
/// The result is the uncompressed key with the SEC1 format byte stripped,
/// hex-encoded with a `0x` prefix (130 characters in total).
///
/// # Errors
///
/// - [`Error::InvalidLength`] / [`Error::InvalidFormat`] when the message
///   or signature fail validation
/// - [`Error::RecoveryFailure`] when the signature components do not
///   describe a recoverable curve point
pub fn recover_public_key(message_signature: &MessageSignature) -> Result<String> {
    let verifying_key =
        recover_verifying_key(&message_signature.message, &message_signature.signature)?;
    let encoded = verifying_key.to_encoded_point(false);
    Ok(normalize_hex_sequence(
        &hex::encode(&encoded.as_bytes()[1..]),
        true,
    ))
}

/// Recovers the Ethereum address that signed a personal message.
///
/// Convenience over [`recover_public_key`] for callers that compare
/// addresses instead of keys.
///
/// # Errors
///
/// Same failure modes as [`recover_public_key`].
pub fn recover_address(message_signature: &MessageSignature) -> Result<Address> {
    let verifying_key =
        recover_verifying_key(&message_signature.message, &message_signature.signature)?;
    Ok(Address::from_public_key(&verifying_key))
}

/// The public key recovery dependency of [`SignatureVerifier`].
///
/// The production implementation is [`EcdsaRecovery`]; tests substitute a
/// failing fake to exercise the verifier's absorb-all-errors contract.
pub trait PublicKeyRecovery {
    /// Recovers the signer's public key as a hex string.
    ///
    /// # Errors
    ///
    /// Implementations report validation and recovery failures with the
    /// same typed errors as [`recover_public_key`].
    fn recover_public_key(&self, message: &str, signature: &str) -> Result<String>;
}

/// The standard secp256k1 recovery implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EcdsaRecovery;

impl PublicKeyRecovery for EcdsaRecovery {
    fn recover_public_key(&self, message: &str, signature: &str) -> Result<String> {
        recover_public_key(&MessageSignature {
            message: message.to_string(),
            signature: signature.to_string(),
        })
    }
}

/// Verifies message signatures against an expected public key.
///
/// Holds the injected [`Asserter`] for diagnostics and the
/// [`PublicKeyRecovery`] implementation to recover with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureVerifier<R = EcdsaRecovery> {
    asserter: Asserter,
    recovery: R,
}

impl SignatureVerifier<EcdsaRecovery> {
    /// Creates a verifier with the standard secp256k1 recovery.
    #[must_use]
    pub const fn new(asserter: Asserter) -> Self {
        Self {
            asserter,
            recovery: EcdsaRecovery,
        }
    }
}

impl<R: PublicKeyRecovery> SignatureVerifier<R> {
    /// Creates a verifier with a custom recovery implementation.
    #[must_use]
    pub const fn with_recovery(asserter: Asserter, recovery: R) -> Self {
        Self { asserter, recovery }
    }

    /// Verifies that a personal message was signed by the expected public
    /// key.
    ///
    /// Both the recovered and the expected key are compared in normalized
    /// form: `0x` prefix stripped, case ignored. Any internal failure is
    /// absorbed: a high-severity diagnostic is emitted through the
    /// [`Asserter`] and `false` is returned. This entrypoint never returns
    /// an error and never panics.
    #[must_use]
    pub fn verify_message_signature(&self, verification: &VerifyMessageSignature) -> bool {
        match self
            .recovery
            .recover_public_key(&verification.message, &verification.signature)
        {
            Ok(recovered) => normalize_hex_sequence(&recovered, false)
                .eq_ignore_ascii_case(&normalize_hex_sequence(&verification.public_key, false)),
            Err(caught) => {
                self.asserter.emit(
                    Severity::High,
                    &[format!("cannot verify message signature: {caught}")],
                );
                false
            }
        }
    }
}

//! Input validators for the wallet backends.
//!
//! Every validator guards one input shape, fails fast with a typed
//! [`Error`](crate::Error) naming the violated invariant, and returns
//! `Ok(())` on success. Validators never modify their input; canonical forms
//! are produced afterwards by the [`normalizers`](crate::normalizers), which
//! assume already-validated values. That ordering is part of the library
//! contract.
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::validators::{validate_address, validate_hex_sequence};
//!
//! validate_address("0x8f94deadbeef8f94deadbeef8f94deadbeef8f94").unwrap();
//! validate_hex_sequence("deadbeef").unwrap();
//! assert!(validate_address("0xdeadbeef").is_err());
//! ```

use serde_json::Value;

use crate::bignumber::BigNumber;
use crate::derivation::parse_derivation_path;
use crate::error::{Error, Result};

/// The number of hex characters in an unprefixed Ethereum address.
pub const ADDRESS_HEX_LENGTH: usize = 40;

/// The maximum accepted message length, in characters.
///
/// Oversized payloads are rejected before they reach hashing or a hardware
/// device.
pub const MAX_MESSAGE_LENGTH: usize = 1024;

/// The largest integer a 64-bit float represents exactly (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Strips a single leading `0x`, if present.
fn strip_hex_prefix(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

/// Validates an Ethereum address string.
///
/// The address must be exactly [`ADDRESS_HEX_LENGTH`] hex characters after
/// an optional `0x` prefix.
///
/// # Errors
///
/// - [`Error::InvalidLength`] when the unprefixed length is not 40
/// - [`Error::InvalidFormat`] when a non-hex character is present
pub fn validate_address(address: &str) -> Result<()> {
    let unprefixed = strip_hex_prefix(address);
    if unprefixed.len() != ADDRESS_HEX_LENGTH {
        return Err(Error::InvalidLength(format!(
            "address must be {ADDRESS_HEX_LENGTH} hex characters, got {}",
            unprefixed.len()
        )));
    }
    if !unprefixed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidFormat(
            "address contains non-hexadecimal characters".to_string(),
        ));
    }
    Ok(())
}

/// Validates a hex sequence of arbitrary length.
///
/// The empty string is valid; it encodes a zero-length byte sequence.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] when a non-hex character is present
/// after the optional `0x` prefix.
pub fn validate_hex_sequence(hex_sequence: &str) -> Result<()> {
    let unprefixed = strip_hex_prefix(hex_sequence);
    if !unprefixed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidFormat(
            "hex sequence contains non-hexadecimal characters".to_string(),
        ));
    }
    Ok(())
}

/// Validates hex-encoded message data for signing.
///
/// On top of [`validate_hex_sequence`], the unprefixed payload is capped at
/// [`MAX_MESSAGE_LENGTH`] characters. The length check runs first, so an
/// oversized payload is rejected before its content is inspected.
///
/// # Errors
///
/// - [`Error::InvalidLength`] when the payload exceeds the cap
/// - [`Error::InvalidFormat`] when a non-hex character is present
pub fn validate_message_data(message_data: &str) -> Result<()> {
    let unprefixed = strip_hex_prefix(message_data);
    if unprefixed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(Error::InvalidLength(format!(
            "message data exceeds {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    validate_hex_sequence(unprefixed)
}

/// Validates a plain-text message for personal-message signing.
///
/// The cap is measured in characters, not decoded bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] when the message exceeds
/// [`MAX_MESSAGE_LENGTH`] characters.
pub fn validate_message(message: &str) -> Result<()> {
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(Error::InvalidLength(format!(
            "message exceeds {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates that a number is a non-negative integer small enough to be
/// represented exactly by a 64-bit float.
///
/// Wallet backends receive indices and counters from JSON, where every
/// number is a float; anything above `2^53 - 1` silently loses precision
/// there and is rejected here.
///
/// # Errors
///
/// - [`Error::InvalidType`] when the value is not a finite integer
/// - [`Error::InvalidFormat`] when the value is negative
/// - [`Error::InvalidLength`] when the value exceeds [`MAX_SAFE_INTEGER`]
pub fn validate_safe_integer(value: f64) -> Result<()> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::InvalidType(format!(
            "`{value}` is not an integer-valued number"
        )));
    }
    if value < 0.0 {
        return Err(Error::InvalidFormat(format!("`{value}` is negative")));
    }
    if value > MAX_SAFE_INTEGER {
        return Err(Error::InvalidLength(format!(
            "`{value}` exceeds the largest safely representable integer"
        )));
    }
    Ok(())
}

/// Validates that a JSON boundary value is convertible to a [`BigNumber`].
///
/// Accepts a non-negative JSON integer, or a string holding a decimal or
/// `0x`-prefixed hexadecimal 256-bit integer.
///
/// # Errors
///
/// - [`Error::InvalidType`] when the value is neither a number nor a string
/// - [`Error::InvalidFormat`] when a number is negative or fractional, or a
///   string does not parse
pub fn validate_big_number(value: &Value) -> Result<()> {
    if let Some(text) = value.as_str() {
        text.parse::<BigNumber>()?;
        return Ok(());
    }
    if value.is_number() {
        if value.as_u64().is_none() {
            return Err(Error::InvalidFormat(
                "big number literals must be non-negative integers".to_string(),
            ));
        }
        return Ok(());
    }
    Err(Error::InvalidType(
        "expected a big number as an integer or a numeric string".to_string(),
    ))
}

/// Validates a BIP44 derivation path string.
///
/// Delegates to [`parse_derivation_path`]; see
/// [`derivation`](crate::derivation) for the accepted shapes.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] or [`Error::InvalidLength`] as reported
/// by the parser.
pub fn validate_derivation_path(derivation_path: &str) -> Result<()> {
    parse_derivation_path(derivation_path).map(|_| ())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const ADDRESS: &str = "8f94deadbeef8f94deadbeef8f94deadbeef8f94";

    #[test]
    fn address_accepts_prefixed_and_unprefixed() {
        validate_address(ADDRESS).unwrap();
        validate_address(&format!("0x{ADDRESS}")).unwrap();
        validate_address(&ADDRESS.to_uppercase()).unwrap();
    }

    #[test]
    fn address_rejects_wrong_length() {
        assert!(matches!(
            validate_address("0xdeadbeef"),
            Err(Error::InvalidLength(_))
        ));
        assert!(matches!(
            validate_address(&format!("{ADDRESS}00")),
            Err(Error::InvalidLength(_))
        ));
        assert!(matches!(validate_address(""), Err(Error::InvalidLength(_))));
    }

    #[test]
    fn address_rejects_non_hex_characters() {
        let tainted = format!("0x{}zz", &ADDRESS[..38]);
        assert!(matches!(
            validate_address(&tainted),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn hex_sequence_accepts_valid_inputs() {
        validate_hex_sequence("").unwrap();
        validate_hex_sequence("0x").unwrap();
        validate_hex_sequence("deadBEEF01").unwrap();
        validate_hex_sequence("0xdeadBEEF01").unwrap();
    }

    #[test]
    fn hex_sequence_rejects_non_hex() {
        assert!(matches!(
            validate_hex_sequence("0xdeadbeefg"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_hex_sequence("hello"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn message_data_caps_payload_size() {
        let max = "a".repeat(MAX_MESSAGE_LENGTH);
        validate_message_data(&max).unwrap();
        validate_message_data(&format!("0x{max}")).unwrap();

        let oversized = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(matches!(
            validate_message_data(&oversized),
            Err(Error::InvalidLength(_))
        ));
    }

    #[test]
    fn message_data_checks_length_before_format() {
        // Oversized AND non-hex: the size guard must win
        let oversized = "z".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(matches!(
            validate_message_data(&oversized),
            Err(Error::InvalidLength(_))
        ));
    }

    #[test]
    fn message_accepts_short_and_empty_strings() {
        validate_message("").unwrap();
        validate_message("hello world").unwrap();
        validate_message(&"m".repeat(MAX_MESSAGE_LENGTH)).unwrap();
    }

    #[test]
    fn message_cap_is_measured_in_characters() {
        assert!(matches!(
            validate_message(&"m".repeat(MAX_MESSAGE_LENGTH + 1)),
            Err(Error::InvalidLength(_))
        ));
        // 1024 multi-byte characters exceed 1024 bytes but stay within the
        // character cap
        validate_message(&"é".repeat(MAX_MESSAGE_LENGTH)).unwrap();
    }

    #[test]
    fn safe_integer_accepts_representable_values() {
        validate_safe_integer(0.0).unwrap();
        validate_safe_integer(42.0).unwrap();
        validate_safe_integer(MAX_SAFE_INTEGER).unwrap();
    }

    #[test]
    fn safe_integer_rejects_non_integers() {
        assert!(matches!(
            validate_safe_integer(1.5),
            Err(Error::InvalidType(_))
        ));
        assert!(matches!(
            validate_safe_integer(f64::NAN),
            Err(Error::InvalidType(_))
        ));
        assert!(matches!(
            validate_safe_integer(f64::INFINITY),
            Err(Error::InvalidType(_))
        ));
    }

    #[test]
    fn safe_integer_rejects_negative_and_oversized() {
        assert!(matches!(
            validate_safe_integer(-1.0),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_safe_integer(MAX_SAFE_INTEGER + 2.0),
            Err(Error::InvalidLength(_))
        ));
    }

    #[test]
    fn big_number_accepts_integers_and_numeric_strings() {
        validate_big_number(&json!(0)).unwrap();
        validate_big_number(&json!(1_000_000)).unwrap();
        validate_big_number(&json!("1000000000000000000")).unwrap();
        validate_big_number(&json!("0xde0b6b3a7640000")).unwrap();
    }

    #[test]
    fn big_number_rejects_other_shapes() {
        assert!(matches!(
            validate_big_number(&json!(-1)),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_big_number(&json!(1.5)),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_big_number(&json!("12three")),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_big_number(&json!(null)),
            Err(Error::InvalidType(_))
        ));
        assert!(matches!(
            validate_big_number(&json!([1, 2])),
            Err(Error::InvalidType(_))
        ));
    }

    #[test]
    fn derivation_path_delegates_to_parser() {
        validate_derivation_path("m/44'/60'/0'/0").unwrap();
        assert!(validate_derivation_path("m/44").is_err());
        assert!(validate_derivation_path("a/44'/60'/0'/0/0").is_err());
    }
}

//! Canonicalizers for already-validated values.
//!
//! Normalizers produce the canonical textual form of a value. None of them
//! validate: callers run the matching
//! [`validators`](crate::validators) first, and the normalizers assume the
//! shape is already correct. Each normalizer is idempotent per direction.
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::normalizers::{normalize_hex_sequence, normalize_multiple_of_two};
//!
//! assert_eq!(normalize_hex_sequence("deadbeef", true), "0xdeadbeef");
//! assert_eq!(normalize_hex_sequence("0xdeadbeef", false), "deadbeef");
//! assert_eq!(normalize_multiple_of_two("fff"), "0fff");
//! ```

use crate::derivation::{DELIMITER, HARDENED_MARKER, HEADER_KEY};

/// The hex prefix marking `0x`-prefixed sequences.
pub const HEX_PREFIX: &str = "0x";

/// The canonical recovery byte for a recovery bit of `0`.
pub const RECOVERY_ODD: i64 = 27;

/// The canonical recovery byte for a recovery bit of `1`.
pub const RECOVERY_EVEN: i64 = 28;

/// The maximum number of segments a derivation path carries after the
/// header key.
const MAX_PATH_SEGMENTS: usize = 5;

/// Adds or strips the `0x` prefix of a hex sequence.
///
/// With `add_prefix` true the result always carries exactly one prefix;
/// with `add_prefix` false it carries none. Applying the same direction
/// twice is a no-op.
#[must_use]
pub fn normalize_hex_sequence(hex_sequence: &str, add_prefix: bool) -> String {
    let unprefixed = hex_sequence.strip_prefix(HEX_PREFIX).unwrap_or(hex_sequence);
    if add_prefix {
        format!("{HEX_PREFIX}{unprefixed}")
    } else {
        unprefixed.to_string()
    }
}

/// Adds or strips the `0x` prefix of an address.
///
/// Identical behavior to [`normalize_hex_sequence`], kept as its own entry
/// point so address call sites read as address handling.
#[must_use]
pub fn normalize_address(address: &str, add_prefix: bool) -> String {
    normalize_hex_sequence(address, add_prefix)
}

/// Left-pads a hex value with one `0` when its digit count is odd.
///
/// A hex-encoded byte string must pair up its digits; the prefix, when
/// present, is preserved and excluded from the count. Already-even values
/// pass through unchanged, which also makes the operation idempotent.
#[must_use]
pub fn normalize_multiple_of_two(hex_value: &str) -> String {
    let (prefix, digits) = match hex_value.strip_prefix(HEX_PREFIX) {
        Some(digits) => (HEX_PREFIX, digits),
        None => ("", hex_value),
    };
    if digits.len() % 2 == 0 {
        hex_value.to_string()
    } else {
        format!("{prefix}0{digits}")
    }
}

/// Canonicalizes a loosely-formatted derivation path string.
///
/// Lowercases the header key, strips leading zeros from each numeric
/// segment while preserving the hardened marker, and drops segments beyond
/// the standard five. Inputs that do not fit the standard shapes at all
/// (fewer than three segments after the header, a foreign header key, or
/// non-numeric segment content) pass through unchanged rather than being
/// guessed at, a deliberately permissive behavior that downstream callers
/// rely on.
#[must_use]
pub fn normalize_derivation_path(derivation_path: &str) -> String {
    let mut segments = derivation_path.split(DELIMITER);
    let header = segments.next().unwrap_or_default();
    let rest: Vec<&str> = segments.collect();

    if !header.eq_ignore_ascii_case(HEADER_KEY) || rest.len() < 3 {
        return derivation_path.to_string();
    }

    let mut normalized = Vec::with_capacity(MAX_PATH_SEGMENTS);
    for segment in rest.iter().take(MAX_PATH_SEGMENTS) {
        match normalize_path_segment(segment) {
            Some(canonical) => normalized.push(canonical),
            None => return derivation_path.to_string(),
        }
    }

    let mut canonical_path = String::from(HEADER_KEY);
    for segment in &normalized {
        canonical_path.push(DELIMITER);
        canonical_path.push_str(segment);
    }
    canonical_path
}

/// Canonicalizes one numeric path segment, or reports that it is not one.
fn normalize_path_segment(segment: &str) -> Option<String> {
    let (digits, hardened) = match segment.strip_suffix(HARDENED_MARKER) {
        Some(digits) => (digits, true),
        None => (segment, false),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let stripped = digits.trim_start_matches('0');
    let canonical = if stripped.is_empty() { "0" } else { stripped };
    if hardened {
        Some(format!("{canonical}{HARDENED_MARKER}"))
    } else {
        Some(canonical.to_string())
    }
}

/// Maps an ECDSA recovery bit to Ethereum's historical recovery byte.
///
/// `0` becomes [`RECOVERY_ODD`] (27) and `1` becomes [`RECOVERY_EVEN`]
/// (28); every other integer passes through unchanged, since values at or
/// above 27 are already in the historical encoding.
#[must_use]
pub const fn normalize_recovery_param(recovery_param: i64) -> i64 {
    match recovery_param {
        0 => RECOVERY_ODD,
        1 => RECOVERY_EVEN,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_sequence_prefix_roundtrip() {
        let bare = "deadbeef01";
        let prefixed = normalize_hex_sequence(bare, true);
        assert_eq!(prefixed, "0xdeadbeef01");
        assert_eq!(normalize_hex_sequence(&prefixed, false), bare);
    }

    #[test]
    fn hex_sequence_is_idempotent_per_direction() {
        assert_eq!(normalize_hex_sequence("0xabc", true), "0xabc");
        assert_eq!(normalize_hex_sequence("abc", false), "abc");
        assert_eq!(normalize_hex_sequence("", true), "0x");
        assert_eq!(normalize_hex_sequence("0x", false), "");
    }

    #[test]
    fn address_normalizer_matches_hex_behavior() {
        let address = "8f94deadbeef8f94deadbeef8f94deadbeef8f94";
        assert_eq!(
            normalize_address(address, true),
            format!("0x{address}")
        );
        assert_eq!(
            normalize_address(&format!("0x{address}"), false),
            address
        );
    }

    #[test]
    fn multiple_of_two_pads_odd_lengths() {
        assert_eq!(normalize_multiple_of_two("f"), "0f");
        assert_eq!(normalize_multiple_of_two("fff"), "0fff");
        assert_eq!(normalize_multiple_of_two("0xfff"), "0x0fff");
    }

    #[test]
    fn multiple_of_two_keeps_even_lengths() {
        assert_eq!(normalize_multiple_of_two(""), "");
        assert_eq!(normalize_multiple_of_two("ff"), "ff");
        assert_eq!(normalize_multiple_of_two("0xff"), "0xff");
    }

    #[test]
    fn multiple_of_two_is_idempotent() {
        let once = normalize_multiple_of_two("abc");
        let twice = normalize_multiple_of_two(&once);
        assert_eq!(once, twice);
        assert_eq!(once.len() % 2, 0);
    }

    #[test]
    fn derivation_path_canonicalizes_standard_shapes() {
        assert_eq!(
            normalize_derivation_path("M/044'/060'/00'/01"),
            "m/44'/60'/0'/1"
        );
        assert_eq!(
            normalize_derivation_path("m/44'/60'/0'/0/007"),
            "m/44'/60'/0'/0/7"
        );
        // Three hardened segments alone are a standard shape
        assert_eq!(normalize_derivation_path("m/44'/60'/000'"), "m/44'/60'/0'");
    }

    #[test]
    fn derivation_path_zero_segments_stay_zero() {
        assert_eq!(
            normalize_derivation_path("m/44'/60'/0'/0/0"),
            "m/44'/60'/0'/0/0"
        );
    }

    #[test]
    fn derivation_path_truncates_extra_segments() {
        assert_eq!(
            normalize_derivation_path("m/44'/60'/0'/0/0/9/9"),
            "m/44'/60'/0'/0/0"
        );
    }

    #[test]
    fn derivation_path_passes_abnormal_shapes_through() {
        // Too few segments
        assert_eq!(normalize_derivation_path("m/44'/60'"), "m/44'/60'");
        // Foreign header
        assert_eq!(
            normalize_derivation_path("x/44'/60'/0'/0"),
            "x/44'/60'/0'/0"
        );
        // Non-numeric content
        assert_eq!(
            normalize_derivation_path("m/44'/ab'/0'/0"),
            "m/44'/ab'/0'/0"
        );
        // The serializer's trailing-delimiter base form keeps its empty tail
        assert_eq!(normalize_derivation_path("m/44'/60'/0'/"), "m/44'/60'/0'/");
        // Not a path at all
        assert_eq!(normalize_derivation_path(""), "");
    }

    #[test]
    fn recovery_param_maps_canonical_bits() {
        assert_eq!(normalize_recovery_param(0), 27);
        assert_eq!(normalize_recovery_param(1), 28);
    }

    #[test]
    fn recovery_param_passes_other_values_through() {
        assert_eq!(normalize_recovery_param(27), 27);
        assert_eq!(normalize_recovery_param(28), 28);
        assert_eq!(normalize_recovery_param(42), 42);
        assert_eq!(normalize_recovery_param(-1), -1);
    }
}

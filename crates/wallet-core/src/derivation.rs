//! BIP32/BIP44 derivation path parsing and serialization.
//!
//! A derivation path addresses one key pair inside a hierarchical
//! deterministic wallet:
//!
//! ```text
//! m / purpose' / coin_type' / account' / change / address_index
//! ```
//!
//! The first three segments are hardened (apostrophe-suffixed); the last two
//! are plain indices. Ethereum wallets use purpose `44` and coin type `60`
//! (`1` on test networks) per BIP44.
//!
//! # Serialized forms
//!
//! [`serialize_derivation_path`] produces three shapes, depending on which
//! optional components are present:
//!
//! - no change index: `m/44'/60'/0'/` (trailing delimiter, no bare fourth
//!   segment)
//! - change but no address index: `m/44'/60'/0'/0`
//! - both: `m/44'/60'/0'/0/0`
//!
//! The trailing delimiter in the first shape is load-bearing: downstream
//! consumers append the address index directly to it.
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::derivation::{
//!     parse_derivation_path, serialize_derivation_path, DerivationPathComponents,
//! };
//!
//! let components = DerivationPathComponents {
//!     change: Some(0),
//!     address_index: Some(5),
//!     ..Default::default()
//! };
//! assert_eq!(serialize_derivation_path(&components), "m/44'/60'/0'/0/5");
//!
//! let parsed = parse_derivation_path("m/44'/60'/0'/0/5").unwrap();
//! assert_eq!(parsed.address_index, Some(5));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The BIP44 purpose field.
pub const PURPOSE: u32 = 44;

/// The BIP44 coin type for Ethereum main networks.
pub const COIN_MAINNET: u32 = 60;

/// The BIP44 coin type for Ethereum test networks.
pub const COIN_TESTNET: u32 = 1;

/// The default account index.
pub const ACCOUNT: u32 = 0;

/// The path header key.
pub const HEADER_KEY: &str = "m";

/// The segment delimiter.
pub const DELIMITER: char = '/';

/// The hardened-segment marker.
pub const HARDENED_MARKER: char = '\'';

/// The structured components of a BIP44 derivation path.
///
/// All fields are optional; serialization fills in the standard Ethereum
/// defaults (`purpose` 44, `coin_type` 60, `account` 0) for the hardened
/// segments when they are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationPathComponents {
    /// The BIP44 purpose. Defaults to [`PURPOSE`].
    pub purpose: Option<u32>,

    /// The coin type. Defaults to [`COIN_MAINNET`].
    pub coin_type: Option<u32>,

    /// The account index. Defaults to [`ACCOUNT`].
    pub account: Option<u32>,

    /// The change index. When absent, serialization stops after the account
    /// segment's trailing delimiter.
    pub change: Option<u32>,

    /// The address index. Only serialized when `change` is also present.
    pub address_index: Option<u32>,
}

/// Serializes path components into a derivation path string.
///
/// When `change` is absent the result ends with a trailing delimiter and the
/// `address_index` is ignored; see the module documentation for the exact
/// shapes.
///
/// # Example
///
/// ```
/// use evm_wallet_core::derivation::{serialize_derivation_path, DerivationPathComponents};
///
/// let base = serialize_derivation_path(&DerivationPathComponents::default());
/// assert_eq!(base, "m/44'/60'/0'/");
/// ```
#[must_use]
pub fn serialize_derivation_path(components: &DerivationPathComponents) -> String {
    let purpose = components.purpose.unwrap_or(PURPOSE);
    let coin_type = components.coin_type.unwrap_or(COIN_MAINNET);
    let account = components.account.unwrap_or(ACCOUNT);

    let mut path = format!(
        "{HEADER_KEY}{DELIMITER}{purpose}{HARDENED_MARKER}{DELIMITER}\
         {coin_type}{HARDENED_MARKER}{DELIMITER}{account}{HARDENED_MARKER}{DELIMITER}"
    );

    match (components.change, components.address_index) {
        (Some(change), Some(address_index)) => {
            path.push_str(&change.to_string());
            path.push(DELIMITER);
            path.push_str(&address_index.to_string());
        }
        (Some(change), None) => path.push_str(&change.to_string()),
        (None, _) => {}
    }

    path
}

/// Parses a derivation path string into its structured components.
///
/// The path must start with the header key `m`, carry four or five segments
/// after it, and follow the hardened/plain split described in the module
/// documentation. Parsing is strict: the change segment is required (the
/// trailing-delimiter form produced by [`serialize_derivation_path`] is a
/// base for appending indices, not a complete path).
///
/// # Errors
///
/// - [`Error::InvalidFormat`] for a wrong header, a missing hardened marker,
///   or a non-numeric segment
/// - [`Error::InvalidLength`] for fewer than four or more than five segments
///   after the header
pub fn parse_derivation_path(derivation_path: &str) -> Result<DerivationPathComponents> {
    let mut segments = derivation_path.split(DELIMITER);

    // `split` always yields at least one item
    let header = segments.next().unwrap_or_default();
    if header != HEADER_KEY {
        return Err(Error::InvalidFormat(format!(
            "derivation path must start with header key `{HEADER_KEY}`, got `{header}`"
        )));
    }

    let rest: Vec<&str> = segments.collect();
    if rest.len() < 4 || rest.len() > 5 {
        return Err(Error::InvalidLength(format!(
            "derivation path must have 4 or 5 segments after the header, got {}",
            rest.len()
        )));
    }

    let purpose = parse_hardened_segment(rest[0], "purpose")?;
    let coin_type = parse_hardened_segment(rest[1], "coin type")?;
    let account = parse_hardened_segment(rest[2], "account")?;
    let change = parse_plain_segment(rest[3], "change")?;
    let address_index = match rest.get(4) {
        Some(segment) => Some(parse_plain_segment(segment, "address index")?),
        None => None,
    };

    Ok(DerivationPathComponents {
        purpose: Some(purpose),
        coin_type: Some(coin_type),
        account: Some(account),
        change: Some(change),
        address_index,
    })
}

/// Parses a hardened segment like `44'` into its index.
fn parse_hardened_segment(segment: &str, name: &str) -> Result<u32> {
    let digits = segment.strip_suffix(HARDENED_MARKER).ok_or_else(|| {
        Error::InvalidFormat(format!(
            "derivation path {name} segment `{segment}` must be hardened"
        ))
    })?;
    parse_segment_index(digits, name)
}

/// Parses a plain segment like `0` into its index.
fn parse_plain_segment(segment: &str, name: &str) -> Result<u32> {
    if segment.ends_with(HARDENED_MARKER) {
        return Err(Error::InvalidFormat(format!(
            "derivation path {name} segment `{segment}` must not be hardened"
        )));
    }
    parse_segment_index(segment, name)
}

fn parse_segment_index(digits: &str, name: &str) -> Result<u32> {
    digits.parse::<u32>().map_err(|_| {
        Error::InvalidFormat(format!(
            "derivation path {name} segment `{digits}` is not a non-negative integer"
        ))
    })
}

//! Arbitrary-precision value arithmetic with Ethereum unit conversions.
//!
//! Ethereum denominates value in wei (`10^-18` ether) and gas prices in
//! gwei (`10^9` wei). Converting between units with floating point silently
//! loses precision, so [`BigNumber`] keeps everything in exact 256-bit
//! integer arithmetic.
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::BigNumber;
//!
//! let one_ether = BigNumber::from(1u64).to_wei().unwrap();
//! assert_eq!(one_ether.to_string(), "1000000000000000000");
//! assert_eq!(one_ether.from_wei().to_string(), "1");
//! ```

use core::fmt;
use core::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wei per ether (`10^18`).
const WEI_IN_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Wei per gwei (`10^9`).
const WEI_IN_GWEI: U256 = U256::from_limbs([1_000_000_000, 0, 0, 0]);

/// An unsigned 256-bit integer with exact Ethereum unit conversions.
///
/// This is a thin wrapper around [`alloy_primitives::U256`]. Multiplying
/// conversions are checked and report [`Error::Overflow`] instead of
/// wrapping; dividing conversions truncate toward zero, matching integer
/// division.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BigNumber(U256);

impl BigNumber {
    /// The zero value.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wraps a raw 256-bit integer.
    #[must_use]
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Converts an ether-denominated value to wei (`× 10^18`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] when the product does not fit in 256
    /// bits.
    pub fn to_wei(&self) -> Result<Self> {
        self.0
            .checked_mul(WEI_IN_ETHER)
            .map(Self)
            .ok_or_else(|| Error::Overflow(format!("{} wei conversion exceeds 256 bits", self.0)))
    }

    /// Converts a wei-denominated value to ether (`÷ 10^18`, truncating).
    #[must_use]
    pub fn from_wei(&self) -> Self {
        Self(self.0 / WEI_IN_ETHER)
    }

    /// Converts a gwei count to wei (`× 10^9`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] when the product does not fit in 256
    /// bits.
    pub fn to_gwei(&self) -> Result<Self> {
        self.0
            .checked_mul(WEI_IN_GWEI)
            .map(Self)
            .ok_or_else(|| Error::Overflow(format!("{} gwei conversion exceeds 256 bits", self.0)))
    }

    /// Converts a wei-denominated value to gwei (`÷ 10^9`, truncating).
    #[must_use]
    pub fn from_gwei(&self) -> Self {
        Self(self.0 / WEI_IN_GWEI)
    }

    /// Returns the inner [`U256`].
    #[must_use]
    pub const fn inner(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // U256 renders in decimal
        write!(f, "{}", self.0)
    }
}

impl FromStr for BigNumber {
    type Err = Error;

    /// Parses a decimal string, or a hexadecimal one when `0x`-prefixed.
    fn from_str(value: &str) -> Result<Self> {
        let (digits, radix) = match value.strip_prefix("0x") {
            Some(hex_digits) => (hex_digits, 16),
            None => (value, 10),
        };
        if digits.is_empty() {
            return Err(Error::InvalidFormat(format!(
                "`{value}` is not a big number: no digits"
            )));
        }
        let parsed = U256::from_str_radix(digits, radix);
        parsed
            .map(Self)
            .map_err(|err| Error::InvalidFormat(format!("`{value}` is not a big number: {err}")))
    }
}

impl From<u32> for BigNumber {
    fn from(value: u32) -> Self {
        Self(U256::from(value))
    }
}

impl From<u64> for BigNumber {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for BigNumber {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for BigNumber {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

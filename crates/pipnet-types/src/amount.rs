//! PIP amounts and decimal formatting.
//!
//! A `Pip` is an unsigned amount in the chain's smallest unit. One display
//! unit of any coin equals 10^18 PIP. Display conversion is locale-agnostic
//! with at most 18 fraction digits.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Fraction digits of a display unit.
pub const AMOUNT_DECIMALS: u32 = 18;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid decimal amount")]
    InvalidDecimal,

    #[error("more than {AMOUNT_DECIMALS} fraction digits")]
    TooPrecise,
}

/// Amount in PIP (the chain's smallest unit).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Pip(BigUint);

impl Pip {
    pub fn zero() -> Self {
        Pip(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn from_u64(value: u64) -> Self {
        Pip(BigUint::from(value))
    }

    /// PIP value of one display unit (10^18).
    pub fn unit() -> Self {
        Pip::pow10(AMOUNT_DECIMALS)
    }

    /// 10^exp PIP.
    pub fn pow10(exp: u32) -> Self {
        Pip(BigUint::from(10u32).pow(exp))
    }

    /// Interpret big-endian bytes as an amount. Empty means zero.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Pip(BigUint::from_bytes_be(bytes))
    }

    /// Minimal big-endian representation; empty for zero.
    ///
    /// This is the canonical leaf encoding for amounts in the tree codec.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        if self.0.is_zero() {
            Vec::new()
        } else {
            self.0.to_bytes_be()
        }
    }

    /// Parse a decimal display-unit string (`"12.5"`) into PIP.
    ///
    /// Only ASCII digits and at most one `.` are accepted; at most 18
    /// fraction digits. Sign characters are rejected.
    pub fn parse_decimal(s: &str) -> Result<Self, AmountError> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(AmountError::InvalidDecimal);
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AmountError::InvalidDecimal);
        }
        if frac_part.len() > AMOUNT_DECIMALS as usize {
            return Err(AmountError::TooPrecise);
        }

        let mut digits = String::with_capacity(int_part.len() + AMOUNT_DECIMALS as usize);
        digits.push_str(int_part);
        digits.push_str(frac_part);
        for _ in frac_part.len()..AMOUNT_DECIMALS as usize {
            digits.push('0');
        }
        let value = if digits.is_empty() {
            BigUint::zero()
        } else {
            digits
                .parse::<BigUint>()
                .map_err(|_| AmountError::InvalidDecimal)?
        };
        Ok(Pip(value))
    }

    /// Format as a display-unit decimal string, trailing zeros trimmed.
    pub fn to_decimal_string(&self) -> String {
        let (int, frac) = self.0.div_rem(&Pip::unit().0);
        if frac.is_zero() {
            return int.to_string();
        }
        let mut frac_str = format!("{:0>width$}", frac, width = AMOUNT_DECIMALS as usize);
        while frac_str.ends_with('0') {
            frac_str.pop();
        }
        format!("{}.{}", int, frac_str)
    }

    pub fn checked_sub(&self, other: &Pip) -> Option<Pip> {
        if self.0 >= other.0 {
            Some(Pip(&self.0 - &other.0))
        } else {
            None
        }
    }

    pub fn saturating_add(&self, other: &Pip) -> Pip {
        Pip(&self.0 + &other.0)
    }

    pub fn scaled(&self, factor: u64) -> Pip {
        Pip(&self.0 * BigUint::from(factor))
    }
}

impl fmt::Display for Pip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Serialize for Pip {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

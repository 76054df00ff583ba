//! Token amount type.
//!
//! Amounts are unsigned fixed-width integers (u128 raw units). There is no
//! wrapping arithmetic on this type: callers go through the checked forms and
//! decide how to surface an overflow or underflow.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// An amount of MINES tokens in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u128::MAX);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl FromStr for TokenAmount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| TypesError::InvalidAmount(s.to_string()))
    }
}

// Self-describing formats go through `deserialize_any` so amounts also load
// from buffered content (internally tagged enums), which cannot carry a u128
// hint. Decimal strings are accepted for values past u64.
impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(AmountVisitor)
        } else {
            u128::deserialize(deserializer).map(Self)
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = TokenAmount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a non-negative integer or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TokenAmount(v.into()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(TokenAmount(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u128::try_from(v)
            .map(TokenAmount)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MINES", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_arithmetic_reports_overflow_and_underflow() {
        assert_eq!(TokenAmount::MAX.checked_add(TokenAmount::new(1)), None);
        assert_eq!(TokenAmount::ZERO.checked_sub(TokenAmount::new(1)), None);
        assert_eq!(
            TokenAmount::new(18).checked_add(TokenAmount::new(24)),
            Some(TokenAmount::new(42))
        );
    }

    #[test]
    fn parses_decimal_strings() {
        assert_eq!("42".parse::<TokenAmount>().unwrap(), TokenAmount::new(42));
        assert!("-1".parse::<TokenAmount>().is_err());
        assert!("forty".parse::<TokenAmount>().is_err());
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let n: TokenAmount = serde_json::from_str("42").unwrap();
        assert_eq!(n, TokenAmount::new(42));
        let big: TokenAmount =
            serde_json::from_str("\"340282366920938463463374607431768211455\"").unwrap();
        assert_eq!(big, TokenAmount::MAX);
        assert!(serde_json::from_str::<TokenAmount>("-3").is_err());
        assert!(serde_json::from_str::<TokenAmount>("1.5").is_err());
    }

    #[test]
    fn display_includes_unit() {
        assert_eq!(TokenAmount::new(7).to_string(), "7 MINES");
    }
}

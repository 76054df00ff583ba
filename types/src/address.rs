//! Account address type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// An account identity as resolved by the execution environment.
///
/// The ledger treats addresses as opaque: equality is the only property it
/// relies on. A valid address is non-empty and contains no whitespace.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Create an address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is empty or contains whitespace. Use
    /// [`Address::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(Self::is_well_formed(&s), "address must be non-empty and whitespace-free");
        Self(s)
    }

    /// Parse an address, rejecting malformed input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if Self::is_well_formed(&s) {
            Ok(Self(s))
        } else {
            Err(TypesError::InvalidAddress(s))
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(s: &str) -> bool {
        !s.is_empty() && !s.chars().any(char::is_whitespace)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

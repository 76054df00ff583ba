//! Fundamental types for the MinesCoin ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account addresses and token amounts.

pub mod address;
pub mod amount;
pub mod error;

pub use address::Address;
pub use amount::TokenAmount;
pub use error::TypesError;

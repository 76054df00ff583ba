//! Errors raised while constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid token amount: {0:?}")]
    InvalidAmount(String),
}

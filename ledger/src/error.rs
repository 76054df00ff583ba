use std::fmt;
use std::str::FromStr;

use mines_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("caller {caller} is not authorized for this operation")]
    Unauthorized { caller: Address },

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("allowance for {spender} is {current}; reset it to zero before approving {requested}")]
    InvalidApproval {
        spender: Address,
        current: TokenAmount,
        requested: TokenAmount,
    },

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("total supply {total_supply} does not match sum of balances {balances:?}")]
    InvariantViolation {
        total_supply: TokenAmount,
        balances: Option<TokenAmount>,
    },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::InvalidApproval { .. } => ErrorKind::InvalidApproval,
            Self::ArithmeticOverflow => ErrorKind::ArithmeticOverflow,
            Self::InvariantViolation { .. } => ErrorKind::InvariantViolation,
            Self::Snapshot(_) => ErrorKind::Snapshot,
        }
    }
}

/// Field-less tag for [`LedgerError`], for callers that only care which
/// precondition failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    InsufficientBalance,
    InvalidApproval,
    ArithmeticOverflow,
    InvariantViolation,
    Snapshot,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unauthorized => "unauthorized",
            Self::InsufficientBalance => "insufficient_balance",
            Self::InvalidApproval => "invalid_approval",
            Self::ArithmeticOverflow => "arithmetic_overflow",
            Self::InvariantViolation => "invariant_violation",
            Self::Snapshot => "snapshot",
        };
        f.write_str(s)
    }
}

impl FromStr for ErrorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unauthorized" => Ok(Self::Unauthorized),
            "insufficient_balance" => Ok(Self::InsufficientBalance),
            "invalid_approval" => Ok(Self::InvalidApproval),
            "arithmetic_overflow" => Ok(Self::ArithmeticOverflow),
            "invariant_violation" => Ok(Self::InvariantViolation),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(format!("unknown error kind {other:?}")),
        }
    }
}

//! Entrypoint call surface: an operation name plus its arguments.
//!
//! The caller identity is not part of a [`Call`]; the execution environment
//! supplies it separately to [`TokenLedger::apply`](crate::TokenLedger::apply).

use mines_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entrypoint", rename_all = "snake_case")]
pub enum Call {
    Transfer {
        origin: Address,
        destination: Address,
        amount: TokenAmount,
    },
    Approve {
        spender: Address,
        amount: TokenAmount,
    },
    Mint {
        address: Address,
        amount: TokenAmount,
    },
    Burn {
        address: Address,
        amount: TokenAmount,
    },
}

impl Call {
    /// The entrypoint name this call targets.
    pub fn entrypoint(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Approve { .. } => "approve",
            Self::Mint { .. } => "mint",
            Self::Burn { .. } => "burn",
        }
    }
}

//! Events recorded for committed entrypoint calls.

use mines_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

/// Ledger-level events, appended in commit order. Rejected calls record
/// nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// An address was referenced for the first time.
    AccountCreated { address: Address },
    /// Tokens moved between accounts. `spender` is set for delegated transfers.
    Transfer {
        origin: Address,
        destination: Address,
        amount: TokenAmount,
        spender: Option<Address>,
    },
    /// An allowance was set (or reset to zero).
    Approval {
        owner: Address,
        spender: Address,
        amount: TokenAmount,
    },
    Mint { address: Address, amount: TokenAmount },
    Burn { address: Address, amount: TokenAmount },
}

//! MinesCoin token ledger.
//!
//! An authoritative record of account balances and delegated spending
//! allowances, mutated only through four entrypoints: `transfer`, `approve`,
//! `mint` and `burn`. Minting and burning are gated on the administrator fixed
//! at construction.
//!
//! Every entrypoint validates all of its preconditions before touching state,
//! so a rejected call leaves the ledger exactly as it found it and
//! `total_supply == sum(balances)` holds between calls.
//!
//! The host execution environment is responsible for authenticating the
//! caller and for delivering calls one at a time; the ledger itself holds no
//! locks.

pub mod auth;
pub mod call;
pub mod engine;
pub mod error;
pub mod event;
pub mod snapshot;

pub use call::Call;
pub use engine::TokenLedger;
pub use error::{ErrorKind, LedgerError};
pub use event::LedgerEvent;
pub use snapshot::{AccountSnapshot, LedgerSnapshot};

//! Account storage for the MinesCoin ledger.
//!
//! The ledger engine depends only on the [`AccountStore`] trait. The
//! in-memory [`MemoryAccountStore`] is the implementation used by default
//! and in tests.

pub mod account;
pub mod memory;

pub use account::{Account, AccountStore};
pub use memory::MemoryAccountStore;

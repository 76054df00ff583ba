//! Shared utilities for the MinesCoin ledger.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat};

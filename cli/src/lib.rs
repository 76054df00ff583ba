//! Driver for the MinesCoin ledger: loads call scenarios from TOML, replays
//! them against a fresh ledger, and renders ledger state as JSON.

pub mod report;
pub mod scenario;

pub use report::LedgerReport;
pub use scenario::{run_scenario, Expectation, ScenarioConfig, Step, StepOutcome};

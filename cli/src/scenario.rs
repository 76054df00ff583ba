//! Scenario files: an administrator plus an ordered list of calls, each with
//! the authenticated sender and the expected outcome.
//!
//! ```toml
//! administrator = "tz1Admin"
//!
//! [[steps]]
//! sender = "tz1Admin"
//! call = { entrypoint = "mint", address = "tz1Alice", amount = 18 }
//!
//! [[steps]]
//! sender = "tz1Charlie"
//! call = { entrypoint = "transfer", origin = "tz1Alice", destination = "tz1Bob", amount = 4 }
//! expect = "unauthorized"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context};
use mines_ledger::{Call, ErrorKind, LedgerError, TokenLedger};
use mines_types::Address;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct ScenarioConfig {
    pub administrator: Address,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Step {
    pub sender: Address,
    pub call: Call,
    #[serde(default)]
    pub expect: Expectation,
}

/// What a step is expected to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Expectation {
    #[default]
    Ok,
    /// Any rejection is acceptable.
    Fail,
    /// Rejection with a specific error kind.
    Kind(ErrorKind),
}

impl Expectation {
    pub fn matches(&self, outcome: &Result<(), LedgerError>) -> bool {
        match (self, outcome) {
            (Self::Ok, Ok(())) => true,
            (Self::Fail, Err(_)) => true,
            (Self::Kind(kind), Err(err)) => err.kind() == *kind,
            _ => false,
        }
    }
}

impl FromStr for Expectation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Self::Ok),
            "fail" => Ok(Self::Fail),
            other => other.parse().map(Self::Kind),
        }
    }
}

impl TryFrom<String> for Expectation {
    type Error = String;

    fn try_from(s: String) -> Result<Self, String> {
        s.parse()
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Fail => f.write_str("fail"),
            Self::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Result of replaying one step.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub index: usize,
    pub entrypoint: &'static str,
    pub sender: Address,
    pub result: Result<(), LedgerError>,
}

/// Replay every step against a fresh ledger.
///
/// Stops at the first step whose outcome does not match its expectation.
pub fn run_scenario(config: &ScenarioConfig) -> anyhow::Result<(TokenLedger, Vec<StepOutcome>)> {
    let mut ledger = TokenLedger::new(config.administrator.clone());
    let mut outcomes = Vec::with_capacity(config.steps.len());

    for (index, step) in config.steps.iter().enumerate() {
        let result = ledger.apply(&step.call, &step.sender);
        let entrypoint = step.call.entrypoint();
        if !step.expect.matches(&result) {
            let got = match &result {
                Ok(()) => "ok".to_string(),
                Err(err) => format!("{} ({err})", err.kind()),
            };
            bail!(
                "step {index} ({entrypoint} by {}): expected {}, got {got}",
                step.sender,
                step.expect
            );
        }
        tracing::info!(index, entrypoint, sender = %step.sender, ok = result.is_ok(), "step replayed");
        outcomes.push(StepOutcome {
            index,
            entrypoint,
            sender: step.sender.clone(),
            result,
        });
    }

    ledger
        .check_invariants()
        .context("ledger invariant broken after scenario")?;
    Ok((ledger, outcomes))
}

//! `mines`: drive a MinesCoin ledger from the command line.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mines_cli::{run_scenario, LedgerReport, ScenarioConfig};
use mines_ledger::{LedgerSnapshot, TokenLedger};
use mines_utils::LogFormat;

#[derive(Parser)]
#[command(name = "mines", about = "MinesCoin token ledger driver")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "MINES_LOG_LEVEL")]
    log_level: String,

    /// Log output format: "human" or "json".
    #[arg(long, default_value = "human", env = "MINES_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a TOML scenario against a fresh ledger and print the final state.
    Run {
        /// Path to the scenario file.
        scenario: PathBuf,

        /// Write the final snapshot (bincode) to this path.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,

        /// Include the event journal in the printed report.
        #[arg(long)]
        events: bool,
    },
    /// Verify a snapshot file and print its contents.
    Inspect {
        /// Path to a snapshot written by `run --snapshot-out`.
        snapshot: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mines_utils::init_logging(cli.log_format, &cli.log_level);

    match cli.command {
        Command::Run {
            scenario,
            snapshot_out,
            events,
        } => {
            let config = ScenarioConfig::from_toml_file(&scenario)?;
            tracing::info!(
                "Replaying {} step(s) from {} (administrator {})",
                config.steps.len(),
                scenario.display(),
                config.administrator
            );
            let (mut ledger, outcomes) = run_scenario(&config)?;
            let rejected = outcomes.iter().filter(|o| o.result.is_err()).count();
            tracing::info!(
                "Scenario complete: {} committed, {} rejected as expected",
                outcomes.len() - rejected,
                rejected
            );

            let snapshot = ledger.snapshot();
            if let Some(path) = snapshot_out {
                std::fs::write(&path, snapshot.to_bytes()?)
                    .with_context(|| format!("failed to write snapshot {}", path.display()))?;
                tracing::info!("Snapshot written to {}", path.display());
            }

            let journal = if events { ledger.drain_events() } else { Vec::new() };
            println!("{}", LedgerReport::from_snapshot(&snapshot, journal).to_json()?);
        }
        Command::Inspect { snapshot } => {
            let bytes = std::fs::read(&snapshot)
                .with_context(|| format!("failed to read snapshot {}", snapshot.display()))?;
            let snap = LedgerSnapshot::from_bytes(&bytes)?;
            // Restoring checks the hash and the supply invariant.
            let ledger = TokenLedger::from_snapshot(&snap)?;
            tracing::info!(
                "Snapshot {} verified: {} account(s), supply {}",
                snap.hash_hex(),
                ledger.account_count(),
                ledger.total_supply()
            );
            println!("{}", LedgerReport::from_snapshot(&snap, Vec::new()).to_json()?);
        }
    }

    Ok(())
}

//! Lincheck demo entrypoint: runs the engine's worked scenarios and reports
//! whether each one checks out the way it is expected to.

mod scenarios;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lincheck_checker::{Checker, SequentialConsistencyChecker};
use lincheck_covering::ExternalCausality;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lincheck", version, about = "Sequential-consistency scenario runner")]
struct Args {
    /// Run only the named scenario (matches `Scenario::name`).
    #[arg(long)]
    scenario: Option<String>,
    /// Emit per-thread `trace`-level synchronization logging.
    #[arg(short, long)]
    verbose: bool,
}

fn configure_logging(verbose: bool) -> Result<Option<WorkerGuard>> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("lincheck.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "lincheck.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("trace")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        Err(_) => Ok(None),
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _log_guard = configure_logging(args.verbose)?;

    info!(target: "runtime", "startup");

    let scenarios: Vec<_> = scenarios::all()
        .into_iter()
        .filter(|scenario| {
            args.scenario
                .as_deref()
                .is_none_or(|wanted| wanted == scenario.name)
        })
        .collect();

    if scenarios.is_empty() {
        return Err(anyhow::anyhow!(
            "no scenario named {:?}",
            args.scenario.unwrap_or_default()
        ))
        .context("selecting scenario to run");
    }

    let results: Vec<(&'static str, bool, bool)> = std::thread::scope(|scope| {
        let handles: Vec<_> = scenarios
            .iter()
            .map(|scenario| {
                scope.spawn(move || {
                    let checker = SequentialConsistencyChecker::new(ExternalCausality);
                    let consistent = checker.check(&scenario.execution).is_none();
                    (scenario.name, scenario.expected_consistent, consistent)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut all_passed = true;
    for (name, expected, observed) in &results {
        let passed = expected == observed;
        all_passed &= passed;
        let outcome = if *observed { "consistent" } else { "inconsistent" };
        if passed {
            info!(target: "scenario", name, outcome, "pass");
            println!("PASS  {name}: {outcome}");
        } else {
            error!(target: "scenario", name, outcome, expected, "fail");
            println!("FAIL  {name}: got {outcome}, expected {}", if *expected { "consistent" } else { "inconsistent" });
        }
    }

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

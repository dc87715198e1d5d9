//! Reader for JSON run logs
//!
//! Reads files written with `bender --run-log` and prints one line per event
//! followed by the run summary.

use anyhow::{Context, Result};
use bender::run_log::{LoggedEvent, RunEvent, RunLog};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "summarize-run-log", about = "Print a saved bender run log")]
struct Args {
    /// Run log produced by `bender --run-log`
    log: PathBuf,

    /// Only print the summary
    #[arg(short, long)]
    summary_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log = RunLog::load_from_file(&args.log)
        .with_context(|| format!("read run log {}", args.log.display()))?;

    println!("=== Run Log: {} ===", args.log.display());
    if !args.summary_only {
        for logged in log.events() {
            println!("{}", describe(logged));
        }
    }

    println!("\n=== Summary ===");
    println!("{}", log.summary());
    Ok(())
}

fn describe(logged: &LoggedEvent) -> String {
    let text = match &logged.event {
        RunEvent::Moved { direction, from, to } => format!("{:<5} {} -> {}", direction, from, to),
        RunEvent::Blocked { direction, at, tile } => {
            format!("{:<5} blocked by '{}' at {}", direction, tile.symbol(), at)
        }
        RunEvent::Destroyed { direction, at } => format!("{:<5} smashed obstacle at {}", direction, at),
        RunEvent::Teleported { direction, from, to } => {
            format!("{:<5} teleport {} => {}", direction, from, to)
        }
        RunEvent::Finished => "booth reached".to_string(),
        RunEvent::LoopDetected => "LOOP".to_string(),
    };
    format!("[{:5}] {}", logged.step, text)
}

//! WONS Harvester CLI - main entry point

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::error;

use wons_harvester::application::{EventEmitter, HarvestUseCases};
use wons_harvester::domain::events::{HarvestEvent, RunOutcome, RunSummary};
use wons_harvester::domain::request::RunRequest;
use wons_harvester::infrastructure::config::{AppConfig, defaults};
use wons_harvester::infrastructure::logging::init_logging;

/// Harvest well records from the DECC WONS portal into a local CSV store.
#[derive(Parser, Debug)]
#[command(name = "wons-harvester", version, about)]
struct Cli {
    /// Quadrant number or inclusive range, e.g. `15` or `1-30`
    #[arg(short, long, default_value = defaults::QUADRANT_SPEC)]
    quadrant: String,

    /// Block number or inclusive range; with --well, the block of that well
    #[arg(short, long, default_value = defaults::BLOCK_SPEC)]
    block: String,

    /// Well code for a single lookup, e.g. `A21z`; empty sweeps the listing
    #[arg(short, long, default_value = "")]
    well: String,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store file path, overriding the configuration
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let Cli {
        quadrant,
        block,
        well,
        config: config_path,
        store,
        json,
        verbose,
    } = Cli::parse();

    let mut config = match AppConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(config_error) => {
            eprintln!("Error: {config_error}");
            process::exit(2);
        }
    };
    if let Some(store_path) = store {
        config.harvest.store_path = store_path;
    }
    if verbose {
        config.logging.level = "debug".to_string();
    }

    // The harvester still works when logging cannot come up.
    if let Err(logging_error) = init_logging(&config.logging) {
        eprintln!("Warning: logging unavailable: {logging_error}");
    }

    let (events, receiver) = EventEmitter::channel();
    let observer = tokio::spawn(observe_events(receiver));

    let use_cases = HarvestUseCases::new(config, events);
    let result = use_cases.run(RunRequest::new(quadrant, block, well)).await;

    // Dropping the use cases closes the event channel and ends the observer.
    drop(use_cases);
    let _ = observer.await;

    match result {
        Ok(summary) => {
            if json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(text) => println!("{text}"),
                    Err(json_error) => {
                        eprintln!("Error: {json_error}");
                        process::exit(1);
                    }
                }
            } else {
                print_summary(&summary);
            }
        }
        Err(run_error) => {
            error!("Run failed: {}", run_error);
            eprintln!("Error: {run_error}");
            process::exit(1);
        }
    }
}

/// Prints user-facing progress while the run executes.
async fn observe_events(mut receiver: UnboundedReceiver<HarvestEvent>) {
    while let Some(event) = receiver.recv().await {
        match event {
            HarvestEvent::ListingScanned {
                admitted,
                skipped_known,
                ..
            } => {
                println!("{admitted} wells to fetch ({skipped_known} already stored)");
            }
            HarvestEvent::RecordAppended {
                registration_no, ..
            } => {
                println!("stored {registration_no}");
            }
            HarvestEvent::RunStarted { .. }
            | HarvestEvent::TargetFailed { .. }
            | HarvestEvent::RunCompleted { .. } => {}
        }
    }
}

fn print_summary(summary: &RunSummary) {
    match summary.outcome {
        RunOutcome::NotIssued => {
            println!("nothing to do: no quadrant or block requested");
        }
        RunOutcome::Completed => {
            let elapsed = summary.elapsed().num_milliseconds() as f64 / 1000.0;
            println!("run complete in {elapsed:.1}s");
            println!("  wells found:      {}", summary.targets_discovered);
            println!("  fetched:          {}", summary.targets_admitted);
            println!("  already stored:   {}", summary.skipped_known);
            println!("  records appended: {}", summary.records_appended);
            if summary.failure_count() > 0 {
                println!("  failures:         {}", summary.failure_count());
            }
        }
    }
}

//! Strategy aggregation binary: merges several training runs' strategy CSVs
//! into one visit-weighted average (spec.md §4.8, §6 CLI `--aggregate`).

use clap::Parser;
use colored::Colorize;
use robopoker::mccfr::aggregator;

#[derive(Parser)]
#[command(author, version, about = "merge strategy CSVs by visit-weighted average")]
struct Args {
    /// path to write the merged strategy CSV
    output: String,

    /// two or more input strategy CSVs to merge
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<String>,
}

fn main() {
    robopoker::init_logging();
    let args = Args::parse();

    if !confirm_overwrite(&args.output) {
        log::info!("aborted, '{}' left untouched", args.output);
        return;
    }

    log::info!("aggregating {} runs into {}", args.inputs.len(), args.output);
    if let Err(e) = aggregator::aggregate_files(&args.inputs, &args.output) {
        log::error!("aggregation failed: {e}");
        std::process::exit(1);
    }
    println!(
        "{} merged {} runs into {}",
        "done".green().bold(),
        args.inputs.len(),
        args.output
    );
}

/// asks before clobbering an existing output file; always proceeds when the
/// path is new or stdin isn't an interactive terminal.
fn confirm_overwrite(path: &str) -> bool {
    if !std::path::Path::new(path).exists() {
        return true;
    }
    dialoguer::Confirm::new()
        .with_prompt(format!("{} already exists, overwrite?", path))
        .default(false)
        .interact()
        .unwrap_or(false)
}

//! MCCFR training binary: runs the external-sampling solver for a fixed
//! iteration count and writes the resulting average strategy to CSV
//! (spec.md §6 CLI).

use clap::{Parser, ValueEnum};
use colored::Colorize;
use robopoker::clustering::BucketTable;
use robopoker::mccfr::{Discount, Prune, Trainer, TrainerContext};
use robopoker::save::{bucket_csv, strategy_csv};

#[derive(Clone, Copy, ValueEnum)]
enum DiscountArg {
    Vanilla,
    Linear,
}

impl From<DiscountArg> for Discount {
    fn from(arg: DiscountArg) -> Self {
        match arg {
            DiscountArg::Vanilla => Discount::Vanilla,
            DiscountArg::Linear => Discount::Linear,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "train an MCCFR strategy for three-player Spin & Go")]
struct Args {
    /// number of training iterations
    #[arg(default_value_t = 10_000)]
    iterations: usize,

    /// path to write the strategy CSV
    #[arg(default_value = "strategy.csv")]
    output: String,

    /// bucket table CSV to load per street (flop.csv, turn.csv, river.csv
    /// alongside this path); omit to train with unbucketed post-flop keys
    #[arg(long)]
    buckets: Option<String>,

    /// run single-threaded instead of one rayon task per iteration
    #[arg(long)]
    sequential: bool,

    /// base seed for the per-worker thread-local PRNGs (spec.md §5)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// regret/strategy-sum weighting schedule (opt-in supplement to spec.md
    /// §4.7's vanilla algorithm)
    #[arg(value_enum, long, default_value_t = DiscountArg::Vanilla)]
    discount: DiscountArg,

    /// enable Pluribus-style regret-based pruning with the teacher's default
    /// threshold/explore/warmup constants
    #[arg(long)]
    prune: bool,
}

fn main() {
    robopoker::init_logging();
    let args = Args::parse();

    if !confirm_overwrite(&args.output) {
        log::info!("aborted, '{}' left untouched", args.output);
        return;
    }

    let buckets = match &args.buckets {
        Some(path) => load_buckets(path),
        None => BucketTable::new(),
    };

    log::info!(
        "training {} iterations ({})",
        args.iterations,
        if args.sequential { "sequential" } else { "parallel" }
    );

    let mut ctx = TrainerContext::new(buckets).with_discount(args.discount.into());
    if args.prune {
        ctx = ctx.with_prune(Prune::pluribus());
    }
    let trainer = Trainer::from_context(ctx, args.seed);
    let bar = robopoker::progress(args.iterations);
    if args.sequential {
        trainer.train_sequential(args.iterations);
    } else {
        #[cfg(feature = "server")]
        trainer.train_parallel(args.iterations);
        #[cfg(not(feature = "server"))]
        trainer.train_sequential(args.iterations);
    }
    bar.finish();

    let rows: Vec<strategy_csv::StrategyRow> = trainer
        .context()
        .table
        .snapshot()
        .iter()
        .map(|(key, node)| strategy_csv::StrategyRow::from_node(key, node))
        .collect();

    log::info!("writing {} info sets to {}", rows.len(), args.output);
    if let Err(e) = strategy_csv::write(&args.output, &rows) {
        log::error!("failed to write strategy file: {e}");
        std::process::exit(1);
    }
    println!(
        "{} wrote {} rows to {}",
        "done".green().bold(),
        rows.len(),
        args.output
    );
}

/// asks before clobbering an existing strategy file; always proceeds when the
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

/// loads a street's worth of bucket entries from one CSV -- `--buckets`
/// names the flop file; `turn`/`river` siblings are loaded by convention
/// (`<stem>.turn.csv`, `<stem>.river.csv`) if present.
fn load_buckets(flop_path: &str) -> BucketTable {
    use robopoker::cards::Street;
    let mut table = match bucket_csv::read(flop_path, Street::Flop) {
        Ok(t) => t,
        Err(e) => {
            log::error!("failed to read bucket table '{flop_path}': {e}");
            std::process::exit(1);
        }
    };
    for (street, suffix) in [(Street::Turn, "turn"), (Street::Rive, "river")] {
        let sibling = sibling_path(flop_path, suffix);
        if let Ok(more) = bucket_csv::read(&sibling, street) {
            for (key, id) in more.iter() {
                let (round, rank, suit) = key;
                table.insert(*round, rank.clone(), suit.clone(), *id);
            }
        }
    }
    table
}

fn sibling_path(flop_path: &str, suffix: &str) -> String {
    match flop_path.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}.{suffix}.{ext}"),
        None => format!("{flop_path}.{suffix}"),
    }
}

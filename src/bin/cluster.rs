//! Equity + clustering pipeline binary: enumerates suit-canonical hands for
//! a street, Monte-Carlo samples each hand's equity into a histogram, then
//! k-means++ clusters those histograms into a bucket table CSV (spec.md §2
//! components C/D/E, §6 "Bucket table file").

use clap::{Parser, ValueEnum};
use colored::Colorize;
use rand::SeedableRng;
use robopoker::cards::isomorphism::CanonicalEnumerator;
use robopoker::cards::Street;
use robopoker::clustering::abstraction::{RankPattern, SuitPattern};
use robopoker::clustering::{equity, kmeans, Histogram, Metric};
use robopoker::save::bucket_csv;
use std::collections::HashSet;

#[derive(Clone, Copy, ValueEnum)]
enum TargetStreet {
    Turn,
    River,
}

impl From<TargetStreet> for Street {
    fn from(s: TargetStreet) -> Street {
        match s {
            TargetStreet::Turn => Street::Turn,
            TargetStreet::River => Street::Rive,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    L2,
    Emd,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Metric {
        match m {
            MetricArg::L2 => Metric::L2,
            MetricArg::Emd => Metric::Emd,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "cluster post-flop hands by all-in equity")]
struct Args {
    /// which street's 6/7-card configurations to enumerate
    #[arg(value_enum, default_value_t = TargetStreet::River, long)]
    street: TargetStreet,

    /// how many canonical configurations to sample (the full enumeration is
    /// large; this caps the working set per spec.md §4.2 "finite" sequence)
    #[arg(long, default_value_t = 2_000)]
    configurations: usize,

    /// Monte-Carlo trials per configuration (spec.md §4.3 default is 1e5;
    /// this default is lower to keep a full run tractable on one machine)
    #[arg(long, default_value_t = 200)]
    trials: usize,

    /// histogram bin count, i.e. the feature dimension `d` (spec.md §4.4)
    #[arg(long, default_value_t = 8)]
    bins: usize,

    /// number of clusters K
    #[arg(long, default_value_t = 20)]
    k: usize,

    /// k-means++ restarts, keeping the lowest-inertia run
    #[arg(long, default_value_t = 3)]
    restarts: usize,

    #[arg(value_enum, long, default_value_t = MetricArg::Emd)]
    metric: MetricArg,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// path to write the bucket CSV
    #[arg(long, default_value = "buckets.csv")]
    output: String,
}

fn main() {
    robopoker::init_logging();
    let args = Args::parse();

    if !confirm_overwrite(&args.output) {
        log::info!("aborted, '{}' left untouched", args.output);
        return;
    }

    let street: Street = args.street.into();
    let board_len = street.board_len();

    log::info!("enumerating up to {} canonical {street} configurations", args.configurations);
    let configs: Vec<_> = CanonicalEnumerator::new(2, board_len, HashSet::new())
        .take(args.configurations)
        .collect();
    log::info!("sampling equity for {} configurations", configs.len());

    let mut rng = rand::rngs::SmallRng::seed_from_u64(args.seed);
    let bar = robopoker::progress(configs.len());
    let histograms: Vec<Histogram> = configs
        .iter()
        .map(|c| {
            let samples = equity::sample(&c.hole, &c.board, 1, args.trials, &mut rng);
            bar.inc(1);
            Histogram::from_samples(&samples, args.bins)
        })
        .collect();
    bar.finish();

    log::info!("clustering {} histograms into {} buckets", histograms.len(), args.k);
    let kmeans_args = kmeans::KMeansArgs {
        k: args.k.min(histograms.len().max(1)),
        metric: args.metric.into(),
        max_iterations: 100,
        restarts: args.restarts,
    };
    let result = kmeans::cluster(&histograms, &kmeans_args, &mut rng);

    let rows: Vec<(usize, Vec<f32>, usize, RankPattern, SuitPattern)> = configs
        .iter()
        .zip(result.assignments.iter())
        .enumerate()
        .map(|(i, (config, &bucket))| {
            let mut cards = config.hole.clone();
            cards.extend(config.board.clone());
            let rank_pattern = RankPattern::of(&cards);
            let suit_pattern = SuitPattern::of(&cards);
            (i, histograms[i].weights().to_vec(), bucket, rank_pattern, suit_pattern)
        })
        .collect();

    log::info!("writing {} bucket rows to {}", rows.len(), args.output);
    if let Err(e) = bucket_csv::write(&args.output, street, &rows) {
        log::error!("failed to write bucket file: {e}");
        std::process::exit(1);
    }
    println!(
        "{} wrote {} bucket rows to {}",
        "done".green().bold(),
        rows.len(),
        args.output
    );
}

/// asks before clobbering an existing bucket file; always proceeds when the
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

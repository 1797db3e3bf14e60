pub mod cards;
pub mod clustering;
pub mod gameplay;
pub mod mccfr;
pub mod save;

/// dimensional analysis types
pub type Chips = f32;
pub type Equity = f32;
pub type Probability = f32;
pub type Utility = f64;

// table stakes, fixed by the Spin & Go abstraction
pub const N: usize = 3;
pub const STACK: Chips = 15.0;
pub const SMALL_BLIND: Chips = 0.5;
pub const BIG_BLIND: Chips = 1.0;
pub const COMMITMENT_THRESHOLD: f32 = 0.7;

/// default post-flop bucket counts per street, matching the teacher
/// corpus's `KMEANS_FLOP_CLUSTER_COUNT` / `KMEANS_TURN_CLUSTER_COUNT` /
/// `KMEANS_EQTY_CLUSTER_COUNT` constants. Callers may override `K` per
/// spec.md §4.4; these are only defaults.
pub const KMEANS_FLOP_CLUSTER_COUNT: usize = 128;
pub const KMEANS_TURN_CLUSTER_COUNT: usize = 144;
pub const KMEANS_RIVER_CLUSTER_COUNT: usize = 101;

/// probabilistic-pruning defaults (spec.md §9 is silent on pruning; this is
/// an opt-in optimization knob supplementing spec.md §4.7, grounded on the
/// teacher's `PRUNING_THRESHOLD`/`PRUNING_EXPLORE`/`PRUNING_WARMUP`
/// constants -- off by default, so vanilla MCCFR is unaffected).
pub const PRUNING_THRESHOLD: Utility = -3e5;
pub const PRUNING_EXPLORE: Probability = 0.05;
pub const PRUNING_WARMUP: usize = 524_288;

/// trait for random generation, mainly (strictly) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize combined term+file logging. Called once from each binary.
#[cfg(feature = "server")]
pub fn init_logging() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// a progress bar with the teacher's spinner/percent/bar template.
#[cfg(feature = "server")]
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_millis(500);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let bar = indicatif::ProgressBar::new(n as u64);
    bar.set_style(style);
    bar.enable_steady_tick(tick);
    bar
}

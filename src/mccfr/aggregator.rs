use crate::save::strategy_csv;

/// the `I Strategy Aggregator` component (spec.md §2, §4.8): read every
/// `inputs` strategy file, merge by visit-weighted average, and write the
/// result to `output`. The merge math itself lives in
/// `save::strategy_csv::aggregate` -- this is just the file-handling layer
/// the CLI's `--aggregate` mode drives.
pub fn aggregate_files(inputs: &[String], output: &str) -> std::io::Result<()> {
    let runs = inputs
        .iter()
        .map(|path| strategy_csv::read(path))
        .collect::<std::io::Result<Vec<_>>>()?;
    let merged = strategy_csv::aggregate(&runs);
    strategy_csv::write(output, &merged)
}

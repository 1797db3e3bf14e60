pub mod abstraction;
pub mod bucket_table;
pub mod equity;
pub mod histogram;
pub mod kmeans;
pub mod metric;

pub use abstraction::{Abstraction, MissingBucketLog, RankPattern, SuitPattern};
pub use bucket_table::BucketTable;
pub use histogram::Histogram;
pub use metric::Metric;

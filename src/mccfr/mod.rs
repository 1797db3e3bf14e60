pub mod aggregator;
pub mod discount;
pub mod prune;
pub mod regret;
pub mod table;
pub mod trainer;

pub use aggregator::aggregate_files;
pub use discount::Discount;
pub use prune::Prune;
pub use regret::RegretNode;
pub use table::InfoTable;
pub use trainer::{Trainer, TrainerContext};

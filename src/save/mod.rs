pub mod bucket_csv;
pub mod strategy_csv;

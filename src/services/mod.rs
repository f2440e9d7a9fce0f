pub mod aggregator;
pub mod analytics;
pub mod csv_source;
pub mod entry;
pub mod etl;
pub mod forecast;
pub mod loader;
pub mod normalizer;

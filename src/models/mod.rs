use std::collections::HashMap;

pub mod category;
pub mod expense;
pub mod forecast;
pub mod settings;
pub mod summary;
pub mod task;

pub use category::*;
pub use expense::*;
pub use forecast::*;
pub use settings::*;
pub use summary::*;
pub use task::*;

/// A loosely typed input row keyed by lower-cased column name.
pub type RawRow = HashMap<String, String>;

/// Typed records produced from raw rows, plus what was dropped or coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    /// Rows dropped for a missing identity field.
    pub rejected: usize,
    /// Non-identity fields that fell back to null or 0.
    pub coerced: usize,
}

impl<T> Default for Normalized<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: 0,
            coerced: 0,
        }
    }
}

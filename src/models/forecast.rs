use serde::{Deserialize, Serialize};

/// Total spending for one calendar month. `month_index` counts the months
/// present in the data from 0; missing months are not zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month_index: usize,
    pub year: i32,
    pub month: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub model: String,
    /// Index of the predicted month, one past the last observed point.
    pub month_index: usize,
    pub amount: f64,
}

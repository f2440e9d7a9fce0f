//! Next-month spending forecasts over the monthly aggregate.
//!
//! The registry is a fixed, ordered list of strategies. Automatic selection
//! takes the first strategy whose data requirement is met, so the choice of
//! model depends only on how many months of history exist.

use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::error::ForecastError;
use crate::models::{Forecast, ForecastSettings, MonthlyPoint};
use crate::services::aggregator::load_monthly_aggregate;

pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastModel {
    /// Least-squares line through `(month_index, amount)`.
    LinearTrend,
    /// Mean of the last `window` months.
    MovingAverage { window: usize },
    /// Last month plus the median month-over-month change.
    MedianGrowth,
}

impl ForecastModel {
    pub fn moving_average(window: usize) -> Self {
        ForecastModel::MovingAverage { window: window.max(1) }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ForecastModel::LinearTrend => "linear_trend",
            ForecastModel::MovingAverage { .. } => "moving_average",
            ForecastModel::MedianGrowth => "median_growth",
        }
    }

    /// Smallest series length this model accepts.
    pub fn minimum_points(&self) -> usize {
        match self {
            ForecastModel::LinearTrend => 2,
            ForecastModel::MovingAverage { .. } => 1,
            ForecastModel::MedianGrowth => 2,
        }
    }

    /// Predict the month after the last point, `None` for an empty series.
    pub fn predict(&self, series: &[MonthlyPoint]) -> Option<f64> {
        match self {
            ForecastModel::LinearTrend => linear_trend(series),
            ForecastModel::MovingAverage { window } => moving_average(series, *window),
            ForecastModel::MedianGrowth => median_growth(series),
        }
    }
}

fn linear_trend(series: &[MonthlyPoint]) -> Option<f64> {
    let last = series.last()?;
    if series.len() == 1 {
        return Some(last.amount);
    }

    let n = series.len() as f64;
    let mean_x = series.iter().map(|p| p.month_index as f64).sum::<f64>() / n;
    let mean_y = series.iter().map(|p| p.amount).sum::<f64>() / n;

    let (sxy, sxx) = series.iter().fold((0.0, 0.0), |(sxy, sxx), p| {
        let dx = p.month_index as f64 - mean_x;
        (sxy + dx * (p.amount - mean_y), sxx + dx * dx)
    });

    // indices are distinct, so sxx > 0 once there are two points
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let next_index = (last.month_index + 1) as f64;

    Some((slope * next_index + intercept).max(0.0))
}

fn moving_average(series: &[MonthlyPoint], window: usize) -> Option<f64> {
    let take = window.max(1).min(series.len());
    if take == 0 {
        return None;
    }

    let tail = &series[series.len() - take..];
    Some(tail.iter().map(|p| p.amount).sum::<f64>() / take as f64)
}

fn median_growth(series: &[MonthlyPoint]) -> Option<f64> {
    let last = series.last()?;

    let mut deltas: Vec<f64> = series
        .windows(2)
        .map(|pair| pair[1].amount - pair[0].amount)
        .collect();
    if deltas.is_empty() {
        return Some(last.amount);
    }

    deltas.sort_by(f64::total_cmp);
    let mid = deltas.len() / 2;
    let median = if deltas.len() % 2 == 0 {
        (deltas[mid - 1] + deltas[mid]) / 2.0
    } else {
        deltas[mid]
    };

    Some((last.amount + median).max(0.0))
}

/// Registry in declaration order: linear trend, moving average, median growth.
pub fn default_registry(moving_average_window: usize) -> Vec<ForecastModel> {
    vec![
        ForecastModel::LinearTrend,
        ForecastModel::moving_average(moving_average_window),
        ForecastModel::MedianGrowth,
    ]
}

/// Selects and runs forecast models. The model list is fixed at construction.
#[derive(Debug, Clone)]
pub struct Forecaster {
    models: Vec<ForecastModel>,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(default_registry(DEFAULT_MOVING_AVERAGE_WINDOW))
    }
}

impl Forecaster {
    pub fn new(models: Vec<ForecastModel>) -> Self {
        Self { models }
    }

    pub fn from_settings(settings: &ForecastSettings) -> Self {
        Self::new(default_registry(settings.moving_average_window))
    }

    pub fn models(&self) -> &[ForecastModel] {
        &self.models
    }

    /// Resolve the model to run on `available` points.
    ///
    /// A named model is never swapped for another one; without a name the
    /// first model in declaration order that fits is chosen.
    pub fn select(&self, name: Option<&str>, available: usize) -> Result<ForecastModel, ForecastError> {
        match name {
            Some(name) => {
                let model = self
                    .models
                    .iter()
                    .find(|m| m.name() == name)
                    .copied()
                    .ok_or_else(|| ForecastError::UnknownModel(name.to_string()))?;

                if available < model.minimum_points() {
                    return Err(ForecastError::InsufficientData {
                        model: model.name(),
                        required: model.minimum_points(),
                        available,
                    });
                }

                Ok(model)
            }
            None => self
                .models
                .iter()
                .find(|m| available >= m.minimum_points())
                .copied()
                .ok_or(ForecastError::NoEligibleModel { available }),
        }
    }

    /// Forecast from an already built series.
    pub fn predict_series(
        &self,
        series: &[MonthlyPoint],
        name: Option<&str>,
    ) -> Result<Forecast, ForecastError> {
        let last = series.last().ok_or(ForecastError::NoData)?;
        let model = self.select(name, series.len())?;
        let amount = model.predict(series).ok_or(ForecastError::NoData)?;

        log::debug!(
            "[Forecast] {} predicted {:.2} from {} months",
            model.name(),
            amount,
            series.len()
        );

        Ok(Forecast {
            model: model.name().to_string(),
            month_index: last.month_index + 1,
            amount,
        })
    }

    /// Run every model whose requirement the series meets.
    pub fn predict_all_series(
        &self,
        series: &[MonthlyPoint],
    ) -> Result<BTreeMap<String, f64>, ForecastError> {
        if series.is_empty() {
            return Err(ForecastError::NoData);
        }

        let results: BTreeMap<String, f64> = self
            .models
            .iter()
            .filter(|m| series.len() >= m.minimum_points())
            .filter_map(|m| Some((m.name().to_string(), m.predict(series)?)))
            .collect();

        if results.is_empty() {
            return Err(ForecastError::NoEligibleModel {
                available: series.len(),
            });
        }

        Ok(results)
    }

    /// Forecast next month from the current contents of the store.
    pub fn predict(&self, conn: &Connection, name: Option<&str>) -> Result<Forecast, ForecastError> {
        let series = load_monthly_aggregate(conn)?;
        self.predict_series(&series, name)
    }

    pub fn predict_all(&self, conn: &Connection) -> Result<BTreeMap<String, f64>, ForecastError> {
        let series = load_monthly_aggregate(conn)?;
        self.predict_all_series(&series)
    }
}

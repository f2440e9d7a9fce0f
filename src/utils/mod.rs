pub mod config;

use chrono::{DateTime, NaiveDateTime};

/// Store representation of a naive timestamp: unix seconds, read as UTC.
pub fn to_timestamp(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp()
}

pub fn from_timestamp(ts: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.naive_utc())
}

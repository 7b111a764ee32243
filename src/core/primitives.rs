use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts an epoch-millisecond timestamp to wall-clock time in `offset`.
///
/// Returns `None` for non-finite or out-of-range timestamps.
#[must_use]
pub fn unix_millis_to_local(millis: f64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.floor() as i64).map(|time| time.with_timezone(&offset))
}

/// Epoch milliseconds of `date` at wall-clock `time` in `offset`.
#[must_use]
pub fn local_to_unix_millis(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Option<f64> {
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|local| local.timestamp_millis() as f64)
}

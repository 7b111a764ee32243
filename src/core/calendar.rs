use std::collections::BTreeSet;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::{local_to_unix_millis, unix_millis_to_local};
use crate::error::{ChartError, ChartResult};

/// Upper bound on calendar days scanned for one segment table.
const MAX_SEGMENTED_DAYS: usize = 100_000;

/// How the horizontal axis lays out wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeAxisMode {
    /// Elapsed time maps linearly to pixels, gaps included.
    Linear,
    /// Only trading sessions occupy axis space; nights, weekends and holidays
    /// are compressed out.
    #[default]
    TradingSession,
}

/// Exchange calendar used to cut a time range into trading sessions.
///
/// Session hours are wall-clock times at a fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingCalendar {
    #[serde(default = "default_session_open")]
    pub session_open: NaiveTime,
    #[serde(default = "default_session_close")]
    pub session_close: NaiveTime,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_weekend")]
    pub weekend: Vec<Weekday>,
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
}

impl Default for TradingCalendar {
    fn default() -> Self {
        Self {
            session_open: default_session_open(),
            session_close: default_session_close(),
            utc_offset_minutes: 0,
            weekend: default_weekend(),
            holidays: BTreeSet::new(),
        }
    }
}

fn default_session_open() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_session_close() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_weekend() -> Vec<Weekday> {
    vec![Weekday::Sat, Weekday::Sun]
}

impl TradingCalendar {
    /// Sets session hours (`open < close`, same calendar day).
    #[must_use]
    pub fn with_session(mut self, open: NaiveTime, close: NaiveTime) -> Self {
        self.session_open = open;
        self.session_close = close;
        self
    }

    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_weekend(mut self, weekend: Vec<Weekday>) -> Self {
        self.weekend = weekend;
        self
    }

    #[must_use]
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.session_open >= self.session_close {
            return Err(ChartError::InvalidConfig(
                "session open must be earlier than session close".to_owned(),
            ));
        }
        if FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).is_none() {
            return Err(ChartError::InvalidConfig(format!(
                "utc offset of {} minutes is out of range",
                self.utc_offset_minutes
            )));
        }
        let distinct: BTreeSet<u32> = self
            .weekend
            .iter()
            .map(Weekday::num_days_from_monday)
            .collect();
        if distinct.len() >= 7 {
            return Err(ChartError::InvalidConfig(
                "weekend must leave at least one trading weekday".to_owned(),
            ));
        }
        Ok(())
    }

    /// UTC offset of the exchange. Falls back to UTC for an invalid offset.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    #[must_use]
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !self.weekend.contains(&date.weekday()) && !self.holidays.contains(&date)
    }

    /// Session bounds of `date` in epoch milliseconds, ignoring weekends/holidays.
    #[must_use]
    pub fn session_bounds(&self, date: NaiveDate) -> Option<(f64, f64)> {
        let offset = self.offset();
        let open = local_to_unix_millis(date, self.session_open, offset)?;
        let close = local_to_unix_millis(date, self.session_close, offset)?;
        Some((open, close))
    }

    /// Moves `time` by `delta` milliseconds of trading time, skipping gaps.
    ///
    /// A time inside a gap starts from the next session edge in the direction
    /// of travel. `None` when the walk leaves the representable dates or finds
    /// no session within the scan limit.
    #[must_use]
    pub fn shift_by_trading_time(&self, time: f64, delta: f64) -> Option<f64> {
        if !time.is_finite() || !delta.is_finite() {
            return None;
        }
        if delta == 0.0 {
            return Some(time);
        }

        let forward = delta > 0.0;
        let mut remaining = delta.abs();
        let mut day = unix_millis_to_local(time, self.offset())?.date_naive();
        for _ in 0..MAX_SEGMENTED_DAYS {
            if self.is_trading_day(day)
                && let Some((open, close)) = self.session_bounds(day)
            {
                if forward {
                    let start = open.max(time);
                    let available = (close - start).max(0.0);
                    if remaining <= available {
                        return Some(start + remaining);
                    }
                    remaining -= available;
                } else {
                    let end = close.min(time);
                    let available = (end - open).max(0.0);
                    if remaining <= available {
                        return Some(end - remaining);
                    }
                    remaining -= available;
                }
            }
            day = if forward { day.succ_opt()? } else { day.pred_opt()? };
        }
        debug!(time, delta, "trading time shift found no session");
        None
    }
}

/// One contiguous trading interval in wall-clock and compressed coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradingSegment {
    pub from_time: f64,
    pub to_time: f64,
    pub from_pos: f64,
    pub to_pos: f64,
}

/// Ordered, position-contiguous segments covering one visible range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentTable {
    segments: Vec<TradingSegment>,
}

impl SegmentTable {
    /// Builds a table from time windows sorted ascending and non-overlapping.
    ///
    /// Empty or inverted windows are skipped. Positions start at 0 and each
    /// window advances them by its own duration.
    #[must_use]
    pub fn from_windows<I>(windows: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut segments: Vec<TradingSegment> = Vec::new();
        for (from_time, to_time) in windows {
            if from_time.is_nan() || to_time.is_nan() || from_time >= to_time {
                continue;
            }
            let from_pos = segments.last().map_or(0.0, |prev| prev.to_pos);
            segments.push(TradingSegment {
                from_time,
                to_time,
                from_pos,
                to_pos: from_pos + (to_time - from_time),
            });
        }
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[TradingSegment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Compressed length of the whole table; `None` when no segment exists.
    #[must_use]
    pub fn total_range(&self) -> Option<f64> {
        self.segments
            .last()
            .map(|last| last.to_pos)
            .filter(|range| *range > 0.0)
    }
}

/// Cuts `[range_min, range_max]` into the trading sessions of `calendar`.
///
/// Every calendar day touched by the range is visited in the exchange's
/// offset. Non-trading days contribute nothing; trading days contribute their
/// session window clipped to the range. Degenerate input yields an empty table.
#[must_use]
pub fn segment_trading_range(
    range_min: f64,
    range_max: f64,
    calendar: &TradingCalendar,
) -> SegmentTable {
    if !range_min.is_finite() || !range_max.is_finite() || range_min >= range_max {
        debug!(range_min, range_max, "degenerate range produces empty segment table");
        return SegmentTable::default();
    }

    let offset = calendar.offset();
    let (Some(first), Some(last)) = (
        unix_millis_to_local(range_min, offset),
        unix_millis_to_local(range_max, offset),
    ) else {
        debug!(range_min, range_max, "range outside representable dates");
        return SegmentTable::default();
    };
    let (first_day, last_day) = (first.date_naive(), last.date_naive());

    let day_count = (last_day - first_day).num_days().max(0) as usize + 1;
    if day_count > MAX_SEGMENTED_DAYS {
        debug!(day_count, "range spans too many days to segment");
        return SegmentTable::default();
    }

    let windows = first_day
        .iter_days()
        .take(day_count)
        .filter(|day| calendar.is_trading_day(*day))
        .filter_map(|day| calendar.session_bounds(day))
        .map(|(open, close)| (open.max(range_min), close.min(range_max)));
    let table = SegmentTable::from_windows(windows);

    trace!(
        range_min,
        range_max,
        segments = table.len(),
        total_range = ?table.total_range(),
        "segmented trading range"
    );
    table
}

/// Single-segment table mapping `[range_min, range_max]` linearly.
#[must_use]
pub fn segment_linear_range(range_min: f64, range_max: f64) -> SegmentTable {
    if !range_min.is_finite() || !range_max.is_finite() {
        return SegmentTable::default();
    }
    SegmentTable::from_windows([(range_min, range_max)])
}

#[cfg(test)]
mod tests {
    use super::{SegmentTable, TradingCalendar, segment_linear_range};
    use chrono::{NaiveTime, Weekday};

    const HOUR: f64 = 3_600_000.0;
    // 2024-05-03T00:00:00Z, a Friday.
    const FRIDAY: f64 = 1_714_694_400_000.0;
    const MONDAY: f64 = FRIDAY + 72.0 * HOUR;

    #[test]
    fn windows_get_cumulative_positions() {
        let table = SegmentTable::from_windows([(10.0, 20.0), (50.0, 55.0), (60.0, 60.0)]);
        assert_eq!(table.len(), 2);
        let segments = table.segments();
        assert_eq!(segments[0].from_pos, 0.0);
        assert_eq!(segments[0].to_pos, 10.0);
        assert_eq!(segments[1].from_pos, 10.0);
        assert_eq!(segments[1].to_pos, 15.0);
        assert_eq!(table.total_range(), Some(15.0));
    }

    #[test]
    fn empty_table_has_no_total_range() {
        assert_eq!(SegmentTable::default().total_range(), None);
        assert!(segment_linear_range(5.0, 5.0).is_empty());
    }

    #[test]
    fn calendar_rejects_inverted_session() {
        let calendar = TradingCalendar::default().with_session(
            NaiveTime::from_hms_opt(17, 0, 0).expect("time"),
            NaiveTime::from_hms_opt(9, 0, 0).expect("time"),
        );
        let err = calendar.validate().expect_err("inverted session");
        assert!(format!("{err}").contains("session open"));
    }

    #[test]
    fn calendar_rejects_all_week_weekend() {
        let calendar = TradingCalendar::default().with_weekend(vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]);
        assert!(calendar.validate().is_err());
    }

    #[test]
    fn trading_time_shift_skips_the_weekend() {
        let calendar = TradingCalendar::default();
        assert_eq!(
            calendar.shift_by_trading_time(FRIDAY + 15.0 * HOUR, 3.0 * HOUR),
            Some(MONDAY + 10.0 * HOUR)
        );
        assert_eq!(
            calendar.shift_by_trading_time(MONDAY + 10.0 * HOUR, -3.0 * HOUR),
            Some(FRIDAY + 15.0 * HOUR)
        );
    }

    #[test]
    fn trading_time_shift_from_a_gap_starts_at_the_next_edge() {
        let calendar = TradingCalendar::default();
        let saturday_noon = FRIDAY + 36.0 * HOUR;
        assert_eq!(
            calendar.shift_by_trading_time(saturday_noon, HOUR),
            Some(MONDAY + 10.0 * HOUR)
        );
        assert_eq!(
            calendar.shift_by_trading_time(saturday_noon, -HOUR),
            Some(FRIDAY + 16.0 * HOUR)
        );
        assert_eq!(calendar.shift_by_trading_time(saturday_noon, 0.0), Some(saturday_noon));
        assert_eq!(calendar.shift_by_trading_time(f64::NAN, HOUR), None);
    }
}

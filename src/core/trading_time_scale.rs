use tracing::trace;

use crate::core::calendar::{
    SegmentTable, TimeAxisMode, TradingCalendar, segment_linear_range, segment_trading_range,
};
use crate::core::scale::DecimalPixelMapping;
use crate::core::viewport::Viewport;

/// Piecewise time axis over a segment table.
///
/// Wall-clock time maps to a compressed position (elapsed trading
/// milliseconds), the position to a `[0, 1]` decimal over the table's total
/// range, and the decimal to pixels through the host's linear mapping.
///
/// The forward and inverse mappings agree only inside trading windows. A time
/// inside a gap clamps to the position closing the preceding segment. That
/// position also opens the next segment, which owns it on the way back, so a
/// round trip lands on the next session's open.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingTimeScale {
    mode: TimeAxisMode,
    calendar: TradingCalendar,
    viewport: Option<Viewport>,
    table: SegmentTable,
}

impl TradingTimeScale {
    /// Creates an axis with no table; every query short-circuits to 0 until
    /// the first `rebuild`.
    #[must_use]
    pub fn new(mode: TimeAxisMode, calendar: TradingCalendar) -> Self {
        Self {
            mode,
            calendar,
            viewport: None,
            table: SegmentTable::default(),
        }
    }

    #[must_use]
    pub fn for_viewport(mode: TimeAxisMode, calendar: TradingCalendar, viewport: Viewport) -> Self {
        let mut scale = Self::new(mode, calendar);
        scale.rebuild(viewport);
        scale
    }

    #[must_use]
    pub fn mode(&self) -> TimeAxisMode {
        self.mode
    }

    #[must_use]
    pub fn calendar(&self) -> &TradingCalendar {
        &self.calendar
    }

    /// Viewport the current table was built for.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    #[must_use]
    pub fn table(&self) -> &SegmentTable {
        &self.table
    }

    #[must_use]
    pub fn total_range(&self) -> Option<f64> {
        self.table.total_range()
    }

    /// `false` when the table is empty and pixel mapping is meaningless.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.total_range().is_some()
    }

    /// Re-segments the axis for `viewport`. Returns `false` when the bounds are
    /// unchanged and the existing table was kept.
    pub fn rebuild(&mut self, viewport: Viewport) -> bool {
        if self.viewport == Some(viewport) {
            return false;
        }
        self.table = match self.mode {
            TimeAxisMode::Linear => segment_linear_range(viewport.min, viewport.max),
            TimeAxisMode::TradingSession => {
                segment_trading_range(viewport.min, viewport.max, &self.calendar)
            }
        };
        self.viewport = Some(viewport);
        trace!(
            min = viewport.min,
            max = viewport.max,
            segments = self.table.len(),
            "rebuilt trading time scale"
        );
        true
    }

    /// Compressed position of `time`.
    ///
    /// Inside a segment the mapping is linear; past a segment's end (a gap)
    /// the position stays at that segment's end; before every segment it is 0.
    #[must_use]
    pub fn time_to_position(&self, time: f64) -> f64 {
        let segments = self.table.segments();
        let after = segments.partition_point(|segment| segment.from_time <= time);
        let Some(segment) = after.checked_sub(1).map(|idx| segments[idx]) else {
            return 0.0;
        };
        if time < segment.to_time {
            segment.from_pos + (time - segment.from_time)
        } else {
            segment.to_pos
        }
    }

    /// Wall-clock time of a compressed position; symmetric to
    /// [`Self::time_to_position`].
    #[must_use]
    pub fn position_to_time(&self, position: f64) -> f64 {
        let segments = self.table.segments();
        let after = segments.partition_point(|segment| segment.from_pos <= position);
        let Some(segment) = after.checked_sub(1).map(|idx| segments[idx]) else {
            return 0.0;
        };
        if position < segment.to_pos {
            segment.from_time + (position - segment.from_pos)
        } else {
            segment.to_time
        }
    }

    /// Normalized `[0, 1]` axis coordinate of `time`; 0 when unavailable.
    #[must_use]
    pub fn time_to_decimal(&self, time: f64) -> f64 {
        match self.total_range() {
            Some(total) => self.time_to_position(time) / total,
            None => 0.0,
        }
    }

    /// Wall-clock time at a normalized axis coordinate; 0 when unavailable.
    #[must_use]
    pub fn decimal_to_time(&self, decimal: f64) -> f64 {
        match self.total_range() {
            Some(total) if decimal.is_finite() => self.position_to_time(decimal * total),
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn time_to_pixel(&self, time: f64, mapping: &impl DecimalPixelMapping) -> f64 {
        mapping.pixel_for_decimal(self.time_to_decimal(time))
    }

    #[must_use]
    pub fn pixel_to_time(&self, pixel: f64, mapping: &impl DecimalPixelMapping) -> f64 {
        self.decimal_to_time(mapping.decimal_for_pixel(pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::TradingTimeScale;
    use crate::core::calendar::{TimeAxisMode, TradingCalendar};
    use crate::core::viewport::Viewport;

    const HOUR: f64 = 3_600_000.0;

    #[test]
    fn empty_axis_short_circuits_to_zero() {
        let scale = TradingTimeScale::new(TimeAxisMode::TradingSession, TradingCalendar::default());
        assert!(!scale.is_available());
        assert_eq!(scale.time_to_position(1_000.0), 0.0);
        assert_eq!(scale.position_to_time(1_000.0), 0.0);
        assert_eq!(scale.time_to_decimal(1_000.0), 0.0);
        assert_eq!(scale.decimal_to_time(0.5), 0.0);
    }

    #[test]
    fn linear_mode_maps_the_whole_window() {
        let scale = TradingTimeScale::for_viewport(
            TimeAxisMode::Linear,
            TradingCalendar::default(),
            Viewport::new(0.0, 10.0 * HOUR),
        );
        assert_eq!(scale.table().len(), 1);
        assert_eq!(scale.time_to_decimal(5.0 * HOUR), 0.5);
        assert_eq!(scale.decimal_to_time(0.25), 2.5 * HOUR);
    }

    #[test]
    fn rebuild_keeps_table_for_same_bounds() {
        let viewport = Viewport::new(0.0, 10.0 * HOUR);
        let mut scale =
            TradingTimeScale::for_viewport(TimeAxisMode::Linear, TradingCalendar::default(), viewport);
        assert!(!scale.rebuild(viewport));
        assert!(scale.rebuild(Viewport::new(0.0, 20.0 * HOUR)));
        assert_eq!(scale.total_range(), Some(20.0 * HOUR));
    }
}

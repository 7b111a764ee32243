pub mod calendar;
pub mod candlestick;
pub mod line_series;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod trading_time_scale;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use calendar::{
    SegmentTable, TimeAxisMode, TradingCalendar, TradingSegment, segment_linear_range,
    segment_trading_range,
};
pub use candlestick::{CandleGeometry, OhlcBar, project_candles};
pub use line_series::{LineSegment, project_line_segments};
pub use price_scale::{PriceScale, PriceScaleTuning};
pub use scale::{DecimalPixelMapping, LinearScale};
pub use trading_time_scale::TradingTimeScale;
pub use types::{DataPoint, PlotArea};
pub use viewport::{Viewport, ViewportController, ViewportLimits};
pub use windowing::{candles_in_viewport, points_in_viewport};

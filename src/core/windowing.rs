use crate::core::{DataPoint, OhlcBar, Viewport};

/// Returns points whose time falls inside the viewport (inclusive).
#[must_use]
pub fn points_in_viewport(points: &[DataPoint], viewport: Viewport) -> Vec<DataPoint> {
    points
        .iter()
        .copied()
        .filter(|point| viewport.contains(point.x))
        .collect()
}

/// Returns candles whose time falls inside the viewport (inclusive).
#[must_use]
pub fn candles_in_viewport(candles: &[OhlcBar], viewport: Viewport) -> Vec<OhlcBar> {
    candles
        .iter()
        .copied()
        .filter(|candle| viewport.contains(candle.time))
        .collect()
}

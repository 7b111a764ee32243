use crate::core::scale::DecimalPixelMapping;
use crate::core::{DataPoint, PriceScale, TradingTimeScale};
use serde::{Deserialize, Serialize};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects line-series points into adjacent line segments.
///
/// The function is deterministic and side-effect free so both rendering and
/// tests can consume the exact same geometry output.
#[must_use]
pub fn project_line_segments(
    points: &[DataPoint],
    time_scale: &TradingTimeScale,
    price_scale: PriceScale,
    x_mapping: &impl DecimalPixelMapping,
    y_mapping: &impl DecimalPixelMapping,
) -> Vec<LineSegment> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mapped: Vec<(f64, f64)> = points
        .iter()
        .map(|point| {
            (
                time_scale.time_to_pixel(point.x, x_mapping),
                price_scale.price_to_pixel(point.y, y_mapping),
            )
        })
        .collect();

    mapped
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::core::{CandleGeometry, LineSegment, PlotArea};
use crate::error::{ChartError, ChartResult};

/// Vertical crosshair line placed at the hovered value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverLineGeometry {
    pub value: f64,
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
    pub label: String,
}

/// Backend-agnostic pixel geometry for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub plot_area: PlotArea,
    pub price_domain: Option<(f64, f64)>,
    pub candles: Vec<CandleGeometry>,
    pub line: Vec<LineSegment>,
    pub hover_line: Option<HoverLineGeometry>,
}

impl ChartScene {
    #[must_use]
    pub fn new(plot_area: PlotArea) -> Self {
        Self {
            plot_area,
            price_domain: None,
            candles: Vec::new(),
            line: Vec::new(),
            hover_line: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.plot_area.is_valid() {
            return Err(ChartError::InvalidPlotArea {
                width: self.plot_area.width,
                height: self.plot_area.height,
            });
        }

        for candle in &self.candles {
            let coords = [
                candle.center_x,
                candle.body_left,
                candle.body_right,
                candle.body_top,
                candle.body_bottom,
                candle.wick_top,
                candle.wick_bottom,
            ];
            if coords.iter().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(
                    "candle geometry must be finite".to_owned(),
                ));
            }
        }
        for segment in &self.line {
            if [segment.x1, segment.y1, segment.x2, segment.y2]
                .iter()
                .any(|value| !value.is_finite())
            {
                return Err(ChartError::InvalidData(
                    "line geometry must be finite".to_owned(),
                ));
            }
        }
        if let Some(hover) = &self.hover_line
            && !hover.x.is_finite()
        {
            return Err(ChartError::InvalidData(
                "hover line position must be finite".to_owned(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty() && self.line.is_empty() && self.hover_line.is_none()
    }
}

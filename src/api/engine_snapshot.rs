use serde::{Deserialize, Serialize};

use crate::core::{TradingSegment, Viewport};
use crate::interaction::{InteractionMode, LineAnnotation};
use crate::render::RenderAdapter;

use super::ChartEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub viewport_revision: u64,
    pub total_range: Option<f64>,
    pub segments: Vec<TradingSegment>,
    pub annotations: Vec<LineAnnotation>,
    pub interaction_mode: InteractionMode,
    pub points_len: usize,
    pub candles_len: usize,
    pub hover_formatter_generation: u64,
}

impl<A: RenderAdapter> ChartEngine<A> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            viewport: self.viewport.viewport(),
            viewport_revision: self.viewport.revision(),
            total_range: self.time_scale.total_range(),
            segments: self.time_scale.table().segments().to_vec(),
            annotations: self.crosshair.annotations().to_sequence(),
            interaction_mode: self.interaction_mode,
            points_len: self.points.len(),
            candles_len: self.candles.len(),
            hover_formatter_generation: self.hover_formatter_generation,
        }
    }
}

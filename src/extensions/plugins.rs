use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, Viewport};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub plot_area: PlotArea,
    pub viewport: Viewport,
    pub total_range: Option<f64>,
    pub points_len: usize,
    pub candles_len: usize,
    pub interaction_mode: InteractionMode,
    pub hovered_value: Option<f64>,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DataUpdated { points_len: usize },
    CandlesUpdated { candles_len: usize },
    /// The crosshair was created or moved to a new data point.
    CrosshairMoved { value: f64 },
    PointerLeft,
    /// A click resolved to the data point at `time`.
    Clicked { time: f64 },
    ViewportChanged { min: f64, max: f64 },
    PanStarted,
    PanEnded,
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read engine context without mutating core
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}

mod headless;
mod scene;

pub use headless::HeadlessAdapter;
pub use scene::{ChartScene, HoverLineGeometry};

use crate::core::{DecimalPixelMapping, PlotArea};
use crate::error::ChartResult;

/// Contract implemented by the host rendering surface.
///
/// The engine never paints. It asks the adapter for its horizontal
/// decimal/pixel mapping and plot rectangle, requests redraws when chart state
/// changed, and hands over precomputed geometry on `present`.
pub trait RenderAdapter: DecimalPixelMapping {
    fn plot_area(&self) -> PlotArea;

    /// Idempotent; hosts may coalesce repeated requests into one repaint.
    fn request_redraw(&mut self);

    fn present(&mut self, scene: &ChartScene) -> ChartResult<()>;
}

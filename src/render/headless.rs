use crate::core::{DecimalPixelMapping, PlotArea};
use crate::error::ChartResult;
use crate::render::{ChartScene, RenderAdapter};

/// In-memory adapter used by tests and headless hosts.
///
/// Maps decimals linearly across the plot area's width, counts redraw
/// requests and validates every presented scene.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessAdapter {
    plot_area: PlotArea,
    pub redraw_requests: usize,
    pub presented_scenes: usize,
    pub last_scene: Option<ChartScene>,
}

impl HeadlessAdapter {
    #[must_use]
    pub fn new(plot_area: PlotArea) -> Self {
        Self {
            plot_area,
            redraw_requests: 0,
            presented_scenes: 0,
            last_scene: None,
        }
    }

    /// Simulates a host resize.
    pub fn set_plot_area(&mut self, plot_area: PlotArea) {
        self.plot_area = plot_area;
    }
}

impl Default for HeadlessAdapter {
    fn default() -> Self {
        Self::new(PlotArea::from_size(1000.0, 500.0))
    }
}

impl DecimalPixelMapping for HeadlessAdapter {
    fn pixel_for_decimal(&self, decimal: f64) -> f64 {
        self.plot_area.left + decimal * self.plot_area.width
    }

    fn decimal_for_pixel(&self, pixel: f64) -> f64 {
        (pixel - self.plot_area.left) / self.plot_area.width
    }
}

impl RenderAdapter for HeadlessAdapter {
    fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }

    fn present(&mut self, scene: &ChartScene) -> ChartResult<()> {
        scene.validate()?;
        self.presented_scenes += 1;
        self.last_scene = Some(scene.clone());
        Ok(())
    }
}

use tracing::trace;

use crate::core::{
    DataPoint, LinearScale, OhlcBar, PriceScale, candles_in_viewport, points_in_viewport,
    project_candles, project_line_segments,
};
use crate::error::ChartResult;
use crate::extensions::PluginEvent;
use crate::render::{ChartScene, HoverLineGeometry, RenderAdapter};

use super::ChartEngine;

impl<A: RenderAdapter> ChartEngine<A> {
    /// Projects visible series and the crosshair line into pixel geometry.
    pub fn build_scene(&self) -> ChartResult<ChartScene> {
        let plot_area = self.adapter.plot_area();
        let mut scene = ChartScene::new(plot_area);

        let viewport = self.viewport.viewport();
        let visible_candles = candles_in_viewport(&self.candles, viewport);
        let visible_points = points_in_viewport(&self.points, viewport);

        if let Some(price_scale) = self.resolve_price_scale(&visible_candles, &visible_points)? {
            let y_mapping = LinearScale::vertical(plot_area)?;
            scene.price_domain = Some(price_scale.domain());
            scene.candles = project_candles(
                &visible_candles,
                &self.time_scale,
                price_scale,
                &self.adapter,
                &y_mapping,
                self.config.candle_body_width_px,
            )?;
            scene.line = project_line_segments(
                &visible_points,
                &self.time_scale,
                price_scale,
                &self.adapter,
                &y_mapping,
            );
        }

        scene.hover_line = self.crosshair.hover_annotation().map(|annotation| {
            HoverLineGeometry {
                value: annotation.value,
                x: self.time_scale.time_to_pixel(annotation.value, &self.adapter),
                top: plot_area.top,
                bottom: plot_area.bottom(),
                label: annotation.label_content.clone(),
            }
        });

        trace!(
            candles = scene.candles.len(),
            line_segments = scene.line.len(),
            hover = scene.hover_line.is_some(),
            "built chart scene"
        );
        Ok(scene)
    }

    /// Builds the scene and hands it to the adapter.
    pub fn render(&mut self) -> ChartResult<()> {
        let scene = self.build_scene()?;
        self.adapter.present(&scene)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    /// Candles take precedence over line points. Falls back to the full
    /// series when nothing is visible; `None` without any data.
    fn resolve_price_scale(
        &self,
        visible_candles: &[OhlcBar],
        visible_points: &[DataPoint],
    ) -> ChartResult<Option<PriceScale>> {
        let tuning = self.config.price_scale_tuning;
        let scale = if !visible_candles.is_empty() {
            PriceScale::from_bars(visible_candles, tuning)?
        } else if !visible_points.is_empty() {
            PriceScale::from_points(visible_points, tuning)?
        } else if !self.candles.is_empty() {
            PriceScale::from_bars(&self.candles, tuning)?
        } else if !self.points.is_empty() {
            PriceScale::from_points(&self.points, tuning)?
        } else {
            return Ok(None);
        };
        Ok(Some(scale))
    }
}

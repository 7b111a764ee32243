use crate::extensions::{PluginContext, PluginEvent};
use crate::render::RenderAdapter;

use super::ChartEngine;

impl<A: RenderAdapter> ChartEngine<A> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            plot_area: self.adapter.plot_area(),
            viewport: self.viewport.viewport(),
            total_range: self.time_scale.total_range(),
            points_len: self.points.len(),
            candles_len: self.candles.len(),
            interaction_mode: self.interaction_mode,
            hovered_value: self.crosshair.hovered_value(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }

    /// Rebuilds the axis for the current window and notifies observers.
    pub(super) fn emit_viewport_changed(&mut self) {
        let viewport = self.viewport.viewport();
        self.time_scale.rebuild(viewport);
        self.adapter.request_redraw();
        self.emit_plugin_event(PluginEvent::ViewportChanged {
            min: viewport.min,
            max: viewport.max,
        });
    }
}

use std::sync::Arc;

use tracing::{debug, trace};

use crate::extensions::PluginEvent;
use crate::interaction::{ChartGranularity, HoverOutcome};
use crate::render::RenderAdapter;

use super::{ChartEngine, format_click_date};

impl<A: RenderAdapter> ChartEngine<A> {
    /// Handles a pointer move at horizontal pixel `x`.
    ///
    /// Requests a redraw only when the crosshair was created or moved.
    pub fn pointer_hover(&mut self, x: f64) -> HoverOutcome {
        let resolved = self.nearest_time_at_x(x);
        let formatter = Arc::clone(&self.hover_label_formatter);
        let outcome = self.crosshair.on_hover(resolved, |value| formatter(value));
        if outcome.requires_redraw()
            && let Some(value) = self.crosshair.hovered_value()
        {
            self.adapter.request_redraw();
            self.emit_plugin_event(PluginEvent::CrosshairMoved { value });
        }
        outcome
    }

    /// Handles a click at `(x, y)`. Returns the resolved data time, if any.
    ///
    /// Daily charts report the clicked date to the host callback as
    /// `YYYY-MM-DD`; intraday charts report nothing. Crosshair state is never
    /// touched.
    pub fn pointer_click(&mut self, x: f64, y: f64) -> Option<f64> {
        let in_plot_area = self.adapter.plot_area().contains(x, y);
        let resolved = if in_plot_area {
            self.nearest_time_at_x(x)
        } else {
            None
        };
        let Some(time) = self.crosshair.on_click(resolved, in_plot_area) else {
            trace!(x, y, in_plot_area, "click resolved no data point");
            return None;
        };

        if self.config.granularity == ChartGranularity::Daily {
            match format_click_date(time, self.config.calendar.offset()) {
                Some(date) => {
                    if let Some(callback) = &self.date_change_callback {
                        callback(date.as_str());
                    }
                }
                None => debug!(time, "clicked time has no calendar date"),
            }
        }
        self.emit_plugin_event(PluginEvent::Clicked { time });
        Some(time)
    }

    /// Pointer left the chart. The last crosshair line stays in place.
    pub fn pointer_leave(&mut self) {
        self.emit_plugin_event(PluginEvent::PointerLeft);
    }

    /// Replaces the crosshair label formatter and relabels the current line.
    pub fn set_hover_label_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.hover_label_formatter = Arc::new(formatter);
        self.hover_formatter_generation = self.hover_formatter_generation.wrapping_add(1);
        let formatter = Arc::clone(&self.hover_label_formatter);
        if self.crosshair.relabel(|value| formatter(value)) {
            self.adapter.request_redraw();
        }
    }

    pub fn set_date_change_callback<F>(&mut self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.date_change_callback = Some(Arc::new(callback));
    }

    pub fn clear_date_change_callback(&mut self) {
        self.date_change_callback = None;
    }

    /// Current crosshair label text, if a line exists.
    #[must_use]
    pub fn hover_label(&self) -> Option<&str> {
        self.crosshair
            .hover_annotation()
            .map(|annotation| annotation.label_content.as_str())
    }
}

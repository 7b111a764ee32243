use tracing::{debug, warn};

use crate::core::viewport::resolve_pixel_pan_delta;
use crate::core::{TimeAxisMode, Viewport, ViewportLimits};
use crate::error::ChartResult;
use crate::extensions::PluginEvent;
use crate::interaction::InteractionMode;
use crate::render::RenderAdapter;

use super::ChartEngine;
use super::zoom_factor_resolver::{resolve_pinch_zoom_factor, resolve_wheel_zoom_factor};

impl<A: RenderAdapter> ChartEngine<A> {
    /// Pans by a horizontal drag of `delta_px` pixels.
    ///
    /// The time under the pointer follows the drag: on the trading axis the
    /// drag is measured in trading time, so gaps inside the window do not
    /// skew it.
    pub fn pan(&mut self, delta_px: f64) -> bool {
        if !self.config.navigation.pan_enabled {
            return false;
        }
        let width = self.adapter.plot_area().width;
        let changed = match (self.config.time_axis_mode, self.time_scale.total_range()) {
            (TimeAxisMode::TradingSession, Some(total_range)) => {
                self.pan_trading_time(delta_px, width, total_range)
            }
            _ => self.viewport.pan_by_pixels(delta_px, width),
        };
        if changed {
            self.emit_viewport_changed();
        }
        changed
    }

    /// Zooms by `factor` around the time under `anchor_px`; `factor > 1.0`
    /// zooms in.
    pub fn zoom(&mut self, factor: f64, anchor_px: f64) -> bool {
        let anchor_time = self.resolve_anchor_time(anchor_px);
        let changed = self.viewport.zoom_by_factor(factor, anchor_time);
        if changed {
            self.emit_viewport_changed();
        }
        changed
    }

    pub fn wheel_zoom(&mut self, wheel_delta_y: f64, anchor_px: f64) -> bool {
        if !self.config.navigation.wheel_zoom_enabled {
            return false;
        }
        let step = self.config.navigation.wheel_zoom_step_ratio;
        match resolve_wheel_zoom_factor(wheel_delta_y, step) {
            Ok(Some(factor)) => self.zoom(factor, anchor_px),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "ignoring wheel zoom");
                false
            }
        }
    }

    pub fn pinch_zoom(&mut self, scale_factor: f64, anchor_px: f64) -> bool {
        if !self.config.navigation.pinch_zoom_enabled {
            return false;
        }
        match resolve_pinch_zoom_factor(scale_factor) {
            Ok(Some(factor)) => self.zoom(factor, anchor_px),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "ignoring pinch zoom");
                false
            }
        }
    }

    /// Accepts the window reported by the host after its own pan/zoom gesture.
    pub fn commit_viewport(&mut self, min: f64, max: f64) -> bool {
        let changed = self.viewport.commit(Viewport::new(min, max));
        if changed {
            self.emit_viewport_changed();
        }
        changed
    }

    /// Programmatic window change; validated like a host commit.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        self.commit_viewport(viewport.min, viewport.max)
    }

    pub fn set_viewport_limits(&mut self, limits: ViewportLimits) -> ChartResult<()> {
        if self.viewport.set_limits(limits)? {
            self.emit_viewport_changed();
        }
        self.config.viewport_limits = self.viewport.limits();
        Ok(())
    }

    pub fn pan_start(&mut self) {
        if self.interaction_mode == InteractionMode::Panning {
            return;
        }
        self.interaction_mode = InteractionMode::Panning;
        self.emit_plugin_event(PluginEvent::PanStarted);
    }

    pub fn pan_end(&mut self) {
        if self.interaction_mode == InteractionMode::Idle {
            return;
        }
        self.interaction_mode = InteractionMode::Idle;
        self.emit_plugin_event(PluginEvent::PanEnded);
    }

    fn pan_trading_time(&mut self, delta_px: f64, width: f64, total_range: f64) -> bool {
        let Some(delta) = resolve_pixel_pan_delta(delta_px, width, total_range) else {
            debug!(delta_px, width, "ignoring unresolvable pixel pan");
            return false;
        };
        if delta == 0.0 {
            return false;
        }
        let current = self.viewport.viewport();
        let calendar = &self.config.calendar;
        match (
            calendar.shift_by_trading_time(current.min, delta),
            calendar.shift_by_trading_time(current.max, delta),
        ) {
            (Some(min), Some(max)) => self.viewport.pan_to(Viewport::new(min, max)),
            _ => {
                debug!(delta, "trading pan left the calendar");
                false
            }
        }
    }

    /// Anchor pixel to time through the axis; the window centre when the axis
    /// has no range.
    fn resolve_anchor_time(&self, anchor_px: f64) -> f64 {
        let viewport = self.viewport.viewport();
        let center = viewport.min + viewport.span() / 2.0;
        if !anchor_px.is_finite() || !self.time_scale.is_available() {
            debug!(anchor_px, "zoom anchor falls back to viewport center");
            return center;
        }
        self.time_scale.pixel_to_time(anchor_px, &self.adapter)
    }
}

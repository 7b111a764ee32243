use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

/// Visible time window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min: f64,
    pub max: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    #[must_use]
    pub fn contains(self, time: f64) -> bool {
        time >= self.min && time <= self.max
    }
}

/// Constraints applied to every viewport change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportLimits {
    /// Smallest allowed `max - min`, in milliseconds.
    #[serde(default)]
    pub min_range: Option<f64>,
    /// Outer window the viewport may never leave.
    #[serde(default)]
    pub bounds: Option<Viewport>,
}

impl ViewportLimits {
    #[must_use]
    pub fn with_min_range(mut self, min_range: f64) -> Self {
        self.min_range = Some(min_range);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some(Viewport::new(min, max));
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if let Some(min_range) = self.min_range
            && (!min_range.is_finite() || min_range <= 0.0)
        {
            return Err(ChartError::InvalidConfig(
                "viewport min range must be finite and > 0".to_owned(),
            ));
        }
        if let Some(bounds) = self.bounds {
            if !bounds.is_valid() {
                return Err(ChartError::InvalidConfig(
                    "viewport bounds must be finite with min < max".to_owned(),
                ));
            }
            if let Some(min_range) = self.min_range
                && min_range > bounds.span()
            {
                return Err(ChartError::InvalidConfig(
                    "viewport min range must fit inside viewport bounds".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    fn floor(self) -> f64 {
        self.min_range.unwrap_or(0.0)
    }

    /// Fits a candidate window into the limits, keeping its span where possible.
    fn constrain(self, candidate: Viewport) -> Viewport {
        let mut min = candidate.min;
        let mut max = candidate.max;

        let floor = self.floor();
        if max - min < floor {
            let center = min + (max - min) / 2.0;
            min = center - floor / 2.0;
            max = center + floor / 2.0;
        }

        if let Some(bounds) = self.bounds {
            let span = (max - min).min(bounds.span());
            if min < bounds.min {
                min = bounds.min;
                max = min + span;
            } else if max > bounds.max {
                max = bounds.max;
                min = max - span;
            } else {
                max = min + span;
            }
        }

        Viewport::new(min, max)
    }
}

/// Owner of the visible time window of one chart.
///
/// Every accepted change becomes the baseline for the next operation and for
/// the next render; nothing resets it implicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    viewport: Viewport,
    limits: ViewportLimits,
    revision: u64,
}

impl ViewportController {
    /// Seeds the controller. A seed violating the limits is fitted into them.
    pub fn new(seed: Viewport, limits: ViewportLimits) -> ChartResult<Self> {
        if !seed.is_valid() {
            return Err(ChartError::InvalidData(
                "viewport seed must be finite with min < max".to_owned(),
            ));
        }
        let limits = limits.validate()?;
        Ok(Self {
            viewport: limits.constrain(seed),
            limits,
            revision: 0,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn limits(&self) -> ViewportLimits {
        self.limits
    }

    /// Incremented on every accepted change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the limits and refits the current window.
    pub fn set_limits(&mut self, limits: ViewportLimits) -> ChartResult<bool> {
        let limits = limits.validate()?;
        self.limits = limits;
        Ok(self.apply(self.viewport))
    }

    /// Shifts the window by a pixel drag over a plot `plot_width_px` wide.
    ///
    /// Dragging right (`delta_px > 0`) reveals earlier time.
    pub fn pan_by_pixels(&mut self, delta_px: f64, plot_width_px: f64) -> bool {
        match resolve_pixel_pan_delta(delta_px, plot_width_px, self.viewport.span()) {
            Some(delta_time) => self.pan_by_time(delta_time),
            None => {
                debug!(delta_px, plot_width_px, "ignoring unresolvable pixel pan");
                false
            }
        }
    }

    /// Shifts the window by `delta_time` milliseconds.
    pub fn pan_by_time(&mut self, delta_time: f64) -> bool {
        if !delta_time.is_finite() {
            debug!(delta_time, "ignoring non-finite pan delta");
            return false;
        }
        if delta_time == 0.0 {
            return false;
        }
        let candidate = Viewport::new(self.viewport.min + delta_time, self.viewport.max + delta_time);
        self.apply(candidate)
    }

    /// Moves to a window produced by a pan that was resolved outside the
    /// controller, such as one measured in trading time.
    pub fn pan_to(&mut self, candidate: Viewport) -> bool {
        if !candidate.is_valid() {
            debug!(?candidate, "ignoring invalid pan target");
            return false;
        }
        self.apply(candidate)
    }

    /// Zooms around `anchor_time`; `factor > 1.0` zooms in.
    ///
    /// The anchor keeps its relative position inside the window. The span
    /// never drops below the configured minimum range.
    pub fn zoom_by_factor(&mut self, factor: f64, anchor_time: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !anchor_time.is_finite() {
            debug!(factor, anchor_time, "ignoring invalid zoom request");
            return false;
        }

        let current = self.viewport;
        let current_span = current.span();
        let requested_span = current_span / factor;
        let floor = self.limits.floor();
        let target_span = requested_span.max(floor);
        if target_span > requested_span {
            warn!(
                requested_span,
                min_range = floor,
                "zoom clamped at minimum visible range"
            );
        }

        let anchor = anchor_time.clamp(current.min, current.max);
        let left_ratio = (anchor - current.min) / current_span;
        let min = anchor - left_ratio * target_span;
        self.apply(Viewport::new(min, min + target_span))
    }

    /// Accepts a window reported by the host after its own pan/zoom gesture.
    pub fn commit(&mut self, reported: Viewport) -> bool {
        if !reported.is_valid() {
            debug!(?reported, "ignoring invalid committed viewport");
            return false;
        }
        self.apply(reported)
    }

    fn apply(&mut self, candidate: Viewport) -> bool {
        let next = self.limits.constrain(candidate);
        if !next.is_valid() || next == self.viewport {
            return false;
        }
        self.viewport = next;
        self.revision = self.revision.wrapping_add(1);
        true
    }
}

/// Axis delta of a pixel drag over a plot `plot_width_px` wide whose axis
/// spans `axis_span`. Wall-clock span for linear axes, trading range otherwise.
pub(crate) fn resolve_pixel_pan_delta(
    delta_px: f64,
    plot_width_px: f64,
    axis_span: f64,
) -> Option<f64> {
    if !plot_width_px.is_finite() || plot_width_px <= 0.0 {
        return None;
    }
    let delta = -(delta_px / plot_width_px) * axis_span;
    delta.is_finite().then_some(delta)
}

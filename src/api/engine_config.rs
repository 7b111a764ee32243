use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{PriceScaleTuning, TimeAxisMode, TradingCalendar, Viewport, ViewportLimits};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ChartGranularity;

/// Which pointer gestures may change the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationBehavior {
    pub pan_enabled: bool,
    pub wheel_zoom_enabled: bool,
    pub pinch_zoom_enabled: bool,
    /// Zoom step per wheel notch (120 units); `0.1` zooms by 10% per notch.
    pub wheel_zoom_step_ratio: f64,
}

impl Default for NavigationBehavior {
    fn default() -> Self {
        Self {
            pan_enabled: true,
            wheel_zoom_enabled: true,
            pinch_zoom_enabled: true,
            wheel_zoom_step_ratio: 0.1,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartEngineConfig {
    /// Explicit initial window. Takes precedence over `seed_date`.
    #[serde(default)]
    pub initial_viewport: Option<Viewport>,
    /// Seeds the window with this date's trading session.
    #[serde(default)]
    pub seed_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_axis_mode: TimeAxisMode,
    #[serde(default)]
    pub calendar: TradingCalendar,
    #[serde(default)]
    pub viewport_limits: ViewportLimits,
    #[serde(default)]
    pub granularity: ChartGranularity,
    #[serde(default)]
    pub navigation: NavigationBehavior,
    #[serde(default)]
    pub price_scale_tuning: PriceScaleTuning,
    #[serde(default = "default_candle_body_width_px")]
    pub candle_body_width_px: f64,
}

impl ChartEngineConfig {
    /// Creates a config seeded with an explicit visible window.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            initial_viewport: Some(viewport),
            ..Self::unseeded()
        }
    }

    /// Creates a config whose window is the trading session of `date`.
    #[must_use]
    pub fn for_session_date(date: NaiveDate) -> Self {
        Self {
            seed_date: Some(date),
            ..Self::unseeded()
        }
    }

    fn unseeded() -> Self {
        Self {
            initial_viewport: None,
            seed_date: None,
            time_axis_mode: TimeAxisMode::default(),
            calendar: TradingCalendar::default(),
            viewport_limits: ViewportLimits::default(),
            granularity: ChartGranularity::default(),
            navigation: NavigationBehavior::default(),
            price_scale_tuning: PriceScaleTuning::default(),
            candle_body_width_px: default_candle_body_width_px(),
        }
    }

    #[must_use]
    pub fn with_time_axis_mode(mut self, mode: TimeAxisMode) -> Self {
        self.time_axis_mode = mode;
        self
    }

    #[must_use]
    pub fn with_calendar(mut self, calendar: TradingCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    #[must_use]
    pub fn with_viewport_limits(mut self, limits: ViewportLimits) -> Self {
        self.viewport_limits = limits;
        self
    }

    /// Shorthand for a minimum visible range in milliseconds.
    #[must_use]
    pub fn with_min_range(mut self, min_range: f64) -> Self {
        self.viewport_limits.min_range = Some(min_range);
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: ChartGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    #[must_use]
    pub fn with_navigation(mut self, navigation: NavigationBehavior) -> Self {
        self.navigation = navigation;
        self
    }

    #[must_use]
    pub fn with_price_scale_tuning(mut self, tuning: PriceScaleTuning) -> Self {
        self.price_scale_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_candle_body_width_px(mut self, width_px: f64) -> Self {
        self.candle_body_width_px = width_px;
        self
    }

    /// Resolves the window the chart starts with.
    pub fn resolve_seed_viewport(&self) -> ChartResult<Viewport> {
        if let Some(viewport) = self.initial_viewport {
            return Ok(viewport);
        }
        let date = self.seed_date.ok_or_else(|| {
            ChartError::InvalidConfig("config needs an initial viewport or a seed date".to_owned())
        })?;
        let (open, close) = self.calendar.session_bounds(date).ok_or_else(|| {
            ChartError::InvalidConfig(format!("session bounds of {date} are not representable"))
        })?;
        Ok(Viewport::new(open, close))
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.calendar.validate()?;
        self.viewport_limits.validate()?;
        if !self.candle_body_width_px.is_finite() || self.candle_body_width_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "candle body width must be finite and > 0".to_owned(),
            ));
        }
        let step = self.navigation.wheel_zoom_step_ratio;
        if !step.is_finite() || step <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "wheel zoom step ratio must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_candle_body_width_px() -> f64 {
    10.0
}

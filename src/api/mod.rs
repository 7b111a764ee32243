mod crosshair_controller;
mod engine_config;
mod engine_snapshot;
mod json_contract;
mod label_format;
mod plugin_dispatch;
mod plugin_registry;
mod scene_builder;
mod snap_resolver;
mod viewport_navigation;
mod zoom_factor_resolver;

use tracing::debug;

use crate::core::{DataPoint, OhlcBar, TradingTimeScale, Viewport, ViewportController};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartPlugin, PluginEvent};
use crate::interaction::{CrosshairSync, InteractionMode};
use crate::render::RenderAdapter;

pub use engine_config::{ChartEngineConfig, NavigationBehavior};
pub use engine_snapshot::EngineSnapshot;
pub use json_contract::{
    ENGINE_CONFIG_JSON_SCHEMA_V1, ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineConfigJsonContractV1,
    EngineSnapshotJsonContractV1,
};
pub use label_format::{
    DateChangeCallbackFn, HoverLabelFormatterFn, default_hover_label_formatter, format_click_date,
};

/// Main orchestration facade consumed by host applications.
///
/// One engine exists per mounted chart. It owns the visible window, the
/// trading-time axis built for it, the crosshair state and the series data,
/// and talks to the host surface through a [`RenderAdapter`]. Dropping the
/// engine tears all of that down.
pub struct ChartEngine<A: RenderAdapter> {
    pub(super) adapter: A,
    pub(super) config: ChartEngineConfig,
    pub(super) viewport: ViewportController,
    pub(super) time_scale: TradingTimeScale,
    pub(super) crosshair: CrosshairSync,
    pub(super) interaction_mode: InteractionMode,
    pub(super) points: Vec<DataPoint>,
    pub(super) candles: Vec<OhlcBar>,
    pub(super) hover_label_formatter: HoverLabelFormatterFn,
    pub(super) hover_formatter_generation: u64,
    pub(super) date_change_callback: Option<DateChangeCallbackFn>,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<A: RenderAdapter> ChartEngine<A> {
    pub fn new(adapter: A, config: ChartEngineConfig) -> ChartResult<Self> {
        let plot_area = adapter.plot_area();
        if !plot_area.is_valid() {
            return Err(ChartError::InvalidPlotArea {
                width: plot_area.width,
                height: plot_area.height,
            });
        }
        config.validate()?;

        let seed = config.resolve_seed_viewport()?;
        let viewport = ViewportController::new(seed, config.viewport_limits)?;
        let time_scale = TradingTimeScale::for_viewport(
            config.time_axis_mode,
            config.calendar.clone(),
            viewport.viewport(),
        );
        let hover_label_formatter =
            default_hover_label_formatter(config.granularity, config.calendar.offset());
        debug!(
            min = viewport.viewport().min,
            max = viewport.viewport().max,
            segments = time_scale.table().len(),
            "chart engine initialized"
        );

        Ok(Self {
            adapter,
            config,
            viewport,
            time_scale,
            crosshair: CrosshairSync::new(),
            interaction_mode: InteractionMode::Idle,
            points: Vec::new(),
            candles: Vec::new(),
            hover_label_formatter,
            hover_formatter_generation: 0,
            date_change_callback: None,
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    #[must_use]
    pub fn into_adapter(self) -> A {
        self.adapter
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    #[must_use]
    pub fn time_scale(&self) -> &TradingTimeScale {
        &self.time_scale
    }

    #[must_use]
    pub fn crosshair(&self) -> &CrosshairSync {
        &self.crosshair
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    /// Replaces line-series data. Points are kept in time order.
    pub fn set_data(&mut self, mut points: Vec<DataPoint>) {
        points.retain(|point| point.x.is_finite() && point.y.is_finite());
        points.sort_by(|left, right| left.x.total_cmp(&right.x));
        self.points = points;
        self.adapter.request_redraw();
        self.emit_plugin_event(PluginEvent::DataUpdated {
            points_len: self.points.len(),
        });
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Replaces candlestick data. Candles are kept in time order.
    pub fn set_candles(&mut self, mut candles: Vec<OhlcBar>) {
        candles.sort_by(|left, right| left.time.total_cmp(&right.time));
        self.candles = candles;
        self.adapter.request_redraw();
        self.emit_plugin_event(PluginEvent::CandlesUpdated {
            candles_len: self.candles.len(),
        });
    }

    /// Appends a realtime candle, replacing the last one when times match.
    pub fn append_candle(&mut self, candle: OhlcBar) {
        match self.candles.last_mut() {
            Some(last) if last.time == candle.time => *last = candle,
            Some(last) if last.time > candle.time => {
                debug!(time = candle.time, "ignoring out-of-order candle");
                return;
            }
            _ => self.candles.push(candle),
        }
        self.adapter.request_redraw();
        self.emit_plugin_event(PluginEvent::CandlesUpdated {
            candles_len: self.candles.len(),
        });
    }

    #[must_use]
    pub fn candles(&self) -> &[OhlcBar] {
        &self.candles
    }

    /// Pixel position of `time` on the trading-time axis.
    #[must_use]
    pub fn map_time_to_pixel(&self, time: f64) -> f64 {
        self.time_scale.time_to_pixel(time, &self.adapter)
    }

    /// Time under a horizontal pixel on the trading-time axis.
    #[must_use]
    pub fn map_pixel_to_time(&self, pixel: f64) -> f64 {
        self.time_scale.pixel_to_time(pixel, &self.adapter)
    }
}

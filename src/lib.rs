//! trading-chart-rs: trading-time axis and crosshair/viewport engine.
//!
//! Stock price charts place wall-clock timestamps on an axis that skips
//! nights, weekends and holidays. This crate builds that compressed axis for a
//! visible window, negotiates pan/zoom under a minimum visible range, and
//! keeps one crosshair line in sync with hover and click input. Painting is
//! left to the host through [`render::RenderAdapter`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};

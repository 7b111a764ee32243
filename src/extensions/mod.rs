//! Host extension points.
//!
//! Plugins observe engine events; they cannot mutate engine state.

pub mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};

mod annotations;
mod crosshair_sync;

use serde::{Deserialize, Serialize};

pub use annotations::{AnnotationStore, LineAnnotation};
pub use crosshair_sync::{CrosshairSync, HOVERED_LINE_ANNOTATION_ID, HoverOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
}

/// Granularity of the plotted series, which decides click notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChartGranularity {
    /// One sample per trading day; clicks report `YYYY-MM-DD` dates.
    #[default]
    Daily,
    /// Sub-day samples; clicks are not reported.
    Intraday,
}

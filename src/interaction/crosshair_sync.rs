use serde::{Deserialize, Serialize};
use tracing::trace;

use super::annotations::{AnnotationStore, LineAnnotation};

/// Id of the singleton crosshair line inside the annotation store.
pub const HOVERED_LINE_ANNOTATION_ID: &str = "hoveredLine";

/// Result of one hover event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverOutcome {
    /// No data point resolved under the pointer.
    Ignored,
    /// The resolved value equals the current crosshair value.
    Unchanged,
    /// The crosshair line was created.
    Created,
    /// The crosshair line moved to a new value.
    Updated,
}

impl HoverOutcome {
    #[must_use]
    pub fn requires_redraw(self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

/// Crosshair state machine driven by hover and click events.
///
/// Owns the annotation collection of one chart, including the hovered line.
/// Hover events only change state when the resolved value differs from the
/// current one; click events never change state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrosshairSync {
    annotations: AnnotationStore,
}

impl CrosshairSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from host-provided annotations (e.g. a persisted crosshair).
    #[must_use]
    pub fn with_annotations(annotations: AnnotationStore) -> Self {
        Self { annotations }
    }

    #[must_use]
    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Host annotations share the store; the hovered line id is reserved.
    pub fn annotations_mut(&mut self) -> &mut AnnotationStore {
        &mut self.annotations
    }

    #[must_use]
    pub fn hover_annotation(&self) -> Option<&LineAnnotation> {
        self.annotations.get(HOVERED_LINE_ANNOTATION_ID)
    }

    #[must_use]
    pub fn hovered_value(&self) -> Option<f64> {
        self.hover_annotation().map(|annotation| annotation.value)
    }

    /// Applies a hover that resolved to `resolved_time` (`None` when no data
    /// point is near the pointer). `label` is only called when the crosshair
    /// is created or moved.
    pub fn on_hover(
        &mut self,
        resolved_time: Option<f64>,
        label: impl FnOnce(f64) -> String,
    ) -> HoverOutcome {
        let Some(value) = resolved_time.filter(|time| time.is_finite()) else {
            return HoverOutcome::Ignored;
        };

        match self.annotations.get_mut(HOVERED_LINE_ANNOTATION_ID) {
            Some(existing) if existing.value == value => HoverOutcome::Unchanged,
            Some(existing) => {
                trace!(from = existing.value, to = value, "crosshair moved");
                existing.value = value;
                existing.label_content = label(value);
                HoverOutcome::Updated
            }
            None => {
                trace!(value, "crosshair created");
                self.annotations.upsert(LineAnnotation::new(
                    HOVERED_LINE_ANNOTATION_ID,
                    value,
                    label(value),
                ));
                HoverOutcome::Created
            }
        }
    }

    /// Resolves a click into the time to notify, if any.
    ///
    /// Clicks outside the plot area or without a resolved data point yield
    /// `None`.
    #[must_use]
    pub fn on_click(&self, resolved_time: Option<f64>, in_plot_area: bool) -> Option<f64> {
        if !in_plot_area {
            return None;
        }
        resolved_time.filter(|time| time.is_finite())
    }

    /// Re-labels the crosshair after a formatter change without moving it.
    pub fn relabel(&mut self, label: impl FnOnce(f64) -> String) -> bool {
        match self.annotations.get_mut(HOVERED_LINE_ANNOTATION_ID) {
            Some(existing) => {
                let content = label(existing.value);
                if content == existing.label_content {
                    return false;
                }
                existing.label_content = content;
                true
            }
            None => false,
        }
    }
}

use std::sync::Arc;

use chrono::FixedOffset;

use crate::core::primitives::unix_millis_to_local;
use crate::interaction::ChartGranularity;

/// Host formatter turning a crosshair value (epoch ms) into label text.
pub type HoverLabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Host callback receiving the clicked date as `YYYY-MM-DD`.
pub type DateChangeCallbackFn = Arc<dyn Fn(&str) + Send + Sync + 'static>;

const DAILY_LABEL_PATTERN: &str = "%b %-d, %Y";
const INTRADAY_LABEL_PATTERN: &str = "%b %-d, %Y %H:%M";
const CLICK_DATE_PATTERN: &str = "%Y-%m-%d";

/// Default crosshair label: `May 2, 2024`, plus `HH:MM` for intraday charts.
#[must_use]
pub fn default_hover_label_formatter(
    granularity: ChartGranularity,
    offset: FixedOffset,
) -> HoverLabelFormatterFn {
    let pattern = match granularity {
        ChartGranularity::Daily => DAILY_LABEL_PATTERN,
        ChartGranularity::Intraday => INTRADAY_LABEL_PATTERN,
    };
    Arc::new(move |value| {
        unix_millis_to_local(value, offset)
            .map(|local| local.format(pattern).to_string())
            .unwrap_or_default()
    })
}

/// Calendar date of `time` in `offset`, formatted `YYYY-MM-DD`.
#[must_use]
pub fn format_click_date(time: f64, offset: FixedOffset) -> Option<String> {
    unix_millis_to_local(time, offset).map(|local| local.format(CLICK_DATE_PATTERN).to_string())
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::core::scale::DecimalPixelMapping;
use crate::core::{PriceScale, TradingTimeScale};
use crate::error::{ChartError, ChartResult};

/// Canonical OHLC candle used by candlestick series.
///
/// `time` is an epoch timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    /// Builds a validated OHLC bar from raw floating values.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(time: f64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !time.is_finite()
            || !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
        })
    }

    /// Converts strongly-typed temporal/decimal input into a validated OHLC bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_millis(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub time: f64,
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Normalized axis coordinates of one candle, before pixel mapping.
#[derive(Debug, Clone, Copy)]
struct CandleDecimals {
    x: f64,
    open: f64,
    close: f64,
    high: f64,
    low: f64,
}

/// Projects OHLC candles through the trading-time axis into render geometry.
///
/// Candles inside non-trading gaps collapse onto the preceding session
/// boundary like any other gap timestamp.
pub fn project_candles(
    bars: &[OhlcBar],
    time_scale: &TradingTimeScale,
    price_scale: PriceScale,
    x_mapping: &impl DecimalPixelMapping,
    y_mapping: &impl DecimalPixelMapping,
    body_width_px: f64,
) -> ChartResult<Vec<CandleGeometry>> {
    if !body_width_px.is_finite() || body_width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "body width must be finite and > 0".to_owned(),
        ));
    }

    let to_decimals = |bar: &OhlcBar| CandleDecimals {
        x: time_scale.time_to_decimal(bar.time),
        open: price_scale.price_to_decimal(bar.open),
        close: price_scale.price_to_decimal(bar.close),
        high: price_scale.price_to_decimal(bar.high),
        low: price_scale.price_to_decimal(bar.low),
    };

    // Segment lookups dominate for large series; pixel mapping stays on the
    // caller's thread because host mappings need not be `Sync`.
    #[cfg(feature = "parallel-projection")]
    let decimals: Vec<CandleDecimals> = bars.par_iter().map(to_decimals).collect();
    #[cfg(not(feature = "parallel-projection"))]
    let decimals: Vec<CandleDecimals> = bars.iter().map(to_decimals).collect();

    let half = body_width_px / 2.0;
    Ok(bars
        .iter()
        .zip(decimals)
        .map(|(bar, decimals)| {
            let center_x = x_mapping.pixel_for_decimal(decimals.x);
            let open_y = y_mapping.pixel_for_decimal(decimals.open);
            let close_y = y_mapping.pixel_for_decimal(decimals.close);
            let high_y = y_mapping.pixel_for_decimal(decimals.high);
            let low_y = y_mapping.pixel_for_decimal(decimals.low);
            CandleGeometry {
                time: bar.time,
                center_x,
                body_left: center_x - half,
                body_right: center_x + half,
                body_top: open_y.min(close_y),
                body_bottom: open_y.max(close_y),
                wick_top: high_y.min(low_y),
                wick_bottom: high_y.max(low_y),
                is_bullish: bar.is_bullish(),
            }
        })
        .collect())
}

use serde::{Deserialize, Serialize};

use crate::core::scale::DecimalPixelMapping;
use crate::core::{DataPoint, OhlcBar};
use crate::error::{ChartError, ChartResult};

/// Tuning controls for price-domain autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScaleTuning {
    /// Share of the data span added above and below the fitted range.
    pub grace_ratio: f64,
    pub min_span_absolute: f64,
}

impl Default for PriceScaleTuning {
    fn default() -> Self {
        Self {
            grace_ratio: 0.10,
            min_span_absolute: 0.000_001,
        }
    }
}

impl PriceScaleTuning {
    fn validate(self) -> ChartResult<Self> {
        if !self.grace_ratio.is_finite() || self.grace_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "price scale grace ratio must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidData(
                "price scale min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Linear price axis over a fixed domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    domain_start: f64,
    domain_end: f64,
}

impl PriceScale {
    pub fn new(price_min: f64, price_max: f64) -> ChartResult<Self> {
        if !price_min.is_finite() || !price_max.is_finite() || price_min >= price_max {
            return Err(ChartError::InvalidData(
                "price domain must be finite with min < max".to_owned(),
            ));
        }
        Ok(Self {
            domain_start: price_min,
            domain_end: price_max,
        })
    }

    /// Fits the domain to candle lows/highs plus the grace margin.
    pub fn from_bars(bars: &[OhlcBar], tuning: PriceScaleTuning) -> ChartResult<Self> {
        Self::fit(bars.iter().flat_map(|bar| [bar.low, bar.high]), tuning)
    }

    /// Fits the domain to line-series values plus the grace margin.
    pub fn from_points(points: &[DataPoint], tuning: PriceScaleTuning) -> ChartResult<Self> {
        Self::fit(points.iter().map(|point| point.y), tuning)
    }

    fn fit(values: impl Iterator<Item = f64>, tuning: PriceScaleTuning) -> ChartResult<Self> {
        let tuning = tuning.validate()?;
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "price scale cannot be fitted to empty or non-finite data".to_owned(),
            ));
        }

        let span = (max - min).max(tuning.min_span_absolute);
        let center = min + (max - min) / 2.0;
        let half = span / 2.0 + span * tuning.grace_ratio;
        Self::new(center - half, center + half)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn price_to_decimal(self, price: f64) -> f64 {
        (price - self.domain_start) / (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn price_to_pixel(self, price: f64, mapping: &impl DecimalPixelMapping) -> f64 {
        mapping.pixel_for_decimal(self.price_to_decimal(price))
    }

    #[must_use]
    pub fn pixel_to_price(self, pixel: f64, mapping: &impl DecimalPixelMapping) -> f64 {
        let decimal = mapping.decimal_for_pixel(pixel);
        self.domain_start + decimal * (self.domain_end - self.domain_start)
    }
}

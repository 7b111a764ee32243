use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Host-side linear conversion between a normalized decimal and pixels.
///
/// `0.0` is the start of the axis and `1.0` its end. Axis mappers compose
/// these primitives with their own domain transforms.
pub trait DecimalPixelMapping {
    fn pixel_for_decimal(&self, decimal: f64) -> f64;
    fn decimal_for_pixel(&self, pixel: f64) -> f64;
}

/// Linear decimal/pixel mapping over a pixel interval.
///
/// `pixel_end` may be smaller than `pixel_start` for axes growing upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(pixel_start: f64, pixel_end: f64) -> ChartResult<Self> {
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(ChartError::InvalidData(
                "scale pixel span must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            pixel_start,
            pixel_end,
        })
    }

    /// Horizontal span of a plot area, left to right.
    pub fn horizontal(area: PlotArea) -> ChartResult<Self> {
        if !area.is_valid() {
            return Err(ChartError::InvalidPlotArea {
                width: area.width,
                height: area.height,
            });
        }
        Self::new(area.left, area.right())
    }

    /// Vertical span of a plot area, bottom to top.
    pub fn vertical(area: PlotArea) -> ChartResult<Self> {
        if !area.is_valid() {
            return Err(ChartError::InvalidPlotArea {
                width: area.width,
                height: area.height,
            });
        }
        Self::new(area.bottom(), area.top)
    }

    #[must_use]
    pub fn pixel_span(self) -> (f64, f64) {
        (self.pixel_start, self.pixel_end)
    }
}

impl DecimalPixelMapping for LinearScale {
    fn pixel_for_decimal(&self, decimal: f64) -> f64 {
        self.pixel_start + decimal * (self.pixel_end - self.pixel_start)
    }

    fn decimal_for_pixel(&self, pixel: f64) -> f64 {
        (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start)
    }
}

#[cfg(test)]
mod tests {
    use super::{DecimalPixelMapping, LinearScale};
    use crate::core::PlotArea;

    #[test]
    fn horizontal_scale_offsets_by_plot_left() {
        let scale = LinearScale::horizontal(PlotArea::new(40.0, 0.0, 800.0, 400.0)).expect("scale");
        assert_eq!(scale.pixel_for_decimal(0.0), 40.0);
        assert_eq!(scale.pixel_for_decimal(1.0), 840.0);
        assert_eq!(scale.decimal_for_pixel(440.0), 0.5);
    }

    #[test]
    fn vertical_scale_grows_upwards() {
        let scale = LinearScale::vertical(PlotArea::from_size(100.0, 200.0)).expect("scale");
        assert_eq!(scale.pixel_for_decimal(0.0), 200.0);
        assert_eq!(scale.pixel_for_decimal(1.0), 0.0);
    }

    #[test]
    fn zero_width_span_is_rejected() {
        assert!(LinearScale::new(10.0, 10.0).is_err());
        assert!(LinearScale::horizontal(PlotArea::from_size(0.0, 10.0)).is_err());
    }
}

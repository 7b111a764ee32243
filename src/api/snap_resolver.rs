use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::render::RenderAdapter;

use super::ChartEngine;

impl<A: RenderAdapter> ChartEngine<A> {
    /// Time of the data point or candle closest to `pointer_x` along the axis.
    ///
    /// Only samples inside the visible window compete; samples outside it all
    /// pile up on the plot edges. Only horizontal distance counts. Ties
    /// resolve to the earliest sample.
    pub(super) fn nearest_time_at_x(&self, pointer_x: f64) -> Option<f64> {
        if !pointer_x.is_finite() || !self.time_scale.is_available() {
            return None;
        }

        let viewport = self.viewport.viewport();
        let visible = |time: &f64| viewport.contains(*time);
        let mut candidates: SmallVec<[(OrderedFloat<f64>, f64); 2]> = SmallVec::new();
        if let Some(candidate) =
            self.nearest_sample(pointer_x, self.points.iter().map(|p| p.x).filter(visible))
        {
            candidates.push(candidate);
        }
        if let Some(candidate) =
            self.nearest_sample(pointer_x, self.candles.iter().map(|c| c.time).filter(visible))
        {
            candidates.push(candidate);
        }

        candidates
            .into_iter()
            .min_by_key(|(distance, time)| (*distance, OrderedFloat(*time)))
            .map(|(_, time)| time)
    }

    fn nearest_sample(
        &self,
        pointer_x: f64,
        times: impl Iterator<Item = f64>,
    ) -> Option<(OrderedFloat<f64>, f64)> {
        let mut best: Option<(OrderedFloat<f64>, f64)> = None;
        for time in times {
            let x_px = self.time_scale.time_to_pixel(time, &self.adapter);
            if !x_px.is_finite() {
                continue;
            }
            let distance = OrderedFloat((x_px - pointer_x).abs());
            match best {
                Some((current, _)) if current <= distance => {}
                _ => best = Some((distance, time)),
            }
        }
        best
    }
}

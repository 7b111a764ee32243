use proptest::prelude::*;
use trading_chart::core::{TimeAxisMode, TradingCalendar, TradingTimeScale, Viewport};

const HOUR: f64 = 3_600_000.0;
const DAY: f64 = 24.0 * HOUR;
// 2024-01-01T00:00:00Z
const BASE: f64 = 1_704_067_200_000.0;

fn scale_for(start_offset: f64, span: f64) -> TradingTimeScale {
    TradingTimeScale::for_viewport(
        TimeAxisMode::TradingSession,
        TradingCalendar::default(),
        Viewport::new(BASE + start_offset, BASE + start_offset + span),
    )
}

proptest! {
    #[test]
    fn round_trip_holds_inside_trading_windows(
        start_offset in 0.0f64..(60.0 * DAY),
        span in HOUR..(30.0 * DAY),
        segment_pick in 0usize..64,
        fraction in 0.0f64..1.0
    ) {
        let scale = scale_for(start_offset, span);
        let segments = scale.table().segments();
        prop_assume!(!segments.is_empty());

        let segment = segments[segment_pick % segments.len()];
        let time = segment.from_time + fraction * (segment.to_time - segment.from_time);
        prop_assume!(time < segment.to_time);

        let recovered = scale.position_to_time(scale.time_to_position(time));
        prop_assert!((recovered - time).abs() <= 1e-3);
    }

    #[test]
    fn positions_are_contiguous_and_monotonic(
        start_offset in 0.0f64..(60.0 * DAY),
        span in HOUR..(30.0 * DAY)
    ) {
        let scale = scale_for(start_offset, span);
        let segments = scale.table().segments();
        prop_assume!(!segments.is_empty());

        prop_assert_eq!(segments[0].from_pos, 0.0);
        for pair in segments.windows(2) {
            prop_assert_eq!(pair[1].from_pos, pair[0].to_pos);
            prop_assert!(pair[1].from_time >= pair[0].to_time);
        }
        for segment in segments {
            prop_assert!(segment.from_time < segment.to_time);
            prop_assert!(
                ((segment.to_pos - segment.from_pos) - (segment.to_time - segment.from_time)).abs()
                    <= 1e-6
            );
        }
    }

    #[test]
    fn gap_times_clamp_to_the_preceding_boundary(
        start_offset in 0.0f64..(60.0 * DAY),
        span in DAY..(30.0 * DAY),
        fraction in 0.0f64..1.0
    ) {
        let scale = scale_for(start_offset, span);
        let segments = scale.table().segments();
        prop_assume!(segments.len() >= 2);

        let (before, after) = (segments[0], segments[1]);
        let gap_time = before.to_time + fraction * (after.from_time - before.to_time);
        prop_assume!(gap_time < after.from_time);

        prop_assert_eq!(scale.time_to_position(gap_time), before.to_pos);
        prop_assert_eq!(scale.position_to_time(before.to_pos), after.from_time);
    }

    #[test]
    fn time_to_position_is_non_decreasing(
        start_offset in 0.0f64..(60.0 * DAY),
        span in HOUR..(30.0 * DAY),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let scale = scale_for(start_offset, span);
        let viewport = Viewport::new(BASE + start_offset, BASE + start_offset + span);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let t_lo = viewport.min + lo * viewport.span();
        let t_hi = viewport.min + hi * viewport.span();
        prop_assert!(scale.time_to_position(t_lo) <= scale.time_to_position(t_hi));
    }
}

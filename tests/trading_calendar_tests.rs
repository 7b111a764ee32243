use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use trading_chart::core::{TradingCalendar, segment_linear_range, segment_trading_range};

const HOUR: f64 = 3_600_000.0;

fn utc_ms(y: i32, m: u32, d: u32, h: u32, min: u32) -> f64 {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid datetime")
        .timestamp_millis() as f64
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn monday_open_to_tuesday_close_yields_two_full_sessions() {
    // 2024-05-06 is a Monday.
    let table = segment_trading_range(
        utc_ms(2024, 5, 6, 9, 0),
        utc_ms(2024, 5, 7, 17, 0),
        &TradingCalendar::default(),
    );

    assert_eq!(table.len(), 2);
    for segment in table.segments() {
        assert_relative_eq!(segment.to_time - segment.from_time, 8.0 * HOUR);
    }
    assert_eq!(table.total_range(), Some(16.0 * HOUR));

    let [monday, tuesday] = table.segments() else {
        panic!("expected two segments");
    };
    assert_eq!(monday.from_time, utc_ms(2024, 5, 6, 9, 0));
    assert_eq!(monday.from_pos, 0.0);
    assert_eq!(tuesday.from_time, utc_ms(2024, 5, 7, 9, 0));
    assert_eq!(tuesday.from_pos, monday.to_pos);
}

#[test]
fn friday_afternoon_to_monday_morning_skips_the_weekend() {
    let table = segment_trading_range(
        utc_ms(2024, 5, 3, 16, 0),
        utc_ms(2024, 5, 6, 10, 0),
        &TradingCalendar::default(),
    );

    assert_eq!(table.len(), 2);
    let [friday, monday] = table.segments() else {
        panic!("expected two segments");
    };
    assert_eq!(friday.from_time, utc_ms(2024, 5, 3, 16, 0));
    assert_eq!(friday.to_time, utc_ms(2024, 5, 3, 17, 0));
    assert_eq!(monday.from_time, utc_ms(2024, 5, 6, 9, 0));
    assert_eq!(monday.to_time, utc_ms(2024, 5, 6, 10, 0));
    assert_eq!(table.total_range(), Some(2.0 * HOUR));
}

#[test]
fn range_clipped_inside_one_session_is_a_single_segment() {
    let table = segment_trading_range(
        utc_ms(2024, 5, 6, 10, 0),
        utc_ms(2024, 5, 6, 12, 30),
        &TradingCalendar::default(),
    );
    assert_eq!(table.len(), 1);
    assert_eq!(table.total_range(), Some(2.5 * HOUR));
}

#[test]
fn holidays_are_excluded() {
    let calendar = TradingCalendar::default().with_holiday(date(2024, 5, 7));
    let table = segment_trading_range(
        utc_ms(2024, 5, 6, 0, 0),
        utc_ms(2024, 5, 8, 23, 0),
        &calendar,
    );

    let starts: Vec<f64> = table.segments().iter().map(|s| s.from_time).collect();
    assert_eq!(
        starts,
        vec![utc_ms(2024, 5, 6, 9, 0), utc_ms(2024, 5, 8, 9, 0)]
    );
    assert!(!calendar.is_trading_day(date(2024, 5, 7)));
}

#[test]
fn range_without_trading_time_is_empty() {
    let table = segment_trading_range(
        utc_ms(2024, 5, 4, 0, 0),
        utc_ms(2024, 5, 5, 23, 0),
        &TradingCalendar::default(),
    );
    assert!(table.is_empty());
    assert_eq!(table.total_range(), None);

    let inverted = segment_trading_range(10.0, 5.0, &TradingCalendar::default());
    assert!(inverted.is_empty());
}

#[test]
fn utc_offset_shifts_session_hours() {
    // 09:00-15:30 at UTC+09:00 is 00:00-06:30 UTC.
    let calendar = TradingCalendar::default()
        .with_session(
            NaiveTime::from_hms_opt(9, 0, 0).expect("time"),
            NaiveTime::from_hms_opt(15, 30, 0).expect("time"),
        )
        .with_utc_offset_minutes(9 * 60);
    calendar.validate().expect("valid calendar");

    let (open, close) = calendar.session_bounds(date(2024, 5, 6)).expect("bounds");
    assert_eq!(open, utc_ms(2024, 5, 6, 0, 0));
    assert_eq!(close, utc_ms(2024, 5, 6, 6, 30));

    let table = segment_trading_range(
        utc_ms(2024, 5, 5, 20, 0),
        utc_ms(2024, 5, 6, 12, 0),
        &calendar,
    );
    assert_eq!(table.len(), 1);
    assert_eq!(table.total_range(), Some(6.5 * HOUR));
}

#[test]
fn custom_weekend_is_respected() {
    let calendar = TradingCalendar::default().with_weekend(vec![Weekday::Fri, Weekday::Sat]);
    let table = segment_trading_range(
        utc_ms(2024, 5, 3, 0, 0),
        utc_ms(2024, 5, 5, 23, 0),
        &calendar,
    );
    assert_eq!(table.len(), 1);
    assert_eq!(table.segments()[0].from_time, utc_ms(2024, 5, 5, 9, 0));
}

#[test]
fn calendar_validation_rejects_inverted_session_and_full_weekend() {
    let inverted = TradingCalendar::default().with_session(
        NaiveTime::from_hms_opt(17, 0, 0).expect("time"),
        NaiveTime::from_hms_opt(9, 0, 0).expect("time"),
    );
    assert!(inverted.validate().is_err());

    let closed = TradingCalendar::default().with_weekend(vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]);
    assert!(closed.validate().is_err());
}

#[test]
fn linear_range_is_one_segment_spanning_the_window() {
    let table = segment_linear_range(100.0, 400.0);
    assert_eq!(table.len(), 1);
    assert_eq!(table.total_range(), Some(300.0));
    assert!(segment_linear_range(400.0, 100.0).is_empty());
}

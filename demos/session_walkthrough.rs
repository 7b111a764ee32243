//! Walks a headless chart through one trading week: seeding from a session,
//! hovering, clicking, panning and zooming.
//!
//! Run with `RUST_LOG=trading_chart=trace` and the `telemetry` feature to see
//! segment table rebuilds.

use chrono::NaiveDate;
use trading_chart::api::{ChartEngine, ChartEngineConfig};
use trading_chart::core::{OhlcBar, Viewport};
use trading_chart::render::HeadlessAdapter;
use trading_chart::{ChartResult, telemetry};

const HOUR: f64 = 3_600_000.0;
const DAY: f64 = 24.0 * HOUR;

fn main() -> ChartResult<()> {
    let _ = telemetry::init_default_tracing();

    let Some(monday) = NaiveDate::from_ymd_opt(2024, 5, 6) else {
        return Ok(());
    };
    let config = ChartEngineConfig::for_session_date(monday).with_min_range(HOUR);
    let mut engine = ChartEngine::new(HeadlessAdapter::default(), config)?;
    let session = engine.viewport();
    println!(
        "seeded session: {} segment(s), {:.1}h of trading time",
        engine.time_scale().table().len(),
        engine.time_scale().total_range().unwrap_or(0.0) / HOUR
    );

    let mut candles = Vec::new();
    for day in 0_u32..5 {
        for hour in 0_u32..8 {
            let time = session.min + f64::from(day) * DAY + f64::from(hour) * HOUR;
            let open = 100.0 + f64::from(day * 8 + hour);
            candles.push(OhlcBar::new(time, open, open + 2.0, open - 1.0, open + 1.0)?);
        }
    }
    engine.set_candles(candles);
    engine.set_date_change_callback(|date| println!("clicked date: {date}"));

    engine.commit_viewport(session.min, session.max + 4.0 * DAY);
    println!(
        "week view: {} segment(s), {:.1}h of trading time",
        engine.time_scale().table().len(),
        engine.time_scale().total_range().unwrap_or(0.0) / HOUR
    );

    let outcome = engine.pointer_hover(420.0);
    println!(
        "hover -> {outcome:?}, label {:?}",
        engine.hover_label().unwrap_or_default()
    );
    engine.pointer_click(420.0, 200.0);

    engine.pan(-200.0);
    engine.zoom(4.0, 500.0);
    engine.render()?;

    let Viewport { min, max } = engine.viewport();
    let adapter = engine.into_adapter();
    println!(
        "final window {:.1}h wide, {} redraw request(s), {} scene(s) presented",
        (max - min) / HOUR,
        adapter.redraw_requests,
        adapter.presented_scenes
    );
    Ok(())
}

use approx::assert_relative_eq;
use trading_chart::api::{ChartEngine, ChartEngineConfig};
use trading_chart::core::{
    DataPoint, LinearScale, OhlcBar, PlotArea, PriceScale, PriceScaleTuning, TimeAxisMode,
    TradingCalendar, TradingTimeScale, Viewport, project_candles,
};
use trading_chart::render::HeadlessAdapter;

const HOUR: f64 = 3_600_000.0;
// 2024-05-03T00:00:00Z, a Friday.
const FRIDAY: f64 = 1_714_694_400_000.0;
const MONDAY: f64 = FRIDAY + 3.0 * 24.0 * HOUR;

fn weekend_engine() -> ChartEngine<HeadlessAdapter> {
    let config = ChartEngineConfig::new(Viewport::new(FRIDAY + 16.0 * HOUR, MONDAY + 10.0 * HOUR));
    ChartEngine::new(
        HeadlessAdapter::new(PlotArea::new(0.0, 0.0, 1000.0, 400.0)),
        config,
    )
    .expect("engine init")
}

#[test]
fn empty_engine_renders_an_empty_scene() {
    let mut engine = weekend_engine();
    engine.render().expect("render");

    let scene = engine.adapter().last_scene.clone().expect("scene");
    assert!(scene.is_empty());
    assert_eq!(scene.price_domain, None);
    assert_eq!(engine.adapter().presented_scenes, 1);
}

#[test]
fn candles_are_placed_on_the_compressed_axis() {
    let mut engine = weekend_engine();
    engine.set_candles(vec![
        OhlcBar::new(FRIDAY + 16.5 * HOUR, 10.0, 12.0, 9.0, 11.0).expect("candle"),
        OhlcBar::new(MONDAY + 9.5 * HOUR, 11.0, 13.0, 10.0, 10.5).expect("candle"),
    ]);

    let scene = engine.build_scene().expect("scene");
    assert_eq!(scene.candles.len(), 2);
    assert_relative_eq!(scene.candles[0].center_x, 250.0);
    assert_relative_eq!(scene.candles[1].center_x, 750.0);
    assert!(scene.candles[0].is_bullish);
    assert!(!scene.candles[1].is_bullish);

    // lows 9..13 with a 10% grace on each side.
    let (min, max) = scene.price_domain.expect("domain");
    assert_relative_eq!(min, 8.6, epsilon = 1e-9);
    assert_relative_eq!(max, 13.4, epsilon = 1e-9);
}

#[test]
fn price_axis_grows_upwards() {
    let mut engine = weekend_engine();
    engine.set_data(vec![
        DataPoint::new(FRIDAY + 16.0 * HOUR, 10.0),
        DataPoint::new(MONDAY + 10.0 * HOUR, 20.0),
    ]);

    let scene = engine.build_scene().expect("scene");
    assert_eq!(scene.line.len(), 1);
    let segment = scene.line[0];
    assert_relative_eq!(segment.x1, 0.0);
    assert_relative_eq!(segment.x2, 1000.0);
    assert!(segment.y1 > segment.y2, "higher price must be drawn higher");
}

#[test]
fn hover_line_is_drawn_at_the_annotation_pixel() {
    let mut engine = weekend_engine();
    engine.set_data(vec![
        DataPoint::new(FRIDAY + 16.5 * HOUR, 10.0),
        DataPoint::new(MONDAY + 9.5 * HOUR, 11.0),
    ]);
    engine.pointer_hover(700.0);
    engine.render().expect("render");

    let scene = engine.adapter().last_scene.clone().expect("scene");
    let hover = scene.hover_line.expect("hover line");
    assert_eq!(hover.value, MONDAY + 9.5 * HOUR);
    assert_relative_eq!(hover.x, 750.0);
    assert_relative_eq!(hover.x, engine.map_time_to_pixel(hover.value));
    assert_eq!(hover.top, 0.0);
    assert_eq!(hover.bottom, 400.0);
    assert_eq!(hover.label, "May 6, 2024");
}

#[test]
fn price_scale_falls_back_to_all_data_when_nothing_is_visible() {
    let mut engine = weekend_engine();
    engine.set_data(vec![
        DataPoint::new(FRIDAY - 48.0 * HOUR, 5.0),
        DataPoint::new(FRIDAY - 47.0 * HOUR, 15.0),
    ]);

    let scene = engine.build_scene().expect("scene");
    assert!(scene.line.is_empty());
    let (min, max) = scene.price_domain.expect("domain");
    assert_relative_eq!(min, 4.0, epsilon = 1e-9);
    assert_relative_eq!(max, 16.0, epsilon = 1e-9);
}

#[test]
fn append_candle_replaces_same_time_and_drops_older() {
    let mut engine = weekend_engine();
    let time = FRIDAY + 16.5 * HOUR;
    engine.set_candles(vec![OhlcBar::new(time, 10.0, 12.0, 9.0, 11.0).expect("candle")]);

    engine.append_candle(OhlcBar::new(time, 10.0, 14.0, 9.0, 13.0).expect("candle"));
    assert_eq!(engine.candles().len(), 1);
    assert_eq!(engine.candles()[0].close, 13.0);

    engine.append_candle(OhlcBar::new(time - HOUR, 1.0, 1.0, 1.0, 1.0).expect("candle"));
    assert_eq!(engine.candles().len(), 1);

    engine.append_candle(OhlcBar::new(MONDAY + 9.5 * HOUR, 13.0, 13.0, 12.0, 12.5).expect("candle"));
    assert_eq!(engine.candles().len(), 2);
}

#[test]
fn candle_projection_collapses_gap_candles_onto_session_close() {
    let scale = TradingTimeScale::for_viewport(
        TimeAxisMode::TradingSession,
        TradingCalendar::default(),
        Viewport::new(FRIDAY + 16.0 * HOUR, MONDAY + 10.0 * HOUR),
    );
    let area = PlotArea::from_size(1000.0, 400.0);
    let x = LinearScale::horizontal(area).expect("x mapping");
    let y = LinearScale::vertical(area).expect("y mapping");
    let bars = vec![OhlcBar::new(FRIDAY + 36.0 * HOUR, 1.0, 2.0, 0.5, 1.5).expect("candle")];
    let price = PriceScale::from_bars(&bars, PriceScaleTuning::default()).expect("price scale");

    let geometry = project_candles(&bars, &scale, price, &x, &y, 6.0).expect("projection");
    assert_relative_eq!(geometry[0].center_x, 500.0);
    assert_relative_eq!(geometry[0].body_right - geometry[0].body_left, 6.0);
}

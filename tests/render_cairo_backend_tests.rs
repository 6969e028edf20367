#![cfg(feature = "cairo-backend")]

use barchart_rs::ChartError;
use barchart_rs::animation::ManualClock;
use barchart_rs::api::{ChartEngine, ChartEngineConfig};
use barchart_rs::render::CairoRenderer;

const SOURCE: &str = "\
Area,Item,Value
USA,Wheat,100
USA,Corn,80
USA,Rice,60
";

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_bars_and_axes() {
    let renderer = CairoRenderer::new(800, 700).expect("renderer");
    let clock = ManualClock::new(0.0);
    let config = ChartEngineConfig::default().with_initial_group("USA");
    let mut engine = ChartEngine::with_clock(renderer, config, clock.clone()).expect("engine");
    engine
        .load_dataset_from_reader(SOURCE.as_bytes())
        .expect("load");
    clock.set(750.0);
    engine.advance();

    engine.render().expect("render");
    let stats = engine.renderer().last_stats();
    assert_eq!(stats.rects_drawn, 3);
    assert!(stats.lines_drawn >= 2);
    assert_eq!(stats.texts_drawn, stats.lines_drawn - 2);
}

#[test]
fn cairo_renderer_writes_png() {
    let renderer = CairoRenderer::new(320, 240).expect("renderer");
    let config = ChartEngineConfig::new(barchart_rs::core::Viewport::new(320, 240))
        .with_initial_group("USA");
    let mut engine = ChartEngine::new(renderer, config).expect("engine");
    engine
        .load_dataset_from_reader(SOURCE.as_bytes())
        .expect("load");
    engine.render().expect("render");

    let path = std::env::temp_dir().join(format!("barchart-rs-{}.png", std::process::id()));
    engine.renderer().write_png(&path).expect("write png");
    let bytes = std::fs::read(&path).expect("read png");
    std::fs::remove_file(&path).expect("remove png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

use barchart_rs::animation::ManualClock;
use barchart_rs::api::{ChartEngine, ChartEngineConfig, DEFAULT_INITIAL_GROUP};
use barchart_rs::core::{Row, Viewport};
use barchart_rs::data::Dataset;
use barchart_rs::render::NullRenderer;
use barchart_rs::scene::BarPhase;

const SOURCE: &str = "\
Area,Item,Value
USA,Wheat,100
USA,Corn,80
USA,Rice,60
USA,Soy,40
USA,Barley,20
USA,Oats,10
Canada,Wheat,50
";

fn engine() -> (ChartEngine<NullRenderer, ManualClock>, ManualClock) {
    let clock = ManualClock::new(0.0);
    let config = ChartEngineConfig::default().with_initial_group("USA");
    let engine =
        ChartEngine::with_clock(NullRenderer::default(), config, clock.clone()).expect("engine");
    (engine, clock)
}

fn loaded_engine() -> (ChartEngine<NullRenderer, ManualClock>, ManualClock) {
    let (mut engine, clock) = engine();
    engine
        .load_dataset_from_reader(SOURCE.as_bytes())
        .expect("load");
    clock.set(750.0);
    assert!(!engine.advance());
    (engine, clock)
}

#[test]
fn nothing_is_drawn_before_a_dataset_loads() {
    let (mut engine, _clock) = engine();
    assert!(!engine.is_loaded());
    assert!(engine.groups().is_empty());
    assert!(engine.bars().is_empty());

    let frame = engine.build_render_frame();
    assert!(frame.is_empty());
    assert!(frame.background.is_some());

    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert_eq!(engine.renderer().last_rect_count, 0);
}

#[test]
fn selection_before_load_is_applied_once_data_arrives() {
    let (mut engine, _clock) = engine();
    assert!(engine.select_group("Canada").is_none());
    assert_eq!(engine.selected_group(), "Canada");

    engine
        .load_dataset_from_reader(SOURCE.as_bytes())
        .expect("load");
    let categories: Vec<&str> = engine.ranked_set().categories().collect();
    assert_eq!(categories, ["Wheat"]);
    assert_eq!(engine.scene().len(), 1);
}

#[test]
fn default_initial_group_is_the_reference_country() {
    assert_eq!(
        ChartEngineConfig::default().initial_group,
        DEFAULT_INITIAL_GROUP
    );
}

#[test]
fn initial_load_ranks_top_five_and_draws_them() {
    let (mut engine, _clock) = loaded_engine();

    assert_eq!(engine.groups(), ["USA", "Canada"]);
    let categories: Vec<&str> = engine.ranked_set().categories().collect();
    assert_eq!(categories, ["Wheat", "Corn", "Rice", "Soy", "Barley"]);
    assert!(engine.bars().iter().all(|bar| bar.phase == BarPhase::Settled));

    engine.render().expect("render");
    let renderer = engine.renderer();
    assert_eq!(renderer.last_rect_count, 5);
    // Two axis lines, three value tick marks, five category tick marks.
    assert_eq!(renderer.last_line_count, 10);
    assert_eq!(renderer.last_text_count, 8);
}

#[test]
fn switching_groups_animates_then_settles_on_one_bar() {
    let (mut engine, clock) = loaded_engine();

    let summary = engine.select_group("Canada").expect("pipeline ran");
    assert_eq!(summary.updated, ["Wheat"]);
    assert_eq!(summary.exited, ["Corn", "Rice", "Soy", "Barley"]);

    clock.set(1_100.0);
    assert!(engine.advance());
    assert_eq!(engine.bars().len(), 5);

    clock.set(1_500.0);
    assert!(!engine.advance());
    let bars = engine.bars();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].category, "Wheat");
    assert_eq!(bars[0].value, 50.0);
    assert_eq!(bars[0].width, engine.layout().body_width);

    let labels: Vec<String> = engine
        .axis_state()
        .value_ticks
        .into_iter()
        .map(|tick| tick.label)
        .collect();
    assert_eq!(labels, ["$0", "$20", "$40"]);
}

#[test]
fn unknown_group_empties_the_chart_without_error() {
    let (mut engine, clock) = loaded_engine();

    let summary = engine.select_group("Atlantis").expect("pipeline ran");
    assert_eq!(summary.exited.len(), 5);
    assert!(engine.ranked_set().is_empty());

    clock.set(1_500.0);
    engine.advance();
    assert!(engine.bars().is_empty());

    let frame = engine.build_render_frame();
    assert!(frame.rects.is_empty());
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "$0");
}

#[test]
fn failed_reload_keeps_the_previous_dataset() {
    let (mut engine, _clock) = loaded_engine();

    let err = engine.load_dataset_from_reader("Area,Item\nUSA,Wheat\n".as_bytes());
    assert!(err.is_err());
    assert!(engine.is_loaded());
    assert_eq!(engine.dataset().map(Dataset::len), Some(7));
    assert_eq!(engine.ranked_set().len(), 5);
}

#[test]
fn installing_a_dataset_directly_runs_the_pipeline() {
    let (mut engine, _clock) = engine();
    let dataset = Dataset::new(vec![
        Row::new("Wheat", "USA", 3.0).expect("row"),
        Row::new("Corn", "USA", 4.0).expect("row"),
    ]);

    let summary = engine.set_dataset(dataset).expect("pipeline ran");
    assert_eq!(summary.entered, ["Corn", "Wheat"]);
    assert_eq!(engine.scales().map(|s| s.value.domain()), Some((0.0, 4.0)));
}

#[test]
fn reselecting_the_current_group_changes_nothing() {
    let (mut engine, _clock) = loaded_engine();
    let before = engine.bars();

    let summary = engine.select_group("USA").expect("pipeline ran");
    assert!(summary.is_noop());
    assert_eq!(engine.bars(), before);
    assert!(!engine.is_animating());
}

#[test]
fn invalid_viewport_fails_engine_construction() {
    let config = ChartEngineConfig::new(Viewport::new(0, 480));
    assert!(ChartEngine::new(NullRenderer::default(), config).is_err());

    let cramped = ChartEngineConfig::new(Viewport::new(100, 40));
    assert!(ChartEngine::new(NullRenderer::default(), cramped).is_err());
}

use approx::assert_abs_diff_eq;
use barchart_rs::animation::{Easing, Transition};
use barchart_rs::core::{ChartScales, DEFAULT_BAND_PADDING, RankedSet, Row, build_scales, rank};
use barchart_rs::scene::{BarPhase, DEFAULT_BAR_TRANSITION_MS, SceneReconciler};

const BODY_WIDTH: f64 = 660.0;
const BODY_HEIGHT: f64 = 640.0;

fn scenario_rows() -> Vec<Row> {
    [
        ("Wheat", "USA", 100.0),
        ("Corn", "USA", 80.0),
        ("Rice", "USA", 60.0),
        ("Soy", "USA", 40.0),
        ("Barley", "USA", 20.0),
        ("Oats", "USA", 10.0),
        ("Wheat", "Canada", 50.0),
    ]
    .into_iter()
    .map(|(category, group, value)| Row::new(category, group, value).expect("valid row"))
    .collect()
}

fn select(group: &str) -> (RankedSet, ChartScales) {
    let ranked = rank(&scenario_rows(), group, 5);
    let scales =
        build_scales(&ranked, BODY_WIDTH, BODY_HEIGHT, DEFAULT_BAND_PADDING).expect("scales");
    (ranked, scales)
}

fn transition_at(start_ms: f64) -> Transition {
    Transition::new(start_ms, DEFAULT_BAR_TRANSITION_MS)
}

fn assert_converged(scene: &SceneReconciler, ranked: &RankedSet, scales: &ChartScales, now: f64) {
    assert_eq!(scene.len(), ranked.len());
    for row in ranked.iter() {
        let bar = scene.bar(row.category()).expect("bar for ranked category");
        let geometry = bar.geometry_at(now);
        assert_eq!(bar.phase(), BarPhase::Settled);
        assert_abs_diff_eq!(geometry.width, scales.length(row.value()), epsilon = 1e-9);
        assert_abs_diff_eq!(
            geometry.position,
            scales.position(row.category()).expect("band"),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(geometry.height, scales.category.bandwidth(), epsilon = 1e-9);
    }
}

#[test]
fn first_pass_enters_every_ranked_category() {
    let (ranked, scales) = select("USA");
    let mut scene = SceneReconciler::new();

    let summary = scene.reconcile(&ranked, &scales, transition_at(0.0));
    assert_eq!(summary.entered, ["Wheat", "Corn", "Rice", "Soy", "Barley"]);
    assert!(summary.updated.is_empty());
    assert!(summary.exited.is_empty());

    let wheat = scene.bar("Wheat").expect("wheat").geometry_at(0.0);
    assert_eq!(wheat.phase, BarPhase::Entering);
    assert_eq!(wheat.width, 0.0);
    assert_abs_diff_eq!(wheat.position, scales.position("Wheat").expect("band"));

    scene.advance(DEFAULT_BAR_TRANSITION_MS);
    assert_converged(&scene, &ranked, &scales, DEFAULT_BAR_TRANSITION_MS);
    assert!(!scene.is_animating(DEFAULT_BAR_TRANSITION_MS));
}

#[test]
fn entering_width_grows_monotonically() {
    let (ranked, scales) = select("USA");
    let mut scene = SceneReconciler::new();
    scene.reconcile(
        &ranked,
        &scales,
        transition_at(0.0).with_easing(Easing::CubicOut),
    );

    let bar = scene.bar("Corn").expect("corn");
    let mut previous = -1.0;
    for step in 0..=14 {
        let width = bar.geometry_at(step as f64 * 50.0).width;
        assert!(width >= previous);
        previous = width;
    }
    assert_abs_diff_eq!(previous, 528.0, epsilon = 1e-9);
}

#[test]
fn switching_to_canada_leaves_exactly_one_wheat_bar() {
    let (usa, usa_scales) = select("USA");
    let (canada, canada_scales) = select("Canada");
    let mut scene = SceneReconciler::new();

    scene.reconcile(&usa, &usa_scales, transition_at(0.0));
    scene.advance(700.0);

    let summary = scene.reconcile(&canada, &canada_scales, transition_at(700.0));
    assert!(summary.entered.is_empty());
    assert_eq!(summary.updated, ["Wheat"]);
    assert_eq!(summary.exited, ["Corn", "Rice", "Soy", "Barley"]);

    // Mid-transition every exiting bar still exists and is shrinking.
    assert!(scene.advance(1_050.0).is_empty());
    assert_eq!(scene.len(), 5);
    let corn = scene.bar("Corn").expect("corn").geometry_at(1_050.0);
    assert_eq!(corn.phase, BarPhase::Exiting);
    assert!(corn.width > 0.0 && corn.width < 528.0);
    assert_abs_diff_eq!(corn.position, usa_scales.position("Corn").expect("band"));

    let mut removed = scene.advance(1_400.0);
    removed.sort();
    assert_eq!(removed, ["Barley", "Corn", "Rice", "Soy"]);
    assert_converged(&scene, &canada, &canada_scales, 1_400.0);

    let wheat = scene.bar("Wheat").expect("wheat");
    assert_eq!(wheat.value(), 50.0);
    assert_abs_diff_eq!(wheat.geometry_at(1_400.0).width, BODY_WIDTH, epsilon = 1e-9);
}

#[test]
fn reentry_before_exit_completes_revives_the_same_bar() {
    let (usa, usa_scales) = select("USA");
    let (canada, canada_scales) = select("Canada");
    let mut scene = SceneReconciler::new();

    scene.reconcile(&usa, &usa_scales, transition_at(0.0));
    scene.advance(700.0);
    scene.reconcile(&canada, &canada_scales, transition_at(700.0));
    scene.advance(1_000.0);

    let summary = scene.reconcile(&usa, &usa_scales, transition_at(1_000.0));
    assert!(summary.entered.is_empty());
    assert_eq!(summary.reentered, ["Corn", "Rice", "Soy", "Barley"]);
    assert_eq!(scene.len(), 5);

    // The stale exit deadline passes without removing revived bars.
    assert!(scene.advance(1_400.0).is_empty());
    assert_eq!(scene.len(), 5);

    scene.advance(1_700.0);
    assert_converged(&scene, &usa, &usa_scales, 1_700.0);
}

#[test]
fn reentry_after_exit_completes_creates_a_fresh_bar() {
    let (usa, usa_scales) = select("USA");
    let (canada, canada_scales) = select("Canada");
    let mut scene = SceneReconciler::new();

    scene.reconcile(&usa, &usa_scales, transition_at(0.0));
    scene.advance(700.0);
    scene.reconcile(&canada, &canada_scales, transition_at(700.0));
    scene.advance(1_400.0);
    assert_eq!(scene.len(), 1);

    let summary = scene.reconcile(&usa, &usa_scales, transition_at(1_400.0));
    assert_eq!(summary.entered, ["Corn", "Rice", "Soy", "Barley"]);
    assert_eq!(summary.updated, ["Wheat"]);
    assert!(summary.reentered.is_empty());

    scene.advance(2_100.0);
    assert_converged(&scene, &usa, &usa_scales, 2_100.0);
}

#[test]
fn reconciling_the_same_set_twice_is_a_noop() {
    let (usa, usa_scales) = select("USA");
    let mut scene = SceneReconciler::new();

    scene.reconcile(&usa, &usa_scales, transition_at(0.0));
    scene.advance(700.0);
    let before = scene.bars_at(700.0);

    let summary = scene.reconcile(&usa, &usa_scales, transition_at(700.0));
    assert!(summary.is_noop());
    assert_eq!(summary.unchanged.len(), 5);
    assert_eq!(scene.bars_at(700.0), before);
    assert!(!scene.is_animating(700.0));
}

#[test]
fn empty_ranked_set_exits_every_bar() {
    let (usa, usa_scales) = select("USA");
    let (nowhere, nowhere_scales) = select("Atlantis");
    let mut scene = SceneReconciler::new();

    scene.reconcile(&usa, &usa_scales, transition_at(0.0));
    scene.advance(700.0);
    let summary = scene.reconcile(&nowhere, &nowhere_scales, transition_at(700.0));
    assert_eq!(summary.exited.len(), 5);
    assert!(scene.is_animating(1_000.0));

    scene.advance(1_400.0);
    assert!(scene.is_empty());
    assert!(!scene.is_animating(1_400.0));
}

#[test]
fn interrupted_update_restarts_from_sampled_geometry() {
    let (usa, usa_scales) = select("USA");
    let (canada, canada_scales) = select("Canada");
    let mut scene = SceneReconciler::new();

    scene.reconcile(&usa, &usa_scales, transition_at(0.0));
    scene.advance(700.0);
    scene.reconcile(&canada, &canada_scales, transition_at(700.0));

    let sampled = scene.bar("Wheat").expect("wheat").geometry_at(1_000.0);
    scene.reconcile(&usa, &usa_scales, transition_at(1_000.0));
    let restarted = scene.bar("Wheat").expect("wheat").geometry_at(1_000.0);

    assert_abs_diff_eq!(restarted.position, sampled.position, epsilon = 1e-9);
    assert_abs_diff_eq!(restarted.height, sampled.height, epsilon = 1e-9);
    assert_abs_diff_eq!(restarted.width, sampled.width, epsilon = 1e-9);
}

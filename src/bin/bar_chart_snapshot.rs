//! Headless driver: loads a dataset, replays group selections on a manual
//! clock and prints the resting engine snapshot as JSON.
//!
//! usage: bar_chart_snapshot --input <csv> [--config <json>] [--group <name>]...
//!        [--png <path>]

use std::fs;
use std::path::PathBuf;

use barchart_rs::ChartEngineConfig;
use barchart_rs::animation::ManualClock;
use barchart_rs::api::ChartEngine;
use barchart_rs::render::Renderer;

const USAGE: &str = "usage: bar_chart_snapshot --input <csv> [--config <json>] [--group <name>]... [--png <path>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    groups: Vec<String>,
    png: Option<PathBuf>,
}

fn main() {
    let _ = barchart_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ChartEngineConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartEngineConfig::default(),
    };

    match &args.png {
        Some(path) => render_png(&args, config, path.clone()),
        None => {
            let renderer = barchart_rs::render::NullRenderer::default();
            let engine = replay(&args, config, renderer)?;
            print_snapshot(&engine)
        }
    }
}

/// Loads the dataset and plays every selection to rest.
fn replay<R: Renderer>(
    args: &CliArgs,
    config: ChartEngineConfig,
    renderer: R,
) -> Result<ChartEngine<R, ManualClock>, String> {
    let settle_ms = config.bar_transition_ms.max(config.axis_transition_ms);
    let clock = ManualClock::new(0.0);
    let mut engine = ChartEngine::with_clock(renderer, config, clock.clone())
        .map_err(|err| err.to_string())?;

    let report = engine
        .load_dataset_from_path(&args.input)
        .map_err(|err| format!("failed to load `{}`: {err}", args.input.display()))?;
    eprintln!(
        "loaded {} rows ({} skipped), {} groups",
        report.rows_loaded,
        report.rows_skipped,
        engine.groups().len()
    );

    clock.advance(settle_ms);
    engine.advance();
    for group in &args.groups {
        engine.select_group(group.clone());
        clock.advance(settle_ms);
        engine.advance();
    }
    engine.render().map_err(|err| err.to_string())?;
    Ok(engine)
}

fn print_snapshot<R: Renderer>(engine: &ChartEngine<R, ManualClock>) -> Result<(), String> {
    let json = engine.snapshot_json_pretty().map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn render_png(args: &CliArgs, config: ChartEngineConfig, path: PathBuf) -> Result<(), String> {
    use barchart_rs::render::CairoRenderer;

    let width = i32::try_from(config.viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(config.viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;
    let renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    let engine = replay(args, config, renderer)?;
    print_snapshot(&engine)?;
    engine
        .renderer()
        .write_png(&path)
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

#[cfg(not(feature = "cairo-backend"))]
fn render_png(_args: &CliArgs, _config: ChartEngineConfig, _path: PathBuf) -> Result<(), String> {
    Err("--png requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut groups = Vec::new();
    let mut png = None::<PathBuf>;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for `{flag}`\n{USAGE}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value()?)),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--group" => groups.push(value()?),
            "--png" => png = Some(PathBuf::from(value()?)),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        config,
        groups,
        png,
    })
}

//! Headless command-line driver.
//!
//! Builds a scene from a CSV source (or a bare tile count), plays a script of
//! arrangements, each one starting when the previous one settles, and prints
//! the final poses.

use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tilemorph_core::Vec3;
use tilemorph_layout::Arrangement;
use tilemorph_runtime::{
    FixedCamera, FixedStepScheduler, FrameScheduler, MAX_FRAME_INTERVAL_MS, RealtimeScheduler,
    RecordingRenderer, RenderLoop, Scene, SceneBuilder, SceneConfig,
};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "tilemorph",
    about = "Morph data-bound tiles between table, sphere, helix and grid arrangements",
    version
)]
pub struct Cli {
    /// CSV file path or http(s) URL of a CSV export, one tile per record.
    #[arg(long, conflicts_with = "tiles")]
    pub data: Option<String>,

    /// Number of blank tiles, when no data source is given.
    #[arg(long)]
    pub tiles: Option<usize>,

    /// Scene config file (TOML, or JSON by extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Comma-separated arrangements to play in order.
    #[arg(long, value_delimiter = ',')]
    pub script: Vec<Arrangement>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Frame step in milliseconds. Defaults to the config frame interval.
    #[arg(long)]
    pub step_ms: Option<f64>,

    /// RNG seed, overriding the config.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pace frames against the wall clock instead of stepping instantly.
    #[arg(long)]
    pub realtime: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Final state of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub tiles: usize,
    pub frames: u64,
    pub redraws: u64,
    /// Number of arrangement switches started.
    pub generation: u64,
    pub arrangement: Option<Arrangement>,
    /// Whether the last arrangement finished before the run ended.
    pub settled: bool,
    pub poses: Vec<TileReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileReport {
    pub index: usize,
    pub title: String,
    pub position: Vec3,
    pub rotation: Vec3,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}

pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let report = execute(cli)?;
    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write_text(&report, out)?;
    }
    Ok(())
}

/// Build the scene, play the script, and collect the final poses.
pub fn execute(cli: &Cli) -> Result<RunReport> {
    let mut config = match &cli.config {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let step_ms = cli.step_ms.unwrap_or(config.frame_interval_ms);
    if !(step_ms > 0.0 && step_ms <= MAX_FRAME_INTERVAL_MS) {
        return Err(CliError::invalid(format!(
            "step must be in (0, {MAX_FRAME_INTERVAL_MS}] milliseconds, got {step_ms}"
        )));
    }

    let mut script: VecDeque<Arrangement> = cli.script.iter().copied().collect();
    if let Some(first) = script.pop_front() {
        config.initial_arrangement = Some(first);
    }

    let builder = SceneBuilder::new(config);
    let builder = match (&cli.data, cli.tiles) {
        (Some(location), _) => {
            let mut source = tilemorph_data::open(location);
            tracing::info!(target: "tilemorph.cli", source = %source.describe(), "loading data");
            builder.dataset(source.load()?)
        }
        (None, Some(count)) => builder.tile_count(count),
        (None, None) => {
            return Err(CliError::invalid("either --data or --tiles is required"));
        }
    };
    let mut scene = builder.build(RecordingRenderer::new(), FixedCamera)?;

    let mut scheduler: Box<dyn FrameScheduler> = if cli.realtime {
        let scheduler = RealtimeScheduler::new(step_ms).frames(cli.frames);
        register_stop_signals(&scheduler)?;
        Box::new(scheduler)
    } else {
        Box::new(FixedStepScheduler::new(0.0, step_ms).frames(cli.frames))
    };

    let summary = RenderLoop::new().run_with(&mut scene, &mut scheduler, |scene, outcome| {
        if outcome.settled.is_some() {
            if let Some(next) = script.pop_front() {
                tracing::info!(
                    target: "tilemorph.cli",
                    arrangement = %next,
                    frame = outcome.frame,
                    "next arrangement"
                );
                scene.select(next)?;
            }
        }
        Ok(())
    })?;

    if !script.is_empty() {
        tracing::warn!(
            target: "tilemorph.cli",
            skipped = script.len(),
            "run ended before the script finished"
        );
    }

    Ok(RunReport {
        tiles: scene.registry().len(),
        frames: summary.frames,
        redraws: summary.redraws,
        generation: scene.transitions().generation(),
        arrangement: scene.transitions().arrangement(),
        settled: !scene.transitions().is_active(),
        poses: tile_reports(&scene),
    })
}

fn tile_reports<R, C>(scene: &Scene<R, C>) -> Vec<TileReport> {
    scene
        .registry()
        .tiles()
        .iter()
        .map(|tile| TileReport {
            index: tile.content().index,
            title: tile.content().title.clone(),
            position: tile.pose().position,
            rotation: tile.pose().rotation,
        })
        .collect()
}

fn write_text(report: &RunReport, out: &mut dyn Write) -> std::io::Result<()> {
    let arrangement = report
        .arrangement
        .map_or_else(|| "none".to_string(), |a| a.to_string());
    writeln!(
        out,
        "{} tiles, {} frames, {} redraws, arrangement {} ({})",
        report.tiles,
        report.frames,
        report.redraws,
        arrangement,
        if report.settled { "settled" } else { "moving" }
    )?;
    for tile in &report.poses {
        let (p, r) = (tile.position, tile.rotation);
        writeln!(
            out,
            "{:>4} {:<24} pos ({:9.2}, {:9.2}, {:9.2}) rot ({:6.3}, {:6.3}, {:6.3})",
            tile.index, tile.title, p.x, p.y, p.z, r.x, r.y, r.z
        )?;
    }
    Ok(())
}

#[cfg(unix)]
fn register_stop_signals(scheduler: &RealtimeScheduler) -> Result<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, scheduler.stop_flag())?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn register_stop_signals(scheduler: &RealtimeScheduler) -> Result<()> {
    signal_hook::flag::register(signal_hook::consts::signal::SIGINT, scheduler.stop_flag())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tilemorph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn script_parses_comma_separated_names() {
        let cli = cli(&["--tiles", "3", "--script", "grid,Sphere, helix"]);
        assert_eq!(
            cli.script,
            vec![Arrangement::Grid, Arrangement::Sphere, Arrangement::Helix]
        );
    }

    #[test]
    fn unknown_arrangement_is_rejected() {
        let parsed = Cli::try_parse_from(["tilemorph", "--tiles", "3", "--script", "cube"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn data_and_tiles_conflict() {
        let parsed = Cli::try_parse_from(["tilemorph", "--tiles", "3", "--data", "x.csv"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_source_is_a_usage_error() {
        let err = execute(&cli(&[])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_step_is_rejected() {
        let err = execute(&cli(&["--tiles", "2", "--step-ms", "0"])).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
    }

    #[test]
    fn oversized_realtime_step_is_rejected() {
        let args = ["--tiles", "3", "--realtime", "--step-ms", "1e300"];
        let err = execute(&cli(&args)).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("invalid argument: step"), "{err}");
    }

    #[test]
    fn script_plays_to_the_end() {
        let report = execute(&cli(&[
            "--tiles", "4", "--seed", "3", "--step-ms", "200", "--frames", "200", "--script",
            "sphere,grid",
        ]))
        .unwrap();
        assert_eq!(report.generation, 2);
        assert_eq!(report.arrangement, Some(Arrangement::Grid));
        assert!(report.settled);
        assert_eq!(report.poses[0].position, Vec3::new(-800.0, 800.0, -4500.0));
    }

    #[test]
    fn text_report_has_one_line_per_tile() {
        let mut out = Vec::new();
        run(&cli(&["--tiles", "3", "--seed", "1", "--frames", "5"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("3 tiles, 5 frames"), "{text}");
        assert!(text.contains("(moving)"), "{text}");
    }
}

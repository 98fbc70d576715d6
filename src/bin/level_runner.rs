//! Headless Level Runner
//!
//! Generates a level, runs one visibility query against it, and prints the
//! result as JSON (for external renderers) or a short text summary.
//!
//! Usage:
//!   cargo run --bin level_runner -- --seed 7 --origin 400,300 --sweep-deg 90

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sightline::core::{LevelConfig, Result, Vec2};
use sightline::visibility::{compute_visibility, VisibilityQuery, VisibilityResult};
use sightline::world::{generate_level, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Headless Level Runner - generate a level and compute one view from it
#[derive(Parser, Debug)]
#[command(name = "level_runner")]
#[command(about = "Generate an occluder level and compute a visibility polygon")]
struct Args {
    /// TOML file with level settings (defaults used for missing keys)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Number of free-floating random walls, overrides the config
    #[arg(long)]
    lines: Option<u32>,

    /// Number of room placement attempts, overrides the config
    #[arg(long)]
    rooms: Option<u32>,

    /// Point of view as "x,y" (defaults to the centre of the play area)
    #[arg(long, value_parser = parse_point)]
    origin: Option<Vec2>,

    /// Facing direction in degrees
    #[arg(long, default_value_t = 0.0)]
    facing_deg: f64,

    /// Field of view in degrees; 360 for all-around vision
    #[arg(long, default_value_t = 360.0)]
    sweep_deg: f64,

    /// Ray range (defaults to the play-area diagonal)
    #[arg(long)]
    max_range: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunOutput<'a> {
    seed: u64,
    origin: Vec2,
    area: f64,
    level: &'a Level,
    visibility: &'a VisibilityResult,
}

fn parse_point(s: &str) -> std::result::Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "sightline=debug" } else { "sightline=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => LevelConfig::load(path)?,
        None => LevelConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(lines) = args.lines {
        config.line_count = lines;
    }
    if let Some(rooms) = args.rooms {
        config.room_iterations = rooms;
    }

    let level = generate_level(&config)?;
    tracing::info!(
        seed = config.seed,
        rooms = level.room_count(),
        occluders = level.occluders.len(),
        "Level generated"
    );

    let origin = args.origin.unwrap_or_else(|| level.bounds.center());
    let max_range = args.max_range.unwrap_or_else(|| level.diagonal());
    let query = VisibilityQuery::new(origin, &level.occluders, max_range)
        .with_cone(args.facing_deg.to_radians(), args.sweep_deg.to_radians());
    let visibility = compute_visibility(&query)?;
    let area = visibility.area(origin);

    match args.format {
        OutputFormat::Json => {
            let output = RunOutput {
                seed: config.seed,
                origin,
                area,
                level: &level,
                visibility: &visibility,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("=== Level (seed {}) ===", config.seed);
            println!(
                "Play area: ({:.0}, {:.0}) - ({:.0}, {:.0})",
                level.bounds.min_x, level.bounds.min_y, level.bounds.max_x, level.bounds.max_y
            );
            println!("Rooms: {}", level.room_count());
            println!("Occluders: {}", level.occluders.len());
            println!();
            println!("=== View from ({:.1}, {:.1}) ===", origin.x, origin.y);
            println!("Rays cast: {}", visibility.rays.len());
            println!("Outline points: {}", visibility.len());
            println!("Visible area: {:.1}", area);
            if let Some(avg) = visibility.average_point() {
                println!("Average visible point: ({:.1}, {:.1})", avg.x, avg.y);
            }
        }
    }

    Ok(())
}

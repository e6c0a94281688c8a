use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use dungeon_core::{Map, MapPoint, MapSettings};
use serde::Serialize;
use tools::{init_logging, render_ascii};

/// Generate a map and print its tiles, a summary and its snapshot hash.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML settings file; the four-corner preset is used when absent
    #[arg(short = 'f', long)]
    settings: Option<PathBuf>,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(short, long)]
    unit_size: Option<usize>,
    /// Waypoint as `x,y` or `x,y,label`; repeat to replace the preset points
    #[arg(short, long = "point", value_parser = parse_point)]
    points: Vec<MapPoint>,
    /// Branch chances per depth, e.g. `50,30,20,10`
    #[arg(short, long, value_delimiter = ',')]
    doors: Option<Vec<u32>>,
    /// Skip the tile dump
    #[arg(long)]
    no_ascii: bool,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    width: usize,
    height: usize,
    unit_size: usize,
    rooms_placed: usize,
    rooms_connected: usize,
    waypoints: Vec<WaypointSummary>,
    spine: Vec<u32>,
    floor_tiles: usize,
    door_tiles: usize,
    collisions: usize,
    snapshot_hash: u64,
}

#[derive(Serialize)]
struct WaypointSummary {
    room: u32,
    x: usize,
    y: usize,
    label: Option<String>,
}

fn parse_point(raw: &str) -> Result<MapPoint, String> {
    let mut parts = raw.splitn(3, ',');
    let mut coordinate = |name: &str| -> Result<f32, String> {
        parts
            .next()
            .ok_or_else(|| format!("missing {name} in `{raw}`"))?
            .trim()
            .parse()
            .map_err(|error| format!("bad {name} in `{raw}`: {error}"))
    };
    let x = coordinate("x")?;
    let y = coordinate("y")?;
    Ok(match parts.next() {
        Some(label) => MapPoint::labelled(x, y, label.trim()),
        None => MapPoint::new(x, y),
    })
}

fn build_settings(args: &Args) -> Result<MapSettings> {
    let mut settings = match &args.settings {
        Some(path) => MapSettings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => MapSettings::four_corners(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(unit_size) = args.unit_size {
        settings.unit_size = unit_size;
    }
    if !args.points.is_empty() {
        settings.map_points = args.points.clone();
    }
    if let Some(doors) = &args.doors {
        settings.door_percentages = doors.clone();
    }
    Ok(settings)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let settings = build_settings(&args)?;

    let mut map = Map::new(settings);
    let report = map.generate().context("Map generation failed")?;
    let (Some(layout), Some(snapshot_hash)) = (map.layout(), map.snapshot_hash()) else {
        bail!("generation succeeded but left no layout");
    };

    let summary = Summary {
        seed: report.seed,
        width: map.actual_width(),
        height: map.actual_height(),
        unit_size: map.settings().unit_size,
        rooms_placed: report.rooms_placed,
        rooms_connected: report.rooms_connected,
        waypoints: layout
            .waypoints
            .iter()
            .filter_map(|&id| {
                layout.room(id).map(|room| WaypointSummary {
                    room: id.0,
                    x: room.x,
                    y: room.y,
                    label: room.label.clone(),
                })
            })
            .collect(),
        spine: layout.spine.iter().map(|id| id.0).collect(),
        floor_tiles: report.floor_tiles,
        door_tiles: report.door_tiles,
        collisions: report.collisions,
        snapshot_hash,
    };

    if !args.no_ascii {
        print!("{}", render_ascii(&map));
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Seed: {}", summary.seed);
    println!("Tiles: {}x{} (unit {})", summary.width, summary.height, summary.unit_size);
    println!("Rooms: {} placed, {} connected", summary.rooms_placed, summary.rooms_connected);
    for waypoint in &summary.waypoints {
        let label = waypoint.label.as_deref().unwrap_or("-");
        println!("Waypoint #{} at ({}, {}) {}", waypoint.room, waypoint.x, waypoint.y, label);
    }
    println!("Spine length: {}", summary.spine.len());
    println!("Doors: {}  Collisions: {}", summary.door_tiles, summary.collisions);
    println!("Snapshot Hash: {}", summary.snapshot_hash);
    Ok(())
}

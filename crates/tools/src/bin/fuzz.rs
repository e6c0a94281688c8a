use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::{GeneratedMap, MapSettings, TileType, generate_layout};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::init_logging;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of maps to generate
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    /// Largest grid side to sample, in room-units
    #[arg(long, default_value_t = 40)]
    max_side: usize,
}

fn pick(rng: &mut ChaCha8Rng, min_value: usize, max_value: usize) -> usize {
    min_value + (rng.next_u64() as usize % (max_value - min_value + 1))
}

fn check_invariants(map: &GeneratedMap) -> Result<(), String> {
    let layout = &map.layout;
    for (index, left) in layout.rooms.iter().enumerate() {
        if left.max_x() > layout.width || left.max_y() > layout.height {
            return Err(format!("room {} leaves the grid", left.id));
        }
        for right in &layout.rooms[index + 1..] {
            if left.bounds().overlaps(right.bounds()) {
                return Err(format!("rooms {} and {} overlap", left.id, right.id));
            }
        }
    }

    for room in layout.connected_rooms() {
        for door in &room.doors {
            if !layout.room(door.to).is_some_and(|other| other.has_door_to(room.id)) {
                return Err(format!("door {} -> {} is one-sided", room.id, door.to));
            }
        }
    }

    let mut reached = BTreeSet::new();
    let mut stack: Vec<_> = layout.waypoints.first().copied().into_iter().collect();
    while let Some(id) = stack.pop() {
        if !reached.insert(id) {
            continue;
        }
        if let Some(room) = layout.room(id) {
            stack.extend(room.doors.iter().map(|door| door.to));
        }
    }
    if let Some(cut_off) = layout.waypoints.iter().find(|id| !reached.contains(*id)) {
        return Err(format!("waypoint {cut_off} is not reachable through doors"));
    }

    if map.tiles.count(TileType::Debug) > 0 {
        return Err(format!("{} colliding tiles", map.report.collisions));
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let max_side = args.max_side.max(8);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("Starting map fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    for run in 0..args.runs {
        let settings = MapSettings {
            width: pick(&mut rng, 8, max_side),
            height: pick(&mut rng, 8, max_side),
            unit_size: pick(&mut rng, 1, 5),
            ..MapSettings::four_corners()
        }
        .with_seed(rng.next_u64());

        let map = match generate_layout(&settings) {
            Ok(map) => map,
            Err(error) => bail!("run {run}: generation failed for {settings:?}: {error}"),
        };
        if let Err(reason) = check_invariants(&map) {
            bail!("run {run}: invariant failed for {settings:?}: {reason}");
        }
        info!(run, seed = settings.seed, rooms = map.report.rooms_connected, "run passed");
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

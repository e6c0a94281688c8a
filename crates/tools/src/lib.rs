//! Shared helpers for the map inspection binaries.

use std::io;

use dungeon_core::{Map, TileType};
use tracing::subscriber;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_subscriber =
        FmtSubscriber::builder().with_env_filter(filter).with_writer(io::stderr).finish();
    let _ = subscriber::set_global_default(fmt_subscriber);
}

/// One character per tile, north at the top.
pub fn render_ascii(map: &Map) -> String {
    let Some(tiles) = map.tiles() else {
        return String::new();
    };
    let mut out = String::with_capacity((tiles.width() + 1) * tiles.height());
    for y in (0..tiles.height() as i32).rev() {
        for x in 0..tiles.width() as i32 {
            out.push(match map.tile_at(x, y).map(|tile| tile.kind) {
                None => ' ',
                Some(TileType::Floor) => '.',
                Some(TileType::Wall) => '#',
                Some(TileType::Door) => '+',
                Some(TileType::Debug) => '!',
            });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use dungeon_core::{Map, MapSettings};

    use super::render_ascii;

    #[test]
    fn ascii_dump_has_one_line_per_tile_row() {
        let settings =
            MapSettings { width: 8, height: 6, unit_size: 2, ..MapSettings::four_corners() };
        let mut map = Map::new(settings);
        map.generate().expect("generation");

        let dump = render_ascii(&map);
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|line| line.chars().count() == 16));
        assert!(dump.contains('+'));
        assert!(!dump.contains('!'));
    }

    #[test]
    fn ungenerated_map_renders_nothing() {
        assert!(render_ascii(&Map::new(MapSettings::default())).is_empty());
    }
}

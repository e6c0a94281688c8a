use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use dungeon_core::mapgen::{Pathfinder, RoomGraph};
use dungeon_core::{
    GenerateError, MAX_RETRY_ATTEMPTS, Map, MapPoint, MapSettings, PathError, Room, RoomId,
    TileEdgeKind, TileType,
};

fn reference_settings() -> MapSettings {
    MapSettings {
        width: 16,
        height: 16,
        unit_size: 3,
        seed: 1,
        map_points: vec![
            MapPoint::labelled(0.2, 0.2, "Start"),
            MapPoint::new(0.8, 0.2),
            MapPoint::new(0.8, 0.8),
            MapPoint::labelled(0.2, 0.8, "Goal"),
        ],
        door_percentages: vec![50, 30, 20, 10],
    }
}

#[test]
fn test_reference_map_generates_cleanly() {
    let mut map = Map::new(reference_settings());
    let report = map.generate().expect("reference settings must generate");

    assert_eq!(report.collisions, 0);
    assert!(report.rooms_connected >= 4);
    assert!(report.door_tiles > 0);

    let tiles = map.tiles().expect("tiles after generation");
    assert_eq!((tiles.width(), tiles.height()), (48, 48));
    assert_eq!(tiles.count(TileType::Debug), 0);
    assert_eq!(tiles.count(TileType::Door), report.door_tiles);
}

#[test]
fn test_door_tile_count_matches_the_grid_at_every_unit_size() {
    for unit_size in 1..=3 {
        for seed in 1..=6 {
            let settings = MapSettings { unit_size, seed, ..reference_settings() };
            let mut map = Map::new(settings);
            let report = map.generate().expect("generation");
            let tiles = map.tiles().expect("tiles");
            assert_eq!(
                tiles.count(TileType::Door),
                report.door_tiles,
                "unit size {unit_size}, seed {seed}"
            );
        }
    }
}

#[test]
fn test_reference_map_links_waypoints_through_doors() {
    let mut map = Map::new(reference_settings());
    map.generate().expect("generation");
    let layout = map.layout().expect("layout");

    let start = layout.waypoints[0];
    let mut reached = BTreeSet::from([start]);
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        for door in &layout.room(id).expect("room").doors {
            let other = layout.room(door.to).expect("room");
            assert!(other.has_door_to(id), "door {id} -> {} is one-sided", door.to);
            if reached.insert(door.to) {
                stack.push(door.to);
            }
        }
    }

    for waypoint in &layout.waypoints {
        assert!(reached.contains(waypoint), "waypoint {waypoint} is cut off");
    }
    let start_room = layout.room(layout.waypoints[0]).expect("start");
    assert_eq!(start_room.label.as_deref(), Some("Start"));
    let goal_room = layout.room(layout.waypoints[3]).expect("goal");
    assert_eq!(goal_room.label.as_deref(), Some("Goal"));
    assert!(layout.room(RoomId(0)).is_none());
    assert!(layout.room(RoomId(u32::MAX)).is_none());
}

#[test]
fn test_door_tiles_open_the_matching_edge() {
    let mut map = Map::new(reference_settings());
    map.generate().expect("generation");
    let tiles = map.tiles().expect("tiles");

    for tile in tiles.iter().filter(|tile| tile.kind == TileType::Door) {
        assert!(
            tile.edges.iter().any(|edge| edge.kind == TileEdgeKind::Door),
            "door tile at {:?} has no open edge",
            tile.pos
        );
    }
}

#[test]
fn test_zero_width_grid_fails_and_leaves_map_empty() {
    let mut map = Map::new(MapSettings { width: 0, ..reference_settings() });

    let result = map.generate();

    assert!(matches!(
        result,
        Err(GenerateError::PlacementExhausted { waypoint: 0, attempts: MAX_RETRY_ATTEMPTS })
    ));
    assert!(!map.is_generated());
    assert!(map.snapshot_hash().is_none());
}

#[test]
fn test_single_map_point_fails_with_too_few_waypoints() {
    let settings = MapSettings { map_points: vec![MapPoint::new(0.5, 0.5)], ..reference_settings() };
    let mut map = Map::new(settings);

    let result = map.generate();

    assert!(matches!(result, Err(GenerateError::Path(PathError::TooFewWaypoints { count: 1 }))));
}

#[test]
fn test_path_between_rejects_short_waypoint_lists() {
    let rooms: Vec<Room> = Vec::new();
    let graph = RoomGraph::build(&rooms);
    let pathfinder = Pathfinder::new(&graph, &rooms);

    assert_eq!(
        pathfinder.path_between(&[RoomId(1)]),
        Err(PathError::TooFewWaypoints { count: 1 })
    );
}

#[test]
fn test_tile_lookup_is_bounds_checked() {
    let mut map = Map::new(reference_settings());
    map.generate().expect("generation");

    assert!(map.tile_at(-1, 0).is_none());
    assert!(map.tile_at(0, -1).is_none());
    assert!(map.tile_at(48, 0).is_none());
    assert!(map.tile_at(0, 48).is_none());

    let first = map.tiles().and_then(|tiles| tiles.iter().next()).expect("a tile").pos;
    assert_eq!(map.tile_at(first.x, first.y).map(|tile| tile.pos), Some(first));
}

#[test]
fn test_map_level_listener_hears_every_tile() {
    let mut map = Map::new(reference_settings());
    map.generate().expect("generation");
    let heard = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&heard);
    map.subscribe_tile_changes(move |tile| sink.borrow_mut().push(tile.pos));

    let positions: Vec<_> =
        map.tiles().expect("tiles").iter().take(3).map(|tile| tile.pos).collect();
    for pos in &positions {
        map.set_tile_kind(pos.x, pos.y, TileType::Wall);
    }

    assert_eq!(*heard.borrow(), positions);
}

#[test]
fn test_regeneration_drops_tile_listeners_and_announces_rebuild_once() {
    let mut map = Map::new(reference_settings());
    map.generate().expect("generation");
    let pos = map.tiles().and_then(|tiles| tiles.iter().next()).expect("a tile").pos;

    let tile_hits = Rc::new(RefCell::new(0));
    let tile_sink = Rc::clone(&tile_hits);
    map.subscribe_tile(pos.x, pos.y, move |_| *tile_sink.borrow_mut() += 1).expect("tile exists");

    let rebuilds = Rc::new(RefCell::new(Vec::new()));
    let rebuild_sink = Rc::clone(&rebuilds);
    map.subscribe_rebuilt(move |report| rebuild_sink.borrow_mut().push(report.seed));

    map.regenerate(reference_settings().with_seed(2)).expect("regeneration");
    if map.tile_at(pos.x, pos.y).is_some() {
        map.set_tile_kind(pos.x, pos.y, TileType::Debug);
    }

    assert_eq!(*tile_hits.borrow(), 0);
    assert_eq!(*rebuilds.borrow(), vec![2]);
}

#[test]
fn test_unsubscribed_listener_is_not_called() {
    let mut map = Map::new(reference_settings());
    let rebuilds = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&rebuilds);
    let id = map.subscribe_rebuilt(move |_| *sink.borrow_mut() += 1);

    map.generate().expect("first");
    assert!(map.unsubscribe(id));
    map.generate().expect("second");

    assert_eq!(*rebuilds.borrow(), 1);
}

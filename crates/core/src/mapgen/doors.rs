//! Door placement along the route and probabilistic branch rooms hanging off it.

use std::collections::{BTreeSet, VecDeque};

use tracing::warn;

use crate::types::{Rect, RoomId};

use super::model::{Door, Room};
use super::seed::MapRng;

#[derive(Default)]
struct ConnectedRooms {
    order: Vec<RoomId>,
    members: BTreeSet<RoomId>,
}

impl ConnectedRooms {
    fn insert(&mut self, id: RoomId) -> bool {
        let inserted = self.members.insert(id);
        if inserted {
            self.order.push(id);
        }
        inserted
    }

    fn contains(&self, id: RoomId) -> bool {
        self.members.contains(&id)
    }
}

/// Walks the spine, joining consecutive rooms with doors and attaching branch
/// rooms. Returns the final room set in the order rooms joined it.
pub(super) fn connect_rooms(
    rooms: &mut [Room],
    spine: &[RoomId],
    door_percentages: &[u32],
    rng: &mut MapRng,
) -> Vec<RoomId> {
    let on_spine: BTreeSet<RoomId> = spine.iter().copied().collect();
    let mut connected = ConnectedRooms::default();

    for (position, &current) in spine.iter().enumerate() {
        if let Some(&next) = spine.get(position + 1) {
            add_door_between(rooms, current, next);
        }
        connected.insert(current);
        attach_branches(rooms, current, &on_spine, door_percentages, &mut connected, rng);
    }

    connected.order
}

/// Breadth-first over neighbours, one depth level per entry in `door_percentages`.
/// A roll is drawn for every neighbour visited, attached or not.
///
/// Spine rooms are never attached here, even before the walk reaches them;
/// only consecutive spine pairs get doors between spine rooms.
fn attach_branches(
    rooms: &mut [Room],
    origin: RoomId,
    on_spine: &BTreeSet<RoomId>,
    door_percentages: &[u32],
    connected: &mut ConnectedRooms,
    rng: &mut MapRng,
) {
    if door_percentages.is_empty() {
        return;
    }

    let mut worklist = VecDeque::from([(origin, 0_usize)]);
    while let Some((room, depth)) = worklist.pop_front() {
        let chance = door_percentages[depth];
        let neighbours = rooms[room.index()].neighbours.clone();
        for neighbour in neighbours {
            let roll = rng.percent();
            if roll >= chance || connected.contains(neighbour) || on_spine.contains(&neighbour) {
                continue;
            }
            connected.insert(neighbour);
            add_door_between(rooms, room, neighbour);
            if depth + 1 < door_percentages.len() {
                worklist.push_back((neighbour, depth + 1));
            }
        }
    }
}

/// Records the shared boundary on both rooms, each in its own local coordinates.
fn add_door_between(rooms: &mut [Room], a: RoomId, b: RoomId) {
    if a == b || rooms[a.index()].has_door_to(b) {
        return;
    }
    let Some(shared) = rooms[a.index()].bounds().intersect(rooms[b.index()].bounds()) else {
        warn!(%a, %b, "connected rooms do not touch; door skipped");
        return;
    };

    for (owner, other) in [(a, b), (b, a)] {
        let room = &mut rooms[owner.index()];
        let rect = Rect::new(shared.x - room.x, shared.y - room.y, shared.width, shared.height);
        room.doors.push(Door { rect, to: other });
    }
}

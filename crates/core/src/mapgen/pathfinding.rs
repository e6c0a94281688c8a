//! A* search over the room graph and the multi-waypoint route built from it.
//! The graph decides which transitions exist; step costs are geometric.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::error::PathError;
use crate::types::RoomId;

use super::graph::RoomGraph;
use super::model::Room;

/// Position and size of anything the pathfinder can route through.
pub trait Footprint {
    fn origin(&self) -> (f32, f32);
    fn extent(&self) -> (f32, f32);
}

impl Footprint for Room {
    fn origin(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    fn extent(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

#[derive(Clone, Copy, Debug)]
struct OpenNode {
    f: f32,
    /// Order of first insertion; breaks ties between equal priorities.
    rank: u64,
    index: usize,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.rank.cmp(&other.rank))
            .then(self.index.cmp(&other.index))
    }
}

pub struct Pathfinder<'a, T> {
    graph: &'a RoomGraph,
    nodes: &'a [T],
}

impl<'a, T: Footprint> Pathfinder<'a, T> {
    /// `nodes[id.index()]` must describe the graph node with that id.
    pub fn new(graph: &'a RoomGraph, nodes: &'a [T]) -> Self {
        Self { graph, nodes }
    }

    /// Shortest route from `start` to `goal`, ordered from the goal back to the start.
    pub fn path_to(&self, start: RoomId, goal: RoomId) -> Result<Vec<RoomId>, PathError> {
        let no_path = PathError::NoPath { from: start, to: goal };
        let count = self.nodes.len();
        let (Some(start_index), Some(goal_index)) = (start.checked_index(), goal.checked_index())
        else {
            return Err(no_path);
        };
        if start_index >= count || goal_index >= count {
            return Err(no_path);
        }

        let mut g_score = vec![f32::INFINITY; count];
        let mut came_from: Vec<Option<usize>> = vec![None; count];
        let mut closed = vec![false; count];
        let mut queued: Vec<Option<OpenNode>> = vec![None; count];
        let mut open_set = BTreeSet::new();
        let mut next_rank = 0_u64;

        g_score[start_index] = 0.0;
        let entry =
            OpenNode { f: self.heuristic(start_index, goal_index), rank: 0, index: start_index };
        open_set.insert(entry);
        queued[start_index] = Some(entry);

        while let Some(current) = open_set.pop_first() {
            let index = current.index;
            queued[index] = None;
            if index == goal_index {
                return Ok(reconstruct_path(&came_from, index));
            }
            closed[index] = true;

            let Some(node) = self.graph.node(RoomId::from_index(index)) else {
                continue;
            };
            for edge in &node.edges {
                let next = edge.to.index();
                if next >= count || closed[next] {
                    continue;
                }
                let tentative = g_score[index] + self.step_cost(index, next);
                if tentative >= g_score[next] {
                    continue;
                }

                came_from[next] = Some(index);
                g_score[next] = tentative;
                let rank = match queued[next].take() {
                    Some(stale) => {
                        open_set.remove(&stale);
                        stale.rank
                    }
                    None => {
                        next_rank += 1;
                        next_rank
                    }
                };
                let entry =
                    OpenNode { f: tentative + self.heuristic(next, goal_index), rank, index: next };
                open_set.insert(entry);
                queued[next] = Some(entry);
            }
        }

        Err(no_path)
    }

    /// Route visiting every waypoint in order, first to last. A waypoint shared
    /// by two consecutive segments appears once.
    pub fn path_between(&self, waypoints: &[RoomId]) -> Result<Vec<RoomId>, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooFewWaypoints { count: waypoints.len() });
        }

        let mut route: Vec<RoomId> = Vec::new();
        for pair in waypoints.windows(2) {
            let mut segment = self.path_to(pair[0], pair[1])?;
            segment.reverse();
            let shared = usize::from(!route.is_empty());
            route.extend(segment.into_iter().skip(shared));
        }
        Ok(route)
    }

    /// Distance between top-left corners.
    fn heuristic(&self, from: usize, to: usize) -> f32 {
        distance(self.nodes[from].origin(), self.nodes[to].origin())
    }

    /// Distance between size-adjusted corners (`origin + extent`).
    fn step_cost(&self, from: usize, to: usize) -> f32 {
        distance(far_corner(&self.nodes[from]), far_corner(&self.nodes[to]))
    }
}

fn far_corner<T: Footprint>(node: &T) -> (f32, f32) {
    let (x, y) = node.origin();
    let (width, height) = node.extent();
    (x + width, y + height)
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn reconstruct_path(came_from: &[Option<usize>], goal: usize) -> Vec<RoomId> {
    let mut current = goal;
    let mut result = vec![RoomId::from_index(current)];
    while let Some(previous) = came_from[current] {
        current = previous;
        result.push(RoomId::from_index(current));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: u32, x: usize, y: usize, difficulty: u32, neighbours: &[u32]) -> Room {
        let mut room = Room::placed(RoomId(id), x, y, 1, 1);
        room.difficulty = difficulty;
        room.neighbours = neighbours.iter().map(|&n| RoomId(n)).collect();
        room
    }

    fn ids(raw: &[u32]) -> Vec<RoomId> {
        raw.iter().map(|&id| RoomId(id)).collect()
    }

    /// 1 - 2 - 3 - 4 in a row, plus an isolated room 5.
    fn corridor() -> Vec<Room> {
        vec![
            room(1, 0, 0, 5, &[2]),
            room(2, 1, 0, 5, &[1, 3]),
            room(3, 2, 0, 5, &[2, 4]),
            room(4, 3, 0, 5, &[3]),
            room(5, 6, 0, 5, &[]),
        ]
    }

    /// 1 2 on the bottom row, 3 4 above them.
    fn square(difficulty_of_two: u32) -> Vec<Room> {
        vec![
            room(1, 0, 0, 5, &[2, 3]),
            room(2, 1, 0, difficulty_of_two, &[1, 4]),
            room(3, 0, 1, 5, &[1, 4]),
            room(4, 1, 1, 5, &[2, 3]),
        ]
    }

    #[test]
    fn path_to_runs_from_goal_back_to_start() {
        let rooms = corridor();
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(pathfinder.path_to(RoomId(1), RoomId(4)), Ok(ids(&[4, 3, 2, 1])));
    }

    #[test]
    fn path_to_self_is_a_single_room() {
        let rooms = corridor();
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(pathfinder.path_to(RoomId(2), RoomId(2)), Ok(ids(&[2])));
    }

    #[test]
    fn unreachable_goal_reports_no_path() {
        let rooms = corridor();
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(
            pathfinder.path_to(RoomId(1), RoomId(5)),
            Err(PathError::NoPath { from: RoomId(1), to: RoomId(5) })
        );
    }

    #[test]
    fn equal_priorities_resolve_in_insertion_order() {
        let rooms = square(5);
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(pathfinder.path_to(RoomId(1), RoomId(4)), Ok(ids(&[4, 2, 1])));
    }

    #[test]
    fn zero_difficulty_rooms_cannot_be_entered() {
        let rooms = square(0);
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(pathfinder.path_to(RoomId(1), RoomId(4)), Ok(ids(&[4, 3, 1])));
    }

    #[test]
    fn larger_rooms_are_costed_by_their_far_corner() {
        // Room 2 is a wide detour; the route should prefer the two unit rooms.
        let mut wide = Room::placed(RoomId(2), 1, 0, 4, 1);
        wide.difficulty = 5;
        wide.neighbours = ids(&[1, 5]);
        let rooms = vec![
            room(1, 0, 0, 5, &[2, 3]),
            wide,
            room(3, 0, 1, 5, &[1, 4]),
            room(4, 1, 1, 5, &[3, 5]),
            room(5, 2, 1, 5, &[2, 4]),
        ];
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(pathfinder.path_to(RoomId(1), RoomId(5)), Ok(ids(&[5, 4, 3, 1])));
    }

    #[test]
    fn path_between_joins_segments_in_waypoint_order() {
        let rooms = corridor();
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(
            pathfinder.path_between(&ids(&[1, 3, 4])),
            Ok(ids(&[1, 2, 3, 4])),
            "shared waypoint 3 must appear once"
        );
        assert_eq!(pathfinder.path_between(&ids(&[4, 1])), Ok(ids(&[4, 3, 2, 1])));
    }

    #[test]
    fn reserved_or_foreign_ids_have_no_path() {
        let rooms = corridor();
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(
            pathfinder.path_to(RoomId(0), RoomId(2)),
            Err(PathError::NoPath { from: RoomId(0), to: RoomId(2) })
        );
        assert_eq!(
            pathfinder.path_to(RoomId(1), RoomId(0)),
            Err(PathError::NoPath { from: RoomId(1), to: RoomId(0) })
        );
        assert_eq!(
            pathfinder.path_between(&ids(&[1, 9])),
            Err(PathError::NoPath { from: RoomId(1), to: RoomId(9) })
        );
    }

    #[test]
    fn path_between_can_double_back() {
        let rooms = corridor();
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(pathfinder.path_between(&ids(&[2, 4, 1])), Ok(ids(&[2, 3, 4, 3, 2, 1])));
    }

    #[test]
    fn path_between_needs_two_waypoints() {
        let graph = RoomGraph::build(&[]);
        let pathfinder: Pathfinder<'_, Room> = Pathfinder::new(&graph, &[]);

        assert_eq!(
            pathfinder.path_between(&ids(&[1])),
            Err(PathError::TooFewWaypoints { count: 1 })
        );
        assert_eq!(pathfinder.path_between(&[]), Err(PathError::TooFewWaypoints { count: 0 }));
    }

    #[test]
    fn failing_segment_fails_the_whole_route() {
        let rooms = corridor();
        let graph = RoomGraph::build(&rooms);
        let pathfinder = Pathfinder::new(&graph, &rooms);

        assert_eq!(
            pathfinder.path_between(&ids(&[1, 4, 5])),
            Err(PathError::NoPath { from: RoomId(4), to: RoomId(5) })
        );
    }
}

//! Weighted room graph consumed by the pathfinder.

use crate::types::RoomId;

use super::model::Room;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub to: RoomId,
    pub cost: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphNode {
    pub edges: Vec<GraphEdge>,
}

/// One node per room, indexed like the room arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomGraph {
    nodes: Vec<GraphNode>,
}

impl RoomGraph {
    /// Directed edge from every room to each neighbour, weighted by the
    /// neighbour's difficulty. Neighbours with no cost are left out.
    pub fn build(rooms: &[Room]) -> Self {
        let nodes = rooms
            .iter()
            .map(|room| GraphNode {
                edges: room
                    .neighbours
                    .iter()
                    .map(|&to| GraphEdge { to, cost: rooms[to.index()].difficulty })
                    .filter(|edge| edge.cost > 0)
                    .collect(),
            })
            .collect();
        Self { nodes }
    }

    pub fn node(&self, id: RoomId) -> Option<&GraphNode> {
        self.nodes.get(id.checked_index()?)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: u32, x: usize, difficulty: u32, neighbours: &[u32]) -> Room {
        let mut room = Room::placed(RoomId(id), x, 0, 1, 1);
        room.difficulty = difficulty;
        room.neighbours = neighbours.iter().map(|&n| RoomId(n)).collect();
        room
    }

    #[test]
    fn edges_carry_the_destination_difficulty() {
        let rooms = vec![room(1, 0, 10, &[2]), room(2, 1, 35, &[1, 3]), room(3, 2, 7, &[2])];
        let graph = RoomGraph::build(&rooms);

        assert_eq!(graph.len(), 3);
        let middle = graph.node(RoomId(2)).expect("node for room 2");
        assert_eq!(
            middle.edges,
            vec![GraphEdge { to: RoomId(1), cost: 10 }, GraphEdge { to: RoomId(3), cost: 7 }]
        );
    }

    #[test]
    fn zero_cost_neighbours_are_excluded() {
        let rooms = vec![room(1, 0, 10, &[2]), room(2, 1, 0, &[1, 3]), room(3, 2, 7, &[2])];
        let graph = RoomGraph::build(&rooms);

        assert!(graph.node(RoomId(1)).expect("node").edges.is_empty());
        assert_eq!(graph.node(RoomId(2)).expect("node").edges.len(), 2);
    }

    #[test]
    fn unknown_room_has_no_node() {
        let graph = RoomGraph::build(&[]);
        assert!(graph.is_empty());
        assert!(graph.node(RoomId(1)).is_none());
        assert!(graph.node(RoomId(0)).is_none());
    }
}

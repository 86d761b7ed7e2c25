//! The immutable bipartite graph shared by every layout of a run.

use std::collections::BTreeSet;

/// Node identifier, unique within one [`Side`].
///
/// Left ids are matrix row indices, right ids are matrix column indices.
pub type NodeId = usize;

/// Which of the two node sets a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Grid column (`x`) occupied by this side.
    pub const fn column(self) -> i32 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Side occupying grid column `x`, if any.
    pub const fn from_column(x: i32) -> Option<Side> {
        match x {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }

    /// Name prefix distinguishing the two id spaces in exported layouts.
    pub const fn prefix(self) -> char {
        match self {
            Side::Left => 'l',
            Side::Right => 'r',
        }
    }

    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A graph node. Its neighborhood is fixed at import.
///
/// Positions are not stored here; they belong to a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    side: Side,
    neighbors: BTreeSet<NodeId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Ids of adjacent nodes on the opposite side.
    pub fn neighbors(&self) -> &BTreeSet<NodeId> {
        &self.neighbors
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// A weighted edge from a left node to a right node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Left node id.
    pub from: NodeId,
    /// Right node id.
    pub to: NodeId,
    /// Edge weight (always > 0). Does not influence the crossing score.
    pub weight: u32,
}

/// Node sets and edge list of a weighted bipartite graph.
///
/// Built once from the adjacency matrix and shared read-only (behind an
/// `Arc`) by every layout derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipartiteGraph {
    left: Vec<Node>,
    right: Vec<Node>,
    edges: Vec<Edge>,
}

impl BipartiteGraph {
    /// Builds a graph with `left_count` and `right_count` nodes.
    ///
    /// Edges keep the given order. Zero-weight edges are dropped, and a
    /// repeated `(from, to)` pair keeps only its first occurrence.
    ///
    /// # Panics
    /// Panics if an edge references a node id outside the given counts.
    pub fn from_edges(
        left_count: usize,
        right_count: usize,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        let mut left: Vec<Node> = (0..left_count)
            .map(|id| Node {
                id,
                side: Side::Left,
                neighbors: BTreeSet::new(),
            })
            .collect();
        let mut right: Vec<Node> = (0..right_count)
            .map(|id| Node {
                id,
                side: Side::Right,
                neighbors: BTreeSet::new(),
            })
            .collect();

        let mut kept = Vec::new();
        for edge in edges {
            assert!(
                edge.from < left_count && edge.to < right_count,
                "edge {}--{} out of range for a {left_count}x{right_count} graph",
                edge.from,
                edge.to
            );
            if edge.weight == 0 {
                continue;
            }
            if left[edge.from].neighbors.insert(edge.to) {
                right[edge.to].neighbors.insert(edge.from);
                kept.push(edge);
            }
        }

        Self {
            left,
            right,
            edges: kept,
        }
    }

    /// Nodes of one side, indexed by id.
    pub fn nodes(&self, side: Side) -> &[Node] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn node_count(&self, side: Side) -> usize {
        self.nodes(side).len()
    }

    /// Edges in import order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Largest node degree on either side.
    pub fn max_degree(&self) -> usize {
        self.left
            .iter()
            .chain(self.right.iter())
            .map(Node::degree)
            .max()
            .unwrap_or(0)
    }
}

//! Layout state: slot assignment per column and the scored/unscored split.
//!
//! A [`LayoutDraft`] can be edited but carries no score. Committing it runs
//! the crossing scorer once and yields an immutable [`BipartiteLayout`],
//! so a score can never be read while it is stale.

use super::graph::{BipartiteGraph, NodeId, Side};
use super::score::crossing_count;
use crate::geometry::{Position, Segment};
use rand::Rng;
use std::sync::Arc;

/// Slot assignment for one side.
///
/// `slots[y]` is the occupant of slot `y` and `slot_of[id]` is the slot of
/// node `id`. Both vectors are permutations of `0..len` and are only ever
/// changed together through [`Column::swap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Column {
    slots: Vec<NodeId>,
    slot_of: Vec<usize>,
}

impl Column {
    fn identity(len: usize) -> Self {
        Self {
            slots: (0..len).collect(),
            slot_of: (0..len).collect(),
        }
    }

    /// Builds a column from `slots[y] = id`.
    ///
    /// Returns `None` unless `slots` is a permutation of `0..slots.len()`.
    fn from_slots(slots: Vec<NodeId>) -> Option<Self> {
        let mut slot_of = vec![usize::MAX; slots.len()];
        for (y, &id) in slots.iter().enumerate() {
            if id >= slots.len() || slot_of[id] != usize::MAX {
                return None;
            }
            slot_of[id] = y;
        }
        Some(Self { slots, slot_of })
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slot(&self, id: NodeId) -> usize {
        self.slot_of[id]
    }

    fn occupant(&self, y: i32) -> Option<NodeId> {
        usize::try_from(y)
            .ok()
            .and_then(|y| self.slots.get(y).copied())
    }

    /// Exchanges the occupants of slots `a` and `b`.
    fn swap(&mut self, a: usize, b: usize) {
        let (ida, idb) = (self.slots[a], self.slots[b]);
        self.slots.swap(a, b);
        self.slot_of[ida] = b;
        self.slot_of[idb] = a;
    }
}

/// An editable, unscored layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDraft {
    graph: Arc<BipartiteGraph>,
    left: Column,
    right: Column,
}

impl LayoutDraft {
    /// Places every node at the slot equal to its id: left nodes at
    /// `(0, id)`, right nodes at `(1, id)`.
    pub fn initial(graph: Arc<BipartiteGraph>) -> Self {
        let left = Column::identity(graph.node_count(Side::Left));
        let right = Column::identity(graph.node_count(Side::Right));
        Self { graph, left, right }
    }

    /// Builds a draft from explicit slot orders (`order[y] = id`).
    ///
    /// Returns `None` if either order is not a permutation of that side's
    /// node ids.
    pub fn from_orders(
        graph: Arc<BipartiteGraph>,
        left_order: Vec<NodeId>,
        right_order: Vec<NodeId>,
    ) -> Option<Self> {
        if left_order.len() != graph.node_count(Side::Left)
            || right_order.len() != graph.node_count(Side::Right)
        {
            return None;
        }
        let left = Column::from_slots(left_order)?;
        let right = Column::from_slots(right_order)?;
        Some(Self { graph, left, right })
    }

    pub fn graph(&self) -> &Arc<BipartiteGraph> {
        &self.graph
    }

    pub(crate) fn column(&self, side: Side) -> &Column {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn column_mut(&mut self, side: Side) -> &mut Column {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Grid position of a node.
    ///
    /// # Panics
    /// Panics if `id` is not a node of `side`.
    pub fn position(&self, side: Side, id: NodeId) -> Position {
        Position::new(side.column(), self.column(side).slot(id) as i32)
    }

    /// Node occupying a grid cell, if any.
    pub fn occupant(&self, cell: Position) -> Option<(Side, NodeId)> {
        let side = Side::from_column(cell.x)?;
        self.column(side).occupant(cell.y).map(|id| (side, id))
    }

    /// Node ids of one side in slot order (top slot first).
    pub fn order(&self, side: Side) -> &[NodeId] {
        &self.column(side).slots
    }

    /// Exchanges the occupants of two cells on the same side.
    ///
    /// Returns `false` (and changes nothing) if the cells are on different
    /// sides or either cell is empty.
    pub fn swap_cells(&mut self, a: Position, b: Position) -> bool {
        if a.x != b.x {
            return false;
        }
        let Some(side) = Side::from_column(a.x) else {
            return false;
        };
        let column = self.column_mut(side);
        match (column.occupant(a.y), column.occupant(b.y)) {
            (Some(_), Some(_)) => {
                column.swap(a.y as usize, b.y as usize);
                true
            }
            _ => false,
        }
    }

    /// Segment drawn for every edge, in edge order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.graph.edges().iter().map(move |e| {
            Segment::new(
                self.position(Side::Left, e.from),
                self.position(Side::Right, e.to),
            )
        })
    }

    /// Scores the draft and freezes it.
    pub fn commit(self) -> BipartiteLayout {
        let score = crossing_count(&self);
        BipartiteLayout { draft: self, score }
    }
}

/// A scored, immutable layout.
///
/// The score is the number of crossing edge pairs (lower is better) and is
/// always in sync with the positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipartiteLayout {
    draft: LayoutDraft,
    score: u64,
}

impl BipartiteLayout {
    /// Initial layout of a freshly imported graph (see [`LayoutDraft::initial`]).
    pub fn initial(graph: Arc<BipartiteGraph>) -> Self {
        LayoutDraft::initial(graph).commit()
    }

    /// Number of crossing edge pairs.
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn graph(&self) -> &Arc<BipartiteGraph> {
        self.draft.graph()
    }

    pub fn position(&self, side: Side, id: NodeId) -> Position {
        self.draft.position(side, id)
    }

    pub fn occupant(&self, cell: Position) -> Option<(Side, NodeId)> {
        self.draft.occupant(cell)
    }

    pub fn order(&self, side: Side) -> &[NodeId] {
        self.draft.order(side)
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.draft.segments()
    }

    /// Editable copy of this layout. The parent is left untouched.
    pub fn to_draft(&self) -> LayoutDraft {
        self.draft.clone()
    }

    /// Returns a scored child produced by [`LayoutDraft::mutate`].
    pub fn mutate<R: Rng>(&self, resistance: u8, rng: &mut R) -> BipartiteLayout {
        let mut child = self.to_draft();
        child.mutate(resistance, rng);
        child.commit()
    }
}

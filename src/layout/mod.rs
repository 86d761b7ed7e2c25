//! Bipartite graph model, two-column layouts, scoring and mutation.
//!
//! # Key Types
//!
//! - [`BipartiteGraph`]: node sets and weighted edges, fixed after import
//! - [`LayoutDraft`]: editable slot assignment without a score
//! - [`BipartiteLayout`]: committed layout with its crossing score
//!
//! A layout assigns every node a [`Position`](crate::geometry::Position):
//! left nodes occupy column 0, right nodes column 1, and each column's slots
//! `0..n` hold a permutation of that side's ids. The graph is shared by
//! `Arc`, so cloning a layout only copies the two slot tables.
//!
//! # Submodules
//!
//! - [`score`]: crossing count (Fenwick inversion count and pairwise reference)

mod graph;
mod mutation;
mod placement;
pub mod score;

pub use graph::{BipartiteGraph, Edge, Node, NodeId, Side};
pub use mutation::MAX_RESISTANCE;
pub use placement::{BipartiteLayout, LayoutDraft};

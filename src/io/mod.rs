//! Import and export adapters.
//!
//! - [`matrix`]: comma-separated adjacency matrix input
//! - [`dot`]: GraphViz export of a layout, and re-import of its positions

pub mod dot;
pub mod matrix;

pub use dot::{import_layout, read_positions, render, write_dot, DotExporter, NodePlacement};
pub use matrix::{parse_matrix, AdjacencyMatrix};

//! Comma-separated adjacency matrix import.
//!
//! One matrix row per line: row index = left node id, column index = right
//! node id, non-zero cell = edge weight. Whitespace around tokens and
//! whitespace-only lines are ignored; every other line must have the same
//! number of columns.
//!
//! ```text
//! 1,0,2
//! 0,3,0
//! ```

use crate::error::ParseError;
use crate::layout::{BipartiteGraph, Edge};
use std::str::FromStr;

/// A validated rectangular matrix of edge weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    rows: Vec<Vec<u32>>,
    columns: usize,
}

impl AdjacencyMatrix {
    /// Wraps pre-parsed rows.
    ///
    /// Fails with [`ParseError::Empty`] for no rows and
    /// [`ParseError::RaggedRow`] if row lengths differ (line = row + 1).
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, ParseError> {
        let columns = rows.first().ok_or(ParseError::Empty)?.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(ParseError::RaggedRow {
                line: i + 1,
                expected: columns,
                found: row.len(),
            });
        }
        Ok(Self { rows, columns })
    }

    /// Number of left nodes.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of right nodes.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Weight at `(row, column)`; 0 means no edge.
    pub fn weight(&self, row: usize, column: usize) -> Option<u32> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Non-zero cells as edges, row-major.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.rows.iter().enumerate().flat_map(|(from, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &weight)| weight > 0)
                .map(move |(to, &weight)| Edge { from, to, weight })
        })
    }

    /// Builds the graph: one left node per row, one right node per column.
    pub fn to_graph(&self) -> BipartiteGraph {
        BipartiteGraph::from_edges(self.row_count(), self.column_count(), self.edges())
    }
}

impl FromStr for AdjacencyMatrix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_matrix(s)
    }
}

/// Parses a comma-separated integer matrix.
pub fn parse_matrix(text: &str) -> Result<AdjacencyMatrix, ParseError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();
    let mut columns = None;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;

        let row = line
            .split(',')
            .enumerate()
            .map(|(col, token)| {
                let token = token.trim();
                token.parse::<u32>().map_err(|_| ParseError::InvalidToken {
                    line: line_no,
                    column: col + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;

        let expected = *columns.get_or_insert(row.len());
        if row.len() != expected {
            return Err(ParseError::RaggedRow {
                line: line_no,
                expected,
                found: row.len(),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(AdjacencyMatrix {
        rows,
        columns: columns.unwrap_or(0),
    })
}

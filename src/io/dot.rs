//! # Dot
//!
//! Layouts are exported in the Dot-Format used by [GraphViz](https://graphviz.org/).
//! Node positions are pinned (`pos = "x,y!"`), so the drawing is reproduced
//! as-is by `neato -n` or `fdp`. Left nodes are prefixed `l`, right nodes
//! `r`:
//!
//! ```text
//! graph autograph {
//! // Nodes
//!   l0[color = blue, pos = "0,0!"];
//!   r0[color = red, pos = "1,0!"];
//! // Edges
//!   l0 -- r0[label = "3"];
//! }
//! ```
//!
//! [`read_positions`] parses the node block back, and [`import_layout`]
//! rebuilds a scored layout from it.

use crate::error::ParseError;
use crate::evolution::{Population, Reporter};
use crate::geometry::Position;
use crate::layout::{BipartiteGraph, BipartiteLayout, LayoutDraft, NodeId, Side};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Writes `layout` in Dot-Format to `writer`.
///
/// Nodes are written left side first, each side in id order; edges follow
/// in import order.
pub fn write_dot<W: Write>(layout: &BipartiteLayout, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "graph autograph {{")?;
    writeln!(writer, "// Nodes")?;
    for side in Side::BOTH {
        let color = match side {
            Side::Left => "blue",
            Side::Right => "red",
        };
        for node in layout.graph().nodes(side) {
            writeln!(
                writer,
                "  {}[color = {color}, pos = \"{}!\"];",
                node_name(side, node.id()),
                layout.position(side, node.id())
            )?;
        }
    }
    writeln!(writer, "// Edges")?;
    for edge in layout.graph().edges() {
        writeln!(
            writer,
            "  {} -- {}[label = \"{}\"];",
            node_name(Side::Left, edge.from),
            node_name(Side::Right, edge.to),
            edge.weight
        )?;
    }
    writeln!(writer, "}}")
}

/// Renders `layout` in Dot-Format.
pub fn render(layout: &BipartiteLayout) -> String {
    let mut buf = Vec::new();
    write_dot(layout, &mut buf).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("dot output is ASCII")
}

fn node_name(side: Side, id: NodeId) -> String {
    format!("{}{id}", side.prefix())
}

/// A node declaration read back from a Dot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePlacement {
    pub side: Side,
    pub id: NodeId,
    pub position: Position,
    /// 1-based line of the declaration.
    pub line: usize,
}

/// Reads all node declarations (`l<id>[... pos = "x,y!" ...];`) from Dot
/// text. Headers, comments, edges and the closing brace are skipped.
pub fn read_positions(text: &str) -> Result<Vec<NodePlacement>, ParseError> {
    let mut placements = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty()
            || line.starts_with("//")
            || line.starts_with("graph")
            || line.starts_with('}')
            || line.contains("--")
        {
            continue;
        }
        let malformed = || ParseError::MalformedNode {
            line: index + 1,
            text: line.to_string(),
        };

        let (name, attrs) = line.split_once('[').ok_or_else(malformed)?;
        let (side, id) = parse_node_name(name.trim()).ok_or_else(malformed)?;
        let position = parse_pos_attr(attrs).ok_or_else(malformed)?;
        placements.push(NodePlacement {
            side,
            id,
            position,
            line: index + 1,
        });
    }

    Ok(placements)
}

fn parse_node_name(name: &str) -> Option<(Side, NodeId)> {
    let mut chars = name.chars();
    let side = match chars.next()? {
        'l' => Side::Left,
        'r' => Side::Right,
        _ => return None,
    };
    let id = chars.as_str().parse().ok()?;
    Some((side, id))
}

/// Extracts `x,y` from `pos = "x,y!"` (the pin marker is optional).
fn parse_pos_attr(attrs: &str) -> Option<Position> {
    let start = attrs.find("pos")?;
    let rest = attrs[start + 3..].trim_start().strip_prefix('=')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let value = &rest[..rest.find('"')?];
    let (x, y) = value.trim_end_matches('!').split_once(',')?;
    Some(Position::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Rebuilds a layout of `graph` from exported Dot text.
///
/// Every node of the graph must be declared exactly once, in its own column,
/// at a slot within `0..n` of its side.
pub fn import_layout(
    graph: Arc<BipartiteGraph>,
    text: &str,
) -> Result<BipartiteLayout, ParseError> {
    let mut orders: [Vec<Option<NodeId>>; 2] = [
        vec![None; graph.node_count(Side::Left)],
        vec![None; graph.node_count(Side::Right)],
    ];
    let mut placed: [Vec<bool>; 2] = [
        vec![false; graph.node_count(Side::Left)],
        vec![false; graph.node_count(Side::Right)],
    ];

    for p in read_positions(text)? {
        let s = side_index(p.side);
        let name = node_name(p.side, p.id);
        if p.id >= placed[s].len() {
            return Err(ParseError::UnknownNode { line: p.line, name });
        }
        let slot = usize::try_from(p.position.y)
            .ok()
            .filter(|&y| y < orders[s].len() && p.position.x == p.side.column());
        let Some(slot) = slot else {
            return Err(ParseError::MalformedNode {
                line: p.line,
                text: format!("{name} at {}", p.position),
            });
        };
        if placed[s][p.id] {
            return Err(ParseError::MalformedNode {
                line: p.line,
                text: format!("{name} declared twice"),
            });
        }
        if orders[s][slot].is_some() {
            return Err(ParseError::DuplicatePosition {
                line: p.line,
                x: p.position.x,
                y: p.position.y,
            });
        }
        orders[s][slot] = Some(p.id);
        placed[s][p.id] = true;
    }

    for side in Side::BOTH {
        if let Some(id) = placed[side_index(side)].iter().position(|&done| !done) {
            return Err(ParseError::MissingNode(node_name(side, id)));
        }
    }

    let [left, right] = orders.map(|order| order.into_iter().flatten().collect::<Vec<_>>());
    let draft = LayoutDraft::from_orders(graph, left, right)
        .expect("every node placed once on a distinct in-range slot");
    Ok(draft.commit())
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

/// A [`Reporter`] writing the run's best layout at each reported generation
/// to `<dir>/<prefix>_<generation>.dot`.
#[derive(Debug, Clone)]
pub struct DotExporter {
    dir: PathBuf,
    prefix: String,
}

impl DotExporter {
    /// Exports into `dir` (created on first write if missing).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "generation".to_string(),
        }
    }

    /// Sets the file name prefix (`generation` by default).
    pub fn file_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file written for `generation`.
    pub fn path_for(&self, generation: usize) -> PathBuf {
        self.dir.join(format!("{}_{generation}.dot", self.prefix))
    }

    /// Writes `layout` as the export of `generation`.
    pub fn export(&self, generation: usize, layout: &BipartiteLayout) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(generation);
        let mut file = std::io::BufWriter::new(std::fs::File::create(&path)?);
        write_dot(layout, &mut file)?;
        file.flush()?;
        Ok(path)
    }
}

impl Reporter for DotExporter {
    fn report(&mut self, population: &Population, best: &BipartiteLayout) -> std::io::Result<()> {
        let path = self.export(population.generation(), best)?;
        info!(
            generation = population.generation(),
            best = best.score(),
            path = %path.display(),
            "exported layout"
        );
        Ok(())
    }
}

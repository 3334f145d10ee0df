//! Deterministic grid layout for thought graphs.
//!
//! Positions are a pure function of each node's canonical index:
//!
//! ```text
//! row = i / columns_per_row      x = col * cell_width
//! col = i % columns_per_row      y = row * cell_height
//! ```
//!
//! No force simulation, no routing: the same graph always produces
//! pixel-identical output. Connectors are straight lines between the two
//! endpoint positions.

use super::graph::{EdgeKind, ThoughtGraph};
use super::models::{ThoughtType, DEFAULT_PREVIEW_LIMIT};
use serde::{Deserialize, Serialize};

/// Grid parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub columns_per_row: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Extra space added to the derived canvas size
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns_per_row: 3,
            cell_width: 300.0,
            cell_height: 200.0,
            margin: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Columns actually used; a zero setting behaves as a single column.
    pub fn effective_columns(&self) -> usize {
        self.columns_per_row.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A positioned node, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub index: usize,
    pub thought_id: i64,
    pub thought_number: u32,
    pub row: usize,
    pub col: usize,
    pub position: Position,
    pub thought_type: ThoughtType,
    pub color: &'static str,
    pub label: String,
    pub confidence: Option<String>,
    pub is_revision: bool,
}

/// A straight connector between two positioned nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
    pub from_pos: Position,
    pub to_pos: Position,
    pub dashed: bool,
    pub label: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// Result of laying out a graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphLayout {
    pub nodes: Vec<LayoutNode>,
    pub connectors: Vec<Connector>,
    pub canvas: Canvas,
    pub total_rows: usize,
}

impl GraphLayout {
    /// True for the placeholder layout of an empty graph.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Grid cell of the node at canonical index `index`.
pub fn grid_cell(index: usize, config: &LayoutConfig) -> (usize, usize) {
    let columns = config.effective_columns();
    (index / columns, index % columns)
}

/// Position of the node at canonical index `index`.
pub fn grid_position(index: usize, config: &LayoutConfig) -> Position {
    let (row, col) = grid_cell(index, config);
    Position {
        x: col as f64 * config.cell_width,
        y: row as f64 * config.cell_height,
    }
}

/// Canvas size for `node_count` nodes.
pub fn canvas_size(node_count: usize, config: &LayoutConfig) -> Canvas {
    let columns = config.effective_columns();
    let total_rows = node_count.div_ceil(columns);
    let used_columns = node_count.min(columns);
    Canvas {
        width: used_columns as f64 * config.cell_width + config.margin,
        height: total_rows as f64 * config.cell_height + config.margin,
    }
}

/// Lay out a thought graph on the grid.
pub fn layout_graph(graph: &ThoughtGraph, config: &LayoutConfig) -> GraphLayout {
    let columns = config.effective_columns();

    let nodes: Vec<LayoutNode> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(index, thought)| {
            let (row, col) = grid_cell(index, config);
            LayoutNode {
                index,
                thought_id: thought.id,
                thought_number: thought.thought_number,
                row,
                col,
                position: grid_position(index, config),
                thought_type: thought.thought_type,
                color: thought.thought_type.color(),
                label: thought.content_preview(DEFAULT_PREVIEW_LIMIT),
                confidence: thought.confidence_label(),
                is_revision: thought.is_revision,
            }
        })
        .collect();

    let connectors: Vec<Connector> = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let from = nodes.get(edge.from)?;
            let to = nodes.get(edge.to)?;
            Some(Connector {
                from: edge.from,
                to: edge.to,
                kind: edge.kind,
                from_pos: from.position,
                to_pos: to.position,
                dashed: edge.kind.is_dashed(),
                label: edge.kind.label(),
            })
        })
        .collect();

    GraphLayout {
        total_rows: nodes.len().div_ceil(columns),
        canvas: canvas_size(nodes.len(), config),
        nodes,
        connectors,
    }
}

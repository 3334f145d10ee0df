//! Thought graph construction.
//!
//! Turns the flat, numbered thought list of a sequence into a directed graph
//! with three disjoint edge kinds:
//!
//! - **Sequential**: predecessor → thought, for plain continuations only
//! - **Branch**: `branch_from_thought_id` → thought
//! - **Revision**: `revises_thought_id` → thought
//!
//! The graph is an arena: nodes live in a `Vec` in canonical order
//! (`thought_number` ascending, ties by `id`) and edges hold indices into it.
//! References are resolved once at build time; a reference that points at a
//! missing thought, or at one that does not come strictly earlier, is dropped.

use super::models::{ThinkingSequence, Thought};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Edge types
// ============================================================================

/// Kind of link between two thoughts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Sequential,
    Branch,
    Revision,
}

impl EdgeKind {
    /// Connector label; sequential edges are drawn as plain arrows.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Sequential => None,
            Self::Branch => Some("branch"),
            Self::Revision => Some("revision"),
        }
    }

    /// Revisions are drawn dashed.
    pub fn is_dashed(&self) -> bool {
        matches!(self, Self::Revision)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Branch => write!(f, "branch"),
            Self::Revision => write!(f, "revision"),
        }
    }
}

/// A directed edge between two node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtEdge {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
}

// ============================================================================
// ThoughtGraph
// ============================================================================

/// Thoughts of one sequence plus the edges derived from their references.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThoughtGraph {
    /// Nodes in canonical order
    pub nodes: Vec<Thought>,
    pub edges: Vec<ThoughtEdge>,
    #[serde(skip)]
    id_to_index: HashMap<i64, usize>,
}

impl ThoughtGraph {
    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Canonical index of the thought with the given id.
    pub fn index_of(&self, thought_id: i64) -> Option<usize> {
        self.id_to_index.get(&thought_id).copied()
    }

    pub fn node(&self, index: usize) -> Option<&Thought> {
        self.nodes.get(index)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &ThoughtEdge> + '_ {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Edges ending at `index`.
    pub fn incoming(&self, index: usize) -> impl Iterator<Item = &ThoughtEdge> + '_ {
        self.edges.iter().filter(move |e| e.to == index)
    }

    /// Edges starting at `index`.
    pub fn outgoing(&self, index: usize) -> impl Iterator<Item = &ThoughtEdge> + '_ {
        self.edges.iter().filter(move |e| e.from == index)
    }

    /// Export as a petgraph `DiGraph` weighted by thought id and edge kind.
    ///
    /// Node indices in the returned graph match the canonical indices.
    pub fn to_digraph(&self) -> DiGraph<i64, EdgeKind> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        for thought in &self.nodes {
            graph.add_node(thought.id);
        }
        for edge in &self.edges {
            graph.add_edge(NodeIndex::new(edge.from), NodeIndex::new(edge.to), edge.kind);
        }
        graph
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Build the graph for a whole sequence.
pub fn build_sequence_graph(sequence: &ThinkingSequence) -> ThoughtGraph {
    build_thought_graph(&sequence.thoughts)
}

/// Build a thought graph from a possibly unsorted list of thoughts.
///
/// Ordering is `thought_number` ascending with `id` as the tie-break; this
/// order alone defines "previous" for sequential edges. An empty input
/// yields an empty graph.
pub fn build_thought_graph(thoughts: &[Thought]) -> ThoughtGraph {
    let mut nodes: Vec<Thought> = thoughts.to_vec();
    nodes.sort_by(|a, b| {
        a.thought_number
            .cmp(&b.thought_number)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut id_to_index = HashMap::with_capacity(nodes.len());
    for (index, thought) in nodes.iter().enumerate() {
        if let Some(first) = id_to_index.get(&thought.id) {
            tracing::warn!(
                "Duplicate thought id {} (indices {} and {}); references resolve to the first",
                thought.id,
                first,
                index
            );
            continue;
        }
        id_to_index.insert(thought.id, index);
    }

    let mut graph = ThoughtGraph {
        nodes,
        edges: Vec::new(),
        id_to_index,
    };

    for index in 0..graph.nodes.len() {
        let thought = &graph.nodes[index];

        if index > 0 && !thought.breaks_sequence() {
            graph.edges.push(ThoughtEdge {
                from: index - 1,
                to: index,
                kind: EdgeKind::Sequential,
            });
        }

        let references = [
            (thought.branch_from_thought_id, EdgeKind::Branch),
            (thought.revises_thought_id, EdgeKind::Revision),
        ];
        for (reference, kind) in references {
            let Some(target_id) = reference else {
                continue;
            };
            if let Some(from) = resolve_reference(&graph, index, target_id, kind) {
                graph.edges.push(ThoughtEdge {
                    from,
                    to: index,
                    kind,
                });
            }
        }
    }

    tracing::debug!(
        "Built thought graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

/// Resolve a back-reference to a node index, or `None` when it must be dropped.
fn resolve_reference(
    graph: &ThoughtGraph,
    index: usize,
    target_id: i64,
    kind: EdgeKind,
) -> Option<usize> {
    let thought = &graph.nodes[index];
    let Some(target) = graph.index_of(target_id) else {
        tracing::debug!(
            "Dropping {} edge to thought {}: referenced thought {} not present",
            kind,
            thought.id,
            target_id
        );
        return None;
    };

    if graph.nodes[target].thought_number >= thought.thought_number {
        tracing::warn!(
            "Dropping {} edge to thought {} (#{}): reference {} (#{}) is not earlier",
            kind,
            thought.id,
            thought.thought_number,
            target_id,
            graph.nodes[target].thought_number
        );
        return None;
    }

    Some(target)
}

//! Per-sequence statistics shown alongside the reasoning graph.

use super::graph::{EdgeKind, ThoughtGraph};
use super::models::ThoughtType;
use petgraph::algo::toposort;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SequenceSummary {
    pub thought_count: usize,
    pub by_type: BTreeMap<ThoughtType, usize>,
    pub sequential_edges: usize,
    pub branch_edges: usize,
    pub revision_edges: usize,
    /// Mean over thoughts that report a confidence
    pub mean_confidence: Option<f64>,
    /// Ids of thoughts superseded by a revision edge
    pub revised_thought_ids: BTreeSet<i64>,
    /// Number of nodes on the longest path through the graph
    pub max_depth: usize,
}

impl SequenceSummary {
    pub fn from_graph(graph: &ThoughtGraph) -> Self {
        if graph.is_empty() {
            return Self::default();
        }

        let mut by_type = BTreeMap::new();
        for thought in &graph.nodes {
            *by_type.entry(thought.thought_type).or_insert(0) += 1;
        }

        let confidences: Vec<f64> = graph
            .nodes
            .iter()
            .filter_map(|t| t.confidence)
            .filter(|c| c.is_finite())
            .collect();
        let mean_confidence = if confidences.is_empty() {
            None
        } else {
            Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
        };

        let revised_thought_ids = graph
            .edges_of_kind(EdgeKind::Revision)
            .map(|e| graph.nodes[e.from].id)
            .collect();

        Self {
            thought_count: graph.node_count(),
            by_type,
            sequential_edges: graph.edges_of_kind(EdgeKind::Sequential).count(),
            branch_edges: graph.edges_of_kind(EdgeKind::Branch).count(),
            revision_edges: graph.edges_of_kind(EdgeKind::Revision).count(),
            mean_confidence,
            revised_thought_ids,
            max_depth: longest_path(graph),
        }
    }
}

/// Longest path length in nodes. Edges only point from earlier to later
/// thoughts, so the graph is acyclic; a cycle would fall back to 1.
fn longest_path(graph: &ThoughtGraph) -> usize {
    let dg = graph.to_digraph();
    let order = match toposort(&dg, None) {
        Ok(order) => order,
        Err(cycle) => {
            tracing::warn!(
                "Thought graph has a cycle through node {:?}; depth not computed",
                cycle.node_id()
            );
            return 1;
        }
    };

    let mut depth = vec![1usize; dg.node_count()];
    for node in order {
        let best = dg
            .edges_directed(node, Direction::Incoming)
            .map(|e| depth[e.source().index()] + 1)
            .max()
            .unwrap_or(1);
        depth[node.index()] = best;
    }
    depth.into_iter().max().unwrap_or(0)
}

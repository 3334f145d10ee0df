//! Reasoning-graph engine.
//!
//! ```text
//! ThinkingSequence.thoughts ──► graph (ThoughtGraph) ──► layout (GraphLayout)
//!                                        │
//!                                    summary (SequenceSummary)
//! ```
//!
//! ## Modules
//!
//! - [`models`]: Thought, ThoughtType, ThinkingSequence
//! - [`graph`]: edge derivation (sequential / branch / revision)
//! - [`layout`]: deterministic grid positions and connectors
//! - [`summary`]: per-sequence statistics

pub mod graph;
pub mod layout;
pub mod models;
pub mod summary;

pub use graph::{build_sequence_graph, build_thought_graph, EdgeKind, ThoughtEdge, ThoughtGraph};
pub use layout::{layout_graph, Canvas, Connector, GraphLayout, LayoutConfig, LayoutNode, Position};
pub use models::{ThinkingSequence, Thought, ThoughtType};
pub use summary::SequenceSummary;

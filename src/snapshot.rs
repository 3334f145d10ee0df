//! Project snapshot: the five record collections fetched for one project.
//!
//! A collection that failed to load upstream is absent (`null` or missing in
//! JSON) rather than empty; the aggregator treats both the same way. A
//! collection that is present but malformed is logged and dropped to `None`,
//! so one bad source never rejects the others.

use crate::error::{EngineError, Result};
use crate::thinking::models::ThinkingSequence;
use crate::timeline::aggregator::ActivitySources;
use crate::timeline::models::{Brief, Memory, ProgressEntry, Task};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSnapshot {
    pub project_id: Option<Uuid>,
    #[serde(deserialize_with = "lenient_memories")]
    pub memories: Option<Vec<Memory>>,
    #[serde(deserialize_with = "lenient_progress")]
    pub progress: Option<Vec<ProgressEntry>>,
    #[serde(deserialize_with = "lenient_tasks")]
    pub tasks: Option<Vec<Task>>,
    #[serde(deserialize_with = "lenient_thinking")]
    pub thinking: Option<Vec<ThinkingSequence>>,
    #[serde(deserialize_with = "lenient_briefs")]
    pub briefs: Option<Vec<Brief>>,
}

// ============================================================================
// Per-collection deserialization
// ============================================================================

/// Deserialize one collection, degrading to `None` when it does not match
/// the record shape.
fn lenient_collection<'de, D, T>(
    deserializer: D,
    collection: &str,
) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    match serde_json::from_value(value) {
        Ok(records) => Ok(Some(records)),
        Err(e) => {
            tracing::warn!("Dropping malformed {} collection: {}", collection, e);
            Ok(None)
        }
    }
}

fn lenient_memories<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<Memory>>, D::Error> {
    lenient_collection(d, "memories")
}

fn lenient_progress<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<ProgressEntry>>, D::Error> {
    lenient_collection(d, "progress")
}

fn lenient_tasks<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<Task>>, D::Error> {
    lenient_collection(d, "tasks")
}

fn lenient_thinking<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<ThinkingSequence>>, D::Error> {
    lenient_collection(d, "thinking")
}

fn lenient_briefs<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<Brief>>, D::Error> {
    lenient_collection(d, "briefs")
}

impl ProjectSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&contents)?;
        tracing::info!(
            "Loaded snapshot from {} (project: {:?})",
            path.display(),
            snapshot.project_id
        );
        Ok(snapshot)
    }

    /// Borrow the collections as aggregator sources.
    pub fn sources(&self) -> ActivitySources<'_> {
        ActivitySources {
            memories: self.memories.as_deref(),
            progress: self.progress.as_deref(),
            tasks: self.tasks.as_deref(),
            thinking: self.thinking.as_deref(),
            briefs: self.briefs.as_deref(),
        }
    }

    pub fn sequence(&self, id: i64) -> Option<&ThinkingSequence> {
        self.thinking.as_ref()?.iter().find(|s| s.id == id)
    }
}

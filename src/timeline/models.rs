//! Timeline models
//!
//! Source records for the five activity kinds, as delivered by the data
//! layer, and the normalized [`Activity`] shape the timeline renders.

use crate::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Source records
// ============================================================================

/// A stored project memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub content: String,
    /// Free-form classifier (decision, pattern, error, learning, ...)
    #[serde(default = "default_memory_type")]
    pub memory_type: String,
    /// Importance on a 1-10 scale; some producers send fractional scores
    #[serde(default = "default_importance")]
    pub importance: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

fn default_memory_type() -> String {
    "general".to_string()
}

fn default_importance() -> f64 {
    5.0
}

/// Kind of progress milestone
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneType {
    Feature,
    Bugfix,
    Refactor,
    Release,
    Documentation,
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for MilestoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feature => write!(f, "feature"),
            Self::Bugfix => write!(f, "bugfix"),
            Self::Refactor => write!(f, "refactor"),
            Self::Release => write!(f, "release"),
            Self::Documentation => write!(f, "documentation"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A progress milestone entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: i64,
    pub version: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub milestone_type: MilestoneType,
    #[serde(default)]
    pub completion_percentage: f64,
    #[serde(default)]
    pub blockers: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Status of a task
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Blocked,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Blocked => write!(f, "blocked"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A project task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    pub created_at: DateTime<Utc>,
    /// Last state change; absent on rows that were never updated
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Instant the timeline orders this task by.
    pub fn last_changed_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// A generated project brief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brief {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub auto_tasks_created: u32,
    #[serde(default)]
    pub technical_analysis_included: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Activity
// ============================================================================

/// Discriminant of an [`Activity`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Memory,
    Progress,
    Task,
    Thinking,
    Brief,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        Self::Memory,
        Self::Progress,
        Self::Task,
        Self::Thinking,
        Self::Brief,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Progress => "progress",
            Self::Task => "task",
            Self::Thinking => "thinking",
            Self::Brief => "brief",
        }
    }

    /// Activity id for a source record of this type, e.g. `memory-42`.
    pub fn activity_id(&self, source_id: i64) -> String {
        format!("{}-{}", self.as_str(), source_id)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "progress" => Ok(Self::Progress),
            "task" => Ok(Self::Task),
            "thinking" => Ok(Self::Thinking),
            "brief" => Ok(Self::Brief),
            _ => Err(EngineError::UnknownActivityType(s.to_string())),
        }
    }
}

/// Presentation palette token
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityColor {
    Blue,
    Green,
    Red,
    Orange,
    Purple,
    Teal,
    Gray,
    Indigo,
}

/// One timeline entry, normalized from any source kind.
///
/// Created fresh on every aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Source-prefixed id, e.g. `task-7`
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    /// Truncated summary
    pub description: String,
    /// Untruncated text, memory and brief only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
    /// Keys depend on `activity_type`
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub category: Option<String>,
    /// Task status only
    #[serde(default)]
    pub status: Option<String>,
    pub color: ActivityColor,
}

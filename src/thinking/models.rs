//! Sequential-thinking models
//!
//! A [`ThinkingSequence`] owns an ordered list of [`Thought`]s produced by a
//! sequential-reasoning process. Thoughts reference each other by id through
//! `revises_thought_id` and `branch_from_thought_id`; those references are
//! resolved into graph edges by [`super::graph::build_thought_graph`].

use crate::timeline::format::truncate_text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default length of node label previews.
pub const DEFAULT_PREVIEW_LIMIT: usize = 100;

// ============================================================================
// ThoughtType
// ============================================================================

/// Kind of reasoning step
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ThoughtType {
    Reasoning,
    Analysis,
    Hypothesis,
    Decision,
    Action,
    Reflection,
    Conclusion,
    Question,
    Observation,
    Assumption,
    /// Anything outside the fixed vocabulary
    #[default]
    Unknown,
}

impl ThoughtType {
    /// All known variants, in vocabulary order.
    pub const ALL: [ThoughtType; 11] = [
        Self::Reasoning,
        Self::Analysis,
        Self::Hypothesis,
        Self::Decision,
        Self::Action,
        Self::Reflection,
        Self::Conclusion,
        Self::Question,
        Self::Observation,
        Self::Assumption,
        Self::Unknown,
    ];

    /// Presentation color (hex) for graph nodes of this type.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Reasoning => "#3b82f6",
            Self::Analysis => "#06b6d4",
            Self::Hypothesis => "#f59e0b",
            Self::Decision => "#10b981",
            Self::Action => "#ef4444",
            Self::Reflection => "#8b5cf6",
            Self::Conclusion => "#22c55e",
            Self::Question => "#eab308",
            Self::Observation => "#14b8a6",
            Self::Assumption => "#f97316",
            Self::Unknown => "#6b7280",
        }
    }
}

impl fmt::Display for ThoughtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reasoning => write!(f, "reasoning"),
            Self::Analysis => write!(f, "analysis"),
            Self::Hypothesis => write!(f, "hypothesis"),
            Self::Decision => write!(f, "decision"),
            Self::Action => write!(f, "action"),
            Self::Reflection => write!(f, "reflection"),
            Self::Conclusion => write!(f, "conclusion"),
            Self::Question => write!(f, "question"),
            Self::Observation => write!(f, "observation"),
            Self::Assumption => write!(f, "assumption"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for ThoughtType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reasoning" => Ok(Self::Reasoning),
            "analysis" => Ok(Self::Analysis),
            "hypothesis" => Ok(Self::Hypothesis),
            "decision" => Ok(Self::Decision),
            "action" => Ok(Self::Action),
            "reflection" => Ok(Self::Reflection),
            "conclusion" => Ok(Self::Conclusion),
            "question" => Ok(Self::Question),
            "observation" => Ok(Self::Observation),
            "assumption" => Ok(Self::Assumption),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown thought type: {}", s)),
        }
    }
}

// Out-of-vocabulary values map to Unknown instead of failing the whole record.
impl<'de> Deserialize<'de> for ThoughtType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .and_then(|s| s.parse().ok())
            .unwrap_or(ThoughtType::Unknown))
    }
}

// ============================================================================
// Thought
// ============================================================================

/// One step in a reasoning sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    /// Unique within the owning sequence
    pub id: i64,
    /// Canonical position (1-based)
    pub thought_number: u32,
    pub content: String,
    #[serde(default)]
    pub thought_type: ThoughtType,
    /// Self-reported confidence in [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub is_revision: bool,
    /// Earlier thought this one corrects
    #[serde(default)]
    pub revises_thought_id: Option<i64>,
    /// Earlier thought this one continues from, when not its predecessor
    #[serde(default)]
    pub branch_from_thought_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Thought {
    /// Create a plain continuation thought
    pub fn new(id: i64, thought_number: u32, content: impl Into<String>) -> Self {
        Self {
            id,
            thought_number,
            content: content.into(),
            thought_type: ThoughtType::Unknown,
            confidence: None,
            is_revision: false,
            revises_thought_id: None,
            branch_from_thought_id: None,
            created_at: None,
        }
    }

    /// True when this thought does not continue its numeric predecessor.
    pub fn breaks_sequence(&self) -> bool {
        self.is_revision || self.branch_from_thought_id.is_some()
    }

    /// Truncated content for node labels.
    pub fn content_preview(&self, limit: usize) -> String {
        truncate_text(&self.content, limit)
    }

    /// Percentage label, e.g. `"85%"`. Out-of-range values are clamped.
    pub fn confidence_label(&self) -> Option<String> {
        self.confidence
            .filter(|c| c.is_finite())
            .map(|c| format!("{:.0}%", c.clamp(0.0, 1.0) * 100.0))
    }
}

// ============================================================================
// ThinkingSequence
// ============================================================================

/// A recorded reasoning session and the thoughts it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinkingSequence {
    pub id: i64,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub thoughts: Vec<Thought>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ThinkingSequence {
    /// Number of thoughts recorded in this sequence
    pub fn thought_count(&self) -> usize {
        self.thoughts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thought_type_display_and_parse() {
        for t in ThoughtType::ALL {
            let parsed: ThoughtType = t.to_string().parse().unwrap();
            assert_eq!(parsed, t);
        }
        assert_eq!(
            "Hypothesis".parse::<ThoughtType>().unwrap(),
            ThoughtType::Hypothesis
        );
        assert!("musing".parse::<ThoughtType>().is_err());
    }

    #[test]
    fn test_thought_type_lenient_deserialize() {
        let t: ThoughtType = serde_json::from_str("\"DECISION\"").unwrap();
        assert_eq!(t, ThoughtType::Decision);

        let t: ThoughtType = serde_json::from_str("\"daydream\"").unwrap();
        assert_eq!(t, ThoughtType::Unknown);

        let t: ThoughtType = serde_json::from_str("null").unwrap();
        assert_eq!(t, ThoughtType::Unknown);
    }

    #[test]
    fn test_thought_deserialize_minimal() {
        let json = r#"{"id": 7, "thought_number": 2, "content": "check the cache"}"#;
        let thought: Thought = serde_json::from_str(json).unwrap();
        assert_eq!(thought.id, 7);
        assert_eq!(thought.thought_number, 2);
        assert_eq!(thought.thought_type, ThoughtType::Unknown);
        assert!(!thought.is_revision);
        assert!(thought.revises_thought_id.is_none());
        assert!(!thought.breaks_sequence());
    }

    #[test]
    fn test_confidence_label() {
        let mut thought = Thought::new(1, 1, "x");
        assert_eq!(thought.confidence_label(), None);

        thought.confidence = Some(0.853);
        assert_eq!(thought.confidence_label().as_deref(), Some("85%"));

        thought.confidence = Some(1.7);
        assert_eq!(thought.confidence_label().as_deref(), Some("100%"));
    }

    #[test]
    fn test_content_preview() {
        let thought = Thought::new(1, 1, "a".repeat(120));
        let preview = thought.content_preview(DEFAULT_PREVIEW_LIMIT);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_breaks_sequence() {
        let mut thought = Thought::new(2, 2, "x");
        thought.branch_from_thought_id = Some(1);
        assert!(thought.breaks_sequence());

        let mut thought = Thought::new(3, 3, "y");
        thought.is_revision = true;
        assert!(thought.breaks_sequence());
    }
}

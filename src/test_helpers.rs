//! Test helper factories
//!
//! Convenience constructors for thoughts, source records and activities with
//! sensible defaults. All instants are derived from [`fixed_now`] so tests
//! never depend on the wall clock.
#![allow(dead_code)]

use crate::thinking::models::{ThinkingSequence, Thought};
use crate::timeline::models::{
    Activity, ActivityColor, ActivityType, Brief, Memory, MilestoneType, ProgressEntry, Task,
    TaskStatus,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Map;

// ============================================================================
// Time
// ============================================================================

/// 2026-10-16 12:00:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

/// `hours` after 2026-10-01 00:00:00 UTC
pub fn at(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

// ============================================================================
// Thoughts
// ============================================================================

pub fn thought(id: i64, number: u32) -> Thought {
    Thought::new(id, number, format!("Thought {}", number))
}

pub fn branch_thought(id: i64, number: u32, from: i64) -> Thought {
    let mut t = thought(id, number);
    t.branch_from_thought_id = Some(from);
    t
}

pub fn revision_thought(id: i64, number: u32, revises: i64) -> Thought {
    let mut t = thought(id, number);
    t.is_revision = true;
    t.revises_thought_id = Some(revises);
    t
}

pub fn sequence(id: i64, goal: &str, created_at: DateTime<Utc>) -> ThinkingSequence {
    ThinkingSequence {
        id,
        goal: goal.to_string(),
        description: None,
        is_complete: false,
        thoughts: vec![],
        created_at,
        updated_at: None,
    }
}

// ============================================================================
// Source records
// ============================================================================

pub fn memory(id: i64, title: &str, created_at: DateTime<Utc>) -> Memory {
    Memory {
        id,
        title: title.to_string(),
        content: format!("Memory {} content", id),
        memory_type: "learning".to_string(),
        importance: 5.0,
        tags: vec![],
        created_at,
    }
}

pub fn progress(id: i64, milestone_type: MilestoneType, created_at: DateTime<Utc>) -> ProgressEntry {
    ProgressEntry {
        id,
        version: "1.2.0".to_string(),
        title: format!("Milestone {}", id),
        description: "Progress update".to_string(),
        milestone_type,
        completion_percentage: 50.0,
        blockers: vec![],
        next_steps: vec![],
        created_at,
    }
}

pub fn task(
    id: i64,
    title: &str,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: format!("Details for {}", title),
        category: Some("backend".to_string()),
        status,
        priority: Some("medium".to_string()),
        estimated_hours: Some(2.5),
        created_at,
        updated_at,
    }
}

pub fn brief(id: i64, title: &str, created_at: DateTime<Utc>) -> Brief {
    Brief {
        id,
        title: title.to_string(),
        content: format!("Brief {} body", id),
        sections: vec![],
        auto_tasks_created: 0,
        technical_analysis_included: false,
        created_at,
    }
}

// ============================================================================
// Activities
// ============================================================================

/// A bare activity for filter tests; the description echoes nothing from the title.
pub fn activity(
    id: &str,
    activity_type: ActivityType,
    title: &str,
    timestamp: DateTime<Utc>,
) -> Activity {
    Activity {
        id: id.to_string(),
        timestamp,
        activity_type,
        title: title.to_string(),
        description: String::new(),
        full_content: None,
        metadata: Map::new(),
        category: None,
        status: None,
        color: ActivityColor::Gray,
    }
}

//! Activity aggregation.
//!
//! Normalizes the five project record kinds into one flat list of
//! [`Activity`] values, one per source record. A thinking sequence becomes
//! a single activity regardless of how many thoughts it holds.
//!
//! Output order (before the timeline sort) is memories, progress entries,
//! tasks, thinking sequences, briefs, each in input order. The timeline's
//! stable sort relies on this order for tie-breaks.

use super::format::truncate_text;
use super::models::{
    Activity, ActivityColor, ActivityType, Brief, Memory, MilestoneType, ProgressEntry, Task,
    TaskStatus,
};
use crate::thinking::models::ThinkingSequence;
use serde_json::{json, Map, Value};

/// Default description bound, in characters.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 150;

/// Importance at or above which a memory is highlighted.
pub const HIGH_IMPORTANCE: f64 = 8.0;

/// Borrowed view of the five source collections for one project.
///
/// `None` marks a collection that failed to load upstream; it is treated as
/// empty so the other sources still aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivitySources<'a> {
    pub memories: Option<&'a [Memory]>,
    pub progress: Option<&'a [ProgressEntry]>,
    pub tasks: Option<&'a [Task]>,
    pub thinking: Option<&'a [ThinkingSequence]>,
    pub briefs: Option<&'a [Brief]>,
}

/// Converts source records into activities
#[derive(Debug, Clone, Copy)]
pub struct ActivityAggregator {
    description_limit: usize,
}

impl Default for ActivityAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTION_LIMIT)
    }
}

impl ActivityAggregator {
    pub fn new(description_limit: usize) -> Self {
        Self { description_limit }
    }

    pub fn description_limit(&self) -> usize {
        self.description_limit
    }

    /// Aggregate all sources into one activity list.
    pub fn aggregate(&self, sources: &ActivitySources<'_>) -> Vec<Activity> {
        let memories = present("memories", sources.memories);
        let progress = present("progress", sources.progress);
        let tasks = present("tasks", sources.tasks);
        let thinking = present("thinking", sources.thinking);
        let briefs = present("briefs", sources.briefs);

        let mut activities = Vec::with_capacity(
            memories.len() + progress.len() + tasks.len() + thinking.len() + briefs.len(),
        );
        activities.extend(memories.iter().map(|m| self.memory_activity(m)));
        activities.extend(progress.iter().map(|p| self.progress_activity(p)));
        activities.extend(tasks.iter().map(|t| self.task_activity(t)));
        activities.extend(thinking.iter().map(|s| self.thinking_activity(s)));
        activities.extend(briefs.iter().map(|b| self.brief_activity(b)));

        tracing::debug!("Aggregated {} activities", activities.len());
        activities
    }

    pub fn memory_activity(&self, memory: &Memory) -> Activity {
        let title = if memory.title.trim().is_empty() {
            format!("{} memory", capitalize(&memory.memory_type))
        } else {
            memory.title.clone()
        };
        let color = if memory.importance >= HIGH_IMPORTANCE {
            ActivityColor::Orange
        } else {
            ActivityColor::Blue
        };

        Activity {
            id: ActivityType::Memory.activity_id(memory.id),
            timestamp: memory.created_at,
            activity_type: ActivityType::Memory,
            title,
            description: truncate_text(&memory.content, self.description_limit),
            full_content: Some(memory.content.clone()),
            metadata: object(json!({
                "memory_type": memory.memory_type,
                "importance": memory.importance,
            })),
            category: Some(memory.memory_type.clone()),
            status: None,
            color,
        }
    }

    pub fn progress_activity(&self, entry: &ProgressEntry) -> Activity {
        let color = match entry.milestone_type {
            MilestoneType::Release => ActivityColor::Green,
            MilestoneType::Bugfix => ActivityColor::Red,
            MilestoneType::Feature => ActivityColor::Blue,
            _ => ActivityColor::Teal,
        };

        Activity {
            id: ActivityType::Progress.activity_id(entry.id),
            timestamp: entry.created_at,
            activity_type: ActivityType::Progress,
            title: format!("v{}: {}", entry.version, entry.title),
            description: truncate_text(&entry.description, self.description_limit),
            full_content: None,
            metadata: object(json!({
                "version": entry.version,
                "milestone_type": entry.milestone_type,
                "completion_percentage": entry.completion_percentage,
                "blockers": entry.blockers,
                "next_steps": entry.next_steps,
            })),
            category: Some(entry.milestone_type.to_string()),
            status: None,
            color,
        }
    }

    pub fn task_activity(&self, task: &Task) -> Activity {
        let color = match task.status {
            TaskStatus::Completed => ActivityColor::Green,
            TaskStatus::InProgress => ActivityColor::Blue,
            TaskStatus::Blocked => ActivityColor::Red,
            TaskStatus::Cancelled | TaskStatus::Unknown => ActivityColor::Gray,
            TaskStatus::Pending => ActivityColor::Orange,
        };

        Activity {
            id: ActivityType::Task.activity_id(task.id),
            timestamp: task.last_changed_at(),
            activity_type: ActivityType::Task,
            title: task.title.clone(),
            description: truncate_text(&task.description, self.description_limit),
            full_content: None,
            metadata: object(json!({
                "category": task.category,
                "status": task.status,
                "priority": task.priority,
                "estimated_hours": task.estimated_hours,
            })),
            category: task.category.clone(),
            status: Some(task.status.to_string()),
            color,
        }
    }

    pub fn thinking_activity(&self, sequence: &ThinkingSequence) -> Activity {
        let title = if sequence.goal.trim().is_empty() {
            format!("Thinking sequence #{}", sequence.id)
        } else {
            sequence.goal.clone()
        };
        let summary = sequence
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&sequence.goal);
        let color = if sequence.is_complete {
            ActivityColor::Green
        } else {
            ActivityColor::Purple
        };

        Activity {
            id: ActivityType::Thinking.activity_id(sequence.id),
            timestamp: sequence.created_at,
            activity_type: ActivityType::Thinking,
            title,
            description: truncate_text(summary, self.description_limit),
            full_content: None,
            metadata: object(json!({
                "is_complete": sequence.is_complete,
                "goal": sequence.goal,
                "thought_count": sequence.thought_count(),
            })),
            category: None,
            status: None,
            color,
        }
    }

    pub fn brief_activity(&self, brief: &Brief) -> Activity {
        Activity {
            id: ActivityType::Brief.activity_id(brief.id),
            timestamp: brief.created_at,
            activity_type: ActivityType::Brief,
            title: brief.title.clone(),
            description: truncate_text(&brief.content, self.description_limit),
            full_content: Some(brief.content.clone()),
            metadata: object(json!({
                "sections": brief.sections,
                "auto_tasks_created": brief.auto_tasks_created,
                "technical_analysis_included": brief.technical_analysis_included,
            })),
            category: None,
            status: None,
            color: ActivityColor::Indigo,
        }
    }
}

/// Aggregate with the default description bound.
pub fn aggregate_activities(sources: &ActivitySources<'_>) -> Vec<Activity> {
    ActivityAggregator::default().aggregate(sources)
}

fn present<'a, T>(name: &str, source: Option<&'a [T]>) -> &'a [T] {
    match source {
        Some(records) => records,
        None => {
            tracing::warn!("Activity source '{}' unavailable, treating as empty", name);
            &[]
        }
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

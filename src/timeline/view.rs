//! Timeline view assembly: aggregate, filter, label.

use super::aggregator::{ActivityAggregator, ActivitySources};
use super::filter::{apply_filters, type_counts, TimelineFilter};
use super::format::format_relative_time;
use super::models::{Activity, ActivityType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// An activity with its recency label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    #[serde(flatten)]
    pub activity: Activity,
    pub relative_time: String,
}

/// Activities sharing a calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<TimelineEntry>,
}

/// The rendered feed for one project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineView {
    /// Filtered entries, newest first
    pub entries: Vec<TimelineEntry>,
    /// Number of activities before filtering
    pub total: usize,
    /// Per-type counts before filtering
    pub counts: BTreeMap<ActivityType, usize>,
}

impl TimelineView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bucket entries by calendar day, preserving order.
    pub fn group_by_day(&self) -> Vec<DayGroup> {
        let mut groups: Vec<DayGroup> = Vec::new();
        for entry in &self.entries {
            let date = entry.activity.timestamp.date_naive();
            match groups.last_mut() {
                Some(group) if group.date == date => group.entries.push(entry.clone()),
                _ => groups.push(DayGroup {
                    date,
                    entries: vec![entry.clone()],
                }),
            }
        }
        groups
    }
}

/// Label already-filtered activities.
pub fn label_entries(activities: Vec<Activity>, now: DateTime<Utc>) -> Vec<TimelineEntry> {
    activities
        .into_iter()
        .map(|activity| TimelineEntry {
            relative_time: format_relative_time(activity.timestamp, now),
            activity,
        })
        .collect()
}

/// Aggregate `sources`, run the filter pipeline and label the result.
pub fn build_timeline(
    aggregator: &ActivityAggregator,
    sources: &ActivitySources<'_>,
    filter: &TimelineFilter,
    now: DateTime<Utc>,
) -> TimelineView {
    let activities = aggregator.aggregate(sources);
    let filtered = apply_filters(&activities, filter, now);
    TimelineView {
        total: activities.len(),
        counts: type_counts(&activities),
        entries: label_entries(filtered, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{activity, at, brief, fixed_now, memory};
    use chrono::Duration;

    #[test]
    fn test_build_timeline_labels_and_counts() {
        let now = fixed_now();
        let memories = vec![memory(1, "Recent", now - Duration::minutes(5))];
        let briefs = vec![brief(2, "Older", now - Duration::days(3))];
        let sources = ActivitySources {
            memories: Some(&memories),
            briefs: Some(&briefs),
            ..ActivitySources::default()
        };
        let view = build_timeline(
            &ActivityAggregator::default(),
            &sources,
            &TimelineFilter::default(),
            now,
        );

        assert_eq!(view.total, 2);
        assert_eq!(view.counts[&ActivityType::Memory], 1);
        assert_eq!(view.counts[&ActivityType::Task], 0);
        let labels: Vec<&str> = view.entries.iter().map(|e| e.relative_time.as_str()).collect();
        assert_eq!(labels, vec!["Just now", "3 days ago"]);
    }

    #[test]
    fn test_empty_view() {
        let view = build_timeline(
            &ActivityAggregator::default(),
            &ActivitySources::default(),
            &TimelineFilter::default(),
            at(0),
        );
        assert!(view.is_empty());
        assert_eq!(view.total, 0);
        assert!(view.group_by_day().is_empty());
    }

    #[test]
    fn test_group_by_day() {
        let now = fixed_now();
        let activities = vec![
            activity("task-1", ActivityType::Task, "a", now - Duration::hours(1)),
            activity("task-2", ActivityType::Task, "b", now - Duration::hours(2)),
            activity("task-3", ActivityType::Task, "c", now - Duration::days(1)),
        ];
        let view = TimelineView {
            entries: label_entries(activities, now),
            total: 3,
            counts: BTreeMap::new(),
        };
        let groups = view.group_by_day();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[1].date, NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    }
}

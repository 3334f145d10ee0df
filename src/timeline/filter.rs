//! Timeline filter and sort pipeline.
//!
//! Stages run in a fixed order:
//!
//! 1. type set: an empty set selects nothing
//! 2. search query: case-insensitive substring of title or description,
//!    skipped when blank; a non-blank query matches as typed, spaces included
//! 3. date window: `week` / `month` relative to `now`
//! 4. stable sort by timestamp, newest first; ties keep aggregation order

use super::models::{Activity, ActivityType};
use crate::error::EngineError;
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Relative time range
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    #[default]
    All,
    Week,
    Month,
}

impl DateWindow {
    /// Earliest timestamp kept by this window, or `None` for no bound.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::All => None,
            Self::Week => Some(now - Duration::days(7)),
            Self::Month => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.cutoff(now) {
            Some(cutoff) => timestamp >= cutoff,
            None => true,
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl FromStr for DateWindow {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(EngineError::UnknownDateWindow(s.to_string())),
        }
    }
}

/// Filter state supplied by the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineFilter {
    pub types: BTreeSet<ActivityType>,
    pub search_query: String,
    pub date_window: DateWindow,
}

impl Default for TimelineFilter {
    fn default() -> Self {
        Self {
            types: ActivityType::ALL.into_iter().collect(),
            search_query: String::new(),
            date_window: DateWindow::All,
        }
    }
}

impl TimelineFilter {
    pub fn with_types(mut self, types: impl IntoIterator<Item = ActivityType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.date_window = window;
        self
    }

    /// Whether `activity` passes the type, search and window stages.
    pub fn matches(&self, activity: &Activity, now: DateTime<Utc>) -> bool {
        self.types.contains(&activity.activity_type)
            && matches_query(activity, &search_needle(&self.search_query))
            && self.date_window.contains(activity.timestamp, now)
    }
}

/// Lowercased query, or empty when the query is blank.
fn search_needle(query: &str) -> String {
    if query.trim().is_empty() {
        String::new()
    } else {
        query.to_lowercase()
    }
}

/// `needle` must already be lowercased; empty matches everything.
fn matches_query(activity: &Activity, needle: &str) -> bool {
    needle.is_empty()
        || activity.title.to_lowercase().contains(needle)
        || activity.description.to_lowercase().contains(needle)
}

/// Run the full pipeline over `activities`.
pub fn apply_filters(
    activities: &[Activity],
    filter: &TimelineFilter,
    now: DateTime<Utc>,
) -> Vec<Activity> {
    if filter.types.is_empty() {
        return Vec::new();
    }

    let by_type: Vec<&Activity> = activities
        .iter()
        .filter(|a| filter.types.contains(&a.activity_type))
        .collect();

    let needle = search_needle(&filter.search_query);
    let by_query: Vec<&Activity> = by_type
        .into_iter()
        .filter(|a| matches_query(a, &needle))
        .collect();

    let mut result: Vec<Activity> = by_query
        .into_iter()
        .filter(|a| filter.date_window.contains(a.timestamp, now))
        .cloned()
        .collect();

    // Vec::sort_by is stable
    result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    tracing::debug!(
        "Timeline filter kept {} of {} activities (window: {}, query: {:?})",
        result.len(),
        activities.len(),
        filter.date_window,
        filter.search_query
    );
    result
}

/// Per-type counts, for filter badges.
pub fn type_counts(activities: &[Activity]) -> BTreeMap<ActivityType, usize> {
    let mut counts: BTreeMap<ActivityType, usize> =
        ActivityType::ALL.into_iter().map(|t| (t, 0)).collect();
    for activity in activities {
        *counts.entry(activity.activity_type).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{activity, fixed_now};

    fn sample() -> Vec<Activity> {
        let now = fixed_now();
        vec![
            activity("memory-1", ActivityType::Memory, "Cache layout", now - Duration::days(2)),
            activity("task-2", ActivityType::Task, "Fix login", now - Duration::hours(3)),
            activity("progress-3", ActivityType::Progress, "v1.0 release", now - Duration::days(20)),
            activity("brief-4", ActivityType::Brief, "Kickoff brief", now - Duration::days(45)),
            activity("thinking-5", ActivityType::Thinking, "Pick a cache", now - Duration::hours(3)),
        ]
    }

    fn ids(activities: &[Activity]) -> Vec<&str> {
        activities.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_default_filter_sorts_newest_first() {
        let out = apply_filters(&sample(), &TimelineFilter::default(), fixed_now());
        assert_eq!(
            ids(&out),
            vec!["task-2", "thinking-5", "memory-1", "progress-3", "brief-4"]
        );
    }

    #[test]
    fn test_empty_type_set_selects_nothing() {
        let filter = TimelineFilter::default().with_types([]);
        assert!(apply_filters(&sample(), &filter, fixed_now()).is_empty());

        let filter = filter.with_search("cache").with_window(DateWindow::Week);
        assert!(apply_filters(&sample(), &filter, fixed_now()).is_empty());
    }

    #[test]
    fn test_type_filter() {
        let filter = TimelineFilter::default().with_types([ActivityType::Memory, ActivityType::Brief]);
        let out = apply_filters(&sample(), &filter, fixed_now());
        assert_eq!(ids(&out), vec!["memory-1", "brief-4"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let mut activities = sample();
        activities[3].description = "Covers the CACHE rollout".to_string();
        let filter = TimelineFilter::default().with_search("cAcHe");
        let out = apply_filters(&activities, &filter, fixed_now());
        assert_eq!(ids(&out), vec!["thinking-5", "memory-1", "brief-4"]);
    }

    #[test]
    fn test_blank_search_is_skipped() {
        let filter = TimelineFilter::default().with_search("   ");
        assert_eq!(apply_filters(&sample(), &filter, fixed_now()).len(), 5);
    }

    #[test]
    fn test_week_and_month_windows() {
        let week = TimelineFilter::default().with_window(DateWindow::Week);
        assert_eq!(
            ids(&apply_filters(&sample(), &week, fixed_now())),
            vec!["task-2", "thinking-5", "memory-1"]
        );

        let month = TimelineFilter::default().with_window(DateWindow::Month);
        assert_eq!(
            ids(&apply_filters(&sample(), &month, fixed_now())),
            vec!["task-2", "thinking-5", "memory-1", "progress-3"]
        );
    }

    #[test]
    fn test_query_whitespace_is_significant() {
        let now = fixed_now();
        let activities = vec![
            activity("memory-1", ActivityType::Memory, "mycache tuning", now),
            activity("memory-2", ActivityType::Memory, "the cache layer", now),
        ];
        let filter = TimelineFilter::default().with_search(" cache");
        let out = apply_filters(&activities, &filter, now);
        assert_eq!(ids(&out), vec!["memory-2"]);
        assert!(!filter.matches(&activities[0], now));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let now = fixed_now();
        let edge = vec![activity("task-1", ActivityType::Task, "edge", now - Duration::days(7))];
        let week = TimelineFilter::default().with_window(DateWindow::Week);
        assert_eq!(apply_filters(&edge, &week, now).len(), 1);
    }

    #[test]
    fn test_month_is_calendar_month() {
        // 2026-03-31 minus one month clamps to 2026-02-28
        let now = "2026-03-31T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let cutoff = DateWindow::Month.cutoff(now).unwrap();
        assert_eq!(cutoff, "2026-02-28T12:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_ties_keep_aggregation_order() {
        let now = fixed_now();
        let t = now - Duration::hours(1);
        let activities = vec![
            activity("memory-1", ActivityType::Memory, "a", t),
            activity("task-1", ActivityType::Task, "b", t),
            activity("brief-1", ActivityType::Brief, "c", t),
        ];
        let out = apply_filters(&activities, &TimelineFilter::default(), now);
        assert_eq!(ids(&out), vec!["memory-1", "task-1", "brief-1"]);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let filter = TimelineFilter::default()
            .with_search("a")
            .with_window(DateWindow::Month);
        let once = apply_filters(&sample(), &filter, fixed_now());
        let twice = apply_filters(&once, &filter, fixed_now());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_superset_type_set_is_monotonic() {
        let narrow = TimelineFilter::default().with_types([ActivityType::Task]);
        let wide = TimelineFilter::default().with_types([ActivityType::Task, ActivityType::Memory]);
        let narrow_out = apply_filters(&sample(), &narrow, fixed_now());
        let wide_out = apply_filters(&sample(), &wide, fixed_now());
        for a in &narrow_out {
            assert!(wide_out.iter().any(|b| b.id == a.id));
        }
    }

    #[test]
    fn test_matches_agrees_with_pipeline() {
        let filter = TimelineFilter::default().with_window(DateWindow::Week);
        let kept = sample()
            .iter()
            .filter(|a| filter.matches(a, fixed_now()))
            .count();
        assert_eq!(kept, apply_filters(&sample(), &filter, fixed_now()).len());
    }

    #[test]
    fn test_date_window_parse() {
        assert_eq!("Week".parse::<DateWindow>().unwrap(), DateWindow::Week);
        assert!(matches!(
            "year".parse::<DateWindow>(),
            Err(EngineError::UnknownDateWindow(_))
        ));
    }

    #[test]
    fn test_type_counts_include_zeroes() {
        let counts = type_counts(&sample()[..2]);
        assert_eq!(counts[&ActivityType::Memory], 1);
        assert_eq!(counts[&ActivityType::Task], 1);
        assert_eq!(counts[&ActivityType::Brief], 0);
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn test_empty_input_any_filter() {
        let filter = TimelineFilter::default()
            .with_search("x")
            .with_window(DateWindow::Week);
        assert!(apply_filters(&[], &filter, fixed_now()).is_empty());
    }
}

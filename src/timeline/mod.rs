//! Project activity timeline.
//!
//! ```text
//! memories ─┐
//! progress ─┤
//! tasks ────┼─► aggregator ─► filter (type → search → window → sort) ─► view
//! thinking ─┤                                                           │
//! briefs ───┘                                               format (relative time)
//! ```

pub mod aggregator;
pub mod filter;
pub mod format;
pub mod models;
pub mod view;

pub use aggregator::{aggregate_activities, ActivityAggregator, ActivitySources};
pub use filter::{apply_filters, type_counts, DateWindow, TimelineFilter};
pub use format::{format_relative_time, truncate_text};
pub use models::{
    Activity, ActivityColor, ActivityType, Brief, Memory, MilestoneType, ProgressEntry, Task,
    TaskStatus,
};
pub use view::{build_timeline, DayGroup, TimelineEntry, TimelineView};

//! Insight Engine
//!
//! Derived views over a project's already-fetched records:
//! - Thought graph construction for sequential-reasoning sessions
//! - Deterministic grid layout of those graphs for visualization
//! - Aggregation of memories, progress, tasks, thinking sequences and briefs
//!   into one activity timeline
//! - Timeline filtering, ordering and relative-time labels
//!
//! Every transformation is pure and synchronous; re-run it whenever the
//! snapshot or the filter state changes.

pub mod error;
pub mod snapshot;
pub mod thinking;
pub mod timeline;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{EngineError, Result};
pub use snapshot::ProjectSnapshot;

use serde::Deserialize;
use std::path::Path;
use thinking::layout::LayoutConfig;
use timeline::aggregator::{ActivityAggregator, DEFAULT_DESCRIPTION_LIMIT};
use timeline::filter::{DateWindow, TimelineFilter};
use timeline::models::ActivityType;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub layout: LayoutConfig,
    pub timeline: TimelineYamlConfig,
}

/// Timeline configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimelineYamlConfig {
    /// Initial date window for a fresh filter state
    pub default_window: DateWindow,
    /// Initial type selection for a fresh filter state
    pub default_types: Vec<ActivityType>,
    /// Description bound in characters
    pub description_limit: usize,
}

impl Default for TimelineYamlConfig {
    fn default() -> Self {
        Self {
            default_window: DateWindow::All,
            default_types: ActivityType::ALL.to_vec(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub layout: LayoutConfig,
    pub default_window: DateWindow,
    pub default_types: Vec<ActivityType>,
    pub description_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let yaml = YamlConfig::default();
        Self {
            layout: yaml.layout,
            default_window: yaml.timeline.default_window,
            default_types: yaml.timeline.default_types,
            description_limit: yaml.timeline.description_limit,
        }
    }
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "insight.yaml" in CWD. A missing or
    /// unparsable file falls back to defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        let default_window = match std::env::var("INSIGHT_DEFAULT_WINDOW") {
            Ok(raw) => raw.parse()?,
            Err(_) => yaml.timeline.default_window,
        };

        let config = Self {
            layout: LayoutConfig {
                columns_per_row: env_parse("INSIGHT_COLUMNS_PER_ROW")
                    .unwrap_or(yaml.layout.columns_per_row),
                cell_width: env_parse("INSIGHT_CELL_WIDTH").unwrap_or(yaml.layout.cell_width),
                cell_height: env_parse("INSIGHT_CELL_HEIGHT").unwrap_or(yaml.layout.cell_height),
                margin: env_parse("INSIGHT_MARGIN").unwrap_or(yaml.layout.margin),
            },
            default_window,
            default_types: yaml.timeline.default_types,
            description_limit: yaml.timeline.description_limit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot lay out or render.
    pub fn validate(&self) -> Result<()> {
        if self.layout.columns_per_row == 0 {
            return Err(EngineError::InvalidConfig(
                "layout.columns_per_row must be at least 1".to_string(),
            ));
        }
        if !(self.layout.cell_width > 0.0 && self.layout.cell_height > 0.0) {
            return Err(EngineError::InvalidConfig(
                "layout cell sizes must be positive".to_string(),
            ));
        }
        if !(self.layout.margin >= 0.0) {
            return Err(EngineError::InvalidConfig(
                "layout.margin must not be negative".to_string(),
            ));
        }
        if self.description_limit == 0 {
            return Err(EngineError::InvalidConfig(
                "timeline.description_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Initial filter state for a fresh timeline.
    pub fn default_filter(&self) -> TimelineFilter {
        TimelineFilter::default()
            .with_types(self.default_types.iter().copied())
            .with_window(self.default_window)
    }

    pub fn aggregator(&self) -> ActivityAggregator {
        ActivityAggregator::new(self.description_limit)
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("insight.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    let raw = std::env::var(var).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid value", var, raw);
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

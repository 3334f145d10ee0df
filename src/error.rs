//! Error types for the engine's fallible surface.
//!
//! The transformations themselves never fail: malformed references, empty
//! inputs and missing sources all degrade to a smaller result. Errors only
//! arise at the edges: reading snapshot files, parsing configuration, and
//! parsing filter values supplied as strings.

use std::path::PathBuf;

/// Errors raised while loading inputs or configuration.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown activity type: {0}")]
    UnknownActivityType(String),

    #[error("unknown date window: {0} (expected all, week or month)")]
    UnknownDateWindow(String),
}

/// Library result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::UnknownDateWindow("year".to_string());
        assert_eq!(
            err.to_string(),
            "unknown date window: year (expected all, week or month)"
        );

        let err = EngineError::InvalidConfig("columns_per_row must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: columns_per_row must be >= 1"
        );
    }

    #[test]
    fn test_snapshot_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: EngineError = parse_err.into();
        assert!(matches!(err, EngineError::Snapshot(_)));
        assert!(err.to_string().starts_with("invalid snapshot:"));
    }
}

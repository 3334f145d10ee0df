//! Insight Engine - CLI
//!
//! Renders the reasoning graph or the activity timeline of a project
//! snapshot file as JSON.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use insight_engine::thinking::{build_sequence_graph, layout_graph, SequenceSummary, ThoughtGraph};
use insight_engine::timeline::{build_timeline, ActivityType, DateWindow};
use insight_engine::{Config, ProjectSnapshot};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Reasoning graph and project timeline views over a snapshot")]
struct Cli {
    /// Path to the YAML config file (default: ./insight.yaml)
    #[arg(long, env = "INSIGHT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out the thought graph of one thinking sequence
    Graph {
        /// Snapshot JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Thinking sequence ID
        #[arg(short, long)]
        sequence: i64,
    },

    /// Print the filtered project timeline
    Timeline {
        /// Snapshot JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated activity types (default from config)
        #[arg(long, value_delimiter = ',')]
        types: Option<Vec<ActivityType>>,

        /// Case-insensitive search over titles and descriptions
        #[arg(long, default_value = "")]
        search: String,

        /// Date window: all, week or month (default from config)
        #[arg(long)]
        window: Option<DateWindow>,

        /// Group entries by day
        #[arg(long)]
        by_day: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, so stdout stays valid JSON)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,insight_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_yaml_and_env(cli.config.as_deref()).context("loading config")?;

    let output = match cli.command {
        Commands::Graph { input, sequence } => run_graph(&config, &input, sequence)?,
        Commands::Timeline {
            input,
            types,
            search,
            window,
            by_day,
        } => run_timeline(&config, &input, types, search, window, by_day)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_graph(config: &Config, input: &Path, sequence_id: i64) -> Result<serde_json::Value> {
    let snapshot = ProjectSnapshot::from_path(input)
        .with_context(|| format!("reading snapshot {}", input.display()))?;

    let Some(sequence) = snapshot.sequence(sequence_id) else {
        tracing::warn!("Thinking sequence {} not found in snapshot", sequence_id);
        let placeholder = layout_graph(&ThoughtGraph::default(), &config.layout);
        return Ok(json!({ "sequence_id": sequence_id, "layout": placeholder }));
    };

    let graph = build_sequence_graph(sequence);
    let layout = layout_graph(&graph, &config.layout);
    let summary = SequenceSummary::from_graph(&graph);

    Ok(json!({
        "sequence_id": sequence.id,
        "goal": sequence.goal,
        "is_complete": sequence.is_complete,
        "summary": summary,
        "layout": layout,
    }))
}

fn run_timeline(
    config: &Config,
    input: &Path,
    types: Option<Vec<ActivityType>>,
    search: String,
    window: Option<DateWindow>,
    by_day: bool,
) -> Result<serde_json::Value> {
    let snapshot = ProjectSnapshot::from_path(input)
        .with_context(|| format!("reading snapshot {}", input.display()))?;

    let mut filter = config.default_filter().with_search(search);
    if let Some(types) = types {
        filter = filter.with_types(types);
    }
    if let Some(window) = window {
        filter = filter.with_window(window);
    }

    let view = build_timeline(&config.aggregator(), &snapshot.sources(), &filter, Utc::now());
    tracing::info!(
        "Timeline: {} of {} activities shown",
        view.entries.len(),
        view.total
    );

    if by_day {
        Ok(json!({
            "total": view.total,
            "counts": view.counts,
            "days": view.group_by_day(),
        }))
    } else {
        Ok(serde_json::to_value(&view)?)
    }
}

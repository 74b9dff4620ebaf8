//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Longest history or trend series a report may ask for.
pub const MAX_MONTHS: u32 = 120;

/// Adoption Insights - AI adoption dashboard from employee datasets
///
/// Loads employee adoption records from JSON datasets and prints one
/// dashboard view (scorecard, leaderboard, ROI, trends, ...) as Markdown
/// or JSON.
///
/// Examples:
///   adoption-insights
///   adoption-insights --source data/ --view leaderboard --format json
///   adoption-insights --view department --department-id 2
///   adoption-insights --view history --months 6 --user-id 1042
///   adoption-insights --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Dataset sources, in load order (comma-separated)
    ///
    /// Each entry is a JSON file, a directory of JSON files, a file:// URI or
    /// an http(s):// URL. Overrides the sources from the config file.
    #[arg(short, long, value_name = "SOURCES", value_delimiter = ',')]
    pub source: Option<Vec<String>>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .adoption-insights.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dashboard view to produce
    #[arg(long, default_value = "dashboard", value_name = "VIEW")]
    pub view: View,

    /// Department for the department view (1-based id)
    ///
    /// Defaults to the selected user's department.
    #[arg(long, value_name = "ID")]
    pub department_id: Option<usize>,

    /// Show personal views for this user instead of the first loaded record
    #[arg(short, long, value_name = "ID")]
    pub user_id: Option<u32>,

    /// Months covered by the history and trends views
    #[arg(long, value_name = "COUNT")]
    pub months: Option<u32>,

    /// Currency value of one saved hour for the ROI view
    #[arg(long, value_name = "RATE")]
    pub hourly_rate: Option<f64>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seed for the leaderboard's placeholder values
    ///
    /// Without a seed those values change on every run.
    #[arg(long, value_name = "SEED", env = "ADOPTION_INSIGHTS_SEED")]
    pub seed: Option<u64>,

    /// Timeout in seconds for each remote source
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .adoption-insights.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Named dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    /// Full dashboard: scorecard, leaderboard, ROI, departments, trends
    Dashboard,
    Profile,
    Scorecard,
    History,
    Department,
    Leaderboard,
    Points,
    Roi,
    Trends,
    Tools,
    Learning,
    Badges,
    Challenges,
    Notifications,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(months) = self.months {
            if months == 0 || months > MAX_MONTHS {
                return Err(format!("Months must be between 1 and {}", MAX_MONTHS));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(rate) = self.hourly_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err("Hourly rate must be a non-negative number".to_string());
            }
        }

        if let Some(ref sources) = self.source {
            if sources.iter().all(|s| s.trim().is_empty()) {
                return Err("At least one non-empty --source is required".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the config file's `general.verbose`. `--quiet`
    /// wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

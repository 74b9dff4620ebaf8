//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.adoption-insights.toml` files.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::{DEFAULT_HOURLY_RATE, LEADERBOARD_LIMIT, LEARNING_HOURS_TARGET};
use crate::cli::{OutputFormat, MAX_MONTHS};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".adoption-insights.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset sources.
    #[serde(default)]
    pub data: DataConfig,

    /// Metric constants.
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Organisation details.
    #[serde(default)]
    pub organization: OrganizationConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report output path. Printed to stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Where employee records come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Ordered dataset sources: files, directories, `file://` or `http(s)://`.
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// Per-request timeout for remote sources. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            timeout_seconds: None,
        }
    }
}

fn default_sources() -> Vec<String> {
    vec![
        "data/users_testdata_sample.json",
        "data/users_comprehensive_testdata_part1.json",
        "data/users_comprehensive_testdata_part2.json",
        "data/users_testdata_batch2.json",
        "data/users_testdata.json",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Constants used by the aggregated views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Currency value of one saved hour.
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,

    /// Maximum leaderboard rows.
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: usize,

    /// Learning hours that count as 100% progress.
    #[serde(default = "default_learning_hours_target")]
    pub learning_hours_target: f64,

    /// Months in the personal adoption history.
    #[serde(default = "default_history_months")]
    pub history_months: u32,

    /// Months in the organisation trend series.
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            hourly_rate: default_hourly_rate(),
            leaderboard_limit: default_leaderboard_limit(),
            learning_hours_target: default_learning_hours_target(),
            history_months: default_history_months(),
            trend_months: default_trend_months(),
        }
    }
}

fn default_hourly_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}

fn default_leaderboard_limit() -> usize {
    LEADERBOARD_LIMIT
}

fn default_learning_hours_target() -> f64 {
    LEARNING_HOURS_TARGET
}

fn default_history_months() -> u32 {
    12
}

fn default_trend_months() -> u32 {
    6
}

/// Organisation details used for derived links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationConfig {
    /// Domain appended to generated profile emails.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Base URL for tool single sign-on links.
    #[serde(default = "default_sso_base_url")]
    pub sso_base_url: String,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
            sso_base_url: default_sso_base_url(),
        }
    }
}

fn default_email_domain() -> String {
    "dewa.gov.ae".to_string()
}

fn default_sso_base_url() -> String {
    "https://tools.dewa.gov.ae".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Leaderboard rows shown in the Markdown dashboard.
    #[serde(default = "default_leaderboard_rows")]
    pub leaderboard_rows: usize,

    /// Include the per-department table in the dashboard.
    #[serde(default = "default_true")]
    pub include_departments: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            leaderboard_rows: default_leaderboard_rows(),
            include_departments: true,
        }
    }
}

fn default_leaderboard_rows() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check the values serde accepts but the views cannot use.
    pub fn validate(&self) -> Result<()> {
        let metrics = &self.metrics;

        for (key, months) in [
            ("history_months", metrics.history_months),
            ("trend_months", metrics.trend_months),
        ] {
            ensure!(
                (1..=MAX_MONTHS).contains(&months),
                "metrics.{} must be between 1 and {}, got {}",
                key,
                MAX_MONTHS,
                months
            );
        }

        ensure!(
            metrics.hourly_rate.is_finite() && metrics.hourly_rate >= 0.0,
            "metrics.hourly_rate must be a non-negative number"
        );
        ensure!(
            metrics.learning_hours_target.is_finite(),
            "metrics.learning_hours_target must be a finite number"
        );

        Ok(())
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref sources) = args.source {
            self.data.sources = sources.clone();
        }

        if let Some(timeout) = args.timeout {
            self.data.timeout_seconds = Some(timeout);
        }

        if let Some(format) = args.format {
            self.general.format = format;
        }

        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }

        if let Some(months) = args.months {
            self.metrics.history_months = months;
            self.metrics.trend_months = months;
        }

        if let Some(rate) = args.hourly_rate {
            self.metrics.hourly_rate = rate;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

//! Adoption Insights - AI adoption dashboard over employee datasets
//!
//! A CLI tool that loads employee adoption records from static JSON
//! datasets and renders dashboard views (scorecard, leaderboard, ROI,
//! department overviews, trends) as Markdown or JSON.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, config, unknown user, write failure)

mod analysis;
mod catalog;
mod cli;
mod config;
mod models;
mod report;
mod store;

use analysis::placeholder::{self, PlaceholderSource};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cli::{Args, OutputFormat, View};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::EmployeeRecord;
use report::{Dashboard, DashboardMetadata, ViewData};
use std::path::PathBuf;
use std::time::Duration;
use store::{DatasetReader, LoadSummary, RecordStore};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config comes first so `general.verbose` can raise the log level
    let (mut config, origin) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, &config);

    info!("Adoption Insights v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    origin.log();

    if let Err(e) = run(args, config).await {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default config file.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE_NAME);
    println!("   Edit it to change data sources, metric constants and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so a report printed on stdout stays clean.
fn init_logging(args: &Args, config: &Config) {
    let level = args.log_level(config.general.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the datasets and emit the requested view.
async fn run(args: Args, config: Config) -> Result<()> {
    let now = Utc::now();
    let reader = DatasetReader::new(config.data.timeout_seconds.map(Duration::from_secs))
        .context("Failed to create HTTP client")?;

    let mut store = RecordStore::new(now.date_naive());
    let progress = if args.quiet {
        None
    } else {
        Some(load_progress_bar())
    };

    let summary = store
        .load_with_progress(&reader, &config.data.sources, progress.as_ref())
        .await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    for failure in &summary.failures {
        debug!("Source {} skipped: {}", failure.source, failure.reason);
    }

    let user = select_user(&store, args.user_id)?;

    let mut placeholders = match args.seed {
        Some(seed) => placeholder::seeded(seed),
        None => placeholder::from_entropy(),
    };

    let context = ViewContext {
        store: &store,
        user,
        config: &config,
        summary: &summary,
        now,
        department_id: args.department_id,
    };
    let view = build_view(args.view, &context, &mut placeholders);

    let output = match config.general.format {
        OutputFormat::Json => report::generate_json_report(&view)?,
        OutputFormat::Markdown => report::generate_markdown_report(&view),
    };

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path))?;
            info!("Report saved to {}", path);
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn load_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Where the configuration came from. Logged once logging is set up.
#[derive(Debug, PartialEq)]
enum ConfigOrigin {
    File(PathBuf),
    Defaults,
    DefaultsAfterError(String),
}

impl ConfigOrigin {
    fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("Loaded config from {}", path.display()),
            ConfigOrigin::Defaults => debug!("No config file found, using defaults"),
            ConfigOrigin::DefaultsAfterError(reason) => {
                warn!("Failed to load config: {}", reason)
            }
        }
    }
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` that fails is an error. A broken default file
/// falls back to the defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigOrigin)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigOrigin::File(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((
            config,
            ConfigOrigin::File(PathBuf::from(config::CONFIG_FILE_NAME)),
        )),
        Ok(None) => Ok((Config::default(), ConfigOrigin::Defaults)),
        Err(e) => Ok((
            Config::default(),
            ConfigOrigin::DefaultsAfterError(format!("{:#}", e)),
        )),
    }
}

/// The user personal views are about: `user_id` if given, else the store's
/// current user.
fn select_user(store: &RecordStore, user_id: Option<u32>) -> Result<&EmployeeRecord> {
    match user_id {
        Some(id) => store
            .find(id)
            .with_context(|| format!("No employee with ID {} in the loaded datasets", id)),
        None => Ok(store.current_user()),
    }
}

/// Everything a view may draw on.
struct ViewContext<'a> {
    store: &'a RecordStore,
    user: &'a EmployeeRecord,
    config: &'a Config,
    summary: &'a LoadSummary,
    now: DateTime<Utc>,
    department_id: Option<usize>,
}

/// Compute the requested view.
fn build_view<P>(view: View, ctx: &ViewContext<'_>, placeholders: &mut P) -> ViewData
where
    P: PlaceholderSource + ?Sized,
{
    let records = ctx.store.all();
    let metrics = &ctx.config.metrics;
    let today = ctx.now.date_naive();

    match view {
        View::Dashboard => {
            let mut leaderboard =
                analysis::leaderboard(records, metrics.leaderboard_limit, placeholders);
            leaderboard.truncate(ctx.config.report.leaderboard_rows);

            let departments = if ctx.config.report.include_departments {
                analysis::all_department_overviews(records)
            } else {
                Vec::new()
            };

            ViewData::Dashboard(Box::new(Dashboard {
                metadata: DashboardMetadata {
                    generated_at: ctx.now,
                    sources_loaded: ctx.summary.sources_loaded,
                    sources_failed: ctx.summary.failures.len(),
                    records_loaded: records.len(),
                    fallback_used: ctx.summary.fallback_used,
                },
                profile: analysis::profile(ctx.user, &ctx.config.organization.email_domain),
                scorecard: analysis::scorecard(ctx.user, metrics.learning_hours_target),
                points: analysis::points(ctx.user, records),
                roi: analysis::roi_summary(records, metrics.hourly_rate),
                leaderboard,
                departments,
                trends: analysis::trends(metrics.trend_months, today, records),
            }))
        }
        View::Profile => ViewData::Profile(analysis::profile(
            ctx.user,
            &ctx.config.organization.email_domain,
        )),
        View::Scorecard => {
            ViewData::Scorecard(analysis::scorecard(ctx.user, metrics.learning_hours_target))
        }
        View::History => ViewData::History(analysis::adoption_history(
            ctx.user,
            metrics.history_months,
            today,
        )),
        View::Department => {
            let department_id = ctx.department_id.unwrap_or_else(|| ctx.user.department.id());
            ViewData::Department(analysis::department_overview(department_id, records))
        }
        View::Leaderboard => ViewData::Leaderboard(analysis::leaderboard(
            records,
            metrics.leaderboard_limit,
            placeholders,
        )),
        View::Points => ViewData::Points(analysis::points(ctx.user, records)),
        View::Roi => ViewData::Roi(analysis::roi_summary(records, metrics.hourly_rate)),
        View::Trends => {
            ViewData::Trends(analysis::trends(metrics.trend_months, today, records))
        }
        View::Tools => ViewData::Tools {
            tools: catalog::tools(&ctx.config.organization.sso_base_url),
            categories: catalog::tool_categories(),
        },
        View::Learning => ViewData::Learning {
            resources: catalog::learning_resources(),
            progress: analysis::learning_progress(ctx.user, ctx.now),
        },
        View::Badges => ViewData::Badges(catalog::badges()),
        View::Challenges => ViewData::Challenges(catalog::challenges()),
        View::Notifications => ViewData::Notifications(catalog::notifications(ctx.now)),
    }
}

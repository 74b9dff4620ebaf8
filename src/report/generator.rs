//! Markdown and JSON rendering of dashboard views.
//!
//! This module turns the aggregated views into the text the CLI prints or
//! writes to disk.

use crate::catalog::{Badge, Challenge, LearningResource, Notification, Tool};
use crate::models::{
    DepartmentOverview, HistoryEntry, LeaderboardEntry, LearningProgress, PointsSummary, Profile,
    RoiSummary, Scorecard, TrendPoint,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How the record store was filled for this report.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetadata {
    pub generated_at: DateTime<Utc>,
    pub sources_loaded: usize,
    pub sources_failed: usize,
    pub records_loaded: usize,
    pub fallback_used: bool,
}

/// Every headline view in one document.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub metadata: DashboardMetadata,
    pub profile: Profile,
    pub scorecard: Scorecard,
    pub points: PointsSummary,
    pub roi: RoiSummary,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub departments: Vec<DepartmentOverview>,
    pub trends: Vec<TrendPoint>,
}

/// One rendered view.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    Dashboard(Box<Dashboard>),
    Profile(Profile),
    Scorecard(Scorecard),
    History(Vec<HistoryEntry>),
    Department(DepartmentOverview),
    Leaderboard(Vec<LeaderboardEntry>),
    Points(PointsSummary),
    Roi(RoiSummary),
    Trends(Vec<TrendPoint>),
    Tools {
        tools: Vec<Tool>,
        categories: Vec<String>,
    },
    Learning {
        resources: Vec<LearningResource>,
        progress: Vec<LearningProgress>,
    },
    Badges(Vec<Badge>),
    Challenges(Vec<Challenge>),
    Notifications(Vec<Notification>),
}

/// Generate a JSON document for a view.
pub fn generate_json_report(view: &ViewData) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(Into::into)
}

/// Generate a Markdown document for a view.
pub fn generate_markdown_report(view: &ViewData) -> String {
    match view {
        ViewData::Dashboard(dashboard) => generate_dashboard(dashboard),
        ViewData::Profile(profile) => generate_profile_section(profile),
        ViewData::Scorecard(scorecard) => generate_scorecard_section(scorecard),
        ViewData::History(history) => generate_history_section(history),
        ViewData::Department(overview) => {
            generate_departments_section(std::slice::from_ref(overview))
        }
        ViewData::Leaderboard(entries) => generate_leaderboard_section(entries),
        ViewData::Points(points) => generate_points_section(points),
        ViewData::Roi(roi) => generate_roi_section(roi),
        ViewData::Trends(trends) => generate_trends_section(trends),
        ViewData::Tools { tools, categories } => generate_tools_section(tools, categories),
        ViewData::Learning {
            resources,
            progress,
        } => generate_learning_section(resources, progress),
        ViewData::Badges(badges) => generate_badges_section(badges),
        ViewData::Challenges(challenges) => generate_challenges_section(challenges),
        ViewData::Notifications(notifications) => generate_notifications_section(notifications),
    }
}

/// Generate the full dashboard.
fn generate_dashboard(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    output.push_str("# AI Adoption Dashboard\n\n");
    output.push_str(&generate_metadata_section(&dashboard.metadata));
    output.push_str(&generate_profile_section(&dashboard.profile));
    output.push_str(&generate_scorecard_section(&dashboard.scorecard));
    output.push_str(&generate_points_section(&dashboard.points));
    output.push_str(&generate_leaderboard_section(&dashboard.leaderboard));
    output.push_str(&generate_roi_section(&dashboard.roi));

    if !dashboard.departments.is_empty() {
        output.push_str(&generate_departments_section(&dashboard.departments));
    }

    output.push_str(&generate_trends_section(&dashboard.trends));
    output.push_str(&generate_footer());

    output
}

fn generate_metadata_section(metadata: &DashboardMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Data\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Sources Loaded:** {}\n", metadata.sources_loaded));
    if metadata.sources_failed > 0 {
        section.push_str(&format!("- **Sources Failed:** {}\n", metadata.sources_failed));
    }
    section.push_str(&format!("- **Employees:** {}\n", metadata.records_loaded));
    if metadata.fallback_used {
        section.push_str("- **Note:** no dataset loaded, showing the sample employee\n");
    }
    section.push('\n');

    section
}

fn generate_profile_section(profile: &Profile) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", profile.display_name));
    section.push_str(&format!(
        "*{} | {} | {}*\n\n",
        profile.role, profile.department_name, profile.email
    ));
    section.push_str(&format!(
        "- **Employee ID:** {}\n- **Hire Date:** {}\n- **Status:** {}\n\n",
        profile.employee_id, profile.hire_date, profile.status
    ));

    section
}

fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

fn generate_scorecard_section(scorecard: &Scorecard) -> String {
    let mut section = String::new();

    section.push_str("## Scorecard\n\n");
    section.push_str("| Adoption Score | Change | Tasks Automated | Hours Saved | Tools Used | Learning |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| **{}** | {} | {} | {:.1} | {} | {}% |\n\n",
        scorecard.current_score,
        signed(scorecard.month_change),
        scorecard.tasks_automated,
        scorecard.hours_saved,
        scorecard.tools_used,
        scorecard.learning_progress
    ));

    if !scorecard.trends.is_empty() {
        let trend: Vec<String> = scorecard.trends.iter().map(|s| s.to_string()).collect();
        section.push_str(&format!("Trend: {}\n\n", trend.join(" → ")));
    }

    section
}

fn generate_history_section(history: &[HistoryEntry]) -> String {
    let mut section = String::new();

    section.push_str("## Adoption History\n\n");
    if history.is_empty() {
        section.push_str("No history available.\n\n");
        return section;
    }

    section.push_str("| Month | Score | Tasks | Hours Saved | Tools | Learning Hours |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|:---:|\n");
    for entry in history {
        section.push_str(&format!(
            "| {}-{:02} | {} | {} | {} | {} | {} |\n",
            entry.year,
            entry.month,
            entry.adoption_score,
            entry.tasks_ai_assisted,
            entry.hours_saved,
            entry.tools_explored,
            entry.learning_hours
        ));
    }
    section.push('\n');

    section
}

fn generate_points_section(points: &PointsSummary) -> String {
    let rank = if points.rank == 0 {
        "unranked".to_string()
    } else {
        format!("#{}", points.rank)
    };

    format!(
        "## Points\n\n- **Total:** {}\n- **This Month:** {}\n- **Rank:** {}\n\n",
        points.total_points, points.month_points, rank
    )
}

/// Escape text for a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn generate_leaderboard_section(entries: &[LeaderboardEntry]) -> String {
    let mut section = String::new();

    section.push_str("## Leaderboard\n\n");
    if entries.is_empty() {
        section.push_str("No employees on the leaderboard yet.\n\n");
        return section;
    }

    section.push_str("| Rank | Employee | Department | Points | Score | Badges | Title |\n");
    section.push_str("|:---:|:---|:---|:---:|:---:|:---|:---|\n");
    for entry in entries {
        let badges = if entry.badge_list.is_empty() {
            "-".to_string()
        } else {
            entry.badge_list.join(", ")
        };
        section.push_str(&format!(
            "| {} {} | {} | {} | {} | {} | {} | {} |\n",
            entry.achievement_badge,
            entry.rank,
            cell(&entry.display_name),
            cell(&entry.department),
            entry.points,
            entry.adoption_score,
            cell(&badges),
            cell(entry.title.as_deref().unwrap_or(""))
        ));
    }
    section.push('\n');

    section
}

fn generate_roi_section(roi: &RoiSummary) -> String {
    let mut section = String::new();

    section.push_str("## Return on Investment\n\n");
    section.push_str(&format!("- **Hours Saved:** {:.1}\n", roi.total_hours_saved));
    section.push_str(&format!("- **Hourly Rate:** {:.2} AED\n", roi.hourly_rate));
    section.push_str(&format!("- **Total ROI:** {:.0} AED\n", roi.total_roi_aed));
    section.push_str(&format!("- **Users Impacted:** {}\n", roi.users_impacted));
    section.push_str(&format!("- **ROI per User:** {} AED\n\n", roi.roi_per_user));

    section
}

fn generate_departments_section(overviews: &[DepartmentOverview]) -> String {
    let mut section = String::new();

    section.push_str("## Departments\n\n");
    section.push_str("| ID | Department | Employees | Avg Score | Participation | Hours Saved |\n");
    section.push_str("|:---:|:---|:---:|:---:|:---:|:---:|\n");
    for overview in overviews {
        section.push_str(&format!(
            "| {} | {} | {} | {:.1} | {:.1}% | {:.1} |\n",
            overview.department_id,
            cell(&overview.department_name),
            overview.total_employees,
            overview.avg_score,
            overview.participation_rate,
            overview.total_hours_saved
        ));
    }
    section.push('\n');

    section
}

fn generate_trends_section(trends: &[TrendPoint]) -> String {
    let mut section = String::new();

    section.push_str("## Organisation Trends\n\n");
    if trends.is_empty() {
        section.push_str("No trend data.\n\n");
        return section;
    }

    section.push_str("| Month | Avg Score | Hours Saved | Avg Tasks | Active Users |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|\n");
    for point in trends {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            point.month,
            point.avg_adoption_score,
            point.total_hours_saved,
            point.avg_tasks_automated,
            point.users_active
        ));
    }
    section.push('\n');

    section
}

fn generate_tools_section(tools: &[Tool], categories: &[String]) -> String {
    let mut section = String::new();

    section.push_str("## AI Tools\n\n");
    section.push_str("| Tool | Category | Approval | Link |\n");
    section.push_str("|:---|:---|:---:|:---|\n");
    for tool in tools {
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            cell(&tool.name),
            cell(&tool.category),
            if tool.requires_approval { "yes" } else { "no" },
            cell(&tool.sso_url)
        ));
    }
    section.push('\n');

    if !categories.is_empty() {
        section.push_str(&format!("Categories: {}\n\n", categories.join(", ")));
    }

    section
}

fn generate_learning_section(resources: &[LearningResource], progress: &[LearningProgress]) -> String {
    let mut section = String::new();

    section.push_str("## Learning Resources\n\n");
    section.push_str("| Title | Type | Provider | Level | Minutes |\n");
    section.push_str("|:---|:---|:---|:---|:---:|\n");
    for resource in resources {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            cell(&resource.title),
            resource.resource_type,
            cell(&resource.provider),
            resource.difficulty_level,
            resource.duration_minutes
        ));
    }
    section.push('\n');

    section.push_str("### Completed\n\n");
    if progress.is_empty() {
        section.push_str("Nothing completed yet.\n\n");
    } else {
        for item in progress {
            section.push_str(&format!(
                "- Resource {}: {} on {}\n",
                item.resource_id,
                item.status,
                item.completed_at.format("%Y-%m-%d")
            ));
        }
        section.push('\n');
    }

    section
}

fn generate_badges_section(badges: &[Badge]) -> String {
    let mut section = String::from("## Badges\n\n");
    for badge in badges {
        section.push_str(&format!("- **{}** (level {}): {}\n", badge.name, badge.level, badge.description));
    }
    section.push('\n');
    section
}

fn generate_challenges_section(challenges: &[Challenge]) -> String {
    let mut section = String::from("## Challenges\n\n");
    for challenge in challenges {
        section.push_str(&format!(
            "- **{}** ({} points): {}\n",
            challenge.title, challenge.reward_points, challenge.description
        ));
    }
    section.push('\n');
    section
}

fn generate_notifications_section(notifications: &[Notification]) -> String {
    let mut section = String::from("## Notifications\n\n");
    for notification in notifications {
        let marker = if notification.is_read { " " } else { "*" };
        section.push_str(&format!(
            "- {} {} ({}): {}\n",
            marker,
            notification.title,
            notification.created_at.format("%Y-%m-%d %H:%M"),
            notification.message
        ));
    }
    section.push('\n');
    section
}

fn generate_footer() -> String {
    "---\n\n*Streaks, participation rates and organisation trends are illustrative values.*\n"
        .to_string()
}

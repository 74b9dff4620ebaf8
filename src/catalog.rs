//! Static catalogs served next to the aggregated views: AI tools, learning
//! resources, badges, challenges and notifications.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const TOOL_NAMES: [&str; 7] = [
    "Copilot for M365",
    "AI Chatbot",
    "Document Summarizer",
    "Data Insight Assistant",
    "Process Optimizer",
    "Predictive Maintenance Bot",
    "Email Assistant",
];

const TOOL_CATEGORIES: [&str; 5] = [
    "Productivity",
    "Analytics",
    "Operations",
    "Learning",
    "Communication",
];

const BADGE_NAMES: [&str; 5] = [
    "First Automation",
    "AI Innovator",
    "Power User",
    "Learning Champion",
    "Productivity Master",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub tool_id: usize,
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon_url: Option<String>,
    pub sso_url: String,
    pub requires_approval: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub resource_id: usize,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub provider: String,
    pub difficulty_level: String,
    pub duration_minutes: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub badge_id: usize,
    pub name: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge_id: usize,
    pub title: String,
    pub description: String,
    pub reward_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Lowercase `name` and join its words with `-`.
fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// The AI tools catalog. `sso_base` is prefixed to each tool's slug.
pub fn tools(sso_base: &str) -> Vec<Tool> {
    let base = sso_base.trim_end_matches('/');

    TOOL_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| Tool {
            tool_id: idx + 1,
            name: name.to_string(),
            description: format!("{} - AI-powered productivity tool", name),
            category: "Productivity".to_string(),
            icon_url: None,
            sso_url: format!("{}/{}", base, slug(name)),
            // The first two tools are gated behind manager approval.
            requires_approval: idx < 2,
        })
        .collect()
}

pub fn tool_categories() -> Vec<String> {
    TOOL_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

pub fn learning_resources() -> Vec<LearningResource> {
    let entries = [
        ("Introduction to AI", "Basic AI concepts", "course", "LinkedIn Learning", "beginner", 120),
        ("Copilot for Productivity", "Master Microsoft Copilot", "course", "Microsoft Learn", "beginner", 90),
        ("AI Ethics and Governance", "Responsible AI practices", "course", "Coursera", "intermediate", 180),
        ("Advanced AI Applications", "Enterprise AI implementation", "course", "Udacity", "advanced", 240),
        ("AI in Utilities", "AI for energy and water sectors", "webinar", "DEWA Training", "intermediate", 60),
    ];

    entries
        .iter()
        .enumerate()
        .map(
            |(idx, (title, description, kind, provider, difficulty, minutes))| LearningResource {
                resource_id: idx + 1,
                title: title.to_string(),
                description: description.to_string(),
                resource_type: kind.to_string(),
                provider: provider.to_string(),
                difficulty_level: difficulty.to_string(),
                duration_minutes: *minutes,
                url: "#".to_string(),
            },
        )
        .collect()
}

pub fn badges() -> Vec<Badge> {
    BADGE_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| Badge {
            badge_id: idx + 1,
            name: name.to_string(),
            description: format!("Badge for {}", name),
            icon_url: None,
            level: 1,
        })
        .collect()
}

pub fn challenges() -> Vec<Challenge> {
    let entries = [
        ("Automation Expert", "Automate 5 tasks this month", 500),
        ("Learning Streak", "Complete 2 learning modules", 300),
        ("Tool Master", "Use 3 different AI tools", 250),
    ];

    entries
        .iter()
        .enumerate()
        .map(|(idx, (title, description, reward))| Challenge {
            challenge_id: idx + 1,
            title: title.to_string(),
            description: description.to_string(),
            reward_points: *reward,
        })
        .collect()
}

/// Sample notifications, timestamped relative to `now`.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            kind: "achievement".to_string(),
            title: "Badge Earned!".to_string(),
            message: "You've earned the 'Power User' badge".to_string(),
            is_read: false,
            created_at: now - Duration::hours(1),
        },
        Notification {
            id: 2,
            kind: "challenge".to_string(),
            title: "New Challenge".to_string(),
            message: "Join the 'Learning Streak' challenge this month".to_string(),
            is_read: false,
            created_at: now - Duration::hours(24),
        },
    ]
}

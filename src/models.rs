//! Data models for the adoption dashboard.
//!
//! This module contains the employee records loaded from the JSON datasets
//! and the derived view structures handed to the report layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Department an employee belongs to.
///
/// The declaration order is significant: a department's id is its 1-based
/// position in [`Department::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Operations,
    Engineering,
    #[serde(rename = "Customer Care")]
    CustomerCare,
    #[serde(rename = "IT")]
    It,
    Finance,
    Sustainability,
    #[serde(rename = "HR")]
    Hr,
}

impl Department {
    /// All departments in id order.
    pub const ALL: [Department; 7] = [
        Department::Operations,
        Department::Engineering,
        Department::CustomerCare,
        Department::It,
        Department::Finance,
        Department::Sustainability,
        Department::Hr,
    ];

    /// Looks up a department by its 1-based id.
    pub fn from_id(id: usize) -> Option<Self> {
        id.checked_sub(1).and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Returns the 1-based department id.
    pub fn id(&self) -> usize {
        Self::ALL
            .iter()
            .position(|d| d == self)
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }

    /// Returns the display name used by the datasets.
    pub fn name(&self) -> &'static str {
        match self {
            Department::Operations => "Operations",
            Department::Engineering => "Engineering",
            Department::CustomerCare => "Customer Care",
            Department::It => "IT",
            Department::Finance => "Finance",
            Department::Sustainability => "Sustainability",
            Department::Hr => "HR",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How often an employee reaches for AI tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageFrequency {
    #[default]
    Low,
    Medium,
    High,
}

/// Learning path tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningPath {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Coarse ROI bucket assigned by the dataset generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoiCategory {
    #[default]
    Low,
    Medium,
    High,
}

/// One employee's adoption record, as stored in the JSON datasets.
///
/// Identity fields are required. Everything else falls back to zero or empty
/// when absent from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub user_id: u32,
    pub employee_name: String,
    pub department: Department,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub join_year: i32,

    /// Adoption score, 0 to 100. Signed so that out-of-range values reach
    /// `validate` instead of failing the whole source.
    #[serde(default)]
    pub adoption_score: i32,
    #[serde(default)]
    pub ai_tools_used_count: u32,
    #[serde(default)]
    pub tasks_automated: u32,
    #[serde(default)]
    pub ai_usage_frequency: UsageFrequency,
    #[serde(default)]
    pub estimated_hours_saved: f64,
    #[serde(default)]
    pub estimated_productivity_gain_percent: f64,
    #[serde(default)]
    pub roi_category: RoiCategory,

    /// Monthly adoption scores, oldest first. The last entry normally equals
    /// `adoption_score`.
    #[serde(default)]
    pub monthly_adoption_trend: Vec<u32>,
    #[serde(default)]
    pub monthly_tasks_automated_trend: Vec<u32>,

    #[serde(default)]
    pub badges_earned: Vec<String>,
    #[serde(default)]
    pub certifications_earned: Vec<String>,
    #[serde(default)]
    pub leaderboard_points: u32,
    /// Rank as stored by the generator; ranking never reads it.
    #[serde(default)]
    pub leaderboard_rank: u32,

    #[serde(default)]
    pub tutorials_completed: u32,
    #[serde(default)]
    pub learning_hours_completed: f64,
    #[serde(default)]
    pub learning_path: LearningPath,

    #[serde(default)]
    pub ai_tools_used: Vec<String>,
    #[serde(default)]
    pub sso_enabled: bool,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

/// Reasons a parsed record is refused by the store.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("user {user_id}: adoption score {score} is outside 0-100")]
    ScoreOutOfRange { user_id: u32, score: i32 },
}

impl EmployeeRecord {
    /// Checks the invariants the deserializer cannot express.
    pub fn validate(&self) -> Result<(), RecordError> {
        if !(0..=100).contains(&self.adoption_score) {
            return Err(RecordError::ScoreOutOfRange {
                user_id: self.user_id,
                score: self.adoption_score,
            });
        }
        Ok(())
    }

    /// Synthetic record used when no dataset could be loaded.
    pub fn fallback(today: NaiveDate) -> Self {
        Self {
            user_id: 1001,
            employee_name: "Mohammed Al-Mansouri".to_string(),
            department: Department::Operations,
            role: "Operations Manager".to_string(),
            location: Some("Dubai HQ".to_string()),
            join_year: 2018,
            adoption_score: 87,
            ai_tools_used_count: 5,
            tasks_automated: 42,
            ai_usage_frequency: UsageFrequency::High,
            estimated_hours_saved: 336.0,
            estimated_productivity_gain_percent: 22.0,
            roi_category: RoiCategory::High,
            monthly_adoption_trend: vec![78, 81, 84, 85, 86, 87],
            monthly_tasks_automated_trend: vec![35, 36, 38, 40, 41, 42],
            badges_earned: vec![
                "First Automation".to_string(),
                "Power User".to_string(),
                "AI Innovator".to_string(),
                "Learning Champion".to_string(),
            ],
            certifications_earned: vec![
                "Responsible AI".to_string(),
                "Copilot Fundamentals".to_string(),
            ],
            leaderboard_points: 8750,
            leaderboard_rank: 1,
            tutorials_completed: 24,
            learning_hours_completed: 42.5,
            learning_path: LearningPath::Advanced,
            ai_tools_used: vec![
                "Copilot for M365".to_string(),
                "AI Chatbot".to_string(),
                "Document Summarizer".to_string(),
            ],
            sso_enabled: true,
            last_active_date: Some(today),
        }
    }
}

/// Employee profile card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub employee_id: u32,
    pub email: String,
    pub display_name: String,
    pub department_id: usize,
    pub department_name: String,
    pub role: String,
    pub status: String,
    pub hire_date: String,
    pub avatar_url: Option<String>,
}

/// Personal scorecard with month-over-month change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub employee_id: u32,
    pub display_name: String,
    pub current_score: i64,
    pub previous_score: i64,
    pub month_change: i64,
    pub tasks_automated: u32,
    pub hours_saved: f64,
    pub tools_used: u32,
    /// Percentage of the learning-hours target. May exceed 100.
    pub learning_progress: i64,
    pub trends: Vec<u32>,
}

/// One synthetic month of a user's adoption history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub month: u32,
    pub year: i32,
    pub adoption_score: i64,
    pub tasks_ai_assisted: i64,
    pub hours_saved: i64,
    pub tools_explored: i64,
    pub learning_hours: i64,
}

/// Department rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentOverview {
    pub department_id: usize,
    pub department_name: String,
    pub avg_score: f64,
    pub participation_rate: f64,
    pub total_hours_saved: f64,
    pub total_employees: usize,
    pub active_users: usize,
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub employee_id: u32,
    pub display_name: String,
    pub role: String,
    pub department: String,
    pub location: String,
    pub points: u32,
    pub adoption_score: i32,
    pub tasks_automated: u32,
    pub hours_saved: f64,
    pub badge_count: usize,
    pub badge_list: Vec<String>,
    pub certifications_earned: usize,
    pub ai_tools_used: u32,
    pub is_top_performer: bool,
    pub title: Option<String>,
    /// Placeholder value, not stable across calls.
    pub streak_days: u32,
    /// Placeholder value, not stable across calls.
    pub last_achievement: String,
    pub achievement_badge: String,
}

/// The current user's points and standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsSummary {
    pub employee_id: u32,
    pub total_points: u32,
    pub month_points: i64,
    /// 1-based rank, 0 when the user is not part of the collection.
    pub rank: usize,
}

/// Organisation-wide return on investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiSummary {
    pub total_hours_saved: f64,
    pub hourly_rate: f64,
    pub total_roi_aed: f64,
    pub users_impacted: usize,
    pub roi_per_user: i64,
}

/// One month of the organisation-wide trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// `YYYY-MM`
    pub month: String,
    pub avg_adoption_score: u32,
    pub total_hours_saved: u32,
    pub avg_tasks_automated: u32,
    pub users_active: usize,
}

/// Progress on one learning resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProgress {
    pub resource_id: usize,
    pub progress_percent: u32,
    pub status: String,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_ids_follow_declaration_order() {
        assert_eq!(Department::Operations.id(), 1);
        assert_eq!(Department::Hr.id(), 7);
        assert_eq!(Department::from_id(3), Some(Department::CustomerCare));
        assert_eq!(Department::from_id(0), None);
        assert_eq!(Department::from_id(8), None);
    }

    #[test]
    fn test_department_serde_names() {
        let dept: Department = serde_json::from_str("\"Customer Care\"").unwrap();
        assert_eq!(dept, Department::CustomerCare);
        assert_eq!(serde_json::to_string(&Department::It).unwrap(), "\"IT\"");
        assert!(serde_json::from_str::<Department>("\"Marketing\"").is_err());
    }

    #[test]
    fn test_record_defaults_missing_fields() {
        let json = r#"{"userId": 7, "employeeName": "Layla Al-Noor", "department": "Finance"}"#;
        let record: EmployeeRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.user_id, 7);
        assert_eq!(record.department, Department::Finance);
        assert_eq!(record.adoption_score, 0);
        assert_eq!(record.estimated_hours_saved, 0.0);
        assert!(record.badges_earned.is_empty());
        assert!(record.monthly_adoption_trend.is_empty());
        assert_eq!(record.learning_path, LearningPath::Beginner);
    }

    #[test]
    fn test_record_parses_dataset_shape() {
        let json = r#"{
            "userId": 1002,
            "employeeName": "Priya Chen",
            "department": "IT",
            "role": "Network Engineer",
            "location": "Remote",
            "joinYear": 2021,
            "adoptionScore": 72,
            "monthlyAdoptionTrend": [61, 64, 66, 69, 71, 72],
            "aiToolsUsedCount": 3,
            "tasksAutomated": 32,
            "aiUsageFrequency": "Medium",
            "badgesEarned": [],
            "leaderboardPoints": 6300,
            "leaderboardRank": 0,
            "aiToolsUsed": ["AI Chatbot"],
            "ssoEnabled": true,
            "learningPath": "Intermediate",
            "tutorialsCompleted": 18,
            "certificationsEarned": ["Responsible AI", "Copilot Fundamentals"],
            "learningHoursCompleted": 31.0,
            "estimatedHoursSaved": 256,
            "estimatedProductivityGainPercent": 14,
            "roiCategory": "Medium",
            "lastActiveDate": "2026-09-30",
            "monthlyTasksAutomatedTrend": [26, 27, 29, 30, 31, 32]
        }"#;

        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.estimated_hours_saved, 256.0);
        assert_eq!(record.ai_usage_frequency, UsageFrequency::Medium);
        assert_eq!(
            record.last_active_date,
            NaiveDate::from_ymd_opt(2026, 9, 30)
        );
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_score_above_100() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let record = EmployeeRecord {
            adoption_score: 120,
            ..EmployeeRecord::fallback(today)
        };
        assert_eq!(
            record.validate(),
            Err(RecordError::ScoreOutOfRange {
                user_id: 1001,
                score: 120
            })
        );
    }

    #[test]
    fn test_validate_rejects_negative_score() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let record = EmployeeRecord {
            adoption_score: -5,
            ..EmployeeRecord::fallback(today)
        };
        assert_eq!(
            record.validate(),
            Err(RecordError::ScoreOutOfRange {
                user_id: 1001,
                score: -5
            })
        );
    }

    #[test]
    fn test_fallback_trend_ends_at_current_score() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let record = EmployeeRecord::fallback(today);
        assert_eq!(
            record.monthly_adoption_trend.last().map(|s| i64::from(*s)),
            Some(i64::from(record.adoption_score))
        );
        assert_eq!(record.last_active_date, Some(today));
    }
}

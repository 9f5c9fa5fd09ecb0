use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Priority;

pub const MAX_PROGRESS: u8 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Daily,
    ShortTerm,
    LongTerm,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 3] = [
        GoalCategory::Daily,
        GoalCategory::ShortTerm,
        GoalCategory::LongTerm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GoalCategory::Daily => "daily",
            GoalCategory::ShortTerm => "short_term",
            GoalCategory::LongTerm => "long_term",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GoalCategory::Daily => "Daily Goals",
            GoalCategory::ShortTerm => "Short-term Goals",
            GoalCategory::LongTerm => "Long-term Goals",
        }
    }

    /// Due date pre-filled in the "add goal" form.
    pub fn default_due_date(self, today: NaiveDate) -> NaiveDate {
        match self {
            GoalCategory::Daily => today,
            GoalCategory::ShortTerm => today + Duration::days(30),
            GoalCategory::LongTerm => today
                .checked_add_months(Months::new(12))
                .unwrap_or(today + Duration::days(365)),
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "daily" => Ok(GoalCategory::Daily),
            "short_term" => Ok(GoalCategory::ShortTerm),
            "long_term" => Ok(GoalCategory::LongTerm),
            other => Err(anyhow!("invalid goal category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn derive(progress: u8, completed: bool) -> Self {
        if completed {
            GoalStatus::Completed
        } else if progress > 0 {
            GoalStatus::InProgress
        } else {
            GoalStatus::NotStarted
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "not_started",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "not started",
            GoalStatus::InProgress => "in progress",
            GoalStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub category: GoalCategory,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub progress: u8,

    #[serde(default)]
    pub completed: bool,

    pub due_date: NaiveDate,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub status: GoalStatus,
}

impl Goal {
    pub fn new(
        id: u64,
        title: String,
        description: String,
        category: GoalCategory,
        priority: Priority,
        due_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            category,
            priority,
            progress: 0,
            completed: false,
            due_date,
            created_at: now,
            status: GoalStatus::NotStarted,
        }
    }

    /// Sets progress and recomputes the derived `completed` and `status`.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(MAX_PROGRESS);
        self.completed = self.progress == MAX_PROGRESS;
        self.status = GoalStatus::derive(self.progress, self.completed);
    }

    /// Re-derives `completed` and `status` from `progress`.
    pub fn normalize(&mut self) {
        self.set_progress(self.progress);
    }
}

/// Raw input of the goal form. `id` is set when editing an existing goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalForm {
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub priority: Priority,
    pub due_date: String,
    pub progress: u8,
}

impl GoalForm {
    pub fn new(category: GoalCategory) -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            category,
            priority: Priority::Medium,
            due_date: String::new(),
            progress: 0,
        }
    }

    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            id: Some(goal.id),
            title: goal.title.clone(),
            description: goal.description.clone(),
            category: goal.category,
            priority: goal.priority,
            due_date: goal.due_date.format("%Y-%m-%d").to_string(),
            progress: goal.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_goal() -> Goal {
        Goal::new(
            1,
            "Learn Rust".to_string(),
            String::new(),
            GoalCategory::ShortTerm,
            Priority::High,
            NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        )
    }

    #[test]
    fn status_follows_progress() {
        let mut goal = sample_goal();
        assert_eq!(goal.status, GoalStatus::NotStarted);

        goal.set_progress(40);
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert!(!goal.completed);

        goal.set_progress(100);
        assert_eq!(goal.status, GoalStatus::Completed);
        assert!(goal.completed);

        goal.set_progress(0);
        assert_eq!(goal.status, GoalStatus::NotStarted);
        assert!(!goal.completed);
    }

    #[test]
    fn progress_is_clamped() {
        let mut goal = sample_goal();
        goal.set_progress(250);
        assert_eq!(goal.progress, 100);
        assert!(goal.completed);
    }

    #[test]
    fn normalize_repairs_inconsistent_documents() {
        let raw = r#"{"id":3,"title":"Exercise","description":"","category":"daily","priority":"high","progress":100,"completed":false,"dueDate":"2025-08-20","createdAt":"2025-08-20T07:00:00Z","status":"in_progress"}"#;
        let mut goal: Goal = serde_json::from_str(raw).expect("parse goal");
        goal.normalize();
        assert!(goal.completed);
        assert_eq!(goal.status, GoalStatus::Completed);
    }

    #[test]
    fn default_due_dates_per_category() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 17).expect("valid date");
        assert_eq!(GoalCategory::Daily.default_due_date(today), today);
        assert_eq!(
            GoalCategory::ShortTerm.default_due_date(today),
            NaiveDate::from_ymd_opt(2026, 3, 19).expect("valid date")
        );
        assert_eq!(
            GoalCategory::LongTerm.default_due_date(today),
            NaiveDate::from_ymd_opt(2027, 2, 17).expect("valid date")
        );
    }

    #[test]
    fn category_names_round_trip_through_strings() {
        for category in GoalCategory::ALL {
            assert_eq!(category.as_str().parse::<GoalCategory>().expect("parse"), category);
        }
        assert_eq!("short-term".parse::<GoalCategory>().expect("parse"), GoalCategory::ShortTerm);
    }
}

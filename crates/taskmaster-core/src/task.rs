use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" => Ok(Priority::Low),
            "medium" | "m" => Ok(Priority::Medium),
            "high" | "h" => Ok(Priority::High),
            other => Err(anyhow!("invalid priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub priority: Priority,

    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: u64, title: String, priority: Priority, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            completed: false,
            priority,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn reads_the_persisted_document_shape() {
        let raw = r#"{"id":1,"title":"Complete project documentation","completed":false,"priority":"high","createdAt":"2025-08-20T10:00:00Z"}"#;
        let task: Task = serde_json::from_str(raw).expect("parse task");

        assert_eq!(task.id, 1);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(
            task.created_at,
            Utc.with_ymd_and_hms(2025, 8, 20, 10, 0, 0)
                .single()
                .expect("valid date")
        );

        let back = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(back["createdAt"], "2025-08-20T10:00:00Z");
        assert_eq!(back["priority"], "high");
    }

    #[test]
    fn parses_priority_select_values() {
        assert_eq!("low".parse::<Priority>().expect("low"), Priority::Low);
        assert_eq!(" High ".parse::<Priority>().expect("high"), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}

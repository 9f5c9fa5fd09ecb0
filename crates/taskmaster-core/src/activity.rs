use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    Created,
    Completed,
    Uncompleted,
    Edited,
    Deleted,
    /// A type written by another version of the app, kept verbatim so it
    /// survives the next save.
    Other(String),
}

impl ActivityKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Created => "created",
            ActivityKind::Completed => "completed",
            ActivityKind::Uncompleted => "uncompleted",
            ActivityKind::Edited => "edited",
            ActivityKind::Deleted => "deleted",
            ActivityKind::Other(raw) => raw,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityKind::Created => "fa-plus",
            ActivityKind::Completed => "fa-check",
            ActivityKind::Uncompleted => "fa-undo",
            ActivityKind::Edited => "fa-edit",
            ActivityKind::Deleted => "fa-trash",
            ActivityKind::Other(_) => "fa-info",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ActivityKind::Created => "Created",
            ActivityKind::Completed => "Completed",
            ActivityKind::Uncompleted => "Uncompleted",
            ActivityKind::Edited => "Edited",
            ActivityKind::Deleted => "Deleted",
            ActivityKind::Other(_) => "Updated",
        }
    }

    pub fn for_completion(completed: bool) -> Self {
        if completed {
            ActivityKind::Completed
        } else {
            ActivityKind::Uncompleted
        }
    }
}

impl From<String> for ActivityKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "created" => ActivityKind::Created,
            "completed" => ActivityKind::Completed,
            "uncompleted" => ActivityKind::Uncompleted,
            "edited" => ActivityKind::Edited,
            "deleted" => ActivityKind::Deleted,
            _ => ActivityKind::Other(raw),
        }
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u64,

    #[serde(rename = "type")]
    pub kind: ActivityKind,

    pub task_title: String,

    pub timestamp: DateTime<Utc>,
}

/// Newest-first log of task mutations, capped at `limit` entries.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: Vec<Activity>,
    limit: usize,
}

impl ActivityLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn from_entries(mut entries: Vec<Activity>, limit: usize) -> Self {
        let limit = limit.max(1);
        entries.truncate(limit);
        Self { entries, limit }
    }

    pub fn record(&mut self, activity: Activity) {
        debug!(kind = ?activity.kind, title = %activity.task_title, "recording activity");
        self.entries.insert(0, activity);
        self.entries.truncate(self.limit);
    }

    pub fn entries(&self) -> &[Activity] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&Activity> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn activity(id: u64, kind: ActivityKind) -> Activity {
        Activity {
            id,
            kind,
            task_title: format!("task {id}"),
            timestamp: Utc
                .with_ymd_and_hms(2026, 2, 17, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn keeps_only_the_most_recent_entries() {
        let mut log = ActivityLog::new(10);
        for id in 1..=11 {
            log.record(activity(id, ActivityKind::Created));
        }

        assert_eq!(log.len(), 10);
        assert_eq!(log.latest().map(|a| a.id), Some(11));
        assert!(log.entries().iter().all(|a| a.id != 1));
    }

    #[test]
    fn unknown_types_read_as_other() {
        let raw = r#"[{"id":7,"type":"archived","taskTitle":"Old","timestamp":"2026-02-17T12:00:00Z"}]"#;
        let parsed: Vec<Activity> = serde_json::from_str(raw).expect("parse activities");

        assert_eq!(parsed[0].kind, ActivityKind::Other("archived".to_string()));
        assert_eq!(parsed[0].kind.verb(), "Updated");
        assert_eq!(parsed[0].kind.icon(), "fa-info");
    }

    #[test]
    fn unknown_types_survive_a_save() {
        let raw = r#"[{"id":7,"type":"archived","taskTitle":"Old","timestamp":"2026-02-17T12:00:00Z"}]"#;
        let parsed: Vec<Activity> = serde_json::from_str(raw).expect("parse activities");

        let saved = serde_json::to_value(&parsed).expect("serialize");
        assert_eq!(saved[0]["type"], "archived");
    }

    #[test]
    fn stored_type_field_uses_lowercase_names() {
        let value = serde_json::to_value(activity(3, ActivityKind::Uncompleted)).expect("serialize");
        assert_eq!(value["type"], "uncompleted");
        assert_eq!(value["taskTitle"], "task 3");
    }

    #[test]
    fn truncates_oversized_stored_logs() {
        let entries = (1..=15).map(|id| activity(id, ActivityKind::Edited)).collect();
        let log = ActivityLog::from_entries(entries, 10);
        assert_eq!(log.len(), 10);
        assert_eq!(log.latest().map(|a| a.id), Some(1));
    }
}

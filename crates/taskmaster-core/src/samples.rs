//! Example entities written on first start.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::activity::{Activity, ActivityKind};
use crate::goal::{Goal, GoalCategory, GoalStatus};
use crate::task::{Priority, Task};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Complete project documentation".to_string(),
            completed: false,
            priority: Priority::High,
            created_at: at(2025, 8, 20, 10, 0),
        },
        Task {
            id: 2,
            title: "Review code changes".to_string(),
            completed: true,
            priority: Priority::Medium,
            created_at: at(2025, 8, 19, 14, 30),
        },
        Task {
            id: 3,
            title: "Update team on progress".to_string(),
            completed: false,
            priority: Priority::Low,
            created_at: at(2025, 8, 18, 9, 15),
        },
    ]
}

pub fn sample_activities(now: DateTime<Utc>) -> Vec<Activity> {
    vec![Activity {
        id: 1,
        kind: ActivityKind::Completed,
        task_title: "Review code changes".to_string(),
        timestamp: now,
    }]
}

struct GoalSeed {
    id: u64,
    title: &'static str,
    description: &'static str,
    category: GoalCategory,
    priority: Priority,
    progress: u8,
    due: NaiveDate,
    created: DateTime<Utc>,
}

pub fn sample_goals() -> Vec<Goal> {
    let seeds = [
        GoalSeed {
            id: 1,
            title: "Drink 8 glasses of water",
            description: "Stay hydrated throughout the day",
            category: GoalCategory::Daily,
            priority: Priority::Medium,
            progress: 62,
            due: day(2025, 8, 20),
            created: at(2025, 8, 20, 6, 0),
        },
        GoalSeed {
            id: 2,
            title: "Learn React.js",
            description: "Complete React course and build 2 projects",
            category: GoalCategory::ShortTerm,
            priority: Priority::High,
            progress: 45,
            due: day(2025, 10, 15),
            created: at(2025, 8, 1, 10, 0),
        },
        GoalSeed {
            id: 3,
            title: "Exercise for 30 minutes",
            description: "Complete daily workout routine",
            category: GoalCategory::Daily,
            priority: Priority::High,
            progress: 100,
            due: day(2025, 8, 20),
            created: at(2025, 8, 20, 7, 0),
        },
        GoalSeed {
            id: 4,
            title: "Master Full Stack Development",
            description: "Become proficient in frontend and backend technologies",
            category: GoalCategory::LongTerm,
            priority: Priority::High,
            progress: 25,
            due: day(2026, 8, 20),
            created: at(2025, 1, 1, 0, 0),
        },
        GoalSeed {
            id: 5,
            title: "Read 12 books this year",
            description: "Read one book per month to expand knowledge",
            category: GoalCategory::LongTerm,
            priority: Priority::Medium,
            progress: 66,
            due: day(2025, 12, 31),
            created: at(2025, 1, 1, 0, 0),
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            let mut goal = Goal {
                id: seed.id,
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                category: seed.category,
                priority: seed.priority,
                progress: 0,
                completed: false,
                due_date: seed.due,
                created_at: seed.created,
                status: GoalStatus::NotStarted,
            };
            goal.set_progress(seed.progress);
            goal
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn sample_goals_satisfy_the_status_invariant() {
        for goal in sample_goals() {
            assert_eq!(goal.completed, goal.progress == 100, "{}", goal.title);
            assert_eq!(goal.status, GoalStatus::derive(goal.progress, goal.completed));
        }
    }

    #[test]
    fn sample_ids_are_unique() {
        let task_ids: BTreeSet<u64> = sample_tasks().iter().map(|t| t.id).collect();
        assert_eq!(task_ids.len(), 3);
        let goal_ids: BTreeSet<u64> = sample_goals().iter().map(|g| g.id).collect();
        assert_eq!(goal_ids.len(), 5);
    }
}

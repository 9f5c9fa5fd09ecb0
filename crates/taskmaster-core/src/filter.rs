use std::str::FromStr;

use anyhow::anyhow;

use crate::goal::{Goal, GoalCategory};
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl CompletionFilter {
    pub const ALL: [CompletionFilter; 3] = [
        CompletionFilter::All,
        CompletionFilter::Active,
        CompletionFilter::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompletionFilter::All => "all",
            CompletionFilter::Active => "active",
            CompletionFilter::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompletionFilter::All => "All",
            CompletionFilter::Active => "Active",
            CompletionFilter::Completed => "Completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            CompletionFilter::All => true,
            CompletionFilter::Active => !task.completed,
            CompletionFilter::Completed => task.completed,
        }
    }
}

impl FromStr for CompletionFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CompletionFilter::All),
            "active" | "pending" => Ok(CompletionFilter::Active),
            "completed" | "done" => Ok(CompletionFilter::Completed),
            other => Err(anyhow!("invalid completion filter: {other}")),
        }
    }
}

/// Completion filter plus a case-insensitive title search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub completion: CompletionFilter,
    search: String,
}

impl TaskQuery {
    pub fn new(completion: CompletionFilter, search: &str) -> Self {
        let mut query = Self {
            completion,
            search: String::new(),
        };
        query.set_search(search);
        query
    }

    /// Lowercased, untrimmed; only an empty term stops searching.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn is_narrowed(&self) -> bool {
        self.is_searching() || self.completion != CompletionFilter::All
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.completion.matches(task)
            && (self.search.is_empty() || task.title.to_lowercase().contains(&self.search))
    }

    /// Matching tasks in collection order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Why a projected view came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoMatches,
    NoItems,
}

impl EmptyReason {
    pub fn for_query(query: &TaskQuery) -> Self {
        if query.is_narrowed() {
            EmptyReason::NoMatches
        } else {
            EmptyReason::NoItems
        }
    }
}

pub fn goals_in(goals: &[Goal], category: GoalCategory) -> Vec<&Goal> {
    goals.iter().filter(|goal| goal.category == category).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskSummary {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalSummary {
    pub daily: usize,
    pub short_term: usize,
    pub long_term: usize,
}

impl GoalSummary {
    pub fn of(goals: &[Goal]) -> Self {
        let mut summary = Self::default();
        for goal in goals {
            match goal.category {
                GoalCategory::Daily => summary.daily += 1,
                GoalCategory::ShortTerm => summary.short_term += 1,
                GoalCategory::LongTerm => summary.long_term += 1,
            }
        }
        summary
    }

    pub fn count(&self, category: GoalCategory) -> usize {
        match category {
            GoalCategory::Daily => self.daily,
            GoalCategory::ShortTerm => self.short_term,
            GoalCategory::LongTerm => self.long_term,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::task::Priority;

    fn task(id: u64, title: &str, completed: bool) -> Task {
        let mut task = Task::new(
            id,
            title.to_string(),
            Priority::Medium,
            Utc.with_ymd_and_hms(2026, 2, 17, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        );
        task.completed = completed;
        task
    }

    #[test]
    fn search_is_case_insensitive_and_order_preserving() {
        let tasks = vec![
            task(1, "Buy MILK", false),
            task(2, "Walk dog", false),
            task(3, "milkshake recipe", true),
        ];
        let query = TaskQuery::new(CompletionFilter::All, "Milk");

        let ids: Vec<u64> = query.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn completion_and_search_compose() {
        let tasks = vec![
            task(1, "Buy milk", false),
            task(2, "Buy bread", true),
            task(3, "Sell milk", true),
        ];

        let active = TaskQuery::new(CompletionFilter::Active, "");
        assert_eq!(active.apply(&tasks).len(), 1);

        let done_milk = TaskQuery::new(CompletionFilter::Completed, "milk");
        let ids: Vec<u64> = done_milk.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn empty_reason_reflects_narrowing() {
        assert_eq!(EmptyReason::for_query(&TaskQuery::default()), EmptyReason::NoItems);
        assert_eq!(
            EmptyReason::for_query(&TaskQuery::new(CompletionFilter::All, "x")),
            EmptyReason::NoMatches
        );
        assert_eq!(
            EmptyReason::for_query(&TaskQuery::new(CompletionFilter::Completed, " ")),
            EmptyReason::NoMatches
        );
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let tasks = vec![task(1, "milkshake", false), task(2, "buy milk", false)];

        let trailing = TaskQuery::new(CompletionFilter::All, "milk ");
        let ids: Vec<u64> = trailing.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, Vec::<u64>::new());

        let spaces = TaskQuery::new(CompletionFilter::All, "  ");
        assert!(spaces.is_searching());
        assert!(spaces.apply(&tasks).is_empty());
        assert_eq!(EmptyReason::for_query(&spaces), EmptyReason::NoMatches);
    }

    #[test]
    fn summaries_count_collections() {
        let tasks = vec![task(1, "a", true), task(2, "b", false), task(3, "c", false)];
        assert_eq!(
            TaskSummary::of(&tasks),
            TaskSummary {
                total: 3,
                completed: 1,
                pending: 2
            }
        );

        let due = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let now = Utc
            .with_ymd_and_hms(2026, 2, 17, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let goals: Vec<Goal> = [GoalCategory::Daily, GoalCategory::LongTerm, GoalCategory::Daily]
            .into_iter()
            .enumerate()
            .map(|(idx, category)| {
                Goal::new(
                    idx as u64,
                    format!("goal {idx}"),
                    String::new(),
                    category,
                    Priority::Low,
                    due,
                    now,
                )
            })
            .collect();
        let summary = GoalSummary::of(&goals);
        assert_eq!(summary.count(GoalCategory::Daily), 2);
        assert_eq!(summary.count(GoalCategory::ShortTerm), 0);
        assert_eq!(goals_in(&goals, GoalCategory::LongTerm).len(), 1);
    }
}

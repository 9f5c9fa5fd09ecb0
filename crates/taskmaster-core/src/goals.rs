use std::rc::Rc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::datetime::Clock;
use crate::error::{MutationError, MutationResult, Subject};
use crate::filter::{GoalSummary, goals_in};
use crate::goal::{Goal, GoalCategory, GoalForm};
use crate::ids::IdGenerator;
use crate::intent::Confirm;
use crate::samples;
use crate::storage::{KeyValueStore, load_or_empty, save_or_log};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedGoal {
    pub id: u64,
    pub created: bool,
}

/// Canonical goal collection in insertion order, plus the selected tab.
pub struct GoalBoard {
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    ids: Rc<IdGenerator>,
    goals_key: String,
    goals: Vec<Goal>,
    current: GoalCategory,
}

impl GoalBoard {
    pub fn new(
        store: Rc<dyn KeyValueStore>,
        clock: Rc<dyn Clock>,
        ids: Rc<IdGenerator>,
        cfg: &Config,
    ) -> Self {
        Self {
            store,
            clock,
            ids,
            goals_key: cfg.goals_key(),
            goals: Vec::new(),
            current: GoalCategory::Daily,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn initialize(&mut self, seed: bool) {
        self.goals = load_or_empty(self.store.as_ref(), &self.goals_key);
        for goal in &mut self.goals {
            goal.normalize();
        }

        if self.goals.is_empty() && seed {
            info!("no stored goals; seeding samples");
            self.goals = samples::sample_goals();
            self.persist();
        }

        self.ids.observe(self.goals.iter().map(|goal| goal.id));
        info!(goals = self.goals.len(), "goal board ready");
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: u64) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn in_category(&self, category: GoalCategory) -> Vec<&Goal> {
        goals_in(&self.goals, category)
    }

    pub fn current_category(&self) -> GoalCategory {
        self.current
    }

    pub fn switch_category(&mut self, category: GoalCategory) {
        debug!(category = category.as_str(), "switched goal category");
        self.current = category;
    }

    pub fn summary(&self) -> GoalSummary {
        GoalSummary::of(&self.goals)
    }

    /// Creates a goal (no `form.id`) or updates the mutable fields of an
    /// existing one. Category never changes after creation.
    #[tracing::instrument(skip(self, form), fields(id = ?form.id, category = form.category.as_str()))]
    pub fn save(&mut self, form: &GoalForm) -> MutationResult<SavedGoal> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(MutationError::EmptyTitle(Subject::Goal));
        }
        let due_date = parse_due_date(&form.due_date)?;
        let description = form.description.trim().to_string();

        let saved = match form.id {
            Some(id) => {
                let goal = self
                    .goals
                    .iter_mut()
                    .find(|goal| goal.id == id)
                    .ok_or(MutationError::NotFound(Subject::Goal, id))?;
                goal.title = title.to_string();
                goal.description = description;
                goal.priority = form.priority;
                goal.due_date = due_date;
                goal.set_progress(form.progress);
                info!(id, status = goal.status.as_str(), "goal updated");
                SavedGoal { id, created: false }
            }
            None => {
                let now = self.clock.now();
                let goal = Goal::new(
                    self.ids.next(now),
                    title.to_string(),
                    description,
                    form.category,
                    form.priority,
                    due_date,
                    now,
                );
                let id = goal.id;
                self.goals.push(goal);
                info!(id, "goal created");
                SavedGoal { id, created: true }
            }
        };

        self.persist();
        Ok(saved)
    }

    #[tracing::instrument(skip(self, confirm))]
    pub fn delete(&mut self, id: u64, confirm: &dyn Confirm) -> MutationResult<Goal> {
        let Some(idx) = self.goals.iter().position(|goal| goal.id == id) else {
            return Err(MutationError::NotFound(Subject::Goal, id));
        };
        let prompt = format!(
            "Are you sure you want to delete \"{}\"?",
            self.goals[idx].title
        );
        if !confirm.confirm(&prompt) {
            debug!("deletion declined");
            return Err(MutationError::Cancelled);
        }

        let removed = self.goals.remove(idx);
        self.persist();
        Ok(removed)
    }

    /// Blank form for a new goal in `category`, due date pre-filled.
    pub fn blank_form(&self, category: GoalCategory, today: NaiveDate) -> GoalForm {
        let mut form = GoalForm::new(category);
        form.due_date = category.default_due_date(today).format("%Y-%m-%d").to_string();
        form
    }

    fn persist(&self) {
        if !save_or_log(self.store.as_ref(), &self.goals_key, &self.goals) {
            warn!("goal changes are only held in memory until the next successful save");
        }
    }
}

fn parse_due_date(raw: &str) -> MutationResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MutationError::MissingDueDate);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| MutationError::InvalidDueDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::datetime::FixedClock;
    use crate::goal::GoalStatus;
    use crate::storage::MemoryStore;
    use crate::task::Priority;

    fn board() -> GoalBoard {
        let clock = FixedClock::new(
            Utc.with_ymd_and_hms(2026, 2, 17, 12, 0, 0)
                .single()
                .expect("valid now"),
        );
        let mut board = GoalBoard::new(
            Rc::new(MemoryStore::new()),
            Rc::new(clock),
            Rc::new(IdGenerator::new()),
            &Config::default(),
        );
        board.initialize(false);
        board
    }

    fn form(title: &str, category: GoalCategory) -> GoalForm {
        GoalForm {
            id: None,
            title: title.to_string(),
            description: "  notes  ".to_string(),
            category,
            priority: Priority::High,
            due_date: "2026-03-01".to_string(),
            progress: 80,
        }
    }

    #[test]
    fn new_goals_start_unstarted_at_the_end() {
        let mut board = board();
        let first = board.save(&form("Run 5k", GoalCategory::Daily)).expect("save");
        let second = board.save(&form("Ship v1", GoalCategory::ShortTerm)).expect("save");
        assert!(first.created && second.created);

        let last = board.goals().last().expect("goal");
        assert_eq!(last.id, second.id);
        assert_eq!(last.progress, 0);
        assert!(!last.completed);
        assert_eq!(last.status, GoalStatus::NotStarted);
        assert_eq!(last.description, "notes");
    }

    #[test]
    fn validation_order_is_title_then_due_date() {
        let mut board = board();
        let mut bad = form(" ", GoalCategory::Daily);
        bad.due_date.clear();
        assert_eq!(board.save(&bad), Err(MutationError::EmptyTitle(Subject::Goal)));

        bad.title = "Titled".to_string();
        assert_eq!(board.save(&bad), Err(MutationError::MissingDueDate));

        bad.due_date = "next tuesday".to_string();
        assert!(matches!(board.save(&bad), Err(MutationError::InvalidDueDate(_))));
        assert!(board.goals().is_empty());
    }

    #[test]
    fn editing_keeps_category_and_recomputes_status() {
        let mut board = board();
        let saved = board.save(&form("Read", GoalCategory::LongTerm)).expect("save");

        let mut edit = GoalForm::from_goal(board.goal(saved.id).expect("goal"));
        edit.category = GoalCategory::Daily;
        edit.progress = 100;
        let updated = board.save(&edit).expect("update");
        assert!(!updated.created);

        let goal = board.goal(saved.id).expect("goal");
        assert_eq!(goal.category, GoalCategory::LongTerm);
        assert!(goal.completed);
        assert_eq!(goal.status, GoalStatus::Completed);
    }

    #[test]
    fn delete_prompt_names_the_goal() {
        let mut board = board();
        let saved = board.save(&form("Learn Rust", GoalCategory::Daily)).expect("save");

        let asked = std::cell::RefCell::new(String::new());
        let confirm = |message: &str| {
            *asked.borrow_mut() = message.to_string();
            true
        };
        board.delete(saved.id, &confirm).expect("delete");
        assert_eq!(*asked.borrow(), "Are you sure you want to delete \"Learn Rust\"?");
        assert!(board.goals().is_empty());
    }

    #[test]
    fn blank_form_prefills_due_date() {
        let board = board();
        let today = NaiveDate::from_ymd_opt(2026, 2, 17).expect("valid date");
        let form = board.blank_form(GoalCategory::ShortTerm, today);
        assert_eq!(form.due_date, "2026-03-19");
        assert_eq!(form.id, None);
    }
}

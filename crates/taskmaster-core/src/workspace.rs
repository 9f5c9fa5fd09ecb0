use std::rc::Rc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::datetime::Clock;
use crate::error::MutationError;
use crate::goal::{GoalCategory, GoalForm};
use crate::goals::GoalBoard;
use crate::ids::IdGenerator;
use crate::intent::{Confirm, Intent};
use crate::notify::{Notice, Notifier, Severity};
use crate::render::Renderer;
use crate::storage::KeyValueStore;
use crate::tasks::TaskBoard;
use crate::task::Priority;

/// Form currently open over the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    EditTask { id: u64, title: String, priority: Priority },
    Goal(GoalForm),
}

/// Whole application state: both boards, open modal and on-screen
/// notices. Built explicitly with its storage backend and clock so it can
/// run without any rendering surface.
pub struct Workspace {
    cfg: Config,
    clock: Rc<dyn Clock>,
    renderer: Renderer,
    tasks: TaskBoard,
    goals: GoalBoard,
    notices: Notifier,
    modal: Option<Modal>,
}

impl Workspace {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>, cfg: Config) -> Self {
        let ids = Rc::new(IdGenerator::new());
        Self {
            renderer: Renderer::new(&cfg),
            tasks: TaskBoard::new(store.clone(), clock.clone(), ids.clone(), &cfg),
            goals: GoalBoard::new(store, clock.clone(), ids, &cfg),
            notices: Notifier::new(),
            modal: None,
            clock,
            cfg,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn initialize(&mut self) {
        let seed = self.cfg.seed_samples();
        self.tasks.initialize(seed);
        self.goals.initialize(seed);
        info!(seed, "workspace initialized");
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    pub fn goals(&self) -> &GoalBoard {
        &self.goals
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.active()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.renderer.today(self.clock.now())
    }

    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        self.notices.dismiss(id)
    }

    /// Applies one UI intent. Returns the notice raised by it, if any, so
    /// the caller can schedule its dismissal.
    #[tracing::instrument(skip(self, confirm), fields(intent = intent.name()))]
    pub fn handle(&mut self, intent: Intent, confirm: &dyn Confirm) -> Option<Notice> {
        match intent {
            Intent::SubmitNewTask { title, priority } => {
                let outcome = self.tasks.add(&title, priority);
                self.report(outcome.map(|_| "Task added successfully".to_string()))
            }
            Intent::ToggleTask(id) => {
                let outcome = self.tasks.toggle(id).map(|completed| {
                    if completed {
                        "Task completed".to_string()
                    } else {
                        "Task uncompleted".to_string()
                    }
                });
                self.report(outcome)
            }
            Intent::EditTask(id) => {
                if let Some(task) = self.tasks.task(id) {
                    self.modal = Some(Modal::EditTask {
                        id,
                        title: task.title.clone(),
                        priority: task.priority,
                    });
                }
                None
            }
            Intent::SaveTaskEdit { id, title, priority } => {
                let outcome = self.tasks.edit(id, &title, priority);
                if outcome.is_ok() || matches!(outcome, Err(MutationError::NotFound(..))) {
                    self.modal = None;
                }
                self.report(outcome.map(|_| "Task updated successfully".to_string()))
            }
            Intent::DeleteTask(id) => {
                let outcome = self.tasks.delete(id, confirm);
                self.report(outcome.map(|_| "Task deleted successfully".to_string()))
            }
            Intent::SetFilter(filter) => {
                self.tasks.set_filter(filter);
                None
            }
            Intent::Search(term) => {
                self.tasks.set_search(&term);
                None
            }
            Intent::SwitchCategory(category) => {
                self.goals.switch_category(category);
                None
            }
            Intent::AddGoal(category) => {
                self.open_goal_form(category, None);
                None
            }
            Intent::EditGoal(id) => {
                if let Some(category) = self.goals.goal(id).map(|goal| goal.category) {
                    self.open_goal_form(category, Some(id));
                }
                None
            }
            Intent::SaveGoal(form) => {
                let outcome = self.goals.save(&form);
                if outcome.is_ok() || matches!(outcome, Err(MutationError::NotFound(..))) {
                    self.modal = None;
                }
                self.report(outcome.map(|saved| {
                    if saved.created {
                        "Goal added successfully".to_string()
                    } else {
                        "Goal updated successfully".to_string()
                    }
                }))
            }
            Intent::DeleteGoal(id) => {
                let outcome = self.goals.delete(id, confirm);
                self.report(outcome.map(|_| "Goal deleted successfully".to_string()))
            }
            Intent::CloseModal => {
                self.modal = None;
                None
            }
        }
    }

    fn open_goal_form(&mut self, category: GoalCategory, id: Option<u64>) {
        let form = match id.and_then(|id| self.goals.goal(id)) {
            Some(goal) => GoalForm::from_goal(goal),
            None => self.goals.blank_form(category, self.today()),
        };
        self.modal = Some(Modal::Goal(form));
    }

    fn report(&mut self, outcome: Result<String, MutationError>) -> Option<Notice> {
        match outcome {
            Ok(message) => Some(self.notices.push(Severity::Success, message)),
            Err(err) if err.is_validation() => {
                Some(self.notices.push(Severity::Error, err.to_string()))
            }
            Err(err) => {
                debug!(error = %err, "ignored");
                None
            }
        }
    }

    pub fn task_list_markup(&self) -> String {
        self.renderer.task_list(
            &self.tasks.visible(),
            self.tasks.empty_reason(),
            self.clock.now(),
        )
    }

    pub fn activity_markup(&self) -> String {
        self.renderer
            .activity_feed(self.tasks.activity(), self.clock.now())
    }

    pub fn goal_list_markup(&self, category: GoalCategory) -> String {
        self.renderer.goal_list(
            category,
            &self.goals.in_category(category),
            self.clock.now(),
        )
    }

    pub fn filter_bar_markup(&self) -> String {
        self.renderer.filter_bar(self.tasks.query().completion)
    }

    pub fn task_summary_markup(&self) -> String {
        self.renderer.task_summary(self.tasks.summary())
    }

    pub fn goal_tabs_markup(&self) -> String {
        self.renderer
            .goal_tabs(self.goals.current_category(), self.goals.summary())
    }

    pub fn notices_markup(&self) -> String {
        self.notices
            .active()
            .iter()
            .map(|notice| self.renderer.notice(notice))
            .collect()
    }
}

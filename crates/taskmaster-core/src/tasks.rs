use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::activity::{Activity, ActivityKind, ActivityLog};
use crate::config::Config;
use crate::datetime::Clock;
use crate::error::{MutationError, MutationResult, Subject};
use crate::filter::{CompletionFilter, EmptyReason, TaskQuery, TaskSummary};
use crate::ids::IdGenerator;
use crate::intent::Confirm;
use crate::samples;
use crate::storage::{KeyValueStore, load_or_empty, save_or_log};
use crate::task::{Priority, Task};

/// Canonical task collection (newest first), its activity log and the
/// current view query.
pub struct TaskBoard {
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    ids: Rc<IdGenerator>,
    tasks_key: String,
    activities_key: String,
    tasks: Vec<Task>,
    activity: ActivityLog,
    query: TaskQuery,
}

impl TaskBoard {
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
            tasks_key: cfg.tasks_key(),
            activities_key: cfg.activities_key(),
            tasks: Vec::new(),
            activity: ActivityLog::new(cfg.activity_limit()),
            query: TaskQuery::default(),
        }
    }

    /// Loads both documents; an empty task collection is replaced by the
    /// sample set when `seed` is on.
    #[tracing::instrument(skip(self))]
    pub fn initialize(&mut self, seed: bool) {
        self.tasks = load_or_empty(self.store.as_ref(), &self.tasks_key);
        let activities: Vec<Activity> = load_or_empty(self.store.as_ref(), &self.activities_key);
        self.activity = ActivityLog::from_entries(activities, self.activity.limit());

        if self.tasks.is_empty() && seed {
            info!("no stored tasks; seeding samples");
            self.tasks = samples::sample_tasks();
            self.persist_tasks();
            self.activity = ActivityLog::from_entries(
                samples::sample_activities(self.clock.now()),
                self.activity.limit(),
            );
            self.persist_activity();
        }

        self.ids.observe(self.tasks.iter().map(|task| task.id));
        self.ids.observe(self.activity.entries().iter().map(|a| a.id));
        info!(tasks = self.tasks.len(), activities = self.activity.len(), "task board ready");
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn activity(&self) -> &[Activity] {
        self.activity.entries()
    }

    pub fn query(&self) -> &TaskQuery {
        &self.query
    }

    pub fn set_filter(&mut self, filter: CompletionFilter) {
        debug!(filter = filter.as_str(), "filter changed");
        self.query.completion = filter;
    }

    pub fn set_search(&mut self, term: &str) {
        self.query.set_search(term);
    }

    pub fn visible(&self) -> Vec<&Task> {
        self.query.apply(&self.tasks)
    }

    pub fn empty_reason(&self) -> EmptyReason {
        EmptyReason::for_query(&self.query)
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::of(&self.tasks)
    }

    /// Creates a task at the front of the collection and returns its id.
    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, title: &str, priority: Priority) -> MutationResult<u64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(MutationError::EmptyTitle(Subject::Task));
        }

        let now = self.clock.now();
        let task = Task::new(self.ids.next(now), title.to_string(), priority, now);
        let id = task.id;
        self.tasks.insert(0, task);
        self.persist_tasks();
        self.record(ActivityKind::Created, title);

        info!(id, "task created");
        Ok(id)
    }

    /// Flips completion and returns the new state.
    #[tracing::instrument(skip(self))]
    pub fn toggle(&mut self, id: u64) -> MutationResult<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(MutationError::NotFound(Subject::Task, id))?;
        task.completed = !task.completed;
        let completed = task.completed;
        let title = task.title.clone();

        self.persist_tasks();
        self.record(ActivityKind::for_completion(completed), &title);
        Ok(completed)
    }

    #[tracing::instrument(skip(self))]
    pub fn edit(&mut self, id: u64, title: &str, priority: Priority) -> MutationResult<()> {
        let Some(idx) = self.tasks.iter().position(|task| task.id == id) else {
            return Err(MutationError::NotFound(Subject::Task, id));
        };
        let title = title.trim();
        if title.is_empty() {
            return Err(MutationError::EmptyTitle(Subject::Task));
        }

        let task = &mut self.tasks[idx];
        task.title = title.to_string();
        task.priority = priority;

        self.persist_tasks();
        self.record(ActivityKind::Edited, title);
        Ok(())
    }

    /// Removes a task once the user confirms. Unknown ids never prompt.
    #[tracing::instrument(skip(self, confirm))]
    pub fn delete(&mut self, id: u64, confirm: &dyn Confirm) -> MutationResult<Task> {
        let Some(idx) = self.tasks.iter().position(|task| task.id == id) else {
            return Err(MutationError::NotFound(Subject::Task, id));
        };
        if !confirm.confirm("Are you sure you want to delete this task?") {
            debug!("deletion declined");
            return Err(MutationError::Cancelled);
        }

        let removed = self.tasks.remove(idx);
        self.persist_tasks();
        self.record(ActivityKind::Deleted, &removed.title);
        Ok(removed)
    }

    fn record(&mut self, kind: ActivityKind, title: &str) {
        let now = self.clock.now();
        self.activity.record(Activity {
            id: self.ids.next(now),
            kind,
            task_title: title.to_string(),
            timestamp: now,
        });
        self.persist_activity();
    }

    fn persist_tasks(&self) {
        if !save_or_log(self.store.as_ref(), &self.tasks_key, &self.tasks) {
            warn!("task changes are only held in memory until the next successful save");
        }
    }

    fn persist_activity(&self) {
        save_or_log(self.store.as_ref(), &self.activities_key, self.activity.entries());
    }
}

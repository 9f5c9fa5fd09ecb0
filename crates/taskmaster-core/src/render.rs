use std::fmt::{self, Write as _};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::activity::Activity;
use crate::config::Config;
use crate::datetime::{DueState, age_label, due_label, local_date, relative_time};
use crate::filter::{CompletionFilter, EmptyReason, GoalSummary, TaskSummary};
use crate::goal::{Goal, GoalCategory};
use crate::intent::Intent;
use crate::notify::Notice;
use crate::task::Task;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Turns views into markup. Every call produces the full content of its
/// container.
#[derive(Debug, Clone)]
pub struct Renderer {
    tz: Tz,
    recent_days: i64,
    due_soon_days: i64,
    due_horizon_days: i64,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            tz: cfg.timezone(),
            recent_days: cfg.recent_days(),
            due_soon_days: cfg.due_soon_days(),
            due_horizon_days: cfg.due_horizon_days(),
        }
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        local_date(now, self.tz)
    }

    #[tracing::instrument(skip(self, tasks, now), fields(count = tasks.len()))]
    pub fn task_list(&self, tasks: &[&Task], reason: EmptyReason, now: DateTime<Utc>) -> String {
        if tasks.is_empty() {
            return empty_tasks(reason);
        }

        let today = self.today(now);
        render_into(|out| {
            for task in tasks {
                self.task_row(out, task, today)?;
            }
            Ok(())
        })
    }

    fn task_row(&self, out: &mut String, task: &Task, today: NaiveDate) -> fmt::Result {
        let done = if task.completed { " completed" } else { "" };
        let checked = if task.completed { " checked" } else { "" };
        let check_icon = if task.completed {
            r#"<i class="fas fa-check"></i>"#
        } else {
            ""
        };
        let age = age_label(local_date(task.created_at, self.tz), today, self.recent_days);

        write!(
            out,
            concat!(
                r#"<div class="task-item{done}" data-task-id="{id}">"#,
                r#"<div class="task-checkbox{checked}" data-intent="{toggle}">{check_icon}</div>"#,
                r#"<div class="task-content">"#,
                r#"<h4 class="task-title">{title}</h4>"#,
                r#"<div class="task-meta">"#,
                r#"<span class="priority-badge priority-{priority}">{priority}</span>"#,
                r#"<span class="task-date">{age}</span>"#,
                r#"</div></div>"#,
                r#"<div class="task-actions">"#,
                r#"<button class="action-btn edit" title="Edit task" data-intent="{edit}"><i class="fas fa-edit"></i></button>"#,
                r#"<button class="action-btn delete" title="Delete task" data-intent="{delete}"><i class="fas fa-trash"></i></button>"#,
                r#"</div></div>"#,
            ),
            done = done,
            id = task.id,
            checked = checked,
            toggle = Intent::ToggleTask(task.id),
            check_icon = check_icon,
            title = escape_html(&task.title),
            priority = task.priority.as_str(),
            age = escape_html(&age),
            edit = Intent::EditTask(task.id),
            delete = Intent::DeleteTask(task.id),
        )
    }

    pub fn filter_bar(&self, active: CompletionFilter) -> String {
        render_into(|out| {
            for filter in CompletionFilter::ALL {
                let class = if filter == active {
                    "filter-btn active"
                } else {
                    "filter-btn"
                };
                write!(
                    out,
                    r#"<button class="{class}" data-filter="{key}" data-intent="{intent}">{label}</button>"#,
                    key = filter.as_str(),
                    intent = Intent::SetFilter(filter),
                    label = filter.label(),
                )?;
            }
            Ok(())
        })
    }

    pub fn task_summary(&self, summary: TaskSummary) -> String {
        format!(
            concat!(
                r#"<div class="summary-item"><span class="summary-value" id="totalTasks">{}</span><span class="summary-label">Total</span></div>"#,
                r#"<div class="summary-item"><span class="summary-value" id="completedTasks">{}</span><span class="summary-label">Completed</span></div>"#,
                r#"<div class="summary-item"><span class="summary-value" id="pendingTasks">{}</span><span class="summary-label">Pending</span></div>"#,
            ),
            summary.total, summary.completed, summary.pending
        )
    }

    #[tracing::instrument(skip(self, activities, now), fields(count = activities.len()))]
    pub fn activity_feed(&self, activities: &[Activity], now: DateTime<Utc>) -> String {
        if activities.is_empty() {
            return r#"<div class="empty-activity"><p>No recent activity</p></div>"#.to_string();
        }

        render_into(|out| {
            for activity in activities {
                write!(
                    out,
                    concat!(
                        r#"<div class="activity-item">"#,
                        r#"<div class="activity-icon"><i class="fas {icon}"></i></div>"#,
                        r#"<div class="activity-content">"#,
                        r#"<div class="activity-text">{verb} &quot;{title}&quot;</div>"#,
                        r#"<div class="activity-time">{when}</div>"#,
                        r#"</div></div>"#,
                    ),
                    icon = activity.kind.icon(),
                    verb = activity.kind.verb(),
                    title = escape_html(&activity.task_title),
                    when = relative_time(activity.timestamp, now),
                )?;
            }
            Ok(())
        })
    }

    pub fn goal_tabs(&self, current: GoalCategory, summary: GoalSummary) -> String {
        render_into(|out| {
            for category in GoalCategory::ALL {
                let class = if category == current {
                    "tab-btn active"
                } else {
                    "tab-btn"
                };
                write!(
                    out,
                    r#"<button class="{class}" data-category="{key}" data-intent="{intent}">{label} <span class="tab-count">{count}</span></button>"#,
                    key = category.as_str(),
                    intent = Intent::SwitchCategory(category),
                    label = category.label(),
                    count = summary.count(category),
                )?;
            }
            Ok(())
        })
    }

    #[tracing::instrument(skip(self, goals, now), fields(category = category.as_str(), count = goals.len()))]
    pub fn goal_list(&self, category: GoalCategory, goals: &[&Goal], now: DateTime<Utc>) -> String {
        if goals.is_empty() {
            return empty_goals(category);
        }

        let today = self.today(now);
        render_into(|out| {
            for goal in goals {
                self.goal_card(out, goal, today)?;
            }
            Ok(())
        })
    }

    fn goal_card(&self, out: &mut String, goal: &Goal, today: NaiveDate) -> fmt::Result {
        let done = if goal.completed { " completed" } else { "" };
        let description = if goal.description.is_empty() {
            String::new()
        } else {
            format!(
                r#"<p class="goal-description">{}</p>"#,
                escape_html(&goal.description)
            )
        };
        let due_state =
            DueState::classify(goal.due_date, today, goal.completed, self.due_soon_days);
        let due_class = match due_state.css_class() {
            "" => String::new(),
            class => format!(" {class}"),
        };

        write!(
            out,
            concat!(
                r#"<div class="goal-card{done}" data-goal-id="{id}" data-category="{category}">"#,
                r#"<div class="goal-status {status}">{status_label}</div>"#,
                r#"<div class="goal-card-header">"#,
                r#"<h4 class="goal-title">{title}</h4>"#,
                r#"<div class="goal-actions">"#,
                r#"<button class="goal-action-btn edit" title="Edit goal" data-intent="{edit}"><i class="fas fa-edit"></i></button>"#,
                r#"<button class="goal-action-btn delete" title="Delete goal" data-intent="{delete}"><i class="fas fa-trash"></i></button>"#,
                r#"</div></div>"#,
                "{description}",
                r#"<div class="goal-progress">"#,
                r#"<div class="progress-header"><span class="progress-label">Progress</span><span class="progress-percentage">{progress}%</span></div>"#,
                r#"<div class="progress-bar"><div class="progress-fill" style="width: {progress}%"></div></div>"#,
                r#"</div>"#,
                r#"<div class="goal-meta">"#,
                r#"<div class="goal-priority"><span class="priority-badge priority-{priority}">{priority}</span></div>"#,
                r#"<div class="goal-due-date{due_class}"><i class="fas fa-calendar"></i> {due}</div>"#,
                r#"</div></div>"#,
            ),
            done = done,
            id = goal.id,
            category = goal.category.as_str(),
            status = goal.status.as_str(),
            status_label = goal.status.label(),
            title = escape_html(&goal.title),
            edit = Intent::EditGoal(goal.id),
            delete = Intent::DeleteGoal(goal.id),
            description = description,
            progress = goal.progress,
            priority = goal.priority.as_str(),
            due_class = due_class,
            due = escape_html(&due_label(goal.due_date, today, self.due_horizon_days)),
        )
    }

    pub fn notice(&self, notice: &Notice) -> String {
        format!(
            concat!(
                r#"<div class="notification notification-{severity}" data-notice-id="{id}">"#,
                r#"<div class="notification-content"><i class="fas {icon}"></i><span>{message}</span></div>"#,
                r#"</div>"#,
            ),
            severity = notice.severity.as_str(),
            id = notice.id,
            icon = notice.severity.icon(),
            message = escape_html(&notice.message),
        )
    }
}

/// Runs a writer against a fresh buffer.
fn render_into(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    if let Err(err) = write(&mut out) {
        warn!(error = %err, "markup formatting failed");
    }
    out
}

fn empty_tasks(reason: EmptyReason) -> String {
    let (icon, heading, hint) = match reason {
        EmptyReason::NoMatches => (
            "fa-search",
            "No tasks found",
            "Try adjusting your search or filter criteria.",
        ),
        EmptyReason::NoItems => (
            "fa-tasks",
            "No tasks yet",
            "Add your first task above to get started!",
        ),
    };
    format!(
        r#"<div class="empty-state"><i class="fas {icon}"></i><h4>{heading}</h4><p>{hint}</p></div>"#
    )
}

fn empty_goals(category: GoalCategory) -> String {
    format!(
        concat!(
            r#"<div class="empty-state"><i class="fas fa-bullseye"></i>"#,
            r#"<h4>No {label} yet</h4>"#,
            r#"<button class="add-goal-btn" data-category="{key}" data-intent="{intent}">Add your first goal</button>"#,
            r#"</div>"#,
        ),
        label = category.label().to_lowercase(),
        key = category.as_str(),
        intent = Intent::AddGoal(category),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::activity::ActivityKind;
    use crate::notify::Severity;
    use crate::task::Priority;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 17, 12, 0, 0)
            .single()
            .expect("valid now")
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="alert('x')">&"#),
            "&lt;img src=x onerror=&quot;alert(&#39;x&#39;)&quot;&gt;&amp;"
        );
    }

    #[test]
    fn task_titles_are_escaped() {
        let renderer = Renderer::new(&Config::default());
        let task = Task::new(7, "<script>boom()</script>".to_string(), Priority::High, now());
        let html = renderer.task_list(&[&task], EmptyReason::NoItems, now());

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;boom()&lt;/script&gt;"));
        assert!(html.contains(r#"data-intent="toggle-task:7""#));
        assert!(html.contains(r#"data-intent="delete-task:7""#));
        assert!(html.contains(r#"<span class="task-date">Today</span>"#));
    }

    #[test]
    fn empty_state_depends_on_reason() {
        let renderer = Renderer::new(&Config::default());
        assert!(
            renderer
                .task_list(&[], EmptyReason::NoMatches, now())
                .contains("No tasks found")
        );
        assert!(
            renderer
                .task_list(&[], EmptyReason::NoItems, now())
                .contains("No tasks yet")
        );
    }

    #[test]
    fn activity_feed_uses_verbs_and_relative_time() {
        let renderer = Renderer::new(&Config::default());
        let activities = vec![
            Activity {
                id: 2,
                kind: ActivityKind::Other("archived".to_string()),
                task_title: "Tom & Jerry".to_string(),
                timestamp: now() - Duration::hours(2),
            },
            Activity {
                id: 1,
                kind: ActivityKind::Completed,
                task_title: "Review".to_string(),
                timestamp: now(),
            },
        ];
        let html = renderer.activity_feed(&activities, now());
        assert!(html.contains("Updated &quot;Tom &amp; Jerry&quot;"));
        assert!(html.contains("2 hours ago"));
        assert!(html.contains("fa-check"));
        assert!(html.contains("Just now"));
    }

    #[test]
    fn goal_cards_show_due_state() {
        let renderer = Renderer::new(&Config::default());
        let mut overdue = Goal::new(
            3,
            "Ship".to_string(),
            "<b>soon</b>".to_string(),
            GoalCategory::ShortTerm,
            Priority::High,
            NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date"),
            now(),
        );
        overdue.set_progress(50);

        let html = renderer.goal_list(GoalCategory::ShortTerm, &[&overdue], now());
        assert!(html.contains(r#"class="goal-due-date overdue""#));
        assert!(html.contains("Overdue by 3 days"));
        assert!(html.contains("in progress"));
        assert!(html.contains("&lt;b&gt;soon&lt;/b&gt;"));
        assert!(html.contains(r#"style="width: 50%""#));
    }

    #[test]
    fn due_phrases_follow_their_own_horizon() {
        let goal = Goal::new(
            4,
            "Plan".to_string(),
            String::new(),
            GoalCategory::ShortTerm,
            Priority::Low,
            NaiveDate::from_ymd_opt(2026, 2, 22).expect("valid date"),
            now(),
        );

        let mut cfg = Config::default();
        cfg.apply_overrides([("display.recent_days".to_string(), "1".to_string())]);
        let html = Renderer::new(&cfg).goal_list(GoalCategory::ShortTerm, &[&goal], now());
        assert!(html.contains("Due in 5 days"));

        cfg.apply_overrides([("display.due_horizon_days".to_string(), "2".to_string())]);
        let html = Renderer::new(&cfg).goal_list(GoalCategory::ShortTerm, &[&goal], now());
        assert!(html.contains("2/22/2026"));
    }

    #[test]
    fn notices_escape_their_message() {
        let renderer = Renderer::new(&Config::default());
        let html = renderer.notice(&Notice {
            id: 1,
            severity: Severity::Error,
            message: "<oops>".to_string(),
        });
        assert!(html.contains("notification-error"));
        assert!(html.contains("&lt;oops&gt;"));
    }
}

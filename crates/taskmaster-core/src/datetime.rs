use std::cell::Cell;

use chrono::{
  DateTime,
  Duration,
  NaiveDate,
  Utc
};
use chrono_tz::Tz;

pub trait Clock {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
  now: Cell<DateTime<Utc>>
}

impl FixedClock {
  pub fn new(
    now: DateTime<Utc>
  ) -> Self {
    Self {
      now: Cell::new(now)
    }
  }

  pub fn set(
    &self,
    now: DateTime<Utc>
  ) {
    self.now.set(now);
  }

  pub fn advance(
    &self,
    by: Duration
  ) {
    self.now.set(self.now.get() + by);
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.now.get()
  }
}

pub fn local_date(
  at: DateTime<Utc>,
  tz: Tz
) -> NaiveDate {
  at.with_timezone(&tz).date_naive()
}

pub fn format_absolute_date(
  date: NaiveDate
) -> String {
  date.format("%-m/%-d/%Y").to_string()
}

fn plural(
  count: i64,
  unit: &str
) -> String {
  if count == 1 {
    format!("{count} {unit}")
  } else {
    format!("{count} {unit}s")
  }
}

/// Age of a task relative to `today`, in calendar days.
pub fn age_label(
  created: NaiveDate,
  today: NaiveDate,
  horizon_days: i64
) -> String {
  let days =
    (today - created).num_days();
  match days {
    | d if d <= 0 => "Today".to_string(),
    | 1 => "Yesterday".to_string(),
    | d if d <= horizon_days => {
      format!("{d} days ago")
    }
    | _ => format_absolute_date(created)
  }
}

pub fn due_label(
  due: NaiveDate,
  today: NaiveDate,
  horizon_days: i64
) -> String {
  let days = (due - today).num_days();
  match days {
    | 0 => "Due today".to_string(),
    | 1 => "Due tomorrow".to_string(),
    | -1 => "Due yesterday".to_string(),
    | d if d < 0 => {
      format!(
        "Overdue by {}",
        plural(-d, "day")
      )
    }
    | d if d <= horizon_days => {
      format!("Due in {}", plural(d, "day"))
    }
    | _ => format_absolute_date(due)
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DueState {
  Overdue,
  DueSoon,
  OnTrack
}

impl DueState {
  pub fn classify(
    due: NaiveDate,
    today: NaiveDate,
    completed: bool,
    soon_days: i64
  ) -> Self {
    if completed {
      return DueState::OnTrack;
    }
    let days = (due - today).num_days();
    if days < 0 {
      DueState::Overdue
    } else if days <= soon_days {
      DueState::DueSoon
    } else {
      DueState::OnTrack
    }
  }

  pub fn css_class(self) -> &'static str {
    match self {
      | DueState::Overdue => "overdue",
      | DueState::DueSoon => "due-soon",
      | DueState::OnTrack => ""
    }
  }
}

/// "Just now", then minutes, hours and days, smallest unit that applies.
pub fn relative_time(
  at: DateTime<Utc>,
  now: DateTime<Utc>
) -> String {
  let elapsed = (now - at).abs();
  let minutes = elapsed.num_minutes();
  let hours = elapsed.num_hours();
  let days = elapsed.num_days();

  if minutes < 1 {
    "Just now".to_string()
  } else if minutes < 60 {
    format!("{} ago", plural(minutes, "minute"))
  } else if hours < 24 {
    format!("{} ago", plural(hours, "hour"))
  } else {
    format!("{} ago", plural(days, "day"))
  }
}

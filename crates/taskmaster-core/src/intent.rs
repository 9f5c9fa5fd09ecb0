use std::fmt;
use std::str::FromStr;

use anyhow::{Context, anyhow};

use crate::filter::CompletionFilter;
use crate::goal::{GoalCategory, GoalForm};
use crate::task::Priority;

/// Blocking yes/no prompt shown before a deletion.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// A named UI action. Click targets carry the string form in a
/// `data-intent` attribute (`toggle-task:42`); form submissions build the
/// payload-carrying variants directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SubmitNewTask { title: String, priority: Priority },
    ToggleTask(u64),
    EditTask(u64),
    SaveTaskEdit { id: u64, title: String, priority: Priority },
    DeleteTask(u64),
    SetFilter(CompletionFilter),
    Search(String),
    SwitchCategory(GoalCategory),
    AddGoal(GoalCategory),
    EditGoal(u64),
    SaveGoal(GoalForm),
    DeleteGoal(u64),
    CloseModal,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SubmitNewTask { .. } => "submit-new-task",
            Intent::ToggleTask(_) => "toggle-task",
            Intent::EditTask(_) => "edit-task",
            Intent::SaveTaskEdit { .. } => "save-task-edit",
            Intent::DeleteTask(_) => "delete-task",
            Intent::SetFilter(_) => "filter",
            Intent::Search(_) => "search",
            Intent::SwitchCategory(_) => "switch-category",
            Intent::AddGoal(_) => "add-goal",
            Intent::EditGoal(_) => "edit-goal",
            Intent::SaveGoal(_) => "save-goal",
            Intent::DeleteGoal(_) => "delete-goal",
            Intent::CloseModal => "close-modal",
        }
    }
}

/// Click intents only; form intents have no attribute form.
impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::ToggleTask(id)
            | Intent::EditTask(id)
            | Intent::DeleteTask(id)
            | Intent::EditGoal(id)
            | Intent::DeleteGoal(id) => write!(f, "{}:{id}", self.name()),
            Intent::SetFilter(filter) => write!(f, "filter:{}", filter.as_str()),
            Intent::SwitchCategory(category) | Intent::AddGoal(category) => {
                write!(f, "{}:{}", self.name(), category.as_str())
            }
            other => f.write_str(other.name()),
        }
    }
}

fn parse_id(raw: Option<&str>, name: &str) -> anyhow::Result<u64> {
    let raw = raw.ok_or_else(|| anyhow!("{name} requires an id"))?;
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("invalid id for {name}: {raw:?}"))
}

fn require_arg<'a>(raw: Option<&'a str>, name: &str) -> anyhow::Result<&'a str> {
    raw.ok_or_else(|| anyhow!("{name} requires an argument"))
}

impl FromStr for Intent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        match name {
            "toggle-task" => Ok(Intent::ToggleTask(parse_id(arg, name)?)),
            "edit-task" => Ok(Intent::EditTask(parse_id(arg, name)?)),
            "delete-task" => Ok(Intent::DeleteTask(parse_id(arg, name)?)),
            "edit-goal" => Ok(Intent::EditGoal(parse_id(arg, name)?)),
            "delete-goal" => Ok(Intent::DeleteGoal(parse_id(arg, name)?)),
            "filter" => Ok(Intent::SetFilter(require_arg(arg, name)?.parse()?)),
            "switch-category" => Ok(Intent::SwitchCategory(require_arg(arg, name)?.parse()?)),
            "add-goal" => Ok(Intent::AddGoal(require_arg(arg, name)?.parse()?)),
            "close-modal" => Ok(Intent::CloseModal),
            other => Err(anyhow!("unknown intent: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_click_intents() {
        assert_eq!("toggle-task:42".parse::<Intent>().expect("parse"), Intent::ToggleTask(42));
        assert_eq!(
            "filter:completed".parse::<Intent>().expect("parse"),
            Intent::SetFilter(CompletionFilter::Completed)
        );
        assert_eq!(
            "add-goal:short_term".parse::<Intent>().expect("parse"),
            Intent::AddGoal(GoalCategory::ShortTerm)
        );
        assert_eq!("close-modal".parse::<Intent>().expect("parse"), Intent::CloseModal);
    }

    #[test]
    fn rejects_malformed_intents() {
        assert!("toggle-task".parse::<Intent>().is_err());
        assert!("toggle-task:abc".parse::<Intent>().is_err());
        assert!("launch-rocket:1".parse::<Intent>().is_err());
        assert!("switch-category:weekly".parse::<Intent>().is_err());
    }

    #[test]
    fn attribute_form_parses_back() {
        let intents = [
            Intent::DeleteGoal(7),
            Intent::SetFilter(CompletionFilter::Active),
            Intent::SwitchCategory(GoalCategory::LongTerm),
        ];
        for intent in intents {
            assert_eq!(intent.to_string().parse::<Intent>().expect("parse"), intent);
        }
    }

    #[test]
    fn closures_confirm() {
        let yes = |_: &str| true;
        assert!(yes.confirm("Delete?"));
    }
}

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Task,
    Goal,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Task => f.write_str("task"),
            Subject::Goal => f.write_str("goal"),
        }
    }
}

/// Why a mutation did not change anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Please enter a {0} title")]
    EmptyTitle(Subject),

    #[error("Please select a due date")]
    MissingDueDate,

    #[error("Invalid due date: {0}")]
    InvalidDueDate(String),

    #[error("{0} {1} not found")]
    NotFound(Subject, u64),

    #[error("deletion cancelled")]
    Cancelled,
}

impl MutationError {
    /// Validation failures are shown to the user, the rest are silent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MutationError::EmptyTitle(_)
                | MutationError::MissingDueDate
                | MutationError::InvalidDueDate(_)
        )
    }
}

pub type MutationResult<T> = std::result::Result<T, MutationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_subject() {
        assert_eq!(
            MutationError::EmptyTitle(Subject::Task).to_string(),
            "Please enter a task title"
        );
        assert_eq!(
            MutationError::EmptyTitle(Subject::Goal).to_string(),
            "Please enter a goal title"
        );
    }

    #[test]
    fn only_validation_errors_are_user_facing() {
        assert!(MutationError::MissingDueDate.is_validation());
        assert!(!MutationError::NotFound(Subject::Task, 4).is_validation());
        assert!(!MutationError::Cancelled.is_validation());
    }
}

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "fa-check-circle",
            Severity::Error => "fa-exclamation-circle",
            Severity::Info => "fa-info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct Notifier {
    next_id: u64,
    active: Vec<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> Notice {
        self.next_id += 1;
        let notice = Notice {
            id: self.next_id,
            severity,
            message: message.into(),
        };
        trace!(id = notice.id, severity = notice.severity.as_str(), "notice shown");
        self.active.push(notice.clone());
        notice
    }

    /// Removes a toast. Returns false, and changes nothing, when it is
    /// already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|notice| notice.id != id);
        self.active.len() != before
    }

    pub fn active(&self) -> &[Notice] {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissing_twice_is_a_no_op() {
        let mut notifier = Notifier::new();
        let first = notifier.push(Severity::Success, "Task added successfully");
        let second = notifier.push(Severity::Error, "Please enter a task title");

        assert!(notifier.dismiss(first.id));
        assert!(!notifier.dismiss(first.id));
        assert_eq!(notifier.active(), &[second]);
    }
}

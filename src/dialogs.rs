use std::collections::VecDeque;

/// Blocking confirmation and notification capability
///
/// Both calls return only once the user has answered or acknowledged.
pub trait Dialogs {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a notification
    fn alert(&mut self, message: &str);
}

impl<D: Dialogs + ?Sized> Dialogs for Box<D> {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }
}

/// Deterministic dialogs for tests and non-interactive runs
///
/// Confirmations are answered from a queue, falling back to a default
/// answer once the queue is empty. Every prompt and alert is recorded.
#[derive(Debug, Clone)]
pub struct ScriptedDialogs {
    answers: VecDeque<bool>,
    default_answer: bool,
    confirmations: Vec<String>,
    alerts: Vec<String>,
}

impl Default for ScriptedDialogs {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl ScriptedDialogs {
    /// Dialogs that give `answer` to every confirmation
    pub fn answering(answer: bool) -> Self {
        Self {
            answers: VecDeque::new(),
            default_answer: answer,
            confirmations: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// Queue the answer for the next unanswered confirmation
    pub fn push_answer(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    pub fn confirmations(&self) -> &[String] {
        &self.confirmations
    }

    pub fn clear_records(&mut self) {
        self.alerts.clear();
        self.confirmations.clear();
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_answers_then_default() {
        let mut dialogs = ScriptedDialogs::answering(true);
        dialogs.push_answer(false);

        assert!(!dialogs.confirm("Are you sure?"));
        assert!(dialogs.confirm("Are you sure?"));
        assert_eq!(dialogs.confirmations().len(), 2);
    }

    #[test]
    fn test_alerts_recorded() {
        let mut dialogs = ScriptedDialogs::default();
        dialogs.alert("Please add an item");
        assert_eq!(dialogs.last_alert(), Some("Please add an item"));

        dialogs.clear_records();
        assert!(dialogs.alerts().is_empty());
    }
}

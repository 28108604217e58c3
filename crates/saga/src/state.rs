//! Saga execution state machine.

/// The state of one saga invocation.
///
/// State transitions:
/// ```text
/// Ready ──► Running(0) ──► … ──► Running(n-1) ──┬──► Completed
///                                               │
///           Running(k) fails ──► Compensating(k-1) ──► … ──► Compensating(0) ──► Terminated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SagaState {
    /// Execution has not started.
    #[default]
    Ready,

    /// About to run, or running, the forward action of the step at this index.
    Running(usize),

    /// Running the compensation of the step at this index.
    Compensating(usize),

    /// Every forward action succeeded (terminal state).
    Completed,

    /// A forward action failed and compensation finished (terminal state).
    Terminated,
}

impl SagaState {
    /// Returns true if the saga can begin running.
    pub fn can_run(&self) -> bool {
        matches!(self, SagaState::Ready)
    }

    /// Returns true if the saga can begin compensation.
    pub fn can_compensate(&self) -> bool {
        matches!(self, SagaState::Running(_))
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SagaState::Completed | SagaState::Terminated)
    }

    /// Returns the state name without its step index.
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaState::Ready => "Ready",
            SagaState::Running(_) => "Running",
            SagaState::Compensating(_) => "Compensating",
            SagaState::Completed => "Completed",
            SagaState::Terminated => "Terminated",
        }
    }
}

impl std::fmt::Display for SagaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SagaState::Running(index) | SagaState::Compensating(index) => {
                write!(f, "{}({index})", self.as_str())
            }
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_ready() {
        assert_eq!(SagaState::default(), SagaState::Ready);
    }

    #[test]
    fn test_can_run() {
        assert!(SagaState::Ready.can_run());
        assert!(!SagaState::Running(0).can_run());
        assert!(!SagaState::Compensating(0).can_run());
        assert!(!SagaState::Completed.can_run());
        assert!(!SagaState::Terminated.can_run());
    }

    #[test]
    fn test_can_compensate() {
        assert!(!SagaState::Ready.can_compensate());
        assert!(SagaState::Running(2).can_compensate());
        assert!(!SagaState::Compensating(1).can_compensate());
        assert!(!SagaState::Completed.can_compensate());
        assert!(!SagaState::Terminated.can_compensate());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SagaState::Ready.is_terminal());
        assert!(!SagaState::Running(0).is_terminal());
        assert!(!SagaState::Compensating(0).is_terminal());
        assert!(SagaState::Completed.is_terminal());
        assert!(SagaState::Terminated.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(SagaState::Ready.to_string(), "Ready");
        assert_eq!(SagaState::Running(3).to_string(), "Running(3)");
        assert_eq!(SagaState::Compensating(1).to_string(), "Compensating(1)");
        assert_eq!(SagaState::Completed.to_string(), "Completed");
        assert_eq!(SagaState::Terminated.to_string(), "Terminated");
    }
}

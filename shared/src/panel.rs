/// Lifecycle of one analysis panel.
///
/// `Idle -> Submitting -> Success | Failed`, and back to `Submitting` on the
/// next submission. A submission without input stays in `Idle` with a notice.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    Idle { notice: Option<String> },
    Submitting,
    Success(T),
    Failed(String),
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        PanelState::Idle { notice: None }
    }
}

impl<T> PanelState<T> {
    /// Returns `true` when the caller should issue the remote call.
    pub fn submit(&mut self, has_input: bool, missing_input: &str) -> bool {
        if self.is_submitting() {
            return false;
        }
        if !has_input {
            *self = PanelState::Idle {
                notice: Some(missing_input.to_string()),
            };
            return false;
        }
        *self = PanelState::Submitting;
        true
    }

    pub fn succeed(&mut self, result: T) {
        *self = PanelState::Success(result);
    }

    /// Uses `message` when it carries text, otherwise the task's fallback.
    pub fn fail(&mut self, message: Option<String>, fallback: &str) {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        *self = PanelState::Failed(message);
    }

    /// A new input discards whatever the previous submission produced.
    pub fn input_changed(&mut self) {
        if !self.is_submitting() {
            *self = PanelState::default();
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, PanelState::Submitting)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            PanelState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PanelState::Failed(message) => Some(message),
            PanelState::Idle {
                notice: Some(notice),
            } => Some(notice),
            _ => None,
        }
    }

    /// The "please upload" prompt left by a submit without input.
    pub fn notice(&self) -> Option<&str> {
        match self {
            PanelState::Idle { notice } => notice.as_deref(),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, PanelState::Idle { notice: None })
    }
}

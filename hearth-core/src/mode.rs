//! Which acquisition path the user is on.

/// Input mode for the capture page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Manual,
    AiAssisted,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Manual => "manual",
            InputMode::AiAssisted => "ai_assisted",
        }
    }
}

/// Tracks the active input mode. Switching never clears draft or staged input.
#[derive(Debug, Clone, Default)]
pub struct InputModeController {
    mode: InputMode,
}

impl InputModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Explicit user switch (tab or toggle).
    pub fn switch_to(&mut self, mode: InputMode) {
        if self.mode != mode {
            tracing::debug!(from = self.mode.as_str(), to = mode.as_str(), "input mode switched");
            self.mode = mode;
        }
    }

    /// Return to manual review after a successful extraction.
    pub fn extraction_succeeded(&mut self) {
        self.switch_to(InputMode::Manual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_manual() {
        assert_eq!(InputModeController::new().mode(), InputMode::Manual);
    }

    #[test]
    fn test_transitions() {
        let mut controller = InputModeController::new();
        controller.switch_to(InputMode::AiAssisted);
        assert_eq!(controller.mode(), InputMode::AiAssisted);

        controller.extraction_succeeded();
        assert_eq!(controller.mode(), InputMode::Manual);

        // Already manual: stays manual.
        controller.extraction_succeeded();
        assert_eq!(controller.mode(), InputMode::Manual);
    }
}

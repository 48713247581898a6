//! Confirmation workflow.
//!
//! A prompt gating an action behind explicit user confirmation. The workflow
//! is `Idle` until a request arrives, `Prompting` while the prompt is shown,
//! and returns to `Idle` once the user confirms or cancels. Rendering the
//! prompt is up to the [`MenuSurface`](crate::surface::MenuSurface).

use actionbar_core::prelude::*;
use actionbar_core::ExternalTarget;

/// What runs when a prompt is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmedAction {
    /// Delete the alarm under edit. The id is read when confirmed.
    DeleteEditedAlarm,
    Launch(ExternalTarget),
    /// Informational prompt, nothing to run
    Acknowledge,
}

/// A pending prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    /// `None` for acknowledge-only prompts
    pub cancel_label: Option<String>,
    pub action: ConfirmedAction,
}

impl ConfirmationRequest {
    /// Create a generic confirm/cancel prompt
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        action: ConfirmedAction,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "OK".to_string(),
            cancel_label: Some("Cancel".to_string()),
            action,
        }
    }

    /// Prompt before deleting the alarm under edit
    pub fn delete_alarm() -> Self {
        Self::new(
            "Delete alarm",
            "This alarm will be deleted.",
            ConfirmedAction::DeleteEditedAlarm,
        )
    }

    /// Prompt before leaving the app for a store page
    pub fn launch(target: ExternalTarget) -> Self {
        let (title, message) = match target {
            ExternalTarget::ReviewListing => (
                "Review",
                "Open the store listing to rate and review this app?",
            ),
            ExternalTarget::DashClockSearch => (
                "DashClock",
                "Search the store for the DashClock widget?",
            ),
            ExternalTarget::Mp3CutterSearch => (
                "MP3 cutter",
                "Search the store for an app to cut ringtones?",
            ),
            ExternalTarget::Share => ("Share", "Share a link to this app?"),
        };
        Self::new(title, message, ConfirmedAction::Launch(target))
    }

    /// Informational about prompt
    pub fn about() -> Self {
        Self {
            title: "About".to_string(),
            message: "Simple alarm clock.".to_string(),
            confirm_label: "OK".to_string(),
            cancel_label: None,
            action: ConfirmedAction::Acknowledge,
        }
    }
}

/// How the user answered a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    /// The explicit confirm affordance
    Confirm,
    /// The explicit cancel affordance
    Cancel,
    /// Back button, outside tap, or any other dismissal
    Dismiss,
}

/// Outcome of resolving a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Confirmed(ConfirmedAction),
    Cancelled,
}

/// Workflow state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Prompting(ConfirmationRequest),
}

/// At most one prompt at a time
#[derive(Debug, Default)]
pub struct ConfirmationWorkflow {
    state: WorkflowState,
}

impl ConfirmationWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_prompting(&self) -> bool {
        matches!(self.state, WorkflowState::Prompting(_))
    }

    /// The request currently shown, if any
    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        match &self.state {
            WorkflowState::Prompting(request) => Some(request),
            WorkflowState::Idle => None,
        }
    }

    /// Move `Idle → Prompting`.
    ///
    /// While a prompt is live the new request is rejected with
    /// [`Error::DoubleConfirmation`] and the live one stays in place.
    pub fn request(&mut self, request: ConfirmationRequest) -> Result<()> {
        if self.is_prompting() {
            return Err(Error::DoubleConfirmation);
        }
        debug!("Prompting: {}", request.title);
        self.state = WorkflowState::Prompting(request);
        Ok(())
    }

    /// Resolve the live prompt and return to `Idle`.
    ///
    /// Only [`PromptResponse::Confirm`] yields [`Resolution::Confirmed`].
    /// Returns `None` when nothing is pending.
    pub fn resolve(&mut self, response: PromptResponse) -> Option<Resolution> {
        let request = match std::mem::take(&mut self.state) {
            WorkflowState::Prompting(request) => request,
            WorkflowState::Idle => return None,
        };

        let resolution = match response {
            PromptResponse::Confirm => Resolution::Confirmed(request.action),
            PromptResponse::Cancel | PromptResponse::Dismiss => Resolution::Cancelled,
        };
        debug!("Prompt '{}' resolved: {:?}", request.title, resolution);
        Some(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let workflow = ConfirmationWorkflow::new();
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert!(workflow.pending().is_none());
    }

    #[test]
    fn test_request_moves_to_prompting() {
        let mut workflow = ConfirmationWorkflow::new();
        workflow
            .request(ConfirmationRequest::delete_alarm())
            .unwrap();
        assert!(workflow.is_prompting());
        assert_eq!(
            workflow.pending().map(|r| r.action),
            Some(ConfirmedAction::DeleteEditedAlarm)
        );
    }

    #[test]
    fn test_second_request_is_rejected() {
        let mut workflow = ConfirmationWorkflow::new();
        workflow
            .request(ConfirmationRequest::delete_alarm())
            .unwrap();

        let err = workflow
            .request(ConfirmationRequest::launch(ExternalTarget::ReviewListing))
            .unwrap_err();
        assert!(matches!(err, Error::DoubleConfirmation));

        // First request stays authoritative
        assert_eq!(
            workflow.pending().map(|r| r.action),
            Some(ConfirmedAction::DeleteEditedAlarm)
        );
        assert_eq!(
            workflow.resolve(PromptResponse::Confirm),
            Some(Resolution::Confirmed(ConfirmedAction::DeleteEditedAlarm))
        );
    }

    #[test]
    fn test_confirm_returns_action_and_goes_idle() {
        let mut workflow = ConfirmationWorkflow::new();
        workflow
            .request(ConfirmationRequest::launch(ExternalTarget::DashClockSearch))
            .unwrap();

        let resolution = workflow.resolve(PromptResponse::Confirm);
        assert_eq!(
            resolution,
            Some(Resolution::Confirmed(ConfirmedAction::Launch(
                ExternalTarget::DashClockSearch
            )))
        );
        assert!(!workflow.is_prompting());
    }

    #[test]
    fn test_cancel_discards_request() {
        let mut workflow = ConfirmationWorkflow::new();
        workflow
            .request(ConfirmationRequest::delete_alarm())
            .unwrap();

        assert_eq!(
            workflow.resolve(PromptResponse::Cancel),
            Some(Resolution::Cancelled)
        );
        assert_eq!(workflow.state(), &WorkflowState::Idle);

        // Accepts a new request afterwards
        assert!(workflow
            .request(ConfirmationRequest::delete_alarm())
            .is_ok());
    }

    #[test]
    fn test_dismiss_never_confirms() {
        let mut workflow = ConfirmationWorkflow::new();
        workflow
            .request(ConfirmationRequest::delete_alarm())
            .unwrap();
        assert_eq!(
            workflow.resolve(PromptResponse::Dismiss),
            Some(Resolution::Cancelled)
        );
    }

    #[test]
    fn test_resolve_when_idle_is_none() {
        let mut workflow = ConfirmationWorkflow::new();
        assert_eq!(workflow.resolve(PromptResponse::Confirm), None);
        assert_eq!(workflow.resolve(PromptResponse::Cancel), None);
    }

    #[test]
    fn test_about_is_acknowledge_only() {
        let about = ConfirmationRequest::about();
        assert!(about.cancel_label.is_none());
        assert_eq!(about.action, ConfirmedAction::Acknowledge);
    }
}

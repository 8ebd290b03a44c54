//! Passenger form state
//!
//! The form owns the editable [`PassengerInput`], an optional display name
//! and the outcome of the latest submission. A submission runs
//! Idle → Submitting → (Succeeded | Failed); starting the next one clears the
//! previous result and error before anything new is known.
//!
//! [`PredictionForm::begin_submission`] and [`PredictionForm::settle`] are
//! the two halves of [`PredictionForm::submit`], exposed so a front end can
//! keep editing (or try to resubmit) while the request is in flight.

use tracing::Instrument;
use uuid::Uuid;

use crate::client::PredictionService;
use crate::passenger::{FieldEdit, PassengerInput};
use crate::prediction::PredictionResult;
use crate::render::{render_outcome, RenderedOutcome};
use crate::telemetry;
use crate::Result;

/// Where the form is in the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Ticket for one in-flight request: its id and the exact body to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub body: PassengerInput,
}

impl Submission {
    /// Send the body, with the request running inside the submission span.
    pub async fn send(&self, service: &dyn PredictionService) -> Result<PredictionResult> {
        service
            .predict(&self.body)
            .instrument(telemetry::submission_span(self.id))
            .await
    }
}

#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    input: PassengerInput,
    display_name: Option<String>,
    in_flight: Option<Uuid>,
    result: Option<PredictionResult>,
    error: Option<String>,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: PassengerInput) -> Self {
        PredictionForm {
            input,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &PassengerInput {
        &self.input
    }

    pub fn edit(&mut self, edit: FieldEdit<'_>) {
        self.input.apply(edit);
    }

    /// Set the cosmetic passenger name; blank clears it.
    pub fn set_display_name(&mut self, name: &str) {
        let name = name.trim();
        self.display_name = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn phase(&self) -> FormPhase {
        if self.in_flight.is_some() {
            FormPhase::Submitting
        } else if self.result.is_some() {
            FormPhase::Succeeded
        } else if self.error.is_some() {
            FormPhase::Failed
        } else {
            FormPhase::Idle
        }
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.in_flight.is_none()
    }

    /// Caption of the submit control.
    pub fn submit_caption(&self) -> &'static str {
        if self.is_submit_enabled() {
            "Predict Survival"
        } else {
            "Predicting..."
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The result panel, if the last submission succeeded.
    pub fn outcome(&self) -> Option<RenderedOutcome> {
        self.result
            .as_ref()
            .map(|result| render_outcome(result, self.display_name()))
    }

    /// Start a submission. Returns `None`, changing nothing, while another
    /// one is in flight.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        if self.in_flight.is_some() {
            telemetry::emit_submission_ignored();
            return None;
        }

        for warning in self.input.domain_warnings() {
            tracing::warn!(event = "input.out_of_domain", %warning);
        }

        let id = Uuid::new_v4();
        self.in_flight = Some(id);
        self.result = None;
        self.error = None;
        telemetry::emit_submission_started(id);

        Some(Submission {
            id,
            body: self.input.clone(),
        })
    }

    /// Record how a submission ended. Returns `false` for a ticket that is
    /// not the one in flight.
    pub fn settle(&mut self, submission: &Submission, outcome: Result<PredictionResult>) -> bool {
        if self.in_flight != Some(submission.id) {
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                telemetry::emit_submission_succeeded(submission.id, &result);
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                telemetry::emit_submission_failed(submission.id, &err);
                self.result = None;
                self.error = Some(err.user_message());
            }
        }
        true
    }

    /// Submit the current input and wait for the answer.
    ///
    /// Returns `None` if a submission was already in flight.
    pub async fn submit(
        &mut self,
        service: &dyn PredictionService,
    ) -> Option<Result<PredictionResult>> {
        let submission = self.begin_submission()?;
        let outcome = submission.send(service).await;

        self.settle(&submission, outcome.clone());
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictError;
    use crate::passenger::PassengerClass;
    use crate::prediction::SurvivalLabel;

    #[test]
    fn test_new_form_is_idle() {
        let form = PredictionForm::new();
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(form.is_submit_enabled());
        assert_eq!(form.submit_caption(), "Predict Survival");
        assert_eq!(form.input(), &PassengerInput::default());
    }

    #[test]
    fn test_with_input_starts_idle() {
        let input = PassengerInput {
            fare: 7.25,
            ..PassengerInput::default()
        };
        let form = PredictionForm::with_input(input.clone());
        assert_eq!(form.input(), &input);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(form.outcome().is_none());
    }

    #[test]
    fn test_begin_snapshots_input_and_disables_submit() {
        let mut form = PredictionForm::new();
        form.edit(FieldEdit::Age("abc"));

        let submission = form.begin_submission().unwrap();
        assert_eq!(submission.body.age, 0.0);
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(form.submit_caption(), "Predicting...");
        assert!(form.begin_submission().is_none());
    }

    #[test]
    fn test_edits_during_flight_do_not_change_body() {
        let mut form = PredictionForm::new();
        let submission = form.begin_submission().unwrap();
        form.edit(FieldEdit::Class(PassengerClass::First));

        assert_eq!(submission.body.class, PassengerClass::Third);
        assert_eq!(form.input().class, PassengerClass::First);
    }

    #[test]
    fn test_settle_success_then_failure() {
        let mut form = PredictionForm::new();
        let first = form.begin_submission().unwrap();
        assert!(form.settle(
            &first,
            Ok(PredictionResult::new(SurvivalLabel::Survived, Some(0.9)))
        ));
        assert_eq!(form.phase(), FormPhase::Succeeded);

        let second = form.begin_submission().unwrap();
        assert!(form.result().is_none());
        assert!(form.settle(&second, Err(PredictError::RequestFailed { status: 500 })));
        assert_eq!(form.phase(), FormPhase::Failed);
        assert_eq!(form.error_message(), Some("Failed to get prediction"));
        assert!(form.outcome().is_none());
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut form = PredictionForm::new();
        let submission = form.begin_submission().unwrap();
        let stale = Submission {
            id: Uuid::new_v4(),
            body: submission.body.clone(),
        };
        assert!(!form.settle(&stale, Err(PredictError::Transport("late".into()))));
        assert_eq!(form.phase(), FormPhase::Submitting);
    }

    #[test]
    fn test_display_name_flows_into_outcome() {
        let mut form = PredictionForm::new();
        form.set_display_name("  Jack ");
        assert_eq!(form.display_name(), Some("Jack"));

        let submission = form.begin_submission().unwrap();
        form.settle(
            &submission,
            Ok(PredictionResult::new(SurvivalLabel::DidNotSurvive, None)),
        );
        let outcome = form.outcome().unwrap();
        assert_eq!(outcome.headline(), "Jack's Prediction: Would Not Survive");

        form.set_display_name("");
        assert_eq!(form.display_name(), None);
    }
}

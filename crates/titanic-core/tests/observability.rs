//! Tracing tests for the submission lifecycle.

use titanic_core::fakes::ScriptedPredictionService;
use titanic_core::telemetry::{emit_submission_failed, submission_span};
use titanic_core::{FieldEdit, PredictError, PredictionForm, PredictionResult, SurvivalLabel};
use tracing_test::traced_test;
use uuid::Uuid;

#[tokio::test]
#[traced_test]
async fn test_successful_submission_logs_start_and_success() {
    let service = ScriptedPredictionService::new();
    service.push(Ok(PredictionResult::new(SurvivalLabel::Survived, Some(0.9))));

    let mut form = PredictionForm::new();
    form.submit(&service).await;

    assert!(logs_contain("submission.started"));
    assert!(logs_contain("submission.succeeded"));
}

#[tokio::test]
#[traced_test]
async fn test_failed_submission_logs_warning() {
    let service = ScriptedPredictionService::new();
    service.push(Err(PredictError::RequestFailed { status: 503 }));

    let mut form = PredictionForm::new();
    form.submit(&service).await;

    assert!(logs_contain("submission.failed"));
    assert!(logs_contain("RequestFailed"));
}

#[traced_test]
#[test]
fn test_second_begin_logs_ignored() {
    let mut form = PredictionForm::new();
    let _pending = form.begin_submission().unwrap();
    assert!(form.begin_submission().is_none());

    assert!(logs_contain("submission.ignored"));
}

#[traced_test]
#[test]
fn test_out_of_domain_input_is_logged_not_blocked() {
    let mut form = PredictionForm::new();
    form.edit(FieldEdit::Age("130"));
    assert!(form.begin_submission().is_some());

    assert!(logs_contain("input.out_of_domain"));
}

#[traced_test]
#[test]
fn test_submission_span_carries_id() {
    let id = Uuid::new_v4();
    submission_span(id).in_scope(|| {
        emit_submission_failed(id, &PredictError::Transport("reset by peer".into()));
    });

    assert!(logs_contain(&id.to_string()));
    assert!(logs_contain("reset by peer"));
}

#[tokio::test]
#[traced_test]
async fn test_service_events_run_inside_submission_span() {
    let service = ScriptedPredictionService::new();
    service.push(Ok(PredictionResult::new(SurvivalLabel::Survived, None)));

    let mut form = PredictionForm::new();
    let submission = form.begin_submission().unwrap();
    let outcome = submission.send(&service).await;
    form.settle(&submission, outcome);

    let id = submission.id.to_string();
    logs_assert(|lines: &[&str]| {
        let line = lines
            .iter()
            .find(|line| line.contains("scripted prediction"))
            .ok_or_else(|| "service event missing".to_string())?;
        if line.contains("titanic.submission") && line.contains(&id) {
            Ok(())
        } else {
            Err(format!("service event outside submission span: {}", line))
        }
    });
}

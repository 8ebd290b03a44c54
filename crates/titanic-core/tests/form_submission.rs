//! Submission lifecycle tests for the passenger form.
//!
//! These drive `PredictionForm` against the scripted in-memory service and
//! check what the user would see after each submission.

use titanic_core::fakes::ScriptedPredictionService;
use titanic_core::{
    FieldEdit, FormPhase, PassengerClass, PassengerInput, Port, PredictError, PredictionForm,
    PredictionResult, PredictionService, Sex, SurvivalLabel, Tone, FALLBACK_MESSAGE,
    REQUEST_FAILED_MESSAGE,
};

fn survived(confidence: f64) -> PredictionResult {
    PredictionResult::new(SurvivalLabel::Survived, Some(confidence))
}

#[tokio::test]
async fn test_submit_sends_exactly_the_form_state() {
    let service = ScriptedPredictionService::new();
    service.push(Ok(survived(0.7)));

    let mut form = PredictionForm::new();
    form.edit(FieldEdit::Class(PassengerClass::First));
    form.edit(FieldEdit::Sex(Sex::Male));
    form.edit(FieldEdit::Age("22.5"));
    form.edit(FieldEdit::SiblingsSpouses("1"));
    form.edit(FieldEdit::ParentsChildren("2"));
    form.edit(FieldEdit::Fare("71.28"));
    form.edit(FieldEdit::Embarked(Port::Cherbourg));

    form.submit(&service).await.unwrap().unwrap();

    let expected = PassengerInput {
        class: PassengerClass::First,
        sex: Sex::Male,
        age: 22.5,
        siblings_spouses: 1,
        parents_children: 2,
        fare: 71.28,
        embarked: Port::Cherbourg,
    };
    assert_eq!(service.received(), vec![expected]);
}

#[tokio::test]
async fn test_non_numeric_age_submits_zero() {
    let service = ScriptedPredictionService::new();
    service.push(Ok(survived(0.5)));

    let mut form = PredictionForm::new();
    form.edit(FieldEdit::Age("abc"));
    form.submit(&service).await;

    assert_eq!(service.received()[0].age, 0.0);
}

#[tokio::test]
async fn test_resubmit_while_pending_has_no_effect() {
    let service = ScriptedPredictionService::new();
    service.push(Ok(survived(0.9)));
    service.push(Ok(survived(0.1)));

    let mut form = PredictionForm::new();
    let submission = form.begin_submission().unwrap();
    assert!(!form.is_submit_enabled());

    // the control is disabled: neither half of a second submission goes through
    assert!(form.begin_submission().is_none());
    assert!(form.submit(&service).await.is_none());
    assert_eq!(service.call_count(), 0);

    let outcome = service.predict(&submission.body).await;
    assert!(form.settle(&submission, outcome));
    assert_eq!(service.call_count(), 1);
    assert_eq!(form.result(), Some(&survived(0.9)));
    assert!(form.is_submit_enabled());
}

#[tokio::test]
async fn test_survival_renders_affirmative_with_percentage() {
    let service = ScriptedPredictionService::new();
    service.push(Ok(survived(0.853)));

    let mut form = PredictionForm::new();
    form.submit(&service).await;

    let outcome = form.outcome().unwrap();
    assert_eq!(form.phase(), FormPhase::Succeeded);
    assert_eq!(outcome.verdict, "Would Survive");
    assert_eq!(outcome.tone, Tone::Affirmative);
    assert_eq!(outcome.confidence.as_deref(), Some("Confidence: 85.3%"));
}

#[tokio::test]
async fn test_non_survival_renders_negative() {
    let service = ScriptedPredictionService::new();
    service.push(Ok(PredictionResult::new(SurvivalLabel::DidNotSurvive, Some(0.15))));

    let mut form = PredictionForm::new();
    form.set_display_name("Jack");
    form.submit(&service).await;

    let outcome = form.outcome().unwrap();
    assert_eq!(outcome.tone, Tone::Negative);
    assert_eq!(outcome.headline(), "Jack's Prediction: Would Not Survive");
}

#[tokio::test]
async fn test_request_failure_shows_generic_message_and_no_result() {
    let service = ScriptedPredictionService::new();
    service.push(Err(PredictError::RequestFailed { status: 502 }));

    let mut form = PredictionForm::new();
    let outcome = form.submit(&service).await.unwrap();

    assert!(outcome.is_err());
    assert_eq!(form.phase(), FormPhase::Failed);
    assert_eq!(form.error_message(), Some(REQUEST_FAILED_MESSAGE));
    assert!(form.result().is_none());
    assert!(form.outcome().is_none());
}

#[tokio::test]
async fn test_transport_error_clears_prior_result() {
    let service = ScriptedPredictionService::new();
    service.push(Ok(survived(0.8)));
    service.push(Err(PredictError::Transport(
        "error sending request: connection refused".to_string(),
    )));
    service.push(Err(PredictError::Transport(String::new())));

    let mut form = PredictionForm::new();
    form.submit(&service).await;
    assert!(form.result().is_some());

    form.submit(&service).await;
    assert!(form.result().is_none());
    assert_eq!(
        form.error_message(),
        Some("error sending request: connection refused")
    );

    form.submit(&service).await;
    assert_eq!(form.error_message(), Some(FALLBACK_MESSAGE));
}

#[tokio::test]
async fn test_new_submission_clears_previous_error_before_outcome() {
    let service = ScriptedPredictionService::new();
    service.push(Err(PredictError::RequestFailed { status: 500 }));

    let mut form = PredictionForm::new();
    form.submit(&service).await;
    assert!(form.error_message().is_some());

    let submission = form.begin_submission().unwrap();
    assert_eq!(form.phase(), FormPhase::Submitting);
    assert!(form.error_message().is_none());
    assert!(form.result().is_none());

    form.settle(&submission, Ok(survived(0.6)));
    assert_eq!(form.phase(), FormPhase::Succeeded);
    assert!(form.error_message().is_none());
}

#[tokio::test]
async fn test_form_stays_usable_after_failure() {
    let service = ScriptedPredictionService::new();
    service.push(Err(PredictError::Decode("expected value at line 1".to_string())));
    service.push(Ok(survived(0.95)));

    let mut form = PredictionForm::new();
    form.submit(&service).await;
    assert!(form.is_submit_enabled());

    form.edit(FieldEdit::Fare(""));
    form.submit(&service).await;

    assert_eq!(service.call_count(), 2);
    assert_eq!(service.received()[1].fare, 0.0);
    assert_eq!(form.phase(), FormPhase::Succeeded);
}

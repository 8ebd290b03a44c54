//! Tracing setup and submission lifecycle events.
//!
//! Stdout belongs to the rendered verdict (and to the JSON report of
//! `predict --json`), so every log line is written to stderr instead.
//!
//! Lifecycle events are emitted at `info!` (failures at `warn!`) with
//! `event` and `submission_id` fields. [`submission_span`] groups the
//! events of one request.

use tracing::{info, warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use crate::error::PredictError;
use crate::prediction::PredictionResult;

/// Install the stderr subscriber; `RUST_LOG` overrides `level`.
///
/// Only the first call in a process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let (json_lines, text_lines) = if json {
        let lines = fmt::layer().with_target(false).with_writer(std::io::stderr);
        (Some(lines.json()), None)
    } else {
        let lines = fmt::layer().with_target(false).with_writer(std::io::stderr);
        (None, Some(lines))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_lines)
        .with(text_lines)
        .try_init()
        .ok();
}

/// Span covering one in-flight request, tagged with the submission id.
///
/// Attach it to the request future with `tracing::Instrument` so events
/// from the HTTP client are associated with the submission.
pub fn submission_span(submission_id: Uuid) -> tracing::Span {
    tracing::info_span!("titanic.submission", submission_id = %submission_id)
}

pub fn emit_submission_started(submission_id: Uuid) {
    info!(event = "submission.started", submission_id = %submission_id);
}

pub fn emit_submission_ignored() {
    info!(
        event = "submission.ignored",
        reason = "a submission is already in flight"
    );
}

pub fn emit_submission_succeeded(submission_id: Uuid, result: &PredictionResult) {
    info!(
        event = "submission.succeeded",
        submission_id = %submission_id,
        label = result.label.as_wire(),
        confidence = ?result.confidence,
    );
}

pub fn emit_submission_failed(submission_id: Uuid, error: &PredictError) {
    warn!(
        event = "submission.failed",
        submission_id = %submission_id,
        kind = ?error.kind(),
        error = %error,
    );
}

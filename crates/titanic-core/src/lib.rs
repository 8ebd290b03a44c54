//! Titanic-Core: passenger form and prediction client
//!
//! This crate holds everything behind the `titanic-predict` front end:
//! the passenger record and its permissive input coercion, the form state
//! machine, the client for the remote survival classifier (plus a local
//! mock), and rendering of the returned verdict.
//!
//! ## Flow
//!
//! user edits → [`PredictionForm`] → JSON POST via a [`PredictionService`]
//! → [`PredictionResult`] → [`RenderedOutcome`]

pub mod client;
pub mod config;
pub mod error;
pub mod fakes;
pub mod form;
pub mod passenger;
pub mod prediction;
pub mod render;
pub mod telemetry;

pub use client::{
    mock_prediction, service_from_config, HttpPredictionClient, MockPredictionService,
    PredictionService,
};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_MOCK_DELAY};
pub use error::{ErrorKind, PredictError, FALLBACK_MESSAGE, REQUEST_FAILED_MESSAGE};
pub use form::{FormPhase, PredictionForm, Submission};
pub use passenger::{
    coerce_count, coerce_number, DomainWarning, FieldEdit, NumericField, PassengerClass,
    PassengerInput, Port, Sex,
};
pub use prediction::{PredictionResult, SurvivalLabel};
pub use render::{format_confidence, render_outcome, verdict_text, RenderedOutcome, Tone};
pub use telemetry::init_tracing;

/// Result type for titanic-core operations
pub type Result<T> = std::result::Result<T, PredictError>;

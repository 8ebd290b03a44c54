//! In-memory fake for the prediction service (testing only)
//!
//! `ScriptedPredictionService` answers from a queue of canned outcomes and
//! records every passenger record it was asked about.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::PredictionService;
use crate::error::PredictError;
use crate::passenger::PassengerInput;
use crate::prediction::PredictionResult;
use crate::Result;

#[derive(Debug, Default)]
pub struct ScriptedPredictionService {
    responses: Mutex<VecDeque<Result<PredictionResult>>>,
    received: Mutex<Vec<PassengerInput>>,
}

impl ScriptedPredictionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next unanswered call.
    pub fn push(&self, outcome: Result<PredictionResult>) -> &Self {
        self.responses.lock().unwrap().push_back(outcome);
        self
    }

    /// Every input received, in call order.
    pub fn received(&self) -> Vec<PassengerInput> {
        self.received.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[async_trait]
impl PredictionService for ScriptedPredictionService {
    async fn predict(&self, input: &PassengerInput) -> Result<PredictionResult> {
        let mut received = self.received.lock().unwrap();
        received.push(input.clone());
        tracing::debug!(call = received.len(), "scripted prediction");
        drop(received);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PredictError::Transport("no scripted response".to_string())))
    }
}

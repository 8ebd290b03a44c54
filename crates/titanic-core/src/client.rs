//! Prediction service clients
//!
//! [`PredictionService`] is the seam between the form and whatever answers
//! it. [`HttpPredictionClient`] POSTs the passenger record to the remote
//! classifier; [`MockPredictionService`] answers locally with placeholder
//! heuristics for offline testing of the front end.

use async_trait::async_trait;
use rand::Rng;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::PredictError;
use crate::passenger::{PassengerClass, PassengerInput, Sex};
use crate::prediction::{PredictionResult, SurvivalLabel};
use crate::Result;

/// Anything that can turn a passenger record into a prediction.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, input: &PassengerInput) -> Result<PredictionResult>;
}

/// Build the service selected by `config`.
pub fn service_from_config(config: &ClientConfig) -> Result<Box<dyn PredictionService>> {
    if config.mock {
        Ok(Box::new(MockPredictionService::new(config.mock_delay)))
    } else {
        Ok(Box::new(HttpPredictionClient::new(config)?))
    }
}

/// HTTP client for the remote classifier
pub struct HttpPredictionClient {
    endpoint: Url,
    http_client: reqwest::Client,
}

impl HttpPredictionClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            PredictError::InvalidConfig(format!("endpoint {:?}: {}", config.endpoint, e))
        })?;

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| PredictError::InvalidConfig(e.to_string()))?;

        Ok(HttpPredictionClient {
            endpoint,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, input: &PassengerInput) -> Result<PredictionResult> {
        debug!(endpoint = %self.endpoint, "Posting passenger record");

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Prediction service rejected request");
            return Err(PredictError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let result: PredictionResult = serde_json::from_slice(&body)?;
        Ok(result)
    }
}

/// Local stand-in for the classifier
///
/// Women survive with a confidence that falls with class; first-class boys
/// survive; first-class men get a coin flip; everyone else does not.
pub struct MockPredictionService {
    delay: Duration,
}

impl MockPredictionService {
    pub fn new(delay: Duration) -> Self {
        MockPredictionService { delay }
    }
}

#[async_trait]
impl PredictionService for MockPredictionService {
    async fn predict(&self, input: &PassengerInput) -> Result<PredictionResult> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let coin = rand::thread_rng().gen_bool(0.4);
        Ok(mock_prediction(input, coin))
    }
}

/// Placeholder heuristic. `coin` decides first-class adult men.
pub fn mock_prediction(input: &PassengerInput, coin: bool) -> PredictionResult {
    use PassengerClass::*;
    use SurvivalLabel::*;

    let (label, probability) = match (input.sex, input.class) {
        (Sex::Female, First) => (Survived, 0.95),
        (Sex::Female, Second) => (Survived, 0.85),
        (Sex::Female, Third) => (Survived, 0.75),
        (Sex::Male, First) if input.age < 16.0 => (Survived, 0.85),
        (Sex::Male, First) => (if coin { Survived } else { DidNotSurvive }, 0.65),
        (Sex::Male, Second) => (DidNotSurvive, 0.25),
        (Sex::Male, Third) => (DidNotSurvive, 0.15),
    };

    PredictionResult::new(label, Some(probability))
}

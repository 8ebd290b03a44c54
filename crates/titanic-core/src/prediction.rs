//! Classifier response model

use serde::{Deserialize, Serialize};

/// Predicted survival outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurvivalLabel {
    DidNotSurvive,
    Survived,
}

impl SurvivalLabel {
    /// Only a label of exactly 1 means survival.
    pub fn from_wire(value: f64) -> Self {
        if value == 1.0 {
            SurvivalLabel::Survived
        } else {
            SurvivalLabel::DidNotSurvive
        }
    }

    pub fn as_wire(self) -> u8 {
        match self {
            SurvivalLabel::DidNotSurvive => 0,
            SurvivalLabel::Survived => 1,
        }
    }

    pub fn survived(self) -> bool {
        self == SurvivalLabel::Survived
    }
}

/// Label and optional confidence returned by the service.
///
/// On the wire the fields are `prediction` and `probability`; extra
/// fields in the response are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WirePrediction", into = "WirePrediction")]
pub struct PredictionResult {
    pub label: SurvivalLabel,
    pub confidence: Option<f64>,
}

impl PredictionResult {
    pub fn new(label: SurvivalLabel, confidence: Option<f64>) -> Self {
        PredictionResult { label, confidence }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WirePrediction {
    prediction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    probability: Option<f64>,
}

impl TryFrom<WirePrediction> for PredictionResult {
    type Error = String;

    fn try_from(wire: WirePrediction) -> Result<Self, Self::Error> {
        if let Some(p) = wire.probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("probability must be within [0, 1] (got {})", p));
            }
        }
        Ok(PredictionResult {
            label: SurvivalLabel::from_wire(wire.prediction),
            confidence: wire.probability,
        })
    }
}

impl From<PredictionResult> for WirePrediction {
    fn from(result: PredictionResult) -> Self {
        WirePrediction {
            prediction: f64::from(result.label.as_wire()),
            probability: result.confidence,
        }
    }
}

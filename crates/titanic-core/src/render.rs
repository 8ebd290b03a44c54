//! Text rendering of a prediction outcome

use serde::Serialize;

use crate::prediction::{PredictionResult, SurvivalLabel};

/// Visual treatment of the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Affirmative,
    Negative,
}

/// Everything the result panel shows, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedOutcome {
    /// `"Prediction: "` or `"{name}'s Prediction: "`
    pub heading: String,
    /// `"Would Survive"` or `"Would Not Survive"`
    pub verdict: String,
    pub tone: Tone,
    /// `"Confidence: 85.3%"`, when the service sent one
    pub confidence: Option<String>,
    /// Cosmetic footer, only with a display name
    pub profile_note: Option<String>,
}

impl RenderedOutcome {
    /// Heading and verdict on one line.
    pub fn headline(&self) -> String {
        format!("{}{}", self.heading, self.verdict)
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.headline()];
        lines.extend(self.confidence.iter().cloned());
        lines.extend(self.profile_note.iter().cloned());
        lines
    }
}

pub fn verdict_text(label: SurvivalLabel) -> &'static str {
    match label {
        SurvivalLabel::Survived => "Would Survive",
        SurvivalLabel::DidNotSurvive => "Would Not Survive",
    }
}

/// Confidence as a percentage with one decimal place, e.g. 0.853 -> "85.3%".
///
/// Ties round away from zero (12.25 -> "12.3%"); `{:.1}` alone would round
/// them to even.
pub fn format_confidence(confidence: f64) -> String {
    let percent = (confidence * 100.0 * 10.0).round() / 10.0;
    format!("{:.1}%", percent)
}

/// Render a result, interpolating the display name when there is one.
pub fn render_outcome(result: &PredictionResult, display_name: Option<&str>) -> RenderedOutcome {
    let name = display_name.map(str::trim).filter(|n| !n.is_empty());

    let heading = match name {
        Some(name) => format!("{}'s Prediction: ", name),
        None => "Prediction: ".to_string(),
    };
    let tone = match result.label {
        SurvivalLabel::Survived => Tone::Affirmative,
        SurvivalLabel::DidNotSurvive => Tone::Negative,
    };

    RenderedOutcome {
        heading,
        verdict: verdict_text(result.label).to_string(),
        tone,
        confidence: result
            .confidence
            .map(|c| format!("Confidence: {}", format_confidence(c))),
        profile_note: name.map(|name| {
            format!(
                "Based on {}'s passenger profile and historical Titanic data",
                name
            )
        }),
    }
}

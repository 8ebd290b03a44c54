//! Terminal and JSON rendering of the form state

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;
use titanic_core::{PassengerInput, PredictionForm, PredictionResult, RenderedOutcome, Tone};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Whether ANSI styling should be used on stdout.
pub fn color_enabled() -> bool {
    use std::io::IsTerminal;
    std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

/// Print the result panel or the error panel, whichever the form holds.
pub fn print_form_state(out: &mut impl Write, form: &PredictionForm, color: bool) -> io::Result<()> {
    if let Some(message) = form.error_message() {
        print_error(out, message, color)?;
    }
    if let Some(outcome) = form.outcome() {
        print_outcome(out, &outcome, color)?;
    }
    Ok(())
}

pub fn print_outcome(out: &mut impl Write, outcome: &RenderedOutcome, color: bool) -> io::Result<()> {
    if color {
        let tint = match outcome.tone {
            Tone::Affirmative => GREEN,
            Tone::Negative => RED,
        };
        writeln!(out, "{BOLD}{}{tint}{}{RESET}", outcome.heading, outcome.verdict)?;
    } else {
        let marker = match outcome.tone {
            Tone::Affirmative => "[+]",
            Tone::Negative => "[-]",
        };
        writeln!(out, "{} {}", marker, outcome.headline())?;
    }

    if let Some(confidence) = &outcome.confidence {
        writeln!(out, "{}", confidence)?;
    }
    if let Some(note) = &outcome.profile_note {
        if color {
            writeln!(out, "{DIM}{}{RESET}", note)?;
        } else {
            writeln!(out, "{}", note)?;
        }
    }
    Ok(())
}

pub fn print_error(out: &mut impl Write, message: &str, color: bool) -> io::Result<()> {
    if color {
        writeln!(out, "{RED}error:{RESET} {}", message)
    } else {
        writeln!(out, "[!] {}", message)
    }
}

/// Machine-readable report of one submission.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub submitted_at: DateTime<Utc>,
    pub input: &'a PassengerInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'a str>,
    pub result: Option<&'a PredictionResult>,
    pub outcome: Option<RenderedOutcome>,
    pub error: Option<&'a str>,
}

impl<'a> JsonReport<'a> {
    pub fn from_form(form: &'a PredictionForm, submitted_at: DateTime<Utc>) -> Self {
        JsonReport {
            submitted_at,
            input: form.input(),
            display_name: form.display_name(),
            result: form.result(),
            outcome: form.outcome(),
            error: form.error_message(),
        }
    }
}

//! Prompt-driven form session
//!
//! Each field is asked for in turn; an empty answer keeps the current value.
//! Enumerated fields re-prompt until a listed code is given, free-text
//! fields are coerced like any other edit.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use titanic_core::{
    FieldEdit, NumericField, PassengerClass, Port, PredictionForm, PredictionService, Sex,
};

use crate::output;

pub struct Session<R, W> {
    input: R,
    out: W,
    color: bool,
}

enum Answer {
    Keep,
    Text(String),
    Eof,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, color: bool) -> Self {
        Session { input, out, color }
    }

    fn ask(&mut self, label: &str, current: &str) -> Result<Answer> {
        write!(self.out, "{} [{}]: ", label, current)?;
        self.out.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(Answer::Eof);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            Ok(Answer::Keep)
        } else {
            Ok(Answer::Text(line.to_string()))
        }
    }

    /// Ask for an enumerated field until the answer maps to a listed code.
    fn choose<T: Copy + std::fmt::Display + TryFrom<u8, Error = String>>(
        &mut self,
        label: &str,
        current: T,
        options: &[T],
    ) -> Result<Option<T>>
    where
        u8: From<T>,
    {
        let listing = options
            .iter()
            .map(|o| format!("{}={}", u8::from(*o), o))
            .collect::<Vec<_>>()
            .join(", ");
        let label = format!("{} ({})", label, listing);

        loop {
            match self.ask(&label, &u8::from(current).to_string())? {
                Answer::Eof => return Ok(None),
                Answer::Keep => return Ok(Some(current)),
                Answer::Text(text) => {
                    let choice = text
                        .trim()
                        .parse::<u8>()
                        .map_err(|e| e.to_string())
                        .and_then(T::try_from);
                    match choice {
                        Ok(choice) => return Ok(Some(choice)),
                        Err(e) => writeln!(self.out, "  {}", e)?,
                    }
                }
            }
        }
    }

    /// Walk through every field once. Returns `false` on end of input.
    fn fill(&mut self, form: &mut PredictionForm) -> Result<bool> {
        let current_name = form.display_name().unwrap_or("").to_string();
        match self.ask("Passenger Name", &current_name)? {
            Answer::Eof => return Ok(false),
            Answer::Keep => {}
            Answer::Text(name) => form.set_display_name(&name),
        }

        let snapshot = form.input().clone();

        match self.choose(
            "Passenger Class",
            snapshot.class,
            &[PassengerClass::First, PassengerClass::Second, PassengerClass::Third],
        )? {
            Some(class) => form.edit(FieldEdit::Class(class)),
            None => return Ok(false),
        }
        match self.choose("Sex", snapshot.sex, &[Sex::Female, Sex::Male])? {
            Some(sex) => form.edit(FieldEdit::Sex(sex)),
            None => return Ok(false),
        }

        for field in NumericField::ALL {
            match self.ask(field.label(), &field.current(&snapshot))? {
                Answer::Eof => return Ok(false),
                Answer::Keep => {}
                Answer::Text(text) => form.edit(field.edit(&text)),
            }
        }

        match self.choose(
            "Port of Embarkation",
            snapshot.embarked,
            &[Port::Cherbourg, Port::Queenstown, Port::Southampton],
        )? {
            Some(port) => form.edit(FieldEdit::Embarked(port)),
            None => return Ok(false),
        }
        Ok(true)
    }

    /// Fill, submit and render until the user stops or input ends.
    pub async fn run(
        &mut self,
        form: &mut PredictionForm,
        service: &dyn PredictionService,
    ) -> Result<()> {
        loop {
            if !self.fill(form)? {
                writeln!(self.out)?;
                return Ok(());
            }

            if let Some(submission) = form.begin_submission() {
                writeln!(self.out, "{}", form.submit_caption())?;
                self.out.flush()?;
                let outcome = submission.send(service).await;
                form.settle(&submission, outcome);
            }
            output::print_form_state(&mut self.out, form, self.color)?;

            match self.ask("Submit another prediction? (y/N)", "N")? {
                Answer::Text(text) if text.trim().eq_ignore_ascii_case("y") => continue,
                _ => return Ok(()),
            }
        }
    }
}

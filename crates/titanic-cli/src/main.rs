//! Titanic Survival Predictor CLI
//!
//! The `titanic-predict` command fills in the passenger form, sends it to the
//! prediction service and prints the verdict.
//!
//! ## Commands
//!
//! - `predict`: one-shot submission from flags
//! - `interactive`: prompt for each field, submit, optionally resubmit
//! - `show-input`: print the JSON body without sending it

mod interactive;
mod output;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use titanic_core::{
    service_from_config, ClientConfig, FieldEdit, PassengerClass, PredictionForm, Port, Sex,
};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "titanic-predict")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Predict Titanic passenger survival with a remote classifier", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Prediction endpoint (full URL)
    #[arg(long, global = true, env = "TITANIC_ENDPOINT")]
    endpoint: Option<String>,

    /// Answer locally with placeholder predictions instead of calling the endpoint
    #[arg(
        long,
        global = true,
        env = "TITANIC_MOCK",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    mock: bool,

    /// Artificial latency of the mock service
    #[arg(long, global = true, default_value = "1500")]
    mock_delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one passenger record and print the prediction
    Predict {
        #[command(flatten)]
        passenger: PassengerArgs,

        /// Print a JSON report instead of terminal text
        #[arg(long)]
        json: bool,
    },

    /// Fill in the form field by field on the terminal
    Interactive {
        #[command(flatten)]
        passenger: PassengerArgs,
    },

    /// Print the request body the form would send
    ShowInput {
        #[command(flatten)]
        passenger: PassengerArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct PassengerArgs {
    /// Passenger display name (cosmetic)
    #[arg(long)]
    name: Option<String>,

    /// Cabin class, 1 = highest
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    class: Option<u8>,

    /// Passenger sex
    #[arg(long, value_enum)]
    sex: Option<SexArg>,

    /// Age in years; non-numeric text counts as 0
    #[arg(long, allow_hyphen_values = true)]
    age: Option<String>,

    /// Ticket price; non-numeric text counts as 0
    #[arg(long, allow_hyphen_values = true)]
    fare: Option<String>,

    /// Siblings/spouses aboard
    #[arg(long, allow_hyphen_values = true)]
    sibsp: Option<String>,

    /// Parents/children aboard
    #[arg(long, allow_hyphen_values = true)]
    parch: Option<String>,

    /// Port of embarkation
    #[arg(long, value_enum)]
    embarked: Option<PortArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SexArg {
    #[value(alias = "0")]
    Female,
    #[value(alias = "1")]
    Male,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Sex {
        match arg {
            SexArg::Female => Sex::Female,
            SexArg::Male => Sex::Male,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PortArg {
    #[value(aliases = ["0", "C"])]
    Cherbourg,
    #[value(aliases = ["1", "Q"])]
    Queenstown,
    #[value(aliases = ["2", "S"])]
    Southampton,
}

impl From<PortArg> for Port {
    fn from(arg: PortArg) -> Port {
        match arg {
            PortArg::Cherbourg => Port::Cherbourg,
            PortArg::Queenstown => Port::Queenstown,
            PortArg::Southampton => Port::Southampton,
        }
    }
}

impl PassengerArgs {
    /// Build a form from the defaults plus whatever flags were given.
    fn into_form(self) -> Result<PredictionForm> {
        let mut form = PredictionForm::new();

        if let Some(name) = &self.name {
            form.set_display_name(name);
        }
        if let Some(class) = self.class {
            let class = PassengerClass::try_from(class).map_err(anyhow::Error::msg)?;
            form.edit(FieldEdit::Class(class));
        }
        if let Some(sex) = self.sex {
            form.edit(FieldEdit::Sex(sex.into()));
        }
        if let Some(age) = &self.age {
            form.edit(FieldEdit::Age(age));
        }
        if let Some(fare) = &self.fare {
            form.edit(FieldEdit::Fare(fare));
        }
        if let Some(sibsp) = &self.sibsp {
            form.edit(FieldEdit::SiblingsSpouses(sibsp));
        }
        if let Some(parch) = &self.parch {
            form.edit(FieldEdit::ParentsChildren(parch));
        }
        if let Some(port) = self.embarked {
            form.edit(FieldEdit::Embarked(port.into()));
        }

        Ok(form)
    }
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config =
            ClientConfig::from_env().with_mock_delay(Duration::from_millis(self.mock_delay_ms));
        if self.mock {
            config = config.with_mock(true);
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    titanic_core::init_tracing(cli.log_json, level);

    let config = cli.client_config();

    match cli.command {
        Commands::Predict { passenger, json } => cmd_predict(&config, passenger, json).await,
        Commands::Interactive { passenger } => cmd_interactive(&config, passenger).await,
        Commands::ShowInput { passenger } => cmd_show_input(passenger),
    }
}

/// Submit once and print the outcome
async fn cmd_predict(config: &ClientConfig, passenger: PassengerArgs, json: bool) -> Result<()> {
    let service = service_from_config(config).context("Failed to set up prediction service")?;
    let mut form = passenger.into_form()?;

    info!(endpoint = %config.endpoint, mock = config.mock, "Submitting passenger record");
    let submitted_at = chrono::Utc::now();
    form.submit(service.as_ref()).await;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let report = output::JsonReport::from_form(&form, submitted_at);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        output::print_form_state(&mut out, &form, output::color_enabled())?;
    }

    if let Some(message) = form.error_message() {
        anyhow::bail!("{}", message);
    }
    Ok(())
}

/// Prompt for every field, submit, repeat on request
async fn cmd_interactive(config: &ClientConfig, passenger: PassengerArgs) -> Result<()> {
    let service = service_from_config(config).context("Failed to set up prediction service")?;
    let mut form = passenger.into_form()?;

    println!("Titanic Survival Predictor");
    println!("==========================");
    println!("Press Enter to keep the value in brackets.");
    println!();

    let stdin = io::stdin();
    let mut session = interactive::Session::new(stdin.lock(), io::stdout(), output::color_enabled());
    session.run(&mut form, service.as_ref()).await
}

/// Print the JSON body without sending it
fn cmd_show_input(passenger: PassengerArgs) -> Result<()> {
    let form = passenger.into_form()?;
    for warning in form.input().domain_warnings() {
        eprintln!("warning: {}", warning);
    }
    println!("{}", serde_json::to_string_pretty(form.input())?);
    Ok(())
}

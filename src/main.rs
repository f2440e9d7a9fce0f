use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use lifeledger::commands;
use lifeledger::models::Settings;
use lifeledger::utils::config;

/// Personal productivity and spending ledger with monthly forecasts
#[derive(Parser, Debug)]
#[command(name = "lifeledger", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Load tasks and expenses from the data directory
    Etl,

    /// Predict next month's spending
    Forecast {
        /// Model name; the first model with enough data is used when omitted
        model: Option<String>,
    },

    /// Run every forecast model that has enough data
    ForecastAll,

    /// Productivity and finance totals
    Summary {
        /// today, 7d, 30d or all
        #[arg(default_value = "all")]
        period: String,
    },

    /// Store one task
    AddTask {
        title: String,
        category: String,
        minutes: String,
        /// Completion time, any supported timestamp layout
        when: Option<String>,
    },

    /// Store one expense
    AddExpense {
        date: String,
        category: String,
        amount: String,
        description: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match config::load_settings(Path::new(config::SETTINGS_PATH)) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&settings, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, command: Command) -> Result<(), String> {
    match command {
        Command::Etl => print_json(commands::etl::run_etl(settings)),
        Command::Forecast { model } => {
            print_json(commands::forecast::predict(settings, model.as_deref()))
        }
        Command::ForecastAll => print_json(commands::forecast::predict_all(settings)),
        Command::Summary { period } => print_json(commands::summary::get_summary(settings, &period)),
        Command::AddTask {
            title,
            category,
            minutes,
            when,
        } => {
            let external_id =
                commands::entry::create_task(settings, title, category, &minutes, when.as_deref())?;
            print_json(Ok(serde_json::json!({ "external_id": external_id })))
        }
        Command::AddExpense {
            date,
            category,
            amount,
            description,
        } => print_json(commands::entry::create_expense(
            settings,
            &date,
            category,
            &amount,
            description,
        )),
    }
}

fn print_json<T: Serialize>(result: Result<T, String>) -> Result<(), String> {
    let value = result?;
    let text = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}

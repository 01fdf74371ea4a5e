// ABOUTME: feed-ration CLI - compute daily livestock rations and inspect reference data
// ABOUTME: Subcommands for ration computation, feed and category listings, and data validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Ration for a 500 kg lactating cow giving 20 l of milk
//! feed-ration compute --category lactating_cow --weight 500 --milk 20 \
//!     --feed "Alfalfa hay" --feed "Corn grain" --feed "Soybean meal"
//!
//! # Fix the hay at 8 kg and print JSON
//! feed-ration compute --category dry_cow --weight 600 --feed "Alfalfa hay" \
//!     --feed "Barley grain" --amount "Alfalfa hay=8" --format json
//!
//! # List protein feeds
//! feed-ration feeds --class protein
//!
//! # Check a custom reference dataset
//! feed-ration --reference my-feeds.json validate
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use feed_ration::formatters::{format_output_pretty, OutputFormat};
use feed_ration::logging::LoggingConfig;
use feed_ration::{AppError, ErrorResponse, ReferenceData};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "feed-ration",
    about = "Daily feed ration calculator for livestock",
    long_about = "Computes requirement, feed mass, class split and per-feed amounts for a daily ration, with warnings and corrective tips."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON reference dataset to use instead of the built-in tables
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute a daily ration
    Compute {
        /// Animal category key (lactating_cow, dry_cow, mature_bull, calf_1_6)
        #[arg(long, short = 'c')]
        category: String,

        /// Live weight in kg
        #[arg(long, short = 'w')]
        weight: f64,

        /// Milk yield in liters per day
        #[arg(long, short = 'm', default_value = "0")]
        milk: f64,

        /// Selected feed, repeat for each feed
        #[arg(long = "feed", short = 'f')]
        feeds: Vec<String>,

        /// Fixed amount as NAME=KG, repeat for each feed
        #[arg(long = "amount", short = 'a')]
        amounts: Vec<String>,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["json", "text"])]
        format: String,
    },

    /// List reference feeds
    Feeds {
        /// Only feeds of this class (roughage, energy, protein)
        #[arg(long)]
        class: Option<String>,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["json", "text"])]
        format: String,
    },

    /// List animal categories and their policies
    Categories {
        /// Output format
        #[arg(long, default_value = "text", value_parser = ["json", "text"])]
        format: String,
    },

    /// Validate the reference dataset
    Validate {
        /// Output format
        #[arg(long, default_value = "text", value_parser = ["json", "text"])]
        format: String,
    },
}

impl Command {
    fn output_format(&self) -> OutputFormat {
        match self {
            Self::Compute { format, .. }
            | Self::Feeds { format, .. }
            | Self::Categories { format }
            | Self::Validate { format } => OutputFormat::from_str_param(format),
        }
    }
}

/// Report a boundary error: JSON on stdout for `--format json`, text on stderr otherwise
fn report_error(error: AppError, format: OutputFormat) -> ExitCode {
    let code = error.code.exit_code();
    let response = ErrorResponse::from(error);
    match (format, format_output_pretty(&response, format)) {
        (OutputFormat::Json, Ok(output)) => println!("{}", output.data),
        (_, Ok(output)) => eprint!("{}", output.data),
        (_, Err(e)) => eprintln!("Error: {}: {e}", response.message),
    }
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn load_reference(path: Option<&PathBuf>) -> Result<Cow<'static, ReferenceData>> {
    match path {
        None => Ok(Cow::Borrowed(ReferenceData::builtin())),
        Some(path) => {
            info!("Loading reference data from {}", path.display());
            let json = fs::read_to_string(path)?;
            Ok(Cow::Owned(ReferenceData::from_json(&json)?))
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let reference = match &cli.command {
        // validation reports violations itself instead of failing on load
        Command::Validate { .. } => match &cli.reference {
            Some(path) => {
                let json = fs::read_to_string(path)?;
                Cow::Owned(
                    serde_json::from_str::<ReferenceData>(&json).map_err(AppError::from)?,
                )
            }
            None => Cow::Borrowed(ReferenceData::builtin()),
        },
        _ => load_reference(cli.reference.as_ref())?,
    };

    match cli.command {
        Command::Compute {
            category,
            weight,
            milk,
            feeds,
            amounts,
            format,
        } => {
            let args = commands::compute::ComputeArgs {
                category,
                weight,
                milk,
                feeds,
                amounts,
            };
            commands::compute::run(&args, &reference, OutputFormat::from_str_param(&format))?;
        }
        Command::Feeds { class, format } => {
            commands::reference::list_feeds(
                &reference,
                class.as_deref(),
                OutputFormat::from_str_param(&format),
            )?;
        }
        Command::Categories { format } => {
            commands::reference::list_categories(&reference, OutputFormat::from_str_param(&format))?;
        }
        Command::Validate { format } => {
            return commands::reference::validate(&reference, OutputFormat::from_str_param(&format));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::from_env().with_level("debug")
    } else {
        LoggingConfig::from_env()
    };
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let format = cli.command.output_format();
    match run(cli) {
        Ok(code) => code,
        Err(e) => match e.downcast::<AppError>() {
            Ok(app) => report_error(app, format),
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

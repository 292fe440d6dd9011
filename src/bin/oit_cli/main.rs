// ABOUTME: OIT CLI - command-line front end for the OIT dosing calculator
// ABOUTME: Generates protocols, lists dilution recipes for a dose, and validates protocol files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors
//!
//! Usage:
//! ```bash
//! # Default protocol for a food given inline
//! oit-cli generate --name "Peanut flour" --protein 50 --serving 100 --type solid
//!
//! # Food from a database file, slow ladder, switching to a second food
//! oit-cli generate --foods foods.json --name "Peanut flour" --strategy slow \
//!     --food-b "Whole peanut" --food-b-threshold 0.5 --output protocol.json
//!
//! # Ranked dilution recipes for a single 10 mg dose
//! oit-cli candidates --target 10 --name "Peanut flour" --protein 50 --serving 100 --type solid
//!
//! # Validate a saved protocol (exit code 1 when red warnings are present)
//! oit-cli validate protocol.json
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use oit_calculator::logging::LoggingConfig;
use oit_calculator::models::{DosingStrategy, FoodAStrategy};
use oit_calculator::Decimal;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "oit-cli",
    version,
    about = "Oral immunotherapy dosing calculator",
    long_about = "Builds OIT dosing protocols, searches dilution recipes, and validates protocols for safety and practicality."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Generate a protocol for a food
    Generate {
        #[command(flatten)]
        food: FoodArgs,

        #[command(flatten)]
        food_b: FoodBArgs,

        /// Target ladder: standard, slow, or rapid
        #[arg(long, default_value = "standard", value_parser = parse_dosing_strategy)]
        strategy: DosingStrategy,

        /// When to dilute food A: dilute-initial, dilute-all, or dilute-none
        #[arg(long, default_value = "dilute-initial", value_parser = parse_food_a_strategy)]
        food_a_strategy: FoodAStrategy,

        /// Neat amount below which food A is diluted (g or ml)
        #[arg(long)]
        di_threshold: Option<Decimal>,

        /// Write the protocol as JSON to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List ranked dilution recipes for one target dose
    Candidates {
        /// Target protein dose in mg
        #[arg(long)]
        target: Decimal,

        #[command(flatten)]
        food: FoodArgs,

        /// Maximum number of recipes to show
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate a protocol JSON file
    Validate {
        /// Protocol file produced by `generate --output`
        path: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Food A, either inline or looked up in a food database
#[derive(Args)]
struct FoodArgs {
    /// Food name; looked up in --foods when given
    #[arg(long)]
    name: String,

    /// Grams of protein per serving
    #[arg(long)]
    protein: Option<Decimal>,

    /// Serving size in g (solid, capsule) or ml (liquid)
    #[arg(long)]
    serving: Option<Decimal>,

    /// Food type: solid, liquid, or capsule
    #[arg(long = "type")]
    food_type: Option<String>,

    /// Food database JSON file
    #[arg(long)]
    foods: Option<PathBuf>,
}

/// Optional food B, looked up in the same database or given inline
#[derive(Args)]
struct FoodBArgs {
    /// Food B name
    #[arg(long = "food-b")]
    name: Option<String>,

    /// Food B grams of protein per serving
    #[arg(long = "food-b-protein")]
    protein: Option<Decimal>,

    /// Food B serving size
    #[arg(long = "food-b-serving")]
    serving: Option<Decimal>,

    /// Food B type
    #[arg(long = "food-b-type")]
    food_type: Option<String>,

    /// Neat food B amount at which food B takes over (g or ml)
    #[arg(long = "food-b-threshold")]
    threshold: Option<Decimal>,
}

fn parse_dosing_strategy(value: &str) -> Result<DosingStrategy, String> {
    DosingStrategy::parse(value).ok_or_else(|| format!("unknown dosing strategy '{value}'"))
}

fn parse_food_a_strategy(value: &str) -> Result<FoodAStrategy, String> {
    FoodAStrategy::parse(value).ok_or_else(|| format!("unknown food A strategy '{value}'"))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;
    debug!("OIT CLI starting");

    match cli.command {
        Command::Generate {
            food,
            food_b,
            strategy,
            food_a_strategy,
            di_threshold,
            output,
            json,
        } => commands::generate::run(&commands::generate::GenerateOptions {
            food: &food,
            food_b: &food_b,
            strategy,
            food_a_strategy,
            di_threshold,
            output: output.as_deref(),
            json,
        }),
        Command::Candidates {
            target,
            food,
            limit,
            json,
        } => commands::candidates::run(target, &food, limit, json),
        Command::Validate { path, json } => commands::validate::run(&path, json),
    }
}

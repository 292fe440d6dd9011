// ABOUTME: Generate command - builds a dosing protocol for food A and optional food B
// ABOUTME: Validates the result, prints it, and optionally writes it as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use oit_calculator::config::ProtocolConfig;
use oit_calculator::editor::{apply_food_b, set_dosing_strategy, set_food_a_strategy};
use oit_calculator::import::protocol_to_json;
use oit_calculator::logging::ProtocolLogger;
use oit_calculator::models::{DosingStrategy, FoodAStrategy};
use oit_calculator::summary::ProtocolSummary;
use oit_calculator::{generate_default_protocol, validate_protocol, Decimal};
use tracing::info;

use crate::helpers::display::{display_protocol, display_summary, display_warnings};
use crate::helpers::food::{load_database, resolve_food, FoodSpec};
use crate::{FoodArgs, FoodBArgs};

/// Everything the generate command was asked for
pub struct GenerateOptions<'a> {
    pub food: &'a FoodArgs,
    pub food_b: &'a FoodBArgs,
    pub strategy: DosingStrategy,
    pub food_a_strategy: FoodAStrategy,
    pub di_threshold: Option<Decimal>,
    pub output: Option<&'a Path>,
    pub json: bool,
}

pub fn run(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    let database = load_database(options.food.foods.as_deref())?;
    let food_a = resolve_food(&FoodSpec::from(options.food), &database)?;

    let mut protocol = generate_default_protocol(&food_a, ProtocolConfig::global());
    if options.strategy != protocol.dosing_strategy {
        protocol = set_dosing_strategy(&protocol, options.strategy);
    }
    if options.food_a_strategy != protocol.food_a_strategy || options.di_threshold.is_some() {
        protocol = set_food_a_strategy(&protocol, options.food_a_strategy, options.di_threshold);
    }
    if let Some(spec) = FoodSpec::food_b(options.food_b) {
        let food_b = resolve_food(&spec, &database)?;
        protocol = apply_food_b(&protocol, food_b, options.food_b.threshold);
    }

    let warnings = validate_protocol(&protocol);
    ProtocolLogger::log_protocol("generate", &protocol);
    ProtocolLogger::log_validation(&protocol, &warnings);

    if let Some(path) = options.output {
        let contents = protocol_to_json(&protocol)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write protocol to {}", path.display()))?;
        info!(path = %path.display(), "Protocol written");
    }

    if options.json {
        println!("{}", protocol_to_json(&protocol)?);
    } else {
        display_protocol(&protocol);
        display_warnings(&warnings);
        display_summary(&ProtocolSummary::new(&protocol, &warnings));
    }

    Ok(ExitCode::SUCCESS)
}

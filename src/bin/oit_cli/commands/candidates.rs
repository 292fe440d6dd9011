// ABOUTME: Candidates command - ranked dilution recipes for a single target dose
// ABOUTME: Useful for checking why a dose was or was not diluted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use std::process::ExitCode;

use anyhow::{bail, Result};
use oit_calculator::config::ProtocolConfig;
use oit_calculator::{find_dilution_candidates, Decimal};
use serde_json::json;

use crate::helpers::display::display_candidates;
use crate::helpers::food::{load_database, resolve_food, FoodSpec};
use crate::FoodArgs;

pub fn run(target: Decimal, food: &FoodArgs, limit: usize, json: bool) -> Result<ExitCode> {
    if target <= Decimal::ZERO {
        bail!("target must be greater than 0 mg, got {target}");
    }

    let database = load_database(food.foods.as_deref())?;
    let food = resolve_food(&FoodSpec::from(food), &database)?;
    let candidates = find_dilution_candidates(target, &food, ProtocolConfig::global());

    if json {
        let shown: Vec<_> = candidates.iter().take(limit).collect();
        let output = json!({
            "food": food.name,
            "target_mg": target,
            "total": candidates.len(),
            "candidates": shown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        display_candidates(target, &food, &candidates, limit);
    }

    Ok(ExitCode::SUCCESS)
}

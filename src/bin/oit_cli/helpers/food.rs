// ABOUTME: Resolves command-line food arguments into validated foods
// ABOUTME: Inline protein/serving/type values take precedence over database lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use std::path::Path;

use anyhow::{bail, Result};
use oit_calculator::import::{find_food, load_food_database, FoodRecord};
use oit_calculator::models::Food;
use oit_calculator::Decimal;

use crate::{FoodArgs, FoodBArgs};

/// Food description gathered from flags
pub struct FoodSpec<'a> {
    pub name: &'a str,
    pub protein: Option<Decimal>,
    pub serving: Option<Decimal>,
    pub food_type: Option<&'a str>,
}

impl<'a> From<&'a FoodArgs> for FoodSpec<'a> {
    fn from(args: &'a FoodArgs) -> Self {
        Self {
            name: &args.name,
            protein: args.protein,
            serving: args.serving,
            food_type: args.food_type.as_deref(),
        }
    }
}

impl<'a> FoodSpec<'a> {
    /// Food B spec, when a food B name was given
    pub fn food_b(args: &'a FoodBArgs) -> Option<Self> {
        args.name.as_deref().map(|name| Self {
            name,
            protein: args.protein,
            serving: args.serving,
            food_type: args.food_type.as_deref(),
        })
    }
}

/// Load the food database when a path was given
pub fn load_database(path: Option<&Path>) -> Result<Vec<Food>> {
    match path {
        Some(path) => Ok(load_food_database(path, true)?),
        None => Ok(Vec::new()),
    }
}

/// Build a food from inline values, or find it in the database
pub fn resolve_food(spec: &FoodSpec<'_>, database: &[Food]) -> Result<Food> {
    if let (Some(protein), Some(serving), Some(food_type)) =
        (spec.protein, spec.serving, spec.food_type)
    {
        let record = FoodRecord {
            name: spec.name.to_owned(),
            protein_grams_per_serving: protein,
            serving_size: serving,
            food_type: food_type.to_owned(),
        };
        return Ok(record.into_food()?);
    }

    if let Some(food) = find_food(database, spec.name) {
        return Ok(food.clone());
    }
    if database.is_empty() {
        bail!(
            "{}: give --protein, --serving and --type, or a --foods database",
            spec.name
        );
    }
    bail!("{} not found in the food database", spec.name)
}

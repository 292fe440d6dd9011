// ABOUTME: Food database records and protocol JSON import/export
// ABOUTME: Validates untrusted records at the boundary before they reach the calculator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! # Import and Export
//!
//! The calculator trusts its inputs to be well-formed; this module is where
//! that is enforced. Food records are checked against the database schema,
//! protocols against their structural invariants. Clinical problems are not
//! errors here; they surface later as validation warnings.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{Food, FoodSlot, FoodType, Protocol};

/// One entry in a food database file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Display name
    pub name: String,
    /// Grams of protein in one serving
    pub protein_grams_per_serving: Decimal,
    /// Serving size in grams (solids, capsules) or millilitres (liquids)
    pub serving_size: Decimal,
    /// `SOLID`, `LIQUID`, or `CAPSULE`, case-insensitive
    #[serde(rename = "type")]
    pub food_type: String,
}

impl FoodRecord {
    /// Check the record against the food schema and return its parsed type
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name, an unknown type, a non-positive
    /// protein or serving size, or more protein than the serving weighs.
    pub fn validate(&self) -> AppResult<FoodType> {
        if self.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        let food_type = FoodType::parse(&self.food_type).ok_or_else(|| {
            AppError::invalid_format(format!(
                "{}: unknown food type '{}' (expected SOLID, LIQUID, or CAPSULE)",
                self.name, self.food_type
            ))
        })?;
        if self.serving_size <= Decimal::ZERO {
            return Err(AppError::out_of_range(format!(
                "{}: serving size must be > 0",
                self.name
            )));
        }
        if self.protein_grams_per_serving <= Decimal::ZERO {
            return Err(AppError::out_of_range(format!(
                "{}: protein per serving must be > 0",
                self.name
            )));
        }
        if self.protein_grams_per_serving > self.serving_size {
            return Err(AppError::out_of_range(format!(
                "{}: {} g of protein exceeds the {} serving size",
                self.name, self.protein_grams_per_serving, self.serving_size
            )));
        }
        Ok(food_type)
    }

    /// Validate and convert into a [`Food`]
    ///
    /// # Errors
    ///
    /// Returns the first schema violation found by [`Self::validate`].
    pub fn into_food(self) -> AppResult<Food> {
        let food_type = self.validate()?;
        Ok(Food::new(
            self.name.trim(),
            food_type,
            self.protein_grams_per_serving,
            self.serving_size,
        ))
    }
}

impl From<&Food> for FoodRecord {
    fn from(food: &Food) -> Self {
        Self {
            name: food.name.clone(),
            protein_grams_per_serving: food.grams_in_serving,
            serving_size: food.serving_size,
            food_type: food.food_type.as_str().to_owned(),
        }
    }
}

/// Parse a JSON array of food records
///
/// Invalid records are skipped with a warning when `skip_invalid` is set;
/// otherwise the first invalid record fails the whole import.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or, without `skip_invalid`, any
/// record fails validation.
pub fn parse_food_database(json: &str, skip_invalid: bool) -> AppResult<Vec<Food>> {
    let records: Vec<FoodRecord> = serde_json::from_str(json)?;
    let total = records.len();
    let mut foods = Vec::with_capacity(total);

    for (position, record) in records.into_iter().enumerate() {
        match record.into_food() {
            Ok(food) => foods.push(food),
            Err(error) if skip_invalid => {
                warn!(record = position, error = %error.message, "Skipping invalid food record");
            }
            Err(error) => {
                return Err(AppError::new(
                    error.code,
                    format!("record {position}: {}", error.message),
                ));
            }
        }
    }

    debug!(loaded = foods.len(), total, "Parsed food database");
    Ok(foods)
}

/// Read and parse a food database file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are invalid.
pub fn load_food_database(path: &Path, skip_invalid: bool) -> AppResult<Vec<Food>> {
    let contents = read_file(path)?;
    parse_food_database(&contents, skip_invalid)
}

/// Find a food by name, ignoring case and surrounding whitespace
#[must_use]
pub fn find_food<'a>(foods: &'a [Food], name: &str) -> Option<&'a Food> {
    let wanted = name.trim().to_lowercase();
    foods.iter().find(|food| food.name.to_lowercase() == wanted)
}

/// Parse a protocol exported as JSON and check its structure
///
/// # Errors
///
/// Returns an error if the JSON is malformed, the embedded configuration is
/// invalid, or the steps are not numbered 1..=n with food A before food B.
pub fn protocol_from_json(json: &str) -> AppResult<Protocol> {
    let protocol: Protocol = serde_json::from_str(json)?;
    protocol.config.validate()?;
    check_step_structure(&protocol)?;
    Ok(protocol)
}

/// Read and parse a protocol file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid protocol.
pub fn load_protocol(path: &Path) -> AppResult<Protocol> {
    let contents = read_file(path)?;
    protocol_from_json(&contents)
}

/// Serialize a protocol as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn protocol_to_json(protocol: &Protocol) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(protocol)?)
}

fn read_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path)
        .map_err(|error| AppError::not_found(format!("{} ({error})", path.display())))
}

fn check_step_structure(protocol: &Protocol) -> AppResult<()> {
    for (position, step) in protocol.steps.iter().enumerate() {
        if step.step_index != position + 1 {
            return Err(AppError::invalid_input(format!(
                "step at position {} has index {}; steps must be numbered 1..={}",
                position + 1,
                step.step_index,
                protocol.steps.len()
            )));
        }
    }

    let food_b_started = protocol.transition_position().unwrap_or(protocol.steps.len());
    if let Some(late_a) = protocol.steps[food_b_started..]
        .iter()
        .find(|step| step.food == FoodSlot::A)
    {
        return Err(AppError::invalid_input(format!(
            "step {} uses food A after food B has started",
            late_a.step_index
        )));
    }
    Ok(())
}

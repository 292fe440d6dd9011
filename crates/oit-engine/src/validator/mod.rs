// ABOUTME: Protocol validator producing red and yellow warnings
// ABOUTME: Applies protocol-wide, per-step, and adjacent-step rules without ever failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! # Protocol Validation
//!
//! Validation is total: any protocol, however broken, yields a list of
//! findings. Red findings mean the protocol must not be used as-is; yellow
//! findings ask for review. Whether to block export is the caller's call.
//!
//! Rules run in three scopes:
//!
//! - **protocol**: step count, food concentrations, unused food B
//! - **step**: target, protein delivered, volumes, resolution, limits
//! - **pair**: ordering, duplicates, escalation rate

mod sequence_rules;
mod step_rules;

use oit_core::models::{Food, FoodSlot, Protocol, Warning, WarningCode};
use oit_core::numeric::format_amount;
use rust_decimal::Decimal;
use tracing::debug;

/// Validate a protocol and return every finding
#[must_use]
pub fn validate_protocol(protocol: &Protocol) -> Vec<Warning> {
    let mut warnings = Vec::new();

    check_step_count(protocol, &mut warnings);
    check_food_concentration(&protocol.food_a, FoodSlot::A, &mut warnings);
    if let Some(food_b) = &protocol.food_b {
        check_food_concentration(food_b, FoodSlot::B, &mut warnings);
    }
    check_transition_point(protocol, &mut warnings);

    for step in &protocol.steps {
        step_rules::check_step(protocol, step, &mut warnings);
    }
    for pair in protocol.steps.windows(2) {
        if let [previous, current] = pair {
            sequence_rules::check_pair(previous, current, &mut warnings);
        }
    }

    debug!(
        steps = protocol.steps.len(),
        red = warnings.iter().filter(|warning| warning.is_red()).count(),
        total = warnings.len(),
        "Validated protocol"
    );

    warnings
}

/// Whether any red finding is present
#[must_use]
pub fn has_blocking_warnings(warnings: &[Warning]) -> bool {
    warnings.iter().any(Warning::is_red)
}

fn check_step_count(protocol: &Protocol, warnings: &mut Vec<Warning>) {
    let min_steps = protocol.config.min_steps;
    if protocol.steps.len() < min_steps {
        warnings.push(Warning::global(
            WarningCode::TooFewSteps,
            format!(
                "Protocol has {} steps; at least {min_steps} are required",
                protocol.steps.len()
            ),
        ));
    }
}

fn check_food_concentration(food: &Food, slot: FoodSlot, warnings: &mut Vec<Warning>) {
    if food.mg_per_unit() <= Decimal::ZERO {
        warnings.push(Warning::global(
            WarningCode::InvalidConcentration,
            format!(
                "Food {slot:?} ({}): protein concentration must be > 0",
                food.name
            ),
        ));
    }
    if food.grams_in_serving > food.serving_size {
        warnings.push(Warning::global(
            WarningCode::InvalidConcentration,
            format!(
                "Food {slot:?} ({}): {} g of protein cannot fit in a {} serving",
                food.name,
                food.grams_in_serving.normalize(),
                format_amount(food.serving_size, food.unit())
            ),
        ));
    }
}

fn check_transition_point(protocol: &Protocol, warnings: &mut Vec<Warning>) {
    let Some(food_b) = &protocol.food_b else {
        return;
    };
    if protocol.transition_position().is_none() {
        warnings.push(Warning::global(
            WarningCode::NoTransitionPoint,
            format!("Food B ({}) is defined but no step uses it", food_b.name),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oit_core::config::ProtocolConfig;
    use oit_core::models::{DosingStrategy, FoodAStrategy, FoodType, Step};
    use rust_decimal_macros::dec;

    fn protocol_with(food: Food, steps: Vec<Step>) -> Protocol {
        let config = ProtocolConfig::default();
        Protocol {
            dosing_strategy: DosingStrategy::Standard,
            food_a: food,
            food_a_strategy: FoodAStrategy::DiluteNone,
            di_threshold: config.default_food_a_dilution_threshold,
            food_b: None,
            food_b_threshold: None,
            steps,
            config,
        }
    }

    #[test]
    fn test_serving_smaller_than_protein_is_invalid() {
        let food = Food::new("Typo", FoodType::Solid, dec!(120), dec!(100));
        let protocol = protocol_with(food, Vec::new());
        let warnings = validate_protocol(&protocol);
        assert!(warnings
            .iter()
            .any(|w| w.code == WarningCode::InvalidConcentration && w.step_index.is_none()));
        assert!(warnings.iter().any(|w| w.code == WarningCode::TooFewSteps));
        assert!(has_blocking_warnings(&warnings));
    }
}

// ABOUTME: User edits applied to protocols as pure functions returning new protocols
// ABOUTME: Target, recipe, and daily amount edits, step insertion and removal, strategy and food B changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! # Protocol Editing
//!
//! Every edit takes `&Protocol` and returns a new `Protocol`; the input is
//! never touched, so callers can push both into [`crate::history::ProtocolHistory`].
//! Edits only fail when they reference a step or food that does not exist or
//! ask for a recipe no water amount can satisfy. Unsafe but well-formed
//! values are accepted and left to the validator.

use oit_core::errors::{AppError, AppResult};
use oit_core::models::{
    DosingMethod, DosingStrategy, Food, FoodAStrategy, FoodSlot, MeasureUnit, Protocol, Step,
};
use oit_core::numeric::format_mg;
use rust_decimal::Decimal;
use tracing::debug;

use crate::rounding::derive_dilution;
use crate::step_generator::{generate_protocol_step, regenerate_steps};

fn find_step(protocol: &Protocol, step_index: usize) -> AppResult<&Step> {
    protocol
        .step(step_index)
        .ok_or_else(|| AppError::not_found(format!("Step {step_index}")))
}

fn food_for<'a>(protocol: &'a Protocol, slot: FoodSlot) -> AppResult<&'a Food> {
    protocol
        .food(slot)
        .ok_or_else(|| AppError::not_found(format!("Food {slot:?}")))
}

fn replace_step(protocol: &Protocol, replacement: Step) -> Protocol {
    let steps = protocol
        .steps
        .iter()
        .map(|step| {
            if step.step_index == replacement.step_index {
                replacement.clone()
            } else {
                step.clone()
            }
        })
        .collect();
    protocol.with_steps(steps)
}

/// Target ladder behind a protocol, with the repeated dose at the food switch collapsed
#[must_use]
pub fn base_targets(protocol: &Protocol) -> Vec<Decimal> {
    let mut targets: Vec<Decimal> = Vec::with_capacity(protocol.steps.len());
    let mut previous: Option<&Step> = None;
    for step in &protocol.steps {
        let repeats_switch = previous.is_some_and(|prev| {
            prev.food == FoodSlot::A && step.food == FoodSlot::B && prev.target_mg == step.target_mg
        });
        if !repeats_switch {
            targets.push(step.target_mg);
        }
        previous = Some(step);
    }
    targets
}

/// Change one step's target and rebuild that step on the same food
///
/// # Errors
///
/// Returns an error if the step does not exist.
pub fn update_step_target(
    protocol: &Protocol,
    step_index: usize,
    target_mg: Decimal,
) -> AppResult<Protocol> {
    let step = find_step(protocol, step_index)?;
    let rebuilt = generate_protocol_step(protocol, step.food, target_mg, step_index)
        .ok_or_else(|| AppError::not_found(format!("Food {:?}", step.food)))?;
    debug!(
        step_index,
        target_mg = %target_mg,
        method = rebuilt.method.as_str(),
        "Updated step target"
    );
    Ok(replace_step(protocol, rebuilt))
}

/// Set a step's mixture food amount and daily amount, deriving the water
///
/// The step becomes a diluted step on its current food. Water snaps to 0.5 ml
/// when that stays within tolerance, otherwise the exact volume is used.
///
/// # Errors
///
/// Returns an error if the step does not exist or no positive water amount
/// delivers the target with the given amounts.
pub fn update_dilution_recipe(
    protocol: &Protocol,
    step_index: usize,
    mix_food_amount: Decimal,
    daily_amount: Decimal,
) -> AppResult<Protocol> {
    let step = find_step(protocol, step_index)?;
    let food = food_for(protocol, step.food)?;
    let dilution = derive_dilution(
        step.target_mg,
        food,
        mix_food_amount,
        daily_amount,
        &protocol.config,
    )
    .ok_or_else(|| {
        AppError::invalid_input(format!(
            "No water amount delivers {} from {mix_food_amount} {} of {} at {daily_amount} ml/day",
            format_mg(step.target_mg),
            food.unit().abbreviation(),
            food.name
        ))
    })?;

    let rebuilt = Step {
        method: DosingMethod::Dilute(dilution),
        daily_amount,
        daily_amount_unit: MeasureUnit::Milliliters,
        ..step.clone()
    };
    Ok(replace_step(protocol, rebuilt))
}

/// Change a step's daily amount
///
/// For neat and capsule steps the target follows the amount, rounded to
/// 0.01 mg. For diluted steps the mixture food amount is kept and the water
/// is re-derived so the target still holds.
///
/// # Errors
///
/// Returns an error if the step does not exist, its food is missing, the
/// neat amount holds more protein than a `Decimal` can represent, or a
/// diluted recipe cannot be re-derived.
pub fn update_daily_amount(
    protocol: &Protocol,
    step_index: usize,
    daily_amount: Decimal,
) -> AppResult<Protocol> {
    let step = find_step(protocol, step_index)?;
    match &step.method {
        DosingMethod::Dilute(dilution) => {
            update_dilution_recipe(protocol, step_index, dilution.mix_food_amount, daily_amount)
        }
        DosingMethod::Direct | DosingMethod::Capsule => {
            let food = food_for(protocol, step.food)?;
            let target_mg = food.protein_in(daily_amount).ok_or_else(|| {
                AppError::out_of_range(format!("Daily amount {daily_amount} is too large"))
            })?;
            let rebuilt = Step {
                target_mg: target_mg.round_dp(2).normalize(),
                daily_amount,
                ..step.clone()
            };
            Ok(replace_step(protocol, rebuilt))
        }
    }
}

/// Insert a new step after `after_index`; `0` inserts at the start
///
/// The new step uses the food of the step it follows (food A at the start)
/// and every step is renumbered.
///
/// # Errors
///
/// Returns an error if `after_index` is past the last step.
pub fn insert_step(
    protocol: &Protocol,
    after_index: usize,
    target_mg: Decimal,
) -> AppResult<Protocol> {
    if after_index > protocol.steps.len() {
        return Err(AppError::out_of_range(format!(
            "Cannot insert after step {after_index}; protocol has {} steps",
            protocol.steps.len()
        )));
    }
    let slot = if after_index == 0 {
        FoodSlot::A
    } else {
        find_step(protocol, after_index)?.food
    };
    let new_step = generate_protocol_step(protocol, slot, target_mg, after_index + 1)
        .ok_or_else(|| AppError::not_found(format!("Food {slot:?}")))?;

    let mut steps = protocol.steps.clone();
    steps.insert(after_index, new_step);
    Ok(protocol.with_steps(steps))
}

/// Remove a step and renumber the rest
///
/// # Errors
///
/// Returns an error if the step does not exist.
pub fn remove_step(protocol: &Protocol, step_index: usize) -> AppResult<Protocol> {
    find_step(protocol, step_index)?;
    let steps = protocol
        .steps
        .iter()
        .filter(|step| step.step_index != step_index)
        .cloned()
        .collect();
    Ok(protocol.with_steps(steps))
}

/// Switch to another target ladder and rebuild every step
#[must_use]
pub fn set_dosing_strategy(protocol: &Protocol, dosing_strategy: DosingStrategy) -> Protocol {
    let updated = Protocol {
        dosing_strategy,
        ..protocol.clone()
    };
    regenerate_steps(&updated, dosing_strategy.targets())
}

/// Change when food A is diluted and rebuild every step on the current targets
///
/// A `None` threshold keeps the protocol's current one.
#[must_use]
pub fn set_food_a_strategy(
    protocol: &Protocol,
    food_a_strategy: FoodAStrategy,
    di_threshold: Option<Decimal>,
) -> Protocol {
    let updated = Protocol {
        food_a_strategy,
        di_threshold: di_threshold.unwrap_or(protocol.di_threshold),
        ..protocol.clone()
    };
    regenerate_steps(&updated, &base_targets(protocol))
}

/// Add or replace food B and rebuild the steps around its transition
///
/// A `None` threshold uses the configured default.
#[must_use]
pub fn apply_food_b(protocol: &Protocol, food_b: Food, threshold: Option<Decimal>) -> Protocol {
    let targets = base_targets(protocol);
    let updated = Protocol {
        food_b_threshold: Some(threshold.unwrap_or(protocol.config.default_food_b_threshold)),
        food_b: Some(food_b),
        ..protocol.clone()
    };
    let rebuilt = regenerate_steps(&updated, &targets);
    if rebuilt.transition_position().is_none() {
        debug!("Food B never reaches its threshold on the current targets");
    }
    rebuilt
}

/// Drop food B and dose every target with food A
#[must_use]
pub fn remove_food_b(protocol: &Protocol) -> Protocol {
    let targets = base_targets(protocol);
    let updated = Protocol {
        food_b: None,
        food_b_threshold: None,
        ..protocol.clone()
    };
    regenerate_steps(&updated, &targets)
}

// ABOUTME: Converts target dose ladders into dosing steps for food A and optional food B
// ABOUTME: Chooses neat or diluted dosing per strategy and falls back to neat steps when no recipe fits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! # Step Generator
//!
//! A missing recipe is not an error here. `generate_step_for_target` returns
//! `None` and the protocol builders substitute a neat step, leaving the
//! validator to flag the result.

use oit_core::config::ProtocolConfig;
use oit_core::models::{DosingStrategy, Food, FoodAStrategy, FoodSlot, FoodType, Protocol, Step};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::dilution::find_dilution_candidates;
use crate::rounding::snap_direct_amount;

/// How a protocol's foods are dosed
///
/// Groups the protocol fields the generator needs so the builders stay
/// independent of a finished [`Protocol`].
#[derive(Debug, Clone, Copy)]
pub struct FoodPlan<'a> {
    /// Initial food
    pub food_a: &'a Food,
    /// Dilution policy for food A
    pub food_a_strategy: FoodAStrategy,
    /// Neat food A amount below which it is diluted
    pub di_threshold: Decimal,
    /// Maintenance food and the neat amount at which it takes over
    pub food_b: Option<(&'a Food, Decimal)>,
}

impl<'a> FoodPlan<'a> {
    /// Plan matching an existing protocol's foods and strategy
    #[must_use]
    pub fn from_protocol(protocol: &'a Protocol) -> Self {
        let food_b_threshold = protocol
            .food_b_threshold
            .unwrap_or(protocol.config.default_food_b_threshold);
        Self {
            food_a: &protocol.food_a,
            food_a_strategy: protocol.food_a_strategy,
            di_threshold: protocol.di_threshold,
            food_b: protocol.food_b.as_ref().map(|food| (food, food_b_threshold)),
        }
    }
}

/// Build one food A step for a target dose
///
/// Returns `None` when the food has no usable concentration or dilution is
/// required and no recipe satisfies the limits.
#[must_use]
pub fn generate_step_for_target(
    target_mg: Decimal,
    step_index: usize,
    food: &Food,
    food_strategy: FoodAStrategy,
    di_threshold: Decimal,
    config: &ProtocolConfig,
) -> Option<Step> {
    generate_step_for_food(
        target_mg,
        step_index,
        food,
        FoodSlot::A,
        food_strategy,
        di_threshold,
        config,
    )
}

fn generate_step_for_food(
    target_mg: Decimal,
    step_index: usize,
    food: &Food,
    slot: FoodSlot,
    food_strategy: FoodAStrategy,
    di_threshold: Decimal,
    config: &ProtocolConfig,
) -> Option<Step> {
    let neat_amount = food.neat_amount_for(target_mg)?;

    if should_dilute(food, food_strategy, neat_amount, di_threshold) {
        let best = find_dilution_candidates(target_mg, food, config)
            .into_iter()
            .next()?;
        debug!(
            step_index,
            target_mg = %target_mg,
            mix_food = %best.mix_food_amount,
            mix_water = %best.mix_water_amount,
            daily_amount = %best.daily_amount,
            "Selected dilution recipe"
        );
        return Some(Step::dilute(step_index, target_mg, &best, slot));
    }

    let daily_amount = snap_direct_amount(target_mg, food, neat_amount, config.protein_tolerance);
    Some(Step::direct(
        step_index,
        target_mg,
        daily_amount,
        food.food_type,
        slot,
    ))
}

/// Build a step on one of a protocol's foods for an edited target
///
/// Food A follows the protocol's dilution strategy; food B is always dosed
/// neat. A neat step is substituted when no recipe fits. Returns `None` only
/// when the slot has no food.
#[must_use]
pub fn generate_protocol_step(
    protocol: &Protocol,
    slot: FoodSlot,
    target_mg: Decimal,
    step_index: usize,
) -> Option<Step> {
    let food = protocol.food(slot)?;
    let strategy = match slot {
        FoodSlot::A => protocol.food_a_strategy,
        FoodSlot::B => FoodAStrategy::DiluteNone,
    };
    let step = generate_step_for_food(
        target_mg,
        step_index,
        food,
        slot,
        strategy,
        protocol.di_threshold,
        &protocol.config,
    )
    .unwrap_or_else(|| fallback_direct_step(target_mg, step_index, food, slot));
    Some(step)
}

/// Whether a dose of `neat_amount` is diluted under the strategy
///
/// Capsules are pre-weighed and never mixed.
fn should_dilute(
    food: &Food,
    strategy: FoodAStrategy,
    neat_amount: Decimal,
    di_threshold: Decimal,
) -> bool {
    if food.food_type == FoodType::Capsule {
        return false;
    }
    match strategy {
        FoodAStrategy::DiluteInitial => neat_amount < di_threshold,
        FoodAStrategy::DiluteAll => true,
        FoodAStrategy::DiluteNone => false,
    }
}

/// Neat step used when no better step can be built; zero amount for unusable foods
fn fallback_direct_step(
    target_mg: Decimal,
    step_index: usize,
    food: &Food,
    slot: FoodSlot,
) -> Step {
    let daily_amount = food.neat_amount_for(target_mg).unwrap_or(Decimal::ZERO);
    warn!(
        step_index,
        target_mg = %target_mg,
        food = %food.name,
        "No practical recipe for target, using neat dose"
    );
    Step::direct(step_index, target_mg, daily_amount, food.food_type, slot)
}

/// Build a step for every target on one food, never skipping a target
fn steps_for_food(
    targets: &[Decimal],
    first_index: usize,
    food: &Food,
    slot: FoodSlot,
    food_strategy: FoodAStrategy,
    di_threshold: Decimal,
    config: &ProtocolConfig,
) -> Vec<Step> {
    targets
        .iter()
        .zip(first_index..)
        .map(|(&target_mg, step_index)| {
            generate_step_for_food(
                target_mg,
                step_index,
                food,
                slot,
                food_strategy,
                di_threshold,
                config,
            )
            .unwrap_or_else(|| fallback_direct_step(target_mg, step_index, food, slot))
        })
        .collect()
}

/// Position of the first target whose neat food B amount reaches the threshold
#[must_use]
pub fn find_transition(targets: &[Decimal], food_b: &Food, threshold: Decimal) -> Option<usize> {
    targets
        .iter()
        .enumerate()
        .find(|&(_, &target)| {
            food_b
                .neat_amount_for(target)
                .is_some_and(|amount| amount >= threshold)
        })
        .map(|(position, _)| position)
}

/// Build a complete, renumbered step list for a target ladder
///
/// Without food B every target is dosed with food A. With food B, food A
/// covers targets up to and including the transition target and food B
/// starts by repeating it, so the switch happens at a constant dose.
#[must_use]
pub fn generate_steps_for_targets(
    targets: &[Decimal],
    plan: &FoodPlan<'_>,
    config: &ProtocolConfig,
) -> Vec<Step> {
    let transition = plan.food_b.and_then(|(food_b, threshold)| {
        find_transition(targets, food_b, threshold).map(|position| (food_b, position))
    });

    let Some((food_b, position)) = transition else {
        return steps_for_food(
            targets,
            1,
            plan.food_a,
            FoodSlot::A,
            plan.food_a_strategy,
            plan.di_threshold,
            config,
        );
    };

    let mut steps = steps_for_food(
        &targets[..=position],
        1,
        plan.food_a,
        FoodSlot::A,
        plan.food_a_strategy,
        plan.di_threshold,
        config,
    );
    steps.extend(steps_for_food(
        &targets[position..],
        position + 2,
        food_b,
        FoodSlot::B,
        FoodAStrategy::DiluteNone,
        plan.di_threshold,
        config,
    ));
    steps
}

/// Default protocol for a single food
///
/// Standard ladder, dilute-initial strategy, and the configured dilution
/// threshold. Every target yields a step; targets without a practical recipe
/// become neat steps that the validator will flag.
#[must_use]
pub fn generate_default_protocol(food: &Food, config: &ProtocolConfig) -> Protocol {
    let dosing_strategy = DosingStrategy::Standard;
    let plan = FoodPlan {
        food_a: food,
        food_a_strategy: FoodAStrategy::DiluteInitial,
        di_threshold: config.default_food_a_dilution_threshold,
        food_b: None,
    };
    let steps = generate_steps_for_targets(dosing_strategy.targets(), &plan, config);

    info!(
        food = %food.name,
        steps = steps.len(),
        diluted = steps.iter().filter(|step| step.is_dilute()).count(),
        "Generated default protocol"
    );

    Protocol {
        dosing_strategy,
        food_a: food.clone(),
        food_a_strategy: plan.food_a_strategy,
        di_threshold: plan.di_threshold,
        food_b: None,
        food_b_threshold: None,
        steps,
        config: config.clone(),
    }
}

/// Rebuild a protocol's steps from a target ladder and its current foods
#[must_use]
pub fn regenerate_steps(protocol: &Protocol, targets: &[Decimal]) -> Protocol {
    let plan = FoodPlan::from_protocol(protocol);
    let steps = generate_steps_for_targets(targets, &plan, &protocol.config);
    protocol.with_steps(steps)
}

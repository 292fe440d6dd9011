// ABOUTME: Integration tests for protocol edits
// ABOUTME: Target, recipe, and daily amount edits, insertion, removal, strategy and food B changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use oit_calculator::config::ProtocolConfig;
use oit_calculator::editor::{
    apply_food_b, base_targets, insert_step, remove_food_b, remove_step, set_dosing_strategy,
    set_food_a_strategy, update_daily_amount, update_dilution_recipe, update_step_target,
};
use oit_calculator::errors::ErrorCode;
use oit_calculator::models::{
    DosingMethod, DosingStrategy, FoodAStrategy, FoodSlot, MeasureUnit, Protocol,
};
use oit_calculator::numeric::within_tolerance;
use oit_calculator::{calculate_dilution_actual_protein, dec, generate_default_protocol, Decimal};

use common::{init_test_logging, milk, peanut_flour};

fn flour_protocol() -> Protocol {
    generate_default_protocol(&peanut_flour(), &ProtocolConfig::default())
}

#[test]
fn test_update_target_rebuilds_step() {
    init_test_logging();
    let protocol = flour_protocol();

    // 130 mg is 0.26 g neat; 0.25 g is within 5%
    let edited = update_step_target(&protocol, 8, dec!(130)).unwrap();
    let step = edited.step(8).unwrap();
    assert_eq!(step.target_mg, dec!(130));
    assert_eq!(step.method, DosingMethod::Direct);
    assert_eq!(step.daily_amount, dec!(0.25));

    let diluted = update_step_target(&protocol, 1, dec!(1.5)).unwrap();
    let step = diluted.step(1).unwrap();
    assert_eq!(step.target_mg, dec!(1.5));
    assert!(step.is_dilute());

    // Only the edited step changes
    assert_eq!(edited.steps[..7], protocol.steps[..7]);
    assert_eq!(edited.steps[8..], protocol.steps[8..]);
}

#[test]
fn test_update_dilution_recipe_derives_water() {
    let protocol = flour_protocol();
    // 0.2 g of flour holds 100 mg: 100 doses of 1 mg at 1 ml each
    let edited = update_dilution_recipe(&protocol, 1, dec!(0.2), dec!(1)).unwrap();
    let step = edited.step(1).unwrap();
    let dilution = step.dilution().unwrap();

    assert_eq!(dilution.mix_food_amount, dec!(0.2));
    assert_eq!(dilution.mix_water_amount, dec!(100));
    assert_eq!(dilution.servings, dec!(100));
    assert_eq!(step.daily_amount, dec!(1));
    assert_eq!(step.daily_amount_unit, MeasureUnit::Milliliters);
}

#[test]
fn test_update_dilution_recipe_turns_neat_step_into_mixture() {
    let protocol = flour_protocol();
    let edited = update_dilution_recipe(&protocol, 11, dec!(3), dec!(10)).unwrap();
    let step = edited.step(11).unwrap();
    assert!(step.is_dilute());
    assert_eq!(step.target_mg, dec!(300));
    // 3 g holds 1500 mg: five 10 ml doses in 50 ml
    assert_eq!(step.dilution().unwrap().mix_water_amount, dec!(50));
}

#[test]
fn test_update_dilution_recipe_rejects_zero_daily_amount() {
    let protocol = flour_protocol();
    let err = update_dilution_recipe(&protocol, 1, dec!(0.2), Decimal::ZERO).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_update_daily_amount_on_neat_step_moves_target() {
    let protocol = flour_protocol();
    let edited = update_daily_amount(&protocol, 8, dec!(0.3)).unwrap();
    let step = edited.step(8).unwrap();
    assert_eq!(step.daily_amount, dec!(0.3));
    assert_eq!(step.target_mg, dec!(150));
}

#[test]
fn test_update_daily_amount_on_mixture_keeps_target() {
    let protocol = flour_protocol();
    let food = peanut_flour();
    let edited = update_daily_amount(&protocol, 2, dec!(2)).unwrap();
    let step = edited.step(2).unwrap();
    let dilution = step.dilution().unwrap();

    assert_eq!(step.target_mg, dec!(2.5));
    assert_eq!(step.daily_amount, dec!(2));
    assert_eq!(
        dilution.mix_food_amount,
        protocol.step(2).unwrap().dilution().unwrap().mix_food_amount
    );
    let delivered = calculate_dilution_actual_protein(
        &food,
        dilution.mix_food_amount,
        dilution.mix_total_volume(food.food_type),
        step.daily_amount,
    )
    .unwrap();
    assert!(within_tolerance(delivered, dec!(2.5), dec!(0.05)));
}

#[test]
fn test_insert_and_remove_renumber() {
    let protocol = flour_protocol();

    let inserted = insert_step(&protocol, 0, dec!(0.5)).unwrap();
    assert_eq!(inserted.steps.len(), 12);
    assert_eq!(inserted.steps[0].target_mg, dec!(0.5));
    assert_eq!(inserted.steps[1].target_mg, dec!(1));

    let middle = insert_step(&protocol, 3, dec!(7.5)).unwrap();
    assert_eq!(middle.step(4).unwrap().target_mg, dec!(7.5));
    assert_eq!(middle.step(5).unwrap().target_mg, dec!(10));

    let removed = remove_step(&middle, 4).unwrap();
    assert_eq!(removed, protocol);

    for edited in [&inserted, &middle, &removed] {
        assert!(edited
            .steps
            .iter()
            .zip(1..)
            .all(|(step, index)| step.step_index == index));
    }
}

#[test]
fn test_missing_steps_are_errors() {
    let protocol = flour_protocol();
    assert_eq!(
        insert_step(&protocol, 12, dec!(400)).unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
    assert_eq!(
        remove_step(&protocol, 0).unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
    assert_eq!(
        update_daily_amount(&protocol, 42, dec!(1)).unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
}

#[test]
fn test_strategy_changes_regenerate_steps() {
    let protocol = flour_protocol();

    let slow = set_dosing_strategy(&protocol, DosingStrategy::Slow);
    assert_eq!(slow.dosing_strategy, DosingStrategy::Slow);
    assert_eq!(slow.targets(), DosingStrategy::Slow.targets());

    let neat = set_food_a_strategy(&protocol, FoodAStrategy::DiluteNone, None);
    assert_eq!(neat.food_a_strategy, FoodAStrategy::DiluteNone);
    assert_eq!(neat.di_threshold, protocol.di_threshold);
    assert!(neat.steps.iter().all(|step| !step.is_dilute()));

    // Raising the threshold to 0.5 g also dilutes 120, 160, and 240 mg
    let higher = set_food_a_strategy(&protocol, FoodAStrategy::DiluteInitial, Some(dec!(0.5)));
    assert_eq!(higher.di_threshold, dec!(0.5));
    assert_eq!(higher.steps.iter().filter(|step| step.is_dilute()).count(), 10);
}

#[test]
fn test_food_b_round_trip() {
    let protocol = flour_protocol();
    let with_b = apply_food_b(&protocol, milk(), Some(dec!(2)));

    assert_eq!(with_b.food_b_threshold, Some(dec!(2)));
    let switch = with_b.transition_position().unwrap();
    assert_eq!(with_b.steps[switch].food, FoodSlot::B);
    assert_eq!(with_b.steps[switch - 1].target_mg, with_b.steps[switch].target_mg);
    assert_eq!(base_targets(&with_b), protocol.targets());

    let default_threshold = apply_food_b(&protocol, milk(), None);
    assert_eq!(
        default_threshold.food_b_threshold,
        Some(protocol.config.default_food_b_threshold)
    );

    assert_eq!(remove_food_b(&with_b), protocol);
}

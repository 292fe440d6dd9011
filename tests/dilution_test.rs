// ABOUTME: Integration tests for the dilution candidate search
// ABOUTME: Checks tolerance, resolution, servings, and water limits plus snapping and ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashSet;

use oit_calculator::config::ProtocolConfig;
use oit_calculator::models::{Candidate, Food, FoodType};
use oit_calculator::numeric::{floor_ceil_snaps, within_tolerance};
use oit_calculator::{
    calculate_dilution_actual_protein, check_candidate_validity, dec, find_dilution_candidates,
    Decimal,
};

use common::{init_test_logging, milk, peanut_flour, ten_percent_powder};

fn delivered(food: &Food, candidate: &Candidate) -> Decimal {
    calculate_dilution_actual_protein(
        food,
        candidate.mix_food_amount,
        candidate.mix_total_volume,
        candidate.daily_amount,
    )
    .unwrap()
}

fn assert_candidate_limits(food: &Food, target: Decimal, candidate: &Candidate) {
    let config = ProtocolConfig::default();
    assert!(candidate.mix_food_amount >= config.min_measurable(food.unit()));
    assert!(candidate.daily_amount >= config.min_measurable_volume);
    assert!(candidate.mix_water_amount >= config.min_measurable_volume);
    assert!(candidate.mix_water_amount <= config.max_mix_water);
    assert!(candidate.servings >= config.min_servings_for_mix);
    assert!(
        within_tolerance(delivered(food, candidate), target, config.protein_tolerance),
        "{candidate:?} misses {target} mg"
    );
}

#[test]
fn test_ten_mg_from_ten_percent_solid() {
    init_test_logging();
    let food = ten_percent_powder();
    let candidates = find_dilution_candidates(dec!(10), &food, &ProtocolConfig::default());

    assert!(!candidates.is_empty());
    for candidate in &candidates {
        assert!(candidate.mix_food_amount >= dec!(0.2));
        assert!(candidate.mix_water_amount <= dec!(500));
        assert_candidate_limits(&food, dec!(10), candidate);
    }
}

#[test]
fn test_every_candidate_meets_limits_across_doses() {
    init_test_logging();
    let config = ProtocolConfig::default();
    let foods = [peanut_flour(), ten_percent_powder(), milk()];
    let targets = [dec!(0.5), dec!(1), dec!(2.5), dec!(5), dec!(12), dec!(40)];

    for food in &foods {
        for &target in &targets {
            for candidate in find_dilution_candidates(target, food, &config) {
                assert_candidate_limits(food, target, &candidate);
            }
        }
    }
}

#[test]
fn test_liquid_volume_includes_food() {
    let food = milk();
    let candidates = find_dilution_candidates(dec!(5), &food, &ProtocolConfig::default());
    assert!(!candidates.is_empty());
    for candidate in &candidates {
        assert_eq!(
            candidate.mix_total_volume,
            candidate.mix_food_amount + candidate.mix_water_amount
        );
        assert_eq!(
            candidate.servings,
            candidate.mix_total_volume / candidate.daily_amount
        );
    }
}

#[test]
fn test_solid_volume_is_water_only() {
    let food = peanut_flour();
    let candidates = find_dilution_candidates(dec!(5), &food, &ProtocolConfig::default());
    assert!(!candidates.is_empty());
    assert!(candidates
        .iter()
        .all(|candidate| candidate.mix_total_volume == candidate.mix_water_amount));
}

#[test]
fn test_looser_tolerance_covers_stricter_recipes() {
    let food = peanut_flour();
    let strict = ProtocolConfig::default().with_protein_tolerance(dec!(0.01));
    let loose = ProtocolConfig::default().with_protein_tolerance(dec!(0.1));

    let recipes = |config: &ProtocolConfig| -> HashSet<(Decimal, Decimal)> {
        find_dilution_candidates(dec!(7), &food, config)
            .into_iter()
            .map(|candidate| (candidate.mix_food_amount, candidate.daily_amount))
            .collect()
    };

    let strict_recipes = recipes(&strict);
    let loose_recipes = recipes(&loose);
    assert!(!strict_recipes.is_empty());
    assert!(strict_recipes.is_subset(&loose_recipes));
}

#[test]
fn test_water_prefers_measurable_increments() {
    let config = ProtocolConfig::default();
    let food = peanut_flour();
    let target = dec!(7);

    for candidate in find_dilution_candidates(target, &food, &config) {
        let on_grid = (candidate.mix_water_amount % config.water_step).is_zero();
        if on_grid {
            continue;
        }
        // An exact volume is only used when neither neighbouring increment works
        let total_protein = food.protein_in(candidate.mix_food_amount).unwrap();
        for water in floor_ceil_snaps(candidate.mix_water_amount, config.water_step) {
            assert!(check_candidate_validity(
                &food,
                target,
                total_protein,
                candidate.mix_food_amount,
                candidate.daily_amount,
                water,
                &config,
            )
            .is_none());
        }
    }
}

#[test]
fn test_ranking_prefers_dilute_solids_then_small_amounts() {
    let config = ProtocolConfig::default();
    let food = ten_percent_powder();
    let target = dec!(10);
    let candidates = find_dilution_candidates(target, &food, &config);

    // 10 mg at 5% w/v of a 100 mg/g food needs at least 2 ml per day
    let min_daily = target / (config.max_solid_concentration * food.mg_per_unit());
    assert_eq!(min_daily, dec!(2));

    let key = |candidate: &Candidate| {
        (
            candidate.daily_amount < min_daily,
            candidate.mix_food_amount,
            candidate.daily_amount,
            candidate.mix_total_volume,
            candidate.mix_water_amount,
        )
    };
    assert!(!key(&candidates[0]).0);
    for pair in candidates.windows(2) {
        assert!(key(&pair[0]) <= key(&pair[1]), "{pair:?} out of order");
    }
}

#[test]
fn test_exact_recipe_is_found() {
    // 0.3 g of a 100 mg/g powder in 3 ml gives 10 mg per ml
    let candidates =
        find_dilution_candidates(dec!(10), &ten_percent_powder(), &ProtocolConfig::default());
    assert!(candidates.iter().any(|candidate| {
        candidate.mix_food_amount == dec!(0.3)
            && candidate.daily_amount == dec!(1)
            && candidate.mix_water_amount == dec!(3)
            && candidate.servings == dec!(3)
    }));
}

#[test]
fn test_no_candidates_for_impossible_inputs() {
    let config = ProtocolConfig::default();
    assert!(find_dilution_candidates(dec!(-1), &peanut_flour(), &config).is_empty());

    let no_serving = Food::new("Broken", FoodType::Solid, dec!(10), Decimal::ZERO);
    assert!(find_dilution_candidates(dec!(5), &no_serving, &config).is_empty());
}

#[test]
fn test_tiny_water_limit_rules_out_everything() {
    let config = ProtocolConfig {
        max_mix_water: dec!(1),
        ..ProtocolConfig::default()
    };
    // 0.2 g of peanut flour holds 100 mg, so 1 mg needs at least 20 ml of water
    assert!(find_dilution_candidates(dec!(1), &peanut_flour(), &config).is_empty());
}

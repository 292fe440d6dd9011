// ABOUTME: Dilution candidate search over mix-food and daily-amount combinations
// ABOUTME: Snaps water to measurable increments, checks tolerance and resolution, and ranks recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! # Dilution Search
//!
//! For a target dose the search walks the cross product of the configured
//! mix-food amounts and daily amounts. Each pair fixes how much protein is in
//! the mixture and how much of it is drunk per day, which in turn fixes the
//! exact water volume. That water is snapped to the measuring resolution,
//! the result is re-checked, and every surviving recipe is ranked.

use std::cmp::Ordering;

use oit_core::config::ProtocolConfig;
use oit_core::models::{mix_total_volume, Candidate, Food, FoodType};
use oit_core::numeric::{floor_ceil_snaps, within_tolerance};
use rust_decimal::Decimal;
use tracing::debug;

/// Find every mixture recipe that delivers `target_mg` within tolerance
///
/// Returns an empty list when the target is not positive, the food has no
/// usable concentration, or no recipe satisfies the limits. Results are
/// ranked best-first.
#[must_use]
pub fn find_dilution_candidates(
    target_mg: Decimal,
    food: &Food,
    config: &ProtocolConfig,
) -> Vec<Candidate> {
    if target_mg <= Decimal::ZERO || !food.has_usable_concentration() {
        return Vec::new();
    }

    let mut candidates = Vec::new();

    for &mix_food in config.mix_candidates_for(food.food_type) {
        let Some(total_mix_protein) = food.protein_in(mix_food) else {
            continue;
        };
        let Some(ideal_servings) = total_mix_protein.checked_div(target_mg) else {
            continue;
        };

        for &daily_amount in &config.daily_amount_candidates {
            let Some(ideal_water) =
                ideal_water_amount(food.food_type, mix_food, daily_amount, ideal_servings)
                    .filter(|water| *water >= Decimal::ZERO)
            else {
                continue;
            };

            let check = |water: Decimal| {
                check_candidate_validity(
                    food,
                    target_mg,
                    total_mix_protein,
                    mix_food,
                    daily_amount,
                    water,
                    config,
                )
            };

            let snapped: Vec<Candidate> = floor_ceil_snaps(ideal_water, config.water_step)
                .into_iter()
                .filter_map(check)
                .collect();

            if snapped.is_empty() {
                candidates.extend(check(ideal_water));
            } else {
                candidates.extend(snapped);
            }
        }
    }

    rank_candidates(&mut candidates, target_mg, food, config);

    debug!(
        food = %food.name,
        target_mg = %target_mg,
        count = candidates.len(),
        "Dilution search finished"
    );

    candidates
}

/// Water volume that makes `daily_amount` of the mixture hold exactly one dose
fn ideal_water_amount(
    food_type: FoodType,
    mix_food: Decimal,
    daily_amount: Decimal,
    ideal_servings: Decimal,
) -> Option<Decimal> {
    let total_volume = daily_amount.checked_mul(ideal_servings)?;
    if food_type.is_liquid() {
        total_volume.checked_sub(mix_food)
    } else {
        Some(total_volume)
    }
}

/// Check one concrete recipe against resolution, volume, servings, and tolerance limits
///
/// Returns the candidate when every limit holds.
#[must_use]
pub fn check_candidate_validity(
    food: &Food,
    target_mg: Decimal,
    total_mix_protein: Decimal,
    mix_food: Decimal,
    daily_amount: Decimal,
    water: Decimal,
    config: &ProtocolConfig,
) -> Option<Candidate> {
    let total_volume = mix_total_volume(food.food_type, mix_food, water);
    let servings = total_volume.checked_div(daily_amount)?;
    if servings < config.min_servings_for_mix {
        return None;
    }

    if mix_food < config.min_measurable(food.unit())
        || daily_amount < config.min_measurable_volume
        || water < config.min_measurable_volume
        || water > config.max_mix_water
    {
        return None;
    }

    let protein_per_ml = total_mix_protein.checked_div(total_volume)?;
    let delivered = protein_per_ml.checked_mul(daily_amount)?;
    if !within_tolerance(delivered, target_mg, config.protein_tolerance) {
        return None;
    }

    Some(Candidate {
        mix_food_amount: mix_food,
        mix_water_amount: water,
        daily_amount,
        mix_total_volume: total_volume,
        servings,
    })
}

/// Smallest daily amount that keeps a solid mixture at or below the w/v limit
///
/// A solid dissolved at exactly the limit holds `max_solid_concentration`
/// grams per ml, so one dose needs `target / (limit × mg_per_unit)` ml.
fn min_daily_for_concentration(
    target_mg: Decimal,
    food: &Food,
    config: &ProtocolConfig,
) -> Option<Decimal> {
    if food.food_type != FoodType::Solid {
        return None;
    }
    let max_mg_per_ml = config
        .max_solid_concentration
        .checked_mul(food.mg_per_unit())?;
    target_mg.checked_div(max_mg_per_ml)
}

fn rank_candidates(
    candidates: &mut [Candidate],
    target_mg: Decimal,
    food: &Food,
    config: &ProtocolConfig,
) {
    let min_daily = min_daily_for_concentration(target_mg, food, config);
    let dilute_enough =
        |candidate: &Candidate| min_daily.is_none_or(|min| candidate.daily_amount >= min);

    candidates.sort_by(|a, b| {
        dilute_enough(b)
            .cmp(&dilute_enough(a))
            .then_with(|| compare_amounts(a, b))
    });
}

fn compare_amounts(a: &Candidate, b: &Candidate) -> Ordering {
    a.mix_food_amount
        .cmp(&b.mix_food_amount)
        .then_with(|| a.daily_amount.cmp(&b.daily_amount))
        .then_with(|| a.mix_total_volume.cmp(&b.mix_total_volume))
        .then_with(|| a.mix_water_amount.cmp(&b.mix_water_amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn peanut_flour() -> Food {
        Food::new("Peanut flour", FoodType::Solid, dec!(50), dec!(100))
    }

    #[test]
    fn test_ideal_water_models() {
        assert_eq!(
            ideal_water_amount(FoodType::Solid, dec!(1), dec!(2), dec!(10)),
            Some(dec!(20))
        );
        assert_eq!(
            ideal_water_amount(FoodType::Liquid, dec!(1), dec!(2), dec!(10)),
            Some(dec!(19))
        );
    }

    #[test]
    fn test_check_candidate_rejects_low_servings() {
        let config = ProtocolConfig::default();
        let food = peanut_flour();
        // 0.2 g holds 100 mg, 2 ml of 4 ml is only two servings
        let result = check_candidate_validity(
            &food,
            dec!(50),
            dec!(100),
            dec!(0.2),
            dec!(2),
            dec!(4),
            &config,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_check_candidate_accepts_exact_recipe() {
        let config = ProtocolConfig::default();
        let food = peanut_flour();
        let candidate = check_candidate_validity(
            &food,
            dec!(10),
            dec!(100),
            dec!(0.2),
            dec!(1),
            dec!(10),
            &config,
        )
        .unwrap();
        assert_eq!(candidate.servings, dec!(10));
        assert_eq!(candidate.mix_total_volume, dec!(10));
    }

    #[test]
    fn test_unusable_food_yields_nothing() {
        let config = ProtocolConfig::default();
        let water = Food::new("Water", FoodType::Liquid, Decimal::ZERO, dec!(100));
        assert!(find_dilution_candidates(dec!(5), &water, &config).is_empty());
        assert!(find_dilution_candidates(Decimal::ZERO, &peanut_flour(), &config).is_empty());
    }

    #[test]
    fn test_best_candidate_respects_concentration_preference() {
        let config = ProtocolConfig::default();
        let food = peanut_flour();
        let candidates = find_dilution_candidates(dec!(5), &food, &config);
        let best = candidates.first().unwrap();
        let min_daily = min_daily_for_concentration(dec!(5), &food, &config).unwrap();
        assert!(best.daily_amount >= min_daily);
    }
}

// ABOUTME: Rounding heuristics that turn exact doses into amounts a caregiver can measure
// ABOUTME: Delivered-protein formulas, water snapping for edited recipes, and neat-dose snapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use oit_core::config::ProtocolConfig;
use oit_core::constants::units;
use oit_core::models::{mix_total_volume, Dilution, Food, MeasureUnit};
use oit_core::numeric::{
    direct_increment, floor_ceil_snaps, relative_difference, round_for_display, snap_to_increment,
    within_tolerance, SnapMode,
};
use rust_decimal::Decimal;

/// Protein delivered by `daily_amount` of a mixture
///
/// `mix_amount × mg_per_unit × (daily_amount / mix_total_volume)`. Returns
/// `None` for a zero total volume or when the product overflows.
#[must_use]
pub fn calculate_dilution_actual_protein(
    food: &Food,
    mix_amount: Decimal,
    mix_total_volume: Decimal,
    daily_amount: Decimal,
) -> Option<Decimal> {
    let fraction = daily_amount.checked_div(mix_total_volume)?;
    food.protein_in(mix_amount)?.checked_mul(fraction)
}

/// Protein in a neat dose, `None` on overflow
#[must_use]
pub fn calculate_direct_actual_protein(food: &Food, daily_amount: Decimal) -> Option<Decimal> {
    food.protein_in(daily_amount)
}

/// Pick a 0.5 ml water amount for a hand-edited recipe
///
/// Mix and daily amounts are rounded to display precision first so the error
/// is measured against what the user sees. Of the floor and ceil snaps of
/// `ideal_water_amount`, the one with the smaller relative error is returned
/// when that error is within `tolerance`. `None` means the caller should keep
/// the precise water amount.
#[must_use]
pub fn find_rounded_mix_water_amount(
    target_mg: Decimal,
    food: &Food,
    mix_amount: Decimal,
    ideal_water_amount: Decimal,
    daily_amount: Decimal,
    tolerance: Decimal,
) -> Option<Decimal> {
    round_mix_water(
        target_mg,
        food,
        mix_amount,
        ideal_water_amount,
        daily_amount,
        units::WATER_STEP_ML,
        tolerance,
    )
}

/// Water snapping on an arbitrary increment
fn round_mix_water(
    target_mg: Decimal,
    food: &Food,
    mix_amount: Decimal,
    ideal_water_amount: Decimal,
    daily_amount: Decimal,
    water_step: Decimal,
    tolerance: Decimal,
) -> Option<Decimal> {
    let shown_mix = round_for_display(mix_amount, food.unit());
    let shown_daily = round_for_display(daily_amount, MeasureUnit::Milliliters);

    floor_ceil_snaps(ideal_water_amount, water_step)
        .into_iter()
        .filter(|water| *water > Decimal::ZERO)
        .filter_map(|water| {
            let total = mix_total_volume(food.food_type, shown_mix, water);
            let delivered = calculate_dilution_actual_protein(food, shown_mix, total, shown_daily)?;
            relative_difference(delivered, target_mg).map(|error| (water, error))
        })
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .filter(|(_, error)| *error <= tolerance)
        .map(|(water, _)| water)
}

/// Round a neat dose to the food's direct increment when that stays within tolerance
///
/// Falls back to the precise amount when the rounded value is zero or
/// drifts too far from the target.
#[must_use]
pub fn snap_direct_amount(
    target_mg: Decimal,
    food: &Food,
    precise_amount: Decimal,
    tolerance: Decimal,
) -> Decimal {
    let rounded = snap_to_increment(
        precise_amount,
        direct_increment(food.unit()),
        SnapMode::Nearest,
    );
    let delivered = calculate_direct_actual_protein(food, rounded);
    if rounded > Decimal::ZERO
        && delivered.is_some_and(|mg| within_tolerance(mg, target_mg, tolerance))
    {
        rounded
    } else {
        precise_amount
    }
}

/// Exact water volume for a chosen mix amount and daily amount
///
/// `None` when the food has no usable concentration, the daily amount is not
/// positive, or a liquid mix amount already exceeds the required volume.
#[must_use]
pub fn ideal_water_for_recipe(
    target_mg: Decimal,
    food: &Food,
    mix_amount: Decimal,
    daily_amount: Decimal,
) -> Option<Decimal> {
    if !food.has_usable_concentration() || daily_amount <= Decimal::ZERO {
        return None;
    }
    let servings = food.protein_in(mix_amount)?.checked_div(target_mg)?;
    let total_volume = daily_amount.checked_mul(servings)?;
    let water = if food.food_type.is_liquid() {
        total_volume.checked_sub(mix_amount)?
    } else {
        total_volume
    };
    (water > Decimal::ZERO).then_some(water)
}

/// Build a dilution recipe around user-chosen mix and daily amounts
///
/// Water is snapped to the configured water step when that stays within the
/// protein tolerance, otherwise the precise volume is kept.
#[must_use]
pub fn derive_dilution(
    target_mg: Decimal,
    food: &Food,
    mix_amount: Decimal,
    daily_amount: Decimal,
    config: &ProtocolConfig,
) -> Option<Dilution> {
    let ideal_water = ideal_water_for_recipe(target_mg, food, mix_amount, daily_amount)?;
    let water = round_mix_water(
        target_mg,
        food,
        mix_amount,
        ideal_water,
        daily_amount,
        config.water_step,
        config.protein_tolerance,
    )
    .unwrap_or(ideal_water);
    let servings = mix_total_volume(food.food_type, mix_amount, water).checked_div(daily_amount)?;
    Some(Dilution {
        mix_food_amount: mix_amount,
        mix_water_amount: water,
        servings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oit_core::models::FoodType;
    use rust_decimal_macros::dec;

    fn ten_percent_solid() -> Food {
        Food::new("Powder", FoodType::Solid, dec!(10), dec!(100))
    }

    #[test]
    fn test_dilution_protein_zero_volume() {
        let food = ten_percent_solid();
        assert_eq!(
            calculate_dilution_actual_protein(&food, dec!(1), Decimal::ZERO, dec!(1)),
            None
        );
        assert_eq!(
            calculate_dilution_actual_protein(&food, dec!(1), dec!(20), dec!(2)),
            Some(dec!(10))
        );
    }

    #[test]
    fn test_rounded_water_prefers_smaller_error() {
        let food = ten_percent_solid();
        let ideal = dec!(100) / dec!(3);
        let water =
            find_rounded_mix_water_amount(dec!(3), &food, dec!(1), ideal, dec!(1), dec!(0.05));
        assert_eq!(water, Some(dec!(33.5)));
    }

    #[test]
    fn test_rounded_water_strict_tolerance_fails() {
        let food = ten_percent_solid();
        let ideal = dec!(100) / dec!(3);
        let water =
            find_rounded_mix_water_amount(dec!(3), &food, dec!(1), ideal, dec!(1), dec!(0.001));
        assert_eq!(water, None);
    }

    #[test]
    fn test_direct_snap_accepts_close_value() {
        // 500 mg/g, 12 mg needs 0.024 g; 0.05 g is far off, keep precise
        let flour = Food::new("Flour", FoodType::Solid, dec!(50), dec!(100));
        assert_eq!(
            snap_direct_amount(dec!(12), &flour, dec!(0.024), dec!(0.05)),
            dec!(0.024)
        );
        // 100 mg/g, 101 mg needs 1.01 g; 1.0 g is within 5%
        let food = ten_percent_solid();
        assert_eq!(
            snap_direct_amount(dec!(101), &food, dec!(1.01), dec!(0.05)),
            dec!(1)
        );
    }

    #[test]
    fn test_derive_dilution_snaps_water() {
        let food = ten_percent_solid();
        let config = ProtocolConfig::default();
        let dilution = derive_dilution(dec!(10), &food, dec!(1), dec!(2), &config).unwrap();
        assert_eq!(dilution.mix_water_amount, dec!(20));
        assert_eq!(dilution.servings, dec!(10));
    }
}

// ABOUTME: Per-step validation rules for targets, delivered protein, volumes, and limits
// ABOUTME: Neat and capsule steps check the dose itself; diluted steps also check the mixture
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use oit_core::config::ProtocolConfig;
use oit_core::models::{
    Dilution, DosingMethod, Food, FoodType, MeasureUnit, Protocol, Step, Warning, WarningCode,
};
use oit_core::numeric::{format_amount, format_mg, percent_difference, within_tolerance};
use rust_decimal::Decimal;

use crate::rounding::{calculate_dilution_actual_protein, calculate_direct_actual_protein};

pub(super) fn check_step(protocol: &Protocol, step: &Step, warnings: &mut Vec<Warning>) {
    let index = step.step_index;

    let target_valid = step.target_mg > Decimal::ZERO;
    if !target_valid {
        warnings.push(Warning::for_step(
            WarningCode::InvalidTarget,
            index,
            format!("Step {index}: target {} must be > 0", format_mg(step.target_mg)),
        ));
    }

    let Some(food) = protocol.food(step.food) else {
        warnings.push(Warning::for_step(
            WarningCode::InvalidConcentration,
            index,
            format!("Step {index} uses food {:?} but no such food is defined", step.food),
        ));
        return;
    };

    // Concentration problems are reported once per food, not per step
    let check_protein = target_valid && food.has_usable_concentration();
    let context = StepContext {
        step,
        food,
        config: &protocol.config,
        check_protein,
    };

    match &step.method {
        DosingMethod::Direct | DosingMethod::Capsule => context.check_neat(warnings),
        DosingMethod::Dilute(dilution) => context.check_dilution(dilution, warnings),
    }
}

struct StepContext<'a> {
    step: &'a Step,
    food: &'a Food,
    config: &'a ProtocolConfig,
    check_protein: bool,
}

impl StepContext<'_> {
    const fn index(&self) -> usize {
        self.step.step_index
    }

    fn push(&self, code: WarningCode, message: String, warnings: &mut Vec<Warning>) {
        warnings.push(Warning::for_step(code, self.index(), message));
    }

    fn check_neat(&self, warnings: &mut Vec<Warning>) {
        if self.check_protein {
            let delivered = calculate_direct_actual_protein(self.food, self.step.daily_amount);
            self.check_delivered(delivered, warnings);
        }

        let unit = self.step.daily_amount_unit;
        if self.step.daily_amount < self.config.min_measurable(unit) {
            self.push(
                WarningCode::BelowResolution,
                format!(
                    "Step {}: daily amount {} is below the measurable minimum of {}",
                    self.index(),
                    format_amount(self.step.daily_amount, unit),
                    format_amount(self.config.min_measurable(unit), unit)
                ),
                warnings,
            );
        }
        self.check_daily_limit(warnings);
    }

    fn check_dilution(&self, dilution: &Dilution, warnings: &mut Vec<Warning>) {
        let non_positive = non_positive_fields(dilution, self.step.daily_amount);
        if !non_positive.is_empty() {
            self.push(
                WarningCode::InvalidDilutionStepValues,
                format!(
                    "Step {}: {} must be > 0",
                    self.index(),
                    non_positive.join(", ")
                ),
                warnings,
            );
            return;
        }

        let total_volume = dilution.mix_total_volume(self.food.food_type);
        if self.check_protein {
            self.check_mix_protein(dilution, warnings);
            // Total volume is positive here, so `None` means the product overflowed
            let delivered = calculate_dilution_actual_protein(
                self.food,
                dilution.mix_food_amount,
                total_volume,
                self.step.daily_amount,
            );
            self.check_delivered(delivered, warnings);
        }

        self.check_volume(dilution, total_volume, warnings);

        if dilution.servings < self.config.min_servings_for_mix {
            self.push(
                WarningCode::LowServings,
                format!(
                    "Step {}: mixture yields {} servings; at least {} recommended",
                    self.index(),
                    dilution.servings.round_dp(1).normalize(),
                    self.config.min_servings_for_mix.normalize()
                ),
                warnings,
            );
        }

        self.check_mix_resolution(dilution, warnings);
        self.check_solid_concentration(dilution, warnings);

        if dilution.mix_water_amount > self.config.max_mix_water {
            self.push(
                WarningCode::HighMixWater,
                format!(
                    "Step {}: {} of water exceeds the {} limit",
                    self.index(),
                    format_amount(dilution.mix_water_amount, MeasureUnit::Milliliters),
                    format_amount(self.config.max_mix_water, MeasureUnit::Milliliters)
                ),
                warnings,
            );
        }
        self.check_daily_limit(warnings);
    }

    fn check_delivered(&self, delivered: Option<Decimal>, warnings: &mut Vec<Warning>) {
        let target = self.step.target_mg;
        let Some(delivered) = delivered else {
            self.push(
                WarningCode::ProteinMismatch,
                format!(
                    "Step {}: amounts deliver more protein than can be represented, not {}",
                    self.index(),
                    format_mg(target)
                ),
                warnings,
            );
            return;
        };
        if within_tolerance(delivered, target, self.config.protein_tolerance) {
            return;
        }
        let off_by = percent_difference(delivered, target).unwrap_or_default();
        self.push(
            WarningCode::ProteinMismatch,
            format!(
                "Step {}: amounts deliver {} instead of {} ({off_by}% off)",
                self.index(),
                format_mg(delivered),
                format_mg(target)
            ),
            warnings,
        );
    }

    fn check_mix_protein(&self, dilution: &Dilution, warnings: &mut Vec<Warning>) {
        // Overflow means far more than one dose
        let Some(mix_protein) = self.food.protein_in(dilution.mix_food_amount) else {
            return;
        };
        if mix_protein < self.step.target_mg {
            self.push(
                WarningCode::InsufficientMixProtein,
                format!(
                    "Step {}: the mixture holds {} of protein, less than one {} dose",
                    self.index(),
                    format_mg(mix_protein),
                    format_mg(self.step.target_mg)
                ),
                warnings,
            );
        }
    }

    fn check_volume(
        &self,
        dilution: &Dilution,
        total_volume: Decimal,
        warnings: &mut Vec<Warning>,
    ) {
        let daily = self.step.daily_amount;
        if daily > total_volume {
            self.push(
                WarningCode::ImpossibleVolume,
                format!(
                    "Step {}: daily amount {} exceeds the {} mixture",
                    self.index(),
                    format_amount(daily, MeasureUnit::Milliliters),
                    format_amount(total_volume, MeasureUnit::Milliliters)
                ),
                warnings,
            );
            return;
        }

        // Liquid volumes add, so declared servings must account for the food itself
        if self.food.food_type.is_liquid() {
            let consistent = dilution.servings.checked_mul(daily).is_some_and(|drawn| {
                within_tolerance(drawn, total_volume, self.config.protein_tolerance)
            });
            if !consistent {
                self.push(
                    WarningCode::ImpossibleVolume,
                    format!(
                        "Step {}: {} servings of {} do not match the {} of food plus water",
                        self.index(),
                        dilution.servings.round_dp(1).normalize(),
                        format_amount(daily, MeasureUnit::Milliliters),
                        format_amount(total_volume, MeasureUnit::Milliliters)
                    ),
                    warnings,
                );
            }
        }
    }

    fn check_mix_resolution(&self, dilution: &Dilution, warnings: &mut Vec<Warning>) {
        let food_unit = self.food.unit();
        let ml = MeasureUnit::Milliliters;
        let min_volume = self.config.min_measurable_volume;
        let quantities = [
            ("daily amount", self.step.daily_amount, ml, min_volume),
            (
                "mix food amount",
                dilution.mix_food_amount,
                food_unit,
                self.config.min_measurable(food_unit),
            ),
            ("mix water amount", dilution.mix_water_amount, ml, min_volume),
        ];

        let below: Vec<String> = quantities
            .iter()
            .filter(|(_, value, _, minimum)| value < minimum)
            .map(|(label, value, unit, minimum)| {
                format!(
                    "{label} {} < {}",
                    format_amount(*value, *unit),
                    format_amount(*minimum, *unit)
                )
            })
            .collect();

        if !below.is_empty() {
            self.push(
                WarningCode::BelowResolution,
                format!(
                    "Step {}: below measurable resolution: {}",
                    self.index(),
                    below.join("; ")
                ),
                warnings,
            );
        }
    }

    fn check_solid_concentration(&self, dilution: &Dilution, warnings: &mut Vec<Warning>) {
        if self.food.food_type != FoodType::Solid {
            return;
        }
        let Some(concentration) = dilution
            .mix_food_amount
            .checked_div(dilution.mix_water_amount)
        else {
            return;
        };
        if concentration > self.config.max_solid_concentration {
            self.push(
                WarningCode::HighSolidConcentration,
                format!(
                    "Step {}: {} in {} is {}% w/v; keep solids at or below {}%",
                    self.index(),
                    format_amount(dilution.mix_food_amount, MeasureUnit::Grams),
                    format_amount(dilution.mix_water_amount, MeasureUnit::Milliliters),
                    concentration
                        .saturating_mul(Decimal::ONE_HUNDRED)
                        .round_dp(1)
                        .normalize(),
                    (self.config.max_solid_concentration * Decimal::ONE_HUNDRED).normalize()
                ),
                warnings,
            );
        }
    }

    fn check_daily_limit(&self, warnings: &mut Vec<Warning>) {
        if self.step.daily_amount > self.config.max_daily_amount {
            let unit = self.step.daily_amount_unit;
            self.push(
                WarningCode::HighDailyAmount,
                format!(
                    "Step {}: daily amount {} exceeds the {} limit",
                    self.index(),
                    format_amount(self.step.daily_amount, unit),
                    format_amount(self.config.max_daily_amount, unit)
                ),
                warnings,
            );
        }
    }
}

fn non_positive_fields(dilution: &Dilution, daily_amount: Decimal) -> Vec<&'static str> {
    [
        ("mix food amount", dilution.mix_food_amount),
        ("mix water amount", dilution.mix_water_amount),
        ("daily amount", daily_amount),
        ("servings", dilution.servings),
    ]
    .into_iter()
    .filter(|(_, value)| *value <= Decimal::ZERO)
    .map(|(label, _)| label)
    .collect()
}

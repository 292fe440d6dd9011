// ABOUTME: Dosing step and dilution candidate models
// ABOUTME: FoodSlot, Dilution recipe, DosingMethod sum type, Step, and transient Candidate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::food::{FoodType, MeasureUnit};

/// Which of the protocol's two foods a step uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodSlot {
    /// The initial food
    A,
    /// The optional maintenance food
    B,
}

/// Mixture recipe carried by a diluted step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dilution {
    /// Food put into the mixture (g or ml)
    pub mix_food_amount: Decimal,
    /// Water added to the mixture (ml)
    pub mix_water_amount: Decimal,
    /// Daily doses one mixture yields
    pub servings: Decimal,
}

impl Dilution {
    /// Total mixture volume under the food's mixing model
    ///
    /// Liquid volumes add; a solid's own volume is treated as negligible.
    #[must_use]
    pub fn mix_total_volume(&self, food_type: FoodType) -> Decimal {
        mix_total_volume(food_type, self.mix_food_amount, self.mix_water_amount)
    }
}

/// Total mixture volume for a food amount and water amount
///
/// Saturates at `Decimal::MAX`.
#[must_use]
pub fn mix_total_volume(food_type: FoodType, mix_food: Decimal, water: Decimal) -> Decimal {
    if food_type.is_liquid() {
        mix_food.saturating_add(water)
    } else {
        water
    }
}

/// How a step's dose is administered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DosingMethod {
    /// Neat food
    Direct,
    /// Part of a food-and-water mixture
    Dilute(Dilution),
    /// Pre-weighed capsule
    Capsule,
}

impl DosingMethod {
    /// Wire name of the method
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "DIRECT",
            Self::Dilute(_) => "DILUTE",
            Self::Capsule => "CAPSULE",
        }
    }
}

/// One dose in the escalation ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position in the protocol
    pub step_index: usize,
    /// Protein to deliver (mg)
    pub target_mg: Decimal,
    /// Administration method and, for dilutions, the mixture recipe
    #[serde(flatten)]
    pub method: DosingMethod,
    /// Amount consumed each day (g or ml)
    pub daily_amount: Decimal,
    /// Unit of `daily_amount`
    pub daily_amount_unit: MeasureUnit,
    /// Food this step uses
    pub food: FoodSlot,
}

impl Step {
    /// Neat dose of `daily_amount` in the food's own unit
    #[must_use]
    pub fn direct(
        step_index: usize,
        target_mg: Decimal,
        daily_amount: Decimal,
        food_type: FoodType,
        food: FoodSlot,
    ) -> Self {
        let method = match food_type {
            FoodType::Capsule => DosingMethod::Capsule,
            FoodType::Solid | FoodType::Liquid => DosingMethod::Direct,
        };
        Self {
            step_index,
            target_mg,
            method,
            daily_amount,
            daily_amount_unit: food_type.unit(),
            food,
        }
    }

    /// Diluted dose built from a search candidate; mixtures are always dosed in ml
    #[must_use]
    pub fn dilute(
        step_index: usize,
        target_mg: Decimal,
        candidate: &Candidate,
        food: FoodSlot,
    ) -> Self {
        Self {
            step_index,
            target_mg,
            method: DosingMethod::Dilute(Dilution {
                mix_food_amount: candidate.mix_food_amount,
                mix_water_amount: candidate.mix_water_amount,
                servings: candidate.servings,
            }),
            daily_amount: candidate.daily_amount,
            daily_amount_unit: MeasureUnit::Milliliters,
            food,
        }
    }

    /// Mixture recipe when the step is diluted
    #[must_use]
    pub const fn dilution(&self) -> Option<&Dilution> {
        match &self.method {
            DosingMethod::Dilute(dilution) => Some(dilution),
            DosingMethod::Direct | DosingMethod::Capsule => None,
        }
    }

    /// Whether the step is diluted
    #[must_use]
    pub const fn is_dilute(&self) -> bool {
        matches!(self.method, DosingMethod::Dilute(_))
    }

    /// Same step at a different position
    #[must_use]
    pub fn with_step_index(mut self, step_index: usize) -> Self {
        self.step_index = step_index;
        self
    }
}

/// Transient dilution search result, consumed by the step generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Food in the mixture (g or ml)
    pub mix_food_amount: Decimal,
    /// Water in the mixture (ml)
    pub mix_water_amount: Decimal,
    /// Mixture consumed per day (ml)
    pub daily_amount: Decimal,
    /// Total mixture volume (ml)
    pub mix_total_volume: Decimal,
    /// Daily doses per mixture
    pub servings: Decimal,
}

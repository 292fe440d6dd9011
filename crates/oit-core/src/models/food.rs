// ABOUTME: Food model describing protein concentration and physical form
// ABOUTME: FoodType, MeasureUnit, and Food with derived mg-per-unit concentration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::units;

/// Physical form of a food, which decides the unit and mixing model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodType {
    /// Weighed in grams; its volume is negligible when mixed into water
    Solid,
    /// Measured in millilitres; volumes add when mixed into water
    Liquid,
    /// Pre-weighed powder in capsules, measured in grams
    Capsule,
}

impl FoodType {
    /// Unit a neat amount of this food is measured in
    #[must_use]
    pub const fn unit(&self) -> MeasureUnit {
        match self {
            Self::Solid | Self::Capsule => MeasureUnit::Grams,
            Self::Liquid => MeasureUnit::Milliliters,
        }
    }

    /// Whether the food adds its own volume to a mixture
    #[must_use]
    pub const fn is_liquid(&self) -> bool {
        matches!(self, Self::Liquid)
    }

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Solid => "SOLID",
            Self::Liquid => "LIQUID",
            Self::Capsule => "CAPSULE",
        }
    }

    /// Parse from a case-insensitive name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "solid" => Some(Self::Solid),
            "liquid" => Some(Self::Liquid),
            "capsule" => Some(Self::Capsule),
            _ => None,
        }
    }
}

/// Measuring unit for daily and mixture amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureUnit {
    /// Mass in grams
    #[serde(rename = "g")]
    Grams,
    /// Volume in millilitres
    #[serde(rename = "ml")]
    Milliliters,
}

impl MeasureUnit {
    /// Get the abbreviation for display
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::Grams => units::GRAMS,
            Self::Milliliters => units::MILLILITERS,
        }
    }
}

/// A food used as a protein source in a protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    /// Display name
    pub name: String,
    /// Physical form
    #[serde(rename = "type")]
    pub food_type: FoodType,
    /// Grams of protein per serving
    pub grams_in_serving: Decimal,
    /// Serving size in grams or millilitres
    pub serving_size: Decimal,
}

impl Food {
    /// Create a food; values are not checked here, the validator reports bad ones
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        food_type: FoodType,
        grams_in_serving: Decimal,
        serving_size: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            food_type,
            grams_in_serving,
            serving_size,
        }
    }

    /// Protein concentration in mg per g (solid) or per ml (liquid)
    ///
    /// Zero when the serving size is zero or the concentration does not fit
    /// in a `Decimal`.
    #[must_use]
    pub fn mg_per_unit(&self) -> Decimal {
        self.grams_in_serving
            .checked_mul(units::MG_PER_GRAM)
            .and_then(|mg| mg.checked_div(self.serving_size))
            .or_else(|| {
                self.grams_in_serving
                    .checked_div(self.serving_size)?
                    .checked_mul(units::MG_PER_GRAM)
            })
            .unwrap_or(Decimal::ZERO)
    }

    /// Unit this food is measured in
    #[must_use]
    pub const fn unit(&self) -> MeasureUnit {
        self.food_type.unit()
    }

    /// Whether the concentration can be used for dosing math
    #[must_use]
    pub fn has_usable_concentration(&self) -> bool {
        self.serving_size > Decimal::ZERO && self.mg_per_unit() > Decimal::ZERO
    }

    /// Neat amount of food that contains `target_mg` of protein
    #[must_use]
    pub fn neat_amount_for(&self, target_mg: Decimal) -> Option<Decimal> {
        if !self.has_usable_concentration() {
            return None;
        }
        target_mg.checked_div(self.mg_per_unit())
    }

    /// Protein in `amount` of neat food, `None` on overflow
    #[must_use]
    pub fn protein_in(&self, amount: Decimal) -> Option<Decimal> {
        amount.checked_mul(self.mg_per_unit())
    }
}

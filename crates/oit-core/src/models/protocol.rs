// ABOUTME: Protocol model with dosing strategy, food strategy, foods, steps, and configuration
// ABOUTME: Protocols are values: every edit builds a new Protocol rather than mutating one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::food::Food;
use super::step::{FoodSlot, Step};
use crate::config::ProtocolConfig;
use crate::constants::strategies;

/// Target protein ladder used to build a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DosingStrategy {
    /// Standard escalation
    #[default]
    Standard,
    /// Slow escalation with smaller increments
    Slow,
    /// Rapid escalation with fewer steps
    Rapid,
}

impl DosingStrategy {
    /// Ordered target doses (mg)
    #[must_use]
    pub const fn targets(&self) -> &'static [Decimal] {
        match self {
            Self::Standard => strategies::STANDARD_TARGETS,
            Self::Slow => strategies::SLOW_TARGETS,
            Self::Rapid => strategies::RAPID_TARGETS,
        }
    }

    /// Parse from a case-insensitive name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "slow" => Some(Self::Slow),
            "rapid" => Some(Self::Rapid),
            _ => None,
        }
    }
}

/// When food A is diluted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodAStrategy {
    /// Dilute while the neat amount is below the dilution threshold
    #[default]
    DiluteInitial,
    /// Dilute every step
    DiluteAll,
    /// Never dilute
    DiluteNone,
}

impl FoodAStrategy {
    /// Parse from a case-insensitive name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "dilute_initial" | "initial" => Some(Self::DiluteInitial),
            "dilute_all" | "all" => Some(Self::DiluteAll),
            "dilute_none" | "none" => Some(Self::DiluteNone),
            _ => None,
        }
    }
}

/// A complete dosing protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    /// Target ladder the steps were built from
    pub dosing_strategy: DosingStrategy,
    /// Initial food
    pub food_a: Food,
    /// Dilution policy for food A
    pub food_a_strategy: FoodAStrategy,
    /// Neat amount below which food A is diluted (g or ml)
    pub di_threshold: Decimal,
    /// Optional maintenance food
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_b: Option<Food>,
    /// Neat food B amount at which food B takes over (g or ml)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_b_threshold: Option<Decimal>,
    /// Steps sorted by `step_index`, A steps before B steps
    pub steps: Vec<Step>,
    /// Limits the protocol was built with
    pub config: ProtocolConfig,
}

impl Protocol {
    /// Food used by a slot, if defined
    #[must_use]
    pub const fn food(&self, slot: FoodSlot) -> Option<&Food> {
        match slot {
            FoodSlot::A => Some(&self.food_a),
            FoodSlot::B => self.food_b.as_ref(),
        }
    }

    /// Step with the given 1-based index
    #[must_use]
    pub fn step(&self, step_index: usize) -> Option<&Step> {
        self.steps.iter().find(|step| step.step_index == step_index)
    }

    /// Ordered target doses (mg)
    #[must_use]
    pub fn targets(&self) -> Vec<Decimal> {
        self.steps.iter().map(|step| step.target_mg).collect()
    }

    /// Index (0-based) of the first food B step
    #[must_use]
    pub fn transition_position(&self) -> Option<usize> {
        self.steps.iter().position(|step| step.food == FoodSlot::B)
    }

    /// Same protocol with replaced steps, renumbered 1..=n
    #[must_use]
    pub fn with_steps(&self, steps: Vec<Step>) -> Self {
        Self {
            steps: renumber(steps),
            ..self.clone()
        }
    }
}

/// Assign contiguous 1-based indices in order
#[must_use]
pub fn renumber(steps: Vec<Step>) -> Vec<Step> {
    steps
        .into_iter()
        .enumerate()
        .map(|(position, step)| step.with_step_index(position + 1))
        .collect()
}

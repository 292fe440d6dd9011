// ABOUTME: Protocol configuration with defaults, environment overrides, and validation
// ABOUTME: Holds tolerances, measurement resolution, practicality limits, and search candidate lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! Protocol Configuration
//!
//! `ProtocolConfig` is loaded once at startup and never mutated afterwards.
//! Every `Protocol` carries its own copy so that validation of an imported
//! protocol uses the limits it was built with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

use super::error::ConfigError;
use crate::constants::{candidates, limits, thresholds, units};
use crate::models::{FoodType, MeasureUnit};

/// Global configuration singleton
static PROTOCOL_CONFIG: OnceLock<ProtocolConfig> = OnceLock::new();

/// Tunable constants for candidate search, step generation, and validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Smallest measurable mass (g)
    pub min_measurable_mass: Decimal,
    /// Smallest measurable volume (ml)
    pub min_measurable_volume: Decimal,
    /// Minimum daily doses a mixture batch must yield
    pub min_servings_for_mix: Decimal,
    /// Maximum relative protein error (0.05 = 5%)
    pub protein_tolerance: Decimal,
    /// Food A dilution threshold used by new protocols (g or ml)
    pub default_food_a_dilution_threshold: Decimal,
    /// Food B transition threshold used when none is given (g or ml)
    pub default_food_b_threshold: Decimal,
    /// Maximum solid w/v concentration in a mixture
    pub max_solid_concentration: Decimal,
    /// Maximum water volume in one mixture (ml)
    pub max_mix_water: Decimal,
    /// Maximum practical daily amount (g or ml)
    pub max_daily_amount: Decimal,
    /// Minimum viable number of steps
    pub min_steps: usize,
    /// Water snapping increment (ml)
    pub water_step: Decimal,
    /// Solid mix amounts tried by the dilution search (g)
    pub solid_mix_candidates: Vec<Decimal>,
    /// Liquid mix amounts tried by the dilution search (ml)
    pub liquid_mix_candidates: Vec<Decimal>,
    /// Daily mixture amounts tried by the dilution search (ml)
    pub daily_amount_candidates: Vec<Decimal>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            min_measurable_mass: limits::MIN_MEASURABLE_MASS,
            min_measurable_volume: limits::MIN_MEASURABLE_VOLUME,
            min_servings_for_mix: limits::MIN_SERVINGS_FOR_MIX,
            protein_tolerance: limits::PROTEIN_TOLERANCE,
            default_food_a_dilution_threshold: thresholds::DEFAULT_FOOD_A_DILUTION_THRESHOLD,
            default_food_b_threshold: thresholds::DEFAULT_FOOD_B_THRESHOLD,
            max_solid_concentration: limits::MAX_SOLID_CONCENTRATION,
            max_mix_water: limits::MAX_MIX_WATER,
            max_daily_amount: limits::MAX_DAILY_AMOUNT,
            min_steps: limits::MIN_STEPS,
            water_step: units::WATER_STEP_ML,
            solid_mix_candidates: candidates::SOLID_MIX_CANDIDATES.to_vec(),
            liquid_mix_candidates: candidates::LIQUID_MIX_CANDIDATES.to_vec(),
            daily_amount_candidates: candidates::DAILY_AMOUNT_CANDIDATES.to_vec(),
        }
    }
}

impl ProtocolConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        PROTOCOL_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load protocol config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Return a copy with a different protein tolerance
    #[must_use]
    pub fn with_protein_tolerance(mut self, tolerance: Decimal) -> Self {
        self.protein_tolerance = tolerance;
        self
    }

    /// Mix amounts searched for a food of this type
    #[must_use]
    pub fn mix_candidates_for(&self, food_type: FoodType) -> &[Decimal] {
        match food_type {
            FoodType::Solid => &self.solid_mix_candidates,
            FoodType::Liquid | FoodType::Capsule => &self.liquid_mix_candidates,
        }
    }

    /// Smallest measurable quantity in the given unit
    #[must_use]
    pub const fn min_measurable(&self, unit: MeasureUnit) -> Decimal {
        match unit {
            MeasureUnit::Grams => self.min_measurable_mass,
            MeasureUnit::Milliliters => self.min_measurable_volume,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when a limit is non-positive, a ratio falls outside
    /// (0, 1], or a candidate list is empty or not strictly ascending
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            (self.min_measurable_mass, "min_measurable_mass must be > 0"),
            (self.min_measurable_volume, "min_measurable_volume must be > 0"),
            (self.min_servings_for_mix, "min_servings_for_mix must be > 0"),
            (
                self.default_food_a_dilution_threshold,
                "default_food_a_dilution_threshold must be > 0",
            ),
            (
                self.default_food_b_threshold,
                "default_food_b_threshold must be > 0",
            ),
            (self.max_mix_water, "max_mix_water must be > 0"),
            (self.max_daily_amount, "max_daily_amount must be > 0"),
            (self.water_step, "water_step must be > 0"),
        ];
        for (value, message) in positive {
            if value <= Decimal::ZERO {
                return Err(ConfigError::ValueOutOfRange(message));
            }
        }

        if self.protein_tolerance <= Decimal::ZERO || self.protein_tolerance >= Decimal::ONE {
            return Err(ConfigError::InvalidRange(
                "protein_tolerance must be between 0 and 1 (exclusive)",
            ));
        }
        if self.max_solid_concentration <= Decimal::ZERO
            || self.max_solid_concentration > Decimal::ONE
        {
            return Err(ConfigError::InvalidRange(
                "max_solid_concentration must be in (0, 1]",
            ));
        }
        if self.min_measurable_volume > self.max_mix_water {
            return Err(ConfigError::InvalidRange(
                "min_measurable_volume must be <= max_mix_water",
            ));
        }
        if self.min_steps == 0 {
            return Err(ConfigError::ValueOutOfRange("min_steps must be >= 1"));
        }

        validate_candidates(&self.solid_mix_candidates, "solid_mix_candidates")?;
        validate_candidates(&self.liquid_mix_candidates, "liquid_mix_candidates")?;
        validate_candidates(&self.daily_amount_candidates, "daily_amount_candidates")?;
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("OIT_PROTEIN_TOLERANCE", &mut self.protein_tolerance)?;
        Self::apply_env_var("OIT_MIN_MEASURABLE_MASS", &mut self.min_measurable_mass)?;
        Self::apply_env_var("OIT_MIN_MEASURABLE_VOLUME", &mut self.min_measurable_volume)?;
        Self::apply_env_var("OIT_MIN_SERVINGS_FOR_MIX", &mut self.min_servings_for_mix)?;
        Self::apply_env_var(
            "OIT_FOOD_A_DILUTION_THRESHOLD",
            &mut self.default_food_a_dilution_threshold,
        )?;
        Self::apply_env_var("OIT_FOOD_B_THRESHOLD", &mut self.default_food_b_threshold)?;
        Self::apply_env_var(
            "OIT_MAX_SOLID_CONCENTRATION",
            &mut self.max_solid_concentration,
        )?;
        Self::apply_env_var("OIT_MAX_MIX_WATER", &mut self.max_mix_water)?;
        Self::apply_env_var("OIT_MAX_DAILY_AMOUNT", &mut self.max_daily_amount)?;
        Self::apply_env_var("OIT_MIN_STEPS", &mut self.min_steps)?;
        Ok(self)
    }
}

fn validate_candidates(values: &[Decimal], name: &'static str) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::InvalidCandidates(name));
    }
    if values.iter().any(|value| *value <= Decimal::ZERO) {
        return Err(ConfigError::InvalidCandidates(name));
    }
    if values.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ConfigError::InvalidCandidates(name));
    }
    Ok(())
}

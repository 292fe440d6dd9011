// ABOUTME: Validation warning model with severity and rule codes
// ABOUTME: Warnings are derived from a Protocol on demand and never stored in it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocking: the protocol must not be used as-is
    Red,
    /// Cautionary: review before use
    Yellow,
}

/// Validation rule that produced a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// Fewer steps than the configured minimum
    TooFewSteps,
    /// Declared amounts do not deliver the target protein
    ProteinMismatch,
    /// The food in a mixture holds less protein than one dose
    InsufficientMixProtein,
    /// Daily amount exceeds what the mixture provides
    ImpossibleVolume,
    /// Food concentration is zero, negative, or exceeds the serving
    InvalidConcentration,
    /// Target dose is not positive
    InvalidTarget,
    /// A dilution field is zero or negative
    InvalidDilutionStepValues,
    /// Mixture yields fewer servings than configured
    LowServings,
    /// Targets do not strictly increase within a food
    NonAscendingSteps,
    /// A measured quantity is below measurable resolution
    BelowResolution,
    /// Solid mixture is too concentrated
    HighSolidConcentration,
    /// Food B is defined but never used
    NoTransitionPoint,
    /// Adjacent steps repeat a target on the same food
    DuplicateStep,
    /// Daily amount is impractically large
    HighDailyAmount,
    /// Mixture water is impractically large
    HighMixWater,
    /// Target more than doubles from the previous step
    RapidEscalation,
}

impl WarningCode {
    /// Severity assigned to this rule
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::TooFewSteps
            | Self::ProteinMismatch
            | Self::InsufficientMixProtein
            | Self::ImpossibleVolume
            | Self::InvalidConcentration
            | Self::InvalidTarget
            | Self::InvalidDilutionStepValues => Severity::Red,
            Self::LowServings
            | Self::NonAscendingSteps
            | Self::BelowResolution
            | Self::HighSolidConcentration
            | Self::NoTransitionPoint
            | Self::DuplicateStep
            | Self::HighDailyAmount
            | Self::HighMixWater
            | Self::RapidEscalation => Severity::Yellow,
        }
    }

    /// Wire name of the rule
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TooFewSteps => "TOO_FEW_STEPS",
            Self::ProteinMismatch => "PROTEIN_MISMATCH",
            Self::InsufficientMixProtein => "INSUFFICIENT_MIX_PROTEIN",
            Self::ImpossibleVolume => "IMPOSSIBLE_VOLUME",
            Self::InvalidConcentration => "INVALID_CONCENTRATION",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::InvalidDilutionStepValues => "INVALID_DILUTION_STEP_VALUES",
            Self::LowServings => "LOW_SERVINGS",
            Self::NonAscendingSteps => "NON_ASCENDING_STEPS",
            Self::BelowResolution => "BELOW_RESOLUTION",
            Self::HighSolidConcentration => "HIGH_SOLID_CONCENTRATION",
            Self::NoTransitionPoint => "NO_TRANSITION_POINT",
            Self::DuplicateStep => "DUPLICATE_STEP",
            Self::HighDailyAmount => "HIGH_DAILY_AMOUNT",
            Self::HighMixWater => "HIGH_MIX_WATER",
            Self::RapidEscalation => "RAPID_ESCALATION",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Red or yellow
    pub severity: Severity,
    /// Rule that fired
    pub code: WarningCode,
    /// Human-readable explanation
    pub message: String,
    /// Step the finding applies to; absent for protocol-wide rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_index: Option<usize>,
}

impl Warning {
    /// Protocol-wide warning
    #[must_use]
    pub fn global(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            step_index: None,
        }
    }

    /// Warning scoped to one step
    #[must_use]
    pub fn for_step(code: WarningCode, step_index: usize, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            step_index: Some(step_index),
        }
    }

    /// Whether this warning blocks use of the protocol
    #[must_use]
    pub const fn is_red(&self) -> bool {
        matches!(self.severity, Severity::Red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_code() {
        let red = Warning::global(WarningCode::TooFewSteps, "only 2 steps");
        let yellow = Warning::for_step(WarningCode::RapidEscalation, 3, "jump");
        assert!(red.is_red());
        assert_eq!(yellow.severity, Severity::Yellow);
        assert_eq!(yellow.step_index, Some(3));
    }

    #[test]
    fn test_warning_serializes_wire_names() {
        let warning = Warning::global(WarningCode::NoTransitionPoint, "unused food B");
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["severity"], "yellow");
        assert_eq!(json["code"], "NO_TRANSITION_POINT");
        assert!(json.get("step_index").is_none());
    }
}

// ABOUTME: Protocol summary with step counts by method and food and warning counts by severity
// ABOUTME: Decides whether a protocol is exportable, which requires no red warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use serde::{Deserialize, Serialize};

use crate::models::{DosingMethod, FoodSlot, Protocol, Severity, Warning};
use crate::validator::validate_protocol;
use crate::Decimal;

/// Counts describing a protocol and its validation outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSummary {
    /// Total steps
    pub total_steps: usize,
    /// Neat steps
    pub direct_steps: usize,
    /// Diluted steps
    pub dilute_steps: usize,
    /// Capsule steps
    pub capsule_steps: usize,
    /// Steps on food A
    pub food_a_steps: usize,
    /// Steps on food B
    pub food_b_steps: usize,
    /// First target dose (mg)
    pub first_target_mg: Option<Decimal>,
    /// Final target dose (mg)
    pub final_target_mg: Option<Decimal>,
    /// Blocking findings
    pub red_warnings: usize,
    /// Cautionary findings
    pub yellow_warnings: usize,
}

impl ProtocolSummary {
    /// Summarize a protocol against already computed warnings
    #[must_use]
    pub fn new(protocol: &Protocol, warnings: &[Warning]) -> Self {
        let steps = &protocol.steps;
        let count_method = |predicate: fn(&DosingMethod) -> bool| {
            steps.iter().filter(|step| predicate(&step.method)).count()
        };
        let count_severity = |severity: Severity| {
            warnings
                .iter()
                .filter(|warning| warning.severity == severity)
                .count()
        };
        let food_b_steps = steps
            .iter()
            .filter(|step| step.food == FoodSlot::B)
            .count();

        Self {
            total_steps: steps.len(),
            direct_steps: count_method(|method| matches!(method, DosingMethod::Direct)),
            dilute_steps: count_method(|method| matches!(method, DosingMethod::Dilute(_))),
            capsule_steps: count_method(|method| matches!(method, DosingMethod::Capsule)),
            food_a_steps: steps.len() - food_b_steps,
            food_b_steps,
            first_target_mg: steps.first().map(|step| step.target_mg),
            final_target_mg: steps.last().map(|step| step.target_mg),
            red_warnings: count_severity(Severity::Red),
            yellow_warnings: count_severity(Severity::Yellow),
        }
    }

    /// Validate and summarize in one call
    #[must_use]
    pub fn for_protocol(protocol: &Protocol) -> Self {
        Self::new(protocol, &validate_protocol(protocol))
    }

    /// Whether the protocol may be exported (no red warnings)
    #[must_use]
    pub const fn is_exportable(&self) -> bool {
        self.red_warnings == 0
    }
}

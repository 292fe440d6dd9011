// ABOUTME: Adjacent-step validation rules for ordering, duplicates, and escalation rate
// ABOUTME: Ordering and duplicate rules apply within one food; escalation spans the food switch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use oit_core::constants::thresholds::{RAPID_ESCALATION_EXEMPT_MG, RAPID_ESCALATION_FACTOR};
use oit_core::models::{Step, Warning, WarningCode};
use oit_core::numeric::format_mg;
use rust_decimal::Decimal;

pub(super) fn check_pair(previous: &Step, current: &Step, warnings: &mut Vec<Warning>) {
    let index = current.step_index;

    if previous.food == current.food {
        if current.target_mg <= previous.target_mg {
            warnings.push(Warning::for_step(
                WarningCode::NonAscendingSteps,
                index,
                format!(
                    "Step {index}: target {} does not increase from step {} ({})",
                    format_mg(current.target_mg),
                    previous.step_index,
                    format_mg(previous.target_mg)
                ),
            ));
        }
        if current.target_mg == previous.target_mg {
            warnings.push(Warning::for_step(
                WarningCode::DuplicateStep,
                index,
                format!(
                    "Step {index} repeats the {} target of step {}",
                    format_mg(current.target_mg),
                    previous.step_index
                ),
            ));
        }
    }

    if is_rapid_escalation(previous.target_mg, current.target_mg) {
        warnings.push(Warning::for_step(
            WarningCode::RapidEscalation,
            index,
            format!(
                "Step {index}: {} is more than double the previous {}",
                format_mg(current.target_mg),
                format_mg(previous.target_mg)
            ),
        ));
    }
}

/// Whether a dose more than doubles, ignoring jumps between small doses
fn is_rapid_escalation(previous_mg: Decimal, current_mg: Decimal) -> bool {
    if previous_mg <= Decimal::ZERO {
        return false;
    }
    if previous_mg <= RAPID_ESCALATION_EXEMPT_MG && current_mg <= RAPID_ESCALATION_EXEMPT_MG {
        return false;
    }
    previous_mg
        .checked_mul(RAPID_ESCALATION_FACTOR)
        .is_some_and(|limit| current_mg > limit)
}

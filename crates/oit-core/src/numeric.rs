// ABOUTME: Decimal arithmetic helpers for relative error, increment snapping, and display rounding
// ABOUTME: All protein and volume math flows through these to avoid binary floating-point drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! Numeric utilities
//!
//! `rust_decimal` carries a fixed 96-bit mantissa (28 significant digits), so
//! there is no process-wide precision or rounding mode to configure. Every
//! helper here is pure.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::units;
use crate::models::MeasureUnit;

/// Direction used when snapping a value to an increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapMode {
    /// Largest multiple not above the value
    Floor,
    /// Smallest multiple not below the value
    Ceil,
    /// Closest multiple, halves away from zero
    Nearest,
}

/// Relative difference `|actual / expected - 1|`
///
/// Returns `None` when `expected` is zero or the ratio overflows.
#[must_use]
pub fn relative_difference(actual: Decimal, expected: Decimal) -> Option<Decimal> {
    actual
        .checked_div(expected)?
        .checked_sub(Decimal::ONE)
        .map(|diff| diff.abs())
}

/// Whether `actual` is within `tolerance` (relative) of `expected`
///
/// A zero `expected` is never within tolerance.
#[must_use]
pub fn within_tolerance(actual: Decimal, expected: Decimal, tolerance: Decimal) -> bool {
    relative_difference(actual, expected).is_some_and(|diff| diff <= tolerance)
}

/// Relative difference expressed in percent, for messages
#[must_use]
pub fn percent_difference(actual: Decimal, expected: Decimal) -> Option<Decimal> {
    relative_difference(actual, expected)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|percent| percent.round_dp(1))
}

/// Snap `value` to a multiple of `step`
///
/// A non-positive `step`, or a value too large to snap, is returned unchanged.
#[must_use]
pub fn snap_to_increment(value: Decimal, step: Decimal, mode: SnapMode) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    let Some(units) = value.checked_div(step) else {
        return value;
    };
    let snapped = match mode {
        SnapMode::Floor => units.floor(),
        SnapMode::Ceil => units.ceil(),
        SnapMode::Nearest => {
            units.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
    };
    snapped
        .checked_mul(step)
        .map_or(value, |snapped| snapped.normalize())
}

/// Floor and ceil snaps of `value`, deduplicated when they coincide
#[must_use]
pub fn floor_ceil_snaps(value: Decimal, step: Decimal) -> Vec<Decimal> {
    let floor = snap_to_increment(value, step, SnapMode::Floor);
    let ceil = snap_to_increment(value, step, SnapMode::Ceil);
    if floor == ceil {
        vec![floor]
    } else {
        vec![floor, ceil]
    }
}

/// Decimal places shown for quantities in this unit
#[must_use]
pub const fn display_dp(unit: MeasureUnit) -> u32 {
    match unit {
        MeasureUnit::Grams => units::MASS_DISPLAY_DP,
        MeasureUnit::Milliliters => units::VOLUME_DISPLAY_DP,
    }
}

/// Round a quantity to what the user sees on screen
#[must_use]
pub fn round_for_display(value: Decimal, unit: MeasureUnit) -> Decimal {
    value
        .round_dp_with_strategy(display_dp(unit), RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Increment used when rounding a neat dose
#[must_use]
pub const fn direct_increment(unit: MeasureUnit) -> Decimal {
    match unit {
        MeasureUnit::Grams => units::MASS_DIRECT_INCREMENT,
        MeasureUnit::Milliliters => units::VOLUME_DIRECT_INCREMENT,
    }
}

/// Format a quantity with its unit, e.g. `"0.25 g"` or `"12.5 ml"`
#[must_use]
pub fn format_amount(value: Decimal, unit: MeasureUnit) -> String {
    format!("{} {}", round_for_display(value, unit), unit.abbreviation())
}

/// Format a protein mass in mg
#[must_use]
pub fn format_mg(value: Decimal) -> String {
    format!("{} mg", value.round_dp(2).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_relative_difference() {
        assert_eq!(relative_difference(dec!(10.5), dec!(10)), Some(dec!(0.05)));
        assert_eq!(relative_difference(dec!(9.5), dec!(10)), Some(dec!(0.05)));
        assert_eq!(relative_difference(dec!(1), Decimal::ZERO), None);
    }

    #[test]
    fn test_within_tolerance_is_inclusive() {
        assert!(within_tolerance(dec!(10.5), dec!(10), dec!(0.05)));
        assert!(!within_tolerance(dec!(10.51), dec!(10), dec!(0.05)));
        assert!(!within_tolerance(dec!(1), Decimal::ZERO, dec!(0.05)));
    }

    #[test]
    fn test_snap_modes() {
        let step = dec!(0.5);
        assert_eq!(snap_to_increment(dec!(33.33), step, SnapMode::Floor), dec!(33));
        assert_eq!(snap_to_increment(dec!(33.33), step, SnapMode::Ceil), dec!(33.5));
        assert_eq!(snap_to_increment(dec!(33.25), step, SnapMode::Nearest), dec!(33.5));
        assert_eq!(snap_to_increment(dec!(7), Decimal::ZERO, SnapMode::Floor), dec!(7));
        assert_eq!(
            snap_to_increment(Decimal::MAX, step, SnapMode::Ceil),
            Decimal::MAX
        );
    }

    #[test]
    fn test_floor_ceil_snaps_dedupe_aligned_values() {
        assert_eq!(floor_ceil_snaps(dec!(12.5), dec!(0.5)), vec![dec!(12.5)]);
        assert_eq!(
            floor_ceil_snaps(dec!(12.7), dec!(0.5)),
            vec![dec!(12.5), dec!(13)]
        );
    }

    #[test]
    fn test_format_amount_uses_unit_precision() {
        assert_eq!(format_amount(dec!(0.254), MeasureUnit::Grams), "0.25 g");
        assert_eq!(format_amount(dec!(12.46), MeasureUnit::Milliliters), "12.5 ml");
        assert_eq!(format_mg(dec!(2.50)), "2.5 mg");
    }
}

// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Default measurement limits, candidate lists, and dosing strategy target ladders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large list. Every value here seeds `ProtocolConfig::default()` and can be
//! overridden through the environment at startup.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Measurement units and display resolution
pub mod units {
    use super::{dec, Decimal};

    /// Mass unit label
    pub const GRAMS: &str = "g";
    /// Volume unit label
    pub const MILLILITERS: &str = "ml";

    /// Water amounts are snapped to this increment (ml)
    pub const WATER_STEP_ML: Decimal = dec!(0.5);

    /// Displayed decimal places for masses
    pub const MASS_DISPLAY_DP: u32 = 2;
    /// Displayed decimal places for volumes
    pub const VOLUME_DISPLAY_DP: u32 = 1;

    /// Neat solid doses are rounded to this increment (g)
    pub const MASS_DIRECT_INCREMENT: Decimal = dec!(0.05);
    /// Neat liquid doses are rounded to this increment (ml)
    pub const VOLUME_DIRECT_INCREMENT: Decimal = dec!(0.1);

    /// Milligrams per gram
    pub const MG_PER_GRAM: Decimal = dec!(1000);
}

/// Measurement resolution and practicality limits
pub mod limits {
    use super::{dec, Decimal};

    /// Smallest mass a kitchen scale reliably measures (g)
    pub const MIN_MEASURABLE_MASS: Decimal = dec!(0.2);
    /// Smallest volume an oral syringe reliably measures (ml)
    pub const MIN_MEASURABLE_VOLUME: Decimal = dec!(0.2);
    /// A prepared mixture must yield at least this many daily doses
    pub const MIN_SERVINGS_FOR_MIX: Decimal = dec!(3);
    /// Maximum relative deviation between target and delivered protein
    pub const PROTEIN_TOLERANCE: Decimal = dec!(0.05);
    /// Maximum solid weight-to-volume ratio in a mixture
    pub const MAX_SOLID_CONCENTRATION: Decimal = dec!(0.05);
    /// Largest water volume in a single mixture (ml)
    pub const MAX_MIX_WATER: Decimal = dec!(500);
    /// Largest practical daily amount (g or ml)
    pub const MAX_DAILY_AMOUNT: Decimal = dec!(250);
    /// Fewest steps a protocol should have
    pub const MIN_STEPS: usize = 5;
}

/// Food thresholds
pub mod thresholds {
    use super::{dec, Decimal};

    /// Food A is diluted while its neat amount is below this (g or ml)
    pub const DEFAULT_FOOD_A_DILUTION_THRESHOLD: Decimal = dec!(0.2);
    /// Food B takes over once its neat amount reaches this (g or ml)
    pub const DEFAULT_FOOD_B_THRESHOLD: Decimal = dec!(0.2);
    /// Relative jumps are ignored while both doses are at or below this (mg)
    pub const RAPID_ESCALATION_EXEMPT_MG: Decimal = dec!(5);
    /// Maximum step-to-step multiplier before escalation is flagged
    pub const RAPID_ESCALATION_FACTOR: Decimal = dec!(2);
}

/// Candidate lists driving the dilution search
pub mod candidates {
    use super::{dec, Decimal};

    /// Solid food amounts to try in a mixture (g)
    pub const SOLID_MIX_CANDIDATES: &[Decimal] = &[
        dec!(0.2),
        dec!(0.25),
        dec!(0.3),
        dec!(0.4),
        dec!(0.5),
        dec!(0.6),
        dec!(0.75),
        dec!(0.8),
        dec!(1),
        dec!(1.5),
        dec!(2),
        dec!(2.5),
        dec!(3),
        dec!(4),
        dec!(5),
        dec!(10),
    ];

    /// Liquid food amounts to try in a mixture (ml)
    pub const LIQUID_MIX_CANDIDATES: &[Decimal] = &[
        dec!(0.2),
        dec!(0.3),
        dec!(0.4),
        dec!(0.5),
        dec!(0.6),
        dec!(0.8),
        dec!(1),
        dec!(1.5),
        dec!(2),
        dec!(3),
        dec!(4),
        dec!(5),
        dec!(6),
        dec!(8),
        dec!(10),
        dec!(15),
        dec!(20),
    ];

    /// Daily amounts of mixture to try (ml)
    pub const DAILY_AMOUNT_CANDIDATES: &[Decimal] = &[
        dec!(0.2),
        dec!(0.3),
        dec!(0.4),
        dec!(0.5),
        dec!(0.6),
        dec!(0.8),
        dec!(1),
        dec!(1.5),
        dec!(2),
        dec!(2.5),
        dec!(3),
        dec!(4),
        dec!(5),
        dec!(6),
        dec!(7),
        dec!(8),
        dec!(9),
        dec!(10),
        dec!(12),
        dec!(15),
        dec!(20),
    ];
}

/// Target protein ladders (mg) for each dosing strategy
pub mod strategies {
    use super::{dec, Decimal};

    /// Standard escalation
    pub const STANDARD_TARGETS: &[Decimal] = &[
        dec!(1),
        dec!(2.5),
        dec!(5),
        dec!(10),
        dec!(20),
        dec!(40),
        dec!(80),
        dec!(120),
        dec!(160),
        dec!(240),
        dec!(300),
    ];

    /// Slow escalation with smaller increments
    pub const SLOW_TARGETS: &[Decimal] = &[
        dec!(0.5),
        dec!(1),
        dec!(1.5),
        dec!(2.5),
        dec!(5),
        dec!(10),
        dec!(15),
        dec!(20),
        dec!(30),
        dec!(40),
        dec!(60),
        dec!(80),
        dec!(100),
        dec!(120),
        dec!(140),
        dec!(160),
        dec!(200),
        dec!(240),
        dec!(300),
    ];

    /// Rapid escalation with fewer steps
    pub const RAPID_TARGETS: &[Decimal] = &[
        dec!(1),
        dec!(2.5),
        dec!(5),
        dec!(10),
        dec!(20),
        dec!(40),
        dec!(80),
        dec!(160),
        dec!(300),
    ];
}

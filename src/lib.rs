// ABOUTME: Main library entry point for the OIT dosing calculator
// ABOUTME: Re-exports the core and engine crates and adds logging, food import, and protocol summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

#![deny(unsafe_code)]

//! # OIT Calculator
//!
//! Dosing math for oral immunotherapy protocols: given a food's protein
//! content, build an escalation ladder of daily doses, choose between neat and
//! diluted dosing, snap amounts to what can be measured at home, and report
//! anything unsafe or impractical.
//!
//! ## Architecture
//!
//! - **`oit-core`**: errors, constants, configuration, decimal helpers, models
//! - **`oit-engine`**: dilution search, step generation, rounding, validation,
//!   editing, undo history
//! - this crate: logging setup, food/protocol JSON import, summaries, and the
//!   `oit-cli` binary
//!
//! ## Example Usage
//!
//! ```rust
//! use oit_calculator::config::ProtocolConfig;
//! use oit_calculator::models::{Food, FoodType};
//! use oit_calculator::{dec, generate_default_protocol, validate_protocol};
//!
//! let food = Food::new("Peanut flour", FoodType::Solid, dec!(50), dec!(100));
//! let protocol = generate_default_protocol(&food, &ProtocolConfig::default());
//! let warnings = validate_protocol(&protocol);
//! assert_eq!(protocol.steps.len(), 11);
//! assert!(warnings.iter().all(|warning| !warning.is_red()));
//! ```

// ── Re-exported workspace crates ────────────────────────────────────────

pub use oit_core::{config, constants, errors, models, numeric};
pub use oit_core::{dec, Decimal};

pub use oit_engine::{dilution, editor, history, rounding, step_generator, validator};
pub use oit_engine::{
    calculate_dilution_actual_protein, calculate_direct_actual_protein,
    check_candidate_validity, find_dilution_candidates, find_rounded_mix_water_amount,
    generate_default_protocol, generate_step_for_target, validate_protocol, ProtocolHistory,
};

// ── Boundary layers ─────────────────────────────────────────────────────

/// Food database records and protocol JSON import/export
pub mod import;

/// Structured logging configuration
pub mod logging;

/// Step and warning counts for a protocol
pub mod summary;

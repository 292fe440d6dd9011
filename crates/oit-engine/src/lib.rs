// ABOUTME: Dosing calculation engine for the OIT calculator
// ABOUTME: Dilution search, step generation, rounding, validation, editing, and undo history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

#![deny(unsafe_code)]

//! # OIT Engine
//!
//! Pure calculation layer on top of `oit-core`. Nothing here performs IO;
//! every operation takes values and returns new values.
//!
//! ## Pipeline
//!
//! 1. [`dilution::find_dilution_candidates`] searches food/water/daily-amount
//!    combinations for a target dose
//! 2. [`step_generator`] turns targets into steps, choosing neat or diluted dosing
//! 3. [`rounding`] snaps amounts to values a caregiver can measure
//! 4. [`validator::validate_protocol`] reports red and yellow findings
//! 5. [`editor`] applies user edits, [`history`] keeps undo/redo snapshots

/// Dilution candidate search and ranking
pub mod dilution;

/// Target ladder to step conversion
pub mod step_generator;

/// Measurement rounding heuristics
pub mod rounding;

/// Protocol safety and practicality rules
pub mod validator;

/// Immutable protocol edits
pub mod editor;

/// Bounded undo/redo snapshots
pub mod history;

pub use dilution::{check_candidate_validity, find_dilution_candidates};
pub use history::ProtocolHistory;
pub use rounding::{
    calculate_dilution_actual_protein, calculate_direct_actual_protein,
    find_rounded_mix_water_amount,
};
pub use step_generator::{generate_default_protocol, generate_step_for_target};
pub use validator::validate_protocol;

// ABOUTME: Core data models for the OIT dosing calculator
// ABOUTME: Re-exports Food, Step, Candidate, Protocol, and Warning types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! # Data Models
//!
//! All models are plain values. Calculator functions build new values rather
//! than mutating existing ones, which keeps protocol history snapshots cheap
//! to compare.

mod food;
mod protocol;
mod step;
mod warning;

pub use food::{Food, FoodType, MeasureUnit};
pub use protocol::{renumber, DosingStrategy, FoodAStrategy, Protocol};
pub use step::{mix_total_volume, Candidate, Dilution, DosingMethod, FoodSlot, Step};
pub use warning::{Severity, Warning, WarningCode};

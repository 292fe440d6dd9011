// ABOUTME: Core types and constants for the OIT dosing calculator
// ABOUTME: Foundation crate with error handling, configuration, numeric helpers, and data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

#![deny(unsafe_code)]

//! # OIT Core
//!
//! Foundation crate providing shared types and constants for the oral
//! immunotherapy dosing calculator. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Default thresholds, candidate lists, and dosing strategy targets
//! - **config**: `ProtocolConfig` with environment overrides and validation
//! - **numeric**: Decimal helpers for relative error, snapping, and display rounding
//! - **models**: `Food`, `Step`, `Protocol`, `Warning`, and `Candidate`

/// Unified error handling system with standard error codes
pub mod errors;

/// Protocol constants organized by domain
pub mod constants;

/// Protocol configuration (tolerances, resolutions, candidate lists)
pub mod config;

/// Decimal arithmetic helpers shared by the engine and validator
pub mod numeric;

/// Core data models (Food, Step, Protocol, Warning)
pub mod models;

pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

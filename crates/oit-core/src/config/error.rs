// ABOUTME: Configuration error types for protocol configuration validation
// ABOUTME: Defines error variants for invalid ranges, parse failures, and empty candidate lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

//! Configuration error types for protocol configuration validation.

use std::env;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., tolerance not between 0 and 1)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment variable access error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// A candidate list is empty or not strictly ascending
    #[error("Invalid candidate list: {0}")]
    InvalidCandidates(&'static str),
}

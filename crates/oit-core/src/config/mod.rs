// ABOUTME: Configuration module for the OIT core crate
// ABOUTME: Re-exports protocol configuration types and configuration errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

/// Configuration error types
pub mod error;
/// Protocol tunables (tolerances, resolutions, candidate lists)
pub mod protocol;

pub use error::ConfigError;
pub use protocol::ProtocolConfig;

// ABOUTME: Re-exports command modules for oit-cli
// ABOUTME: Provides protocol generation, candidate listing, and validation commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

pub mod candidates;
pub mod generate;
pub mod validate;

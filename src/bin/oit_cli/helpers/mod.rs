// ABOUTME: Re-exports helper modules for oit-cli
// ABOUTME: Provides food resolution and display formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

pub mod display;
pub mod food;

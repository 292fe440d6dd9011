// ABOUTME: Validate command - checks a saved protocol for red and yellow findings
// ABOUTME: Exits with status 1 when any red warning would block export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use oit_calculator::import::load_protocol;
use oit_calculator::logging::ProtocolLogger;
use oit_calculator::summary::ProtocolSummary;
use oit_calculator::validate_protocol;
use serde_json::json;

use crate::helpers::display::{display_protocol, display_summary, display_warnings};

pub fn run(path: &Path, json: bool) -> Result<ExitCode> {
    let protocol = load_protocol(path)?;
    ProtocolLogger::log_protocol("file", &protocol);

    let warnings = validate_protocol(&protocol);
    ProtocolLogger::log_validation(&protocol, &warnings);
    let summary = ProtocolSummary::new(&protocol, &warnings);

    if json {
        let output = json!({
            "summary": summary,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        display_protocol(&protocol);
        display_warnings(&warnings);
        display_summary(&summary);
    }

    if summary.is_exportable() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

// ABOUTME: Output formatting helpers for oit-cli
// ABOUTME: Prints protocol step tables, dilution recipes, warnings, and summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use oit_calculator::models::{
    Candidate, DosingMethod, Food, MeasureUnit, Protocol, Severity, Step, Warning,
};
use oit_calculator::numeric::{format_amount, format_mg};
use oit_calculator::summary::ProtocolSummary;
use oit_calculator::Decimal;

const RULE_WIDTH: usize = 86;

fn describe_food(food: &Food) -> String {
    format!(
        "{} ({}, {} mg protein per {})",
        food.name,
        food.food_type.as_str(),
        food.mg_per_unit().round_dp(1).normalize(),
        food.unit().abbreviation()
    )
}

/// Print a protocol header and its step table
pub fn display_protocol(protocol: &Protocol) {
    println!("\nProtocol: {:?} escalation", protocol.dosing_strategy);
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("   Food A: {}", describe_food(&protocol.food_a));
    println!(
        "   Food A strategy: {:?} (threshold {})",
        protocol.food_a_strategy,
        format_amount(protocol.di_threshold, protocol.food_a.unit())
    );
    if let Some(food_b) = &protocol.food_b {
        println!("   Food B: {}", describe_food(food_b));
        if let Some(threshold) = protocol.food_b_threshold {
            println!(
                "   Food B threshold: {}",
                format_amount(threshold, food_b.unit())
            );
        }
    }

    println!(
        "\n{:>4}  {:<4}  {:>10}  {:<8}  {:>10}  {:>10}  {:>10}  {:>8}",
        "Step", "Food", "Target", "Method", "Daily", "Mix food", "Water", "Servings"
    );
    println!("{}", "-".repeat(RULE_WIDTH));
    for step in &protocol.steps {
        display_step(protocol, step);
    }
}

fn display_step(protocol: &Protocol, step: &Step) {
    let food_unit = protocol
        .food(step.food)
        .map_or(MeasureUnit::Grams, Food::unit);
    let (mix_food, water, servings) = match &step.method {
        DosingMethod::Dilute(dilution) => (
            format_amount(dilution.mix_food_amount, food_unit),
            format_amount(dilution.mix_water_amount, MeasureUnit::Milliliters),
            dilution.servings.round_dp(1).normalize().to_string(),
        ),
        DosingMethod::Direct | DosingMethod::Capsule => {
            ("-".to_owned(), "-".to_owned(), "-".to_owned())
        }
    };
    println!(
        "{:>4}  {:<4}  {:>10}  {:<8}  {:>10}  {:>10}  {:>10}  {:>8}",
        step.step_index,
        format!("{:?}", step.food),
        format_mg(step.target_mg),
        step.method.as_str(),
        format_amount(step.daily_amount, step.daily_amount_unit),
        mix_food,
        water,
        servings
    );
}

/// Print validation findings, red first
pub fn display_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        println!("\nNo warnings.");
        return;
    }

    let mut sorted: Vec<&Warning> = warnings.iter().collect();
    sorted.sort_by_key(|warning| (warning.severity, warning.step_index));

    println!("\nWarnings:");
    for warning in sorted {
        let marker = match warning.severity {
            Severity::Red => "RED   ",
            Severity::Yellow => "YELLOW",
        };
        println!("   [{marker}] {:<28} {}", warning.code.as_str(), warning.message);
    }
}

/// Print the step and warning counts with an export verdict
pub fn display_summary(summary: &ProtocolSummary) {
    println!("\nSummary:");
    println!(
        "   Steps: {} ({} direct, {} diluted, {} capsule; {} food A, {} food B)",
        summary.total_steps,
        summary.direct_steps,
        summary.dilute_steps,
        summary.capsule_steps,
        summary.food_a_steps,
        summary.food_b_steps
    );
    if let (Some(first), Some(last)) = (summary.first_target_mg, summary.final_target_mg) {
        println!("   Doses: {} to {}", format_mg(first), format_mg(last));
    }
    println!(
        "   Warnings: {} red, {} yellow",
        summary.red_warnings, summary.yellow_warnings
    );
    if summary.is_exportable() {
        println!("   Ready to export.");
    } else {
        println!("   Not exportable until red warnings are resolved.");
    }
}

/// Print ranked dilution recipes for one dose
pub fn display_candidates(
    target_mg: Decimal,
    food: &Food,
    candidates: &[Candidate],
    limit: usize,
) {
    println!(
        "\nDilution recipes for {} of {}",
        format_mg(target_mg),
        describe_food(food)
    );
    println!("{}", "=".repeat(RULE_WIDTH));

    if candidates.is_empty() {
        println!("   No recipe meets the tolerance, resolution, and servings limits.");
        return;
    }

    println!(
        "{:>4}  {:>10}  {:>10}  {:>10}  {:>12}  {:>8}",
        "Rank", "Mix food", "Water", "Daily", "Total volume", "Servings"
    );
    println!("{}", "-".repeat(RULE_WIDTH));
    for (rank, candidate) in candidates.iter().take(limit).enumerate() {
        println!(
            "{:>4}  {:>10}  {:>10}  {:>10}  {:>12}  {:>8}",
            rank + 1,
            format_amount(candidate.mix_food_amount, food.unit()),
            format_amount(candidate.mix_water_amount, MeasureUnit::Milliliters),
            format_amount(candidate.daily_amount, MeasureUnit::Milliliters),
            format_amount(candidate.mix_total_volume, MeasureUnit::Milliliters),
            candidate.servings.round_dp(1).normalize()
        );
    }
    if candidates.len() > limit {
        println!("   ... {} more", candidates.len() - limit);
    }
}

// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet logging setup, reference foods, and hand-built protocols
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::wildcard_in_or_patterns
)]
//! Shared test utilities for `oit_calculator`
//!
//! Fixtures are plain constructors; nothing here touches the filesystem.

use std::env;
use std::sync::Once;

use oit_calculator::config::ProtocolConfig;
use oit_calculator::models::{
    DosingStrategy, Food, FoodAStrategy, FoodSlot, FoodType, Protocol, Step,
};
use oit_calculator::{dec, Decimal};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// 50 g protein per 100 g: 500 mg/g
pub fn peanut_flour() -> Food {
    Food::new("Peanut flour", FoodType::Solid, dec!(50), dec!(100))
}

/// 10 g protein per 100 g: 100 mg/g
pub fn ten_percent_powder() -> Food {
    Food::new("Egg powder", FoodType::Solid, dec!(10), dec!(100))
}

/// 8 g protein per 250 ml: 32 mg/ml
pub fn milk() -> Food {
    Food::new("Milk", FoodType::Liquid, dec!(8), dec!(250))
}

/// 25 g protein per 100 g: 250 mg/g
pub fn whole_peanut() -> Food {
    Food::new("Whole peanut", FoodType::Solid, dec!(25), dec!(100))
}

/// Food with no protein, which makes every dose impossible
pub fn protein_free() -> Food {
    Food::new("Rice milk", FoodType::Liquid, Decimal::ZERO, dec!(250))
}

/// Protocol over `food` with the given steps and default limits
pub fn protocol_with_steps(food: Food, steps: Vec<Step>) -> Protocol {
    let config = ProtocolConfig::default();
    Protocol {
        dosing_strategy: DosingStrategy::Standard,
        food_a: food,
        food_a_strategy: FoodAStrategy::DiluteNone,
        di_threshold: config.default_food_a_dilution_threshold,
        food_b: None,
        food_b_threshold: None,
        steps,
        config,
    }
}

/// Neat food A steps delivering exactly each target
pub fn neat_steps(food: &Food, targets: &[Decimal]) -> Vec<Step> {
    targets
        .iter()
        .zip(1..)
        .map(|(&target, index)| {
            let amount = food.neat_amount_for(target).unwrap_or(Decimal::ZERO);
            Step::direct(index, target, amount, food.food_type, FoodSlot::A)
        })
        .collect()
}

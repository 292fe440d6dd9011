// ABOUTME: Integration tests for food database import and protocol JSON round trips
// ABOUTME: Uses temporary files to exercise loading, record validation, and structural checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;

use oit_calculator::config::ProtocolConfig;
use oit_calculator::editor::apply_food_b;
use oit_calculator::errors::ErrorCode;
use oit_calculator::import::{
    find_food, load_food_database, load_protocol, parse_food_database, protocol_from_json,
    protocol_to_json, FoodRecord,
};
use oit_calculator::models::{FoodType, Protocol};
use oit_calculator::{dec, generate_default_protocol};
use serde_json::{json, Value};
use tempfile::TempDir;

use common::{init_test_logging, milk, peanut_flour};

fn food_database() -> Value {
    json!([
        {
            "name": "Peanut flour",
            "protein_grams_per_serving": 50,
            "serving_size": 100,
            "type": "SOLID"
        },
        {
            "name": "Milk",
            "protein_grams_per_serving": "8",
            "serving_size": "250",
            "type": "liquid"
        },
        {
            "name": "Egg capsule",
            "protein_grams_per_serving": 0.3,
            "serving_size": 0.5,
            "type": "Capsule"
        }
    ])
}

fn generated_protocol() -> Protocol {
    let protocol = generate_default_protocol(&peanut_flour(), &ProtocolConfig::default());
    apply_food_b(&protocol, milk(), Some(dec!(2)))
}

#[test]
fn test_parse_food_database() {
    init_test_logging();
    let foods = parse_food_database(&food_database().to_string(), false).unwrap();
    assert_eq!(foods.len(), 3);
    assert_eq!(foods[0], peanut_flour());
    assert_eq!(foods[1].food_type, FoodType::Liquid);
    assert_eq!(foods[1].mg_per_unit(), dec!(32));
    assert_eq!(foods[2].food_type, FoodType::Capsule);
}

#[test]
fn test_find_food_ignores_case() {
    let foods = parse_food_database(&food_database().to_string(), false).unwrap();
    assert_eq!(find_food(&foods, "  peanut FLOUR ").unwrap().name, "Peanut flour");
    assert!(find_food(&foods, "cashew").is_none());
}

#[test]
fn test_invalid_record_fails_or_is_skipped() {
    let mut database = food_database();
    database.as_array_mut().unwrap().push(json!({
        "name": "Typo",
        "protein_grams_per_serving": 120,
        "serving_size": 100,
        "type": "SOLID"
    }));
    let text = database.to_string();

    let err = parse_food_database(&text, false).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert!(err.message.starts_with("record 3: "));

    let foods = parse_food_database(&text, true).unwrap();
    assert_eq!(foods.len(), 3);
}

#[test]
fn test_record_validation_rules() {
    let record = |name: &str, protein, serving, food_type: &str| FoodRecord {
        name: name.to_owned(),
        protein_grams_per_serving: protein,
        serving_size: serving,
        food_type: food_type.to_owned(),
    };

    assert_eq!(
        record(" ", dec!(1), dec!(10), "SOLID").validate().unwrap_err().code,
        ErrorCode::MissingRequiredField
    );
    assert_eq!(
        record("Gel", dec!(1), dec!(10), "GEL").validate().unwrap_err().code,
        ErrorCode::InvalidFormat
    );
    assert_eq!(
        record("Empty", dec!(1), dec!(0), "SOLID").validate().unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
    assert_eq!(
        record("Water", dec!(0), dec!(10), "LIQUID").validate().unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
    assert_eq!(
        record("Pure", dec!(10), dec!(10), "solid").validate().unwrap(),
        FoodType::Solid
    );
}

#[test]
fn test_record_round_trip_through_food() {
    let food = milk();
    let record = FoodRecord::from(&food);
    assert_eq!(record.food_type, "LIQUID");
    assert_eq!(record.into_food().unwrap(), food);
}

#[test]
fn test_malformed_json_is_serialization_error() {
    let err = parse_food_database("{ not json", false).unwrap_err();
    assert_eq!(err.code, ErrorCode::SerializationError);
}

#[test]
fn test_load_food_database_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("foods.json");
    fs::write(&path, food_database().to_string()).unwrap();

    let foods = load_food_database(&path, false).unwrap();
    assert_eq!(foods.len(), 3);

    let missing = load_food_database(&dir.path().join("absent.json"), false).unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
}

#[test]
fn test_protocol_file_round_trip() {
    let protocol = generated_protocol();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("protocol.json");
    fs::write(&path, protocol_to_json(&protocol).unwrap()).unwrap();

    let loaded = load_protocol(&path).unwrap();
    assert_eq!(loaded, protocol);
}

#[test]
fn test_protocol_json_shape() {
    let protocol = generated_protocol();
    let value: Value = serde_json::from_str(&protocol_to_json(&protocol).unwrap()).unwrap();

    assert_eq!(value["dosing_strategy"], "STANDARD");
    assert_eq!(value["food_a_strategy"], "DILUTE_INITIAL");
    assert_eq!(value["food_a"]["type"], "SOLID");
    let first = &value["steps"][0];
    assert_eq!(first["method"], "DILUTE");
    assert!(first.get("mix_food_amount").is_some());
    let last = value["steps"].as_array().unwrap().last().unwrap();
    assert_eq!(last["method"], "DIRECT");
    assert_eq!(last["food"], "B");
    assert!(last.get("mix_food_amount").is_none());
}

#[test]
fn test_misnumbered_steps_are_rejected() {
    let protocol = generated_protocol();
    let mut value: Value = serde_json::from_str(&protocol_to_json(&protocol).unwrap()).unwrap();
    value["steps"][2]["step_index"] = json!(7);

    let err = protocol_from_json(&value.to_string()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_food_a_after_food_b_is_rejected() {
    let protocol = generated_protocol();
    let mut value: Value = serde_json::from_str(&protocol_to_json(&protocol).unwrap()).unwrap();
    let last = value["steps"].as_array().unwrap().len() - 1;
    value["steps"][last]["food"] = json!("A");

    let err = protocol_from_json(&value.to_string()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("after food B"));
}

#[test]
fn test_embedded_config_is_validated() {
    let protocol = generated_protocol();
    let mut value: Value = serde_json::from_str(&protocol_to_json(&protocol).unwrap()).unwrap();
    value["config"]["protein_tolerance"] = json!("1.5");

    let err = protocol_from_json(&value.to_string()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

// ABOUTME: Reference dataset tests: shipped tables, JSON loading and request validation
// ABOUTME: Covers invariant checking, feed selection order and boundary errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use feed_ration::engine::NormSource;
use feed_ration::{
    CategoryKey, ErrorCode, FeedClass, RationRequest, ReferenceData, Violation,
};

mod common;

// ============================================================================
// Shipped Tables
// ============================================================================

#[test]
fn test_builtin_dataset_is_valid() {
    common::init_test_logging();
    let report = ReferenceData::builtin().validate();
    assert!(report.is_valid(), "violations: {:?}", report.violations);
}

#[test]
fn test_builtin_feed_counts_per_class() {
    let reference = ReferenceData::builtin();
    assert_eq!(reference.feeds.len(), 31);
    assert_eq!(reference.feeds_by_class(FeedClass::Roughage).count(), 15);
    assert_eq!(reference.feeds_by_class(FeedClass::Energy).count(), 7);
    assert_eq!(reference.feeds_by_class(FeedClass::Protein).count(), 9);
}

#[test]
fn test_every_category_has_one_policy() {
    let reference = ReferenceData::builtin();
    for category in CategoryKey::ALL {
        let policy = reference.require_policy(category).unwrap();
        common::assert_close(policy.ratios.total(), 100.0, 1e-9, "ratio sum");
        assert!(!policy.norms.is_empty());
    }
}

#[test]
fn test_bull_uses_nearest_match_table() {
    let policy = ReferenceData::builtin()
        .policy(CategoryKey::MatureBull)
        .unwrap();
    assert!(matches!(policy.norms, NormSource::NearestMatch(_)));
    assert!(!policy.milk_energy);
}

#[test]
fn test_only_calf_has_husbandry_note() {
    let reference = ReferenceData::builtin();
    for category in CategoryKey::ALL {
        let has_note = reference
            .policy(category)
            .unwrap()
            .husbandry_note
            .is_some();
        assert_eq!(has_note, category == CategoryKey::Calf, "{category}");
    }
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_feeds_keeps_table_order() {
    let reference = ReferenceData::builtin();
    let names: Vec<String> = ["Soybean meal", "Corn grain", "Alfalfa hay", "Unknown", "Corn grain"]
        .into_iter()
        .map(String::from)
        .collect();
    let selected: Vec<String> = reference
        .select_feeds(&names)
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(selected, ["Alfalfa hay", "Corn grain", "Soybean meal"]);
}

// ============================================================================
// Custom Datasets
// ============================================================================

#[test]
fn test_json_round_trip_of_builtin() {
    let json = serde_json::to_string(ReferenceData::builtin()).unwrap();
    let loaded = ReferenceData::from_json(&json).unwrap();
    let builtin = ReferenceData::builtin();
    assert_eq!(loaded.feeds.len(), builtin.feeds.len());
    assert_eq!(loaded.policies.len(), builtin.policies.len());
    assert_eq!(loaded.feeds[6].name, "Corn silage, wet, with grain");
    assert_eq!(
        loaded.policy(CategoryKey::Calf).unwrap().husbandry_note,
        builtin.policy(CategoryKey::Calf).unwrap().husbandry_note
    );
}

#[test]
fn test_invalid_dataset_lists_every_violation() {
    let mut data = ReferenceData::builtin().clone();
    data.feeds[0].dry_matter = 1.5;
    data.policies[1].ratios.protein += 10.0;
    data.policies.retain(|p| p.category != CategoryKey::Calf);

    let report = data.validate();
    assert!(report.violations.iter().any(|v| matches!(
        v,
        Violation::InvalidFeedAttribute { attribute, .. } if *attribute == "dry_matter"
    )));
    assert!(report
        .violations
        .iter()
        .any(|v| matches!(v, Violation::RatioSumOff { category: CategoryKey::DryCow, .. })));
    assert!(report.violations.iter().any(|v| matches!(
        v,
        Violation::MissingCategoryPolicy {
            category: CategoryKey::Calf
        }
    )));

    let error = data.validated().unwrap_err();
    assert_eq!(error.code, ErrorCode::ReferenceDataInvalid);
    let details = error.details;
    assert_eq!(details["violations"].as_array().unwrap().len(), report.violations.len());
}

#[test]
fn test_malformed_json_is_a_serialization_error() {
    let error = ReferenceData::from_json("{\"feeds\": 3}").unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
}

#[test]
fn test_duplicate_feed_name_detected() {
    let mut data = ReferenceData::builtin().clone();
    let copy = data.feeds[4].clone();
    data.feeds.push(copy);
    assert!(data.validate().violations.contains(&Violation::DuplicateFeedName {
        feed: "Alfalfa hay".into()
    }));
}

// ============================================================================
// Request Validation
// ============================================================================

#[test]
fn test_well_formed_request_passes() {
    let request = common::lactating_cow_request()
        .with_milk(15.0)
        .with_override("Corn grain", 2.0);
    assert!(request.validate(ReferenceData::builtin()).is_ok());
}

#[test]
fn test_request_boundary_errors() {
    let reference = ReferenceData::builtin();

    let error = RationRequest::new(CategoryKey::DryCow, 0.0)
        .validate(reference)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);

    let error = RationRequest::new(CategoryKey::LactatingCow, 500.0)
        .with_milk(-1.0)
        .validate(reference)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);

    let error = RationRequest::new(CategoryKey::DryCow, 500.0)
        .with_feeds(["Moon dust"])
        .validate(reference)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let error = common::lactating_cow_request()
        .with_override("Wheat straw", 2.0)
        .validate(reference)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_request_for_category_without_policy() {
    let mut data = ReferenceData::builtin().clone();
    data.policies.retain(|p| p.category != CategoryKey::Calf);
    let error = RationRequest::new(CategoryKey::Calf, 120.0)
        .validate(&data)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

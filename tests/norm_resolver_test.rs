// ABOUTME: Requirement lookup tests: interpolation, clamping, nearest match and milk energy
// ABOUTME: Runs against the built-in norm tables and small synthetic tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use feed_ration::engine::{interpolate, nearest_row, resolve_norm, NormSource, ResolvedNorm};
use feed_ration::{
    BullNormRow, CategoryKey, CategoryPolicy, EnergyBasis, NormPoint, RationConfig, ReferenceData,
};

mod common;
use common::assert_close;

fn policy(category: CategoryKey) -> &'static CategoryPolicy {
    ReferenceData::builtin().policy(category).unwrap()
}

fn resolve(category: CategoryKey, weight: f64, milk: f64) -> ResolvedNorm {
    common::init_test_logging();
    resolve_norm(Some(policy(category)), weight, milk, &RationConfig::default())
}

// ============================================================================
// INTERPOLATION
// ============================================================================

#[test]
fn test_lactating_cow_interpolates_between_rows() {
    let norm = resolve(CategoryKey::LactatingCow, 500.0, 0.0);
    assert_eq!(norm.basis, EnergyBasis::Nel);
    assert_close(norm.energy_mj, 50.0, 1e-9, "NeL at 500 kg");
    assert_close(norm.protein_g, 1400.0, 1e-9, "protein at 500 kg");
}

#[test]
fn test_calf_below_table_clamps_to_first_row() {
    let norm = resolve(CategoryKey::Calf, 10.0, 0.0);
    assert_close(norm.energy_mj, 9.0, f64::EPSILON, "calf NeL at 10 kg");
    assert_close(norm.protein_g, 400.0, f64::EPSILON, "calf protein at 10 kg");
}

#[test]
fn test_above_table_clamps_to_last_row() {
    let norm = resolve(CategoryKey::DryCow, 900.0, 0.0);
    assert_close(norm.energy_mj, 130.0, f64::EPSILON, "dry cow NeL at 900 kg");
    assert_close(norm.protein_g, 1350.0, f64::EPSILON, "dry cow protein at 900 kg");
}

#[test]
fn test_calf_quarter_points() {
    let norm = resolve(CategoryKey::Calf, 75.0, 0.0);
    assert_close(norm.energy_mj, 11.5, 1e-9, "calf NeL at 75 kg");
    assert_close(norm.protein_g, 500.0, 1e-9, "calf protein at 75 kg");
}

#[test]
fn test_interpolation_is_monotonic_within_range() {
    let NormSource::Interpolated(rows) = &policy(CategoryKey::DryCow).norms else {
        panic!("dry cow table interpolates");
    };
    let mut previous = interpolate(rows, 150.0).unwrap();
    let mut weight = 150.0;
    while weight <= 700.0 {
        let point = interpolate(rows, weight).unwrap();
        assert!(point.nel_mj >= previous.nel_mj, "NeL decreased at {weight} kg");
        assert!(point.protein_g >= previous.protein_g, "protein decreased at {weight} kg");
        previous = point;
        weight += 7.5;
    }
}

#[test]
fn test_exact_row_hit_returns_row() {
    let table = [
        NormPoint::new(100.0, 10.0, 500.0),
        NormPoint::new(200.0, 20.0, 700.0),
        NormPoint::new(300.0, 25.0, 800.0),
    ];
    let point = interpolate(&table, 200.0).unwrap();
    assert_close(point.nel_mj, 20.0, 1e-12, "NeL at exact row");
    assert_close(point.protein_g, 700.0, 1e-12, "protein at exact row");
}

// ============================================================================
// NEAREST MATCH
// ============================================================================

#[test]
fn test_bull_exact_table_hit() {
    let norm = resolve(CategoryKey::MatureBull, 325.0, 0.0);
    assert_eq!(norm.basis, EnergyBasis::Me);
    assert_close(norm.energy_mj, 75.0, f64::EPSILON, "bull ME at 325 kg");
    assert_close(norm.protein_g, 980.0, f64::EPSILON, "bull protein at 325 kg");
}

#[test]
fn test_bull_equidistant_weight_takes_lower_row() {
    let norm = resolve(CategoryKey::MatureBull, 350.0, 0.0);
    assert_close(norm.energy_mj, 75.0, f64::EPSILON, "bull ME at 350 kg");
}

#[test]
fn test_bull_nearest_row_outside_range() {
    assert_close(resolve(CategoryKey::MatureBull, 60.0, 0.0).energy_mj, 45.0, f64::EPSILON, "low");
    assert_close(resolve(CategoryKey::MatureBull, 900.0, 0.0).energy_mj, 115.0, f64::EPSILON, "high");
    assert_close(resolve(CategoryKey::MatureBull, 360.0, 0.0).energy_mj, 83.0, f64::EPSILON, "near 375");
}

#[test]
fn test_nearest_row_ignores_table_order() {
    let table = [
        BullNormRow::new(300.0, 70.0, 900.0),
        BullNormRow::new(200.0, 60.0, 800.0),
    ];
    let row = nearest_row(&table, 250.0).unwrap();
    assert_close(row.weight_kg, 200.0, f64::EPSILON, "tie resolves low");
}

// ============================================================================
// MILK ENERGY AND DEGENERATE INPUT
// ============================================================================

#[test]
fn test_milk_adds_energy_for_lactating_cow_only() {
    let cow = resolve(CategoryKey::LactatingCow, 500.0, 20.0);
    assert_close(cow.energy_mj, 50.0 + 20.0 * 3.2, 1e-9, "lactating NeL with milk");
    assert_close(cow.protein_g, 1400.0, 1e-9, "milk leaves protein unchanged");

    let dry = resolve(CategoryKey::DryCow, 500.0, 20.0);
    assert_close(dry.energy_mj, 115.0, 1e-9, "dry cow ignores milk");
}

#[test]
fn test_missing_policy_yields_zero_norm() {
    let norm = resolve_norm(None, 500.0, 0.0, &RationConfig::default());
    assert!(norm.is_zero());
    assert!(!norm.note.is_empty());
}

#[test]
fn test_empty_table_yields_zero_norm() {
    let mut custom = policy(CategoryKey::DryCow).clone();
    custom.norms = NormSource::Interpolated(Vec::new());
    let norm = resolve_norm(Some(&custom), 500.0, 0.0, &RationConfig::default());
    assert!(norm.is_zero());
    assert!(norm.note.contains("dry_cow"));
}

#[test]
fn test_non_positive_weight_yields_zero_norm() {
    assert!(resolve(CategoryKey::LactatingCow, 0.0, 0.0).is_zero());
    assert!(resolve(CategoryKey::LactatingCow, f64::NAN, 0.0).is_zero());
}

// ABOUTME: Diagnostics engine tests on hand-built pipeline states
// ABOUTME: Exercises rules that full computations rarely reach, and the rendered text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use feed_ration::engine::{
    average_composition, build_distribution, evaluate_tips, evaluate_warnings, DiagnosticsContext,
    DryMatterCap, MassBalance, PinnedAmounts, ResolvedNorm, Supply,
};
use feed_ration::{
    CategoryKey, EnergyBasis, Feed, LimitingFactor, RationConfig, ReferenceData, Tip, Warning,
};

mod common;
use common::feed;

struct State {
    selected: Vec<Feed>,
    norm: ResolvedNorm,
    mass: MassBalance,
    cap: DryMatterCap,
    supply: Supply,
}

fn state(category: CategoryKey, selected: Vec<Feed>, supply: Supply) -> State {
    let basis = ReferenceData::builtin().policy(category).unwrap().basis();
    State {
        selected,
        norm: ResolvedNorm {
            basis,
            energy_mj: 80.0,
            protein_g: 1000.0,
            note: String::new(),
        },
        mass: MassBalance {
            total_kg: Some(10.0),
            limiting: LimitingFactor::Energy,
            energy_mass_kg: Some(10.0),
            protein_mass_kg: Some(8.0),
        },
        cap: DryMatterCap {
            max_dm_kg: 12.0,
            as_fed_max_kg: Some(13.3),
            effective_total_kg: 10.0,
            coverage_pct: 100,
        },
        supply,
    }
}

fn run(category: CategoryKey, s: &State) -> (Vec<Warning>, Vec<Tip>) {
    common::init_test_logging();
    let reference = ReferenceData::builtin();
    let config = RationConfig::default();
    let policy = reference.policy(category).unwrap();
    let average = average_composition(&s.selected);
    let distribution = build_distribution(
        &s.selected,
        &policy.ratios,
        s.norm.basis,
        s.cap.effective_total_kg,
        &PinnedAmounts::default(),
        &config,
    );
    let ctx = DiagnosticsContext {
        weight_kg: 400.0,
        policy,
        selected: &s.selected,
        norm: &s.norm,
        average: &average,
        mass: &s.mass,
        cap: &s.cap,
        distribution: &distribution,
        supply: &s.supply,
        pinned_total_kg: 0.0,
    };
    (
        evaluate_warnings(&ctx, &config),
        evaluate_tips(&ctx, reference, &config),
    )
}

#[test]
fn test_energy_gap_tip_uses_active_basis() {
    let supply = Supply {
        energy_deficit_mj: 12.72,
        ..Supply::default()
    };
    let s = state(
        CategoryKey::MatureBull,
        vec![feed("Wheat straw"), feed("Barley grain"), feed("Soybean meal")],
        supply,
    );
    let (_, tips) = run(CategoryKey::MatureBull, &s);
    assert!(tips.contains(&Tip::CloseEnergyGap {
        feed: "Corn grain".into(),
        add_kg: 1.0,
        basis: EnergyBasis::Me,
    }));
}

#[test]
fn test_energy_gap_tip_needs_full_coverage() {
    let supply = Supply {
        energy_deficit_mj: 12.72,
        ..Supply::default()
    };
    let mut s = state(CategoryKey::MatureBull, vec![feed("Barley grain")], supply);
    s.cap.coverage_pct = 80;
    let (_, tips) = run(CategoryKey::MatureBull, &s);
    assert!(!tips.iter().any(|t| matches!(t, Tip::CloseEnergyGap { .. })));
}

#[test]
fn test_tiny_protein_gap_rounds_up_to_minimum() {
    let supply = Supply {
        protein_deficit_g: 5.0,
        ..Supply::default()
    };
    let s = state(CategoryKey::LactatingCow, vec![feed("Alfalfa hay")], supply);
    let (_, tips) = run(CategoryKey::LactatingCow, &s);
    assert!(tips.contains(&Tip::CloseProteinGap {
        feed: "Soybean meal".into(),
        add_kg: 0.1,
    }));
}

#[test]
fn test_met_requirement_gives_no_gap_tips() {
    let s = state(CategoryKey::DryCow, vec![feed("Alfalfa hay")], Supply::default());
    let (_, tips) = run(CategoryKey::DryCow, &s);
    assert!(!tips
        .iter()
        .any(|t| matches!(t, Tip::CloseProteinGap { .. } | Tip::CloseEnergyGap { .. })));
}

#[test]
fn test_dry_matter_over_cap_flagged() {
    let mut s = state(
        CategoryKey::LactatingCow,
        vec![feed("Alfalfa hay"), feed("Corn grain"), feed("Soybean meal")],
        Supply::default(),
    );
    s.cap.max_dm_kg = 5.0;
    let (warnings, _) = run(CategoryKey::LactatingCow, &s);
    assert!(warnings.iter().any(|w| matches!(
        w,
        Warning::DryMatterExceedsCap { dry_matter_kg, cap_kg }
            if (*dry_matter_kg - 9.0).abs() < 1e-9 && (*cap_kg - 5.0).abs() < f64::EPSILON
    )));
}

#[test]
fn test_dry_matter_within_tolerance_not_flagged() {
    let mut s = state(
        CategoryKey::LactatingCow,
        vec![feed("Alfalfa hay"), feed("Corn grain"), feed("Soybean meal")],
        Supply::default(),
    );
    s.cap.max_dm_kg = 8.95;
    let (warnings, _) = run(CategoryKey::LactatingCow, &s);
    assert!(!warnings
        .iter()
        .any(|w| matches!(w, Warning::DryMatterExceedsCap { .. })));
}

#[test]
fn test_husbandry_note_only_for_calves() {
    let s = state(CategoryKey::DryCow, vec![feed("Alfalfa hay")], Supply::default());
    let (_, tips) = run(CategoryKey::DryCow, &s);
    assert!(!tips.iter().any(|t| matches!(t, Tip::Husbandry { .. })));
}

#[test]
fn test_mineral_dose_scales_with_weight() {
    let s = state(CategoryKey::DryCow, vec![feed("Alfalfa hay")], Supply::default());
    let (_, tips) = run(CategoryKey::DryCow, &s);
    assert!(tips.contains(&Tip::MineralSupplement {
        salt_g: 140.0,
        premix_g: 360.0
    }));
}

#[test]
fn test_rendered_text() {
    let tip = Tip::CloseProteinGap {
        feed: "Soybean meal".into(),
        add_kg: 1.5,
    };
    assert_eq!(
        tip.to_string(),
        "Add about 1.5 kg of Soybean meal to cover the crude protein requirement."
    );
    let warning = Warning::ConcentrateTooHigh {
        concentrate_pct: 75.0,
        maximum_pct: 60.0,
    };
    assert!(warning.to_string().contains("75%"));
    assert!(warning.to_string().contains("acidosis"));
}

#[test]
fn test_tagged_json() {
    let json = serde_json::to_value(Warning::DryMatterCeilingLimited { coverage_pct: 48 }).unwrap();
    assert_eq!(json["kind"], "dry_matter_ceiling_limited");
    assert_eq!(json["coverage_pct"], 48);
}

// ABOUTME: Daily feed ration calculation engine for livestock
// ABOUTME: Norm lookup, mass balance, dry-matter capping, class allocation and diagnostics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Ration Engine
//!
//! Deterministic, synchronous computation of a daily feed ration. Every stage is
//! a pure function of its inputs, the reference dataset and the engine
//! configuration:
//!
//! 1. [`norm_resolver`] maps category, weight and milk yield to a requirement
//! 2. [`composition`] averages the selected feeds per kg as fed
//! 3. [`mass_balance`] finds the as-fed mass the binding nutrient needs
//! 4. [`dry_matter`] clamps that mass to the dry-matter intake ceiling
//! 5. [`distribution`] splits the mass across classes and feeds
//! 6. [`diagnostics`] derives warnings and corrective tips
//!
//! [`calculator::compute_ration`] runs the whole pipeline.

/// Pipeline entry point and the bundled result
pub mod calculator;
/// Average per-kg composition of a feed selection
pub mod composition;
/// Engine tunables with environment overrides and validation
pub mod config;
/// Warnings and corrective tips
pub mod diagnostics;
/// Class and per-feed allocation of the effective total
pub mod distribution;
/// Dry-matter intake ceiling and coverage
pub mod dry_matter;
/// As-fed mass needed to meet the requirement
pub mod mass_balance;
/// Requirement lookup by interpolation or nearest match
pub mod norm_resolver;
/// Division and rounding helpers that never yield NaN
pub mod numeric;
/// Static reference tables and their validation
pub mod reference;

pub use calculator::{compute_ration, compute_ration_with, RationRequest, RationResult, Supply};
pub use composition::{average_composition, AverageComposition, DryMatterDensity};
pub use config::{ConfigError, RationConfig};
pub use diagnostics::{evaluate_tips, evaluate_warnings, DiagnosticsContext, Tip, Warning};
pub use distribution::{
    build_distribution, AllocationOutcome, ClassAmounts, Distribution, DistributionItem,
    PinnedAmounts,
};
pub use dry_matter::{cap_total_mass, max_dry_matter_intake, DryMatterCap};
pub use mass_balance::{solve_mass, LimitingFactor, MassBalance};
pub use norm_resolver::{interpolate, nearest_row, resolve_norm, ResolvedNorm};
pub use reference::{CategoryPolicy, NormSource, ReferenceData, ValidationReport, Violation};

// ABOUTME: Ration pipeline entry point bundling every stage's output
// ABOUTME: Invalid input yields a neutral result; strict request validation is a separate step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Ration Calculator
//!
//! [`compute_ration`] is infallible: a non-positive weight, a negative milk
//! yield or an empty selection produce zero-valued outputs the caller can show
//! as "insufficient input". [`RationRequest::validate`] is for boundaries that
//! prefer to reject such input up front.

use crate::composition::{average_composition, AverageComposition, DryMatterDensity};
use crate::config::RationConfig;
use crate::diagnostics::{evaluate_tips, evaluate_warnings, DiagnosticsContext, Tip, Warning};
use crate::distribution::{build_distribution, Distribution, PinnedAmounts};
use crate::dry_matter::{cap_total_mass, max_dry_matter_intake, DryMatterCap};
use crate::mass_balance::{solve_mass, MassBalance};
use crate::norm_resolver::{resolve_norm, ResolvedNorm};
use crate::numeric::safe_divide;
use crate::reference::ReferenceData;
use ration_core::errors::{AppError, AppResult};
use ration_core::models::{CategoryKey, ClassRatios, Feed, UserFeedAmount};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Inputs for one ration computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationRequest {
    /// Animal category
    pub category: CategoryKey,
    /// Live weight (kg)
    pub weight_kg: f64,
    /// Milk yield (l/day)
    #[serde(default)]
    pub milk_l: f64,
    /// Names of the selected feeds
    #[serde(default)]
    pub selected_feeds: Vec<String>,
    /// Per-feed amounts fixed by the user
    #[serde(default)]
    pub overrides: Vec<UserFeedAmount>,
}

impl RationRequest {
    /// Request with no milk, no feeds and no overrides
    #[must_use]
    pub const fn new(category: CategoryKey, weight_kg: f64) -> Self {
        Self {
            category,
            weight_kg,
            milk_l: 0.0,
            selected_feeds: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Set the milk yield
    #[must_use]
    pub fn with_milk(mut self, milk_l: f64) -> Self {
        self.milk_l = milk_l;
        self
    }

    /// Add selected feeds by name
    #[must_use]
    pub fn with_feeds<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_feeds.extend(names.into_iter().map(Into::into));
        self
    }

    /// Pin an amount for a feed
    #[must_use]
    pub fn with_override(mut self, feed_name: impl Into<String>, amount_kg: f64) -> Self {
        self.overrides.push(UserFeedAmount::new(feed_name, amount_kg));
        self
    }

    /// Weight and milk are usable
    #[must_use]
    pub fn has_valid_measurements(&self) -> bool {
        self.weight_kg.is_finite()
            && self.weight_kg > 0.0
            && self.milk_l.is_finite()
            && self.milk_l >= 0.0
    }

    /// Reject input the engine would otherwise absorb silently
    ///
    /// # Errors
    ///
    /// - `VALUE_OUT_OF_RANGE` for a non-positive weight or negative milk yield
    /// - `RESOURCE_NOT_FOUND` for a category without policy or an unknown feed
    /// - `INVALID_INPUT` for an override on a feed that is not selected
    pub fn validate(&self, reference: &ReferenceData) -> AppResult<()> {
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(AppError::out_of_range(format!(
                "Live weight must be a positive number of kg, got {}",
                self.weight_kg
            )));
        }
        if !(self.milk_l.is_finite() && self.milk_l >= 0.0) {
            return Err(AppError::out_of_range(format!(
                "Milk yield must be zero or more liters, got {}",
                self.milk_l
            )));
        }
        reference.require_policy(self.category)?;

        for name in &self.selected_feeds {
            if reference.feed_by_name(name).is_none() {
                return Err(AppError::not_found(format!("Feed '{name}'")));
            }
        }
        for entry in &self.overrides {
            if !self.selected_feeds.iter().any(|n| n == &entry.feed_name) {
                return Err(AppError::invalid_input(format!(
                    "Amount given for feed '{}' which is not selected",
                    entry.feed_name
                )));
            }
            if !(entry.amount_kg.is_finite() && entry.amount_kg >= 0.0) {
                return Err(AppError::out_of_range(format!(
                    "Amount for feed '{}' must be zero or more kg",
                    entry.feed_name
                )));
            }
        }
        Ok(())
    }
}

/// Nutrients supplied at the effective total and what is still missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    /// Energy supplied in the requirement's basis (MJ/day)
    pub energy_supply_mj: f64,
    /// Crude protein supplied (g/day)
    pub protein_supply_g: f64,
    /// Energy still missing (MJ/day), never negative
    pub energy_deficit_mj: f64,
    /// Crude protein still missing (g/day), never negative
    pub protein_deficit_g: f64,
    /// Protein deficit as a share of the requirement (%)
    pub protein_deficit_pct: f64,
}

impl Supply {
    /// Supply of the average composition fed at `effective_total_kg`
    #[must_use]
    pub fn compute(
        norm: &ResolvedNorm,
        average: &AverageComposition,
        effective_total_kg: f64,
    ) -> Self {
        let energy_supply_mj = average.energy(norm.basis) * effective_total_kg;
        let protein_supply_g = average.protein * 1000.0 * effective_total_kg;
        let energy_deficit_mj = (norm.energy_mj - energy_supply_mj).max(0.0);
        let protein_deficit_g = (norm.protein_g - protein_supply_g).max(0.0);
        let protein_deficit_pct = if norm.protein_g > 0.0 {
            safe_divide(protein_deficit_g, norm.protein_g, 0.0) * 100.0
        } else {
            0.0
        };
        Self {
            energy_supply_mj,
            protein_supply_g,
            energy_deficit_mj,
            protein_deficit_g,
            protein_deficit_pct,
        }
    }
}

/// Every output of one computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationResult {
    /// Category computed for
    pub category: CategoryKey,
    /// Category display label
    pub label: String,
    /// Weight and milk were usable
    pub valid_input: bool,
    /// Selected feeds that exist in the reference table, in table order
    pub selected_feeds: Vec<Feed>,
    /// Average composition of the selection
    pub average: AverageComposition,
    /// Daily requirement
    pub norm: ResolvedNorm,
    /// Solved as-fed mass
    pub mass_balance: MassBalance,
    /// Dry-matter ceiling, effective total and coverage
    pub dry_matter: DryMatterCap,
    /// Target class split (%)
    pub class_percents: ClassRatios,
    /// Advisory note for the class split
    pub note: String,
    /// Per-class and per-feed allocation
    pub distribution: Distribution,
    /// Supply and deficits at the effective total
    pub supply: Supply,
    /// Dry-matter basis density of the selection
    pub density: DryMatterDensity,
    /// Sum of pinned amounts for selected feeds (kg)
    pub pinned_total_kg: f64,
    /// Policy flags
    pub warnings: Vec<Warning>,
    /// Corrective suggestions
    pub tips: Vec<Tip>,
}

impl RationResult {
    /// As-fed total actually fed (kg/day)
    #[must_use]
    pub const fn effective_total_kg(&self) -> f64 {
        self.dry_matter.effective_total_kg
    }

    /// Share of the solved mass that is fed (%)
    #[must_use]
    pub const fn coverage_pct(&self) -> u8 {
        self.dry_matter.coverage_pct
    }
}

/// Compute a ration against the shipped reference data and global configuration
#[must_use]
pub fn compute_ration(request: &RationRequest) -> RationResult {
    compute_ration_with(request, ReferenceData::builtin(), RationConfig::global())
}

/// Compute a ration against explicit reference data and configuration
#[must_use]
pub fn compute_ration_with(
    request: &RationRequest,
    reference: &ReferenceData,
    config: &RationConfig,
) -> RationResult {
    let policy = reference.policy(request.category);
    let valid_input = request.has_valid_measurements();
    if !valid_input {
        warn!(
            weight_kg = request.weight_kg,
            milk_l = request.milk_l,
            "Invalid weight or milk yield, returning an empty ration"
        );
    }

    let selected = if valid_input {
        reference.select_feeds(&request.selected_feeds)
    } else {
        Vec::new()
    };
    let average = average_composition(&selected);
    debug!(feeds = selected.len(), nel = average.nel, "Selection averaged");

    let norm = if valid_input {
        resolve_norm(policy, request.weight_kg, request.milk_l, config)
    } else {
        ResolvedNorm::zero("Enter a positive live weight and a milk yield of zero or more")
    };

    let mass_balance = if selected.is_empty() {
        MassBalance::zero()
    } else {
        solve_mass(&norm, &average)
    };

    let pinned = PinnedAmounts::from_overrides(&request.overrides, &selected);
    let pinned_total_kg = pinned.total();
    let max_dm_kg = match policy {
        Some(p) if valid_input => max_dry_matter_intake(request.weight_kg, p.dm_intake_fraction),
        _ => 0.0,
    };
    let dry_matter = cap_total_mass(
        max_dm_kg,
        average.dry_matter,
        mass_balance.solved_kg(),
        pinned_total_kg,
    );

    let class_percents = policy.map_or(ClassRatios::new(0.0, 0.0, 0.0), |p| p.ratios);
    let distribution = build_distribution(
        &selected,
        &class_percents,
        norm.basis,
        dry_matter.effective_total_kg,
        &pinned,
        config,
    );
    let supply = Supply::compute(&norm, &average, dry_matter.effective_total_kg);

    let (warnings, tips) = match policy {
        Some(policy) if valid_input && !selected.is_empty() => {
            let ctx = DiagnosticsContext {
                weight_kg: request.weight_kg,
                policy,
                selected: &selected,
                norm: &norm,
                average: &average,
                mass: &mass_balance,
                cap: &dry_matter,
                distribution: &distribution,
                supply: &supply,
                pinned_total_kg,
            };
            (
                evaluate_warnings(&ctx, config),
                evaluate_tips(&ctx, reference, config),
            )
        }
        _ => (Vec::new(), Vec::new()),
    };
    debug!(
        warnings = warnings.len(),
        tips = tips.len(),
        effective_total_kg = dry_matter.effective_total_kg,
        "Ration computed"
    );

    RationResult {
        category: request.category,
        label: policy.map_or_else(|| request.category.to_string(), |p| p.label.clone()),
        valid_input,
        density: average.density(),
        selected_feeds: selected,
        average,
        note: policy.map(|p| p.note.clone()).unwrap_or_default(),
        norm,
        mass_balance,
        dry_matter,
        class_percents,
        distribution,
        supply,
        pinned_total_kg,
        warnings,
        tips,
    }
}

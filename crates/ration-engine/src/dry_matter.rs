// ABOUTME: Dry-matter intake ceiling and the capped effective as-fed total
// ABOUTME: Coverage reports how much of the solved mass survives the ceiling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::numeric::safe_divide;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of capping the solved mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DryMatterCap {
    /// Maximum dry-matter intake (kg DM/day)
    pub max_dm_kg: f64,
    /// As-fed equivalent of the ceiling; `None` when unbounded
    pub as_fed_max_kg: Option<f64>,
    /// As-fed total actually fed (kg/day)
    pub effective_total_kg: f64,
    /// Share of the solved mass that is fed (%), always in 0..=100
    pub coverage_pct: u8,
}

impl DryMatterCap {
    /// Nothing to feed
    #[must_use]
    pub const fn zero(max_dm_kg: f64, as_fed_max_kg: Option<f64>) -> Self {
        Self {
            max_dm_kg,
            as_fed_max_kg,
            effective_total_kg: 0.0,
            coverage_pct: 0,
        }
    }
}

/// Maximum dry-matter intake for a live weight
///
/// Zero for an invalid weight or fraction.
#[must_use]
pub fn max_dry_matter_intake(weight_kg: f64, intake_fraction: f64) -> f64 {
    if !(weight_kg.is_finite() && weight_kg > 0.0) || !intake_fraction.is_finite() {
        return 0.0;
    }
    let result = weight_kg * intake_fraction;
    if result.is_finite() {
        result.max(0.0)
    } else {
        0.0
    }
}

/// Clamp the solved mass to the as-fed dry-matter ceiling
///
/// When pinned overrides add up to more than the solved mass, the override sum
/// becomes the base before clamping. Coverage is 100 only when the effective
/// total reaches the solved mass; any shortfall reports at most 99.
///
/// An infinite solved mass feeds up to the ceiling (nothing when there is no
/// ceiling) at zero coverage.
#[must_use]
pub fn cap_total_mass(
    max_dm_kg: f64,
    avg_dry_matter: f64,
    solved_kg: f64,
    pinned_total_kg: f64,
) -> DryMatterCap {
    let as_fed_max_kg = if max_dm_kg > 0.0 && avg_dry_matter > 0.0 {
        let ceiling = safe_divide(max_dm_kg, avg_dry_matter, f64::INFINITY);
        ceiling.is_finite().then_some(ceiling)
    } else {
        None
    };
    if solved_kg.is_nan() || solved_kg <= 0.0 {
        return DryMatterCap::zero(max_dm_kg, as_fed_max_kg);
    }

    let base = if pinned_total_kg > 0.0 {
        pinned_total_kg.max(solved_kg)
    } else {
        solved_kg
    };
    let effective_total_kg = match as_fed_max_kg {
        Some(ceiling) => base.min(ceiling),
        None if base.is_finite() => base,
        None => 0.0,
    };

    let coverage_pct = if effective_total_kg >= solved_kg {
        100
    } else {
        let ratio = safe_divide(effective_total_kg, solved_kg, 0.0);
        (ratio * 100.0).round().clamp(0.0, 99.0) as u8
    };

    debug!(
        max_dm_kg,
        effective_total_kg, coverage_pct, "Dry-matter ceiling applied"
    );
    DryMatterCap {
        max_dm_kg,
        as_fed_max_kg,
        effective_total_kg,
        coverage_pct,
    }
}

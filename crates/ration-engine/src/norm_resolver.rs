// ABOUTME: Daily requirement lookup from category, live weight and milk yield
// ABOUTME: Piecewise-linear NeL interpolation or nearest-weight ME match, chosen by category policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Norm Resolver
//!
//! The resolver never fails. A missing policy, an empty table or an invalid
//! weight produce a zero requirement with a note; callers read a zero
//! requirement as "no valid computation".

use crate::config::RationConfig;
use crate::reference::{CategoryPolicy, NormSource};
use ration_core::models::{BullNormRow, EnergyBasis, NormPoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Daily requirement for one animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNorm {
    /// Energy basis of `energy_mj`
    pub basis: EnergyBasis,
    /// Energy requirement (MJ/day)
    pub energy_mj: f64,
    /// Crude protein requirement (g/day)
    pub protein_g: f64,
    /// Advisory note for the category
    pub note: String,
}

impl ResolvedNorm {
    /// Zero requirement carrying an explanation
    #[must_use]
    pub fn zero(note: impl Into<String>) -> Self {
        Self {
            basis: EnergyBasis::Nel,
            energy_mj: 0.0,
            protein_g: 0.0,
            note: note.into(),
        }
    }

    /// Whether the requirement is usable for mass balancing
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.energy_mj <= 0.0 && self.protein_g <= 0.0
    }
}

/// Linear interpolation over a weight table, clamped to the end rows
///
/// Rows are sorted by weight first, so the input order does not matter.
/// Outside the tabulated range the boundary row is returned unchanged.
/// Returns `None` for an empty table.
#[must_use]
pub fn interpolate(table: &[NormPoint], weight_kg: f64) -> Option<NormPoint> {
    let mut rows = table.to_vec();
    rows.sort_by(|a, b| a.weight_kg.total_cmp(&b.weight_kg));

    let first = *rows.first()?;
    let last = *rows.last()?;
    if weight_kg <= first.weight_kg {
        return Some(first);
    }
    if weight_kg >= last.weight_kg {
        return Some(last);
    }

    // first row strictly heavier than the input; always in 1..len here
    let upper_idx = rows.partition_point(|r| r.weight_kg <= weight_kg);
    let lower = *rows.get(upper_idx.checked_sub(1)?)?;
    let upper = *rows.get(upper_idx)?;

    let span = upper.weight_kg - lower.weight_kg;
    if span <= 0.0 {
        return Some(lower);
    }
    let t = ((weight_kg - lower.weight_kg) / span).clamp(0.0, 1.0);

    Some(NormPoint {
        weight_kg,
        nel_mj: t.mul_add(upper.nel_mj - lower.nel_mj, lower.nel_mj),
        protein_g: t.mul_add(upper.protein_g - lower.protein_g, lower.protein_g),
    })
}

/// Row whose tabulated weight is closest to the input
///
/// Equidistant candidates resolve to the lower weight. Returns `None` for an
/// empty table.
#[must_use]
pub fn nearest_row(table: &[BullNormRow], weight_kg: f64) -> Option<BullNormRow> {
    table.iter().copied().reduce(|best, row| {
        let best_dist = (best.weight_kg - weight_kg).abs();
        let row_dist = (row.weight_kg - weight_kg).abs();
        if row_dist < best_dist || (row_dist == best_dist && row.weight_kg < best.weight_kg) {
            row
        } else {
            best
        }
    })
}

/// Resolve the daily requirement for an animal
///
/// Milk yield adds `milk_nel_mj_per_liter` per liter only for categories whose
/// policy enables milk energy.
#[must_use]
pub fn resolve_norm(
    policy: Option<&CategoryPolicy>,
    weight_kg: f64,
    milk_l: f64,
    config: &RationConfig,
) -> ResolvedNorm {
    let Some(policy) = policy else {
        warn!("No category policy available, requirement set to zero");
        return ResolvedNorm::zero("No reference data for this category");
    };
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return ResolvedNorm::zero("Live weight must be a positive number");
    }

    let resolved = match &policy.norms {
        NormSource::NearestMatch(rows) => nearest_row(rows, weight_kg).map(|row| ResolvedNorm {
            basis: EnergyBasis::Me,
            energy_mj: row.me_mj,
            protein_g: row.protein_g,
            note: policy.note.clone(),
        }),
        NormSource::Interpolated(rows) => interpolate(rows, weight_kg).map(|point| {
            let milk_nel = if policy.milk_energy && milk_l.is_finite() && milk_l > 0.0 {
                milk_l * config.norms.milk_nel_mj_per_liter
            } else {
                0.0
            };
            ResolvedNorm {
                basis: EnergyBasis::Nel,
                energy_mj: point.nel_mj + milk_nel,
                protein_g: point.protein_g,
                note: policy.note.clone(),
            }
        }),
    };

    resolved.map_or_else(
        || {
            warn!(category = %policy.category, "Norm table is empty, requirement set to zero");
            ResolvedNorm::zero(format!("No norm table for category '{}'", policy.category))
        },
        |norm| {
            debug!(
                category = %policy.category,
                basis = %norm.basis,
                energy_mj = norm.energy_mj,
                protein_g = norm.protein_g,
                "Requirement resolved"
            );
            norm
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_midpoint() {
        let table = [
            NormPoint::new(100.0, 10.0, 500.0),
            NormPoint::new(200.0, 20.0, 700.0),
        ];
        let point = interpolate(&table, 150.0).unwrap();
        assert!((point.nel_mj - 15.0).abs() < 1e-9);
        assert!((point.protein_g - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_sorts_input() {
        let table = [
            NormPoint::new(200.0, 20.0, 700.0),
            NormPoint::new(100.0, 10.0, 500.0),
        ];
        let point = interpolate(&table, 125.0).unwrap();
        assert!((point.nel_mj - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tables_yield_none() {
        assert!(interpolate(&[], 100.0).is_none());
        assert!(nearest_row(&[], 100.0).is_none());
    }

    #[test]
    fn test_nearest_row_tie_goes_low() {
        let table = [
            BullNormRow::new(100.0, 40.0, 600.0),
            BullNormRow::new(150.0, 45.0, 650.0),
        ];
        let row = nearest_row(&table, 125.0).unwrap();
        assert!((row.weight_kg - 100.0).abs() < f64::EPSILON);
    }
}

// ABOUTME: As-fed mass needed to meet the energy and protein requirement
// ABOUTME: The nutrient that needs more feed mass binds and is reported as the limiting factor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::composition::AverageComposition;
use crate::norm_resolver::ResolvedNorm;
use crate::numeric::safe_divide;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Nutrient that determined the solved mass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitingFactor {
    /// Energy needs the larger mass
    Energy,
    /// Protein needs the larger mass
    Protein,
    /// Neither nutrient can be supplied by the selection
    Unconstrained,
}

impl fmt::Display for LimitingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Energy => "energy",
            Self::Protein => "protein",
            Self::Unconstrained => "none",
        })
    }
}

/// Solved as-fed mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassBalance {
    /// Mass meeting both requirements (kg/day as fed); `None` when one
    /// nutrient cannot be supplied at any mass
    pub total_kg: Option<f64>,
    /// Nutrient that bound
    pub limiting: LimitingFactor,
    /// Mass meeting the energy requirement alone; `None` when unbounded
    pub energy_mass_kg: Option<f64>,
    /// Mass meeting the protein requirement alone; `None` when unbounded
    pub protein_mass_kg: Option<f64>,
}

impl MassBalance {
    /// No feed mass
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            total_kg: Some(0.0),
            limiting: LimitingFactor::Unconstrained,
            energy_mass_kg: None,
            protein_mass_kg: None,
        }
    }

    /// Solved mass for the capping stage, infinite when unbounded
    #[must_use]
    pub fn solved_kg(&self) -> f64 {
        self.total_kg.unwrap_or(f64::INFINITY)
    }

    /// Whether the binding nutrient is missing from the selection
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.total_kg.is_none()
    }
}

impl Default for MassBalance {
    fn default() -> Self {
        Self::zero()
    }
}

fn mass_for(required: f64, per_kg: f64) -> f64 {
    if per_kg > 0.0 {
        safe_divide(required, per_kg, f64::INFINITY)
    } else {
        f64::INFINITY
    }
}

/// Larger of the energy and protein masses
///
/// A nutrient the selection does not supply needs unbounded mass, binds, and
/// leaves the total unbounded. If both are unbounded, or the requirement is
/// zero, the result is zero and unconstrained. Energy wins a tie.
#[must_use]
pub fn solve_mass(norm: &ResolvedNorm, average: &AverageComposition) -> MassBalance {
    if norm.is_zero() {
        return MassBalance::zero();
    }

    let energy_mass = mass_for(norm.energy_mj, average.energy(norm.basis));
    let protein_mass = mass_for(norm.protein_g / 1000.0, average.protein);
    let finite = |m: f64| m.is_finite().then_some(m);

    if !energy_mass.is_finite() && !protein_mass.is_finite() {
        return MassBalance::zero();
    }
    let (limiting, total) = if energy_mass >= protein_mass {
        (LimitingFactor::Energy, energy_mass)
    } else {
        (LimitingFactor::Protein, protein_mass)
    };
    let balance = MassBalance {
        total_kg: finite(total),
        limiting,
        energy_mass_kg: finite(energy_mass),
        protein_mass_kg: finite(protein_mass),
    };

    debug!(
        total_kg = ?balance.total_kg,
        limiting = %balance.limiting,
        "Mass balance solved"
    );
    balance
}

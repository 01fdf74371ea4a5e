// ABOUTME: Mean per-kg nutrient profile of the selected feeds, as fed
// ABOUTME: Also derives the dry-matter basis density summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::numeric::{finite_or_zero, safe_divide};
use ration_core::models::{EnergyBasis, Feed};
use serde::{Deserialize, Serialize};

/// Average composition per kg as fed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageComposition {
    /// Metabolizable energy (MJ/kg)
    pub me: f64,
    /// Net energy for lactation (MJ/kg)
    pub nel: f64,
    /// Crude protein (kg/kg)
    pub protein: f64,
    /// Dry matter (kg/kg)
    pub dry_matter: f64,
}

impl AverageComposition {
    /// Energy per kg in the given basis
    #[must_use]
    pub const fn energy(&self, basis: EnergyBasis) -> f64 {
        match basis {
            EnergyBasis::Me => self.me,
            EnergyBasis::Nel => self.nel,
        }
    }

    /// Dry-matter basis density of this composition
    #[must_use]
    pub fn density(&self) -> DryMatterDensity {
        DryMatterDensity {
            nel_per_kg_dm: safe_divide(self.nel, self.dry_matter, 0.0).max(0.0),
            crude_protein_pct_dm: (safe_divide(self.protein, self.dry_matter, 0.0) * 100.0)
                .max(0.0),
        }
    }
}

/// Energy and protein density on a dry-matter basis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DryMatterDensity {
    /// MJ NeL per kg dry matter
    pub nel_per_kg_dm: f64,
    /// Crude protein as % of dry matter
    pub crude_protein_pct_dm: f64,
}

/// Arithmetic mean of each attribute over the selection
///
/// Non-finite attribute values count as zero; an empty selection averages to zero.
#[must_use]
pub fn average_composition(feeds: &[Feed]) -> AverageComposition {
    if feeds.is_empty() {
        return AverageComposition::default();
    }
    let n = feeds.len() as f64;
    let sum = feeds.iter().fold(AverageComposition::default(), |acc, f| {
        AverageComposition {
            me: acc.me + finite_or_zero(f.energy_me),
            nel: acc.nel + finite_or_zero(f.energy_nel),
            protein: acc.protein + finite_or_zero(f.protein),
            dry_matter: acc.dry_matter + finite_or_zero(f.dry_matter),
        }
    });

    AverageComposition {
        me: safe_divide(sum.me, n, 0.0),
        nel: safe_divide(sum.nel, n, 0.0),
        protein: safe_divide(sum.protein, n, 0.0),
        dry_matter: safe_divide(sum.dry_matter, n, 0.0),
    }
}

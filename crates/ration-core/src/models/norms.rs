// ABOUTME: Tabulated requirement rows for weight-based norm lookup
// ABOUTME: Interpolation points (NeL basis) and nearest-match rows (ME basis)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};

/// One sample of a piecewise-linear requirement table (net energy for lactation basis)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    /// Live weight (kg)
    pub weight_kg: f64,
    /// Net energy for lactation requirement (MJ/day)
    pub nel_mj: f64,
    /// Crude protein requirement (g/day)
    pub protein_g: f64,
}

impl NormPoint {
    /// Create a norm point
    #[must_use]
    pub const fn new(weight_kg: f64, nel_mj: f64, protein_g: f64) -> Self {
        Self {
            weight_kg,
            nel_mj,
            protein_g,
        }
    }
}

/// One row of a nearest-match requirement table (metabolizable energy basis)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BullNormRow {
    /// Live weight (kg)
    pub weight_kg: f64,
    /// Metabolizable energy requirement (MJ/day)
    pub me_mj: f64,
    /// Crude protein requirement (g/day)
    pub protein_g: f64,
}

impl BullNormRow {
    /// Create a nearest-match row
    #[must_use]
    pub const fn new(weight_kg: f64, me_mj: f64, protein_g: f64) -> Self {
        Self {
            weight_kg,
            me_mj,
            protein_g,
        }
    }
}

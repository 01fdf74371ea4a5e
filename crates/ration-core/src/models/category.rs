// ABOUTME: Closed set of animal categories and their target class split
// ABOUTME: Category keys parse from and serialize to stable snake_case identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::feed::FeedClass;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Animal category the ration is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryKey {
    /// Lactating dairy cow
    #[serde(rename = "lactating_cow")]
    LactatingCow,
    /// Dry-period cow
    #[serde(rename = "dry_cow")]
    DryCow,
    /// Mature bull
    #[serde(rename = "mature_bull")]
    MatureBull,
    /// Calf, 1 to 6 months
    #[serde(rename = "calf_1_6")]
    Calf,
}

impl CategoryKey {
    /// Every category, in display order
    pub const ALL: [Self; 4] = [
        Self::LactatingCow,
        Self::DryCow,
        Self::MatureBull,
        Self::Calf,
    ];

    /// Stable machine key
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LactatingCow => "lactating_cow",
            Self::DryCow => "dry_cow",
            Self::MatureBull => "mature_bull",
            Self::Calf => "calf_1_6",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(Self::as_str).collect();
                AppError::not_found(format!("Category '{key}'"))
                    .with_details(serde_json::json!({ "known_categories": known }))
            })
    }
}

/// Target percentage split of the as-fed ration across feed classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassRatios {
    /// Roughage share (%)
    pub roughage: f64,
    /// Energy concentrate share (%)
    pub energy: f64,
    /// Protein concentrate share (%)
    pub protein: f64,
}

impl ClassRatios {
    /// Create a ratio profile
    #[must_use]
    pub const fn new(roughage: f64, energy: f64, protein: f64) -> Self {
        Self {
            roughage,
            energy,
            protein,
        }
    }

    /// Share of one class (%)
    #[must_use]
    pub const fn get(&self, class: FeedClass) -> f64 {
        match class {
            FeedClass::Roughage => self.roughage,
            FeedClass::Energy => self.energy,
            FeedClass::Protein => self.protein,
        }
    }

    /// Sum of all three shares
    #[must_use]
    pub fn total(&self) -> f64 {
        self.roughage + self.energy + self.protein
    }

    /// Combined energy and protein concentrate share
    #[must_use]
    pub fn concentrate(&self) -> f64 {
        self.energy + self.protein
    }
}

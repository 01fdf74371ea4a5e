// ABOUTME: Feed composition records and their deterministic nutritional class
// ABOUTME: Also defines the energy basis selector and user-pinned per-feed amounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nutritional class of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedClass {
    /// Bulk and structural fiber (straw, stover, silage, hay)
    Roughage,
    /// Energy concentrates (grains)
    Energy,
    /// Protein concentrates (meals, cakes, brans)
    Protein,
}

impl FeedClass {
    /// All classes in allocation order
    pub const ALL: [Self; 3] = [Self::Roughage, Self::Energy, Self::Protein];

    /// Machine key
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Roughage => "roughage",
            Self::Energy => "energy",
            Self::Protein => "protein",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Roughage => "Roughage",
            Self::Energy => "Energy",
            Self::Protein => "Protein",
        }
    }
}

impl fmt::Display for FeedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedClass {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "roughage" => Ok(Self::Roughage),
            "energy" => Ok(Self::Energy),
            "protein" => Ok(Self::Protein),
            other => Err(AppError::invalid_input(format!(
                "Unknown feed class '{other}' (expected roughage, energy or protein)"
            ))),
        }
    }
}

/// Energy scale a requirement is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyBasis {
    /// Metabolizable energy
    #[serde(rename = "ME")]
    Me,
    /// Net energy for lactation
    #[serde(rename = "NeL")]
    Nel,
}

impl EnergyBasis {
    /// Display abbreviation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Me => "ME",
            Self::Nel => "NeL",
        }
    }
}

impl fmt::Display for EnergyBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable feed composition record, all values per kg as fed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    /// Unique feed name
    pub name: String,
    /// Metabolizable energy (MJ/kg)
    pub energy_me: f64,
    /// Net energy for lactation (MJ/kg)
    pub energy_nel: f64,
    /// Crude protein mass fraction (kg/kg, 0..=1)
    pub protein: f64,
    /// Dry matter mass fraction (kg/kg, 0 < dm <= 1)
    pub dry_matter: f64,
    /// Fixed nutritional class
    pub class: FeedClass,
}

impl Feed {
    /// Create a feed record
    pub fn new(
        name: impl Into<String>,
        energy_me: f64,
        energy_nel: f64,
        protein: f64,
        dry_matter: f64,
        class: FeedClass,
    ) -> Self {
        Self {
            name: name.into(),
            energy_me,
            energy_nel,
            protein,
            dry_matter,
            class,
        }
    }

    /// Energy per kg in the requested basis
    #[must_use]
    pub const fn energy(&self, basis: EnergyBasis) -> f64 {
        match basis {
            EnergyBasis::Me => self.energy_me,
            EnergyBasis::Nel => self.energy_nel,
        }
    }
}

/// A user-pinned as-fed amount for one feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedAmount {
    /// Name of the pinned feed
    pub feed_name: String,
    /// As-fed amount (kg/day)
    pub amount_kg: f64,
}

impl UserFeedAmount {
    /// Create an override
    pub fn new(feed_name: impl Into<String>, amount_kg: f64) -> Self {
        Self {
            feed_name: feed_name.into(),
            amount_kg,
        }
    }

    /// Parse an override written as `name=kg`
    ///
    /// The split happens at the last `=`, so names with commas or apostrophes
    /// parse unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the separator is missing, the name is empty, or the
    /// amount is not a finite non-negative number.
    pub fn parse(text: &str) -> AppResult<Self> {
        let (name, amount) = text.rsplit_once('=').ok_or_else(|| {
            AppError::invalid_input(format!("Override '{text}' must be written as name=kg"))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input(format!(
                "Override '{text}' has an empty feed name"
            )));
        }
        let amount_kg: f64 = amount.trim().parse().map_err(|_| {
            AppError::invalid_input(format!("Override amount '{amount}' is not a number"))
        })?;
        if !amount_kg.is_finite() || amount_kg < 0.0 {
            return Err(AppError::out_of_range(format!(
                "Override amount for '{name}' must be a non-negative number of kg"
            )));
        }
        Ok(Self::new(name, amount_kg))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override_splits_at_last_equals() {
        let amount = UserFeedAmount::parse("Corn silage, wet, with grain = 12.5").unwrap();
        assert_eq!(amount.feed_name, "Corn silage, wet, with grain");
        assert!((amount.amount_kg - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_override_rejects_bad_input() {
        assert!(UserFeedAmount::parse("Alfalfa hay").is_err());
        assert!(UserFeedAmount::parse("=3").is_err());
        assert!(UserFeedAmount::parse("Alfalfa hay=abc").is_err());
        assert!(UserFeedAmount::parse("Alfalfa hay=-1").is_err());
    }

    #[test]
    fn test_feed_class_from_str() {
        assert_eq!("Energy".parse::<FeedClass>().unwrap(), FeedClass::Energy);
        assert!("mineral".parse::<FeedClass>().is_err());
    }
}

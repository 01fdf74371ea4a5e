// ABOUTME: Read-only reference dataset: feed composition, category policies and norm tables
// ABOUTME: The shipped dataset is validated once; custom datasets fail loudly on load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Reference Data Store
//!
//! Every category-specific constant lives in one [`CategoryPolicy`] row: the
//! class ratio profile, the minimum roughage share, the dry-matter intake
//! fraction, the requirement table and how it is looked up. Stages look the
//! policy up once instead of branching on the category themselves.

mod categories;
mod feeds;
mod norms;
/// Invariant checks over a dataset
pub mod validation;

pub use validation::{ValidationReport, Violation};

use ration_core::errors::{AppError, AppResult};
use ration_core::models::{
    BullNormRow, CategoryKey, ClassRatios, EnergyBasis, Feed, FeedClass, NormPoint,
};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, warn};

static BUILTIN: OnceLock<ReferenceData> = OnceLock::new();

/// How a category's requirement is looked up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "lookup", content = "rows", rename_all = "snake_case")]
pub enum NormSource {
    /// Piecewise-linear interpolation over NeL rows, clamped at the ends
    Interpolated(Vec<NormPoint>),
    /// Closest tabulated weight over ME rows, ties toward the lower weight
    NearestMatch(Vec<BullNormRow>),
}

impl NormSource {
    /// Energy basis the table is expressed in
    #[must_use]
    pub const fn basis(&self) -> EnergyBasis {
        match self {
            Self::Interpolated(_) => EnergyBasis::Nel,
            Self::NearestMatch(_) => EnergyBasis::Me,
        }
    }

    /// Number of rows in the table
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Interpolated(rows) => rows.len(),
            Self::NearestMatch(rows) => rows.len(),
        }
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All category-specific constants and behaviors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPolicy {
    /// Category this policy applies to
    pub category: CategoryKey,
    /// Display label
    pub label: String,
    /// Target class split (%)
    pub ratios: ClassRatios,
    /// Advisory note shown with the requirement
    pub note: String,
    /// Roughage share below which acidosis risk is flagged (%)
    pub min_roughage_pct: f64,
    /// Maximum dry-matter intake as a fraction of live weight
    pub dm_intake_fraction: f64,
    /// Requirement table and its lookup rule
    pub norms: NormSource,
    /// Whether milk yield adds net energy to the requirement
    pub milk_energy: bool,
    /// Category-specific husbandry guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husbandry_note: Option<String>,
}

impl CategoryPolicy {
    /// Energy basis of the category's requirement
    #[must_use]
    pub const fn basis(&self) -> EnergyBasis {
        self.norms.basis()
    }
}

/// Feed table plus one policy per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Feed composition table
    pub feeds: Vec<Feed>,
    /// Category policies
    pub policies: Vec<CategoryPolicy>,
}

impl ReferenceData {
    /// The shipped dataset
    ///
    /// Validated on first use; violations are logged individually. The shipped
    /// tables are covered by tests, so a violation here means the tables were
    /// edited incorrectly.
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            let data = Self {
                feeds: feeds::builtin_feeds(),
                policies: categories::builtin_policies(),
            };
            let report = data.validate();
            if report.is_valid() {
                debug!(
                    feeds = data.feeds.len(),
                    categories = data.policies.len(),
                    "Reference data validated"
                );
            } else {
                for violation in &report.violations {
                    warn!(%violation, "Built-in reference data violation");
                }
            }
            data
        })
    }

    /// Run every invariant check and collect the violations
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        validation::validate(self)
    }

    /// Consume the dataset, returning it only if every invariant holds
    ///
    /// # Errors
    ///
    /// Returns `REFERENCE_DATA_INVALID` with every violation in the details
    pub fn validated(self) -> AppResult<Self> {
        let report = self.validate();
        if report.is_valid() {
            return Ok(self);
        }
        let messages: Vec<String> = report.violations.iter().map(ToString::to_string).collect();
        Err(AppError::reference_data(format!(
            "{} reference data violation(s)",
            messages.len()
        ))
        .with_details(serde_json::json!({ "violations": messages })))
    }

    /// Parse a JSON dataset and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the dataset violates an invariant
    pub fn from_json(json: &str) -> AppResult<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validated()
    }

    /// Policy for a category, if the dataset defines one
    #[must_use]
    pub fn policy(&self, category: CategoryKey) -> Option<&CategoryPolicy> {
        self.policies.iter().find(|p| p.category == category)
    }

    /// Policy for a category, treating absence as a configuration error
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the dataset has no policy for the category
    pub fn require_policy(&self, category: CategoryKey) -> AppResult<&CategoryPolicy> {
        self.policy(category)
            .ok_or_else(|| AppError::not_found(format!("Policy for category '{category}'")))
    }

    /// Feed by exact name
    #[must_use]
    pub fn feed_by_name(&self, name: &str) -> Option<&Feed> {
        self.feeds.iter().find(|f| f.name == name)
    }

    /// Feeds of one class, in table order
    pub fn feeds_by_class(&self, class: FeedClass) -> impl Iterator<Item = &Feed> {
        self.feeds.iter().filter(move |f| f.class == class)
    }

    /// Selected feeds in table order; unknown and repeated names are ignored
    #[must_use]
    pub fn select_feeds(&self, names: &[String]) -> Vec<Feed> {
        self.feeds
            .iter()
            .filter(|f| names.iter().any(|n| n == &f.name))
            .cloned()
            .collect()
    }
}

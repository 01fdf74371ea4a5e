// ABOUTME: Structured invariant checks over a reference dataset
// ABOUTME: Collects every violation instead of stopping at the first one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::{CategoryPolicy, NormSource, ReferenceData};
use ration_core::models::{CategoryKey, FeedClass};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Allowed deviation of a ratio profile's sum from 100 (%)
pub const RATIO_SUM_TOLERANCE: f64 = 0.1;

/// One violated reference-data invariant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Violation {
    /// A feed attribute is outside its valid range
    InvalidFeedAttribute {
        /// Feed name (may be empty)
        feed: String,
        /// Attribute that failed
        attribute: &'static str,
        /// Offending value
        value: f64,
    },
    /// Feed name is empty
    EmptyFeedName {
        /// Position in the feed table
        index: usize,
    },
    /// Two feeds share a name
    DuplicateFeedName {
        /// Repeated name
        feed: String,
    },
    /// Ratio profile does not sum to 100
    RatioSumOff {
        /// Category
        category: CategoryKey,
        /// Actual sum (%)
        sum: f64,
    },
    /// A ratio is negative or not finite
    NegativeRatio {
        /// Category
        category: CategoryKey,
        /// Class carrying the bad ratio
        class: FeedClass,
        /// Offending value (%)
        value: f64,
    },
    /// Requirement table has no rows
    EmptyNormTable {
        /// Category
        category: CategoryKey,
    },
    /// Requirement table weights are not strictly ascending
    UnsortedNormTable {
        /// Category
        category: CategoryKey,
        /// Index of the first row out of order
        row: usize,
    },
    /// A requirement row holds a non-positive value
    NonPositiveNormRow {
        /// Category
        category: CategoryKey,
        /// Row index
        row: usize,
    },
    /// No policy for a category
    MissingCategoryPolicy {
        /// Category
        category: CategoryKey,
    },
    /// More than one policy for a category
    DuplicateCategoryPolicy {
        /// Category
        category: CategoryKey,
    },
    /// Dry-matter intake fraction outside (0, 0.1]
    InvalidDryMatterFraction {
        /// Category
        category: CategoryKey,
        /// Offending value
        value: f64,
    },
    /// Minimum roughage share outside [0, 100]
    InvalidMinimumRoughage {
        /// Category
        category: CategoryKey,
        /// Offending value (%)
        value: f64,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFeedAttribute {
                feed,
                attribute,
                value,
            } => write!(f, "feed '{feed}': {attribute} = {value} is out of range"),
            Self::EmptyFeedName { index } => write!(f, "feed #{index} has an empty name"),
            Self::DuplicateFeedName { feed } => write!(f, "feed '{feed}' is defined more than once"),
            Self::RatioSumOff { category, sum } => {
                write!(f, "{category}: class ratios sum to {sum}, expected 100")
            }
            Self::NegativeRatio {
                category,
                class,
                value,
            } => write!(f, "{category}: {class} ratio {value} is negative"),
            Self::EmptyNormTable { category } => write!(f, "{category}: norm table is empty"),
            Self::UnsortedNormTable { category, row } => write!(
                f,
                "{category}: norm table weight at row {row} is not above the previous row"
            ),
            Self::NonPositiveNormRow { category, row } => {
                write!(f, "{category}: norm table row {row} has a non-positive value")
            }
            Self::MissingCategoryPolicy { category } => {
                write!(f, "{category}: no category policy defined")
            }
            Self::DuplicateCategoryPolicy { category } => {
                write!(f, "{category}: category policy is defined more than once")
            }
            Self::InvalidDryMatterFraction { category, value } => write!(
                f,
                "{category}: dry-matter intake fraction {value} must be in (0, 0.1]"
            ),
            Self::InvalidMinimumRoughage { category, value } => write!(
                f,
                "{category}: minimum roughage share {value}% must be in [0, 100]"
            ),
        }
    }
}

/// Result of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Every violated invariant, in check order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when no invariant is violated
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Check every feed, policy and norm table in the dataset
#[must_use]
pub fn validate(data: &ReferenceData) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_feeds(data, &mut report);

    for category in CategoryKey::ALL {
        match data.policies.iter().filter(|p| p.category == category).count() {
            0 => report.push(Violation::MissingCategoryPolicy { category }),
            1 => {}
            _ => report.push(Violation::DuplicateCategoryPolicy { category }),
        }
    }
    for policy in &data.policies {
        check_policy(policy, &mut report);
    }

    report
}

fn check_feeds(data: &ReferenceData, report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    for (index, feed) in data.feeds.iter().enumerate() {
        if feed.name.trim().is_empty() {
            report.push(Violation::EmptyFeedName { index });
        } else if !seen.insert(feed.name.as_str()) {
            report.push(Violation::DuplicateFeedName {
                feed: feed.name.clone(),
            });
        }

        let checks: [(&'static str, f64, bool); 4] = [
            ("energy_me", feed.energy_me, feed.energy_me >= 0.0),
            ("energy_nel", feed.energy_nel, feed.energy_nel >= 0.0),
            ("protein", feed.protein, (0.0..=1.0).contains(&feed.protein)),
            (
                "dry_matter",
                feed.dry_matter,
                feed.dry_matter > 0.0 && feed.dry_matter <= 1.0,
            ),
        ];
        for (attribute, value, ok) in checks {
            if !ok || !value.is_finite() {
                report.push(Violation::InvalidFeedAttribute {
                    feed: feed.name.clone(),
                    attribute,
                    value,
                });
            }
        }
    }
}

fn check_policy(policy: &CategoryPolicy, report: &mut ValidationReport) {
    let category = policy.category;

    for class in FeedClass::ALL {
        let value = policy.ratios.get(class);
        if value < 0.0 || !value.is_finite() {
            report.push(Violation::NegativeRatio {
                category,
                class,
                value,
            });
        }
    }
    let sum = policy.ratios.total();
    if (sum - 100.0).abs() > RATIO_SUM_TOLERANCE {
        report.push(Violation::RatioSumOff { category, sum });
    }

    if !(policy.dm_intake_fraction > 0.0 && policy.dm_intake_fraction <= 0.1) {
        report.push(Violation::InvalidDryMatterFraction {
            category,
            value: policy.dm_intake_fraction,
        });
    }
    if !(0.0..=100.0).contains(&policy.min_roughage_pct) {
        report.push(Violation::InvalidMinimumRoughage {
            category,
            value: policy.min_roughage_pct,
        });
    }

    let rows: Vec<[f64; 3]> = match &policy.norms {
        NormSource::Interpolated(points) => points
            .iter()
            .map(|p| [p.weight_kg, p.nel_mj, p.protein_g])
            .collect(),
        NormSource::NearestMatch(rows) => rows
            .iter()
            .map(|r| [r.weight_kg, r.me_mj, r.protein_g])
            .collect(),
    };
    check_rows(category, &rows, report);
}

fn check_rows(category: CategoryKey, rows: &[[f64; 3]], report: &mut ValidationReport) {
    if rows.is_empty() {
        report.push(Violation::EmptyNormTable { category });
        return;
    }
    for (row, values) in rows.iter().enumerate() {
        if values.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            report.push(Violation::NonPositiveNormRow { category, row });
        }
    }
    if let Some(row) = rows
        .windows(2)
        .position(|pair| pair[1][0] <= pair[0][0])
        .map(|i| i + 1)
    {
        report.push(Violation::UnsortedNormTable { category, row });
    }
}

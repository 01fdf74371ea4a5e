// ABOUTME: Two-phase allocation of the effective total across feed classes and feeds
// ABOUTME: User-pinned amounts are placed verbatim, the remainder split by class-specific weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Distribution Allocator
//!
//! 1. Pinned phase: every override for a selected feed becomes an item as is.
//! 2. Proportional phase: each class gets `percent / 100 * effective` minus what
//!    was already pinned in it, split across its unpinned feeds in proportion to
//!    the attribute that defines the class (dry matter for roughage, energy in
//!    the active basis for energy feeds, crude protein for protein feeds).

use crate::config::RationConfig;
use crate::numeric::{finite_or_zero, safe_divide};
use ration_core::models::{ClassRatios, EnergyBasis, Feed, FeedClass, UserFeedAmount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-feed amounts fixed by the user, keyed by feed name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinnedAmounts(BTreeMap<String, f64>);

impl PinnedAmounts {
    /// Overrides that apply to the selection
    ///
    /// Overrides for feeds outside the selection are dropped. Amounts are
    /// clamped to zero or more, non-finite amounts count as zero, and a later
    /// override for the same feed replaces an earlier one.
    #[must_use]
    pub fn from_overrides(overrides: &[UserFeedAmount], selected: &[Feed]) -> Self {
        let mut pinned = BTreeMap::new();
        for entry in overrides {
            if selected.iter().any(|f| f.name == entry.feed_name) {
                pinned.insert(
                    entry.feed_name.clone(),
                    finite_or_zero(entry.amount_kg).max(0.0),
                );
            }
        }
        Self(pinned)
    }

    /// Pinned amount for a feed
    #[must_use]
    pub fn get(&self, feed_name: &str) -> Option<f64> {
        self.0.get(feed_name).copied()
    }

    /// Whether the feed is pinned
    #[must_use]
    pub fn contains(&self, feed_name: &str) -> bool {
        self.0.contains_key(feed_name)
    }

    /// Sum of all pinned amounts (kg)
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Whether nothing is pinned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pinned feeds in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, kg)| (name.as_str(), *kg))
    }
}

/// Kilograms per feed class
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassAmounts {
    /// Roughage (kg)
    pub roughage: f64,
    /// Energy concentrate (kg)
    pub energy: f64,
    /// Protein concentrate (kg)
    pub protein: f64,
}

impl ClassAmounts {
    /// Amount for one class
    #[must_use]
    pub const fn get(&self, class: FeedClass) -> f64 {
        match class {
            FeedClass::Roughage => self.roughage,
            FeedClass::Energy => self.energy,
            FeedClass::Protein => self.protein,
        }
    }

    fn add(&mut self, class: FeedClass, kg: f64) {
        match class {
            FeedClass::Roughage => self.roughage += kg,
            FeedClass::Energy => self.energy += kg,
            FeedClass::Protein => self.protein += kg,
        }
    }

    /// Sum over all classes
    #[must_use]
    pub fn total(&self) -> f64 {
        self.roughage + self.energy + self.protein
    }
}

/// One feed's daily amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionItem {
    /// The feed
    pub feed: Feed,
    /// Its class
    pub class: FeedClass,
    /// As-fed amount (kg/day)
    pub kg: f64,
    /// Dry matter in that amount (kg/day)
    pub dm_kg: f64,
    /// Amount came from a user override
    pub is_user_defined: bool,
}

impl DistributionItem {
    fn new(feed: &Feed, kg: f64, is_user_defined: bool) -> Self {
        Self {
            feed: feed.clone(),
            class: feed.class,
            kg,
            dm_kg: kg * feed.dry_matter,
            is_user_defined,
        }
    }
}

/// How the distribution was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationOutcome {
    /// Nothing to allocate
    Empty,
    /// Pinned amounts already meet the effective total
    PinnedOnly,
    /// Remainder split proportionally after pinning
    Proportional,
}

/// Full allocation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Which phase produced the final answer
    pub outcome: AllocationOutcome,
    /// Per-class sums of the items
    pub per_class_kg: ClassAmounts,
    /// Items sorted by feed name
    pub items: Vec<DistributionItem>,
    /// Total dry matter over all items (kg)
    pub dm_total_kg: f64,
}

impl Distribution {
    /// No items
    #[must_use]
    pub fn empty() -> Self {
        Self {
            outcome: AllocationOutcome::Empty,
            per_class_kg: ClassAmounts::default(),
            items: Vec::new(),
            dm_total_kg: 0.0,
        }
    }

    /// Sum of all item amounts (kg)
    #[must_use]
    pub fn total_kg(&self) -> f64 {
        self.items.iter().map(|i| i.kg).sum()
    }

    /// Item for a feed
    #[must_use]
    pub fn item(&self, feed_name: &str) -> Option<&DistributionItem> {
        self.items.iter().find(|i| i.feed.name == feed_name)
    }

    /// Items of one class
    pub fn items_of(&self, class: FeedClass) -> impl Iterator<Item = &DistributionItem> {
        self.items.iter().filter(move |i| i.class == class)
    }

    fn finish(outcome: AllocationOutcome, mut items: Vec<DistributionItem>) -> Self {
        items.sort_by(|a, b| a.feed.name.cmp(&b.feed.name));
        let mut per_class_kg = ClassAmounts::default();
        for item in &items {
            per_class_kg.add(item.class, item.kg);
        }
        let dm_total_kg = items.iter().map(|i| i.dm_kg).sum();
        Self {
            outcome,
            per_class_kg,
            items,
            dm_total_kg,
        }
    }
}

fn class_weight(feed: &Feed, basis: EnergyBasis, floor: f64) -> f64 {
    let raw = match feed.class {
        FeedClass::Roughage => feed.dry_matter,
        FeedClass::Energy => feed.energy(basis),
        FeedClass::Protein => feed.protein,
    };
    finite_or_zero(raw).max(floor)
}

/// Allocate the effective total across the selected feeds
#[must_use]
pub fn build_distribution(
    selected: &[Feed],
    ratios: &ClassRatios,
    basis: EnergyBasis,
    effective_total_kg: f64,
    pinned: &PinnedAmounts,
    config: &RationConfig,
) -> Distribution {
    if !(effective_total_kg.is_finite() && effective_total_kg > 0.0) || selected.is_empty() {
        return Distribution::empty();
    }

    let mut items = Vec::with_capacity(selected.len());
    let mut pinned_by_class = ClassAmounts::default();
    for feed in selected {
        if let Some(kg) = pinned.get(&feed.name) {
            items.push(DistributionItem::new(feed, kg, true));
            pinned_by_class.add(feed.class, kg);
        }
    }

    let pinned_total = pinned_by_class.total();
    if pinned_total >= effective_total_kg {
        debug!(pinned_total, effective_total_kg, "Pinned amounts cover the total");
        return Distribution::finish(AllocationOutcome::PinnedOnly, items);
    }

    let floor = config.allocation.min_class_weight;
    for class in FeedClass::ALL {
        let target = ratios.get(class) / 100.0 * effective_total_kg;
        let remaining = (target - pinned_by_class.get(class)).max(0.0);
        if remaining <= 0.0 {
            continue;
        }

        let members: Vec<(&Feed, f64)> = selected
            .iter()
            .filter(|f| f.class == class && !pinned.contains(&f.name))
            .map(|f| (f, class_weight(f, basis, floor)))
            .collect();
        let weight_sum: f64 = members.iter().map(|(_, w)| w).sum();
        if weight_sum <= 0.0 {
            continue;
        }

        for (feed, weight) in members {
            let share = safe_divide(weight * remaining, weight_sum, 0.0);
            if share > 0.0 {
                items.push(DistributionItem::new(feed, share, false));
            }
        }
    }

    let distribution = Distribution::finish(AllocationOutcome::Proportional, items);
    debug!(
        items = distribution.items.len(),
        total_kg = distribution.total_kg(),
        dm_total_kg = distribution.dm_total_kg,
        "Distribution built"
    );
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feeds() -> Vec<Feed> {
        vec![
            Feed::new("Hay", 8.0, 5.0, 0.15, 0.9, FeedClass::Roughage),
            Feed::new("Silage", 9.0, 6.0, 0.08, 0.3, FeedClass::Roughage),
            Feed::new("Grain", 12.0, 8.0, 0.1, 0.9, FeedClass::Energy),
        ]
    }

    #[test]
    fn test_roughage_weighted_by_dry_matter() {
        let dist = build_distribution(
            &feeds(),
            &ClassRatios::new(60.0, 40.0, 0.0),
            EnergyBasis::Nel,
            10.0,
            &PinnedAmounts::default(),
            &RationConfig::default(),
        );
        let hay = dist.item("Hay").map_or(0.0, |i| i.kg);
        let silage = dist.item("Silage").map_or(0.0, |i| i.kg);
        assert!((hay - 4.5).abs() < 1e-9);
        assert!((silage - 1.5).abs() < 1e-9);
        assert_eq!(dist.outcome, AllocationOutcome::Proportional);
    }

    #[test]
    fn test_override_outside_selection_ignored() {
        let selected = feeds();
        let pinned = PinnedAmounts::from_overrides(
            &[
                UserFeedAmount::new("Soybean meal", 3.0),
                UserFeedAmount::new("Hay", -2.0),
                UserFeedAmount::new("Grain", 1.0),
                UserFeedAmount::new("Grain", 2.0),
            ],
            &selected,
        );
        assert!(!pinned.contains("Soybean meal"));
        assert_eq!(pinned.get("Hay"), Some(0.0));
        assert_eq!(pinned.get("Grain"), Some(2.0));
        assert!((pinned.total() - 2.0).abs() < f64::EPSILON);
    }
}

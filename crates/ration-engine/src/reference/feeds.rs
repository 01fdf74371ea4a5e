// ABOUTME: Shipped feed composition table, values per kg as fed
// ABOUTME: Class tags are fixed attributes of each feed, never inferred from composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use ration_core::models::{Feed, FeedClass};

/// (name, ME MJ/kg, NeL MJ/kg, crude protein kg/kg, dry matter kg/kg, class)
type FeedRow = (&'static str, f64, f64, f64, f64, FeedClass);

const FEED_TABLE: [FeedRow; 31] = [
    // Straw, stover, hay and silage
    ("Wheat straw", 6.13, 3.5, 0.04, 0.90, FeedClass::Roughage),
    ("Barley straw", 6.13, 3.5, 0.04, 0.90, FeedClass::Roughage),
    ("Rice straw", 5.25, 3.0, 0.035, 0.90, FeedClass::Roughage),
    ("Corn stover", 7.00, 4.0, 0.06, 0.90, FeedClass::Roughage),
    ("Alfalfa hay", 8.75, 5.0, 0.15, 0.90, FeedClass::Roughage),
    ("Camelthorn hay", 8.75, 5.0, 0.10, 0.90, FeedClass::Roughage),
    ("Corn silage, wet, with grain", 9.60, 6.0, 0.08, 0.30, FeedClass::Roughage),
    ("Corn silage, wet, without grain", 7.20, 4.5, 0.08, 0.30, FeedClass::Roughage),
    ("Corn silage, moist, with grain", 10.08, 6.3, 0.075, 0.36, FeedClass::Roughage),
    ("Corn silage, moist, without grain", 7.20, 4.5, 0.075, 0.36, FeedClass::Roughage),
    ("Corn silage, dry, with grain", 10.08, 6.3, 0.07, 0.40, FeedClass::Roughage),
    ("Corn silage, dry, without grain", 7.20, 4.5, 0.07, 0.40, FeedClass::Roughage),
    ("Bean haulm", 7.00, 4.0, 0.12, 0.90, FeedClass::Roughage),
    ("Mung bean haulm", 7.00, 4.0, 0.12, 0.90, FeedClass::Roughage),
    ("Cotton boll hulls", 5.25, 3.0, 0.10, 0.90, FeedClass::Roughage),
    // Grains
    ("Corn grain", 12.72, 8.0, 0.10, 0.90, FeedClass::Energy),
    ("Barley grain", 12.72, 8.0, 0.11, 0.90, FeedClass::Energy),
    ("Wheat grain", 12.72, 8.0, 0.12, 0.90, FeedClass::Energy),
    ("Triticale grain", 12.72, 8.0, 0.10, 0.90, FeedClass::Energy),
    ("Sorghum grain", 11.13, 7.0, 0.10, 0.90, FeedClass::Energy),
    ("Millet grain", 10.34, 6.5, 0.10, 0.90, FeedClass::Energy),
    ("Rice grain", 12.402, 7.8, 0.10, 0.90, FeedClass::Energy),
    // Meals, cakes and brans
    ("Soybean meal", 13.43, 8.5, 0.45, 0.90, FeedClass::Protein),
    ("Rapeseed meal", 11.376, 7.2, 0.38, 0.90, FeedClass::Protein),
    ("Cottonseed meal", 10.27, 6.5, 0.32, 0.90, FeedClass::Protein),
    ("Cottonseed cake", 10.744, 6.8, 0.25, 0.90, FeedClass::Protein),
    ("Linseed cake", 10.744, 6.8, 0.22, 0.90, FeedClass::Protein),
    ("Whole cottonseed", 15.8, 10.0, 0.20, 0.90, FeedClass::Protein),
    ("Wheat bran", 9.48, 6.0, 0.16, 0.90, FeedClass::Protein),
    ("Soybean bran", 9.48, 6.0, 0.15, 0.90, FeedClass::Protein),
    ("Corn bran", 10.27, 6.5, 0.15, 0.90, FeedClass::Protein),
];

pub(super) fn builtin_feeds() -> Vec<Feed> {
    FEED_TABLE
        .iter()
        .map(|&(name, me, nel, protein, dm, class)| Feed::new(name, me, nel, protein, dm, class))
        .collect()
}

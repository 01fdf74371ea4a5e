// ABOUTME: Domain models for livestock feed ration formulation
// ABOUTME: Feed records, nutritional classes, animal categories, norm rows and overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Domain models shared by the engine and its callers.
//!
//! All quantities are per animal per day unless stated otherwise. Feed
//! attributes are expressed per kilogram of feed as fed (fresh weight).

/// Animal categories and their class ratio profiles
pub mod category;
/// Feed records, feed classes, energy bases and per-feed overrides
pub mod feed;
/// Tabulated requirement rows used by the norm resolver
pub mod norms;

pub use category::{CategoryKey, ClassRatios};
pub use feed::{EnergyBasis, Feed, FeedClass, UserFeedAmount};
pub use norms::{BullNormRow, NormPoint};

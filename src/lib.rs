// ABOUTME: Library facade for the livestock feed ration tools
// ABOUTME: Re-exports the domain model and engine, plus logging and output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Feed Ration
//!
//! Computes a daily feed ration for a livestock animal from its category, live
//! weight, milk yield and a set of candidate feeds: the nutrient requirement,
//! the as-fed mass that meets it under a dry-matter intake ceiling, how that
//! mass splits across roughage, energy and protein feeds, and warnings and
//! tips about the result.
//!
//! ## Architecture
//!
//! - **`ration_core`**: error types and domain models
//! - **`ration_engine`**: reference data and the calculation pipeline
//! - **`formatters`**: JSON and plain-text output
//! - **`logging`**: tracing subscriber setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use feed_ration::{compute_ration, CategoryKey, RationRequest};
//!
//! let request = RationRequest::new(CategoryKey::LactatingCow, 500.0)
//!     .with_milk(20.0)
//!     .with_feeds(["Alfalfa hay", "Corn grain", "Soybean meal"]);
//! let result = compute_ration(&request);
//! println!("{:.1} kg/day as fed", result.effective_total_kg());
//! ```

/// Output formats for command-line and library consumers
pub mod formatters;

/// Structured logging configuration
pub mod logging;

pub use ration_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use ration_core::models::{
    BullNormRow, CategoryKey, ClassRatios, EnergyBasis, Feed, FeedClass, NormPoint,
    UserFeedAmount,
};
pub use ration_engine::{
    compute_ration, compute_ration_with, AllocationOutcome, CategoryPolicy, Distribution,
    DistributionItem, LimitingFactor, RationConfig, RationRequest, RationResult, ReferenceData,
    Tip, ValidationReport, Violation, Warning,
};

/// Calculation engine
pub use ration_engine as engine;

// ABOUTME: Core types for the feed ration formulation engine
// ABOUTME: Foundation crate with error handling and livestock feed domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Ration Core
//!
//! Foundation crate providing shared types for the feed ration engine. This
//! crate is designed to change infrequently, enabling incremental compilation
//! benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Feed records, feed classes, animal categories and overrides

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (Feed, `FeedClass`, `CategoryKey`, overrides, norm rows)
pub mod models;

// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet tracing setup, reference feed lookup and common ration requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used
)]
//! Shared test utilities for `feed_ration`

use feed_ration::{CategoryKey, Feed, RationRequest, ReferenceData};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Reference feed by name
pub fn feed(name: &str) -> Feed {
    ReferenceData::builtin()
        .feed_by_name(name)
        .cloned()
        .expect("feed exists in the built-in table")
}

/// 500 kg lactating cow, no milk, one feed per class
pub fn lactating_cow_request() -> RationRequest {
    RationRequest::new(CategoryKey::LactatingCow, 500.0).with_feeds([
        "Alfalfa hay",
        "Corn grain",
        "Soybean meal",
    ])
}

/// Assert two floats agree within `tol`
pub fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() < tol,
        "{what}: expected {expected}, got {actual}"
    );
}

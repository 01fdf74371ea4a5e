// ABOUTME: feeds, categories and validate subcommands over the reference dataset
// ABOUTME: Validation exits non-zero when any invariant is violated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::print;
use anyhow::Result;
use feed_ration::formatters::{CategoryTable, FeedTable, OutputFormat};
use feed_ration::{ErrorCode, FeedClass, ReferenceData};
use std::process::ExitCode;
use tracing::warn;

/// Print the feed table, optionally limited to one class
pub fn list_feeds(reference: &ReferenceData, class: Option<&str>, format: OutputFormat) -> Result<()> {
    let feeds = match class {
        Some(name) => {
            let class: FeedClass = name.parse()?;
            reference.feeds_by_class(class).collect()
        }
        None => reference.feeds.iter().collect(),
    };
    print(&FeedTable { feeds }, format)
}

/// Print every category policy
pub fn list_categories(reference: &ReferenceData, format: OutputFormat) -> Result<()> {
    print(
        &CategoryTable {
            policies: &reference.policies,
        },
        format,
    )
}

/// Print the validation report; the exit code flags violations
pub fn validate(reference: &ReferenceData, format: OutputFormat) -> Result<ExitCode> {
    let report = reference.validate();
    print(&report, format)?;
    if report.is_valid() {
        return Ok(ExitCode::SUCCESS);
    }
    warn!(violations = report.violations.len(), "Reference data is invalid");
    let code = ErrorCode::ReferenceDataInvalid.exit_code();
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

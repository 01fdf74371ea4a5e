// ABOUTME: Command implementations for the feed-ration CLI
// ABOUTME: Ration computation plus reference listings and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod compute;
pub mod reference;

use anyhow::Result;
use feed_ration::formatters::{format_output_pretty, OutputFormat, TextReport};
use feed_ration::AppError;
use serde::Serialize;

/// Print a value in the requested format on stdout
pub fn print<T: Serialize + TextReport>(value: &T, format: OutputFormat) -> Result<()> {
    let output = format_output_pretty(value, format).map_err(AppError::from)?;
    let data = output.data.trim_end();
    println!("{data}");
    Ok(())
}

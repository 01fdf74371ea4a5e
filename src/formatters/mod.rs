// ABOUTME: Output format abstraction for ration results and reference listings
// ABOUTME: Supports JSON (default) and a plain-text report for terminals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Output Format Abstraction Layer
//!
//! Every printable value is `Serialize` for JSON and implements [`TextReport`]
//! for the plain-text rendering.
//!
//! ```rust,no_run
//! use feed_ration::formatters::{format_output_pretty, OutputFormat};
//! use feed_ration::{compute_ration, CategoryKey, RationRequest};
//!
//! let request = RationRequest::new(CategoryKey::DryCow, 550.0).with_feeds(["Alfalfa hay"]);
//! let result = compute_ration(&request);
//! if let Ok(output) = format_output_pretty(&result, OutputFormat::Text) {
//!     println!("{}", output.data);
//! }
//! ```

mod text;

pub use text::{CategoryTable, FeedTable, TextReport};

use ration_core::errors::AppError;
use serde::Serialize;
use std::fmt;

/// Output serialization format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// Plain-text report
    Text,
}

impl OutputFormat {
    /// Parse format from string parameter (case-insensitive)
    /// Returns `Json` for unrecognized values
    #[must_use]
    pub fn from_str_param(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Self::Text,
            _ => Self::Json,
        }
    }

    /// Get the MIME content type for this format
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Text => "text/plain",
        }
    }

    /// Get the format name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Formatted output containing the serialized data and metadata
#[derive(Debug, Clone)]
pub struct FormattedOutput {
    /// The serialized data as a string
    pub data: String,
    /// The format used for serialization
    pub format: OutputFormat,
    /// The MIME content type
    pub content_type: &'static str,
}

/// Error type for formatting operations
#[derive(Debug, Clone)]
pub struct FormatError {
    /// Error message describing what went wrong
    pub message: String,
    /// The format that was being used when the error occurred
    pub format: OutputFormat,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Format error ({}): {}", self.format, self.message)
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for AppError {
    fn from(error: FormatError) -> Self {
        Self::internal(error.to_string())
    }
}

fn render<T: Serialize + TextReport>(
    data: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<FormattedOutput, FormatError> {
    let data = match format {
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(data)
            } else {
                serde_json::to_string(data)
            };
            json.map_err(|e| FormatError {
                message: e.to_string(),
                format,
            })?
        }
        OutputFormat::Text => data.render_text(),
    };

    Ok(FormattedOutput {
        data,
        format,
        content_type: format.content_type(),
    })
}

/// Format data compactly in the specified output format
///
/// # Errors
///
/// Returns `FormatError` if JSON serialization fails
pub fn format_output<T: Serialize + TextReport>(
    data: &T,
    format: OutputFormat,
) -> Result<FormattedOutput, FormatError> {
    render(data, format, false)
}

/// Format data for display: indented JSON or the text report
///
/// # Errors
///
/// Returns `FormatError` if JSON serialization fails
pub fn format_output_pretty<T: Serialize + TextReport>(
    data: &T,
    format: OutputFormat,
) -> Result<FormattedOutput, FormatError> {
    render(data, format, true)
}

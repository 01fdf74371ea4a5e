// ABOUTME: compute subcommand - builds a request from flags and prints the ration
// ABOUTME: Rejects unknown feeds and bad measurements before running the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::print;
use anyhow::Result;
use feed_ration::formatters::OutputFormat;
use feed_ration::{
    compute_ration_with, AppError, CategoryKey, RationConfig, RationRequest, ReferenceData,
    UserFeedAmount,
};
use tracing::info;

/// Raw flags of the compute subcommand
pub struct ComputeArgs {
    pub category: String,
    pub weight: f64,
    pub milk: f64,
    pub feeds: Vec<String>,
    pub amounts: Vec<String>,
}

impl ComputeArgs {
    fn to_request(&self) -> Result<RationRequest> {
        let category: CategoryKey = self.category.parse()?;
        let overrides = self
            .amounts
            .iter()
            .map(|entry| UserFeedAmount::parse(entry))
            .collect::<Result<Vec<_>, _>>()?;

        let mut request = RationRequest::new(category, self.weight)
            .with_milk(self.milk)
            .with_feeds(self.feeds.iter().cloned());
        request.overrides = overrides;
        Ok(request)
    }
}

/// Compute and print a ration
pub fn run(args: &ComputeArgs, reference: &ReferenceData, format: OutputFormat) -> Result<()> {
    let config = RationConfig::load().map_err(AppError::from)?;
    let request = args.to_request()?;
    request.validate(reference)?;

    info!(
        category = %request.category,
        weight_kg = request.weight_kg,
        feeds = request.selected_feeds.len(),
        "Computing ration"
    );
    let result = compute_ration_with(&request, reference, &config);
    print(&result, format)
}

// ABOUTME: Plain-text rendering of ration results, listings, validation reports and errors
// ABOUTME: Each report writes through a Formatter so every line is checked with `?`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use ration_core::errors::ErrorResponse;
use ration_core::models::{Feed, FeedClass};
use ration_engine::{CategoryPolicy, NormSource, RationResult, ValidationReport};
use serde::Serialize;
use std::fmt;

/// Values with a human-readable text rendering
pub trait TextReport {
    /// Write the report
    ///
    /// # Errors
    ///
    /// Propagates formatter errors
    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Render the report to a string
    fn render_text(&self) -> String {
        TextDisplay(self).to_string()
    }
}

struct TextDisplay<'a, T: ?Sized>(&'a T);

impl<T: TextReport + ?Sized> fmt::Display for TextDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_text(f)
    }
}

/// Feed listing
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FeedTable<'a> {
    /// Feeds in table order
    pub feeds: Vec<&'a Feed>,
}

/// Category listing
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CategoryTable<'a> {
    /// Policies in table order
    pub policies: &'a [CategoryPolicy],
}

fn format_opt_kg(value: Option<f64>) -> String {
    value.map_or_else(|| "unbounded".to_owned(), |kg| format!("{kg:.2} kg"))
}

impl TextReport for RationResult {
    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ration for {} ({})", self.label, self.category)?;
        if !self.valid_input {
            writeln!(f, "Insufficient input: {}", self.norm.note)?;
            return Ok(());
        }

        writeln!(
            f,
            "Requirement: {:.1} MJ {} / {:.0} g crude protein",
            self.norm.energy_mj, self.norm.basis, self.norm.protein_g
        )?;
        if !self.note.is_empty() {
            writeln!(f, "Note: {}", self.note)?;
        }
        writeln!(
            f,
            "Class split: roughage {}% / energy {}% / protein {}%",
            self.class_percents.roughage, self.class_percents.energy, self.class_percents.protein
        )?;

        if self.selected_feeds.is_empty() {
            writeln!(f, "No feeds selected.")?;
            return Ok(());
        }

        let avg = &self.average;
        writeln!(
            f,
            "Average per kg as fed: ME {:.2} MJ, NeL {:.2} MJ, CP {:.1}%, DM {:.1}%",
            avg.me,
            avg.nel,
            avg.protein * 100.0,
            avg.dry_matter * 100.0
        )?;
        writeln!(
            f,
            "Solved mass: {} (limiting: {})",
            format_opt_kg(self.mass_balance.total_kg),
            self.mass_balance.limiting
        )?;
        writeln!(
            f,
            "Dry-matter limit: {:.2} kg DM, as fed {}",
            self.dry_matter.max_dm_kg,
            format_opt_kg(self.dry_matter.as_fed_max_kg)
        )?;
        writeln!(
            f,
            "Effective total: {:.2} kg/day, coverage {}%",
            self.effective_total_kg(),
            self.coverage_pct()
        )?;

        writeln!(f)?;
        writeln!(f, "{:<36} {:>9} {:>9} {:>9}", "Feed", "Class", "kg", "DM kg")?;
        for item in &self.distribution.items {
            writeln!(
                f,
                "{:<36} {:>9} {:>9.2} {:>9.2}{}",
                item.feed.name,
                item.class.as_str(),
                item.kg,
                item.dm_kg,
                if item.is_user_defined { "  (fixed)" } else { "" }
            )?;
        }
        let per_class = &self.distribution.per_class_kg;
        writeln!(
            f,
            "Totals: roughage {:.2} kg, energy {:.2} kg, protein {:.2} kg, DM {:.2} kg",
            per_class.roughage, per_class.energy, per_class.protein, self.distribution.dm_total_kg
        )?;
        writeln!(
            f,
            "Supply: {:.1} MJ {}, {:.0} g CP (deficit {:.1} MJ, {:.0} g)",
            self.supply.energy_supply_mj,
            self.norm.basis,
            self.supply.protein_supply_g,
            self.supply.energy_deficit_mj,
            self.supply.protein_deficit_g
        )?;

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  ! {warning}")?;
            }
        }
        if !self.tips.is_empty() {
            writeln!(f)?;
            writeln!(f, "Tips:")?;
            for tip in &self.tips {
                writeln!(f, "  - {tip}")?;
            }
        }
        Ok(())
    }
}

impl TextReport for FeedTable<'_> {
    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<36} {:>9} {:>7} {:>7} {:>6} {:>6}",
            "Feed", "Class", "ME", "NeL", "CP%", "DM%"
        )?;
        for feed in &self.feeds {
            writeln!(
                f,
                "{:<36} {:>9} {:>7.2} {:>7.2} {:>6.1} {:>6.1}",
                feed.name,
                feed.class.as_str(),
                feed.energy_me,
                feed.energy_nel,
                feed.protein * 100.0,
                feed.dry_matter * 100.0
            )?;
        }
        Ok(())
    }
}

impl TextReport for CategoryTable<'_> {
    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for policy in self.policies {
            let lookup = match policy.norms {
                NormSource::Interpolated(_) => "interpolated",
                NormSource::NearestMatch(_) => "nearest match",
            };
            writeln!(f, "{} - {}", policy.category, policy.label)?;
            writeln!(
                f,
                "  split {}/{}/{} (min roughage {}%), DM intake {:.1}% of live weight",
                policy.ratios.get(FeedClass::Roughage),
                policy.ratios.get(FeedClass::Energy),
                policy.ratios.get(FeedClass::Protein),
                policy.min_roughage_pct,
                policy.dm_intake_fraction * 100.0
            )?;
            writeln!(
                f,
                "  norms: {} rows, {} basis, {lookup}",
                policy.norms.len(),
                policy.basis()
            )?;
            writeln!(f, "  {}", policy.note)?;
        }
        Ok(())
    }
}

impl TextReport for ErrorResponse {
    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}: {}", self.code.description(), self.message)
    }
}

impl TextReport for ValidationReport {
    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return writeln!(f, "Reference data is valid.");
        }
        writeln!(f, "{} violation(s):", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {violation}")?;
        }
        Ok(())
    }
}

// ABOUTME: Policy warnings and corrective tips derived from a computed ration
// ABOUTME: Each rule is evaluated independently; text comes from Display, data from serde
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Diagnostics Engine
//!
//! Warnings flag policy violations in the ration as computed. Tips suggest a
//! concrete correction, usually a feed and an amount. Both are tagged enums so
//! a presentation layer can match on them; `Display` renders the English text.

use crate::calculator::Supply;
use crate::composition::{AverageComposition, DryMatterDensity};
use crate::config::RationConfig;
use crate::distribution::Distribution;
use crate::dry_matter::DryMatterCap;
use crate::mass_balance::MassBalance;
use crate::norm_resolver::ResolvedNorm;
use crate::numeric::{round_feed, safe_divide};
use crate::reference::{CategoryPolicy, ReferenceData};
use ration_core::models::{EnergyBasis, Feed, FeedClass};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal policy flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Warning {
    /// Roughage share under the category minimum (acidosis and fiber risk)
    RoughageBelowMinimum {
        /// Configured roughage share (%)
        roughage_pct: f64,
        /// Category minimum (%)
        minimum_pct: f64,
    },
    /// Energy plus protein share above the ceiling
    ConcentrateTooHigh {
        /// Concentrate share (%)
        concentrate_pct: f64,
        /// Allowed maximum (%)
        maximum_pct: f64,
    },
    /// Requirement not fully met because of the dry-matter ceiling
    DryMatterCeilingLimited {
        /// Coverage of the solved mass (%)
        coverage_pct: u8,
    },
    /// Dry matter in the distribution exceeds the intake ceiling
    DryMatterExceedsCap {
        /// Dry matter in the ration (kg)
        dry_matter_kg: f64,
        /// Intake ceiling (kg)
        cap_kg: f64,
    },
    /// Feed classes with no selected feed
    MissingFeedClasses {
        /// Classes without any selected feed
        classes: Vec<FeedClass>,
    },
    /// Pinned amounts push the ration above the requirement
    OverrideExceedsRequirement {
        /// Sum of pinned amounts (kg)
        pinned_kg: f64,
        /// Solved requirement mass (kg)
        required_kg: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoughageBelowMinimum {
                roughage_pct,
                minimum_pct,
            } => write!(
                f,
                "Roughage share {roughage_pct}% is below the recommended minimum of {minimum_pct}%."
            ),
            Self::ConcentrateTooHigh {
                concentrate_pct,
                maximum_pct,
            } => write!(
                f,
                "Concentrate share {concentrate_pct}% is above {maximum_pct}% (acidosis risk)."
            ),
            Self::DryMatterCeilingLimited { coverage_pct } => write!(
                f,
                "The dry-matter limit keeps the energy/protein requirement from being met \
                 ({coverage_pct}% covered). Add energy-dense feed or adjust the class shares."
            ),
            Self::DryMatterExceedsCap {
                dry_matter_kg,
                cap_kg,
            } => write!(
                f,
                "Computed dry matter {dry_matter_kg:.1} kg exceeds the limit of {cap_kg:.1} kg."
            ),
            Self::MissingFeedClasses { classes } => {
                let names: Vec<&str> = classes.iter().map(FeedClass::label).collect();
                write!(f, "No feed selected in these classes: {}.", names.join(", "))
            }
            Self::OverrideExceedsRequirement {
                pinned_kg,
                required_kg,
            } => write!(
                f,
                "Fixed amounts total {pinned_kg:.1} kg, more than the {required_kg:.1} kg the \
                 requirement needs."
            ),
        }
    }
}

/// Suggested corrective action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Tip {
    /// Add roughage to reach the category minimum
    IncreaseRoughage {
        /// Target roughage share (%)
        minimum_pct: f64,
        /// Extra as-fed roughage (kg)
        add_kg: f64,
    },
    /// Energy-dense roughage feeds from the reference table
    RoughageCandidates {
        /// Feed names
        feeds: Vec<String>,
    },
    /// Selected roughage is low in energy
    ImproveRoughageQuality {
        /// Mean NeL of the roughage in the ration (MJ/kg)
        average_nel: f64,
        /// Share to substitute (%)
        substitute_pct: f64,
        /// Suggested replacement
        suggested_feed: Option<String>,
    },
    /// Close the protein deficit with the most protein-dense feed
    CloseProteinGap {
        /// Feed to add
        feed: String,
        /// Amount (kg)
        add_kg: f64,
    },
    /// Close the energy deficit with the most energy-dense feed
    CloseEnergyGap {
        /// Feed to add
        feed: String,
        /// Amount (kg)
        add_kg: f64,
        /// Energy basis of the requirement
        basis: EnergyBasis,
    },
    /// Category-specific husbandry guidance
    Husbandry {
        /// Guidance text
        note: String,
    },
    /// Daily salt and mineral premix
    MineralSupplement {
        /// Salt (g/day)
        salt_g: f64,
        /// Mineral premix (g/day)
        premix_g: f64,
    },
    /// Density of the selection on a dry-matter basis
    DryMatterDensity {
        /// MJ NeL per kg DM
        nel_per_kg_dm: f64,
        /// Crude protein (% of DM)
        crude_protein_pct_dm: f64,
    },
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncreaseRoughage {
                minimum_pct,
                add_kg,
            } => write!(
                f,
                "Raise the roughage share to at least {minimum_pct}%: add about {add_kg:.1} kg \
                 of roughage as fed."
            ),
            Self::RoughageCandidates { feeds } => {
                write!(f, "Good roughage options: {}.", feeds.join(", "))
            }
            Self::ImproveRoughageQuality {
                average_nel,
                substitute_pct,
                suggested_feed,
            } => {
                write!(
                    f,
                    "Roughage quality is low (average NeL {average_nel:.1} MJ/kg). Replace at \
                     least {substitute_pct}% of the straw or stover with better roughage"
                )?;
                match suggested_feed {
                    Some(feed) => write!(f, ", for example {feed}."),
                    None => f.write_str("."),
                }
            }
            Self::CloseProteinGap { feed, add_kg } => write!(
                f,
                "Add about {add_kg:.1} kg of {feed} to cover the crude protein requirement."
            ),
            Self::CloseEnergyGap {
                feed,
                add_kg,
                basis,
            } => write!(
                f,
                "{basis} energy is short: add about {add_kg:.1} kg of {feed} or improve \
                 roughage quality."
            ),
            Self::Husbandry { note } => f.write_str(note),
            Self::MineralSupplement { salt_g, premix_g } => write!(
                f,
                "Minerals and vitamins: salt {salt_g} g/day, mineral premix {premix_g} g/day. \
                 Keep Ca:P near 2:1 and water freely available."
            ),
            Self::DryMatterDensity {
                nel_per_kg_dm,
                crude_protein_pct_dm,
            } => write!(
                f,
                "Dry-matter density: {nel_per_kg_dm:.2} MJ NeL/kg DM, {crude_protein_pct_dm:.1}% CP."
            ),
        }
    }
}

/// Resolved pipeline state the rules read
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticsContext<'a> {
    /// Live weight (kg)
    pub weight_kg: f64,
    /// Category policy
    pub policy: &'a CategoryPolicy,
    /// Selected feeds
    pub selected: &'a [Feed],
    /// Resolved requirement
    pub norm: &'a ResolvedNorm,
    /// Average composition of the selection
    pub average: &'a AverageComposition,
    /// Solved mass
    pub mass: &'a MassBalance,
    /// Dry-matter cap and effective total
    pub cap: &'a DryMatterCap,
    /// Allocation
    pub distribution: &'a Distribution,
    /// Supply and deficits at the effective total
    pub supply: &'a Supply,
    /// Sum of pinned amounts (kg)
    pub pinned_total_kg: f64,
}

/// Evaluate every warning rule
///
/// Callers pass a context only for valid input with at least one feed selected.
#[must_use]
pub fn evaluate_warnings(ctx: &DiagnosticsContext<'_>, config: &RationConfig) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if ctx.selected.is_empty() {
        return warnings;
    }
    let ratios = &ctx.policy.ratios;

    if ratios.roughage < ctx.policy.min_roughage_pct {
        warnings.push(Warning::RoughageBelowMinimum {
            roughage_pct: ratios.roughage,
            minimum_pct: ctx.policy.min_roughage_pct,
        });
    }

    let concentrate_pct = ratios.concentrate();
    if concentrate_pct > config.diagnostics.max_concentrate_pct {
        warnings.push(Warning::ConcentrateTooHigh {
            concentrate_pct,
            maximum_pct: config.diagnostics.max_concentrate_pct,
        });
    }

    if ctx.cap.effective_total_kg < ctx.mass.solved_kg() {
        warnings.push(Warning::DryMatterCeilingLimited {
            coverage_pct: ctx.cap.coverage_pct,
        });
    }

    if ctx.distribution.dm_total_kg
        > ctx.cap.max_dm_kg + config.diagnostics.dry_matter_tolerance_kg
    {
        warnings.push(Warning::DryMatterExceedsCap {
            dry_matter_kg: ctx.distribution.dm_total_kg,
            cap_kg: ctx.cap.max_dm_kg,
        });
    }

    let classes: Vec<FeedClass> = FeedClass::ALL
        .into_iter()
        .filter(|class| !ctx.selected.iter().any(|f| f.class == *class))
        .collect();
    if !classes.is_empty() {
        warnings.push(Warning::MissingFeedClasses { classes });
    }

    if let Some(required_kg) = ctx.mass.total_kg {
        if required_kg > 0.0 && ctx.pinned_total_kg > required_kg {
            warnings.push(Warning::OverrideExceedsRequirement {
                pinned_kg: ctx.pinned_total_kg,
                required_kg,
            });
        }
    }

    warnings
}

/// Highest-scoring feed of a class, first in table order on ties
fn best_feed<'r>(
    reference: &'r ReferenceData,
    class: FeedClass,
    score: impl Fn(&Feed) -> f64,
) -> Option<&'r Feed> {
    reference
        .feeds_by_class(class)
        .fold(None, |best: Option<&Feed>, feed| match best {
            Some(b) if score(feed) <= score(b) => Some(b),
            _ => Some(feed),
        })
}

/// Evaluate every tip rule
///
/// Returns nothing when there is no effective total or no selected feed.
#[must_use]
pub fn evaluate_tips(
    ctx: &DiagnosticsContext<'_>,
    reference: &ReferenceData,
    config: &RationConfig,
) -> Vec<Tip> {
    let mut tips = Vec::new();
    let total = ctx.cap.effective_total_kg;
    if total <= 0.0 || ctx.selected.is_empty() {
        return tips;
    }
    let diag = &config.diagnostics;
    let min_kg = diag.min_suggested_feed_kg;
    let policy = ctx.policy;

    if policy.ratios.roughage < policy.min_roughage_pct {
        let need = total * (policy.min_roughage_pct - policy.ratios.roughage) / 100.0;
        tips.push(Tip::IncreaseRoughage {
            minimum_pct: policy.min_roughage_pct,
            add_kg: round_feed(need, min_kg),
        });
        let feeds: Vec<String> = reference
            .feeds_by_class(FeedClass::Roughage)
            .filter(|f| f.energy_nel >= diag.quality_roughage_nel_mj)
            .take(diag.max_roughage_candidates)
            .map(|f| f.name.clone())
            .collect();
        if !feeds.is_empty() {
            tips.push(Tip::RoughageCandidates { feeds });
        }
    }

    let roughage_nel: Vec<f64> = ctx
        .distribution
        .items_of(FeedClass::Roughage)
        .map(|i| i.feed.energy_nel)
        .collect();
    if !roughage_nel.is_empty() {
        let average_nel = safe_divide(
            roughage_nel.iter().sum(),
            roughage_nel.len() as f64,
            0.0,
        );
        if average_nel < diag.quality_roughage_nel_mj {
            let suggested_feed = reference
                .feeds_by_class(FeedClass::Roughage)
                .find(|f| f.energy_nel >= diag.quality_roughage_nel_mj)
                .map(|f| f.name.clone());
            tips.push(Tip::ImproveRoughageQuality {
                average_nel,
                substitute_pct: diag.roughage_substitution_pct,
                suggested_feed,
            });
        }
    }

    if ctx.supply.protein_deficit_g > diag.deficit_epsilon {
        if let Some(best) = best_feed(reference, FeedClass::Protein, |f| f.protein) {
            let need = safe_divide(ctx.supply.protein_deficit_g, best.protein * 1000.0, 0.0);
            let add_kg = round_feed(need, min_kg);
            if add_kg > 0.0 {
                tips.push(Tip::CloseProteinGap {
                    feed: best.name.clone(),
                    add_kg,
                });
            }
        }
    }

    let basis = ctx.norm.basis;
    if ctx.supply.energy_deficit_mj > diag.deficit_epsilon && ctx.cap.coverage_pct == 100 {
        if let Some(best) = best_feed(reference, FeedClass::Energy, |f| f.energy(basis)) {
            let need = safe_divide(ctx.supply.energy_deficit_mj, best.energy(basis), 0.0);
            let add_kg = round_feed(need, min_kg);
            if add_kg > 0.0 {
                tips.push(Tip::CloseEnergyGap {
                    feed: best.name.clone(),
                    add_kg,
                    basis,
                });
            }
        }
    }

    if let Some(note) = &policy.husbandry_note {
        tips.push(Tip::Husbandry { note: note.clone() });
    }

    tips.push(Tip::MineralSupplement {
        salt_g: (ctx.weight_kg / 100.0 * diag.salt_g_per_100kg).round(),
        premix_g: (ctx.weight_kg / 100.0 * diag.premix_g_per_100kg).round(),
    });

    let DryMatterDensity {
        nel_per_kg_dm,
        crude_protein_pct_dm,
    } = ctx.average.density();
    tips.push(Tip::DryMatterDensity {
        nel_per_kg_dm,
        crude_protein_pct_dm,
    });

    tips
}

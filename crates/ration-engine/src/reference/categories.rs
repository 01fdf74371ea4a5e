// ABOUTME: Shipped per-category policy table
// ABOUTME: Ratio profile, roughage minimum, intake fraction and norm source per animal category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::norms;
use super::{CategoryPolicy, NormSource};
use ration_core::models::{CategoryKey, ClassRatios};

pub(super) fn builtin_policies() -> Vec<CategoryPolicy> {
    vec![
        CategoryPolicy {
            category: CategoryKey::LactatingCow,
            label: "Lactating cow".to_owned(),
            ratios: ClassRatios::new(50.0, 30.0, 20.0),
            note: "With high milk yield raise energy to 35%, but do not cut back hay.".to_owned(),
            min_roughage_pct: 50.0,
            dm_intake_fraction: 0.028,
            norms: NormSource::Interpolated(norms::lactating_cow()),
            milk_energy: true,
            husbandry_note: None,
        },
        CategoryPolicy {
            category: CategoryKey::DryCow,
            label: "Dry-period cow".to_owned(),
            ratios: ClassRatios::new(70.0, 20.0, 10.0),
            note: "Switch to 60/25/15 three to four weeks before calving; give salt and minerals daily."
                .to_owned(),
            min_roughage_pct: 60.0,
            dm_intake_fraction: 0.020,
            norms: NormSource::Interpolated(norms::dry_cow()),
            milk_energy: false,
            husbandry_note: None,
        },
        CategoryPolicy {
            category: CategoryKey::MatureBull,
            label: "Mature bull".to_owned(),
            ratios: ClassRatios::new(65.0, 20.0, 15.0),
            note: "If the bull puts on too much condition lower energy to 15% and add hay."
                .to_owned(),
            min_roughage_pct: 60.0,
            dm_intake_fraction: 0.022,
            norms: NormSource::NearestMatch(norms::mature_bull()),
            milk_energy: false,
            husbandry_note: None,
        },
        CategoryPolicy {
            category: CategoryKey::Calf,
            label: "Calf (1-6 months)".to_owned(),
            ratios: ClassRatios::new(25.0, 55.0, 20.0),
            note: "Suited to growth; always add a mineral mix.".to_owned(),
            min_roughage_pct: 30.0,
            dm_intake_fraction: 0.025,
            norms: NormSource::Interpolated(norms::calf()),
            milk_energy: false,
            husbandry_note: Some(
                "Calves (1-6 months): milk or milk replacer remains the base feed; keep roughage \
                 at 25-30% and finely chopped."
                    .to_owned(),
            ),
        },
    ]
}

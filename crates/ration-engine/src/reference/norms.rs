// ABOUTME: Shipped requirement tables per category
// ABOUTME: NeL interpolation tables for cows and calves, ME nearest-match table for mature bulls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use ration_core::models::{BullNormRow, NormPoint};

/// (weight kg, requirement MJ/day, crude protein g/day)
type Row = (f64, f64, f64);

const LACTATING_COW: [Row; 4] = [
    (350.0, 35.0, 1100.0),
    (450.0, 45.0, 1300.0),
    (550.0, 55.0, 1500.0),
    (650.0, 62.0, 1650.0),
];

const DRY_COW: [Row; 12] = [
    (150.0, 62.0, 900.0),
    (200.0, 75.0, 1050.0),
    (250.0, 83.0, 1110.0),
    (300.0, 92.0, 1200.0),
    (350.0, 100.0, 1250.0),
    (400.0, 105.0, 1260.0),
    (450.0, 110.0, 1260.0),
    (500.0, 115.0, 1280.0),
    (550.0, 122.0, 1300.0),
    (600.0, 125.0, 1310.0),
    (650.0, 125.0, 1310.0),
    (700.0, 130.0, 1350.0),
];

const CALF: [Row; 4] = [
    (50.0, 9.0, 400.0),
    (100.0, 14.0, 600.0),
    (150.0, 20.0, 800.0),
    (200.0, 26.0, 1000.0),
];

// ME basis
const MATURE_BULL: [Row; 13] = [
    (125.0, 45.0, 610.0),
    (175.0, 50.0, 750.0),
    (225.0, 60.0, 850.0),
    (275.0, 68.0, 920.0),
    (325.0, 75.0, 980.0),
    (375.0, 83.0, 1050.0),
    (425.0, 87.0, 1050.0),
    (475.0, 91.0, 1050.0),
    (525.0, 95.0, 1070.0),
    (575.0, 101.0, 1100.0),
    (625.0, 105.0, 1150.0),
    (675.0, 110.0, 1200.0),
    (725.0, 115.0, 1200.0),
];

fn points(rows: &[Row]) -> Vec<NormPoint> {
    rows.iter()
        .map(|&(w, nel, prot)| NormPoint::new(w, nel, prot))
        .collect()
}

pub(super) fn lactating_cow() -> Vec<NormPoint> {
    points(&LACTATING_COW)
}

pub(super) fn dry_cow() -> Vec<NormPoint> {
    points(&DRY_COW)
}

pub(super) fn calf() -> Vec<NormPoint> {
    points(&CALF)
}

pub(super) fn mature_bull() -> Vec<BullNormRow> {
    MATURE_BULL
        .iter()
        .map(|&(w, me, prot)| BullNormRow::new(w, me, prot))
        .collect()
}

//! Bonus-day bands over cumulative service months

use serde::Serialize;

/// One band: service of at least `min_months` earns `bonus_days`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub min_months: u32,
    pub bonus_days: u32,
}

const fn band(min_months: u32, bonus_days: u32) -> Band {
    Band {
        min_months,
        bonus_days,
    }
}

/// Abnormal-condition service, ascending
pub const ABNORMAL_BANDS: [Band; 6] = [
    band(61, 5),
    band(121, 7),
    band(181, 9),
    band(241, 12),
    band(301, 15),
    band(373, 18),
];

/// Normal service, ascending. Same thresholds, different day values.
pub const NORMAL_BANDS: [Band; 6] = [
    band(61, 3),
    band(121, 5),
    band(181, 7),
    band(241, 9),
    band(301, 11),
    band(373, 14),
];

/// Highest band whose threshold `months` reaches
pub fn find_band(table: &[Band], months: u32) -> Option<Band> {
    table.iter().rev().find(|b| months >= b.min_months).copied()
}

/// Bonus days for normal service; zero below the first threshold
pub fn normal_bonus_days(months: u32) -> u32 {
    find_band(&NORMAL_BANDS, months).map_or(0, |b| b.bonus_days)
}

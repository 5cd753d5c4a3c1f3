//! Annual vacation entitlement from social-insurance history

use crate::entitlement::bands::{find_band, normal_bonus_days, Band, ABNORMAL_BANDS};
use crate::entitlement::records::{aggregate_years, PaymentRecord, YearlyStat, VOLUNTARY_MARKER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Base leave selectable in the form
pub struct BaseDays;

impl BaseDays {
    pub const STANDARD: u32 = 15;
    pub const EXTENDED: u32 = 20;
}

/// Months per year the user declares as served under abnormal conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbnormalMonths(BTreeMap<i32, u32>);

impl AbnormalMonths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `months` for `year`; negative input counts as zero
    pub fn set(&mut self, year: i32, months: i64) {
        let months = u32::try_from(months.max(0)).unwrap_or(u32::MAX);
        self.0.insert(year, months);
    }

    pub fn get(&self, year: i32) -> u32 {
        self.0.get(&year).copied().unwrap_or(0)
    }

    /// Clamp each year to its qualifying months, dropping unknown years
    pub fn clamp_to(&self, stats: &[YearlyStat]) -> AbnormalMonths {
        AbnormalMonths(
            stats
                .iter()
                .map(|s| (s.year, self.get(s.year).min(s.total)))
                .filter(|(_, months)| *months > 0)
                .collect(),
        )
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.0.iter().map(|(y, m)| (*y, *m))
    }
}

impl FromIterator<(i32, i64)> for AbnormalMonths {
    fn from_iter<T: IntoIterator<Item = (i32, i64)>>(iter: T) -> Self {
        let mut declared = AbnormalMonths::new();
        for (year, months) in iter {
            declared.set(year, months);
        }
        declared
    }
}

/// Breakdown of the computed entitlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResult {
    pub base_days: u32,
    pub normal_bonus_days: u32,
    pub abnormal_bonus_days: u32,
    pub total_days: u32,
    /// Qualifying months across all years
    pub total_months: u32,
    /// Declared abnormal months after clamping
    pub total_abnormal_months: u32,
    /// Threshold of the matched abnormal band, or zero
    pub effective_abnormal_months: u32,
    pub normal_months: u32,
    pub abnormal_band: Option<Band>,
    pub abnormal_qualifies: bool,
    pub yearly: Vec<YearlyStat>,
}

/// Entitlement calculator with its form-level settings
#[derive(Debug, Clone)]
pub struct EntitlementCalculator {
    pub base_days: u32,
    /// Organization-name fragment marking voluntary insurance
    pub voluntary_marker: String,
}

impl Default for EntitlementCalculator {
    fn default() -> Self {
        Self {
            base_days: BaseDays::STANDARD,
            voluntary_marker: VOLUNTARY_MARKER.to_string(),
        }
    }
}

impl EntitlementCalculator {
    pub fn new(base_days: u32) -> Self {
        Self {
            base_days,
            ..Self::default()
        }
    }

    pub fn compute(&self, payments: &[PaymentRecord], declared: &AbnormalMonths) -> EntitlementResult {
        let yearly = aggregate_years(payments, &self.voluntary_marker);
        let total_months: u32 = yearly.iter().map(|s| s.total).sum();
        let total_abnormal_months = declared.clamp_to(&yearly).total();

        let abnormal_band = find_band(&ABNORMAL_BANDS, total_abnormal_months);
        let abnormal_qualifies = abnormal_band.is_some();
        // Only the band threshold is drawn from the pool, not the full declaration
        let effective_abnormal_months = abnormal_band.map_or(0, |b| b.min_months);
        let normal_months = total_months.saturating_sub(effective_abnormal_months);

        let normal_bonus = normal_bonus_days(normal_months);
        let abnormal_bonus = match abnormal_band {
            Some(band) => band.bonus_days,
            // Unbanded abnormal months stay in the normal pool
            None => normal_bonus_days(effective_abnormal_months),
        };
        let total_days = self
            .base_days
            .saturating_add(normal_bonus)
            .saturating_add(abnormal_bonus);

        debug!(
            total_months,
            total_abnormal_months,
            effective_abnormal_months,
            normal_months,
            total_days,
            "computed vacation entitlement"
        );

        EntitlementResult {
            base_days: self.base_days,
            normal_bonus_days: normal_bonus,
            abnormal_bonus_days: abnormal_bonus,
            total_days,
            total_months,
            total_abnormal_months,
            effective_abnormal_months,
            normal_months,
            abnormal_band,
            abnormal_qualifies,
            yearly,
        }
    }
}

/// Compute the entitlement with the default voluntary marker
pub fn compute_entitlement(
    payments: &[PaymentRecord],
    declared: &AbnormalMonths,
    base_days: u32,
) -> EntitlementResult {
    EntitlementCalculator::new(base_days).compute(payments, declared)
}

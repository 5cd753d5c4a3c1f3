//! Vacation entitlement from social-insurance payment history

mod bands;
mod calculator;
mod records;

pub use bands::{find_band, normal_bonus_days, Band, ABNORMAL_BANDS, NORMAL_BANDS};
pub use calculator::{
    compute_entitlement, AbnormalMonths, BaseDays, EntitlementCalculator, EntitlementResult,
};
pub use records::{aggregate_years, parse_payments, PaymentRecord, YearlyStat, VOLUNTARY_MARKER};

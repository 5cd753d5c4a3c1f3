//! Social-insurance payment records and per-year aggregation

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Default marker identifying voluntary-insurance payers ("voluntary")
pub const VOLUNTARY_MARKER: &str = "сайн дурын";

/// One month of contributions reported by one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u8,
    #[serde(default)]
    pub organization: String,
    pub paid: bool,
}

impl PaymentRecord {
    pub fn new(year: i32, month: u8, organization: impl Into<String>, paid: bool) -> Self {
        Self {
            year,
            month,
            organization: organization.into(),
            paid,
        }
    }

    fn month_bit(&self) -> Option<u16> {
        (1..=12).contains(&self.month).then(|| 1 << (self.month - 1))
    }
}

/// Qualifying months of one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStat {
    pub year: i32,
    /// Distinct months with at least one paid record
    pub total: u32,
    /// Months with a paid record from a regular employer
    pub regular: u32,
    /// Months paid only through voluntary insurance
    pub voluntary: u32,
    /// Bit `m - 1` is set when month `m` qualifies
    pub months: u16,
}

impl YearlyStat {
    pub fn has_month(&self, month: u8) -> bool {
        (1..=12).contains(&month) && self.months & (1 << (month - 1)) != 0
    }
}

fn is_voluntary(organization: &str, marker: &str) -> bool {
    !marker.is_empty() && organization.to_lowercase().contains(&marker.to_lowercase())
}

/// Collapse records into per-year stats, ascending by year.
///
/// Several organizations paying in the same month count once. Unpaid
/// records and records with an out-of-range month contribute nothing.
pub fn aggregate_years(records: &[PaymentRecord], voluntary_marker: &str) -> Vec<YearlyStat> {
    // year -> (all paid months, months paid by a regular employer)
    let mut years: BTreeMap<i32, (u16, u16)> = BTreeMap::new();

    for record in records {
        let Some(bit) = record.month_bit() else {
            warn!(
                year = record.year,
                month = record.month,
                "skipping payment record with invalid month"
            );
            continue;
        };
        if !record.paid {
            continue;
        }
        let entry = years.entry(record.year).or_default();
        entry.0 |= bit;
        if !is_voluntary(&record.organization, voluntary_marker) {
            entry.1 |= bit;
        }
    }

    years
        .into_iter()
        .map(|(year, (months, regular))| {
            let total = months.count_ones();
            let regular = regular.count_ones();
            YearlyStat {
                year,
                total,
                regular,
                voluntary: total - regular,
                months,
            }
        })
        .collect()
}

/// Parse the extracted payment list, rejecting months outside 1-12
pub fn parse_payments(json: &str) -> Result<Vec<PaymentRecord>> {
    let records: Vec<PaymentRecord> = serde_json::from_str(json)?;
    if let Some(bad) = records.iter().find(|r| r.month_bit().is_none()) {
        return Err(Error::invalid(format!(
            "month {} of {} is outside 1-12",
            bad.month, bad.year
        )));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_month_two_organizations_counts_once() {
        let records = vec![
            PaymentRecord::new(2020, 3, "Монгол банк", true),
            PaymentRecord::new(2020, 3, "Тэсо ХХК", true),
        ];
        let stats = aggregate_years(&records, VOLUNTARY_MARKER);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total, 1);
        assert!(stats[0].has_month(3));
        assert!(!stats[0].has_month(4));
    }

    #[test]
    fn test_unpaid_and_invalid_months_ignored() {
        let records = vec![
            PaymentRecord::new(2021, 1, "A", false),
            PaymentRecord::new(2021, 13, "A", true),
            PaymentRecord::new(2021, 0, "A", true),
            PaymentRecord::new(2021, 2, "A", true),
        ];
        let stats = aggregate_years(&records, VOLUNTARY_MARKER);
        assert_eq!(stats[0].total, 1);
        assert_eq!(stats[0].months, 0b10);
    }

    #[test]
    fn test_voluntary_split() {
        let records = vec![
            PaymentRecord::new(2019, 1, "Сайн дурын даатгал", true),
            PaymentRecord::new(2019, 2, "Сайн дурын даатгал", true),
            PaymentRecord::new(2019, 2, "Оюу толгой ХХК", true),
            PaymentRecord::new(2019, 3, "Оюу толгой ХХК", true),
        ];
        let stats = aggregate_years(&records, VOLUNTARY_MARKER);
        assert_eq!(stats[0].total, 3);
        assert_eq!(stats[0].regular, 2);
        assert_eq!(stats[0].voluntary, 1);
    }

    #[test]
    fn test_years_sorted() {
        let records = vec![
            PaymentRecord::new(2022, 1, "A", true),
            PaymentRecord::new(2018, 1, "A", true),
        ];
        let years: Vec<i32> = aggregate_years(&records, "")
            .iter()
            .map(|s| s.year)
            .collect();
        assert_eq!(years, vec![2018, 2022]);
    }

    #[test]
    fn test_parse_payments() {
        let records = parse_payments(
            r#"[{"year":2020,"month":5,"organization":"A","paid":true},
                {"year":2020,"month":6,"paid":false}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].organization, "");

        let err = parse_payments(r#"[{"year":2020,"month":14,"paid":true}]"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(matches!(parse_payments("{"), Err(Error::Json(_))));
    }
}

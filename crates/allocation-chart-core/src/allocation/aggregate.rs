use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::format::{format_amount, format_percentage};
use super::slice::{AllocationDatum, AllocationSlice};
use crate::error::ChartError;
use crate::types::{Currency, Money};
use crate::ChartResult;

/// Chart data in input order plus the sum of all values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub data: Vec<AllocationDatum>,
    pub total_value: Money,
}

impl Aggregation {
    /// True when there is nothing to lay out: no data or a zero total.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.total_value.is_zero()
    }
}

/// Normalize caller slices into chart data.
///
/// Rejects negative amounts, blank labels, duplicate labels and totals past
/// `Decimal::MAX`. Zero amounts are kept. An empty input or a zero total is not an error.
pub fn aggregate(slices: &[AllocationSlice], currency: &Currency) -> ChartResult<Aggregation> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(slices.len());
    for (i, slice) in slices.iter().enumerate() {
        if slice.label.trim().is_empty() {
            return Err(ChartError::InvalidInput {
                field: format!("slices[{i}].label"),
                reason: "Must not be blank".into(),
            });
        }
        if slice.amount < Decimal::ZERO {
            return Err(ChartError::InvalidInput {
                field: format!("slices[{i}].amount"),
                reason: format!("Must not be negative (got {})", slice.amount),
            });
        }
        if !seen.insert(slice.label.as_str()) {
            return Err(ChartError::InvalidInput {
                field: format!("slices[{i}].label"),
                reason: format!("Duplicate label '{}'", slice.label),
            });
        }
    }

    let mut total_value = Money::ZERO;
    for (i, slice) in slices.iter().enumerate() {
        total_value = total_value
            .checked_add(slice.amount)
            .ok_or_else(|| ChartError::InvalidInput {
                field: format!("slices[{i}].amount"),
                reason: "Total exceeds representable range".into(),
            })?;
    }

    let data = slices
        .iter()
        .map(|slice| {
            let ratio = if total_value.is_zero() {
                Decimal::ZERO
            } else {
                slice.amount / total_value
            };
            AllocationDatum {
                id: slice.label.clone(),
                label: slice.label.clone(),
                value: slice.amount,
                color: slice.color.clone(),
                display_value: slice
                    .display_value
                    .clone()
                    .unwrap_or_else(|| format_amount(slice.amount, currency)),
                percentage: slice
                    .percentage
                    .clone()
                    .unwrap_or_else(|| format_percentage(ratio)),
                share: ratio.to_f64().unwrap_or(0.0),
            }
        })
        .collect();

    Ok(Aggregation { data, total_value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<AllocationSlice> {
        vec![
            AllocationSlice::new("BTC", dec!(24000), "#F7931A"),
            AllocationSlice::new("ETH", dec!(25600), "#627EEA"),
            AllocationSlice::new("GOLD", dec!(9750), "#D4AF37"),
        ]
    }

    #[test]
    fn test_preserves_order_and_totals() {
        let agg = aggregate(&sample(), &Currency::USD).unwrap();
        assert_eq!(agg.total_value, dec!(59350));
        let ids: Vec<&str> = agg.data.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["BTC", "ETH", "GOLD"]);
        let sum: Money = agg.data.iter().map(|d| d.value).sum();
        assert_eq!(sum, agg.total_value);
    }

    #[test]
    fn test_derives_display_strings() {
        let agg = aggregate(&sample(), &Currency::USD).unwrap();
        assert_eq!(agg.data[0].display_value, "$24,000");
        assert_eq!(agg.data[0].percentage, "40.44%");
        assert_eq!(agg.data[2].display_value, "$9,750");
    }

    #[test]
    fn test_keeps_supplied_display_strings() {
        let mut slices = sample();
        slices[1].display_value = Some("25.6k".into());
        slices[1].percentage = Some("43%".into());
        let agg = aggregate(&slices, &Currency::USD).unwrap();
        assert_eq!(agg.data[1].display_value, "25.6k");
        assert_eq!(agg.data[1].percentage, "43%");
    }

    #[test]
    fn test_shares_sum_to_one() {
        let agg = aggregate(&sample(), &Currency::USD).unwrap();
        let total: f64 = agg.data.iter().map(|d| d.share).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate(&[], &Currency::USD).unwrap();
        assert!(agg.is_empty());
        assert_eq!(agg.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_zero_total_is_empty() {
        let slices = vec![
            AllocationSlice::new("A", Decimal::ZERO, "#000"),
            AllocationSlice::new("B", Decimal::ZERO, "#fff"),
        ];
        let agg = aggregate(&slices, &Currency::USD).unwrap();
        assert!(agg.is_empty());
        assert_eq!(agg.data.len(), 2);
        assert_eq!(agg.data[0].share, 0.0);
        assert_eq!(agg.data[0].percentage, "0.00%");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let slices = vec![AllocationSlice::new("BTC", dec!(-1), "#F7931A")];
        let err = aggregate(&slices, &Currency::USD).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidInput { ref field, .. } if field == "slices[0].amount"
        ));
    }

    #[test]
    fn test_total_overflow_rejected() {
        let huge: Decimal = "60000000000000000000000000000".parse().unwrap();
        let slices = vec![
            AllocationSlice::new("A", huge, "#000"),
            AllocationSlice::new("B", huge, "#fff"),
        ];
        let err = aggregate(&slices, &Currency::USD).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidInput { ref field, ref reason }
                if field == "slices[1].amount" && reason.contains("representable range")
        ));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut slices = sample();
        slices.push(AllocationSlice::new("ETH", dec!(1), "#000"));
        let err = aggregate(&slices, &Currency::USD).unwrap_err();
        assert!(err.to_string().contains("Duplicate label 'ETH'"));
    }

    #[test]
    fn test_blank_label_rejected() {
        let slices = vec![AllocationSlice::new("  ", dec!(10), "#000")];
        assert!(aggregate(&slices, &Currency::USD).is_err());
    }
}

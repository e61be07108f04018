use serde::{Deserialize, Serialize};

use crate::types::Money;

/// One portfolio holding as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Asset label, also used as the slice id (e.g. "BTC")
    pub label: String,
    /// Monetary amount held; must not be negative
    pub amount: Money,
    /// Fill color or style token
    pub color: String,
    /// Pre-formatted amount shown under the label (derived when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    /// Pre-formatted share shown above the amount (derived when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<String>,
}

impl AllocationSlice {
    pub fn new(label: impl Into<String>, amount: Money, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount,
            color: color.into(),
            display_value: None,
            percentage: None,
        }
    }
}

/// A slice after aggregation: keyed by `id`, carrying its resolved display
/// strings and its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationDatum {
    pub id: String,
    pub label: String,
    pub value: Money,
    pub color: String,
    pub display_value: String,
    pub percentage: String,
    /// value / total_value, in [0, 1]; 0 when the total is zero
    pub share: f64,
}

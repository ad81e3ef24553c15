use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Represents a single raw row of the sales table.
///
/// This struct captures the snapshot data exactly as the upstream source
/// hands it over. Values are not validated here; negative quantities or
/// prices pass through untouched because the source of truth is owned by
/// an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct SalesRecord {
    /// Day the sale happened, `%Y-%m-%d`.
    pub sale_date: NaiveDate,
    /// Buyer display name.
    pub customer_name: String,
    /// Product display name.
    pub product_name: String,
    /// Units sold in this row.
    pub product_quantity: u32,
    /// Per-unit acquisition price.
    pub product_unit_buy_price: Decimal,
    /// Per-unit sale price.
    pub product_unit_sale_price: Decimal
}

/// Computes a content fingerprint for a record snapshot.
///
/// Two snapshots with identical rows in identical order share a fingerprint,
/// which is what keys the memoization of the derived analysis. Any edit to
/// the table produces a new fingerprint and therefore a fresh computation.
pub fn fingerprint(records: &[SalesRecord]) -> u64 {
    let mut hasher = std::hash::DefaultHasher::new();
    records.hash(&mut hasher);
    hasher.finish()
}

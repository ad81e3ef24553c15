use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::SalesRecord;
use crate::types::round_column;

fn tax_rate() -> Decimal {
    // 5%
    Decimal::new(5, 2)
}

/// A sales row augmented with the derived financial columns and week label.
///
/// Derivation happens per-row with no cross-row dependency. The derived
/// monetary columns are rounded to two decimal places, and `net_profit` is
/// computed from the already-rounded columns so that
/// `net_profit == total_sale_price - total_buy_price - tax_5pct` holds
/// exactly on the stored values.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub sale_date: NaiveDate,
    /// Week-of-year label, Sunday-start numbering, two digits zero padded.
    pub sale_week: String,
    pub customer_name: String,
    pub product_name: String,
    pub product_quantity: u32,
    /// Unit price the row transacted at (the unit sale price).
    pub product_unit_price: Decimal,
    pub total_buy_price: Decimal,
    pub total_sale_price: Decimal,
    pub tax_5pct: Decimal,
    pub net_profit: Decimal
}

impl NormalizedRecord {
    /// Fixed export column order shared by the formatter and the exporters.
    pub const COLUMNS: [&'static str; 10] = [
        "sale_date",
        "sale_week",
        "customer_name",
        "product_name",
        "product_quantity",
        "product_unit_price",
        "total_buy_price",
        "total_sale_price",
        "tax_5pct",
        "net_profit"
    ];

    /// Derives the full column set for one raw record.
    pub fn derive(record: &SalesRecord) -> Self {
        let quantity = Decimal::from(record.product_quantity);
        let total_sale_price = round_column(quantity * record.product_unit_sale_price);
        let total_buy_price = round_column(quantity * record.product_unit_buy_price);
        let tax_5pct = round_column(total_sale_price * tax_rate());
        let net_profit = total_sale_price - total_buy_price - tax_5pct;

        Self {
            sale_date: record.sale_date,
            sale_week: record.sale_date.format("%U").to_string(),
            customer_name: record.customer_name.clone(),
            product_name: record.product_name.clone(),
            product_quantity: record.product_quantity,
            product_unit_price: record.product_unit_sale_price,
            total_buy_price,
            total_sale_price,
            tax_5pct,
            net_profit
        }
    }
}

use super::{fingerprint, NormalizedRecord, SalesRecord};

use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn create_record(date: &str, customer: &str, product: &str, quantity: u32, buy: &str, sale: &str) -> Result<SalesRecord> {
    Ok(SalesRecord {
        sale_date: NaiveDate::from_str(date)?,
        customer_name: customer.to_string(),
        product_name: product.to_string(),
        product_quantity: quantity,
        product_unit_buy_price: Decimal::from_str(buy)?,
        product_unit_sale_price: Decimal::from_str(sale)?
    })
}

#[test]
fn test_derivation_computes_all_financial_columns() -> Result<()> {
    let record = create_record("2024-01-05", "Alice", "Widget", 2, "3.00", "5.00")?;

    let normalized = NormalizedRecord::derive(&record);

    assert_eq!(normalized.total_sale_price.to_string(), "10.00");
    assert_eq!(normalized.total_buy_price.to_string(), "6.00");
    assert_eq!(normalized.tax_5pct.to_string(), "0.50");
    assert_eq!(normalized.net_profit.to_string(), "3.50");
    assert_eq!(normalized.product_unit_price.to_string(), "5.00");

    Ok(())
}

#[test]
fn test_net_profit_identity_holds_on_stored_values() -> Result<()> {
    // Odd prices force rounding in every derived column.
    let record = create_record("2024-03-09", "Bob", "Gadget", 3, "1.11", "3.33")?;

    let normalized = NormalizedRecord::derive(&record);

    assert_eq!(
        normalized.net_profit,
        normalized.total_sale_price - normalized.total_buy_price - normalized.tax_5pct
    );

    Ok(())
}

#[test]
fn test_week_label_uses_sunday_start_numbering() -> Result<()> {
    // 2024-01-07 is the first Sunday of 2024; days before it are week 00.
    let before_first_sunday = NormalizedRecord::derive(&create_record("2024-01-05", "Alice", "Widget", 1, "1.00", "2.00")?);
    let first_sunday = NormalizedRecord::derive(&create_record("2024-01-07", "Alice", "Widget", 1, "1.00", "2.00")?);

    assert_eq!(before_first_sunday.sale_week, "00");
    assert_eq!(first_sunday.sale_week, "01");

    Ok(())
}

#[test]
fn test_negative_prices_pass_through_unvalidated() -> Result<()> {
    let record = create_record("2024-01-05", "Alice", "Widget", 2, "4.00", "-5.00")?;

    let normalized = NormalizedRecord::derive(&record);

    assert_eq!(normalized.total_sale_price.to_string(), "-10.00");
    assert_eq!(normalized.net_profit.to_string(), "-17.50");

    Ok(())
}

#[test]
fn test_zero_quantity_produces_zero_derived_columns() -> Result<()> {
    let normalized = NormalizedRecord::derive(&create_record("2024-01-05", "Alice", "Widget", 0, "3.00", "5.00")?);

    assert!(normalized.total_sale_price.is_zero());
    assert!(normalized.net_profit.is_zero());

    Ok(())
}

#[test]
fn test_fingerprint_tracks_content_and_order() -> Result<()> {
    let first = create_record("2024-01-05", "Alice", "Widget", 2, "3.00", "5.00")?;
    let second = create_record("2024-01-20", "Bob", "Gadget", 1, "10.00", "20.00")?;

    let snapshot = vec![first.clone(), second.clone()];
    let same_snapshot = vec![first.clone(), second.clone()];
    let reordered = vec![second, first];

    assert_eq!(fingerprint(&snapshot), fingerprint(&same_snapshot));
    assert_ne!(fingerprint(&snapshot), fingerprint(&reordered));
    assert_ne!(fingerprint(&snapshot), fingerprint(&[]));

    Ok(())
}

use super::{write_styled_workbook, CellValue, ReportAssembler, Table};

use std::io::Cursor;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analysis::KpiSet;
use crate::export::ExportError;
use crate::models::SalesRecord;

const CHART_STUB_PNG: &[u8] = include_bytes!("../../samples/chart_stub.png");

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

fn sample_kpis() -> Result<KpiSet> {
    Ok(KpiSet {
        total_sales: Decimal::from_str("130.0")?,
        total_taxes: Decimal::from_str("6.5")?,
        total_net_profit: Decimal::from_str("51.5")?,
        net_profit_rate: Decimal::from_str("39.6")?
    })
}

#[test]
fn test_workbook_round_trips_every_cell_value() -> Result<()> {
    let records = vec![
        create_record("2024-01-05", "Alice", "Widget", 2, "3.00", "5.00")?,
        create_record("2024-01-20", "Bob", "Gadget", 1, "10.00", "20.00")?,
    ];
    let table = Table::from_records(&records);

    let bytes = write_styled_workbook(&table)?;
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(&bytes), true)
        .map_err(|error| anyhow!("Workbook read-back failed: {error}"))?;

    let sheet = book.get_sheet_by_name("Data")
        .ok_or_else(|| anyhow!("Data sheet missing from exported workbook"))?;

    for (index, title) in table.header.iter().enumerate() {
        assert_eq!(&sheet.get_value((index as u32 + 1, 1)), title);
    }

    for (row_index, row) in table.rows.iter().enumerate() {
        for (col_index, expected) in row.iter().enumerate() {
            let read_back = sheet.get_value((col_index as u32 + 1, row_index as u32 + 2));

            match expected {
                CellValue::Text(text) => assert_eq!(&read_back, text),
                CellValue::Date(date) => assert_eq!(read_back, date.format("%Y-%m-%d").to_string()),
                CellValue::Integer(number) => assert_eq!(read_back.parse::<f64>()?, *number as f64),
                CellValue::Money(amount) => {
                    let expected_number = amount.to_f64()
                        .ok_or_else(|| anyhow!("Amount not representable"))?;
                    assert_eq!(read_back.parse::<f64>()?, expected_number);
                }
            }
        }
    }

    Ok(())
}

#[test]
fn test_workbook_carries_the_normalized_column_contract() -> Result<()> {
    let records = vec![create_record("2024-01-05", "Alice", "Widget", 2, "3.00", "5.00")?];
    let table = Table::from_normalized(&crate::analysis::normalize(&records));

    assert_eq!(table.header, crate::models::NormalizedRecord::COLUMNS);

    let bytes = write_styled_workbook(&table)?;
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(&bytes), true)
        .map_err(|error| anyhow!("Workbook read-back failed: {error}"))?;

    let sheet = book.get_sheet_by_name("Data")
        .ok_or_else(|| anyhow!("Data sheet missing from exported workbook"))?;

    // sale_week and net_profit sit in the second and tenth columns.
    assert_eq!(sheet.get_value((2, 2)), "00");
    assert_eq!(sheet.get_value((10, 2)).parse::<f64>()?, 3.5);

    Ok(())
}

#[test]
fn test_workbook_styling_leaves_an_autofilter_on_the_header() -> Result<()> {
    let records = vec![create_record("2024-01-05", "Alice", "Widget", 2, "3.00", "5.00")?];

    let bytes = write_styled_workbook(&Table::from_records(&records));
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(&bytes?), true)
        .map_err(|error| anyhow!("Workbook read-back failed: {error}"))?;

    let sheet = book.get_sheet_by_name("Data")
        .ok_or_else(|| anyhow!("Data sheet missing from exported workbook"))?;

    assert!(sheet.get_auto_filter().is_some());

    Ok(())
}

#[test]
fn test_workbook_accepts_an_empty_table() -> Result<()> {
    let table = Table::from_records(&[]);

    let bytes = write_styled_workbook(&table)?;

    assert!(!bytes.is_empty());

    Ok(())
}

#[test]
fn test_report_assembly_produces_pdf_bytes() -> Result<()> {
    let images = vec![CHART_STUB_PNG.to_vec(), CHART_STUB_PNG.to_vec(), CHART_STUB_PNG.to_vec()];

    let bytes = ReportAssembler::new().assemble(&sample_kpis()?, &images)?;

    assert!(bytes.starts_with(b"%PDF"));

    Ok(())
}

#[test]
fn test_report_flows_extra_charts_onto_following_pages() -> Result<()> {
    let few = ReportAssembler::new().assemble(&sample_kpis()?, &[CHART_STUB_PNG.to_vec()])?;
    let many = ReportAssembler::new().assemble(&sample_kpis()?, &vec![CHART_STUB_PNG.to_vec(); 6])?;

    assert!(few.starts_with(b"%PDF"));
    assert!(many.starts_with(b"%PDF"));
    assert!(many.len() > few.len());

    Ok(())
}

#[test]
fn test_report_accepts_zero_charts() -> Result<()> {
    let bytes = ReportAssembler::new().assemble(&sample_kpis()?, &[])?;

    assert!(bytes.starts_with(b"%PDF"));

    Ok(())
}

#[test]
fn test_undecodable_chart_image_aborts_the_report() -> Result<()> {
    let images = vec![b"not a png".to_vec()];

    let result = ReportAssembler::new().assemble(&sample_kpis()?, &images);

    assert!(matches!(result, Err(ExportError::ImageDecode { .. })));

    Ok(())
}

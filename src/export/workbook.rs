use std::io::Cursor;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use umya_spreadsheet::helper::coordinate::string_from_column_index;
use umya_spreadsheet::{Border, HorizontalAlignmentValues, VerticalAlignmentValues, Worksheet};

use crate::export::ExportError;
use crate::models::{NormalizedRecord, SalesRecord};

const SHEET_NAME: &str = "Data";
const FRAME_FILL: &str = "FF0A0A0A";
const CONTENT_FILL: &str = "FFC4BD97";
const BORDER_COLOR: &str = "FF000000";
const HEADER_FONT: &str = "Calibri";
const HEADER_FONT_SIZE: f64 = 11.0;
const HEADER_ROW_HEIGHT: f64 = 30.0;
const COLUMN_WIDTH: f64 = 13.0;
/// The dark frame extends this many rows and columns past the content.
const FRAME_PADDING: u32 = 10;

/// A single typed cell of an exportable table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Money(Decimal),
    Date(NaiveDate)
}

/// A rectangular table ready for export: a header row plus content rows.
///
/// The formatter never inspects or alters the values; it is presentation
/// only, so any table shape round-trips through it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>
}

impl Table {
    /// The raw snapshot, in source column order.
    pub fn from_records(records: &[SalesRecord]) -> Self {
        Self {
            header: vec![
                "sale_date".to_string(),
                "customer_name".to_string(),
                "product_name".to_string(),
                "product_quantity".to_string(),
                "product_unit_buy_price".to_string(),
                "product_unit_sale_price".to_string(),
            ],
            rows: records.iter().map(|record| vec![
                CellValue::Date(record.sale_date),
                CellValue::Text(record.customer_name.clone()),
                CellValue::Text(record.product_name.clone()),
                CellValue::Integer(record.product_quantity as i64),
                CellValue::Money(record.product_unit_buy_price),
                CellValue::Money(record.product_unit_sale_price),
            ]).collect()
        }
    }

    /// The derived dataset, in the fixed normalized column order.
    pub fn from_normalized(rows: &[NormalizedRecord]) -> Self {
        Self {
            header: NormalizedRecord::COLUMNS.iter().map(|column| column.to_string()).collect(),
            rows: rows.iter().map(|row| vec![
                CellValue::Date(row.sale_date),
                CellValue::Text(row.sale_week.clone()),
                CellValue::Text(row.customer_name.clone()),
                CellValue::Text(row.product_name.clone()),
                CellValue::Integer(row.product_quantity as i64),
                CellValue::Money(row.product_unit_price),
                CellValue::Money(row.total_buy_price),
                CellValue::Money(row.total_sale_price),
                CellValue::Money(row.tax_5pct),
                CellValue::Money(row.net_profit),
            ]).collect()
        }
    }
}

/// Writes the table as styled `.xlsx` bytes.
///
/// Styling contract: a dark frame fill extending [`FRAME_PADDING`] rows and
/// columns beyond the content bounds, a lighter fill with thin black borders
/// and left alignment on every content cell, a bold fixed-height header row,
/// fixed column widths, and an autofilter across the header row.
pub fn write_styled_workbook(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0)
        .ok_or_else(|| ExportError::workbook("Workbook has no default sheet"))?;
    sheet.set_name(SHEET_NAME);

    write_cells(sheet, table);
    style_cells(sheet, table);

    let mut out = Cursor::new(Vec::<u8>::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out)
        .map_err(ExportError::workbook)?;

    Ok(out.into_inner())
}

fn write_cells(sheet: &mut Worksheet, table: &Table) {
    for (index, title) in table.header.iter().enumerate() {
        sheet.get_cell_mut((index as u32 + 1, 1)).set_value(title.as_str());
    }

    for (row_index, row) in table.rows.iter().enumerate() {
        for (col_index, value) in row.iter().enumerate() {
            let cell = sheet.get_cell_mut((col_index as u32 + 1, row_index as u32 + 2));

            match value {
                CellValue::Text(text) => {
                    cell.set_value(text.as_str());
                }
                CellValue::Integer(number) => {
                    cell.set_value_number(*number as f64);
                }
                CellValue::Money(amount) => {
                    cell.set_value_number(amount.to_f64().unwrap_or_default());
                }
                CellValue::Date(date) => {
                    cell.set_value(date.format("%Y-%m-%d").to_string());
                }
            }
        }
    }
}

fn style_cells(sheet: &mut Worksheet, table: &Table) {
    let content_cols = table.header.len() as u32;
    let content_rows = table.rows.len() as u32 + 1;

    for row in 1..=content_rows + FRAME_PADDING {
        for col in 1..=content_cols + FRAME_PADDING {
            sheet.get_style_mut((col, row)).set_background_color(FRAME_FILL);
        }
    }

    for row in 1..=content_rows {
        for col in 1..=content_cols {
            let style = sheet.get_style_mut((col, row));
            style.set_background_color(CONTENT_FILL);

            let borders = style.get_borders_mut();
            borders.get_left_border_mut().set_border_style(Border::BORDER_THIN);
            borders.get_left_border_mut().get_color_mut().set_argb(BORDER_COLOR);
            borders.get_right_border_mut().set_border_style(Border::BORDER_THIN);
            borders.get_right_border_mut().get_color_mut().set_argb(BORDER_COLOR);
            borders.get_top_border_mut().set_border_style(Border::BORDER_THIN);
            borders.get_top_border_mut().get_color_mut().set_argb(BORDER_COLOR);
            borders.get_bottom_border_mut().set_border_style(Border::BORDER_THIN);
            borders.get_bottom_border_mut().get_color_mut().set_argb(BORDER_COLOR);

            let alignment = style.get_alignment_mut();
            alignment.set_horizontal(HorizontalAlignmentValues::Left);
            alignment.set_vertical(VerticalAlignmentValues::Center);
        }
    }

    for col in 1..=content_cols {
        let font = sheet.get_style_mut((col, 1)).get_font_mut();
        font.set_name(HEADER_FONT);
        font.set_size(HEADER_FONT_SIZE);
        font.set_bold(true);
        font.get_color_mut().set_argb(BORDER_COLOR);
    }

    sheet.get_row_dimension_mut(&1).set_height(HEADER_ROW_HEIGHT);

    for col in 1..=content_cols {
        sheet.get_column_dimension_mut(&string_from_column_index(&col))
            .set_width(COLUMN_WIDTH);
    }

    let last_column = string_from_column_index(&content_cols);
    sheet.set_auto_filter(format!("A1:{}1", last_column));
}

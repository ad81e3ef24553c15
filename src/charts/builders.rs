use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analysis::AggregationTable;
use crate::charts::{
    Axis, ChartKind, ChartSpec, LabelFormat, Series, SeriesKind, RENDER_HEIGHT_PX, RENDER_WIDTH_PX
};
use crate::models::Dimension;
use crate::types::{percent_of, COLUMN_DECIMALS};

const SALES_COLOR: &str = "#2B3DD1";
const PROFIT_COLOR: &str = "#44A02D";
const AMOUNT_AXIS_TITLE: &str = "Amount ($)";
const RATE_AXIS_TITLE: &str = "Profit Rate";

/// Builds the chart description matching the table's dimension.
pub fn for_table(table: &AggregationTable) -> ChartSpec {
    match table.dimension {
        Dimension::Month => month_chart(table),
        Dimension::Product => product_chart(table),
        Dimension::Customer => customer_chart(table)
    }
}

/// Sales bars on the primary axis, profit-rate line on the secondary axis,
/// one category per calendar month.
pub fn month_chart(table: &AggregationTable) -> ChartSpec {
    let sales = Series {
        name: "Total Sales".to_string(),
        kind: SeriesKind::Bar,
        axis: Axis::Primary,
        values: sales_values(table),
        color: SALES_COLOR.to_string(),
        labels: LabelFormat::WholeNumber,
        bar_width: None,
        bar_offset: None,
        line_width: None,
        marker_size: None
    };

    let profit_rate = Series {
        name: "% Net Profit".to_string(),
        kind: SeriesKind::Line,
        axis: Axis::Secondary,
        values: table.rows.iter()
            .map(|row| to_plot(row.percent_net_profit.unwrap_or(Decimal::ZERO)))
            .collect(),
        color: PROFIT_COLOR.to_string(),
        labels: LabelFormat::WholePercent,
        bar_width: None,
        bar_offset: None,
        line_width: Some(3.0),
        marker_size: Some(10.0)
    };

    dual_axis_spec(
        "monthly_sales",
        "Total Sales/Net Profit by Month",
        ChartKind::BarLineDualAxis,
        table,
        vec![sales, profit_rate]
    )
}

/// Two offset bar series per product: absolute sales on the primary axis and
/// the profit percentage on the secondary axis.
pub fn product_chart(table: &AggregationTable) -> ChartSpec {
    let sales = Series {
        name: "Total Sales".to_string(),
        kind: SeriesKind::Bar,
        axis: Axis::Primary,
        values: sales_values(table),
        color: SALES_COLOR.to_string(),
        labels: LabelFormat::WholeNumber,
        bar_width: Some(0.3),
        bar_offset: Some(-0.15),
        line_width: None,
        marker_size: None
    };

    let profit_rate = Series {
        name: "% Net Profit".to_string(),
        kind: SeriesKind::Bar,
        axis: Axis::Secondary,
        values: table.rows.iter()
            .map(|row| to_plot(percent_of(row.net_profit, row.total_sale_price, COLUMN_DECIMALS)))
            .collect(),
        color: PROFIT_COLOR.to_string(),
        labels: LabelFormat::WholePercent,
        bar_width: Some(0.3),
        bar_offset: Some(0.15),
        line_width: None,
        marker_size: None
    };

    dual_axis_spec(
        "product_sales",
        "Total Sales / % Net Profit by Product",
        ChartKind::GroupedBar,
        table,
        vec![sales, profit_rate]
    )
}

/// Absolute sales and absolute net profit as grouped bars on one axis.
pub fn customer_chart(table: &AggregationTable) -> ChartSpec {
    let sales = Series {
        name: "Total Sales".to_string(),
        kind: SeriesKind::Bar,
        axis: Axis::Primary,
        values: sales_values(table),
        color: SALES_COLOR.to_string(),
        labels: LabelFormat::WholeNumber,
        bar_width: None,
        bar_offset: None,
        line_width: None,
        marker_size: None
    };

    let profit = Series {
        name: "Net Profit".to_string(),
        kind: SeriesKind::Bar,
        axis: Axis::Primary,
        values: table.rows.iter().map(|row| to_plot(row.net_profit)).collect(),
        color: PROFIT_COLOR.to_string(),
        labels: LabelFormat::WholeNumber,
        bar_width: None,
        bar_offset: None,
        line_width: None,
        marker_size: None
    };

    ChartSpec {
        slug: "customer_sales".to_string(),
        title: "Total Sales/Net Profit by Customer".to_string(),
        kind: ChartKind::GroupedBar,
        categories: categories(table),
        series: vec![sales, profit],
        primary_axis_title: AMOUNT_AXIS_TITLE.to_string(),
        secondary_axis_title: None,
        secondary_axis_suffix: None,
        dual_axis: false,
        horizontal_legend: true,
        centered_title: true,
        render_width_px: RENDER_WIDTH_PX,
        render_height_px: RENDER_HEIGHT_PX
    }
}

fn dual_axis_spec(slug: &str, title: &str, kind: ChartKind, table: &AggregationTable, series: Vec<Series>) -> ChartSpec {
    ChartSpec {
        slug: slug.to_string(),
        title: title.to_string(),
        kind,
        categories: categories(table),
        series,
        primary_axis_title: AMOUNT_AXIS_TITLE.to_string(),
        secondary_axis_title: Some(RATE_AXIS_TITLE.to_string()),
        secondary_axis_suffix: Some("%".to_string()),
        dual_axis: true,
        horizontal_legend: true,
        centered_title: true,
        render_width_px: RENDER_WIDTH_PX,
        render_height_px: RENDER_HEIGHT_PX
    }
}

fn categories(table: &AggregationTable) -> Vec<String> {
    table.rows.iter().map(|row| row.label.clone()).collect()
}

fn sales_values(table: &AggregationTable) -> Vec<f64> {
    table.rows.iter().map(|row| to_plot(row.total_sale_price)).collect()
}

fn to_plot(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

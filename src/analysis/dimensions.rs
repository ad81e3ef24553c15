use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{Dimension, NormalizedRecord};
use crate::types::{percent_of, round_column, COLUMN_DECIMALS};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December"
];

/// One group of the dimensional aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationRow {
    /// Group label: full month name, product name, or customer name.
    pub label: String,
    pub total_sale_price: Decimal,
    pub net_profit: Decimal,
    /// `net_profit / total_sale_price * 100`; carried for month buckets
    /// only, zero for an all-zero bucket.
    pub percent_net_profit: Option<Decimal>
}

/// A normalized dataset partitioned along one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationTable {
    pub dimension: Dimension,
    pub rows: Vec<AggregationRow>
}

/// Groups and sums the dataset along the requested dimension.
///
/// Month buckets cover every calendar month between the earliest and latest
/// sale inclusive, so a spanned month without records still shows up with
/// zero sums. Product and customer groups are ordered descending by total
/// sales; equal totals keep the order the groups were first encountered in.
pub fn aggregate(rows: &[NormalizedRecord], dimension: Dimension) -> AggregationTable {
    match dimension {
        Dimension::Month => aggregate_monthly(rows),
        Dimension::Product => aggregate_by_name(rows, dimension),
        Dimension::Customer => aggregate_by_name(rows, dimension)
    }
}

fn aggregate_monthly(rows: &[NormalizedRecord]) -> AggregationTable {
    let mut table = AggregationTable {
        dimension: Dimension::Month,
        rows: Vec::new()
    };

    let Some(first) = rows.iter().map(month_of).min() else {
        return table;
    };
    let last = rows.iter().map(month_of).max().unwrap_or(first);

    let mut buckets: HashMap<(i32, u32), (Decimal, Decimal)> = HashMap::new();

    for row in rows {
        let bucket = buckets.entry(month_of(row)).or_default();
        bucket.0 += row.total_sale_price;
        bucket.1 += row.net_profit;
    }

    let (mut year, mut month) = first;

    loop {
        let (sales, profit) = buckets.get(&(year, month)).copied().unwrap_or_default();
        let sales = round_column(sales);
        let profit = round_column(profit);

        table.rows.push(AggregationRow {
            label: MONTH_NAMES[month as usize - 1].to_string(),
            total_sale_price: sales,
            net_profit: profit,
            percent_net_profit: Some(percent_of(profit, sales, COLUMN_DECIMALS))
        });

        if (year, month) == last {
            break;
        }

        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    table
}

fn aggregate_by_name(rows: &[NormalizedRecord], dimension: Dimension) -> AggregationTable {
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<AggregationRow> = Vec::new();

    for row in rows {
        let name = match dimension {
            Dimension::Product => &row.product_name,
            _ => &row.customer_name
        };

        let index = *order.entry(name.clone()).or_insert_with(|| {
            groups.push(AggregationRow {
                label: name.clone(),
                total_sale_price: Decimal::ZERO,
                net_profit: Decimal::ZERO,
                percent_net_profit: None
            });
            groups.len() - 1
        });

        groups[index].total_sale_price += row.total_sale_price;
        groups[index].net_profit += row.net_profit;
    }

    for group in &mut groups {
        group.total_sale_price = round_column(group.total_sale_price);
        group.net_profit = round_column(group.net_profit);
    }

    // Stable, so equal totals keep first-encounter order.
    groups.sort_by(|a, b| b.total_sale_price.cmp(&a.total_sale_price));

    AggregationTable {
        dimension,
        rows: groups
    }
}

fn month_of(row: &NormalizedRecord) -> (i32, u32) {
    use chrono::Datelike;

    (row.sale_date.year(), row.sale_date.month())
}

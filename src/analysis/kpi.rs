use rust_decimal::Decimal;

use crate::models::NormalizedRecord;
use crate::types::{format_grouped, percent_of, round_kpi, KPI_DECIMALS};

/// The four scalar summary metrics over one normalized dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSet {
    /// Sum of `total_sale_price`, one decimal place.
    pub total_sales: Decimal,
    /// Sum of `tax_5pct`, one decimal place.
    pub total_taxes: Decimal,
    /// Sum of `net_profit`, one decimal place.
    pub total_net_profit: Decimal,
    /// `total_net_profit / total_sales * 100`, one decimal place.
    /// Zero when there are no sales, rather than a division fault.
    pub net_profit_rate: Decimal
}

impl KpiSet {
    pub fn from_normalized(rows: &[NormalizedRecord]) -> Self {
        let total_sales = round_kpi(rows.iter().map(|row| row.total_sale_price).sum());
        let total_taxes = round_kpi(rows.iter().map(|row| row.tax_5pct).sum());
        let total_net_profit = round_kpi(rows.iter().map(|row| row.net_profit).sum());
        let net_profit_rate = percent_of(total_net_profit, total_sales, KPI_DECIMALS);

        Self {
            total_sales,
            total_taxes,
            total_net_profit,
            net_profit_rate
        }
    }

    /// Display form of the KPI value row, e.g.
    /// `12 345.6 $   617.3 $   4 321.0 $   35.0%`.
    pub fn display_row(&self) -> String {
        format!(
            "{} $   {} $   {} $   {}%",
            format_grouped(self.total_sales),
            format_grouped(self.total_taxes),
            format_grouped(self.total_net_profit),
            self.net_profit_rate
        )
    }
}

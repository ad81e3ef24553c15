use rust_decimal::Decimal;

/// Decimal places for per-row monetary columns.
pub const COLUMN_DECIMALS: u32 = 2;
/// Decimal places for the scalar summary metrics.
pub const KPI_DECIMALS: u32 = 1;

/// Rounds a per-row monetary value to two decimal places.
///
/// Uses banker's rounding (`round_dp` default), which is the same midpoint
/// behaviour the rest of the pipeline assumes.
pub fn round_column(value: Decimal) -> Decimal {
    value.round_dp(COLUMN_DECIMALS)
}

/// Rounds a summary metric to one decimal place.
pub fn round_kpi(value: Decimal) -> Decimal {
    value.round_dp(KPI_DECIMALS)
}

/// Computes `numerator / denominator * 100`, rounded to `decimals` places.
///
/// A zero denominator yields zero rather than a fault. Both the all-zero
/// month bucket and the zero-sales profit rate funnel through this single
/// guard, so the sentinel policy lives in exactly one place.
pub fn percent_of(numerator: Decimal, denominator: Decimal, decimals: u32) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    ((numerator / denominator) * Decimal::ONE_HUNDRED).round_dp(decimals)
}

/// Formats a value for display with space-separated thousands groups,
/// e.g. `12 345.6`.
pub fn format_grouped(value: Decimal) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str())
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None)
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    let digits: Vec<char> = integer.chars().collect();

    for (index, digit) in digits.iter().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped)
    }
}

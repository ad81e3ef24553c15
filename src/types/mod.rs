mod errors;
mod money;

pub use errors::EngineError;
pub use money::{format_grouped, percent_of, round_column, round_kpi, COLUMN_DECIMALS, KPI_DECIMALS};

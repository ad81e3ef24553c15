mod dimensions;
mod kpi;
mod normalizer;

pub use dimensions::{aggregate, AggregationRow, AggregationTable};
pub use kpi::KpiSet;
pub use normalizer::normalize;

use crate::models::{Dimension, NormalizedRecord, SalesRecord};

/// Everything derived from one snapshot of the sales table.
///
/// Recomputed fresh per pipeline run; the engine memoizes whole bundles by
/// snapshot fingerprint, never individual pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub normalized: Vec<NormalizedRecord>,
    pub kpis: KpiSet,
    pub monthly: AggregationTable,
    pub by_product: AggregationTable,
    pub by_customer: AggregationTable
}

impl Analysis {
    pub fn compute(records: &[SalesRecord]) -> Self {
        let normalized = normalize(records);
        let kpis = KpiSet::from_normalized(&normalized);
        let monthly = aggregate(&normalized, Dimension::Month);
        let by_product = aggregate(&normalized, Dimension::Product);
        let by_customer = aggregate(&normalized, Dimension::Customer);

        Self {
            normalized,
            kpis,
            monthly,
            by_product,
            by_customer
        }
    }
}

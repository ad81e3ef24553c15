use crate::models::{NormalizedRecord, SalesRecord};

/// Normalizes a raw snapshot into the derived dataset.
///
/// Each row is derived independently, then the whole set is stable-sorted
/// ascending by sale date. Rows sharing a date keep their snapshot order.
/// An empty snapshot yields an empty dataset.
pub fn normalize(records: &[SalesRecord]) -> Vec<NormalizedRecord> {
    let mut rows: Vec<NormalizedRecord> = records.iter().map(NormalizedRecord::derive).collect();

    rows.sort_by_key(|row| row.sale_date);

    rows
}

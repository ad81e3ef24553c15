use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::analysis::Analysis;

/// Memoizes derived analysis bundles by snapshot fingerprint.
///
/// Recomputation is always correct, so this layer is purely an optimization:
/// repeated report requests against an unedited table reuse the bundle, and
/// any edit changes the fingerprint and misses the cache. Entries fall out
/// on capacity pressure or after sitting idle past the timeout.
pub struct AnalysisCache {
    entries: Cache<u64, Arc<Analysis>>
}

impl AnalysisCache {
    pub fn new(capacity: u64, time_to_idle: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(time_to_idle)
                .build()
        }
    }

    pub async fn load(&self, fingerprint: u64) -> Option<Arc<Analysis>> {
        self.entries.get(&fingerprint).await
    }

    pub async fn save(&self, fingerprint: u64, analysis: Arc<Analysis>) {
        self.entries.insert(fingerprint, analysis).await;
    }
}

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;
use tokio::task::spawn_blocking;
use tracing::{debug, info};

use crate::analysis::Analysis;
use crate::charts::{self, ChartRenderer, ChartSpec};
use crate::export::{write_styled_workbook, ReportAssembler, Table};
use crate::models::{fingerprint, SalesRecord, SchemaError};
use crate::storage::AnalysisCache;
use crate::types::EngineError;

const DEFAULT_CACHE_CAPACITY: u64 = 32;
const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(300);

/// Orchestrates one report pipeline run: snapshot ingestion, derivation,
/// and the export entry points.
///
/// The transforms themselves are pure and synchronous; the engine only adds
/// ingestion off the blocking pool and memoization of derived bundles.
pub struct ReportEngine {
    cache: AnalysisCache,
    cache_capacity: u64,
    cache_timeout: Duration,
    backpressure: usize
}

impl ReportEngine {
    pub fn new() -> Self {
        Self {
            cache: AnalysisCache::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TIMEOUT),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
            backpressure: 256
        }
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self.cache = AnalysisCache::new(self.cache_capacity, self.cache_timeout);
        self
    }

    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout = timeout;
        self.cache = AnalysisCache::new(self.cache_capacity, self.cache_timeout);
        self
    }

    /// Materializes the full record snapshot from a CSV file.
    ///
    /// Parsing runs on the blocking pool and streams rows through a bounded
    /// channel. Unlike a tolerant importer, the first row that fails the
    /// schema aborts the whole run; a dropped row would silently skew every
    /// aggregate computed from the snapshot.
    pub async fn load_records(&self, path: &str) -> Result<Vec<SalesRecord>, EngineError> {
        let (sender, mut receiver) = mpsc::channel::<SalesRecord>(self.backpressure);
        let owned_path = path.to_string();

        let reader_handle = spawn_blocking(move || -> Result<(), SchemaError> {
            let file = File::open(&owned_path)
                .map_err(|error| SchemaError::unreadable(&owned_path, &error))?;

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .from_reader(BufReader::new(file));

            for result in reader.deserialize::<SalesRecord>() {
                let record = result.map_err(|error| SchemaError::malformed(&error))?;

                if sender.blocking_send(record).is_err() {
                    break;
                }
            }

            Ok(())
        });

        let mut records = Vec::new();
        while let Some(record) = receiver.recv().await {
            records.push(record);
        }

        reader_handle.await??;

        debug!("Loaded snapshot of {} records", records.len());

        Ok(records)
    }

    /// Derives (or reuses) the full analysis bundle for a snapshot.
    pub async fn analyze(&self, records: &[SalesRecord]) -> Arc<Analysis> {
        let key = fingerprint(records);

        if let Some(cached) = self.cache.load(key).await {
            debug!("Analysis cache hit for snapshot [{key:016x}]");
            return cached;
        }

        let analysis = Arc::new(Analysis::compute(records));
        self.cache.save(key, analysis.clone()).await;

        info!(
            "Derived {} rows, {} month buckets, {} products, {} customers",
            analysis.normalized.len(),
            analysis.monthly.rows.len(),
            analysis.by_product.rows.len(),
            analysis.by_customer.rows.len()
        );

        analysis
    }

    /// The chart descriptions for one analysis, in report order.
    pub fn chart_specs(analysis: &Analysis) -> Vec<ChartSpec> {
        vec![
            charts::for_table(&analysis.monthly),
            charts::for_table(&analysis.by_product),
            charts::for_table(&analysis.by_customer),
        ]
    }

    /// Styles the (possibly edited) raw table into workbook bytes.
    pub fn export_workbook(records: &[SalesRecord]) -> Result<Vec<u8>, EngineError> {
        let bytes = write_styled_workbook(&Table::from_records(records))?;

        Ok(bytes)
    }

    /// Styles the derived dataset into workbook bytes, in the fixed
    /// normalized column order.
    pub fn export_derived_workbook(analysis: &Analysis) -> Result<Vec<u8>, EngineError> {
        let bytes = write_styled_workbook(&Table::from_normalized(&analysis.normalized))?;

        Ok(bytes)
    }

    /// Renders every chart through the collaborator and assembles the
    /// paginated report. Any rendering failure aborts the request; a
    /// partial document is never returned.
    pub fn assemble_report<R: ChartRenderer>(analysis: &Analysis, renderer: &R) -> Result<Vec<u8>, EngineError> {
        let mut images = Vec::new();

        for spec in Self::chart_specs(analysis) {
            images.push(renderer.render(&spec)?);
        }

        let bytes = ReportAssembler::new().assemble(&analysis.kpis, &images)?;

        Ok(bytes)
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}

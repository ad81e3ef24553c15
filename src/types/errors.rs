use thiserror::Error;

use crate::charts::ChartError;
use crate::export::ExportError;
use crate::models::SchemaError;

/// Top-level failure for a single pipeline run.
///
/// Every variant names the stage it came from so the caller can tell which
/// part of the report request failed. Any variant aborts the current run;
/// no stage substitutes defaults for failed output.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Ingestion failed: {0}")]
    Schema(#[from] SchemaError),
    #[error("Chart rendering failed: {0}")]
    Chart(#[from] ChartError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("Ingestion task failed: {0}")]
    Join(#[from] tokio::task::JoinError)
}

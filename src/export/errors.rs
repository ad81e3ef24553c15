use thiserror::Error;

/// Failure while producing one of the output artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Workbook serialization failed: {detail}")]
    Workbook {
        detail: String
    },
    #[error("Chart image could not be decoded for embedding: {detail}")]
    ImageDecode {
        detail: String
    }
}

impl ExportError {
    pub fn workbook(detail: impl std::fmt::Display) -> Self {
        Self::Workbook {
            detail: detail.to_string()
        }
    }

    pub fn image_decode(detail: impl std::fmt::Display) -> Self {
        Self::ImageDecode {
            detail: detail.to_string()
        }
    }
}

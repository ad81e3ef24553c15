use thiserror::Error;

/// A record in the input snapshot that does not match the sales schema.
///
/// Schema violations abort the run immediately. Skipping the offending row
/// would silently change every aggregate derived from the snapshot, so the
/// whole request fails with enough context to find the bad record.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Record at line [{line}] does not match the sales schema: {detail}")]
    MalformedRecord {
        line: u64,
        detail: String
    },
    #[error("Input at [{path}] could not be opened: {detail}")]
    UnreadableInput {
        path: String,
        detail: String
    }
}

impl SchemaError {
    pub fn malformed(error: &csv::Error) -> Self {
        let line = error.position().map(|position| position.line()).unwrap_or(0);

        Self::MalformedRecord {
            line,
            detail: error.to_string()
        }
    }

    pub fn unreadable(path: &str, error: &std::io::Error) -> Self {
        Self::UnreadableInput {
            path: path.to_string(),
            detail: error.to_string()
        }
    }
}

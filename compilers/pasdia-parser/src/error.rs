use thiserror::Error;

/// Structural problems in a segment header line. Never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Illegal format at line {line_no}: expected 5 fields, found {found}: {line}")]
    FieldCount {
        line_no: usize,
        found: usize,
        line: String,
    },

    #[error("Illegal format at line {line_no}: head field has no direction suffix: {line}")]
    MissingDirection { line_no: usize, line: String },

    #[error("Illegal format at line {line_no}: '{field}' is not a segment number: {line}")]
    InvalidNumber {
        line_no: usize,
        field: String,
        line: String,
    },
}

impl FormatError {
    /// The offending input line.
    pub fn line(&self) -> &str {
        match self {
            FormatError::FieldCount { line, .. }
            | FormatError::MissingDirection { line, .. }
            | FormatError::InvalidNumber { line, .. } => line,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read tree input")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}

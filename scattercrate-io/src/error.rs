//! Error types for I/O operations

use thiserror::Error;

/// Problems met while loading a coordinate file
///
/// None of these abort a load. The loader records each one in its
/// [`LoadReport`](crate::LoadReport), logs it, and carries on with whatever
/// data is still usable.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Could not open {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    
    #[error("Could not read line {line}: expected 3 values, found {found}: {content:?}")]
    MalformedLine {
        line: usize,
        found: usize,
        content: String,
    },
    
    #[error("Line {line}, field {field}: {token:?} is not a number, using 0.0")]
    InvalidNumber {
        line: usize,
        field: usize,
        token: String,
    },
    
    #[error("Reading stopped after line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    /// Whether the affected line was dropped from the result
    pub fn drops_line(&self) -> bool {
        matches!(self, IoError::MalformedLine { .. })
    }
}

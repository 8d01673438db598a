//! Error types for scattercrate

use thiserror::Error;

/// Main error type for scattercrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    #[error("GPU error: {0}")]
    Gpu(String),
    
    #[error("Rendering context unavailable: {0}")]
    RenderContextUnavailable(String),
    
    #[error("Visualization error: {0}")]
    Visualization(String),
}

impl Error {
    /// Whether the application can keep running after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::RenderContextUnavailable(_))
    }
}

/// Result type alias for scattercrate operations
pub type Result<T> = std::result::Result<T, Error>;

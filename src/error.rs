//! Error types for the word-list extraction pipeline.
//!
//! Page-level failures (nothing recognized, no headword candidates) abort the
//! analysis of a single image. Missing table structure is recoverable and is
//! only reported so the caller can log it; per-row failures never surface as
//! errors at all, the row is simply dropped.

/// Result type alias for word-list operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting a word list.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text recognizer returned no usable fragments.
    #[error("No text fragments were recognized on the page")]
    NoFragmentsRecognized,

    /// The size and pattern filters eliminated every headword candidate.
    #[error("No headword candidates found on the page")]
    NoWordCandidates,

    /// The table-structure detector failed. The pipeline degrades to
    /// synthesized columns and band-only rows.
    #[error("Table structure detection unavailable: {0}")]
    StructureDetectionUnavailable(String),

    /// The text recognizer itself failed.
    #[error("Text recognition failed: {0}")]
    Recognition(String),

    /// A configuration value is out of range or a pattern does not compile.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialized configuration could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error ends the analysis of the current page.
    ///
    /// Structure detection failures are the only recoverable kind: the
    /// pipeline keeps going without detector boxes.
    pub fn is_page_fatal(&self) -> bool {
        !matches!(self, Error::StructureDetectionUnavailable(_))
    }
}

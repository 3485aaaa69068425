//! Error types for the recitation data model

use thiserror::Error;

/// Data model errors
#[derive(Debug, Error)]
pub enum Error {
    /// Verse key string did not parse as `surah:ayah`
    #[error("Invalid verse key: {0}")]
    InvalidVerseKey(String),

    /// Surah number outside 1..=114
    #[error("Surah number out of range: {0}")]
    SurahOutOfRange(u16),

    /// Timing table violates an ordering or overlap invariant
    #[error("Invalid verse timings: {0}")]
    InvalidTimings(String),
}

/// Result type for data model operations
pub type Result<T> = std::result::Result<T, Error>;

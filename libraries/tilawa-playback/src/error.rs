//! Error types for playback orchestration

use thiserror::Error;

/// Playback errors
///
/// Fetch and playback failures are state transitions (the player moves
/// to its failed state), not error returns; these variants cover
/// invalid commands only.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No audio metadata is loaded yet
    #[error("No audio loaded")]
    NoAudioLoaded,

    /// Repeat range is inverted
    #[error("Invalid repeat range: {from}..={to}")]
    InvalidRepeatRange { from: u16, to: u16 },

    /// Cycle totals must be at least 1
    #[error("Repeat cycle totals must be at least 1")]
    InvalidCycleTotal,

    /// Requested verse does not exist in the loaded surah
    #[error("Verse out of range: {0}")]
    VerseOutOfRange(u16),

    /// Seek target past the end of the audio file
    #[error("Invalid seek position: {0} ms")]
    InvalidSeekPosition(u32),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlayerError>;

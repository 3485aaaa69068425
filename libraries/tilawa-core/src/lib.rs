//! Tilawa - Recitation Data Model
//!
//! Shared data model for recitation playback:
//! - Verse keys (`"2:255"` style chapter:verse identifiers)
//! - Per-verse and per-word timing windows within a recitation audio file
//! - Audio metadata for one (reciter, surah) pair
//! - Containment lookups mapping a playback position to the active
//!   verse and word
//!
//! This crate is playback-agnostic: it knows nothing about audio
//! rendering or state machines. `tilawa-playback` builds on it.

mod error;
pub mod timing;
mod types;

// Public exports
pub use error::{Error, Result};
pub use timing::{active_verse_timing, active_word_position, timing_for_verse};
pub use types::{AudioData, VerseKey, VerseTiming, WordSegment, SURAH_COUNT};

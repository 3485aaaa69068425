//! Containment lookups over verse timing tables
//!
//! Maps a playback position (ms into the surah audio file) to the
//! verse and word being recited at that instant.

use crate::types::VerseTiming;

/// Find the verse whose `[timestamp_from, timestamp_to)` window
/// contains `position_ms`
///
/// Returns `None` when the position falls outside every window, which
/// happens when the element reports drift past the final verse at
/// end-of-file. Callers keep their last known verse in that case
/// rather than recomputing.
pub fn active_verse_timing(timings: &[VerseTiming], position_ms: u32) -> Option<&VerseTiming> {
    timings
        .iter()
        .find(|t| position_ms >= t.timestamp_from && position_ms < t.timestamp_to)
}

/// Find the word being recited at `position_ms` within a verse
///
/// Same containment scan over the verse's word segments. Returns 0
/// when no segment matches (gaps between words, or positions before
/// the first word).
pub fn active_word_position(timing: &VerseTiming, position_ms: u32) -> u32 {
    timing
        .segments
        .iter()
        .find(|s| position_ms >= s.timestamp_from && position_ms < s.timestamp_to)
        .map_or(0, |s| s.word_position)
}

/// Look up the timing window for a verse by its 1-based number
pub fn timing_for_verse(timings: &[VerseTiming], ayah: u16) -> Option<&VerseTiming> {
    timings.iter().find(|t| t.verse_key.ayah == ayah)
}

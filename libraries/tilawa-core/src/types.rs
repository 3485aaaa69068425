//! Core types for recitation audio metadata

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of surahs (chapters) in the mushaf
pub const SURAH_COUNT: u16 = 114;

/// Identifies one verse: chapter number plus 1-based verse number
///
/// Rendered as `"surah:ayah"`, e.g. `"2:255"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseKey {
    /// Surah (chapter) number, 1..=114
    pub surah: u16,

    /// Ayah (verse) number within the surah, 1-based
    pub ayah: u16,
}

impl VerseKey {
    /// Create a new verse key
    pub fn new(surah: u16, ayah: u16) -> Self {
        Self { surah, ayah }
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.ayah)
    }
}

impl FromStr for VerseKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (surah, ayah) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidVerseKey(s.to_string()))?;

        let surah: u16 = surah
            .parse()
            .map_err(|_| Error::InvalidVerseKey(s.to_string()))?;
        let ayah: u16 = ayah
            .parse()
            .map_err(|_| Error::InvalidVerseKey(s.to_string()))?;

        if surah == 0 || surah > SURAH_COUNT {
            return Err(Error::SurahOutOfRange(surah));
        }
        if ayah == 0 {
            return Err(Error::InvalidVerseKey(s.to_string()));
        }

        Ok(Self { surah, ayah })
    }
}

/// Highlight window for one word within a verse
///
/// Timestamps are milliseconds into the surah audio file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSegment {
    /// Word position within the verse, 1-based
    pub word_position: u32,

    /// Window start (ms)
    pub timestamp_from: u32,

    /// Window end (ms, exclusive)
    pub timestamp_to: u32,
}

/// Timing window for one verse within a surah audio file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseTiming {
    /// Which verse this window covers
    pub verse_key: VerseKey,

    /// Window start (ms)
    pub timestamp_from: u32,

    /// Window end (ms, exclusive)
    pub timestamp_to: u32,

    /// Window length (ms)
    pub duration: u32,

    /// Per-word highlight windows, ordered by timestamp
    pub segments: Vec<WordSegment>,
}

/// Audio metadata for one (reciter, surah) pair
///
/// Immutable once fetched; replaced wholesale on reciter or surah
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioData {
    /// URL of the surah audio file
    pub audio_url: String,

    /// Total file duration (ms)
    pub duration: u32,

    /// One entry per verse, ordered by verse number
    pub verse_timings: Vec<VerseTiming>,
}

impl AudioData {
    /// Number of verses covered by this file
    pub fn verses_count(&self) -> u16 {
        self.verse_timings.len() as u16
    }

    /// Check the timing-table invariants
    ///
    /// Verses must be ordered by verse number with ascending,
    /// non-overlapping timestamp ranges; segments within a verse must
    /// be ordered and non-overlapping.
    pub fn validate(&self) -> Result<()> {
        for pair in self.verse_timings.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);

            if b.verse_key.ayah != a.verse_key.ayah + 1 {
                return Err(Error::InvalidTimings(format!(
                    "verses out of order: {} followed by {}",
                    a.verse_key, b.verse_key
                )));
            }
            if b.timestamp_from < a.timestamp_to {
                return Err(Error::InvalidTimings(format!(
                    "verse ranges overlap at {}",
                    b.verse_key
                )));
            }
        }

        for timing in &self.verse_timings {
            if timing.timestamp_to < timing.timestamp_from {
                return Err(Error::InvalidTimings(format!(
                    "inverted range at {}",
                    timing.verse_key
                )));
            }
            for pair in timing.segments.windows(2) {
                if pair[1].timestamp_from < pair[0].timestamp_to {
                    return Err(Error::InvalidTimings(format!(
                        "word segments overlap in {}",
                        timing.verse_key
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(ayah: u16, from: u32, to: u32) -> VerseTiming {
        VerseTiming {
            verse_key: VerseKey::new(1, ayah),
            timestamp_from: from,
            timestamp_to: to,
            duration: to - from,
            segments: Vec::new(),
        }
    }

    #[test]
    fn verse_key_round_trip() {
        let key: VerseKey = "2:255".parse().unwrap();
        assert_eq!(key, VerseKey::new(2, 255));
        assert_eq!(key.to_string(), "2:255");
    }

    #[test]
    fn verse_key_rejects_garbage() {
        assert!("2-255".parse::<VerseKey>().is_err());
        assert!("abc:1".parse::<VerseKey>().is_err());
        assert!("0:1".parse::<VerseKey>().is_err());
        assert!("115:1".parse::<VerseKey>().is_err());
        assert!("3:0".parse::<VerseKey>().is_err());
    }

    #[test]
    fn validate_accepts_ordered_timings() {
        let data = AudioData {
            audio_url: "https://audio.example/1.mp3".to_string(),
            duration: 30_000,
            verse_timings: vec![
                timing(1, 0, 10_000),
                timing(2, 10_000, 20_000),
                timing(3, 20_000, 30_000),
            ],
        };
        assert!(data.validate().is_ok());
    }

    #[test]
    fn validate_rejects_overlapping_verses() {
        let data = AudioData {
            audio_url: "https://audio.example/1.mp3".to_string(),
            duration: 20_000,
            verse_timings: vec![timing(1, 0, 10_000), timing(2, 9_000, 20_000)],
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_order_verses() {
        let data = AudioData {
            audio_url: "https://audio.example/1.mp3".to_string(),
            duration: 20_000,
            verse_timings: vec![timing(2, 0, 10_000), timing(1, 10_000, 20_000)],
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn audio_data_wire_shape() {
        let json = r#"{
            "audio_url": "https://audio.example/64.mp3",
            "duration": 12000,
            "verse_timings": [
                {
                    "verse_key": { "surah": 64, "ayah": 1 },
                    "timestamp_from": 0,
                    "timestamp_to": 12000,
                    "duration": 12000,
                    "segments": [
                        { "word_position": 1, "timestamp_from": 0, "timestamp_to": 600 }
                    ]
                }
            ]
        }"#;

        let data: AudioData = serde_json::from_str(json).unwrap();
        assert_eq!(data.verses_count(), 1);
        assert_eq!(data.verse_timings[0].segments[0].word_position, 1);
        assert!(data.validate().is_ok());
    }
}

//! Core types for playback orchestration

use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};

/// Player lifecycle state
///
/// Everything except [`PlayerState::Hidden`] counts as visible to the
/// host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Player closed, no playback
    Hidden,

    /// Metadata fetch in flight
    Loading(LoadKind),

    /// Audio element initiated, playback in one of its sub-states
    Active(AudioState),

    /// A different surah was requested while the current one ended;
    /// waiting for confirm/cancel
    SurahMismatch,

    /// Fetch or playback failure; terminal until a fresh play command
    Failed,
}

/// Which flow triggered the in-flight metadata fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadKind {
    /// Regular surah selection with the current reciter
    Reciter,

    /// Selection carrying an explicit reciter (radio tracks, overrides)
    CustomReciter,

    /// Fetch triggered by configuring a repeat session
    Repeat,
}

/// Playback sub-state while the audio element is initiated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioState {
    /// Audio element is playing
    Playing,

    /// Paused mid-file
    Paused,

    /// Timed pause before a repeat replay; host timer completes it
    Delaying,

    /// File played to its end
    Ended,
}

/// Repeat session parameters supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatSettings {
    /// First verse of the practice range, 1-based
    pub from_verse: u16,

    /// Last verse of the practice range, inclusive
    pub to_verse: u16,

    /// How many times to walk the whole range
    pub total_range_cycles: u32,

    /// How many times each verse replays within one walk
    pub total_verse_cycles: u32,

    /// Pause before each replay, as a multiple of the verse duration
    pub delay_multiplier: f32,
}

impl RepeatSettings {
    /// Check the settings invariants
    pub fn validate(&self) -> Result<()> {
        if self.from_verse == 0 || self.from_verse > self.to_verse {
            return Err(PlayerError::InvalidRepeatRange {
                from: self.from_verse,
                to: self.to_verse,
            });
        }
        if self.total_range_cycles == 0 || self.total_verse_cycles == 0 {
            return Err(PlayerError::InvalidCycleTotal);
        }
        Ok(())
    }
}

/// Externally persisted subset of the player context
///
/// Saved fire-and-forget on reciter or playback-rate changes and
/// restored at session start via `Player::set_initial_context`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPreferences {
    /// Selected reciter
    pub reciter_id: u32,

    /// Playback rate (1.0 = normal speed)
    pub playback_rate: f32,
}

/// Configuration for the player
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Reciter used before any preference is restored (default: 7)
    pub default_reciter_id: u32,

    /// Early-trigger tolerance for end-of-verse detection, in ms
    /// (default: 200, compensates for playback-tick granularity)
    pub verse_end_tolerance_ms: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_reciter_id: 7,
            verse_end_tolerance_ms: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.default_reciter_id, 7);
        assert_eq!(config.verse_end_tolerance_ms, 200);
    }

    #[test]
    fn repeat_settings_validation() {
        let valid = RepeatSettings {
            from_verse: 2,
            to_verse: 5,
            total_range_cycles: 1,
            total_verse_cycles: 3,
            delay_multiplier: 1.0,
        };
        assert!(valid.validate().is_ok());

        let inverted = RepeatSettings {
            from_verse: 5,
            to_verse: 2,
            ..valid
        };
        assert!(inverted.validate().is_err());

        let zero_verse = RepeatSettings {
            from_verse: 0,
            ..valid
        };
        assert!(zero_verse.validate().is_err());

        let zero_cycles = RepeatSettings {
            total_range_cycles: 0,
            ..valid
        };
        assert!(zero_cycles.validate().is_err());
    }
}

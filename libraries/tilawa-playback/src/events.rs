//! Player Events
//!
//! Event-based communication for host synchronization. Events are
//! emitted at key points:
//! - State changes (loading, playing, delaying, failed, ...)
//! - Active verse/word changes while the file plays
//! - Fetch requests the host must satisfy
//! - Delay scheduling the host timer must complete
//!
//! The host drains them with `Player::drain_events` after each
//! command.

use crate::types::PlayerState;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Player state changed
    StateChanged {
        /// The new player state
        state: PlayerState,
    },

    /// The player needs audio metadata for a (reciter, surah) pair
    ///
    /// The host fetches it and calls `fetch_completed` /
    /// `fetch_failed`.
    FetchRequested {
        /// Reciter whose recording is needed
        reciter_id: u32,
        /// Surah number
        surah: u16,
    },

    /// The active verse changed
    ///
    /// Emitted for playback progress, repeat-session advances, and
    /// manual navigation alike, so the UI can animate to the verse.
    AyahChanged {
        /// Surah number
        surah: u16,
        /// New active verse, 1-based
        ayah: u16,
    },

    /// The active word within the current verse changed
    WordChanged {
        /// Word position, 1-based; 0 when no word window matches
        word_position: u32,
    },

    /// A repeat replay is pending; the host timer should call
    /// `delay_elapsed` after this many milliseconds
    DelayStarted {
        /// Pause length in milliseconds
        delay_ms: u32,
    },

    /// The repeat session ran to completion
    RepeatFinished,

    /// A different surah was requested while the current one ended;
    /// the host should present a confirm/cancel affordance
    SurahMismatchDetected {
        /// Surah currently loaded
        current_surah: u16,
        /// Surah the rejected-for-now request asked for
        requested_surah: u16,
    },
}

//! Tilawa - Playback Orchestration
//!
//! Platform-agnostic orchestration of recitation playback.
//!
//! This crate provides:
//! - The `Player` state machine (lifecycle, reciter/surah selection,
//!   the physical audio element)
//! - Radio mode (endless curated or reciter-random track selection)
//! - Repeat sessions ("repeat this range N times, each verse M times")
//! - A typed event protocol between the machines and toward the host
//! - Collaborator traits for the audio element, OS media session, and
//!   preference persistence
//!
//! # Architecture
//!
//! `tilawa-playback` is completely platform-agnostic:
//! - No dependency on a concrete audio backend
//! - No dependency on an HTTP client
//! - No dependency on any UI toolkit
//!
//! Platform-specific concerns (audio rendering, metadata fetching,
//! timers) are provided via traits and host callbacks. All machines
//! run single-threaded with run-to-completion semantics: each command
//! is a method call that finishes before the next is processed.
//!
//! Asynchronous work is handed to the host the same way loading is:
//! the player enters a loading state and emits
//! [`PlayerEvent::FetchRequested`]; the host performs the fetch and
//! calls [`Player::fetch_completed`] or [`Player::fetch_failed`].
//! Timed delays emit [`PlayerEvent::DelayStarted`] and are completed
//! by [`Player::delay_elapsed`].
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use tilawa_playback::{NullAudioElement, Player, PlayerConfig, PlayerEvent};
//! use tilawa_core::AudioData;
//!
//! let mut player = Player::new(PlayerConfig::default(), Box::new(NullAudioElement));
//!
//! // Host UI asks for a specific verse
//! player.play_ayah(1, 1);
//!
//! // The player requests metadata; the host fetches and completes
//! let requested = player
//!     .drain_events()
//!     .into_iter()
//!     .any(|e| matches!(e, PlayerEvent::FetchRequested { .. }));
//! assert!(requested);
//!
//! player.fetch_completed(AudioData {
//!     audio_url: "https://audio.example/1.mp3".to_string(),
//!     duration: 60_000,
//!     verse_timings: Vec::new(),
//! });
//! ```

mod actor;
mod element;
mod error;
mod events;
mod platform;
mod player;
mod radio;
mod range_cycle;
mod repeat;
pub mod types;
mod verse_cycle;

// Public exports
pub use actor::Spawned;
pub use element::{AudioElement, NullAudioElement};
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use platform::{
    MediaAction, MediaSession, MediaSessionError, NoopMediaSession, NoopPreferenceStore,
    PreferenceError, PreferenceStore,
};
pub use player::Player;
pub use radio::{Radio, RadioEvent, RadioTrack, Station};
pub use repeat::{Repeat, RepeatEvent};
pub use types::{
    AudioState, LoadKind, PlayerConfig, PlayerPreferences, PlayerState, RepeatSettings,
};

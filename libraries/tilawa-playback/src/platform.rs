//! Host platform capabilities
//!
//! Media-session integration and preference persistence are host/OS
//! global state; the player depends on them only through these traits,
//! with no-op implementations for platforms lacking them. Failures on
//! either are diagnostics, never playback errors.

use crate::types::PlayerPreferences;
use thiserror::Error;

/// Media-session registration failure
#[derive(Debug, Error)]
pub enum MediaSessionError {
    /// Platform does not expose a media session API
    #[error("Media session unsupported: {0}")]
    Unsupported(String),
}

/// Hardware/OS media-key actions the host relays to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    /// Previous-track key
    PreviousTrack,

    /// Next-track key
    NextTrack,

    /// Stop key
    Stop,
}

/// OS media-session integration
///
/// The player registers interest once; the host owns the platform
/// callback and relays key presses via `Player::media_action`.
pub trait MediaSession: Send {
    /// Register media-key handlers with the platform
    ///
    /// Failure (API unsupported) is swallowed by the player and
    /// logged; it never affects playback state.
    fn register(&mut self) -> Result<(), MediaSessionError>;
}

/// No-op media session for platforms without one
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMediaSession;

impl MediaSession for NoopMediaSession {
    fn register(&mut self) -> Result<(), MediaSessionError> {
        Ok(())
    }
}

/// Preference persistence failure
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Underlying store failed
    #[error("Preference store failure: {0}")]
    Store(String),
}

/// Persistence for the externally saved subset of the player context
///
/// Writes are fire-and-forget: the player logs failures and moves on.
pub trait PreferenceStore: Send {
    /// Persist the preferences
    fn save(&mut self, preferences: &PlayerPreferences) -> Result<(), PreferenceError>;

    /// Load previously persisted preferences, if any
    fn load(&self) -> Option<PlayerPreferences>;
}

/// No-op preference store
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPreferenceStore;

impl PreferenceStore for NoopPreferenceStore {
    fn save(&mut self, _preferences: &PlayerPreferences) -> Result<(), PreferenceError> {
        Ok(())
    }

    fn load(&self) -> Option<PlayerPreferences> {
        None
    }
}

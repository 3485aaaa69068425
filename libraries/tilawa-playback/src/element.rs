//! Platform-agnostic audio element trait
//!
//! Abstracts the physical audio resource (an HTML5-audio-equivalent)
//! the player renders through. The player is the sole writer of the
//! element's source, position, rate, and play/pause state; children
//! only ever request changes by messaging the player.

/// Platform-agnostic audio element
///
/// Implementors wrap whatever the host platform renders audio with.
/// The element is treated as an opaque, externally-owned device: it
/// handles buffering, decoding, and format negotiation itself, and
/// reports end-of-file and errors back to the host, which relays them
/// as `Player::playback_ended` / `Player::playback_failed`.
pub trait AudioElement: Send {
    /// Point the element at a new audio file
    fn set_source(&mut self, url: &str);

    /// Start or resume rendering
    fn play(&mut self);

    /// Pause rendering
    fn pause(&mut self);

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Seek to a position in seconds
    fn set_current_time(&mut self, seconds: f64);

    /// Set the playback rate (1.0 = normal speed)
    fn set_playback_rate(&mut self, rate: f32);
}

/// No-op audio element
///
/// For hosts that drive the player without a physical element
/// (tests, dry runs, headless track selection).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioElement;

impl AudioElement for NullAudioElement {
    fn set_source(&mut self, _url: &str) {}

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn current_time(&self) -> f64 {
        0.0
    }

    fn set_current_time(&mut self, _seconds: f64) {}

    fn set_playback_rate(&mut self, _rate: f32) {}
}

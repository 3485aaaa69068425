//! Player - top-level playback orchestration
//!
//! Owns the playback lifecycle, reciter/surah selection, and the
//! physical audio element. Radio mode and repeat sessions are child
//! machines spawned on entry into their mode and stopped on exit;
//! at most one of the two is ever alive.
//!
//! All commands are synchronous and run to completion. Asynchronous
//! work (metadata fetches, the replay-delay timer) is handed to the
//! host through events and completed through callbacks
//! (`fetch_completed`, `fetch_failed`, `delay_elapsed`).

use crate::{
    actor::Spawned,
    element::AudioElement,
    error::{PlayerError, Result},
    events::PlayerEvent,
    platform::{MediaAction, MediaSession, NoopMediaSession, NoopPreferenceStore, PreferenceStore},
    radio::{Radio, RadioEvent, Station},
    repeat::{Repeat, RepeatEvent},
    types::{AudioState, LoadKind, PlayerConfig, PlayerPreferences, PlayerState, RepeatSettings},
};
use rand::{thread_rng, Rng};
use tilawa_core::{active_verse_timing, active_word_position, timing_for_verse, AudioData};
use tracing::{debug, warn};

/// A play request parked behind the surah-mismatch gate
#[derive(Debug, Clone, Copy)]
struct PlayRequest {
    surah: u16,
    ayah: u16,
    reciter_id: Option<u32>,
}

/// Central playback orchestration
///
/// The only interface the host UI drives the core through. The host
/// sends commands (methods), drains [`PlayerEvent`]s, and observes the
/// state/context snapshot through the accessors.
pub struct Player {
    // State
    state: PlayerState,

    // Context
    reciter_id: u32,
    surah: u16,
    ayah_number: u16,
    audio_data: Option<AudioData>,
    surah_verses_count: u16,
    elapsed_ms: u32,
    duration_ms: u32,
    playback_rate: f32,
    verse_delay_ms: u32,
    play_from_random_position: bool,
    active_word: u32,

    // Child machines; at most one alive at a time
    repeat: Option<Spawned<Repeat>>,
    radio: Option<Spawned<Radio>>,

    // Parked work
    pending_repeat: Option<RepeatSettings>,
    pending_request: Option<PlayRequest>,

    // Collaborators
    element: Box<dyn AudioElement>,
    media_session: Box<dyn MediaSession>,
    preferences: Box<dyn PreferenceStore>,

    config: PlayerConfig,

    // Event queue for host synchronization
    pending_events: Vec<PlayerEvent>,
}

impl Player {
    /// Create a new player around the host's audio element
    ///
    /// Starts hidden, with no-op media session and preference store;
    /// attach real ones with [`Player::attach_media_session`] and
    /// [`Player::set_preference_store`].
    pub fn new(config: PlayerConfig, element: Box<dyn AudioElement>) -> Self {
        Self {
            state: PlayerState::Hidden,
            reciter_id: config.default_reciter_id,
            surah: 1,
            ayah_number: 1,
            audio_data: None,
            surah_verses_count: 0,
            elapsed_ms: 0,
            duration_ms: 0,
            playback_rate: 1.0,
            verse_delay_ms: 0,
            play_from_random_position: false,
            active_word: 0,
            repeat: None,
            radio: None,
            pending_repeat: None,
            pending_request: None,
            element,
            media_session: Box::new(NoopMediaSession),
            preferences: Box::new(NoopPreferenceStore),
            config,
            pending_events: Vec::new(),
        }
    }

    // ===== Host wiring =====

    /// Attach the platform media session and register handlers
    ///
    /// Registration failure (API unsupported) is logged and swallowed;
    /// it never affects playback state.
    pub fn attach_media_session(&mut self, mut session: Box<dyn MediaSession>) {
        if let Err(e) = session.register() {
            warn!("media session registration failed: {e}");
        }
        self.media_session = session;
    }

    /// Attach the preference store
    pub fn set_preference_store(&mut self, store: Box<dyn PreferenceStore>) {
        self.preferences = store;
    }

    /// Restore the externally persisted subset of the context
    ///
    /// Called at session start with values from local storage or
    /// remote preference sync.
    pub fn set_initial_context(&mut self, reciter_id: u32, playback_rate: f32) {
        self.reciter_id = reciter_id;
        self.playback_rate = playback_rate;
        self.element.set_playback_rate(playback_rate);
    }

    /// Relay a hardware/OS media-key press
    pub fn media_action(&mut self, action: MediaAction) {
        match action {
            MediaAction::PreviousTrack => self.previous_ayah(),
            MediaAction::NextTrack => self.next_ayah(),
            MediaAction::Stop => self.close(),
        }
    }

    // ===== Playback commands =====

    /// Play a specific verse
    ///
    /// Requesting a different surah while the current one has ended
    /// routes through the surah-mismatch gate; the same surah with a
    /// different ayah jumps straight back into playing.
    pub fn play_ayah(&mut self, surah: u16, ayah: u16) {
        if self.state == PlayerState::Active(AudioState::Ended) && surah != self.surah {
            self.gate_mismatched_request(PlayRequest {
                surah,
                ayah,
                reciter_id: None,
            });
            return;
        }
        self.adopt_request(
            PlayRequest {
                surah,
                ayah,
                reciter_id: None,
            },
            LoadKind::Reciter,
        );
    }

    /// Play a surah from its first verse, optionally with a specific
    /// reciter
    pub fn play_surah(&mut self, surah: u16, reciter_id: Option<u32>) {
        if self.state == PlayerState::Active(AudioState::Ended) && surah != self.surah {
            self.gate_mismatched_request(PlayRequest {
                surah,
                ayah: 1,
                reciter_id,
            });
            return;
        }
        let kind = if reciter_id.is_some() {
            LoadKind::CustomReciter
        } else {
            LoadKind::Reciter
        };
        self.adopt_request(
            PlayRequest {
                surah,
                ayah: 1,
                reciter_id,
            },
            kind,
        );
    }

    /// Tune into a radio station
    ///
    /// Exits any repeat session; radio and repeat are mutually
    /// exclusive.
    pub fn play_radio(&mut self, station: Station) {
        self.stop_repeat_actor();
        self.stop_radio_actor();
        self.pending_request = None;

        let mut radio = Radio::new();
        let event = radio.play_station(station);
        self.radio = Some(Spawned::spawn(radio));

        if let Some(RadioEvent::PlayTrack {
            reciter_id,
            surah,
            from_random_position,
        }) = event
        {
            self.play_radio_track(reciter_id, surah, from_random_position);
        }
    }

    /// Load and play one radio track
    ///
    /// Also issued internally whenever the radio machine selects the
    /// next track.
    pub fn play_radio_track(&mut self, reciter_id: u32, surah: u16, from_random_position: bool) {
        self.stop_repeat_actor();
        self.pending_request = None;

        self.play_from_random_position = from_random_position;
        self.reciter_id = reciter_id;
        self.surah = surah;
        self.ayah_number = 1;
        self.audio_data = None;
        self.set_state(PlayerState::Loading(LoadKind::CustomReciter));
        self.emit_fetch_requested();
    }

    /// Switch reciters, keeping the current verse
    pub fn change_reciter(&mut self, reciter_id: u32) {
        if reciter_id == self.reciter_id {
            return;
        }
        self.reciter_id = reciter_id;
        self.persist_preferences();

        if self.audio_data.is_some() || matches!(self.state, PlayerState::Loading(_)) {
            self.audio_data = None;
            self.set_state(PlayerState::Loading(LoadKind::Reciter));
            self.emit_fetch_requested();
        }
    }

    /// Set the playback rate (clamped to 0.25..=2.0)
    pub fn set_playback_speed(&mut self, rate: f32) {
        let rate = rate.clamp(0.25, 2.0);
        self.playback_rate = rate;
        self.element.set_playback_rate(rate);
        self.persist_preferences();
    }

    /// Configure a repeat session over the current surah
    ///
    /// Exits any radio mode. When audio metadata is not loaded yet,
    /// the settings are parked and the session starts once the fetch
    /// completes.
    pub fn set_repeat_settings(&mut self, settings: RepeatSettings) -> Result<()> {
        settings.validate()?;

        self.stop_radio_actor();
        self.play_from_random_position = false;
        self.pending_request = None;

        if let Some(data) = &self.audio_data {
            if settings.to_verse > data.verses_count() {
                return Err(PlayerError::VerseOutOfRange(settings.to_verse));
            }
            self.start_repeat_session(&settings);
        } else {
            self.pending_repeat = Some(settings);
            self.set_state(PlayerState::Loading(LoadKind::Repeat));
            self.emit_fetch_requested();
        }
        Ok(())
    }

    /// Toggle play/pause
    ///
    /// Also short-circuits a pending replay delay and restarts an
    /// ended file at the current verse.
    pub fn toggle(&mut self) {
        match self.state {
            PlayerState::Active(AudioState::Playing) => {
                self.element.pause();
                self.set_state(PlayerState::Active(AudioState::Paused));
            }
            PlayerState::Active(AudioState::Paused) => {
                self.element.play();
                self.set_state(PlayerState::Active(AudioState::Playing));
            }
            PlayerState::Active(AudioState::Delaying) | PlayerState::Active(AudioState::Ended) => {
                self.resume_at_current_ayah();
            }
            _ => {}
        }
    }

    /// Advance to the next verse
    ///
    /// While a repeat session is active it owns verse navigation and
    /// the command is forwarded to it. Otherwise the command is a
    /// no-op at the surah's last verse.
    pub fn next_ayah(&mut self) {
        if self.is_repeat_active() {
            let events = match self.repeat.as_mut() {
                Some(repeat) => repeat.with(Repeat::next_verse).unwrap_or_default(),
                None => Vec::new(),
            };
            self.apply_repeat_events(&events, true);
            return;
        }

        if self.ayah_number >= self.surah_verses_count {
            return;
        }
        self.ayah_number += 1;
        self.emit_ayah_changed();
        self.step_to_current_ayah();
    }

    /// Go back to the previous verse
    pub fn previous_ayah(&mut self) {
        if self.is_repeat_active() {
            let events = match self.repeat.as_mut() {
                Some(repeat) => repeat.with(Repeat::previous_verse).unwrap_or_default(),
                None => Vec::new(),
            };
            self.apply_repeat_events(&events, true);
            return;
        }

        if self.ayah_number <= 1 {
            return;
        }
        self.ayah_number -= 1;
        self.emit_ayah_changed();
        self.step_to_current_ayah();
    }

    /// Jump to a verse during an active repeat session
    ///
    /// A verse outside the configured range ends the session (normal
    /// termination, not an error).
    pub fn repeat_select_ayah(&mut self, ayah: u16) {
        let events = match self.repeat.as_mut() {
            Some(repeat) => repeat.with(|r| r.select_verse(ayah)).unwrap_or_default(),
            None => Vec::new(),
        };
        self.apply_repeat_events(&events, true);
    }

    /// Seek to an absolute position in the audio file
    pub fn seek_to(&mut self, position_ms: u32) -> Result<()> {
        if self.audio_data.is_none() {
            return Err(PlayerError::NoAudioLoaded);
        }
        if position_ms > self.duration_ms {
            return Err(PlayerError::InvalidSeekPosition(position_ms));
        }
        self.element.set_current_time(f64::from(position_ms) / 1000.0);
        self.update_position(position_ms);
        Ok(())
    }

    /// Close the player
    pub fn close(&mut self) {
        self.element.pause();
        self.stop_repeat_actor();
        self.stop_radio_actor();
        self.pending_repeat = None;
        self.pending_request = None;
        self.set_state(PlayerState::Hidden);
    }

    // ===== Surah-mismatch gate =====

    /// Confirm the parked surah change and start loading it
    pub fn confirm_surah_change(&mut self) {
        if self.state != PlayerState::SurahMismatch {
            return;
        }
        let Some(request) = self.pending_request.take() else {
            self.set_state(PlayerState::Active(AudioState::Ended));
            return;
        };
        let kind = if request.reciter_id.is_some() {
            LoadKind::CustomReciter
        } else {
            LoadKind::Reciter
        };
        self.adopt_request(request, kind);
    }

    /// Cancel the parked surah change, keeping the ended file
    pub fn cancel_surah_change(&mut self) {
        if self.state != PlayerState::SurahMismatch {
            return;
        }
        self.pending_request = None;
        self.set_state(PlayerState::Active(AudioState::Ended));
    }

    // ===== Host callbacks =====

    /// The metadata fetch finished successfully
    pub fn fetch_completed(&mut self, data: AudioData) {
        let PlayerState::Loading(kind) = self.state else {
            // Stale response from a superseded fetch
            debug!("dropping fetch response outside a loading state");
            return;
        };

        self.duration_ms = data.duration;
        self.surah_verses_count = data.verses_count();
        self.element.set_source(&data.audio_url);
        self.element.set_playback_rate(self.playback_rate);
        self.audio_data = Some(data);

        if self.ayah_number > self.surah_verses_count {
            self.ayah_number = 1;
        }

        // A live repeat session (reciter change mid-practice) gets the
        // fresh windows without losing its progress
        if self.is_repeat_active() {
            let timings = self
                .audio_data
                .as_ref()
                .map(|d| d.verse_timings.clone())
                .unwrap_or_default();
            if let Some(repeat) = self.repeat.as_mut() {
                repeat.with(|r| r.update_verse_timings(timings));
            }
        }

        if kind == LoadKind::Repeat {
            if let Some(settings) = self.pending_repeat.take() {
                if settings.to_verse <= self.surah_verses_count {
                    self.start_repeat_session(&settings);
                    return;
                }
                debug!(
                    "parked repeat range ends at {} but surah has {} verses; dropping session",
                    settings.to_verse, self.surah_verses_count
                );
            }
        }

        self.seek_to_current_ayah();
        self.element.play();
        self.set_state(PlayerState::Active(AudioState::Playing));
    }

    /// The metadata fetch failed
    ///
    /// Terminal: the host must issue a fresh play command to recover.
    pub fn fetch_failed(&mut self) {
        self.fail();
    }

    /// The audio element reported a playback error
    pub fn playback_failed(&mut self) {
        self.fail();
    }

    /// The audio element reached the end of the file
    ///
    /// In radio mode the radio machine immediately selects the next
    /// track, which is what makes radio endless.
    pub fn playback_ended(&mut self) {
        if !matches!(self.state, PlayerState::Active(_)) {
            return;
        }
        self.set_state(PlayerState::Active(AudioState::Ended));

        let event = match self.radio.as_mut() {
            Some(radio) => radio.with(Radio::track_ended).flatten(),
            None => None,
        };
        if let Some(RadioEvent::PlayTrack {
            reciter_id,
            surah,
            from_random_position,
        }) = event
        {
            self.play_radio_track(reciter_id, surah, from_random_position);
        }
    }

    /// Periodic position report from the audio element (ms)
    ///
    /// Resolves the active verse and word, and feeds any repeat
    /// session its ticks.
    pub fn update_elapsed(&mut self, position_ms: u32) {
        if self.state != PlayerState::Active(AudioState::Playing) {
            return;
        }
        self.update_position(position_ms);

        let events = match self.repeat.as_mut() {
            Some(repeat) => repeat
                .with(|r| r.on_timestamp(position_ms))
                .unwrap_or_default(),
            None => Vec::new(),
        };
        self.apply_repeat_events(&events, false);
    }

    /// The host timer for a replay delay fired
    pub fn delay_elapsed(&mut self) {
        if self.state == PlayerState::Active(AudioState::Delaying) {
            self.resume_at_current_ayah();
        }
    }

    // ===== State queries =====

    /// Current player state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Whether the player is visible to the host UI
    pub fn is_visible(&self) -> bool {
        self.state != PlayerState::Hidden
    }

    /// Selected reciter
    pub fn reciter_id(&self) -> u32 {
        self.reciter_id
    }

    /// Current surah
    pub fn surah(&self) -> u16 {
        self.surah
    }

    /// Current verse, 1-based
    pub fn ayah_number(&self) -> u16 {
        self.ayah_number
    }

    /// Verses in the loaded surah (0 before any fetch)
    pub fn surah_verses_count(&self) -> u16 {
        self.surah_verses_count
    }

    /// Playback position (ms)
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Loaded file duration (ms)
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Playback rate
    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    /// Pause currently configured before repeat replays (ms)
    pub fn verse_delay_ms(&self) -> u32 {
        self.verse_delay_ms
    }

    /// Word being recited within the current verse (0 = none)
    pub fn active_word(&self) -> u32 {
        self.active_word
    }

    /// Whether a repeat session is active
    pub fn is_repeat_active(&self) -> bool {
        self.repeat.as_ref().is_some_and(Spawned::is_alive)
    }

    /// Whether radio mode is active
    pub fn is_radio_active(&self) -> bool {
        self.radio.as_ref().is_some_and(Spawned::is_alive)
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns everything emitted since the last drain; the host calls
    /// this after each command to synchronize.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal: request adoption =====

    fn gate_mismatched_request(&mut self, request: PlayRequest) {
        self.pending_events.push(PlayerEvent::SurahMismatchDetected {
            current_surah: self.surah,
            requested_surah: request.surah,
        });
        self.pending_request = Some(request);
        self.set_state(PlayerState::SurahMismatch);
    }

    /// Adopt a play request: tear down children, then either reuse the
    /// loaded audio or start a fetch
    fn adopt_request(&mut self, request: PlayRequest, kind: LoadKind) {
        self.stop_repeat_actor();
        self.stop_radio_actor();
        self.pending_request = None;
        self.play_from_random_position = false;

        let reciter_changed = request
            .reciter_id
            .is_some_and(|id| id != self.reciter_id);
        if let Some(id) = request.reciter_id {
            self.reciter_id = id;
        }

        let needs_fetch =
            self.audio_data.is_none() || self.surah != request.surah || reciter_changed;

        self.surah = request.surah;
        self.ayah_number = request.ayah;
        self.emit_ayah_changed();

        if needs_fetch {
            self.audio_data = None;
            self.set_state(PlayerState::Loading(kind));
            self.emit_fetch_requested();
        } else {
            self.resume_at_current_ayah();
        }
    }

    // ===== Internal: repeat session plumbing =====

    fn start_repeat_session(&mut self, settings: &RepeatSettings) {
        let Some(data) = &self.audio_data else {
            return;
        };
        let timings = data.verse_timings.clone();

        self.stop_repeat_actor();
        let (repeat, first) =
            Repeat::start(settings, timings, self.config.verse_end_tolerance_ms);
        self.repeat = Some(Spawned::spawn(repeat));

        if let RepeatEvent::Ayah { verse, .. } = first {
            self.ayah_number = verse;
            self.emit_ayah_changed();
        }
        self.resume_at_current_ayah();
    }

    /// Fold repeat-session events into the player
    ///
    /// `immediate` distinguishes user-driven skips (jump right away)
    /// from tick-driven replays (pause for the configured delay
    /// first).
    fn apply_repeat_events(&mut self, events: &[RepeatEvent], immediate: bool) {
        for event in events {
            match *event {
                RepeatEvent::Ayah { verse, delay_ms } => {
                    self.ayah_number = verse;
                    self.emit_ayah_changed();
                    if immediate {
                        self.resume_at_current_ayah();
                    } else {
                        self.begin_delay(delay_ms);
                    }
                }
                RepeatEvent::SameAyah { delay_ms, .. } => {
                    if immediate {
                        self.resume_at_current_ayah();
                    } else {
                        self.begin_delay(delay_ms);
                    }
                }
                RepeatEvent::Finished => {
                    self.stop_repeat_actor();
                    self.pending_events.push(PlayerEvent::RepeatFinished);
                    // Playback continues normally from the current verse
                    if self.state == PlayerState::Active(AudioState::Delaying) {
                        self.resume_at_current_ayah();
                    }
                }
            }
        }
    }

    fn begin_delay(&mut self, delay_ms: u32) {
        self.verse_delay_ms = delay_ms;
        self.element.pause();
        self.set_state(PlayerState::Active(AudioState::Delaying));
        self.pending_events
            .push(PlayerEvent::DelayStarted { delay_ms });
    }

    // ===== Internal: seeks and position =====

    /// Seek the element to the current verse and play
    fn resume_at_current_ayah(&mut self) {
        self.seek_to_current_ayah();
        self.element.play();
        self.set_state(PlayerState::Active(AudioState::Playing));
    }

    /// Seek to the current verse but keep the play/pause state
    fn step_to_current_ayah(&mut self) {
        match self.state {
            PlayerState::Active(AudioState::Paused) => self.seek_to_current_ayah(),
            PlayerState::Active(_) => self.resume_at_current_ayah(),
            _ => {}
        }
    }

    /// Compute and apply the seek target for the current verse
    ///
    /// A uniformly random offset when entering a radio station,
    /// otherwise the verse's window start.
    fn seek_to_current_ayah(&mut self) {
        let Some(data) = self.audio_data.as_ref() else {
            return;
        };

        let target_ms;
        let landed_ayah;
        if self.play_from_random_position {
            target_ms = thread_rng().gen_range(0..data.duration.max(1));
            landed_ayah =
                active_verse_timing(&data.verse_timings, target_ms).map(|t| t.verse_key.ayah);
        } else {
            target_ms = timing_for_verse(&data.verse_timings, self.ayah_number)
                .map_or(0, |t| t.timestamp_from);
            landed_ayah = None;
        }

        self.element.set_current_time(f64::from(target_ms) / 1000.0);
        self.elapsed_ms = target_ms;

        if let Some(ayah) = landed_ayah {
            if ayah != self.ayah_number {
                self.ayah_number = ayah;
                self.emit_ayah_changed();
            }
        }
    }

    /// Resolve the active verse and word for a position
    ///
    /// Positions past the last verse keep the last known ayah (the
    /// element can report drift at end-of-file).
    fn update_position(&mut self, position_ms: u32) {
        self.elapsed_ms = position_ms;

        let Some(data) = self.audio_data.as_ref() else {
            return;
        };

        let mut new_ayah = None;
        let mut new_word = None;
        if let Some(timing) = active_verse_timing(&data.verse_timings, position_ms) {
            if timing.verse_key.ayah != self.ayah_number {
                new_ayah = Some(timing.verse_key.ayah);
            }
            let word = active_word_position(timing, position_ms);
            if word != self.active_word {
                new_word = Some(word);
            }
        }

        if let Some(ayah) = new_ayah {
            self.ayah_number = ayah;
            self.emit_ayah_changed();
        }
        if let Some(word) = new_word {
            self.active_word = word;
            self.pending_events.push(PlayerEvent::WordChanged {
                word_position: word,
            });
        }
    }

    // ===== Internal: lifecycle =====

    fn fail(&mut self) {
        self.element.pause();
        self.stop_repeat_actor();
        self.stop_radio_actor();
        self.pending_repeat = None;
        self.set_state(PlayerState::Failed);
    }

    fn stop_repeat_actor(&mut self) {
        if let Some(mut repeat) = self.repeat.take() {
            repeat.stop();
        }
    }

    fn stop_radio_actor(&mut self) {
        if let Some(mut radio) = self.radio.take() {
            radio.stop();
        }
    }

    fn persist_preferences(&mut self) {
        let preferences = PlayerPreferences {
            reciter_id: self.reciter_id,
            playback_rate: self.playback_rate,
        };
        if let Err(e) = self.preferences.save(&preferences) {
            // Fire-and-forget: diagnostics only
            warn!("preference persistence failed: {e}");
        }
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn emit_fetch_requested(&mut self) {
        self.pending_events.push(PlayerEvent::FetchRequested {
            reciter_id: self.reciter_id,
            surah: self.surah,
        });
    }

    fn emit_ayah_changed(&mut self) {
        self.pending_events.push(PlayerEvent::AyahChanged {
            surah: self.surah,
            ayah: self.ayah_number,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::NullAudioElement;
    use crate::platform::{MediaSessionError, PreferenceError};
    use std::sync::{Arc, Mutex};

    fn player() -> Player {
        Player::new(PlayerConfig::default(), Box::new(NullAudioElement))
    }

    struct UnsupportedMediaSession;

    impl MediaSession for UnsupportedMediaSession {
        fn register(&mut self) -> std::result::Result<(), MediaSessionError> {
            Err(MediaSessionError::Unsupported("no platform API".into()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStore {
        saved: Arc<Mutex<Vec<PlayerPreferences>>>,
    }

    impl PreferenceStore for RecordingStore {
        fn save(&mut self, preferences: &PlayerPreferences) -> std::result::Result<(), PreferenceError> {
            self.saved.lock().unwrap().push(*preferences);
            Ok(())
        }

        fn load(&self) -> Option<PlayerPreferences> {
            self.saved.lock().unwrap().last().copied()
        }
    }

    #[test]
    fn starts_hidden() {
        let player = player();
        assert_eq!(player.state(), PlayerState::Hidden);
        assert!(!player.is_visible());
        assert!(!player.is_repeat_active());
        assert!(!player.is_radio_active());
    }

    #[test]
    fn play_command_requests_fetch() {
        let mut player = player();
        player.play_ayah(2, 255);

        assert_eq!(player.state(), PlayerState::Loading(LoadKind::Reciter));
        let events = player.drain_events();
        assert!(events.contains(&PlayerEvent::FetchRequested {
            reciter_id: 7,
            surah: 2
        }));
    }

    #[test]
    fn media_session_failure_is_swallowed() {
        let mut player = player();
        player.attach_media_session(Box::new(UnsupportedMediaSession));

        // Player remains fully usable
        player.play_ayah(1, 1);
        assert_eq!(player.state(), PlayerState::Loading(LoadKind::Reciter));
    }

    #[test]
    fn speed_and_reciter_changes_are_persisted() {
        let store = RecordingStore::default();
        let saved = store.saved.clone();

        let mut player = player();
        player.set_preference_store(Box::new(store));
        player.set_playback_speed(1.5);
        player.change_reciter(12);

        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].playback_rate, 1.5);
        assert_eq!(saved[1].reciter_id, 12);
    }

    #[test]
    fn playback_speed_is_clamped() {
        let mut player = player();
        player.set_playback_speed(9.0);
        assert_eq!(player.playback_rate(), 2.0);
        player.set_playback_speed(0.0);
        assert_eq!(player.playback_rate(), 0.25);
    }

    #[test]
    fn invalid_repeat_settings_are_rejected() {
        let mut player = player();
        let result = player.set_repeat_settings(RepeatSettings {
            from_verse: 5,
            to_verse: 2,
            total_range_cycles: 1,
            total_verse_cycles: 1,
            delay_multiplier: 1.0,
        });
        assert!(result.is_err());
        assert!(!player.is_repeat_active());
    }

    #[test]
    fn stale_fetch_response_is_dropped() {
        let mut player = player();
        // No fetch in flight
        player.fetch_completed(AudioData {
            audio_url: "https://audio.example/1.mp3".to_string(),
            duration: 1_000,
            verse_timings: Vec::new(),
        });
        assert_eq!(player.state(), PlayerState::Hidden);
    }
}

//! Repeat session - orchestrates "repeat this range N times, each
//! verse M times"
//!
//! Top machine of a repeat session. Owns the range walk, turns verse
//! durations into replay delays, and rejects verse selections outside
//! the configured range by ending the session.

use crate::range_cycle::{RangeCycle, RangeCycleSignal};
use crate::types::RepeatSettings;
use tilawa_core::VerseTiming;

/// Event a repeat session sends the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatEvent {
    /// A (different) verse starts repeating
    Ayah {
        /// The verse, 1-based
        verse: u16,
        /// Pause before its replay begins
        delay_ms: u32,
    },

    /// The current verse replays in place
    SameAyah {
        /// The verse being replayed
        verse: u16,
        /// Pause before the replay begins
        delay_ms: u32,
    },

    /// The session ran to completion (or was ended by an out-of-range
    /// selection)
    Finished,
}

/// A configured repeat session
#[derive(Debug, Clone)]
pub struct Repeat {
    delay_multiplier: f32,
    range: RangeCycle,
    finished: bool,
}

impl Repeat {
    /// Start a session; returns the machine and its initial
    /// verse-start event
    pub fn start(
        settings: &RepeatSettings,
        verse_timings: Vec<VerseTiming>,
        tolerance_ms: u32,
    ) -> (Self, RepeatEvent) {
        let (range, first) = RangeCycle::start(settings, verse_timings, tolerance_ms);
        let mut repeat = Self {
            delay_multiplier: settings.delay_multiplier,
            range,
            finished: false,
        };
        let first = repeat.lift(vec![first]).remove(0);
        (repeat, first)
    }

    /// Forward a playback tick to the range walk
    pub fn on_timestamp(&mut self, position_ms: u32) -> Vec<RepeatEvent> {
        if self.finished {
            return Vec::new();
        }
        let signals = self.range.on_timestamp(position_ms);
        self.lift(signals)
    }

    /// Manual skip forward
    pub fn next_verse(&mut self) -> Vec<RepeatEvent> {
        if self.finished {
            return Vec::new();
        }
        let signals = self.range.next_verse();
        self.lift(signals)
    }

    /// Manual skip backward
    pub fn previous_verse(&mut self) -> Vec<RepeatEvent> {
        if self.finished {
            return Vec::new();
        }
        let signals = self.range.previous_verse();
        self.lift(signals)
    }

    /// Jump to a selected verse
    ///
    /// Selecting a verse outside the configured range ends the session
    /// rather than silently clamping it.
    pub fn select_verse(&mut self, verse: u16) -> Vec<RepeatEvent> {
        if self.finished {
            return Vec::new();
        }

        if verse < self.range.from_verse() || verse > self.range.to_verse() {
            self.finished = true;
            return vec![RepeatEvent::Finished];
        }

        let signals = self.range.select_verse(verse);
        self.lift(signals)
    }

    /// Rebind verse windows after a timing refresh
    pub fn update_verse_timings(&mut self, verse_timings: Vec<VerseTiming>) {
        self.range.update_verse_timings(verse_timings);
    }

    /// Translate range signals into player-facing events, applying the
    /// delay multiplier to verse durations
    fn lift(&mut self, signals: Vec<RangeCycleSignal>) -> Vec<RepeatEvent> {
        signals
            .into_iter()
            .map(|signal| match signal {
                RangeCycleSignal::VerseStarted {
                    verse,
                    verse_duration_ms,
                } => RepeatEvent::Ayah {
                    verse,
                    delay_ms: self.delay(verse_duration_ms),
                },
                RangeCycleSignal::SameVerse {
                    verse,
                    verse_duration_ms,
                } => RepeatEvent::SameAyah {
                    verse,
                    delay_ms: self.delay(verse_duration_ms),
                },
                RangeCycleSignal::RangeRepeatFinished => {
                    self.finished = true;
                    RepeatEvent::Finished
                }
            })
            .collect()
    }

    fn delay(&self, verse_duration_ms: u32) -> u32 {
        (verse_duration_ms as f32 * self.delay_multiplier) as u32
    }

    /// Verse currently being repeated
    pub fn current_verse(&self) -> u16 {
        self.range.current_verse()
    }

    /// Whether the session is over
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

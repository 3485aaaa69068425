//! Range cycle - walks a verse range, one verse at a time, across cycles
//!
//! Middle machine of a repeat session. Owns one verse cycle at a time
//! (spawned per verse) and decides, whenever a verse finishes its
//! repetitions, whether to advance within the range, start the next
//! range cycle, or finish the session.

use crate::actor::Spawned;
use crate::types::RepeatSettings;
use crate::verse_cycle::{VerseCycle, VerseCycleSignal};
use tilawa_core::{timing_for_verse, VerseTiming};

/// Signal a range cycle sends its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCycleSignal {
    /// A verse (re)started; a fresh verse cycle is ticking for it
    ///
    /// Emitted before the new child processes any tick, so the parent
    /// can animate to the verse first.
    VerseStarted {
        /// The verse now being repeated, 1-based
        verse: u16,
        /// That verse's window length (ms), for delay computation
        verse_duration_ms: u32,
    },

    /// The current verse replays in place
    SameVerse {
        /// The verse being replayed
        verse: u16,
        /// Its window length (ms)
        verse_duration_ms: u32,
    },

    /// All range cycles are done
    RangeRepeatFinished,
}

/// Walks `[from_verse, to_verse]` for a configured number of cycles
#[derive(Debug, Clone)]
pub struct RangeCycle {
    from_verse: u16,
    to_verse: u16,
    current_verse: u16,
    current_range_cycle: u32,
    total_range_cycles: u32,
    total_verse_cycles: u32,
    tolerance_ms: u32,
    verse_timings: Vec<VerseTiming>,
    verse_cycle: Spawned<VerseCycle>,
    finished: bool,
}

impl RangeCycle {
    /// Start a range walk; returns the machine and its initial
    /// verse-start notification
    pub fn start(
        settings: &RepeatSettings,
        verse_timings: Vec<VerseTiming>,
        tolerance_ms: u32,
    ) -> (Self, RangeCycleSignal) {
        let mut range = Self {
            from_verse: settings.from_verse,
            to_verse: settings.to_verse,
            current_verse: settings.from_verse,
            current_range_cycle: 1,
            total_range_cycles: settings.total_range_cycles,
            total_verse_cycles: settings.total_verse_cycles,
            tolerance_ms,
            verse_timings,
            // Placeholder; replaced by the respawn below
            verse_cycle: Spawned::spawn(VerseCycle::new(0, 0, 1, 0)),
            finished: false,
        };
        let first = range.respawn_verse_cycle(settings.from_verse);
        (range, first)
    }

    /// Process a playback tick
    pub fn on_timestamp(&mut self, position_ms: u32) -> Vec<RangeCycleSignal> {
        if self.finished {
            return Vec::new();
        }

        let signal = self
            .verse_cycle
            .with(|cycle| cycle.on_timestamp(position_ms))
            .flatten();

        match signal {
            Some(VerseCycleSignal::RepeatSameVerse) => vec![RangeCycleSignal::SameVerse {
                verse: self.current_verse,
                verse_duration_ms: self.verse_duration(self.current_verse),
            }],
            Some(VerseCycleSignal::VerseRepeatFinished) => self.advance(),
            None => Vec::new(),
        }
    }

    /// Manual skip forward during practice
    ///
    /// Cycle counters are untouched; skipping past the range end
    /// finishes the session immediately rather than wrapping.
    pub fn next_verse(&mut self) -> Vec<RangeCycleSignal> {
        if self.finished {
            return Vec::new();
        }

        let target = self.current_verse + 1;
        if target > self.to_verse {
            self.finish()
        } else {
            self.current_verse = target;
            vec![self.respawn_verse_cycle(target)]
        }
    }

    /// Manual skip backward during practice
    ///
    /// Guarded at the range start; no wrapping.
    pub fn previous_verse(&mut self) -> Vec<RangeCycleSignal> {
        if self.finished || self.current_verse <= self.from_verse {
            return Vec::new();
        }

        self.current_verse -= 1;
        vec![self.respawn_verse_cycle(self.current_verse)]
    }

    /// Jump directly to a verse inside the range
    ///
    /// Callers validate containment; the cycle counter is untouched.
    pub fn select_verse(&mut self, verse: u16) -> Vec<RangeCycleSignal> {
        if self.finished {
            return Vec::new();
        }

        debug_assert!(verse >= self.from_verse && verse <= self.to_verse);
        self.current_verse = verse;
        vec![self.respawn_verse_cycle(verse)]
    }

    /// Rebind all verse windows after a timing refresh
    ///
    /// The active verse cycle keeps its repetition progress.
    pub fn update_verse_timings(&mut self, verse_timings: Vec<VerseTiming>) {
        self.verse_timings = verse_timings;
        if let Some(timing) = timing_for_verse(&self.verse_timings, self.current_verse) {
            let (from, to) = (timing.timestamp_from, timing.timestamp_to);
            self.verse_cycle.with(|cycle| cycle.rebind_window(from, to));
        }
    }

    /// Decision point after a verse exhausted its repetitions
    fn advance(&mut self) -> Vec<RangeCycleSignal> {
        if self.current_verse == self.to_verse {
            // Range ended: next cycle or done
            if self.current_range_cycle < self.total_range_cycles {
                self.current_range_cycle += 1;
                self.current_verse = self.from_verse;
                vec![self.respawn_verse_cycle(self.from_verse)]
            } else {
                self.finish()
            }
        } else {
            self.current_verse += 1;
            vec![self.respawn_verse_cycle(self.current_verse)]
        }
    }

    /// Stop the current verse cycle and spawn one for `verse`
    fn respawn_verse_cycle(&mut self, verse: u16) -> RangeCycleSignal {
        self.verse_cycle.stop();

        let (from, to) = timing_for_verse(&self.verse_timings, verse)
            .map_or((0, 0), |t| (t.timestamp_from, t.timestamp_to));
        self.verse_cycle = Spawned::spawn(VerseCycle::new(
            from,
            to,
            self.total_verse_cycles,
            self.tolerance_ms,
        ));

        RangeCycleSignal::VerseStarted {
            verse,
            verse_duration_ms: self.verse_duration(verse),
        }
    }

    fn finish(&mut self) -> Vec<RangeCycleSignal> {
        self.finished = true;
        self.verse_cycle.stop();
        vec![RangeCycleSignal::RangeRepeatFinished]
    }

    fn verse_duration(&self, verse: u16) -> u32 {
        timing_for_verse(&self.verse_timings, verse).map_or(0, |t| t.duration)
    }

    /// First verse of the range
    pub fn from_verse(&self) -> u16 {
        self.from_verse
    }

    /// Last verse of the range, inclusive
    pub fn to_verse(&self) -> u16 {
        self.to_verse
    }

    /// Verse currently being repeated
    pub fn current_verse(&self) -> u16 {
        self.current_verse
    }

    /// Range cycle currently running, 1-based
    pub fn current_range_cycle(&self) -> u32 {
        self.current_range_cycle
    }

    /// Whether the walk is done
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

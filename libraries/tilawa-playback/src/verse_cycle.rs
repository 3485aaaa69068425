//! Verse cycle - repeats a single verse's timestamp window
//!
//! Leaf machine of a repeat session. Watches playback ticks and fires
//! when the window end is reached, replaying the verse until its cycle
//! count is exhausted.

/// Signal a verse cycle sends its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerseCycleSignal {
    /// The verse replays in place, same timestamps
    RepeatSameVerse,

    /// All cycles for this verse are done
    VerseRepeatFinished,
}

/// Repeats one verse's timestamp window a fixed number of times
#[derive(Debug, Clone)]
pub struct VerseCycle {
    timestamp_from: u32,
    timestamp_to: u32,
    total_cycles: u32,
    current_cycle: u32,
    tolerance_ms: u32,
    finished: bool,
}

impl VerseCycle {
    /// Create a cycle over `[timestamp_from, timestamp_to)`
    ///
    /// `tolerance_ms` is the early-trigger margin compensating for
    /// playback-tick granularity: the end fires once a tick lands
    /// within that many milliseconds of the window end.
    pub fn new(timestamp_from: u32, timestamp_to: u32, total_cycles: u32, tolerance_ms: u32) -> Self {
        Self {
            timestamp_from,
            timestamp_to,
            total_cycles: total_cycles.max(1),
            current_cycle: 1,
            tolerance_ms,
            finished: false,
        }
    }

    /// Process a playback tick
    pub fn on_timestamp(&mut self, position_ms: u32) -> Option<VerseCycleSignal> {
        if self.finished {
            return None;
        }

        let end_threshold = self.timestamp_to.saturating_sub(self.tolerance_ms);
        if position_ms < end_threshold {
            return None;
        }

        if self.current_cycle < self.total_cycles {
            self.current_cycle += 1;
            Some(VerseCycleSignal::RepeatSameVerse)
        } else {
            self.finished = true;
            Some(VerseCycleSignal::VerseRepeatFinished)
        }
    }

    /// Rebind the timestamp window in place
    ///
    /// Used when verse-timing data is refreshed without resetting
    /// cycle progress.
    pub fn rebind_window(&mut self, timestamp_from: u32, timestamp_to: u32) {
        self.timestamp_from = timestamp_from;
        self.timestamp_to = timestamp_to;
    }

    /// Window start (ms)
    pub fn timestamp_from(&self) -> u32 {
        self.timestamp_from
    }

    /// Current cycle, 1-based
    pub fn current_cycle(&self) -> u32 {
        self.current_cycle
    }

    /// Whether all cycles are done
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_before_window_end_are_ignored() {
        let mut cycle = VerseCycle::new(1_000, 5_000, 2, 200);

        assert_eq!(cycle.on_timestamp(1_000), None);
        assert_eq!(cycle.on_timestamp(4_700), None);
        assert_eq!(cycle.current_cycle(), 1);
    }

    #[test]
    fn end_fires_within_tolerance() {
        let mut cycle = VerseCycle::new(1_000, 5_000, 2, 200);

        // 4800 = 5000 - 200, inside the early-trigger margin
        assert_eq!(
            cycle.on_timestamp(4_800),
            Some(VerseCycleSignal::RepeatSameVerse)
        );
        assert_eq!(cycle.current_cycle(), 2);
    }

    #[test]
    fn last_cycle_finishes() {
        let mut cycle = VerseCycle::new(1_000, 5_000, 2, 200);

        assert_eq!(
            cycle.on_timestamp(4_900),
            Some(VerseCycleSignal::RepeatSameVerse)
        );
        assert_eq!(
            cycle.on_timestamp(4_900),
            Some(VerseCycleSignal::VerseRepeatFinished)
        );
        assert!(cycle.is_finished());

        // Finished cycles stay silent
        assert_eq!(cycle.on_timestamp(5_000), None);
    }

    #[test]
    fn single_cycle_finishes_immediately() {
        let mut cycle = VerseCycle::new(0, 3_000, 1, 200);

        assert_eq!(
            cycle.on_timestamp(2_850),
            Some(VerseCycleSignal::VerseRepeatFinished)
        );
    }

    #[test]
    fn rebind_keeps_cycle_progress() {
        let mut cycle = VerseCycle::new(1_000, 5_000, 3, 200);
        cycle.on_timestamp(4_900);
        assert_eq!(cycle.current_cycle(), 2);

        cycle.rebind_window(1_100, 5_200);
        assert_eq!(cycle.timestamp_from(), 1_100);
        assert_eq!(cycle.current_cycle(), 2);
        assert_eq!(cycle.on_timestamp(4_900), None);
        assert_eq!(
            cycle.on_timestamp(5_050),
            Some(VerseCycleSignal::RepeatSameVerse)
        );
    }

    #[test]
    fn tolerance_saturates_on_tiny_windows() {
        // Window shorter than the tolerance must not underflow
        let mut cycle = VerseCycle::new(0, 100, 1, 200);
        assert_eq!(
            cycle.on_timestamp(0),
            Some(VerseCycleSignal::VerseRepeatFinished)
        );
    }
}

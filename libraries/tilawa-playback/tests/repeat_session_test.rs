//! Repeat session behavior tests
//!
//! Drives the repeat machine directly with simulated playback ticks
//! and verifies the exact verse-start sequences and termination.

use tilawa_core::{VerseKey, VerseTiming};
use tilawa_playback::{Repeat, RepeatEvent, RepeatSettings};

const VERSE_MS: u32 = 10_000;
const TOLERANCE_MS: u32 = 200;

// ===== Test Helpers =====

/// Contiguous timings, one verse every 10 seconds
fn fixture_timings(surah: u16, verses: u16) -> Vec<VerseTiming> {
    (1..=verses)
        .map(|ayah| {
            let from = u32::from(ayah - 1) * VERSE_MS;
            VerseTiming {
                verse_key: VerseKey { surah, ayah },
                timestamp_from: from,
                timestamp_to: from + VERSE_MS,
                duration: VERSE_MS,
                segments: Vec::new(),
            }
        })
        .collect()
}

fn settings(from: u16, to: u16, range_cycles: u32, verse_cycles: u32) -> RepeatSettings {
    RepeatSettings {
        from_verse: from,
        to_verse: to,
        total_range_cycles: range_cycles,
        total_verse_cycles: verse_cycles,
        delay_multiplier: 0.0,
    }
}

/// Tick at the end of the current verse's window until the session
/// finishes, returning all events in emission order (the initial
/// verse-start included)
fn drive_to_completion(settings: &RepeatSettings, verses: u16) -> Vec<RepeatEvent> {
    let (mut repeat, first) = Repeat::start(settings, fixture_timings(2, verses), TOLERANCE_MS);
    let mut events = vec![first];

    for _ in 0..1_000 {
        if repeat.is_finished() {
            break;
        }
        let end_of_verse = u32::from(repeat.current_verse()) * VERSE_MS;
        events.extend(repeat.on_timestamp(end_of_verse - 50));
    }
    assert!(repeat.is_finished(), "session did not terminate");
    events
}

fn verse_starts(events: &[RepeatEvent]) -> Vec<u16> {
    events
        .iter()
        .filter_map(|e| match e {
            RepeatEvent::Ayah { verse, .. } | RepeatEvent::SameAyah { verse, .. } => Some(*verse),
            RepeatEvent::Finished => None,
        })
        .collect()
}

// ===== Scenario Tests =====

#[test]
fn single_verse_single_cycle_emits_once_then_finishes() {
    let events = drive_to_completion(&settings(2, 2, 1, 1), 5);

    assert_eq!(verse_starts(&events), vec![2]);
    assert_eq!(events.last(), Some(&RepeatEvent::Finished));
}

#[test]
fn two_range_cycles_walk_the_range_twice() {
    let events = drive_to_completion(&settings(1, 2, 2, 1), 5);

    assert_eq!(verse_starts(&events), vec![1, 2, 1, 2]);
    assert_eq!(events.last(), Some(&RepeatEvent::Finished));
}

#[test]
fn verse_cycles_replay_each_verse_in_place() {
    let events = drive_to_completion(&settings(1, 2, 1, 3), 5);

    // Each verse plays once, then replays twice before advancing
    assert_eq!(verse_starts(&events), vec![1, 1, 1, 2, 2, 2]);

    let replays = events
        .iter()
        .filter(|e| matches!(e, RepeatEvent::SameAyah { .. }))
        .count();
    assert_eq!(replays, 4);
}

#[test]
fn emission_count_is_cycles_times_range_times_replays() {
    // R=3, N=4 verses, V=2
    let events = drive_to_completion(&settings(2, 5, 3, 2), 6);
    assert_eq!(verse_starts(&events).len(), 3 * 4 * 2);
}

#[test]
fn selecting_a_verse_outside_the_range_finishes_the_session() {
    let (mut repeat, _) = Repeat::start(&settings(1, 3, 2, 2), fixture_timings(2, 7), TOLERANCE_MS);

    let events = repeat.select_verse(5);

    assert_eq!(events, vec![RepeatEvent::Finished]);
    assert!(repeat.is_finished());
    // A finished session ignores further ticks
    assert!(repeat.on_timestamp(25_000).is_empty());
}

#[test]
fn selecting_a_verse_inside_the_range_jumps_without_finishing() {
    let (mut repeat, _) = Repeat::start(&settings(1, 5, 1, 1), fixture_timings(2, 7), TOLERANCE_MS);

    let events = repeat.select_verse(4);

    assert!(!repeat.is_finished());
    assert_eq!(repeat.current_verse(), 4);
    assert!(events
        .iter()
        .any(|e| matches!(e, RepeatEvent::Ayah { verse: 4, .. })));
}

#[test]
fn delay_scales_with_verse_duration() {
    let settings = RepeatSettings {
        from_verse: 1,
        to_verse: 2,
        total_range_cycles: 1,
        total_verse_cycles: 1,
        delay_multiplier: 0.5,
    };
    let (mut repeat, first) = Repeat::start(&settings, fixture_timings(2, 3), TOLERANCE_MS);

    // 10s verse at 0.5x multiplier pauses for 5s
    assert!(matches!(first, RepeatEvent::Ayah { delay_ms: 5_000, .. }));

    let events = repeat.on_timestamp(VERSE_MS - 50);
    assert!(events
        .iter()
        .any(|e| matches!(e, RepeatEvent::Ayah { verse: 2, delay_ms: 5_000 })));
}

#[test]
fn navigation_is_clamped_to_the_range() {
    let (mut repeat, _) = Repeat::start(&settings(3, 5, 1, 1), fixture_timings(2, 7), TOLERANCE_MS);

    // Backward from the range start stays put
    assert!(repeat.previous_verse().is_empty());
    assert_eq!(repeat.current_verse(), 3);

    repeat.next_verse();
    repeat.next_verse();
    assert_eq!(repeat.current_verse(), 5);

    // Forward past the range end finishes the session
    let events = repeat.next_verse();
    assert!(events.contains(&RepeatEvent::Finished));
    assert!(repeat.is_finished());
}

#[test]
fn ticks_before_the_verse_end_do_nothing() {
    let (mut repeat, _) = Repeat::start(&settings(1, 2, 1, 1), fixture_timings(2, 3), TOLERANCE_MS);

    // Well before the tolerance window
    assert!(repeat.on_timestamp(0).is_empty());
    assert!(repeat.on_timestamp(VERSE_MS / 2).is_empty());
    assert!(repeat.on_timestamp(VERSE_MS - TOLERANCE_MS - 1).is_empty());
    assert_eq!(repeat.current_verse(), 1);
}

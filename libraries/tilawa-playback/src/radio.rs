//! Radio mode - endless ambient track selection
//!
//! A pure reactive responder: given a station, it answers every
//! "what next?" with one more `(reciter, surah)` pair. Curated
//! stations sample their fixed track list; reciter stations pair the
//! reciter with a uniformly random surah.

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use tilawa_core::SURAH_COUNT;

/// One playable radio track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioTrack {
    /// Reciter whose recording to play
    pub reciter_id: u32,

    /// Surah number
    pub surah: u16,
}

/// A radio station the user can tune into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Station {
    /// Curated playlist with a fixed track list
    Curated {
        /// Station identifier
        id: u32,
        /// The station's tracks
        tracks: Vec<RadioTrack>,
    },

    /// All 114 surahs by one reciter, played in random order
    Reciter {
        /// Station identifier
        id: u32,
        /// The reciter backing the station
        reciter_id: u32,
    },
}

impl Station {
    /// Station identifier
    pub fn id(&self) -> u32 {
        match self {
            Station::Curated { id, .. } | Station::Reciter { id, .. } => *id,
        }
    }
}

/// Event radio mode sends the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioEvent {
    /// Load and play this track
    PlayTrack {
        /// Reciter whose recording to play
        reciter_id: u32,
        /// Surah number
        surah: u16,
        /// Start at a random offset instead of time zero
        ///
        /// Set only for the track selected when the station is first
        /// tuned in, for a "joining a live broadcast" feel.
        from_random_position: bool,
    },
}

/// Generates an endless sequence of tracks for a station
#[derive(Debug, Clone, Default)]
pub struct Radio {
    station: Option<Station>,
}

impl Radio {
    /// Create radio mode with no station yet
    pub fn new() -> Self {
        Self { station: None }
    }

    /// Tune into a station
    ///
    /// Stores the selection and immediately picks the first track,
    /// flagged to start at a random offset.
    pub fn play_station(&mut self, station: Station) -> Option<RadioEvent> {
        self.station = Some(station);
        self.select_track(true)
    }

    /// The current track finished; pick the next one
    ///
    /// Subsequent tracks always start at time zero.
    pub fn track_ended(&mut self) -> Option<RadioEvent> {
        self.select_track(false)
    }

    /// The station currently tuned in, if any
    pub fn station(&self) -> Option<&Station> {
        self.station.as_ref()
    }

    /// Shared selection logic for both entry points
    ///
    /// The random-start flag is threaded through rather than
    /// hard-coded so only the tuning-in path sets it.
    fn select_track(&mut self, from_random_position: bool) -> Option<RadioEvent> {
        let mut rng = thread_rng();

        match self.station.as_ref()? {
            Station::Curated { tracks, .. } => {
                tracks.choose(&mut rng).map(|track| RadioEvent::PlayTrack {
                    reciter_id: track.reciter_id,
                    surah: track.surah,
                    from_random_position,
                })
            }
            Station::Reciter { reciter_id, .. } => Some(RadioEvent::PlayTrack {
                reciter_id: *reciter_id,
                surah: rng.gen_range(1..=SURAH_COUNT),
                from_random_position,
            }),
        }
    }
}

//! Playback clock boundary
//!
//! The synchronization core only ever reads playback time; transport
//! control (play/pause/seek/volume) stays with the surrounding player UI.

/// Read-only view of the playback position supplied by the host player
///
/// `current_secs` is expected to be monotonic non-decreasing while playing;
/// `has_ended` flips once when the track runs out.
pub trait PlaybackClock {
    /// Current playback position in seconds
    fn current_secs(&self) -> f64;

    /// Whether the track has finished playing
    fn has_ended(&self) -> bool;
}

/// A hand-driven clock for tests and for hosts without a real audio backend
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    secs: f64,
    ended: bool,
}

impl ManualClock {
    /// Create a clock positioned at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance (or rewind, after a seek) to a position
    pub fn set_secs(&mut self, secs: f64) {
        self.secs = secs;
    }

    /// Mark the track as finished
    pub fn set_ended(&mut self, ended: bool) {
        self.ended = ended;
    }
}

impl PlaybackClock for ManualClock {
    fn current_secs(&self) -> f64 {
        self.secs
    }

    fn has_ended(&self) -> bool {
        self.ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_roundtrip() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.current_secs(), 0.0);
        assert!(!clock.has_ended());

        clock.set_secs(12.5);
        clock.set_ended(true);
        assert_eq!(clock.current_secs(), 12.5);
        assert!(clock.has_ended());
    }
}

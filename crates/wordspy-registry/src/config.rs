//! Timing knobs for room lifecycle management.

use std::time::Duration;

/// Durations governing a room's lifecycle timers.
///
/// Tests shrink these to keep virtual time manageable; production uses
/// the defaults.
#[derive(Debug, Clone)]
pub struct RoomTiming {
    /// How long a dropped connection may reclaim its seat before the
    /// player is treated as gone.
    pub disconnect_grace: Duration,
    /// How long a room with no connections at all survives before it is
    /// deleted.
    pub room_deletion_grace: Duration,
    /// Pause between an inconclusive round's results and the next round,
    /// so players can read the outcome.
    pub round_advance_delay: Duration,
}

impl Default for RoomTiming {
    fn default() -> Self {
        Self {
            disconnect_grace: Duration::from_secs(30),
            room_deletion_grace: Duration::from_secs(120),
            round_advance_delay: Duration::from_secs(8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_values() {
        let timing = RoomTiming::default();
        assert_eq!(timing.disconnect_grace, Duration::from_secs(30));
        assert_eq!(timing.room_deletion_grace, Duration::from_secs(120));
        assert_eq!(timing.round_advance_delay, Duration::from_secs(8));
    }
}

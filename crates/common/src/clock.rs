//! Clock utilities for measuring gaps between input events.
//!
//! Every recorded event carries the time elapsed since the event before
//! it. The first event's gap is measured from the moment recording
//! started.

use std::time::Instant;

/// A monotonic clock that hands out inter-event gaps in milliseconds.
#[derive(Debug, Clone)]
pub struct GapClock {
    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,

    /// Instant of the previous lap.
    last: Instant,
}

impl GapClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            epoch_wall: chrono::Utc::now().to_rfc3339(),
            last: now,
        }
    }

    /// Create a clock from a known epoch.
    pub fn from_epoch(epoch: Instant, wall: String) -> Self {
        Self {
            epoch_wall: wall,
            last: epoch,
        }
    }

    /// Milliseconds between the previous lap and `at`, then move the lap
    /// marker to `at`. Instants earlier than the marker yield zero.
    pub fn lap_ms(&mut self, at: Instant) -> u64 {
        let gap = at.saturating_duration_since(self.last);
        if at > self.last {
            self.last = at;
        }
        gap.as_millis() as u64
    }

    /// Wall-clock time at recording start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Format milliseconds as seconds with exactly three decimals.
    pub fn ms_to_secs_string(ms: u64) -> String {
        format!("{}.{:03}", ms / 1000, ms % 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_lap_measures_from_epoch() {
        let epoch = Instant::now();
        let mut clock = GapClock::from_epoch(epoch, "2026-01-01T00:00:00Z".to_string());
        assert_eq!(clock.lap_ms(epoch + Duration::from_millis(250)), 250);
    }

    #[test]
    fn test_laps_are_relative_to_previous() {
        let epoch = Instant::now();
        let mut clock = GapClock::from_epoch(epoch, String::new());
        clock.lap_ms(epoch + Duration::from_millis(100));
        assert_eq!(clock.lap_ms(epoch + Duration::from_millis(1_350)), 1_250);
    }

    #[test]
    fn test_out_of_order_instant_yields_zero() {
        let epoch = Instant::now();
        let mut clock = GapClock::from_epoch(epoch, String::new());
        clock.lap_ms(epoch + Duration::from_millis(500));
        assert_eq!(clock.lap_ms(epoch + Duration::from_millis(200)), 0);
        assert_eq!(clock.lap_ms(epoch + Duration::from_millis(600)), 100);
    }

    #[test]
    fn test_ms_to_secs_string() {
        assert_eq!(GapClock::ms_to_secs_string(0), "0.000");
        assert_eq!(GapClock::ms_to_secs_string(51), "0.051");
        assert_eq!(GapClock::ms_to_secs_string(1_500), "1.500");
        assert_eq!(GapClock::ms_to_secs_string(61_007), "61.007");
    }
}

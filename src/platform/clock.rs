//! Frame clock for the display-refresh loop
//!
//! The browser calls back once per refresh with a millisecond timestamp.
//! `FrameClock` turns those into clamped deltas and carries the running
//! flag that makes a stop take effect on the next scheduled callback.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    running: bool,
    /// Timestamp of the previous frame (ms), if one has been seen since start
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock. Returns false if it was already running, so the
    /// caller knows not to schedule a second loop.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_time = None;
        true
    }

    /// Next callback becomes a no-op. Safe to call from anywhere.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_time = None;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the previous frame, clamped to [`MAX_FRAME_DT`].
    ///
    /// Returns `None` when stopped. The first frame after a start has a
    /// zero delta.
    pub fn delta(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        Some(dt.clamp(0.0, MAX_FRAME_DT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut clock = FrameClock::new();
        assert!(!clock.is_running());
        assert!(clock.start());
        assert!(!clock.start());
        assert!(clock.is_running());
    }

    #[test]
    fn test_delta_in_seconds() {
        let mut clock = FrameClock::new();
        clock.start();
        assert_eq!(clock.delta(1000.0), Some(0.0));
        let dt = clock.delta(1016.0).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_clamped() {
        let mut clock = FrameClock::new();
        clock.start();
        clock.delta(0.0);
        assert_eq!(clock.delta(30_000.0), Some(MAX_FRAME_DT));
        // Timestamps going backwards never produce negative time
        assert_eq!(clock.delta(29_000.0), Some(0.0));
    }

    #[test]
    fn test_stop_makes_frames_noop() {
        let mut clock = FrameClock::new();
        clock.start();
        clock.delta(0.0);
        clock.stop();
        assert_eq!(clock.delta(16.0), None);

        // Restart does not count the stopped interval
        clock.start();
        assert_eq!(clock.delta(5000.0), Some(0.0));
    }
}

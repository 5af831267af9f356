//! Host loops driving the resource simulator
//!
//! The simulator only knows `frame(now)`; these loops decide how often it is
//! called and where `now` comes from.

use crate::simulation::clock::{Clock, ManualClock, SystemClock};
use crate::simulation::simulator::ResourceSimulator;
use serde::Serialize;
use std::thread;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default frame interval, roughly one display refresh
pub const DEFAULT_FRAME_INTERVAL_MS: i64 = 16;

/// What a loop run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLoopReport {
    /// Frames delivered to the simulator
    pub frames: u64,
    /// Frames that notified listeners
    pub notifications: u64,
    /// Clock time covered by the run
    pub simulated_ms: i64,
}

/// Fixed-interval frame driver
#[derive(Debug, Clone, Copy)]
pub struct FrameLoop {
    frame_interval_ms: i64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self { frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS }
    }
}

impl FrameLoop {
    /// Create a loop with a custom frame interval; non-positive values fall back to the default
    pub fn new(frame_interval_ms: i64) -> Self {
        if frame_interval_ms <= 0 {
            return Self::default();
        }
        Self { frame_interval_ms }
    }

    /// Milliseconds between frames
    pub fn frame_interval_ms(&self) -> i64 {
        self.frame_interval_ms
    }

    /// Run for `duration_ms` of manual-clock time without sleeping
    ///
    /// Starts the simulator, delivers one frame per interval while advancing
    /// `clock`, and stops it again before returning.
    #[instrument(skip(self, simulator, clock))]
    pub fn run_simulated(
        &self,
        simulator: &mut ResourceSimulator,
        clock: &ManualClock,
        duration_ms: i64,
    ) -> FrameLoopReport {
        let started_at = clock.now_millis();
        let deadline = started_at + duration_ms.max(0);
        let mut report = FrameLoopReport::default();

        simulator.start();
        while clock.now_millis() < deadline {
            if simulator.frame(clock.now_millis()) {
                report.notifications += 1;
            }
            report.frames += 1;
            clock.advance(self.frame_interval_ms);
        }
        simulator.stop();

        report.simulated_ms = clock.now_millis() - started_at;
        debug!(
            frames = report.frames,
            notifications = report.notifications,
            "Simulated run finished"
        );
        report
    }

    /// Run for `duration` of wall-clock time, sleeping between frames
    #[instrument(skip(self, simulator))]
    pub fn run_realtime(
        &self,
        simulator: &mut ResourceSimulator,
        duration: Duration,
    ) -> FrameLoopReport {
        let clock = SystemClock;
        let started_at = clock.now_millis();
        let deadline = started_at + duration.as_millis() as i64;
        let interval = Duration::from_millis(self.frame_interval_ms as u64);
        let mut report = FrameLoopReport::default();

        simulator.start();
        while clock.now_millis() < deadline {
            if simulator.frame(clock.now_millis()) {
                report.notifications += 1;
            }
            report.frames += 1;
            thread::sleep(interval);
        }
        simulator.stop();

        report.simulated_ms = clock.now_millis() - started_at;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_layout;
    use crate::types::{LayoutConfig, SimulatorConfig};
    use std::sync::Arc;

    fn simulator() -> ResourceSimulator {
        let layout = Arc::new(build_layout(&LayoutConfig::default()));
        ResourceSimulator::new(layout, SimulatorConfig::default(), Some(11))
    }

    #[test]
    fn test_run_simulated_counts_frames() {
        let mut sim = simulator();
        let clock = ManualClock::new(0);
        let report = FrameLoop::new(100).run_simulated(&mut sim, &clock, 10_000);

        assert_eq!(report.frames, 100);
        assert_eq!(report.simulated_ms, 10_000);
        // Frames at 0, 3000, 6000 and 9000 ms
        assert_eq!(report.notifications, 4);
        assert!(!sim.is_running());
        assert_eq!(sim.tick_count(), 100);
    }

    #[test]
    fn test_zero_duration() {
        let mut sim = simulator();
        let clock = ManualClock::new(5_000);
        let report = FrameLoop::default().run_simulated(&mut sim, &clock, 0);
        assert_eq!(report, FrameLoopReport::default());
    }

    #[test]
    fn test_non_positive_interval_uses_default() {
        assert_eq!(FrameLoop::new(0).frame_interval_ms(), DEFAULT_FRAME_INTERVAL_MS);
        assert_eq!(FrameLoop::new(-5).frame_interval_ms(), DEFAULT_FRAME_INTERVAL_MS);
    }

    #[test]
    fn test_run_realtime_short() {
        let mut sim = simulator();
        let report = FrameLoop::new(5).run_realtime(&mut sim, Duration::from_millis(30));
        assert!(report.frames >= 1);
        assert!(report.notifications >= 1);
        assert!(!sim.is_running());
    }
}

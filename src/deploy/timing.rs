//! Mission timing.
//!
//! Tracks the wall-clock span of one deployment run.

use std::time::{Duration, Instant};

/// Start and end marks of one run. Each mark is set at most once and never
/// reset; elapsed time is derived, not stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissionTiming {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl MissionTiming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the run start.
    pub fn start(&mut self) {
        if self.start.is_none() {
            self.start = Some(Instant::now());
        }
    }

    /// Mark the run end.
    pub fn end(&mut self) {
        if self.end.is_none() {
            self.end = Some(Instant::now());
        }
    }

    /// Elapsed time between the recorded marks.
    pub fn elapsed(&self) -> Duration {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }
}

/// Render a duration as `{M}min:{S}sec`, minutes floored, seconds modulo 60.
pub fn format_mission_time(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{}min:{}sec", total_secs / 60, total_secs % 60)
}

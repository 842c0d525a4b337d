//! Frame clock
//!
//! Tracks the tick of the previous and current frame in milliseconds since the clock was
//! created. The same clock timestamps input samples, so classifier timing and frame timing
//! share one time base.

use crate::input::driver::TimeSource;
use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 120;

#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    prev_ticks: u64,
    current_ticks: u64,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            start: Instant::now(),
            prev_ticks: 0,
            current_ticks: 0,
            fps,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
    }

    pub fn reset(&mut self) {
        let now = self.now_millis();
        self.prev_ticks = now;
        self.current_ticks = now;
    }

    /// Starts a new frame.
    pub fn update_frame_ticks(&mut self) {
        let now = self.now_millis();
        self.advance_to(now);
    }

    fn advance_to(&mut self, ticks: u64) {
        self.prev_ticks = self.current_ticks;
        self.current_ticks = ticks.max(self.current_ticks);
    }

    /// Seconds between the last two frames.
    pub fn delta_time(&self) -> f32 {
        (self.current_ticks - self.prev_ticks) as f32 / 1000.0
    }

    pub fn current_ticks(&self) -> u64 {
        self.current_ticks
    }

    /// Target frame duration, or `None` for an unlimited frame rate.
    pub fn frame_period(&self) -> Option<Duration> {
        match self.fps {
            0 => None,
            fps => Some(Duration::from_micros(1_000_000 / u64::from(fps))),
        }
    }
}

impl TimeSource for FrameClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_time_is_in_seconds() {
        let mut clock = FrameClock::new(60);
        clock.advance_to(1000);
        clock.advance_to(1016);
        assert!((clock.delta_time() - 0.016).abs() < f32::EPSILON);
        assert_eq!(clock.current_ticks(), 1016);
    }

    #[test]
    fn ticks_never_run_backwards() {
        let mut clock = FrameClock::default();
        clock.advance_to(500);
        clock.advance_to(400);
        assert_eq!(clock.current_ticks(), 500);
        assert_eq!(clock.delta_time(), 0.0);
    }

    #[test]
    fn reset_zeroes_delta() {
        let mut clock = FrameClock::default();
        clock.update_frame_ticks();
        clock.reset();
        assert_eq!(clock.delta_time(), 0.0);
    }

    #[test]
    fn frame_period_follows_fps() {
        let mut clock = FrameClock::new(100);
        assert_eq!(clock.frame_period(), Some(Duration::from_millis(10)));
        clock.set_fps(0);
        assert_eq!(clock.frame_period(), None);
        assert_eq!(clock.fps(), 0);
    }
}

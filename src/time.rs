//! Time facilities for the canvas loop.
//!
//! [`Time`] is the per-frame clock (elapsed, delta, FPS); [`StepClock`] is a
//! fixed-step accumulator that decouples the physics tick rate from the
//! redraw rate. The draw loop runs whenever the host repaints; each frame it
//! drains however many fixed ticks have accumulated.
//!
//! # Example
//!
//! ```ignore
//! use bobble::time::{StepClock, Time};
//!
//! let mut time = Time::new();
//! let mut clock = StepClock::new(60.0);
//!
//! // In the draw loop:
//! let (_, delta) = time.update();
//! for _ in 0..clock.accumulate(delta) {
//!     canvas.step();
//! }
//! ```

use std::time::{Duration, Instant};

/// Time tracking for the render loop.
#[derive(Debug)]
pub struct Time {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in seconds.
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to refresh the FPS figure.
    fps_update_interval: Duration,
}

impl Time {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let since_fps = now.duration_since(self.fps_update_time);
        if since_fps >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two updates.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames since the clock was created.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS figure.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-step accumulator for the physics tick.
///
/// Feeding it frame deltas yields whole steps at a fixed rate, independent of
/// how often the host redraws. A cap bounds the steps returned for one frame
/// so a long stall cannot snowball into a catch-up burst.
#[derive(Debug)]
pub struct StepClock {
    step: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
}

impl StepClock {
    /// Cap on ticks drained in a single frame.
    pub const DEFAULT_MAX_STEPS: u32 = 5;

    /// Create a clock ticking `rate` times per second.
    pub fn new(rate: f32) -> Self {
        Self {
            step: 1.0 / rate.max(1.0),
            accumulator: 0.0,
            max_steps_per_frame: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Seconds per tick.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame delta and return how many fixed ticks are due.
    ///
    /// Time beyond the per-frame cap is discarded, not carried over.
    pub fn accumulate(&mut self, delta: f32) -> u32 {
        self.accumulator += delta.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps_per_frame {
            self.accumulator = 0.0;
        }
        steps
    }

    /// Drop any accumulated time (e.g. after the window was hidden).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn time_starts_at_frame_zero() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn update_advances_elapsed_and_frames() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = time.update();
        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn step_clock_emits_fixed_ticks() {
        let mut clock = StepClock::new(60.0);
        assert_eq!(clock.accumulate(1.0 / 100.0), 0);
        assert_eq!(clock.accumulate(1.0 / 100.0), 1);
        // A full 60 Hz frame emits one tick.
        assert_eq!(clock.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn step_clock_caps_catch_up() {
        let mut clock = StepClock::new(60.0);
        // A two-second stall is bounded by the per-frame cap.
        assert_eq!(clock.accumulate(2.0), StepClock::DEFAULT_MAX_STEPS);
        // And the remainder was discarded, not banked.
        assert_eq!(clock.accumulate(0.0), 0);
    }

    #[test]
    fn step_clock_reset_drops_pending_time() {
        let mut clock = StepClock::new(60.0);
        clock.accumulate(0.01);
        clock.reset();
        assert_eq!(clock.accumulate(0.01), 0);
    }
}

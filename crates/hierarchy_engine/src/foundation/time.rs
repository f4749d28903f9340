//! Time management utilities
//!
//! The simulation runs on fixed steps; [`Timer`] measures real frame time and
//! [`FpsCounter`] turns step counts into a frames-per-second figure for the
//! periodic diagnostics line.

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Counts frames over a rolling one-second window
///
/// Driven by caller-supplied deltas so it works the same for real time and
/// for fixed-step simulation.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    elapsed: f32,
    frames_this_second: u32,
    frames_last_second: u32,
}

impl FpsCounter {
    /// Create a counter with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of `delta_time` seconds
    ///
    /// Returns `true` when a full second has just elapsed and
    /// [`FpsCounter::fps`] holds a fresh value.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.elapsed += delta_time;
        self.frames_this_second += 1;
        if self.elapsed >= 1.0 {
            self.frames_last_second = self.frames_this_second;
            self.frames_this_second = 0;
            self.elapsed -= 1.0;
            true
        } else {
            false
        }
    }

    /// Frames counted during the last complete second
    pub fn fps(&self) -> u32 {
        self.frames_last_second
    }
}

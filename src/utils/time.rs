#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Wall-clock frame timer used by the window shells.
#[derive(Debug, Clone)]
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time since the previous tick.
    pub delta: Duration,
    pub elapsed: Duration,
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// How far animation time advances per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStep {
    /// A constant step in seconds, independent of frame rate.
    Fixed(f32),
    /// The measured wall-clock delta.
    RealTime,
}

impl Default for FrameStep {
    fn default() -> Self {
        FrameStep::Fixed(0.01)
    }
}

/// Converts wall-clock deltas into animation deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    step: FrameStep,
    frames: u64,
    animation_time: f32,
}

impl FrameClock {
    #[must_use]
    pub fn new(step: FrameStep) -> Self {
        Self {
            step,
            frames: 0,
            animation_time: 0.0,
        }
    }

    /// Returns the animation delta for a frame that took `wall_dt` seconds.
    pub fn advance(&mut self, wall_dt: f32) -> f32 {
        let dt = match self.step {
            FrameStep::Fixed(step) => step,
            FrameStep::RealTime => wall_dt.max(0.0),
        };
        self.frames += 1;
        self.animation_time += dt;
        dt
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Total animation time handed out so far.
    #[must_use]
    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    #[must_use]
    pub fn step(&self) -> FrameStep {
        self.step
    }
}

//! # Mount Fade
//!
//! One-shot fade-in of the conversation when the screen appears.
//! Exponential ease-out over one second; it is never replayed per message.

use std::time::{Duration, Instant};

pub const FADE_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy)]
pub struct FadeIn {
    started: Instant,
    duration: Duration,
}

impl FadeIn {
    pub fn start() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(started: Instant) -> Self {
        Self {
            started,
            duration: FADE_DURATION,
        }
    }

    /// Opacity at `now`, in `0.0..=1.0`.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        ease_out_exp(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }

    pub fn opacity(&self) -> f32 {
        self.opacity_at(Instant::now())
    }

    pub fn is_running_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < self.duration
    }

    pub fn is_running(&self) -> bool {
        self.is_running_at(Instant::now())
    }
}

/// `1 - 2^(-10t)`, pinned to exactly 1.0 once `t >= 1`.
fn ease_out_exp(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else if t <= 0.0 {
        0.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

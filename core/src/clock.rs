use core::time::Duration;
use web_time::Instant;

/// Measures frame deltas and the time left in each frame's budget.
#[derive(Clone, Debug)]
pub struct FrameClock {
    frame_budget: Duration,
    max_delta: f32,
    last_tick: Instant,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32, max_delta: f32) -> Self {
        let now = Instant::now();
        Self {
            frame_budget: Duration::from_secs(1) / target_fps.max(1),
            max_delta,
            last_tick: now,
            frame_start: now,
        }
    }

    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self::new(settings.target_fps, settings.max_frame_delta)
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Starts a new frame and returns the clamped seconds since the last one.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.frame_start = now;
        self.clamp(elapsed)
    }

    pub fn clamp(&self, elapsed: Duration) -> f32 {
        let delta = elapsed.as_secs_f32();
        if delta > self.max_delta {
            log::trace!("Frame took {:.3}s, clamped to {:.3}s", delta, self.max_delta);
        }
        delta.min(self.max_delta)
    }

    /// How long to sleep so the current frame fills its budget.
    pub fn remaining(&self) -> Duration {
        self.frame_budget.saturating_sub(self.frame_start.elapsed())
    }
}

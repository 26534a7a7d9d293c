use std::time::Duration;

use crate::constants::{VEIL_IN_MS, VEIL_OUT_MS};

/// Dimming layer over the dot grid. Lifts while the pointer moves over the
/// grid and settles back once it leaves; each fade starts from the current
/// opacity.
#[derive(Debug, Clone)]
pub struct Veil {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    fade_out: Duration,
    fade_in: Duration,
}

impl Veil {
    pub fn new(fade_out: Duration, fade_in: Duration) -> Self {
        Self {
            from: 1.0,
            to: 1.0,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            fade_out,
            fade_in,
        }
    }

    /// 1 fully veiled, 0 fully lifted.
    pub fn opacity(&self) -> f32 {
        if self.elapsed >= self.duration {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let t = 1.0 - (1.0 - t).powi(2); // easeOutQuad
        self.from + (self.to - self.from) * t
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn fade_out(&mut self) {
        self.fade_to(0.0, self.fade_out);
    }

    pub fn fade_in(&mut self) {
        self.fade_to(1.0, self.fade_in);
    }

    fn fade_to(&mut self, to: f32, duration: Duration) {
        // Repeated moves keep the running fade instead of restarting it
        if self.to == to {
            return;
        }
        self.from = self.opacity();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    pub fn update(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

impl Default for Veil {
    fn default() -> Self {
        Self::new(Duration::from_millis(VEIL_OUT_MS), Duration::from_millis(VEIL_IN_MS))
    }
}

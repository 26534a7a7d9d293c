use std::time::Duration;

use crate::constants::SPOTLIGHT_DAMPING_MS;
use crate::glow::pointer::Point;

/// Grid spotlight that trails the pointer. Each new target restarts the glide
/// from wherever the light currently is.
#[derive(Debug, Clone)]
pub struct Spotlight {
    from: Point,
    target: Point,
    elapsed: Duration,
    damping: Duration,
}

impl Spotlight {
    pub fn new(at: Point, damping: Duration) -> Self {
        Self {
            from: at,
            target: at,
            elapsed: damping,
            damping,
        }
    }

    pub fn position(&self) -> Point {
        if self.damping.is_zero() {
            return self.target;
        }
        let t = (self.elapsed.as_secs_f32() / self.damping.as_secs_f32()).min(1.0);
        let t = 1.0 - (1.0 - t).powi(3); // easeOutCubic
        self.from.lerp(self.target, t)
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.damping
    }

    pub fn move_to(&mut self, target: Point) {
        self.from = self.position();
        self.target = target;
        self.elapsed = Duration::ZERO;
    }

    pub fn update(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.damping);
    }
}

impl Default for Spotlight {
    fn default() -> Self {
        Self::new(Point::default(), Duration::from_millis(SPOTLIGHT_DAMPING_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn glides_and_settles_on_target() {
        let mut s = Spotlight::new(Point::new(0.0, 0.0), ms(450));
        s.move_to(Point::new(100.0, 0.0));
        assert_eq!(s.position(), Point::new(0.0, 0.0));
        s.update(ms(225));
        let half = s.position().x;
        // Ease-out covers most of the way in the first half.
        assert!(half > 80.0 && half < 100.0, "{half}");
        s.update(ms(225));
        assert!(s.is_settled());
        assert_eq!(s.position(), Point::new(100.0, 0.0));
    }

    #[test]
    fn retarget_starts_from_current_position() {
        let mut s = Spotlight::new(Point::new(0.0, 0.0), ms(450));
        s.move_to(Point::new(100.0, 0.0));
        s.update(ms(225));
        let mid = s.position();
        s.move_to(Point::new(0.0, 0.0));
        assert_eq!(s.position(), mid);
        assert_eq!(s.target(), Point::new(0.0, 0.0));
    }

    #[test]
    fn zero_damping_jumps() {
        let mut s = Spotlight::new(Point::new(0.0, 0.0), Duration::ZERO);
        s.move_to(Point::new(5.0, 5.0));
        assert_eq!(s.position(), Point::new(5.0, 5.0));
    }
}

use std::time::Duration;

use log::trace;

use crate::constants::*;
use crate::engine::Widget;
use crate::glow::pointer::{Point, Rect, relative_offset};
use crate::timer::{TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Reset,
}

/// Radial glow that follows the pointer over a card, or flashes where the
/// card was clicked or tapped.
pub struct GlowCard {
    position: Point,
    active: bool,
    flash_for: Duration,

    timers: Timers<Signal>,
    flash: Option<TimerId>,
    mounted: bool,
}

impl GlowCard {
    pub fn new(flash_for: Duration) -> Self {
        Self {
            position: hidden(),
            active: false,
            flash_for,
            timers: Timers::new(),
            flash: None,
            mounted: false,
        }
    }

    /// Glow center relative to the card.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pointer_moved(&mut self, pointer: Point, rect: Rect) {
        if !self.mounted {
            return;
        }
        self.position = relative_offset(pointer, rect);
        self.active = true;
    }

    pub fn pointer_left(&mut self) {
        if !self.mounted {
            return;
        }
        self.position = hidden();
        self.active = false;
    }

    /// Lights the card at the pointer, or at its center without one, and
    /// switches it off again after the flash time.
    pub fn flash(&mut self, pointer: Option<Point>, rect: Rect) {
        if !self.mounted {
            return;
        }
        self.position = match pointer {
            Some(p) => relative_offset(p, rect),
            None => rect.local_center(),
        };
        self.active = true;
        if let Some(id) = self.flash.take() {
            self.timers.cancel(id);
        }
        self.flash = Some(self.timers.after(self.flash_for, Signal::Reset));
        trace!("glow flash at {:?}", self.position);
    }
}

fn hidden() -> Point {
    Point::new(GLOW_HIDDEN.0, GLOW_HIDDEN.1)
}

impl Default for GlowCard {
    fn default() -> Self {
        Self::new(Duration::from_millis(FLASH_MS))
    }
}

impl Widget for GlowCard {
    fn mount(&mut self) {
        self.mounted = true;
    }

    fn update(&mut self, dt: Duration) {
        if !self.mounted {
            return;
        }
        let until = self.timers.now() + dt;
        while let Some(Signal::Reset) = self.timers.pop_due(until) {
            self.flash = None;
            self.active = false;
            self.position = hidden();
        }
    }

    fn unmount(&mut self) {
        self.timers.cancel_all();
        self.flash = None;
        self.active = false;
        self.position = hidden();
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Drop for GlowCard {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn card() -> GlowCard {
        let mut c = GlowCard::default();
        c.mount();
        c
    }

    const RECT: Rect = Rect::new(100.0, 100.0, 200.0, 120.0);

    #[test]
    fn follows_the_pointer_and_hides_on_leave() {
        let mut c = card();
        c.pointer_moved(Point::new(150.0, 110.0), RECT);
        assert!(c.is_active());
        assert_eq!(c.position(), Point::new(50.0, 10.0));
        c.pointer_left();
        assert!(!c.is_active());
        assert_eq!(c.position(), Point::new(-200.0, -200.0));
    }

    #[test]
    fn flash_without_pointer_lights_the_center() {
        let mut c = card();
        c.flash(None, RECT);
        assert_eq!(c.position(), Point::new(100.0, 60.0));
        assert!(c.is_active());
    }

    #[test]
    fn flash_resets_after_two_seconds() {
        let mut c = card();
        c.flash(Some(Point::new(120.0, 130.0)), RECT);
        c.update(ms(1999));
        assert!(c.is_active());
        c.update(ms(1));
        assert!(!c.is_active());
        assert_eq!(c.position(), Point::new(-200.0, -200.0));
    }

    #[test]
    fn second_flash_rearms_the_reset() {
        let mut c = card();
        c.flash(None, RECT);
        c.update(ms(1500));
        c.flash(None, RECT);
        c.update(ms(1000));
        assert!(c.is_active());
        c.update(ms(1000));
        assert!(!c.is_active());
    }

    #[test]
    fn unmounted_card_ignores_input() {
        let mut c = card();
        c.flash(None, RECT);
        c.unmount();
        c.pointer_moved(Point::new(150.0, 150.0), RECT);
        assert!(!c.is_active());
        assert_eq!(c.timers.pending(), 0);
    }

    #[test]
    fn teardown_twice_is_harmless() {
        let mut c = card();
        c.flash(None, RECT);
        c.update(ms(100));
        c.unmount();
        c.unmount();
        assert!(!c.is_mounted());
        // Drop runs the same teardown once more.
        drop(c);
    }
}

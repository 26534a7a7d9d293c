use std::time::Duration;

use log::{debug, info};

use crate::constants::*;
use crate::engine::Widget;
use crate::error::{Error, Result};
use crate::timer::{TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Blink,
    Type,
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTiming {
    pub char_interval: Duration,
    pub hold: Duration,
    pub blink: Duration,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            char_interval: Duration::from_millis(CHAR_INTERVAL_MS),
            hold: Duration::from_millis(HOLD_AFTER_TYPING_MS),
            blink: Duration::from_millis(CURSOR_BLINK_MS),
        }
    }
}

pub struct TypingEffect {
    paragraphs: Vec<Vec<char>>,
    timing: TypingTiming,

    index: usize,
    typed: usize,
    displayed: String,
    cursor_visible: bool,

    timers: Timers<Signal>,
    typing: Option<TimerId>,
    hold: Option<TimerId>,
    mounted: bool,
}

impl TypingEffect {
    pub fn new<I, S>(paragraphs: I, timing: TypingTiming) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paragraphs: Vec<Vec<char>> = paragraphs
            .into_iter()
            .map(|p| p.as_ref().chars().collect())
            .collect();
        if paragraphs.is_empty() {
            return Err(Error::NoParagraphs);
        }
        // A zero hold would re-arm itself at the same instant forever
        let timing = TypingTiming {
            hold: timing.hold.max(Duration::from_millis(1)),
            ..timing
        };
        Ok(Self {
            paragraphs,
            timing,
            index: 0,
            typed: 0,
            displayed: String::new(),
            cursor_visible: true,
            timers: Timers::new(),
            typing: None,
            hold: None,
            mounted: false,
        })
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Index of the paragraph being typed or held.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_typing(&self) -> bool {
        self.typing.is_some()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    fn start_paragraph(&mut self) {
        if let Some(id) = self.typing.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.hold.take() {
            self.timers.cancel(id);
        }

        self.displayed.clear();
        let Some(&first) = self.paragraphs[self.index].first() else {
            debug!("paragraph {} is empty, skipping after hold", self.index);
            self.hold = Some(self.timers.after(self.timing.hold, Signal::Advance));
            return;
        };

        debug!("typing paragraph {}", self.index);
        self.displayed.push(first);
        self.typed = 1;
        self.typing = Some(self.timers.every(self.timing.char_interval, Signal::Type));
    }

    fn handle(&mut self, signal: Signal) {
        match signal {
            Signal::Blink => self.cursor_visible = !self.cursor_visible,
            Signal::Type => {
                let paragraph = &self.paragraphs[self.index];
                match paragraph.get(self.typed) {
                    Some(&c) => {
                        self.displayed.push(c);
                        self.typed += 1;
                    }
                    None => {
                        if let Some(id) = self.typing.take() {
                            self.timers.cancel(id);
                        }
                        self.hold = Some(self.timers.after(self.timing.hold, Signal::Advance));
                    }
                }
            }
            Signal::Advance => {
                self.hold = None;
                self.index = (self.index + 1) % self.paragraphs.len();
                self.start_paragraph();
            }
        }
    }
}

impl Widget for TypingEffect {
    fn mount(&mut self) {
        if self.mounted {
            return;
        }
        info!("typewriter mounted with {} paragraphs", self.paragraphs.len());
        self.mounted = true;
        self.cursor_visible = true;
        self.timers.every(self.timing.blink, Signal::Blink);
        self.start_paragraph();
    }

    fn update(&mut self, dt: Duration) {
        if !self.mounted {
            return;
        }
        let until = self.timers.now() + dt;
        while let Some(signal) = self.timers.pop_due(until) {
            self.handle(signal);
        }
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.timers.cancel_all();
        self.typing = None;
        self.hold = None;
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Drop for TypingEffect {
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

    fn effect(paragraphs: &[&str]) -> TypingEffect {
        let mut t = TypingEffect::new(paragraphs.iter().copied(), TypingTiming::default()).unwrap();
        t.mount();
        t
    }

    #[test]
    fn no_paragraphs_is_an_error() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            TypingEffect::new(empty, TypingTiming::default()),
            Err(Error::NoParagraphs)
        ));
    }

    #[test]
    fn first_character_shows_on_mount() {
        let t = effect(&["Hello"]);
        assert_eq!(t.displayed(), "H");
        assert!(t.is_typing());
    }

    #[test]
    fn types_one_character_per_interval() {
        let mut t = effect(&["Hello", "World"]);
        t.update(ms(50));
        assert_eq!(t.displayed(), "He");
        t.update(ms(150));
        assert_eq!(t.displayed(), "Hello");
        assert!(t.is_typing());
        // One more interval notices the end and starts the hold.
        t.update(ms(50));
        assert!(!t.is_typing());
        assert_eq!(t.index(), 0);
        t.update(ms(1999));
        assert_eq!(t.displayed(), "Hello");
        t.update(ms(1));
        assert_eq!(t.index(), 1);
        assert_eq!(t.displayed(), "W");
    }

    #[test]
    fn wraps_back_to_the_first_paragraph() {
        let mut t = effect(&["ab", "c"]);
        // "ab": typed by 50, hold from 100 to 2100.
        // "c": hold from 2150 to 4150.
        t.update(ms(4150));
        assert_eq!(t.index(), 0);
        assert_eq!(t.displayed(), "a");
    }

    #[test]
    fn empty_paragraph_advances_after_hold() {
        let mut t = effect(&["", "next"]);
        assert_eq!(t.displayed(), "");
        assert!(!t.is_typing());
        t.update(ms(2000));
        assert_eq!(t.index(), 1);
        assert_eq!(t.displayed(), "n");
    }

    #[test]
    fn typing_is_unicode_aware() {
        let mut t = effect(&["héé"]);
        t.update(ms(100));
        assert_eq!(t.displayed(), "héé");
    }

    #[test]
    fn cursor_blinks() {
        let mut t = effect(&["x"]);
        assert!(t.cursor_visible());
        t.update(ms(500));
        assert!(!t.cursor_visible());
        t.update(ms(500));
        assert!(t.cursor_visible());
    }

    #[test]
    fn zero_hold_on_empty_paragraphs_still_returns() {
        let timing = TypingTiming {
            hold: Duration::ZERO,
            ..TypingTiming::default()
        };
        let mut t = TypingEffect::new(["", ""], timing).unwrap();
        t.mount();
        t.update(ms(16));
        // One advance per millisecond: sixteen advances over two paragraphs.
        assert_eq!(t.index(), 0);
        assert_eq!(t.displayed(), "");
        assert_eq!(t.pending_timers(), 2);
    }

    #[test]
    fn unmount_cancels_every_timer() {
        let mut t = effect(&["Hello"]);
        t.update(ms(60));
        t.unmount();
        assert_eq!(t.pending_timers(), 0);
        let shown = t.displayed().to_string();
        t.update(ms(10_000));
        assert_eq!(t.displayed(), shown);
    }
}

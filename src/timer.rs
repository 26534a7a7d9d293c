//! Cancellable timers over a virtual clock.
//!
//! Widgets never sleep or spawn threads. Each one owns a `Timers` registry,
//! schedules signals on it and drains whatever became due every frame. The
//! clock only moves when the owner drains it, so tests can step time exactly.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<S> {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    signal: S,
}

#[derive(Debug)]
pub struct Timers<S> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<S>>,
}

impl<S: Clone> Timers<S> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still armed.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Fires `signal` once, `delay` from now.
    pub fn after(&mut self, delay: Duration, signal: S) -> TimerId {
        self.schedule(delay, None, signal)
    }

    /// Fires `signal` every `period`, first time one period from now.
    pub fn every(&mut self, period: Duration, signal: S) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Some(period), signal)
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>, signal: S) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay,
            period,
            signal,
        });
        id
    }

    /// Returns whether the timer was still armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Pops the earliest signal due at or before `until` and moves the clock
    /// to its due time. Ties fire in scheduling order. Once nothing else is
    /// due the clock is moved to `until` and `None` is returned.
    pub fn pop_due(&mut self, until: Duration) -> Option<S> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i);

        let Some(index) = index else {
            self.now = self.now.max(until);
            return None;
        };

        let entry = &mut self.entries[index];
        self.now = self.now.max(entry.due);
        match entry.period {
            Some(period) => {
                entry.due += period;
                Some(entry.signal.clone())
            }
            None => Some(self.entries.swap_remove(index).signal),
        }
    }
}

impl<S: Clone> Default for Timers<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(timers: &mut Timers<&'static str>, until: Duration) -> Vec<(u64, &'static str)> {
        let mut fired = Vec::new();
        while let Some(s) = timers.pop_due(until) {
            fired.push((timers.now().as_millis() as u64, s));
        }
        fired
    }

    #[test]
    fn one_shots_fire_in_due_order() {
        let mut timers = Timers::new();
        timers.after(ms(30), "c");
        timers.after(ms(10), "a");
        timers.after(ms(20), "b");
        assert_eq!(drain(&mut timers, ms(25)), vec![(10, "a"), (20, "b")]);
        assert_eq!(timers.now(), ms(25));
        assert_eq!(drain(&mut timers, ms(100)), vec![(30, "c")]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn ties_keep_scheduling_order() {
        let mut timers = Timers::new();
        timers.after(ms(5), "first");
        timers.after(ms(5), "second");
        timers.after(ms(5), "third");
        let fired: Vec<_> = drain(&mut timers, ms(5)).into_iter().map(|(_, s)| s).collect();
        assert_eq!(fired, vec!["first", "second", "third"]);
    }

    #[test]
    fn repeating_timer_rearms() {
        let mut timers = Timers::new();
        timers.every(ms(100), "tick");
        assert_eq!(
            drain(&mut timers, ms(350)),
            vec![(100, "tick"), (200, "tick"), (300, "tick")]
        );
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut timers = Timers::new();
        let a = timers.after(ms(10), "a");
        let b = timers.every(ms(10), "b");
        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert!(timers.is_pending(b));
        timers.cancel_all();
        assert!(drain(&mut timers, ms(1000)).is_empty());
        assert_eq!(timers.now(), ms(1000));
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut timers: Timers<&str> = Timers::new();
        assert!(timers.pop_due(ms(50)).is_none());
        assert!(timers.pop_due(ms(20)).is_none());
        assert_eq!(timers.now(), ms(50));
    }
}

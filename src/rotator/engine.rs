use std::time::Duration;

use log::{debug, info, trace};

use crate::engine::Widget;
use crate::rotator::deck::{Card, Deck};
use crate::rotator::pose::{Pose, StackSlot};
use crate::rotator::state::{Outgoing, Phase};
use crate::rotator::timing::Timing;
use crate::timer::{TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Rotate,
    FlyOut,
    SlideBehind,
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Stack(StackSlot),
    Outgoing,
}

/// One card as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<'a> {
    pub card: &'a Card,
    pub kind: LayerKind,
    pub pose: Pose,
    pub transition: Option<Duration>,
    pub z: i32,
    pub alt: String,
}

/// Three-card stack that retires its front card to the back every period.
pub struct DeckRotator {
    deck: Deck,
    timing: Timing,
    alt: String,

    timers: Timers<Signal>,
    interval: Option<TimerId>,
    cycle: Vec<TimerId>,

    outgoing: Option<Outgoing>,
    rotations: u64,
    mounted: bool,
}

impl DeckRotator {
    pub fn new(deck: Deck, timing: Timing, alt: impl Into<String>) -> Self {
        Self {
            deck,
            timing,
            alt: alt.into(),
            timers: Timers::new(),
            interval: None,
            cycle: Vec::new(),
            outgoing: None,
            rotations: 0,
            mounted: false,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn phase(&self) -> Phase {
        self.outgoing.as_ref().map_or(Phase::Idle, Outgoing::phase)
    }

    pub fn outgoing(&self) -> Option<&Outgoing> {
        self.outgoing.as_ref()
    }

    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Timers still armed, the rotation interval included.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Layers in paint order, back-most first.
    pub fn layers(&self) -> Vec<Layer<'_>> {
        let mut stack: Vec<Layer<'_>> = self
            .deck
            .visible()
            .map(|(slot, card)| Layer {
                card,
                kind: LayerKind::Stack(slot),
                pose: Pose::resting(slot),
                transition: Some(self.timing.restack()),
                z: slot.z(),
                alt: match slot {
                    StackSlot::Front => self.alt.clone(),
                    _ => format!("Slideshow image {}", card.key() + 1),
                },
            })
            .collect();

        if let Some(out) = &self.outgoing {
            let phase = out.phase();
            if let (Some(pose), Some(stacking)) = (phase.target_pose(self.deck.back_slot()), phase.stacking()) {
                stack.push(Layer {
                    card: out.card(),
                    kind: LayerKind::Outgoing,
                    pose,
                    transition: phase.transition(&self.timing),
                    z: stacking.z(),
                    alt: format!("Slideshow image {}", out.card().key() + 1),
                });
            }
        }

        stack.sort_by_key(|layer| layer.z);
        stack
    }

    fn clear_cycle(&mut self) {
        for id in self.cycle.drain(..) {
            self.timers.cancel(id);
        }
    }

    fn handle(&mut self, signal: Signal) {
        let now = self.timers.now();
        match signal {
            Signal::Rotate => {
                self.clear_cycle();
                let card = self.deck.rotate();
                self.rotations += 1;
                debug!(
                    "rotation {} at {:?}: card {} to the back, front is now {}",
                    self.rotations,
                    now,
                    card.key(),
                    self.deck.front().key()
                );
                self.outgoing = Some(Outgoing::placed(card, now));
                self.cycle = vec![
                    self.timers.after(self.timing.frame_yield(), Signal::FlyOut),
                    self.timers.after(self.timing.fly_out(), Signal::SlideBehind),
                    self.timers.after(self.timing.total(), Signal::Settle),
                ];
            }
            Signal::FlyOut => self.enter(Phase::FlyingOut, now),
            Signal::SlideBehind => self.enter(Phase::SlidingBehind, now),
            Signal::Settle => {
                trace!("outgoing overlay settled at {:?}", now);
                self.outgoing = None;
                self.cycle.clear();
            }
        }
    }

    fn enter(&mut self, phase: Phase, now: Duration) {
        if let Some(out) = self.outgoing.as_mut() {
            trace!("card {} enters {:?} at {:?}", out.card().key(), phase, now);
            out.enter(phase, now);
        }
    }
}

impl Widget for DeckRotator {
    fn mount(&mut self) {
        if self.mounted {
            return;
        }
        info!(
            "deck mounted with {} cards, rotating every {:?}",
            self.deck.len(),
            self.timing.period()
        );
        self.mounted = true;
        self.interval = Some(self.timers.every(self.timing.period(), Signal::Rotate));
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
        self.interval = None;
        self.cycle.clear();
        self.outgoing = None;
        self.mounted = false;
        info!("deck unmounted after {} rotations", self.rotations);
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Drop for DeckRotator {
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

    fn rotator(n: usize) -> DeckRotator {
        let deck = Deck::from_paths((0..n).map(|i| format!("me{i}.jpg"))).unwrap();
        let mut r = DeckRotator::new(deck, Timing::default(), "Portrait");
        r.mount();
        r
    }

    fn step_to(r: &mut DeckRotator, t: u64) {
        let dt = ms(t) - r.now();
        r.update(dt);
    }

    fn visible_keys(r: &DeckRotator) -> Vec<usize> {
        r.deck().visible().map(|(_, c)| c.key()).collect()
    }

    #[test]
    fn idle_until_first_tick() {
        let mut r = rotator(4);
        step_to(&mut r, 4499);
        assert_eq!(r.phase(), Phase::Idle);
        assert_eq!(r.deck().keys(), vec![0, 1, 2, 3]);
        assert_eq!(r.layers().len(), 3);
    }

    #[test]
    fn four_card_cycle_timeline() {
        let mut r = rotator(4);

        step_to(&mut r, 4500);
        assert_eq!(r.deck().keys(), vec![1, 2, 3, 0]);
        assert_eq!(visible_keys(&r), vec![1, 2, 3]);
        assert_eq!(r.phase(), Phase::Placed);
        assert_eq!(r.outgoing().unwrap().card().key(), 0);

        let layers = r.layers();
        assert_eq!(layers.len(), 4);
        let top = layers.last().unwrap();
        assert_eq!(top.kind, LayerKind::Outgoing);
        assert_eq!(top.pose, Pose::resting(StackSlot::Front));
        assert_eq!(top.transition, None);

        // One frame yield after the tick.
        step_to(&mut r, 4515);
        assert_eq!(r.phase(), Phase::Placed);
        step_to(&mut r, 4516);
        assert_eq!(r.phase(), Phase::FlyingOut);
        let top = r.layers().pop().unwrap();
        assert_eq!(top.kind, LayerKind::Outgoing);
        assert_eq!(top.pose, Pose::OFF_STAGE);
        assert_eq!(top.transition, Some(ms(520)));

        step_to(&mut r, 5020);
        assert_eq!(r.phase(), Phase::SlidingBehind);
        assert_eq!(r.outgoing().unwrap().phase_started(), ms(5020));
        let bottom = r.layers().remove(0);
        assert_eq!(bottom.kind, LayerKind::Outgoing);
        assert_eq!(bottom.pose, Pose::resting(StackSlot::Back));
        assert_eq!(bottom.transition, Some(ms(380)));

        step_to(&mut r, 5399);
        assert_eq!(r.phase(), Phase::SlidingBehind);
        step_to(&mut r, 5400);
        assert_eq!(r.phase(), Phase::Idle);
        assert!(r.outgoing().is_none());
        assert_eq!(visible_keys(&r), vec![1, 2, 3]);
        assert_eq!(r.layers().len(), 3);
    }

    #[test]
    fn one_big_step_walks_every_phase() {
        let mut r = rotator(4);
        r.update(ms(10_000));
        assert_eq!(r.rotations(), 2);
        assert_eq!(r.deck().keys(), vec![2, 3, 0, 1]);
        assert_eq!(r.phase(), Phase::Idle);
        assert_eq!(r.pending_timers(), 1);
    }

    #[test]
    fn front_layer_carries_the_alt_text() {
        let mut r = rotator(4);
        step_to(&mut r, 4500);
        let layers = r.layers();
        let front = layers
            .iter()
            .find(|l| l.kind == LayerKind::Stack(StackSlot::Front))
            .unwrap();
        assert_eq!(front.card.key(), 1);
        assert_eq!(front.alt, "Portrait");
        let middle = layers
            .iter()
            .find(|l| l.kind == LayerKind::Stack(StackSlot::Middle))
            .unwrap();
        assert_eq!(middle.alt, "Slideshow image 3");
    }

    #[test]
    fn single_card_deck_keeps_its_card() {
        let mut r = rotator(1);
        step_to(&mut r, 4500);
        assert_eq!(r.deck().keys(), vec![0]);
        assert_eq!(r.outgoing().unwrap().card().key(), 0);
        assert_eq!(r.layers().len(), 2);
        step_to(&mut r, 5020);
        let bottom = r.layers().remove(0);
        assert_eq!(bottom.pose, Pose::resting(StackSlot::Front));
        step_to(&mut r, 5400);
        assert_eq!(r.layers().len(), 1);
    }

    #[test]
    fn unmount_freezes_everything() {
        let mut r = rotator(4);
        step_to(&mut r, 4700);
        assert_eq!(r.phase(), Phase::FlyingOut);
        r.unmount();
        assert_eq!(r.pending_timers(), 0);
        assert_eq!(r.phase(), Phase::Idle);
        let keys = r.deck().keys();
        let now = r.now();
        r.update(ms(60_000));
        assert_eq!(r.deck().keys(), keys);
        assert_eq!(r.now(), now);
        assert_eq!(r.rotations(), 1);
    }

    #[test]
    fn remount_starts_a_fresh_interval() {
        let mut r = rotator(3);
        step_to(&mut r, 4600);
        r.unmount();
        r.mount();
        assert_eq!(r.phase(), Phase::Idle);
        assert_eq!(r.pending_timers(), 1);
        r.update(ms(4499));
        assert_eq!(r.rotations(), 1);
        r.update(ms(1));
        assert_eq!(r.rotations(), 2);
    }

    #[test]
    fn short_period_clears_the_previous_cycle() {
        let deck = Deck::from_paths(["a", "b", "c", "d"]).unwrap();
        let mut r = DeckRotator::new(deck, Timing::from_millis(600, 16, 520, 900).unwrap(), "Portrait");
        r.mount();
        r.update(ms(1200));
        // Second tick at 1200 replaced the cycle started at 600.
        assert_eq!(r.rotations(), 2);
        assert_eq!(r.phase(), Phase::Placed);
        assert_eq!(r.outgoing().unwrap().card().key(), 1);
        assert_eq!(r.pending_timers(), 4);
        r.update(ms(16));
        assert_eq!(r.phase(), Phase::FlyingOut);
    }

    #[test]
    fn double_mount_keeps_one_interval() {
        let mut r = rotator(2);
        r.mount();
        assert_eq!(r.pending_timers(), 1);
    }
}

use std::time::Duration;

use crate::rotator::deck::Card;
use crate::rotator::pose::{Pose, StackSlot};
use crate::rotator::timing::Timing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Idle,          // No outgoing overlay
    Placed,        // Overlay pinned on the front pose, no transition yet
    FlyingOut,     // Overlay heading off-stage to the left
    SlidingBehind, // Overlay under the stack, gliding to the back pose
}

/// Whether the outgoing overlay is painted over or under the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stacking {
    Above,
    Below,
}

impl Stacking {
    pub fn z(self) -> i32 {
        match self {
            Stacking::Above => 40,
            Stacking::Below => 0,
        }
    }
}

impl Phase {
    /// Pose the overlay is heading to. `back` is the deck's last visible slot.
    pub fn target_pose(self, back: StackSlot) -> Option<Pose> {
        match self {
            Phase::Idle => None,
            Phase::Placed => Some(Pose::resting(StackSlot::Front)),
            Phase::FlyingOut => Some(Pose::OFF_STAGE),
            Phase::SlidingBehind => Some(Pose::resting(back)),
        }
    }

    pub fn stacking(self) -> Option<Stacking> {
        match self {
            Phase::Idle => None,
            Phase::Placed | Phase::FlyingOut => Some(Stacking::Above),
            Phase::SlidingBehind => Some(Stacking::Below),
        }
    }

    /// Length of the transition toward `target_pose`; `None` snaps.
    pub fn transition(self, timing: &Timing) -> Option<Duration> {
        match self {
            Phase::Idle | Phase::Placed => None,
            Phase::FlyingOut => Some(timing.fly_out()),
            Phase::SlidingBehind => Some(timing.slide_behind()),
        }
    }
}

/// Overlay of the card that just left the front. The card itself is already
/// at the back of the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    card: Card,
    phase: Phase,
    phase_started: Duration,
    cycle_started: Duration,
}

impl Outgoing {
    pub fn placed(card: Card, now: Duration) -> Self {
        Self {
            card,
            phase: Phase::Placed,
            phase_started: now,
            cycle_started: now,
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_started(&self) -> Duration {
        self.phase_started
    }

    pub fn cycle_started(&self) -> Duration {
        self.cycle_started
    }

    pub fn enter(&mut self, phase: Phase, now: Duration) {
        self.phase = phase;
        self.phase_started = now;
    }
}

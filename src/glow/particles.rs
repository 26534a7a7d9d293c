use std::time::Duration;

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::*;
use crate::engine::Widget;
use crate::glow::pointer::Point;
use crate::timer::{TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Signal {
    Spawn(Point),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSettings {
    pub count: usize,
    pub stagger: Duration,
    pub spread: f32,
    pub min_life: Duration,
    pub max_life: Duration,
    pub retire: Duration,
}

impl Default for BurstSettings {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            stagger: Duration::from_millis(PARTICLE_STAGGER_MS),
            spread: PARTICLE_SPREAD,
            min_life: Duration::from_millis(PARTICLE_MIN_LIFE_MS),
            max_life: Duration::from_millis(PARTICLE_MAX_LIFE_MS),
            retire: Duration::from_millis(PARTICLE_RETIRE_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub origin: Point,
    pub drift: Point,
    life: Duration,
    elapsed: Duration,
    retired: Option<Duration>,
}

impl Particle {
    /// Linear progress of the flight, 0 to 1.
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f32() / self.life.as_secs_f32()).min(1.0)
    }

    /// Linear progress of the shrink-out once the pointer has left.
    pub fn retire_progress(&self, retire: Duration) -> Option<f32> {
        self.retired
            .map(|r| (r.as_secs_f32() / retire.as_secs_f32()).min(1.0))
    }

    pub fn life(&self) -> Duration {
        self.life
    }

    fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        if let Some(r) = self.retired.as_mut() {
            *r += dt;
        }
    }

    fn is_finished(&self, retire: Duration) -> bool {
        self.elapsed >= self.life || self.retired.is_some_and(|r| r >= retire)
    }
}

/// Particles thrown out from the pointer when it first enters the grid.
///
/// Owned by one grid; nothing is shared between instances.
pub struct ParticleBurst {
    settings: BurstSettings,
    rng: StdRng,

    hovered: bool,
    particles: Vec<Particle>,

    timers: Timers<Signal>,
    pending: Vec<TimerId>,
    mounted: bool,
}

impl ParticleBurst {
    pub fn new(settings: BurstSettings) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(rand::random()))
    }

    pub fn seeded(settings: BurstSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: BurstSettings, rng: StdRng) -> Self {
        Self {
            settings,
            rng,
            hovered: false,
            particles: Vec::new(),
            timers: Timers::new(),
            pending: Vec::new(),
            mounted: false,
        }
    }

    pub fn settings(&self) -> &BurstSettings {
        &self.settings
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Spawns still waiting for their stagger delay.
    pub fn pending_spawns(&self) -> usize {
        self.pending.iter().filter(|id| self.timers.is_pending(**id)).count()
    }

    /// `at` is relative to the grid. Only the first move after entering
    /// starts a burst.
    pub fn pointer_moved(&mut self, at: Point) {
        if !self.mounted || self.hovered {
            return;
        }
        self.hovered = true;
        trace!("particle burst at {:?}", at);
        self.pending = (0..self.settings.count)
            .map(|i| self.timers.after(self.settings.stagger * i as u32, Signal::Spawn(at)))
            .collect();
    }

    pub fn pointer_left(&mut self) {
        if !self.mounted {
            return;
        }
        self.hovered = false;
        for id in self.pending.drain(..) {
            self.timers.cancel(id);
        }
        for particle in self.particles.iter_mut() {
            particle.retired.get_or_insert(Duration::ZERO);
        }
    }

    fn spawn(&mut self, origin: Point, elapsed: Duration) {
        let spread = self.settings.spread;
        let drift = Point::new(
            self.rng.random_range(-spread..=spread),
            self.rng.random_range(-spread..=spread),
        );
        let life = if self.settings.max_life > self.settings.min_life {
            self.rng.random_range(self.settings.min_life..self.settings.max_life)
        } else {
            self.settings.min_life
        };
        self.particles.push(Particle {
            origin,
            drift,
            life,
            elapsed,
            retired: None,
        });
    }
}

impl Default for ParticleBurst {
    fn default() -> Self {
        Self::new(BurstSettings::default())
    }
}

impl Widget for ParticleBurst {
    fn mount(&mut self) {
        self.mounted = true;
    }

    fn update(&mut self, dt: Duration) {
        if !self.mounted {
            return;
        }
        for particle in self.particles.iter_mut() {
            particle.advance(dt);
        }

        let until = self.timers.now() + dt;
        while let Some(Signal::Spawn(origin)) = self.timers.pop_due(until) {
            let late = until - self.timers.now();
            self.spawn(origin, late);
        }
        self.pending.retain(|id| self.timers.is_pending(*id));

        let retire = self.settings.retire;
        self.particles.retain(|p| !p.is_finished(retire));
    }

    fn unmount(&mut self) {
        self.timers.cancel_all();
        self.pending.clear();
        self.particles.clear();
        self.hovered = false;
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Drop for ParticleBurst {
    fn drop(&mut self) {
        self.unmount();
    }
}

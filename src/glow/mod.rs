//! Pointer-reactive decoration: card glow, trailing spotlight, grid veil,
//! particle bursts and the dot-grid falloff. Measurement (where the element is) stays
//! with the caller; everything here works on plain points and rectangles.

pub mod card;
pub mod particles;
pub mod pointer;
pub mod spotlight;
pub mod veil;

pub use card::GlowCard;
pub use particles::{BurstSettings, Particle, ParticleBurst};
pub use pointer::{Point, Rect, falloff, relative_offset};
pub use spotlight::Spotlight;
pub use veil::Veil;

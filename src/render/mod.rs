//! raylib drawing of the stage. Everything here reads widget state; nothing
//! here changes it.

pub mod deck;
pub mod glow;
pub mod typing;

use raylib::prelude::*;

use crate::constants::*;
use crate::glow::{GlowCard, ParticleBurst, Rect, Spotlight, Veil};
use crate::rotator::DeckRotator;
use crate::typing::TypingEffect;

use self::deck::DeckView;

pub const BACKGROUND: Color = Color::new(8, 10, 14, 255);
pub const ACCENT: Color = Color::new(64, 255, 170, 255);
pub const PARTICLE: Color = Color::new(132, 0, 255, 255);
pub const BORDER: Color = Color::new(255, 255, 255, 26);
pub const CAPTION: Color = Color::new(148, 163, 184, 255);
pub const TEXT: Color = Color::new(203, 213, 225, 255);

/// `color` with its alpha scaled by `opacity`.
pub fn tint(color: Color, opacity: f32) -> Color {
    Color::new(
        color.r,
        color.g,
        color.b,
        (color.a as f32 * opacity.clamp(0.0, 1.0)) as u8,
    )
}

/// Widgets drawn in one frame.
pub struct Scene<'a> {
    pub rotator: &'a DeckRotator,
    pub typing: &'a TypingEffect,
    pub glow: &'a GlowCard,
    pub burst: &'a ParticleBurst,
    pub spotlight: &'a Spotlight,
    pub veil: &'a Veil,
}

pub struct Stage {
    deck: DeckView,
    panel: Rect,
}

impl Stage {
    pub fn new(textures: Vec<Option<Texture2D>>) -> Self {
        let deck_anchor = Vector2::new(140.0, (RENDER_HEIGHT as f32 - CARD_HEIGHT) * 0.5 - 24.0);
        Self {
            deck: DeckView::new(textures, deck_anchor),
            panel: Rect::new(620.0, 200.0, 560.0, 320.0),
        }
    }

    /// Glow card bounds in stage coordinates.
    pub fn panel(&self) -> Rect {
        self.panel
    }

    pub fn update(&mut self, rotator: &DeckRotator, dt: f32) {
        self.deck.update(rotator, dt);
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, scene: &Scene) {
        d.clear_background(BACKGROUND);
        glow::draw_dot_grid(d, scene.spotlight, scene.veil);
        self.deck.draw(d, scene.rotator);
        glow::draw_glow_card(d, self.panel, scene.glow);
        typing::draw_typing(d, self.panel, scene.typing);
        glow::draw_particles(d, self.panel, scene.burst);
    }
}

use raylib::prelude::*;

use crate::constants::*;
use crate::glow::{GlowCard, ParticleBurst, Point, Rect, Spotlight, Veil, falloff};
use crate::render::{ACCENT, BORDER, PARTICLE, tint};

pub fn draw_dot_grid(d: &mut RaylibDrawHandle, spotlight: &Spotlight, veil: &Veil) {
    let light = spotlight.position();
    let lifted = 1.0 - veil.opacity();
    let dim = Color::new(60, 66, 80, 255);

    let mut y = DOT_SPACING * 0.5;
    while y < RENDER_HEIGHT as f32 {
        let mut x = DOT_SPACING * 0.5;
        while x < RENDER_WIDTH as f32 {
            let glow = falloff(light.distance(Point::new(x, y)), SPOTLIGHT_RADIUS) * lifted;
            let color = if glow > 0.0 {
                mix(dim, ACCENT, glow)
            } else {
                dim
            };
            d.draw_circle_v(Vector2::new(x, y), 1.5 + glow * 1.5, color);
            x += DOT_SPACING;
        }
        y += DOT_SPACING;
    }
}

pub fn draw_glow_card(d: &mut RaylibDrawHandle, rect: Rect, card: &GlowCard) {
    d.draw_rectangle_rec(
        Rectangle::new(rect.x, rect.y, rect.width, rect.height),
        Color::new(16, 18, 24, 235),
    );

    if card.is_active() {
        let at = card.position();
        d.draw_circle_gradient(
            (rect.x + at.x) as i32,
            (rect.y + at.y) as i32,
            rect.height * 0.6,
            tint(ACCENT, 0.35),
            tint(ACCENT, 0.0),
        );
    }

    d.draw_rectangle_lines_ex(
        Rectangle::new(rect.x, rect.y, rect.width, rect.height),
        2.0,
        if card.is_active() { tint(ACCENT, 0.8) } else { BORDER },
    );
}

pub fn draw_particles(d: &mut RaylibDrawHandle, rect: Rect, burst: &ParticleBurst) {
    let retire = burst.settings().retire;
    for particle in burst.particles() {
        let t = particle.progress();
        let moved = ease::quad_out(t, 0.0, 1.0, 1.0);

        // Shrinks to nothing once the pointer has left
        let fade = particle
            .retire_progress(retire)
            .map_or(1.0, |r| (1.0 - ease::back_in(r, 0.0, 1.0, 1.0)).clamp(0.0, 1.0));

        let scale = moved * fade;
        let opacity = (1.0 - moved) * fade;
        if scale <= 0.0 || opacity <= 0.0 {
            continue;
        }

        let center = Vector2::new(
            rect.x + particle.origin.x + particle.drift.x * moved,
            rect.y + particle.origin.y + particle.drift.y * moved,
        );
        d.draw_circle_v(center, 6.0 * scale, tint(PARTICLE, opacity * 0.6));
        d.draw_circle_v(center, 2.0 * scale, tint(PARTICLE, opacity));
    }
}

fn mix(a: Color, b: Color, t: f32) -> Color {
    let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    Color::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b), channel(a.a, b.a))
}

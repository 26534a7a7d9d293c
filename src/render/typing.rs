use raylib::prelude::*;

use crate::glow::Rect;
use crate::render::TEXT;
use crate::typing::{TypingEffect, wrap};

const FONT_SIZE: i32 = 24;
const LINE_HEIGHT: f32 = 34.0;
const PADDING: f32 = 32.0;

pub fn draw_typing(d: &mut RaylibDrawHandle, rect: Rect, typing: &TypingEffect) {
    // Default font is roughly half as wide as it is tall
    let columns = ((rect.width - PADDING * 2.0) / (FONT_SIZE as f32 * 0.55)) as usize;
    let mut lines = wrap(typing.displayed(), columns);
    if typing.cursor_visible()
        && let Some(last) = lines.last_mut()
    {
        last.push('|');
    }

    for (i, line) in lines.iter().enumerate() {
        d.draw_text(
            line,
            (rect.x + PADDING) as i32,
            (rect.y + PADDING + i as f32 * LINE_HEIGHT) as i32,
            FONT_SIZE,
            TEXT,
        );
    }
}

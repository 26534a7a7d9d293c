use std::collections::HashMap;

use raylib::prelude::*;

use crate::constants::*;
use crate::images::cover_crop;
use crate::render::{BORDER, CAPTION, tint};
use crate::rotator::{DeckRotator, Layer, LayerKind, Pose, StackSlot};

/// Pose a layer is currently drawn at, easing toward its target.
struct Animated {
    from: Pose,
    to: Pose,
    elapsed: f32,
    duration: f32,
}

impl Animated {
    fn current(&self) -> Pose {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ease::cubic_out(self.elapsed.min(self.duration), 0.0, 1.0, self.duration);
        self.from.lerp(&self.to, t)
    }
}

/// Draws the rotator's layers, turning each target pose change into a tween.
pub struct DeckView {
    textures: Vec<Option<Texture2D>>,
    anchor: Vector2, // top-left of the front card
    animated: HashMap<(usize, bool), Animated>,
}

impl DeckView {
    pub fn new(textures: Vec<Option<Texture2D>>, anchor: Vector2) -> Self {
        Self {
            textures,
            anchor,
            animated: HashMap::new(),
        }
    }

    pub fn update(&mut self, rotator: &DeckRotator, dt: f32) {
        for anim in self.animated.values_mut() {
            anim.elapsed += dt;
        }

        let layers = rotator.layers();
        for layer in layers.iter() {
            let key = Self::key(layer);
            let duration = layer.transition.map_or(0.0, |d| d.as_secs_f32());
            match self.animated.get_mut(&key) {
                Some(anim) if anim.to != layer.pose => {
                    anim.from = anim.current();
                    anim.to = layer.pose;
                    anim.elapsed = 0.0;
                    anim.duration = duration;
                }
                Some(_) => {}
                None => {
                    self.animated.insert(
                        key,
                        Animated {
                            from: layer.pose,
                            to: layer.pose,
                            elapsed: 0.0,
                            duration: 0.0,
                        },
                    );
                }
            }
        }
        self.animated
            .retain(|key, _| layers.iter().any(|layer| Self::key(layer) == *key));
    }

    fn key(layer: &Layer) -> (usize, bool) {
        (layer.card.key(), layer.kind == LayerKind::Outgoing)
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, rotator: &DeckRotator) {
        let layers = rotator.layers();
        for layer in layers.iter() {
            let pose = self
                .animated
                .get(&Self::key(layer))
                .map_or(layer.pose, Animated::current);
            self.draw_card(d, layer, pose);
        }

        if let Some(front) = layers
            .iter()
            .find(|layer| layer.kind == LayerKind::Stack(StackSlot::Front))
        {
            d.draw_text(
                &front.alt,
                self.anchor.x as i32,
                (self.anchor.y + CARD_HEIGHT + 48.0) as i32,
                20,
                CAPTION,
            );
        }
    }

    fn draw_card(&self, d: &mut RaylibDrawHandle, layer: &Layer, pose: Pose) {
        let width = CARD_WIDTH * pose.scale;
        let height = CARD_HEIGHT * pose.scale;
        let center = Vector2::new(
            self.anchor.x + CARD_WIDTH * 0.5 + pose.offset_x,
            self.anchor.y + CARD_HEIGHT * 0.5 + pose.offset_y,
        );

        // Border frame, rotated with the card
        d.draw_rectangle_pro(
            Rectangle::new(center.x, center.y, width + 4.0, height + 4.0),
            Vector2::new((width + 4.0) * 0.5, (height + 4.0) * 0.5),
            pose.rotation,
            tint(BORDER, pose.opacity),
        );

        let dest = Rectangle::new(center.x, center.y, width, height);
        let origin = Vector2::new(width * 0.5, height * 0.5);

        match self.textures.get(layer.card.key()).and_then(Option::as_ref) {
            Some(texture) => {
                let (x, y, w, h) = cover_crop(
                    texture.width() as f32,
                    texture.height() as f32,
                    CARD_WIDTH / CARD_HEIGHT,
                );
                d.draw_texture_pro(
                    texture,
                    Rectangle::new(x, y, w, h),
                    dest,
                    origin,
                    pose.rotation,
                    tint(Color::WHITE, pose.opacity),
                );
            }
            None => {
                // Image failed to load: placeholder with the alt text
                d.draw_rectangle_pro(dest, origin, pose.rotation, tint(Color::new(30, 34, 40, 255), pose.opacity));
                d.draw_text(
                    &layer.alt,
                    (center.x - width * 0.5 + 16.0) as i32,
                    (center.y - 10.0) as i32,
                    18,
                    tint(CAPTION, pose.opacity),
                );
            }
        }
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use raylib::prelude::*;

use crate::images::{Orientation, extension, read_orientation};
use crate::rotator::Deck;

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read {}", image_path.display()))?;

    let orientation = read_orientation(&file_bytes, image_path);

    // Extension hint for decoding from memory
    let mut image = Image::load_image_from_mem(&format!(".{}", extension(image_path)), &file_bytes)
        .map_err(|e| anyhow!("failed to decode {}: {}", image_path.display(), e))?;

    match orientation {
        Orientation::HalfTurn => {
            image.rotate_cw();
            image.rotate_cw();
        }
        Orientation::QuarterCw => image.rotate_cw(),
        Orientation::QuarterCcw => image.rotate_ccw(),
        Orientation::Normal => {}
    }
    if orientation != Orientation::Normal {
        debug!("applied {:?} to {}", orientation, image_path.display());
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture for {}: {}", image_path.display(), e))?;

    // CPU copy is no longer needed once uploaded
    drop(image);

    Ok(texture)
}

/// One slot per card key. Cards that fail to load keep an empty slot and are
/// drawn as placeholders. The priority card is decoded first.
pub fn load_deck_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    deck: &Deck,
) -> Vec<Option<Texture2D>> {
    let slots = deck.cards().iter().map(|card| card.key() + 1).max().unwrap_or(0);
    let mut textures: Vec<Option<Texture2D>> = (0..slots).map(|_| None).collect();

    let mut order: Vec<_> = deck.cards().iter().collect();
    order.sort_by_key(|card| !card.priority());

    for card in order {
        match load_texture_with_exif_rotation(rl, thread, card.image()) {
            Ok(texture) => textures[card.key()] = Some(texture),
            Err(e) => warn!("card {} falls back to its alt text: {:#}", card.key(), e),
        }
    }
    textures
}

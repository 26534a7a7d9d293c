use std::path::PathBuf;

use crate::constants::VISIBLE_DEPTH;
use crate::error::{Error, Result};
use crate::rotator::pose::StackSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    key: usize,
    image: PathBuf,
}

impl Card {
    pub fn new(key: usize, image: impl Into<PathBuf>) -> Self {
        Self {
            key,
            image: image.into(),
        }
    }

    pub fn key(&self) -> usize {
        self.key
    }

    pub fn image(&self) -> &PathBuf {
        &self.image
    }

    /// The first configured image is decoded before the others.
    pub fn priority(&self) -> bool {
        self.key == 0
    }
}

/// Cards front to back. Only ever changes by sending the front card to the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(Error::EmptyDeck);
        }
        Ok(Self { cards })
    }

    /// Keys follow the order of `paths`.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(
            paths
                .into_iter()
                .enumerate()
                .map(|(key, path)| Card::new(key, path))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn front(&self) -> &Card {
        &self.cards[0]
    }

    /// Moves the front card to the back and returns a snapshot of it.
    pub fn rotate(&mut self) -> Card {
        self.cards.rotate_left(1);
        self.cards[self.cards.len() - 1].clone()
    }

    /// Resting stack: at most `VISIBLE_DEPTH` cards with their slot.
    pub fn visible(&self) -> impl Iterator<Item = (StackSlot, &Card)> {
        StackSlot::ALL
            .into_iter()
            .zip(self.cards.iter().take(VISIBLE_DEPTH))
    }

    /// Slot an outgoing card settles into.
    pub fn back_slot(&self) -> StackSlot {
        StackSlot::ALL[self.cards.len().min(VISIBLE_DEPTH) - 1]
    }

    pub fn keys(&self) -> Vec<usize> {
        self.cards.iter().map(Card::key).collect()
    }
}

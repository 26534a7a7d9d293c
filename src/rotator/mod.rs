//! Card-deck image rotator.
//!
//! Every period the front card is sent to the back of the deck at once, then
//! a copy of it plays a two-phase exit over the stack: it flies out to the
//! left, drops under the remaining cards and glides into the back pose.
//! Poses are a pure function of the phase; timers only decide when the phase
//! changes.

pub mod deck;
pub mod engine;
pub mod pose;
pub mod state;
pub mod timing;

pub use deck::{Card, Deck};
pub use engine::{DeckRotator, Layer, LayerKind};
pub use pose::{Pose, StackSlot};
pub use state::{Outgoing, Phase, Stacking};
pub use timing::Timing;

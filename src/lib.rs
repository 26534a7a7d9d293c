pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod glow;
pub mod images;
pub mod rotator;
pub mod timer;
pub mod typing;

#[cfg(feature = "window")]
pub mod ffmpeg;
#[cfg(feature = "window")]
pub mod render;
#[cfg(feature = "window")]
pub mod texture_loader;

pub use engine::Widget;
pub use error::{Error, Result};

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::glow::BurstSettings;
use crate::rotator::Timing;
use crate::typing::TypingTiming;

#[derive(Parser, Debug, Clone)]
#[command(name = "photodeck", version, about = "Animated photo deck with typewriter and glow effects")]
pub struct Cli {
    /// Directory holding the deck images
    pub images: PathBuf,

    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Alt text shown for the front card
    #[arg(long)]
    pub alt: Option<String>,

    /// Time between two rotations, in milliseconds
    #[arg(long)]
    pub period_ms: Option<u64>,

    /// Record the stage into this video file (needs ffmpeg)
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Length of the recording, in seconds
    #[arg(long, default_value_t = 30.0)]
    pub record_seconds: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub alt: String,
    pub deck: DeckSettings,
    pub typing: TypingSettings,
    pub glow: GlowSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeckSettings {
    pub period_ms: u64,
    pub frame_yield_ms: u64,
    pub fly_out_ms: u64,
    pub transition_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypingSettings {
    pub paragraphs: Vec<String>,
    pub char_interval_ms: u64,
    pub hold_ms: u64,
    pub blink_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlowSettings {
    pub particles: bool,
    pub particle_count: usize,
    pub stagger_ms: u64,
    pub flash_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alt: "Portrait".to_string(),
            deck: DeckSettings::default(),
            typing: TypingSettings::default(),
            glow: GlowSettings::default(),
        }
    }
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            period_ms: ROTATION_PERIOD_MS,
            frame_yield_ms: FRAME_YIELD_MS,
            fly_out_ms: FLY_OUT_MS,
            transition_ms: TRANSITION_MS,
        }
    }
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            paragraphs: vec![
                "Photos rotate to the back of the deck every few seconds.".to_string(),
                "Move the pointer over this card to light it up, or click to flash it.".to_string(),
            ],
            char_interval_ms: CHAR_INTERVAL_MS,
            hold_ms: HOLD_AFTER_TYPING_MS,
            blink_ms: CURSOR_BLINK_MS,
        }
    }
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            particles: true,
            particle_count: PARTICLE_COUNT,
            stagger_ms: PARTICLE_STAGGER_MS,
            flash_ms: FLASH_MS,
        }
    }
}

impl Settings {
    /// Defaults, then the optional file, then `PHOTODECK_*` variables
    /// (`PHOTODECK_DECK__PERIOD_MS=3000`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("PHOTODECK")
                .prefix_separator("_")
                .separator("__")
                .list_separator("|")
                .with_list_parse_key("typing.paragraphs")
                .try_parsing(true),
        );
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Command line flags win over every other source.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(alt) = &cli.alt {
            self.alt = alt.clone();
        }
        if let Some(period) = cli.period_ms {
            self.deck.period_ms = period;
        }
    }

    pub fn timing(&self) -> Result<Timing> {
        Timing::from_millis(
            self.deck.period_ms,
            self.deck.frame_yield_ms,
            self.deck.fly_out_ms,
            self.deck.transition_ms,
        )
    }

    pub fn typing_timing(&self) -> TypingTiming {
        TypingTiming {
            char_interval: Duration::from_millis(self.typing.char_interval_ms),
            hold: Duration::from_millis(self.typing.hold_ms),
            blink: Duration::from_millis(self.typing.blink_ms),
        }
    }

    pub fn burst(&self) -> BurstSettings {
        BurstSettings {
            count: if self.glow.particles { self.glow.particle_count } else { 0 },
            stagger: Duration::from_millis(self.glow.stagger_ms),
            ..BurstSettings::default()
        }
    }

    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.glow.flash_ms)
    }

    pub fn paragraphs(&self) -> Result<&[String]> {
        if self.typing.paragraphs.is_empty() {
            return Err(Error::NoParagraphs);
        }
        Ok(&self.typing.paragraphs)
    }
}

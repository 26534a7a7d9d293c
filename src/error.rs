use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("a deck needs at least one image")]
    EmptyDeck,
    #[error("the typewriter needs at least one paragraph")]
    NoParagraphs,
    #[error("rotation period must be longer than zero")]
    ZeroPeriod,
    #[error("fly-out ({fly_out:?}) must end before the transition does ({total:?})")]
    PhaseOrder { fly_out: Duration, total: Duration },
    #[error("frame yield ({frame_yield:?}) must be shorter than the fly-out ({fly_out:?})")]
    FrameYield {
        frame_yield: Duration,
        fly_out: Duration,
    },
    #[error("no image files found in directory: {}", .0.display())]
    NoImages(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid rotation {0}, expected a multiple of 90 below 360")]
    InvalidRotation(u16),
    #[error("Could not read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Map contains no rows")]
    EmptyMap,
    #[error("Map exceeds {max}x{max} tiles")]
    MapTooLarge { max: Coord },
    #[error("Invalid settings")]
    Settings(#[from] toml::de::Error),
}

pub type Result<T> = core::result::Result<T, GameError>;

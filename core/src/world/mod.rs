//! The exploration map: terrain, switch and door wiring, and the player.

pub use circuit::*;
pub use player::*;
pub use tilemap::*;

mod circuit;
mod player;
mod tilemap;

use serde::{Deserialize, Serialize};

use crate::*;

pub const TILE_PIXELS: i32 = 32;
pub const VIEWPORT_PIXELS: (i32, i32) = (256, 320);

/// Everything a renderer may draw for one frame, borrowed from the session.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub state: GameState,
    /// Top-left of the viewport in world pixels, screen shake included
    pub camera: (i32, i32),
    pub menu: MenuItem,
    pub level_select: LevelSelect,
    pub level: &'a Level,
    pub player: &'a Player,
    pub circuits: &'a CircuitNetwork,
    pub dialogue: &'a Dialogue,
    pub puzzle: &'a PuzzleController,
    pub effects: &'a Effects,
}

/// Centres the viewport on `player`, clamped to the map, then adds `shake`.
pub fn camera_offset(player: Coord2, map_size: Coord2, shake: (i32, i32)) -> (i32, i32) {
    fn axis(position: Coord, tiles: Coord, view: i32) -> i32 {
        let world = i32::from(tiles) * TILE_PIXELS;
        let centered = i32::from(position) * TILE_PIXELS + TILE_PIXELS / 2 - view / 2;
        centered.clamp(0, (world - view).max(0))
    }

    (
        axis(player.0, map_size.0, VIEWPORT_PIXELS.0) + shake.0,
        axis(player.1, map_size.1, VIEWPORT_PIXELS.1) + shake.1,
    )
}

/// Serializable summary of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub level: u8,
    pub flags: SessionFlags,
    pub player: Coord2,
    pub last_result: PuzzleResult,
    pub puzzle_complete: bool,
    pub open_doors: Vec<Coord2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_is_clamped_to_map_edges() {
        assert_eq!(camera_offset((0, 0), (20, 15), (0, 0)), (0, 0));
        assert_eq!(camera_offset((19, 14), (20, 15), (0, 0)), (384, 160));
    }

    #[test]
    fn camera_centres_player_and_adds_shake() {
        assert_eq!(camera_offset((10, 7), (20, 15), (0, 0)), (208, 80));
        assert_eq!(camera_offset((10, 7), (20, 15), (3, -2)), (211, 78));
    }

    #[test]
    fn small_maps_pin_camera_to_origin() {
        assert_eq!(camera_offset((2, 2), (4, 4), (0, 0)), (0, 0));
    }
}

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::*;

/// Tile ids at or above this value block movement.
pub const FIRST_SOLID_TILE: u16 = 16;

/// Size of the room generated when no map file can be loaded.
pub const FALLBACK_ROOM_SIZE: Coord2 = (20, 15);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile(pub u16);

impl Tile {
    pub const FLOOR: Self = Self(0);
    pub const WALL: Self = Self(FIRST_SOLID_TILE);

    pub const fn id(self) -> u16 {
        self.0
    }

    pub const fn is_solid(self) -> bool {
        self.0 >= FIRST_SOLID_TILE
    }
}

/// Static terrain of the exploration map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    tiles: Array2<Tile>,
}

impl TileMap {
    /// Parses comma separated tile ids, one map row per line.
    ///
    /// Cells that are not numbers become floor, and short rows are padded
    /// with floor up to the widest row.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<Vec<Tile>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split(',')
                    .map(|cell| Tile(cell.trim().parse().unwrap_or_default()))
                    .collect()
            })
            .collect();

        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GameError::EmptyMap);
        }
        if width > usize::from(Coord::MAX) || height > usize::from(Coord::MAX) {
            return Err(GameError::MapTooLarge { max: Coord::MAX });
        }

        let tiles = Array2::from_shape_fn([width, height], |(x, y)| {
            rows[y].get(x).copied().unwrap_or_default()
        });
        Ok(Self { tiles })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Loads the map at `path`, generating a walled room when it cannot be read.
    pub fn load_or_fallback(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(map) => {
                log::debug!("Loaded {:?} map from {}", map.size(), path.display());
                map
            }
            Err(err) => {
                log::warn!("Using fallback room instead of {}: {}", path.display(), err);
                Self::bordered_room(FALLBACK_ROOM_SIZE)
            }
        }
    }

    /// A floor area enclosed by a one tile wall.
    pub fn bordered_room(size: Coord2) -> Self {
        let [width, height] = size.to_nd_index();
        let tiles = Array2::from_shape_fn([width, height], |(x, y)| {
            if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                Tile::WALL
            } else {
                Tile::FLOOR
            }
        });
        Self { tiles }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.tiles)
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<Tile> {
        self.tiles.get(coords.to_nd_index()).copied()
    }

    /// Anything outside the map counts as solid.
    pub fn is_solid(&self, coords: Coord2) -> bool {
        self.tile_at(coords).is_none_or(Tile::is_solid)
    }

    /// Rows of tiles from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Tile> + '_> + '_ {
        self.tiles.columns().into_iter().map(|row| row.into_iter().copied())
    }
}

impl Index<Coord2> for TileMap {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_rows_and_solidity() {
        let map = TileMap::parse("16,16,16\n16,0,3\n16,16,17\n").unwrap();

        assert_eq!(map.size(), (3, 3));
        assert!(map.is_solid((0, 0)));
        assert!(!map.is_solid((1, 1)));
        assert_eq!(map[(2, 1)], Tile(3));
        assert!(!map.is_solid((2, 1)));
        assert!(map.is_solid((2, 2)));
    }

    #[test]
    fn bad_cells_become_floor() {
        let map = TileMap::parse("16,x,16\n16, ,-4").unwrap();

        assert_eq!(map[(1, 0)], Tile::FLOOR);
        assert_eq!(map[(1, 1)], Tile::FLOOR);
        assert_eq!(map[(2, 1)], Tile::FLOOR);
    }

    #[test]
    fn short_rows_are_padded() {
        let map = TileMap::parse("16,16,16,16\n16\n").unwrap();

        assert_eq!(map.size(), (4, 2));
        assert_eq!(map[(3, 1)], Tile::FLOOR);
    }

    #[test]
    fn empty_text_is_an_error() {
        assert!(matches!(TileMap::parse("\n\n"), Err(GameError::EmptyMap)));
    }

    #[test]
    fn outside_the_map_is_solid() {
        let map = TileMap::parse("0,0\n0,0").unwrap();
        assert!(map.is_solid((2, 0)));
        assert!(map.is_solid((0, 2)));
    }

    #[test]
    fn missing_file_falls_back_to_room() {
        let map = TileMap::load_or_fallback(Path::new("no/such/map.csv"));

        assert_eq!(map.size(), FALLBACK_ROOM_SIZE);
        assert!(map.is_solid((0, 7)));
        assert!(map.is_solid((19, 7)));
        assert!(map.is_solid((7, 14)));
        assert!(!map.is_solid((1, 1)));
        assert!(!map.is_solid((18, 13)));
    }

    #[test]
    fn rows_iterate_top_to_bottom() {
        let map = TileMap::parse("1,2\n3,4").unwrap();

        let rows: Vec<Vec<u16>> = map.rows().map(|row| row.map(Tile::id).collect()).collect();

        assert_eq!(rows, vec![vec![1, 2], vec![3, 4]]);
    }
}

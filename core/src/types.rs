use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Returns the `(x, y)` size of a grid, saturating axes that do not fit a [`Coord`].
pub fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let dim = grid.dim();
    (
        Coord::try_from(dim.0).unwrap_or(Coord::MAX),
        Coord::try_from(dim.1).unwrap_or(Coord::MAX),
    )
}

pub const fn manhattan(a: Coord2, b: Coord2) -> u16 {
    a.0.abs_diff(b.0) as u16 + a.1.abs_diff(b.1) as u16
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Moves one step in `direction`, staying put at the grid edge.
pub fn step_clamped(coords: Coord2, direction: Direction, bounds: Coord2) -> Coord2 {
    apply_delta(coords, direction.delta(), bounds).unwrap_or(coords)
}

pub trait OrthogonalIterExt {
    fn iter_orthogonal(&self, index: Coord2) -> OrthogonalIter;
}

impl<T> OrthogonalIterExt for Array2<T> {
    fn iter_orthogonal(&self, index: Coord2) -> OrthogonalIter {
        OrthogonalIter::new(index, grid_size(self))
    }
}

/// Iterates the 4-connected neighbours of a cell that lie inside the grid.
#[derive(Debug)]
pub struct OrthogonalIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl OrthogonalIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for OrthogonalIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let direction = *Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, direction.delta(), self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_two_orthogonal_neighbors() {
        let grid: Array2<u8> = Array2::default([7, 5]);

        let neighbors: Vec<_> = grid.iter_orthogonal((0, 0)).collect();

        assert_eq!(neighbors, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn interior_has_four_orthogonal_neighbors() {
        let grid: Array2<u8> = Array2::default([7, 5]);

        let neighbors: Vec<_> = grid.iter_orthogonal((3, 2)).collect();

        assert_eq!(neighbors, vec![(3, 1), (3, 3), (2, 2), (4, 2)]);
    }

    #[test]
    fn step_clamped_does_not_wrap() {
        assert_eq!(step_clamped((0, 0), Direction::Left, (7, 5)), (0, 0));
        assert_eq!(step_clamped((6, 4), Direction::Down, (7, 5)), (6, 4));
        assert_eq!(step_clamped((6, 3), Direction::Down, (7, 5)), (6, 4));
    }

    #[test]
    fn manhattan_is_symmetric() {
        assert_eq!(manhattan((1, 4), (3, 1)), 5);
        assert_eq!(manhattan((3, 1), (1, 4)), 5);
    }
}

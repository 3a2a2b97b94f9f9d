use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

/// Minimum number of connected cells, battery included, for a closed circuit.
pub const MIN_CIRCUIT_CELLS: usize = 3;

/// Verdict of the most recent circuit validation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleResult {
    #[default]
    None,
    Correct,
    NoResistor,
    OpenCircuit,
    Inverted,
}

impl PuzzleResult {
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Checks whether the pieces on `grid` form a working circuit.
///
/// Connectivity is purely positional: any non-empty orthogonal neighbour
/// conducts, whatever its kind or rotation. Checks run in a fixed order and
/// the first failing one decides the result.
pub fn validate(grid: &Array2<PuzzleCell>) -> PuzzleResult {
    let (size_x, size_y) = grid_size(grid);
    let mut battery = None;
    let mut has_resistor = false;
    let mut has_led = false;

    for y in 0..size_y {
        for x in 0..size_x {
            match grid[(x, y).to_nd_index()].kind() {
                ComponentKind::Battery => battery = Some((x, y)),
                ComponentKind::Resistor => has_resistor = true,
                ComponentKind::Led => has_led = true,
                _ => {}
            }
        }
    }

    let Some(battery) = battery else {
        log::debug!("Validation: no battery on the board");
        return PuzzleResult::OpenCircuit;
    };

    let visited = trace_from(grid, battery);
    let reached = visited.iter().filter(|&&seen| seen).count();

    let disconnected = grid
        .iter()
        .zip(visited.iter())
        .any(|(cell, &seen)| !cell.is_empty() && !seen);
    if disconnected {
        log::debug!("Validation: some pieces are not connected to the battery");
        return PuzzleResult::OpenCircuit;
    }

    if !has_led {
        return PuzzleResult::OpenCircuit;
    }

    if !has_resistor {
        return PuzzleResult::NoResistor;
    }

    let inverted = grid
        .iter()
        .any(|cell| cell.kind() == ComponentKind::Led && cell.rotation() == Rotation::Deg180);
    if inverted {
        return PuzzleResult::Inverted;
    }

    if reached >= MIN_CIRCUIT_CELLS {
        PuzzleResult::Correct
    } else {
        PuzzleResult::OpenCircuit
    }
}

/// Breadth-first walk over non-empty cells starting at `start`.
fn trace_from(grid: &Array2<PuzzleCell>, start: Coord2) -> Array2<bool> {
    let mut visited: Array2<bool> = Array2::default(grid.raw_dim());
    visited[start.to_nd_index()] = true;
    let mut to_visit = VecDeque::from([start]);

    while let Some(coords) = to_visit.pop_front() {
        for next in grid.iter_orthogonal(coords) {
            if visited[next.to_nd_index()] || grid[next.to_nd_index()].is_empty() {
                continue;
            }
            log::trace!("Traced {:?} -> {:?}", coords, next);
            visited[next.to_nd_index()] = true;
            to_visit.push_back(next);
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::place_kind;
    use ComponentKind::*;

    /// Battery(0,2) Wire(1,2) Resistor(2,2) Led(3,2)
    fn straight_line() -> PuzzleBoard {
        let mut board = PuzzleBoard::with_puzzle(1);
        place_kind(&mut board, Wire, (1, 2));
        place_kind(&mut board, Resistor, (2, 2));
        place_kind(&mut board, Led, (3, 2));
        board
    }

    #[test]
    fn empty_grid_is_open_circuit() {
        let board = PuzzleBoard::new();
        assert_eq!(board.validate(), PuzzleResult::OpenCircuit);
    }

    #[test]
    fn lone_battery_is_open_circuit() {
        let board = PuzzleBoard::with_puzzle(1);
        assert_eq!(board.validate(), PuzzleResult::OpenCircuit);
    }

    #[test]
    fn connected_line_is_correct() {
        assert_eq!(straight_line().validate(), PuzzleResult::Correct);
    }

    #[test]
    fn led_at_180_is_inverted() {
        let mut board = straight_line();
        board.rotate((3, 2)).unwrap();
        board.rotate((3, 2)).unwrap();

        assert_eq!(board.validate(), PuzzleResult::Inverted);
    }

    #[test]
    fn led_at_90_still_counts_as_correct() {
        let mut board = straight_line();
        board.rotate((3, 2)).unwrap();

        assert_eq!(board.validate(), PuzzleResult::Correct);
    }

    #[test]
    fn wire_instead_of_resistor_is_no_resistor() {
        let mut board = PuzzleBoard::with_puzzle(1);
        place_kind(&mut board, Wire, (1, 2));
        place_kind(&mut board, Wire, (2, 2));
        place_kind(&mut board, Led, (3, 2));

        assert_eq!(board.validate(), PuzzleResult::NoResistor);
    }

    #[test]
    fn gap_before_led_is_open_circuit() {
        let mut board = PuzzleBoard::with_puzzle(1);
        place_kind(&mut board, Wire, (1, 2));
        place_kind(&mut board, Resistor, (2, 2));
        place_kind(&mut board, Led, (4, 2));

        assert_eq!(board.validate(), PuzzleResult::OpenCircuit);
    }

    #[test]
    fn missing_led_is_open_circuit_before_no_resistor() {
        let mut board = PuzzleBoard::with_puzzle(1);
        place_kind(&mut board, Wire, (1, 2));
        place_kind(&mut board, Wire, (2, 2));

        assert_eq!(board.validate(), PuzzleResult::OpenCircuit);
    }

    #[test]
    fn disconnection_wins_over_inverted_led() {
        let mut board = straight_line();
        board.rotate((3, 2)).unwrap();
        board.rotate((3, 2)).unwrap();
        place_kind(&mut board, Wire, (6, 0));

        assert_eq!(board.validate(), PuzzleResult::OpenCircuit);
    }

    #[test]
    fn no_resistor_wins_over_inverted_led() {
        let mut board = PuzzleBoard::with_puzzle(1);
        place_kind(&mut board, Led, (1, 2));
        board.rotate((1, 2)).unwrap();
        board.rotate((1, 2)).unwrap();

        assert_eq!(board.validate(), PuzzleResult::NoResistor);
    }

    #[test]
    fn bent_path_is_traced() {
        let mut board = PuzzleBoard::with_puzzle(1);
        place_kind(&mut board, Wire, (0, 1));
        place_kind(&mut board, Resistor, (0, 0));
        place_kind(&mut board, Led, (1, 0));

        assert_eq!(board.validate(), PuzzleResult::Correct);
    }
}

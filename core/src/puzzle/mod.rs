use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use inventory::*;

mod inventory;

/// Width and height of the circuit assembly board.
pub const PUZZLE_SIZE: Coord2 = (7, 5);

pub type PuzzleId = u32;

/// The circuit assembly board: cells, the player's pieces, and the edit cursor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleBoard {
    puzzle_id: PuzzleId,
    grid: Array2<PuzzleCell>,
    inventory: Inventory,
    cursor: Coord2,
}

impl PuzzleBoard {
    /// An empty board that holds no puzzle.
    pub fn new() -> Self {
        Self {
            puzzle_id: 0,
            grid: Array2::default(PUZZLE_SIZE.to_nd_index()),
            inventory: Inventory::new(),
            cursor: (0, 0),
        }
    }

    pub fn with_puzzle(puzzle_id: PuzzleId) -> Self {
        let mut board = Self::new();
        board.load_puzzle(puzzle_id);
        board
    }

    /// Resets the board and seeds the fixed pieces and inventory for `puzzle_id`.
    ///
    /// Unknown ids leave an empty board with an empty inventory.
    pub fn load_puzzle(&mut self, puzzle_id: PuzzleId) {
        self.puzzle_id = puzzle_id;
        self.grid.fill(PuzzleCell::EMPTY);
        self.inventory.clear();
        self.cursor = (0, 0);

        match puzzle_id {
            1 => {
                self.grid[(0, 2).to_nd_index()] = PuzzleCell::fixed(ComponentKind::Battery);
                self.inventory.push(ComponentKind::Wire, 4);
                self.inventory.push(ComponentKind::Resistor, 1);
                self.inventory.push(ComponentKind::Led, 1);
            }
            _ => log::debug!("No layout for puzzle {}, board left empty", puzzle_id),
        }
    }

    pub fn puzzle_id(&self) -> PuzzleId {
        self.puzzle_id
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.grid)
    }

    pub fn grid(&self) -> &Array2<PuzzleCell> {
        &self.grid
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Iterates all cells together with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, &PuzzleCell)> {
        self.grid
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn move_cursor(&mut self, direction: Direction) -> EditOutcome {
        let next = step_clamped(self.cursor, direction, self.size());
        if next == self.cursor {
            EditOutcome::NoChange
        } else {
            self.cursor = next;
            EditOutcome::Changed
        }
    }

    pub fn select_next(&mut self) -> EditOutcome {
        self.inventory.select_next()
    }

    /// Places one piece of the selected inventory kind at `coords`.
    ///
    /// Fixed or occupied cells, an empty selection or an exhausted slot leave
    /// the board untouched.
    pub fn place(&mut self, coords: Coord2) -> Result<EditOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.grid[coords.to_nd_index()];

        if cell.is_fixed() || !cell.is_empty() {
            return Ok(EditOutcome::NoChange);
        }

        Ok(match self.inventory.take_selected() {
            Some(kind) => {
                *cell = PuzzleCell::placed(kind);
                log::trace!("Placed {} at {:?}", kind.label(), coords);
                EditOutcome::Changed
            }
            None => EditOutcome::NoChange,
        })
    }

    /// Turns the piece at `coords` a quarter turn clockwise.
    pub fn rotate(&mut self, coords: Coord2) -> Result<EditOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.grid[coords.to_nd_index()];

        if !cell.is_editable() {
            return Ok(EditOutcome::NoChange);
        }

        cell.rotate();
        Ok(EditOutcome::Changed)
    }

    /// Clears the piece at `coords` and returns it to the inventory.
    ///
    /// When no inventory slot holds the same kind the piece is discarded.
    pub fn remove(&mut self, coords: Coord2) -> Result<EditOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.grid[coords.to_nd_index()];

        if !cell.is_editable() {
            return Ok(EditOutcome::NoChange);
        }

        let kind = cell.kind();
        *cell = PuzzleCell::EMPTY;
        if !self.inventory.give_back(kind) {
            log::debug!("No inventory slot for {}, piece discarded", kind.label());
        }
        Ok(EditOutcome::Changed)
    }

    pub fn place_at_cursor(&mut self) -> Result<EditOutcome> {
        self.place(self.cursor)
    }

    pub fn rotate_at_cursor(&mut self) -> Result<EditOutcome> {
        self.rotate(self.cursor)
    }

    pub fn remove_at_cursor(&mut self) -> Result<EditOutcome> {
        self.remove(self.cursor)
    }

    /// Runs the circuit validator over this board.
    pub fn validate(&self) -> PuzzleResult {
        validate(&self.grid)
    }

    /// Flags every LED on the board as burnt out.
    pub fn mark_leds_burning(&mut self) {
        self.grid
            .iter_mut()
            .filter(|cell| cell.kind() == ComponentKind::Led)
            .for_each(|cell| cell.set_burning(true));
    }

    pub fn clear_burning(&mut self) {
        self.grid.iter_mut().for_each(|cell| cell.set_burning(false));
    }

    pub fn has_burning(&self) -> bool {
        self.grid.iter().any(PuzzleCell::is_burning)
    }
}

impl Default for PuzzleBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord2> for PuzzleBoard {
    type Output = PuzzleCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.grid[coords.to_nd_index()]
    }
}

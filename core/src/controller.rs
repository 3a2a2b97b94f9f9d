use serde::{Deserialize, Serialize};

use crate::*;

/// Input accepted by the puzzle overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleCommand {
    Move(Direction),
    Place,
    Rotate,
    Remove,
    NextItem,
    Validate,
    Cancel,
}

/// What a [`PuzzleCommand`] did. Validation hands its verdict back directly
/// so callers react once per validation instead of watching for changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PuzzleResponse {
    /// The overlay is inactive and ignored the command
    Ignored,
    Edited(EditOutcome),
    Validated(PuzzleResult),
    Cancelled,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PuzzleTiming {
    pub blink_interval: f32,
    pub result_secs: f32,
    pub burn_secs: f32,
}

impl Default for PuzzleTiming {
    fn default() -> Self {
        Settings::default().puzzle_timing()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Timers {
    blink: f32,
    cursor_visible: bool,
    result: f32,
    burn: f32,
}

impl Default for Timers {
    fn default() -> Self {
        Self {
            blink: 0.0,
            cursor_visible: true,
            result: 0.0,
            burn: 0.0,
        }
    }
}

/// Drives the puzzle overlay: owns the board, routes input to it, runs the
/// validator and animates the result banner and burnt LEDs.
#[derive(Clone, Debug)]
pub struct PuzzleController {
    board: PuzzleBoard,
    timing: PuzzleTiming,
    timers: Timers,
    active: bool,
    complete: bool,
    last_result: PuzzleResult,
}

impl PuzzleController {
    pub fn new(timing: PuzzleTiming) -> Self {
        Self {
            board: PuzzleBoard::new(),
            timing,
            timers: Timers::default(),
            active: false,
            complete: false,
            last_result: PuzzleResult::None,
        }
    }

    pub fn load(&mut self, puzzle_id: PuzzleId) {
        self.board.load_puzzle(puzzle_id);
        self.timers = Timers::default();
        self.complete = false;
        self.last_result = PuzzleResult::None;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Closes the overlay after a solve, dropping any leftover feedback.
    pub fn finish(&mut self) {
        self.board.clear_burning();
        self.timers = Timers::default();
        self.deactivate();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn last_result(&self) -> PuzzleResult {
        self.last_result
    }

    pub fn board(&self) -> &PuzzleBoard {
        &self.board
    }

    pub fn cursor_visible(&self) -> bool {
        self.timers.cursor_visible
    }

    /// The result to show as a banner while its display timer runs.
    pub fn result_banner(&self) -> Option<PuzzleResult> {
        (self.timers.result > 0.0 && self.last_result != PuzzleResult::None)
            .then_some(self.last_result)
    }

    /// Brightness of the burning overlay in `0.0..=1.0`, zero when nothing burns.
    pub fn burn_pulse(&self) -> f32 {
        if self.timers.burn > 0.0 {
            (self.timers.burn * 10.0).sin() * 0.5 + 0.5
        } else {
            0.0
        }
    }

    pub fn handle(&mut self, command: PuzzleCommand) -> PuzzleResponse {
        use PuzzleCommand::*;

        if !self.active {
            return PuzzleResponse::Ignored;
        }

        let edit = match command {
            Move(direction) => Ok(self.board.move_cursor(direction)),
            Place => self.board.place_at_cursor(),
            Rotate => self.board.rotate_at_cursor(),
            Remove => self.board.remove_at_cursor(),
            NextItem => Ok(self.board.select_next()),
            Validate => return PuzzleResponse::Validated(self.run_validation()),
            Cancel => {
                self.deactivate();
                return PuzzleResponse::Cancelled;
            }
        };

        PuzzleResponse::Edited(edit.unwrap_or_else(|err| {
            log::warn!("Ignoring puzzle edit: {}", err);
            EditOutcome::NoChange
        }))
    }

    fn run_validation(&mut self) -> PuzzleResult {
        let result = self.board.validate();
        log::debug!("Puzzle {} validated: {:?}", self.board.puzzle_id(), result);

        self.last_result = result;
        self.timers.result = self.timing.result_secs;
        if result == PuzzleResult::NoResistor {
            self.board.mark_leds_burning();
            self.timers.burn = self.timing.burn_secs;
        }
        if result.is_correct() {
            self.complete = true;
        }
        result
    }

    /// Advances the cursor blink, the result banner and the burn animation.
    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        self.timers.blink += dt;
        if self.timers.blink >= self.timing.blink_interval {
            self.timers.blink = 0.0;
            self.timers.cursor_visible = !self.timers.cursor_visible;
        }

        if self.timers.result > 0.0 {
            self.timers.result -= dt;
            if self.timers.result <= 0.0 {
                self.timers.result = 0.0;
                self.timers.burn = 0.0;
                self.board.clear_burning();
            }
        }

        if self.timers.burn > 0.0 {
            self.timers.burn -= dt;
            if self.timers.burn <= 0.0 {
                self.timers.burn = 0.0;
                self.board.clear_burning();
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut PuzzleBoard {
        &mut self.board
    }
}

impl Default for PuzzleController {
    fn default() -> Self {
        Self::new(PuzzleTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::place_kind;
    use ComponentKind::*;

    fn active_puzzle() -> PuzzleController {
        let mut controller = PuzzleController::default();
        controller.load(1);
        controller.activate();
        controller
    }

    fn tick_for(controller: &mut PuzzleController, secs: f32) {
        let steps = (secs / 0.05).round() as usize;
        for _ in 0..steps {
            controller.tick(0.05);
        }
    }

    #[test]
    fn inactive_controller_ignores_input() {
        let mut controller = PuzzleController::default();
        controller.load(1);

        assert_eq!(
            controller.handle(PuzzleCommand::Place),
            PuzzleResponse::Ignored
        );
        assert_eq!(
            controller.handle(PuzzleCommand::Validate),
            PuzzleResponse::Ignored
        );
        assert_eq!(controller.last_result(), PuzzleResult::None);
    }

    #[test]
    fn keyboard_flow_builds_a_working_circuit() {
        use PuzzleCommand::*;
        let mut controller = active_puzzle();

        // cursor to (1, 2)
        controller.handle(Move(Direction::Down));
        controller.handle(Move(Direction::Down));
        controller.handle(Move(Direction::Right));
        controller.handle(Place);
        controller.handle(Move(Direction::Right));
        controller.handle(NextItem);
        controller.handle(Place);
        controller.handle(Move(Direction::Right));
        controller.handle(NextItem);
        controller.handle(Place);

        assert_eq!(
            controller.handle(Validate),
            PuzzleResponse::Validated(PuzzleResult::Correct)
        );
        assert!(controller.is_complete());
        assert_eq!(controller.result_banner(), Some(PuzzleResult::Correct));
    }

    #[test]
    fn no_resistor_burns_leds_until_burn_timer_expires() {
        let mut controller = active_puzzle();
        let board = controller.board_mut();
        place_kind(board, Wire, (1, 2));
        place_kind(board, Wire, (2, 2));
        place_kind(board, Led, (3, 2));

        let response = controller.handle(PuzzleCommand::Validate);

        assert_eq!(response, PuzzleResponse::Validated(PuzzleResult::NoResistor));
        assert!(controller.board()[(3, 2)].is_burning());
        assert!(controller.burn_pulse() >= 0.0);

        tick_for(&mut controller, 1.5);
        assert!(controller.board()[(3, 2)].is_burning());

        tick_for(&mut controller, 0.6);
        assert!(!controller.board().has_burning());
        assert_eq!(controller.burn_pulse(), 0.0);
        assert_eq!(controller.result_banner(), Some(PuzzleResult::NoResistor));

        tick_for(&mut controller, 1.0);
        assert_eq!(controller.result_banner(), None);
        assert_eq!(controller.last_result(), PuzzleResult::NoResistor);
    }

    #[test]
    fn revalidation_overwrites_last_result() {
        let mut controller = active_puzzle();
        assert_eq!(
            controller.handle(PuzzleCommand::Validate),
            PuzzleResponse::Validated(PuzzleResult::OpenCircuit)
        );

        let board = controller.board_mut();
        place_kind(board, Wire, (1, 2));
        place_kind(board, Resistor, (2, 2));
        place_kind(board, Led, (3, 2));

        controller.handle(PuzzleCommand::Validate);
        assert_eq!(controller.last_result(), PuzzleResult::Correct);
    }

    #[test]
    fn cancel_deactivates() {
        let mut controller = active_puzzle();

        assert_eq!(
            controller.handle(PuzzleCommand::Cancel),
            PuzzleResponse::Cancelled
        );
        assert!(!controller.is_active());
    }

    #[test]
    fn cursor_blinks_every_interval() {
        let mut controller = active_puzzle();
        assert!(controller.cursor_visible());

        controller.tick(0.3);
        assert!(controller.cursor_visible());
        controller.tick(0.15);
        assert!(!controller.cursor_visible());
        controller.tick(0.4);
        assert!(controller.cursor_visible());
    }

    #[test]
    fn next_item_wraps_inventory_selection() {
        let mut controller = active_puzzle();
        let len = controller.board().inventory().items().len();

        for _ in 0..len {
            controller.handle(PuzzleCommand::NextItem);
        }

        assert_eq!(controller.board().inventory().selected_index(), 0);
    }

    #[test]
    fn next_item_reports_whether_selection_moved() {
        let mut controller = active_puzzle();
        assert_eq!(
            controller.handle(PuzzleCommand::NextItem),
            PuzzleResponse::Edited(EditOutcome::Changed)
        );

        controller.load(9);
        assert_eq!(
            controller.handle(PuzzleCommand::NextItem),
            PuzzleResponse::Edited(EditOutcome::NoChange)
        );
    }

    #[test]
    fn load_resets_state() {
        let mut controller = active_puzzle();
        controller.handle(PuzzleCommand::Validate);
        controller.handle(PuzzleCommand::Move(Direction::Right));

        controller.load(1);

        assert_eq!(controller.last_result(), PuzzleResult::None);
        assert_eq!(controller.board().cursor(), (0, 0));
        assert_eq!(controller.result_banner(), None);
        assert!(controller.is_active());
    }
}

//! The top-level game state machine.

use serde::{Deserialize, Serialize};

use crate::*;
pub use level::*;
pub use state::*;
pub use view::*;

mod level;
mod state;
mod view;

/// The control surface shared by every state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    /// Place a piece, interact, or pick a menu entry
    Act,
    Rotate,
    Remove,
    Next,
    Validate,
    Cancel,
    Confirm,
}

/// One play session: owns every model and routes input and time to the one
/// that the current [`GameState`] selects.
#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    running: bool,
    menu: MenuItem,
    level_select: LevelSelect,
    level: Level,
    player: Player,
    circuits: CircuitNetwork,
    dialogue: Dialogue,
    puzzle: PuzzleController,
    effects: Effects,
    flags: SessionFlags,
    move_cooldown: f32,
    stepped: bool,
}

impl Session {
    /// Creates a session at the main menu, reading the level map from disk.
    pub fn new(settings: &Settings) -> Self {
        Self::with_level(settings, Level::first(settings))
    }

    pub fn with_level(settings: &Settings, level: Level) -> Self {
        Self {
            state: GameState::MainMenu,
            running: true,
            menu: MenuItem::default(),
            level_select: LevelSelect::new(),
            player: Player::new(level.player_start, settings.player_move_cooldown),
            circuits: level.build_circuits(),
            level,
            dialogue: Dialogue::new(settings.typewriter_delay),
            puzzle: PuzzleController::new(settings.puzzle_timing()),
            effects: Effects::new(settings.effects_seed),
            flags: SessionFlags::default(),
            move_cooldown: settings.player_move_cooldown,
            stepped: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn circuits(&self) -> &CircuitNetwork {
        &self.circuits
    }

    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }

    pub fn puzzle(&self) -> &PuzzleController {
        &self.puzzle
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            state: self.state,
            camera: camera_offset(
                self.player.position(),
                self.level.map.size(),
                self.effects.shake_offset(),
            ),
            menu: self.menu,
            level_select: self.level_select,
            level: &self.level,
            player: &self.player,
            circuits: &self.circuits,
            dialogue: &self.dialogue,
            puzzle: &self.puzzle,
            effects: &self.effects,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            level: self.level.number,
            flags: self.flags,
            player: self.player.position(),
            last_result: self.puzzle.last_result(),
            puzzle_complete: self.puzzle.is_complete(),
            open_doors: self
                .circuits
                .elements()
                .iter()
                .filter(|element| element.is_door() && element.is_active())
                .map(|element| element.position)
                .collect(),
        }
    }

    fn set_state(&mut self, state: GameState, out: &mut Collaborators<'_>) {
        if state == self.state {
            return;
        }
        log::debug!("State {:?} -> {:?}", self.state, state);
        self.state = state;
        if let Some(music) = state.music() {
            out.audio.play_music(music);
        }
    }

    /// Routes one command to the handler of the current state.
    pub fn handle(&mut self, command: Command, out: &mut Collaborators<'_>) {
        if !self.running {
            return;
        }

        match self.state {
            GameState::MainMenu => self.handle_menu(command, out),
            GameState::LevelSelection => self.handle_level_select(command, out),
            GameState::Exploration => self.handle_exploration(command, out),
            GameState::Puzzle => self.handle_puzzle(command, out),
            GameState::Dialogue => self.handle_dialogue(command, out),
            GameState::Victory => self.handle_victory(command),
        }
    }

    /// Advances the current state's timers and the screen effects by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.effects.update(dt);

        match self.state {
            GameState::Exploration => {
                if !self.stepped {
                    self.player.set_moving(false);
                }
                self.player.update(dt);
            }
            GameState::Puzzle => self.puzzle.tick(dt),
            GameState::Dialogue => self.dialogue.tick(dt),
            GameState::MainMenu | GameState::LevelSelection | GameState::Victory => {}
        }
        self.stepped = false;
    }

    fn handle_menu(&mut self, command: Command, out: &mut Collaborators<'_>) {
        match command {
            Command::Move(Direction::Up | Direction::Down) => self.menu = self.menu.toggled(),
            Command::Act | Command::Confirm => match self.menu {
                MenuItem::Start => self.set_state(GameState::LevelSelection, out),
                MenuItem::Quit => {
                    log::info!("Quit from main menu");
                    self.running = false;
                }
            },
            _ => {}
        }
    }

    fn handle_level_select(&mut self, command: Command, out: &mut Collaborators<'_>) {
        match command {
            Command::Move(direction) => {
                self.level_select.move_selection(direction);
            }
            Command::Act | Command::Confirm => {
                let level = self.level_select.selected();
                if LevelSelect::is_unlocked(level) {
                    self.start_level(out);
                } else {
                    log::debug!("Level {} is locked", level);
                }
            }
            Command::Cancel => self.set_state(GameState::MainMenu, out),
            _ => {}
        }
    }

    /// Resets the level to its initial layout and starts exploring.
    fn start_level(&mut self, out: &mut Collaborators<'_>) {
        self.player = Player::new(self.level.player_start, self.move_cooldown);
        self.circuits = self.level.build_circuits();
        self.flags = SessionFlags::default();
        self.set_state(GameState::Exploration, out);
    }

    fn handle_exploration(&mut self, command: Command, out: &mut Collaborators<'_>) {
        match command {
            Command::Move(direction) => {
                let outcome = self.player.try_step(direction, &self.level.map, &self.circuits);
                if outcome.has_moved() {
                    log::trace!("Player at {:?}", self.player.position());
                }
                self.stepped = true;
            }
            Command::Act | Command::Confirm => self.interact(out),
            _ => {}
        }
    }

    /// The primary action: terminal first, then the professor, then switches.
    fn interact(&mut self, out: &mut Collaborators<'_>) {
        let position = self.player.position();

        if self.level.near_terminal(position) {
            let puzzle_id = self.level.puzzle_id;
            if self.flags.first_time_puzzle {
                self.flags.first_time_puzzle = false;
                self.flags.pending_puzzle = Some(puzzle_id);
                self.open_dialogue(TUTORIAL_SCRIPT, out);
            } else {
                self.enter_puzzle(puzzle_id, out);
            }
        } else if self.level.near_npc(position) {
            self.open_dialogue(HINT_SCRIPT, out);
        } else if self.circuits.interact(position) > 0 {
            self.circuits.update();
            self.open_dialogue(SWITCH_SCRIPT, out);
        }
    }

    fn open_dialogue(&mut self, script: &[&str], out: &mut Collaborators<'_>) {
        self.dialogue.show(PROFESSOR, script.iter().copied());
        self.set_state(GameState::Dialogue, out);
    }

    fn enter_puzzle(&mut self, puzzle_id: PuzzleId, out: &mut Collaborators<'_>) {
        self.puzzle.load(puzzle_id);
        self.puzzle.activate();
        self.set_state(GameState::Puzzle, out);
    }

    fn handle_dialogue(&mut self, command: Command, out: &mut Collaborators<'_>) {
        if !matches!(command, Command::Act | Command::Confirm) {
            return;
        }

        if self.dialogue.advance() == AdvanceOutcome::Finished {
            self.finish_dialogue(out);
        }
    }

    fn finish_dialogue(&mut self, out: &mut Collaborators<'_>) {
        if self.flags.puzzle_solved {
            log::info!("{}", VICTORY_TEXT);
            self.set_state(GameState::Victory, out);
        } else if let Some(puzzle_id) = self.flags.pending_puzzle.take() {
            self.enter_puzzle(puzzle_id, out);
        } else {
            self.set_state(GameState::Exploration, out);
        }
    }

    fn handle_puzzle(&mut self, command: Command, out: &mut Collaborators<'_>) {
        let command = match command {
            Command::Move(direction) => PuzzleCommand::Move(direction),
            Command::Act => PuzzleCommand::Place,
            Command::Rotate => PuzzleCommand::Rotate,
            Command::Remove => PuzzleCommand::Remove,
            Command::Next => PuzzleCommand::NextItem,
            Command::Validate => PuzzleCommand::Validate,
            Command::Cancel => PuzzleCommand::Cancel,
            Command::Confirm => return,
        };

        match self.puzzle.handle(command) {
            PuzzleResponse::Validated(result) => self.apply_result(result, out),
            PuzzleResponse::Cancelled => self.set_state(GameState::Exploration, out),
            PuzzleResponse::Edited(outcome) if outcome.has_update() => {
                log::trace!("Board edited, cursor at {:?}", self.puzzle.board().cursor());
            }
            PuzzleResponse::Ignored | PuzzleResponse::Edited(_) => {}
        }
    }

    /// Plays the feedback for a fresh validation and moves on when solved.
    fn apply_result(&mut self, result: PuzzleResult, out: &mut Collaborators<'_>) {
        match result {
            PuzzleResult::Correct => {
                out.audio.play(Sound::Success);
                out.indicator.set_color(IndicatorColor::Green);
                out.indicator.play_pattern(FeedbackPattern::Success);
                self.effects.trigger_flash(Color::GREEN, 0.5);
                self.flags.puzzle_solved = true;
                self.puzzle.finish();
                self.open_dialogue(CONGRATULATION_SCRIPT, out);
            }
            PuzzleResult::NoResistor => {
                out.audio.play(Sound::Explosion);
                out.indicator.set_color(IndicatorColor::Red);
                out.indicator.play_pattern(FeedbackPattern::Error);
                self.effects.trigger_screen_shake(0.5, 8.0);
                self.effects.trigger_smoke(self.level.terminal_center(), 20);
                self.effects.trigger_flash(Color::RED, 0.3);
            }
            PuzzleResult::OpenCircuit => {
                out.audio.play(Sound::Error);
                out.indicator.set_color(IndicatorColor::Yellow);
                out.indicator.play_pattern(FeedbackPattern::Warning);
            }
            PuzzleResult::Inverted => {
                out.audio.play(Sound::Error);
                out.indicator.set_color(IndicatorColor::Blue);
                out.indicator.play_pattern(FeedbackPattern::Error);
                self.effects.trigger_screen_shake(0.3, 4.0);
            }
            PuzzleResult::None => {}
        }
    }

    fn handle_victory(&mut self, command: Command) {
        if matches!(command, Command::Act | Command::Confirm | Command::Cancel) {
            log::info!("Leaving after victory");
            self.running = false;
        }
    }
}

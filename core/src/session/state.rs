use serde::{Deserialize, Serialize};

use crate::*;

/// Number of levels listed on the level selection screen.
pub const LEVEL_COUNT: u8 = 3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    MainMenu,
    LevelSelection,
    Exploration,
    Puzzle,
    Dialogue,
    Victory,
}

impl GameState {
    pub const fn music(self) -> Option<Music> {
        use GameState::*;
        match self {
            MainMenu | LevelSelection => Some(Music::Menu),
            Exploration | Dialogue => Some(Music::Game),
            Puzzle => Some(Music::Puzzle),
            Victory => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuItem {
    #[default]
    Start,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [Self::Start, Self::Quit];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Quit => "Quit",
        }
    }

    /// The other entry; the menu has only two and wraps.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Start => Self::Quit,
            Self::Quit => Self::Start,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSelect {
    selected: u8,
}

impl LevelSelect {
    pub fn new() -> Self {
        Self { selected: 1 }
    }

    pub fn selected(&self) -> u8 {
        self.selected
    }

    pub const fn is_unlocked(level: u8) -> bool {
        level == 1
    }

    /// Moves the highlight, clamped to `1..=LEVEL_COUNT`.
    pub fn move_selection(&mut self, direction: Direction) -> EditOutcome {
        let next = match direction {
            Direction::Left | Direction::Up => self.selected.saturating_sub(1).max(1),
            Direction::Right | Direction::Down => (self.selected + 1).min(LEVEL_COUNT),
        };
        if next == self.selected {
            EditOutcome::NoChange
        } else {
            self.selected = next;
            EditOutcome::Changed
        }
    }
}

impl Default for LevelSelect {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress flags of the running session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    /// Set once the level's puzzle validated as correct, never cleared
    pub puzzle_solved: bool,
    /// Puzzle to open as soon as the current dialogue ends
    pub pending_puzzle: Option<PuzzleId>,
    /// The tutorial still has to play before the first puzzle attempt
    pub first_time_puzzle: bool,
}

impl Default for SessionFlags {
    fn default() -> Self {
        Self {
            puzzle_solved: false,
            pending_puzzle: None,
            first_time_puzzle: true,
        }
    }
}

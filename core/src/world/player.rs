use serde::{Deserialize, Serialize};

use crate::*;

pub const PLAYER_START: Coord2 = (3, 3);

const WALK_FRAMES: u8 = 3;
const IDLE_FRAME: u8 = 1;
const TICKS_PER_FRAME: u8 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    Moved,
    /// Turned to face a solid tile or element
    Blocked,
    /// Still waiting for the movement cooldown
    Cooldown,
}

impl StepOutcome {
    pub const fn has_moved(self) -> bool {
        matches!(self, Self::Moved)
    }
}

/// The player character on the exploration map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    position: Coord2,
    facing: Direction,
    moving: bool,
    frame: u8,
    frame_ticks: u8,
    move_cooldown: f32,
    cooldown_left: f32,
}

impl Player {
    pub fn new(position: Coord2, move_cooldown: f32) -> Self {
        Self {
            position,
            facing: Direction::Down,
            moving: false,
            frame: IDLE_FRAME,
            frame_ticks: 0,
            move_cooldown,
            cooldown_left: 0.0,
        }
    }

    pub fn position(&self) -> Coord2 {
        self.position
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Current walking animation frame.
    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn teleport(&mut self, position: Coord2) {
        self.position = position;
        self.cooldown_left = 0.0;
    }

    /// Moves one tile towards `direction` unless the target is blocked by the
    /// map or a circuit element. The player turns either way.
    pub fn try_step(
        &mut self,
        direction: Direction,
        map: &TileMap,
        circuits: &CircuitNetwork,
    ) -> StepOutcome {
        if self.cooldown_left > 0.0 {
            return StepOutcome::Cooldown;
        }
        self.facing = direction;

        let Some(target) = apply_delta(self.position, direction.delta(), map.size()) else {
            return StepOutcome::Blocked;
        };
        if map.is_solid(target) || circuits.is_solid(target) {
            log::trace!("Step to {:?} blocked", target);
            return StepOutcome::Blocked;
        }

        self.position = target;
        self.moving = true;
        self.cooldown_left = self.move_cooldown;
        StepOutcome::Moved
    }

    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    /// Advances the cooldown and the walking animation by one frame.
    pub fn update(&mut self, dt: f32) {
        self.cooldown_left = (self.cooldown_left - dt).max(0.0);

        if !self.moving {
            self.frame = IDLE_FRAME;
            self.frame_ticks = 0;
            return;
        }

        self.frame_ticks += 1;
        if self.frame_ticks >= TICKS_PER_FRAME {
            self.frame_ticks = 0;
            self.frame = (self.frame + 1) % WALK_FRAMES;
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START, Settings::default().player_move_cooldown)
    }
}

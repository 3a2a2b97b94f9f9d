use crate::*;

pub const PROFESSOR: &str = "Professor Leo";

pub const TUTORIAL_SCRIPT: &[&str] = &[
    "Welcome to the lab! I'm Professor Leo.",
    "This terminal powers the circuit of the exit door.",
    "Place the wire, the resistor and the LED next to the battery to close the circuit.",
    "Careful: without a resistor the LED burns out, and an LED turned upside down won't light.",
];

pub const HINT_SCRIPT: &[&str] = &[
    "The terminal over there powers the lab exit.",
    "Battery, resistor, LED. Every piece has to touch the circuit.",
];

pub const CONGRATULATION_SCRIPT: &[&str] = &[
    "The LED is glowing! The circuit is complete.",
    "You've earned your way out of the lab. Well done!",
];

pub const SWITCH_SCRIPT: &[&str] = &["Click! Somewhere in the lab a door changed state."];

pub const VICTORY_TEXT: &str = "Level 1 complete!";

/// Placement of everything on one exploration level.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub number: u8,
    pub map: TileMap,
    pub player_start: Coord2,
    pub npc: Coord2,
    pub terminal: Coord2,
    pub puzzle_id: PuzzleId,
    pub elements: Vec<(ElementKind, CircuitId, Coord2)>,
}

impl Level {
    /// The lab, with its map read from the configured path.
    pub fn first(settings: &Settings) -> Self {
        Self::first_with_map(TileMap::load_or_fallback(&settings.map_path))
    }

    pub fn first_with_map(map: TileMap) -> Self {
        Self {
            number: 1,
            map,
            player_start: PLAYER_START,
            npc: (6, 3),
            terminal: (10, 6),
            puzzle_id: 1,
            elements: vec![
                (ElementKind::Switch, 1, (3, 10)),
                (ElementKind::Door, 1, (13, 7)),
            ],
        }
    }

    pub fn build_circuits(&self) -> CircuitNetwork {
        let mut circuits = CircuitNetwork::new();
        for &(kind, id, position) in &self.elements {
            circuits.add_element(kind, id, position);
        }
        circuits.update();
        circuits
    }

    pub fn near_terminal(&self, position: Coord2) -> bool {
        manhattan(self.terminal, position) <= INTERACT_RANGE
    }

    pub fn near_npc(&self, position: Coord2) -> bool {
        manhattan(self.npc, position) <= INTERACT_RANGE
    }

    /// World position, in tiles, of the centre of the terminal.
    pub fn terminal_center(&self) -> (f32, f32) {
        (
            f32::from(self.terminal.0) + 0.5,
            f32::from(self.terminal.1) + 0.5,
        )
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::first_with_map(TileMap::bordered_room(FALLBACK_ROOM_SIZE))
    }
}

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Shared wiring id linking switches to the doors they open.
pub type CircuitId = u32;

/// Largest distance from which the player can flip a switch.
pub const INTERACT_RANGE: u16 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Switch,
    Door,
}

/// A switch or door placed on the exploration map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitElement {
    pub id: CircuitId,
    pub kind: ElementKind,
    pub position: Coord2,
    active: bool,
}

impl CircuitElement {
    /// For a switch: flipped on. For a door: open.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn is_switch(&self) -> bool {
        matches!(self.kind, ElementKind::Switch)
    }

    pub const fn is_door(&self) -> bool {
        matches!(self.kind, ElementKind::Door)
    }

    /// Switches always block movement, doors only while closed.
    pub const fn blocks(&self) -> bool {
        match self.kind {
            ElementKind::Switch => true,
            ElementKind::Door => !self.active,
        }
    }
}

/// Switches and doors of one map. A door is open iff any switch sharing its
/// id is on.
#[derive(Clone, Debug, Default)]
pub struct CircuitNetwork {
    elements: Vec<CircuitElement>,
    /// Circuit id to the indices of the switches carrying it
    switches_by_id: HashMap<CircuitId, SmallVec<[usize; 2]>>,
}

impl CircuitNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element in its initial state: switches off, doors closed.
    pub fn add_element(&mut self, kind: ElementKind, id: CircuitId, position: Coord2) {
        let index = self.elements.len();
        self.elements.push(CircuitElement {
            id,
            kind,
            position,
            active: false,
        });
        if kind == ElementKind::Switch {
            self.switches_by_id.entry(id).or_default().push(index);
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.switches_by_id.clear();
    }

    pub fn elements(&self) -> &[CircuitElement] {
        &self.elements
    }

    pub fn element_at(&self, position: Coord2) -> Option<&CircuitElement> {
        self.elements.iter().find(|element| element.position == position)
    }

    /// Recomputes every door from the switches wired to it.
    pub fn update(&mut self) {
        for index in 0..self.elements.len() {
            let door = self.elements[index];
            if !door.is_door() {
                continue;
            }

            let open = self
                .switches_by_id
                .get(&door.id)
                .is_some_and(|switches| switches.iter().any(|&i| self.elements[i].active));
            if open != door.active {
                log::debug!(
                    "Door {} at {:?} {}",
                    door.id,
                    door.position,
                    if open { "opened" } else { "closed" }
                );
            }
            self.elements[index].active = open;
        }
    }

    /// Flips every switch within reach of `position`, returning how many flipped.
    pub fn interact(&mut self, position: Coord2) -> usize {
        let mut toggled = 0;
        for element in self
            .elements
            .iter_mut()
            .filter(|element| element.is_switch())
            .filter(|element| manhattan(element.position, position) <= INTERACT_RANGE)
        {
            element.active = !element.active;
            toggled += 1;
            log::debug!("Switch {} at {:?} -> {}", element.id, element.position, element.active);
        }
        toggled
    }

    pub fn has_switch_near(&self, position: Coord2) -> bool {
        self.elements
            .iter()
            .any(|element| element.is_switch() && manhattan(element.position, position) <= INTERACT_RANGE)
    }

    pub fn is_solid(&self, position: Coord2) -> bool {
        self.elements
            .iter()
            .any(|element| element.position == position && element.blocks())
    }
}

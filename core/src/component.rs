use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// What occupies a single puzzle cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    #[default]
    Empty,
    Wire,
    Resistor,
    Led,
    Battery,
    Switch,
}

impl ComponentKind {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn label(self) -> &'static str {
        use ComponentKind::*;
        match self {
            Empty => "empty",
            Wire => "wire",
            Resistor => "resistor",
            Led => "led",
            Battery => "battery",
            Switch => "switch",
        }
    }
}

/// Quarter-turn orientation of a placed component.
///
/// Serialized as integer degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// The next orientation clockwise, wrapping from 270 back to 0.
    pub const fn rotated(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = GameError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(GameError::InvalidRotation(other)),
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        /// Seeded by the puzzle definition, never editable by the player
        const FIXED   = 1;
        /// Transient overlay shown after an LED burns out
        const BURNING = 1 << 1;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleCell {
    kind: ComponentKind,
    rotation: Rotation,
    flags: CellFlags,
}

impl PuzzleCell {
    pub const EMPTY: Self = Self {
        kind: ComponentKind::Empty,
        rotation: Rotation::Deg0,
        flags: CellFlags::empty(),
    };

    pub const fn placed(kind: ComponentKind) -> Self {
        Self {
            kind,
            rotation: Rotation::Deg0,
            flags: CellFlags::empty(),
        }
    }

    pub const fn fixed(kind: ComponentKind) -> Self {
        Self {
            kind,
            rotation: Rotation::Deg0,
            flags: CellFlags::FIXED,
        }
    }

    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    pub const fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub const fn is_fixed(&self) -> bool {
        self.flags.contains(CellFlags::FIXED)
    }

    pub const fn is_burning(&self) -> bool {
        self.flags.contains(CellFlags::BURNING)
    }

    /// Whether the player may rotate or remove what is in this cell.
    pub const fn is_editable(&self) -> bool {
        !self.is_fixed() && !self.is_empty()
    }

    pub(crate) fn rotate(&mut self) {
        self.rotation = self.rotation.rotated();
    }

    pub(crate) fn set_burning(&mut self, burning: bool) {
        self.flags.set(CellFlags::BURNING, burning);
    }
}

impl Default for PuzzleCell {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_cycles_back_to_zero() {
        let mut rotation = Rotation::Deg0;
        for _ in 0..4 {
            rotation = rotation.rotated();
        }
        assert_eq!(rotation, Rotation::Deg0);
        assert_eq!(Rotation::Deg270.rotated().degrees(), 0);
    }

    #[test]
    fn rotation_rejects_off_axis_degrees() {
        assert!(matches!(
            Rotation::try_from(45),
            Err(GameError::InvalidRotation(45))
        ));
        assert_eq!(Rotation::try_from(180).unwrap(), Rotation::Deg180);
    }

    #[test]
    fn cell_serializes_rotation_as_degrees() {
        let mut cell = PuzzleCell::placed(ComponentKind::Led);
        cell.rotate();
        cell.rotate();

        let json = serde_json::to_value(cell).unwrap();

        assert_eq!(json["kind"], "Led");
        assert_eq!(json["rotation"], 180);
        let back: PuzzleCell = serde_json::from_value(json).unwrap();
        assert_eq!(back, cell);
    }

    #[test]
    fn fixed_cells_are_not_editable() {
        let battery = PuzzleCell::fixed(ComponentKind::Battery);
        assert!(battery.is_fixed());
        assert!(!battery.is_editable());
        assert!(!PuzzleCell::EMPTY.is_editable());
        assert!(PuzzleCell::placed(ComponentKind::Wire).is_editable());
    }

    #[test]
    fn burning_flag_toggles_without_touching_fixed() {
        let mut cell = PuzzleCell::fixed(ComponentKind::Led);
        cell.set_burning(true);
        assert!(cell.is_burning());
        assert!(cell.is_fixed());
        cell.set_burning(false);
        assert!(!cell.is_burning());
        assert!(cell.is_fixed());
    }
}

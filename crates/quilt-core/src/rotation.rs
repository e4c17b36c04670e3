/// Quarter-turn rotation of a piece or placed block.
use serde::{Deserialize, Serialize};

/// Clockwise rotation in 90° steps.
///
/// Serialized as its degree value (`0`, `90`, `180`, `270`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// The next quarter turn clockwise.
    pub fn clockwise(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// The next quarter turn counter-clockwise.
    pub fn counter_clockwise(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R270,
            Rotation::R90 => Rotation::R0,
            Rotation::R180 => Rotation::R90,
            Rotation::R270 => Rotation::R180,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(format!("rotation must be 0, 90, 180 or 270 degrees, got {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_clockwise_turns_return_to_start() {
        let mut rotation = Rotation::R90;
        for _ in 0..4 {
            rotation = rotation.clockwise();
        }
        assert_eq!(rotation, Rotation::R90);
    }

    #[test]
    fn test_counter_clockwise_undoes_clockwise() {
        for rotation in [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270] {
            assert_eq!(rotation.clockwise().counter_clockwise(), rotation);
        }
    }

    #[test]
    fn test_serde_as_degrees() {
        assert_eq!(serde_json::to_string(&Rotation::R180).unwrap(), "180");
        let parsed: Rotation = serde_json::from_str("270").unwrap();
        assert_eq!(parsed, Rotation::R270);
    }

    #[test]
    fn test_rejects_non_quarter_turns() {
        assert!(serde_json::from_str::<Rotation>("45").is_err());
        assert!(Rotation::try_from(360).is_err());
    }
}

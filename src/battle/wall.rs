//! Fortification segments and their damage states.
//!
//! ```text
//! Intact --hit--> Damaged --hit--> Destroyed
//! ```
//!
//! `Destroyed` is terminal. `Absent` marks a segment the defended town
//! does not have at all (towers without a castle, for example) and never
//! changes during a battle.

use serde::{Deserialize, Serialize};

/// Addressable fortification segment of a besieged town.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WallPart {
    /// Central tower, exists from citadel level.
    Keep,
    BottomTower,
    BottomWall,
    BelowGate,
    OverGate,
    UpperWall,
    UpperTower,
    Gate,
}

impl WallPart {
    /// Every segment, in declaration order.
    pub const ALL: [WallPart; 8] = [
        WallPart::Keep,
        WallPart::BottomTower,
        WallPart::BottomWall,
        WallPart::BelowGate,
        WallPart::OverGate,
        WallPart::UpperWall,
        WallPart::UpperTower,
        WallPart::Gate,
    ];

    /// Plain wall sections, in automatic targeting order.
    pub const WALLS: [WallPart; 4] = [
        WallPart::BottomWall,
        WallPart::BelowGate,
        WallPart::OverGate,
        WallPart::UpperWall,
    ];

    /// Segments that can carry a turret crew, in automatic targeting order.
    pub const TOWERS: [WallPart; 3] = [WallPart::BottomTower, WallPart::Keep, WallPart::UpperTower];

    /// Position in [`WallPart::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn is_tower(self) -> bool {
        Self::TOWERS.contains(&self)
    }
}

impl std::fmt::Display for WallPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WallPart::Keep => "keep",
            WallPart::BottomTower => "bottom tower",
            WallPart::BottomWall => "bottom wall",
            WallPart::BelowGate => "wall below gate",
            WallPart::OverGate => "wall over gate",
            WallPart::UpperWall => "upper wall",
            WallPart::UpperTower => "upper tower",
            WallPart::Gate => "gate",
        };
        f.write_str(name)
    }
}

/// Damage state of one segment.
///
/// Variants are declared from "most destroyed" to "least destroyed" among
/// the segments that exist, so a legal transition always goes to a smaller
/// value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallState {
    /// The town has no such segment.
    Absent,
    Destroyed,
    Damaged,
    Intact,
}

impl WallState {
    /// Can a shot still hurt this segment?
    #[must_use]
    pub const fn is_attackable(self) -> bool {
        matches!(self, WallState::Damaged | WallState::Intact)
    }

    /// The state one step closer to destruction.
    ///
    /// Returns `None` for `Destroyed` (terminal) and `Absent`.
    #[must_use]
    pub const fn damaged(self) -> Option<WallState> {
        match self {
            WallState::Intact => Some(WallState::Damaged),
            WallState::Damaged => Some(WallState::Destroyed),
            WallState::Destroyed | WallState::Absent => None,
        }
    }

    /// Is `self -> next` a forward (or no-op) move along the damage path?
    #[must_use]
    pub fn allows(self, next: WallState) -> bool {
        match (self, next) {
            (WallState::Absent, WallState::Absent) => true,
            (WallState::Absent, _) | (_, WallState::Absent) => false,
            (from, to) => to.rank() <= from.rank(),
        }
    }

    const fn rank(self) -> u8 {
        match self {
            WallState::Absent | WallState::Destroyed => 0,
            WallState::Damaged => 1,
            WallState::Intact => 2,
        }
    }
}

impl std::fmt::Display for WallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WallState::Absent => "absent",
            WallState::Destroyed => "destroyed",
            WallState::Damaged => "damaged",
            WallState::Intact => "intact",
        };
        f.write_str(name)
    }
}

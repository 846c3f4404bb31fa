//! Battle sides.
//!
//! A battle always has exactly two sides. In a siege the defender owns the
//! fortifications and the attacker is the one trying to bring them down.

use serde::{Deserialize, Serialize};

/// Which side of the battle a unit or caster fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleSide {
    /// The side that initiated the battle.
    Attacker,
    /// The side being attacked; owns the town walls in a siege.
    Defender,
}

impl BattleSide {
    /// Both sides, attacker first.
    pub const ALL: [BattleSide; 2] = [BattleSide::Attacker, BattleSide::Defender];

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            BattleSide::Attacker => BattleSide::Defender,
            BattleSide::Defender => BattleSide::Attacker,
        }
    }

    /// 0 for the attacker, 1 for the defender.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            BattleSide::Attacker => 0,
            BattleSide::Defender => 1,
        }
    }
}

impl std::fmt::Display for BattleSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleSide::Attacker => write!(f, "attacker"),
            BattleSide::Defender => write!(f, "defender"),
        }
    }
}

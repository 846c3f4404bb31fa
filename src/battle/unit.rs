//! Units on the battlefield.

use serde::{Deserialize, Serialize};

use crate::battle::WallPart;
use crate::core::{BattleSide, UnitId};

/// A stack of creatures taking part in the battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub side: BattleSide,
    /// Creatures in the stack.
    pub count: u32,
    /// Tower or keep this unit is shooting from, if it is a turret crew.
    pub turret: Option<WallPart>,
}

impl Unit {
    /// Create a regular unit.
    #[must_use]
    pub fn new(id: UnitId, side: BattleSide, count: u32) -> Self {
        Self {
            id,
            side,
            count,
            turret: None,
        }
    }

    /// Station the unit in a tower (builder pattern).
    #[must_use]
    pub fn manning(mut self, part: WallPart) -> Self {
        debug_assert!(part.is_tower(), "only towers carry turret crews");
        self.turret = Some(part);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turret_crew() {
        let archer = Unit::new(UnitId::new(1), BattleSide::Defender, 1);
        assert!(archer.turret.is_none());

        let crew = archer.manning(WallPart::Keep);
        assert_eq!(crew.turret, Some(WallPart::Keep));
    }
}

//! Battle state: the authoritative combat board of one battle.
//!
//! ## BattleQuery
//!
//! Read-only view effects use to decide what should happen:
//! - Defended town (absent outside sieges)
//! - Wall segment states
//! - Units on the field
//!
//! ## BattleState
//!
//! The owned board. After setup it changes only through
//! [`BattleState::commit`], which the server channel drives with the packs
//! effects emitted.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pack::{BattlePack, CatapultAttack, UnitsChanged};
use super::town::{DefendedTown, FortLevel};
use super::unit::Unit;
use super::wall::{WallPart, WallState};
use crate::core::UnitId;

/// Read access to a battle.
pub trait BattleQuery {
    /// The town being besieged, `None` for field battles.
    fn defended_town(&self) -> Option<&DefendedTown>;

    /// State of one wall segment.
    ///
    /// `None` when there is no defended town at all, which is distinct from
    /// any real state including [`WallState::Absent`].
    fn wall_state(&self, part: WallPart) -> Option<WallState>;

    /// Can this segment still be damaged?
    fn is_wall_part_attackable(&self, part: WallPart) -> bool {
        self.wall_state(part).is_some_and(WallState::is_attackable)
    }

    /// All units still in the battle, ordered by id.
    fn units(&self) -> Vec<&Unit>;
}

/// Errors rejecting a pack at commit time.
///
/// A rejected pack means the emitter and this participant disagree about
/// the battle, so nothing from the pack is applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("wall attack committed to a battle without a defended town")]
    NoDefendedTown,

    #[error("{part} is {actual}, but the pack expected {expected}")]
    StateMismatch {
        part: WallPart,
        expected: WallState,
        actual: WallState,
    },

    #[error("{part} cannot go from {from} to {to}")]
    IllegalTransition {
        part: WallPart,
        from: WallState,
        to: WallState,
    },

    #[error("{0} is not in the battle")]
    UnknownUnit(UnitId),
}

/// The combat board of one battle.
///
/// Units live in a persistent map so that cloning a state (to keep a
/// pre-cast snapshot or to compare replicas) is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    town: Option<DefendedTown>,
    walls: [WallState; 8],
    units: OrdMap<UnitId, Unit>,
}

impl BattleState {
    /// Create a field battle (no town, no walls).
    #[must_use]
    pub fn field() -> Self {
        Self {
            town: None,
            walls: [WallState::Absent; 8],
            units: OrdMap::new(),
        }
    }

    /// Create a siege of `town`.
    ///
    /// Segments the town's fort level provides start `Intact`, the rest are
    /// `Absent`:
    /// - Fort: walls and gate
    /// - Citadel: also the keep
    /// - Castle: also both side towers
    #[must_use]
    pub fn siege(town: DefendedTown) -> Self {
        let level = town.fort_level();
        let mut walls = [WallState::Absent; 8];

        for part in WallPart::ALL {
            let required = match part {
                WallPart::Keep => FortLevel::Citadel,
                WallPart::BottomTower | WallPart::UpperTower => FortLevel::Castle,
                _ => FortLevel::Fort,
            };
            if level != FortLevel::None && level >= required {
                walls[part.index()] = WallState::Intact;
            }
        }

        Self {
            town: Some(town),
            walls,
            units: OrdMap::new(),
        }
    }

    /// Override a segment's starting state (battle setup only).
    #[must_use]
    pub fn with_wall_state(mut self, part: WallPart, state: WallState) -> Self {
        self.walls[part.index()] = state;
        self
    }

    /// Add a unit (builder pattern, battle setup only).
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.add_unit(unit);
        self
    }

    /// Add a unit at battle setup.
    pub fn add_unit(&mut self, unit: Unit) {
        self.units.insert(unit.id, unit);
    }

    /// Get a unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Number of units still in the battle.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Is this a siege battle?
    #[must_use]
    pub fn is_siege(&self) -> bool {
        self.town.is_some()
    }

    pub(crate) fn set_wall_state(&mut self, part: WallPart, state: WallState) {
        debug_assert!(
            self.walls[part.index()].allows(state),
            "wall state must only move toward destruction"
        );
        self.walls[part.index()] = state;
    }

    /// Validate and apply one pack.
    ///
    /// On error the state is left untouched.
    pub fn commit(&mut self, pack: &BattlePack) -> Result<(), CommitError> {
        match pack {
            BattlePack::CatapultAttack(attack) => self.commit_attack(attack),
            BattlePack::UnitsChanged(change) => self.commit_units(change),
        }
    }

    /// Apply a journal of packs in order, stopping at the first rejection.
    pub fn replay<'p>(
        &mut self,
        packs: impl IntoIterator<Item = &'p BattlePack>,
    ) -> Result<(), CommitError> {
        for pack in packs {
            self.commit(pack)?;
        }
        Ok(())
    }

    fn commit_attack(&mut self, attack: &CatapultAttack) -> Result<(), CommitError> {
        if self.town.is_none() {
            return Err(CommitError::NoDefendedTown);
        }

        let actual = self.walls[attack.part.index()];
        if actual != attack.from {
            return Err(CommitError::StateMismatch {
                part: attack.part,
                expected: attack.from,
                actual,
            });
        }

        if attack.from.damaged() != Some(attack.to) {
            return Err(CommitError::IllegalTransition {
                part: attack.part,
                from: attack.from,
                to: attack.to,
            });
        }

        debug!(part = %attack.part, from = %attack.from, to = %attack.to, "wall segment hit");
        self.set_wall_state(attack.part, attack.to);
        Ok(())
    }

    fn commit_units(&mut self, change: &UnitsChanged) -> Result<(), CommitError> {
        if let Some(missing) = change.removed.iter().find(|id| !self.units.contains_key(id)) {
            return Err(CommitError::UnknownUnit(*missing));
        }

        for id in &change.removed {
            debug!(unit = %id, "unit removed from battle");
            self.units.remove(id);
        }
        Ok(())
    }
}

impl BattleQuery for BattleState {
    fn defended_town(&self) -> Option<&DefendedTown> {
        self.town.as_ref()
    }

    fn wall_state(&self, part: WallPart) -> Option<WallState> {
        self.town.as_ref().map(|_| self.walls[part.index()])
    }

    fn units(&self) -> Vec<&Unit> {
        self.units.values().collect()
    }
}

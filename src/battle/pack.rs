//! Intent packs: proposed battle mutations.
//!
//! Effects never write battle state. They describe what should happen as
//! packs, and the server channel commits them. The same packs, replayed in
//! emission order, rebuild the same state on every participant.
//!
//! Packs are the only data crossing the host/client boundary, so
//! `encode`/`decode` define the wire format.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{WallPart, WallState};
use crate::core::UnitId;

/// One successful hit on a wall segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatapultAttack {
    /// Shooting unit. `None` for casters without a unit id (heroes).
    pub attacker: Option<UnitId>,
    pub part: WallPart,
    /// State the effect saw before the hit.
    pub from: WallState,
    /// State after the hit.
    pub to: WallState,
}

/// Units leaving the battle.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitsChanged {
    pub removed: SmallVec<[UnitId; 4]>,
}

/// Any intent the server channel accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePack {
    CatapultAttack(CatapultAttack),
    UnitsChanged(UnitsChanged),
}

/// Wire encoding failures.
#[derive(Debug, thiserror::Error)]
#[error("battle pack wire error: {0}")]
pub struct PackError(#[from] bincode::Error);

impl BattlePack {
    /// Serialize for broadcast.
    pub fn encode(&self) -> Result<Vec<u8>, PackError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a broadcast pack.
    pub fn decode(bytes: &[u8]) -> Result<Self, PackError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// The catapult attack, if this is one.
    #[must_use]
    pub fn as_catapult_attack(&self) -> Option<&CatapultAttack> {
        match self {
            BattlePack::CatapultAttack(attack) => Some(attack),
            BattlePack::UnitsChanged(_) => None,
        }
    }
}

impl From<CatapultAttack> for BattlePack {
    fn from(attack: CatapultAttack) -> Self {
        BattlePack::CatapultAttack(attack)
    }
}

impl From<UnitsChanged> for BattlePack {
    fn from(change: UnitsChanged) -> Self {
        BattlePack::UnitsChanged(change)
    }
}

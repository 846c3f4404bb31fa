//! Effect targets.
//!
//! An `EffectTarget` is the ordered list of destinations resolved before an
//! effect is applied. Effects acting on the battlefield structure itself
//! (like the catapult) accept empty placeholders.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::battle::{BattleQuery, WallPart};
use crate::core::UnitId;

/// One target descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// No specific destination needed.
    #[default]
    Empty,
    /// A wall segment.
    WallPart(WallPart),
    /// A unit on the field.
    Unit(UnitId),
}

impl Destination {
    /// The wall segment, if this destination is one.
    #[must_use]
    pub const fn wall_part(self) -> Option<WallPart> {
        match self {
            Destination::WallPart(part) => Some(part),
            Destination::Empty | Destination::Unit(_) => None,
        }
    }
}

/// Ordered target descriptors for one effect invocation.
///
/// SmallVec keeps the common 1-2 destination case off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTarget {
    destinations: SmallVec<[Destination; 2]>,
}

impl EffectTarget {
    /// Create an empty target list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a target list with one destination.
    #[must_use]
    pub fn single(destination: Destination) -> Self {
        let mut target = Self::new();
        target.push(destination);
        target
    }

    /// Add a destination (builder pattern).
    #[must_use]
    pub fn with(mut self, destination: Destination) -> Self {
        self.push(destination);
        self
    }

    pub fn push(&mut self, destination: Destination) {
        self.destinations.push(destination);
    }

    #[must_use]
    pub fn first(&self) -> Option<Destination> {
        self.destinations.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

/// Resolves requested destinations against the current battle.
pub struct TargetResolver;

impl TargetResolver {
    /// Build the target list for an invocation.
    ///
    /// Order and length are preserved. Wall segments with nothing left to
    /// damage and units no longer on the field become `Empty` placeholders.
    pub fn resolve(battle: &dyn BattleQuery, requested: &[Destination]) -> EffectTarget {
        let units = battle.units();
        let mut target = EffectTarget::new();

        for destination in requested {
            let resolved = match *destination {
                Destination::WallPart(part) if !battle.is_wall_part_attackable(part) => {
                    Destination::Empty
                }
                Destination::Unit(id) if !units.iter().any(|u| u.id == id) => Destination::Empty,
                other => other,
            };
            target.push(resolved);
        }

        target
    }

    /// All wall segments that can still be damaged, in declaration order.
    pub fn attackable_parts(battle: &dyn BattleQuery) -> Vec<WallPart> {
        WallPart::ALL
            .into_iter()
            .filter(|part| battle.is_wall_part_attackable(*part))
            .collect()
    }
}

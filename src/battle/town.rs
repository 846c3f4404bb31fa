//! The defended town of a siege battle.
//!
//! Only the fortification buildings matter to the battle: they decide
//! which wall segments exist when the battle starts.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Town buildings the battle engine knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingId {
    VillageHall,
    Tavern,
    /// Walls and gate.
    Fort,
    /// Adds the keep.
    Citadel,
    /// Adds the side towers.
    Castle,
}

/// How strongly a town is fortified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FortLevel {
    /// A village: no walls at all.
    None,
    Fort,
    Citadel,
    Castle,
}

/// A town whose walls the defender fights behind.
///
/// ## Example
///
/// ```
/// use battle_effects::battle::{BuildingId, DefendedTown, FortLevel};
///
/// let village = DefendedTown::new("Brookmoor");
/// assert_eq!(village.fort_level(), FortLevel::None);
///
/// let town = DefendedTown::new("Stonehold").with_building(BuildingId::Fort);
/// assert_eq!(town.fort_level(), FortLevel::Fort);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefendedTown {
    /// Human-readable name (for logging/display).
    pub name: String,
    buildings: FxHashSet<BuildingId>,
}

impl DefendedTown {
    /// Create a town with no buildings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buildings: FxHashSet::default(),
        }
    }

    /// Add a building (builder pattern).
    #[must_use]
    pub fn with_building(mut self, building: BuildingId) -> Self {
        self.add_building(building);
        self
    }

    pub fn add_building(&mut self, building: BuildingId) {
        self.buildings.insert(building);
    }

    #[must_use]
    pub fn has_building(&self, building: BuildingId) -> bool {
        self.buildings.contains(&building)
    }

    /// The highest fortification building present.
    #[must_use]
    pub fn fort_level(&self) -> FortLevel {
        if self.has_building(BuildingId::Castle) {
            FortLevel::Castle
        } else if self.has_building(BuildingId::Citadel) {
            FortLevel::Citadel
        } else if self.has_building(BuildingId::Fort) {
            FortLevel::Fort
        } else {
            FortLevel::None
        }
    }

    /// Does the town have any walls to besiege?
    #[must_use]
    pub fn is_fortified(&self) -> bool {
        self.fort_level() != FortLevel::None
    }
}

//! Unit identification.
//!
//! Every stack of creatures on the battlefield has a unique `UnitId`.
//! Casters that are not battlefield units (heroes) have no id at all;
//! that case is modeled as `Option<UnitId>::None` rather than a magic value.
//!
//! ```
//! use battle_effects::core::UnitId;
//!
//! let id = UnitId::new(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(format!("{}", id), "Unit(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a unit taking part in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

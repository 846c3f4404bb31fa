//! Battlefield model: walls, towns, units and the packs that change them.
//!
//! - `WallPart` / `WallState`: fortification segments and their damage state machine
//! - `DefendedTown`: the besieged town and its fort level
//! - `BattleQuery` / `BattleState`: read view and owned board
//! - `BattlePack`: intents committed through the server channel

mod wall;
mod town;
mod unit;
mod pack;
mod state;

pub use wall::{WallPart, WallState};
pub use town::{BuildingId, DefendedTown, FortLevel};
pub use unit::Unit;
pub use pack::{BattlePack, CatapultAttack, PackError, UnitsChanged};
pub use state::{BattleQuery, BattleState, CommitError};

//! Core engine types: unit ids, battle sides, RNG, configuration, errors.
//!
//! Everything here is independent of the battlefield model and of any
//! concrete effect.

pub mod unit_id;
pub mod side;
pub mod rng;
pub mod config;
pub mod error;

pub use unit_id::UnitId;
pub use side::BattleSide;
pub use rng::{GameRng, GameRngState, RandomSource};
pub use config::{CatapultConfig, EffectConfig, TargetSelection};
pub use error::EffectError;

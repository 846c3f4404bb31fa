//! Battle effects.
//!
//! - `Effect`: the applicable/apply contract every effect implements
//! - `Mechanics`: per-invocation context (caster, side, flags, problem sink)
//! - `EffectTarget`: resolved destinations handed to `apply`
//! - `EffectRegistry`: builds effects by id from configuration
//! - `Catapult`: wall bombardment
//!
//! ## Design Philosophy
//!
//! Effects decide, the server channel commits. An effect only reads the
//! battle through `Mechanics` and describes its changes as packs, so it
//! never holds a mutable borrow of the battle.

mod effect;
mod mechanics;
mod target;
mod registry;
mod catapult;

pub use effect::Effect;
pub use mechanics::{Caster, HeroCaster, Mechanics, Problem, ProblemKind, Problems};
pub use target::{Destination, EffectTarget, TargetResolver};
pub use registry::{EffectFactory, EffectRegistry, EffectSet};
pub use catapult::{Catapult, CATAPULT};

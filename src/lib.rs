//! # battle-effects
//!
//! Siege-wall combat effects with a deterministic, replayable commit path.
//!
//! ## Design Principles
//!
//! 1. **Effects Decide, the Server Commits**: effects read the battle and
//!    emit packs. Only the server channel turns packs into state.
//!
//! 2. **Replayable**: the battle RNG is seeded and injected, and packs are
//!    committed in emission order. Any participant replaying the journal
//!    reaches the same state.
//!
//! 3. **Configuration Over Convention**: effect tunables come from an
//!    effect-keyed JSON document, with built-in defaults for every key.
//!
//! ## Architecture
//!
//! - **Two-phase effects**: `applicable` is read-only and reports a reason
//!   on refusal. `apply` runs only after it and never re-checks.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so a cast can
//!   resolve against a snapshot and commit all or nothing.
//!
//! ## Modules
//!
//! - `core`: Unit ids, battle sides, RNG, configuration, errors
//! - `battle`: Walls, towns, units, packs and the battle state
//! - `effects`: Effect contract, mechanics context, registry, catapult
//! - `server`: Server channel and battle sessions

pub mod core;
pub mod battle;
pub mod effects;
pub mod server;

// Re-export commonly used types
pub use crate::core::{
    UnitId, BattleSide,
    GameRng, GameRngState, RandomSource,
    EffectConfig, CatapultConfig, TargetSelection,
    EffectError,
};

pub use crate::battle::{
    WallPart, WallState,
    BuildingId, DefendedTown, FortLevel, Unit,
    BattlePack, CatapultAttack, UnitsChanged, PackError,
    BattleQuery, BattleState, CommitError,
};

pub use crate::effects::{
    Effect, Mechanics, Caster, HeroCaster,
    Problem, Problems, ProblemKind,
    Destination, EffectTarget, TargetResolver,
    EffectRegistry, EffectFactory, EffectSet,
    Catapult, CATAPULT,
};

pub use crate::server::{
    ServerCallback, BattleServer,
    BattleSession, CastRequest, CastOutcome, CasterRef, SessionError,
};

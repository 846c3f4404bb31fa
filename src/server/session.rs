//! Battle session: the host side of one battle.
//!
//! A session owns the authoritative [`BattleState`], the battle's RNG, the
//! loaded effects and the journal of every committed pack. Casting runs
//! the whole chain: applicability, target resolution, resolution against a
//! [`BattleServer`], then commit.
//!
//! ## Replication
//!
//! Clients never run effects. They start from the same setup state and
//! replay the journal:
//!
//! ```
//! use battle_effects::battle::{BattleState, BuildingId, DefendedTown};
//! use battle_effects::core::{BattleSide, EffectConfig};
//! use battle_effects::effects::{Destination, CATAPULT};
//! use battle_effects::server::{BattleSession, CastRequest};
//!
//! let setup = BattleState::siege(DefendedTown::new("Rampart").with_building(BuildingId::Fort));
//! let mut host = BattleSession::with_config(setup.clone(), 42, &EffectConfig::new()).unwrap();
//!
//! host.cast(&CastRequest::hero(CATAPULT, BattleSide::Attacker).aimed_at(Destination::Empty))
//!     .unwrap();
//!
//! let mut client = setup;
//! client.replay(host.journal()).unwrap();
//! assert_eq!(&client, host.state());
//! ```

use im::Vector;
use tracing::{debug, info, warn};

use super::callback::BattleServer;
use crate::battle::{BattlePack, BattleState, CommitError};
use crate::core::{BattleSide, EffectConfig, EffectError, GameRng, GameRngState, UnitId};
use crate::effects::{
    Caster, Destination, EffectRegistry, EffectSet, HeroCaster, Mechanics, Problems, TargetResolver,
};

/// Errors failing a cast outright.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no effect loaded under '{0}'")]
    UnknownEffect(String),

    #[error("caster {0} is not in the battle")]
    UnknownCaster(UnitId),

    #[error(transparent)]
    Effect(#[from] EffectError),

    /// An emitted pack did not fit the battle. Nothing from the cast was committed.
    #[error("cast produced an uncommittable pack: {0}")]
    Commit(#[from] CommitError),
}

/// Who casts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CasterRef {
    Hero(BattleSide),
    Unit(UnitId),
}

/// One request to cast an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastRequest {
    pub effect: String,
    pub caster: CasterRef,
    pub target: Vec<Destination>,
    pub smart: bool,
    pub massive: bool,
}

impl CastRequest {
    /// A smart, non-massive cast by a hero.
    #[must_use]
    pub fn hero(effect: impl Into<String>, side: BattleSide) -> Self {
        Self::new(effect, CasterRef::Hero(side))
    }

    /// A smart, non-massive cast by a unit on the field.
    #[must_use]
    pub fn unit(effect: impl Into<String>, id: UnitId) -> Self {
        Self::new(effect, CasterRef::Unit(id))
    }

    fn new(effect: impl Into<String>, caster: CasterRef) -> Self {
        Self {
            effect: effect.into(),
            caster,
            target: Vec::new(),
            smart: true,
            massive: false,
        }
    }

    /// Add a destination (builder pattern).
    #[must_use]
    pub fn aimed_at(mut self, destination: Destination) -> Self {
        self.target.push(destination);
        self
    }

    #[must_use]
    pub fn smart(mut self, smart: bool) -> Self {
        self.smart = smart;
        self
    }

    #[must_use]
    pub fn massive(mut self, massive: bool) -> Self {
        self.massive = massive;
        self
    }
}

/// What a cast did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    /// The effect was not applicable. Nothing was drawn or committed.
    Rejected(Vec<String>),
    /// The effect resolved. `packs` were committed in this order and
    /// appended to the journal. May be empty.
    Applied { packs: Vec<BattlePack> },
}

impl CastOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, CastOutcome::Applied { .. })
    }

    /// Committed packs. Empty for rejected casts.
    #[must_use]
    pub fn packs(&self) -> &[BattlePack] {
        match self {
            CastOutcome::Applied { packs } => packs,
            CastOutcome::Rejected(_) => &[],
        }
    }
}

/// The host side of one battle.
#[derive(Debug)]
pub struct BattleSession {
    state: BattleState,
    rng: GameRng,
    effects: EffectSet,
    journal: Vector<BattlePack>,
}

impl BattleSession {
    /// Create a session with already loaded effects.
    #[must_use]
    pub fn new(state: BattleState, seed: u64, effects: EffectSet) -> Self {
        Self {
            state,
            rng: GameRng::new(seed),
            effects,
            journal: Vector::new(),
        }
    }

    /// Create a session with the built-in effects configured from `config`.
    pub fn with_config(state: BattleState, seed: u64, config: &EffectConfig) -> Result<Self, EffectError> {
        let effects = EffectRegistry::with_builtin().load(config)?;
        Ok(Self::new(state, seed, effects))
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Every committed pack, in commit order.
    #[must_use]
    pub fn journal(&self) -> &Vector<BattlePack> {
        &self.journal
    }

    /// RNG position, for resynchronizing a participant.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn effects(&self) -> &EffectSet {
        &self.effects
    }

    /// Cast an effect.
    ///
    /// The cast is all or nothing: if any emitted pack fails to commit, the
    /// battle, the RNG and the journal stay as they were.
    pub fn cast(&mut self, request: &CastRequest) -> Result<CastOutcome, SessionError> {
        let effect = self
            .effects
            .get(&request.effect)
            .ok_or_else(|| SessionError::UnknownEffect(request.effect.clone()))?;

        let caster: Box<dyn Caster> = match request.caster {
            CasterRef::Hero(side) => Box::new(HeroCaster::new(side)),
            CasterRef::Unit(id) => {
                let unit = self.state.unit(id).ok_or(SessionError::UnknownCaster(id))?;
                Box::new(unit.clone())
            }
        };

        let rng_before = self.rng.clone();
        let packs = {
            let m = Mechanics::new(&self.state, caster.as_ref())
                .smart(request.smart)
                .massive(request.massive);

            let mut problems = Problems::new();
            if !effect.applicable(&mut problems, &m) {
                debug!(effect = %request.effect, ?problems, "cast rejected");
                return Ok(CastOutcome::Rejected(problems.into_reasons()));
            }

            let target = TargetResolver::resolve(&self.state, &request.target);
            let mut server = BattleServer::new(&mut self.rng);
            effect.apply(&mut server, &m, &target);
            server.into_packs()
        };

        let mut next = self.state.clone();
        if let Err(err) = next.replay(&packs) {
            warn!(effect = %request.effect, %err, "cast rolled back");
            self.rng = rng_before;
            return Err(err.into());
        }

        self.state = next;
        self.journal.extend(packs.iter().cloned());
        info!(effect = %request.effect, packs = packs.len(), journal = self.journal.len(), "cast applied");

        Ok(CastOutcome::Applied { packs })
    }
}

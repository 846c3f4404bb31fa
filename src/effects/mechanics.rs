//! Per-invocation effect context.
//!
//! A `Mechanics` value is built fresh for every cast. It borrows the battle
//! and the caster, carries the cast flags and knows how to turn a failed
//! precondition into a reason for the acting player.

use std::fmt;

use tracing::debug;

use crate::battle::{BattleQuery, Unit};
use crate::core::{BattleSide, UnitId};

/// Whoever is casting the effect.
pub trait Caster {
    /// Unit id of the caster. `None` for casters outside the unit roster.
    fn caster_unit_id(&self) -> Option<UnitId>;

    fn caster_side(&self) -> BattleSide;
}

/// A hero casting from outside the battlefield. Has no unit id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroCaster {
    pub side: BattleSide,
}

impl HeroCaster {
    #[must_use]
    pub const fn new(side: BattleSide) -> Self {
        Self { side }
    }
}

impl Caster for HeroCaster {
    fn caster_unit_id(&self) -> Option<UnitId> {
        None
    }

    fn caster_side(&self) -> BattleSide {
        self.side
    }
}

impl Caster for Unit {
    fn caster_unit_id(&self) -> Option<UnitId> {
        Some(self.id)
    }

    fn caster_side(&self) -> BattleSide {
        self.side
    }
}

/// Write-only sink for rejection reasons.
pub trait Problem {
    fn add(&mut self, reason: String);
}

/// Collects rejection reasons in report order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Problems {
    reasons: Vec<String>,
}

impl Problems {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    #[must_use]
    pub fn into_reasons(self) -> Vec<String> {
        self.reasons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

impl Problem for Problems {
    fn add(&mut self, reason: String) {
        self.reasons.push(reason);
    }
}

/// Why an effect refused to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    NoDefendedTown,
    NoFortifications,
    OwnFortifications,
    NoAttackableParts,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ProblemKind::NoDefendedTown => "there is no town to besiege",
            ProblemKind::NoFortifications => "the town has no fortifications",
            ProblemKind::OwnFortifications => "cannot bombard your own walls",
            ProblemKind::NoAttackableParts => "every wall part is already destroyed",
        };
        f.write_str(reason)
    }
}

/// Context of one effect invocation.
///
/// ## Flags
///
/// - `smart`: the effect may pick the best legal target on its own and must
///   refuse casts that could only hurt the caster
/// - `massive`: one invocation affects independent targets across the
///   whole field instead of the aimed one
pub struct Mechanics<'a> {
    battle: &'a dyn BattleQuery,
    caster: &'a dyn Caster,
    caster_side: BattleSide,
    smart: bool,
    massive: bool,
}

impl<'a> Mechanics<'a> {
    /// Create a context with smart targeting on and massive off.
    #[must_use]
    pub fn new(battle: &'a dyn BattleQuery, caster: &'a dyn Caster) -> Self {
        Self {
            battle,
            caster,
            caster_side: caster.caster_side(),
            smart: true,
            massive: false,
        }
    }

    /// Set smart targeting (builder pattern).
    #[must_use]
    pub fn smart(mut self, smart: bool) -> Self {
        self.smart = smart;
        self
    }

    /// Set massiveness (builder pattern).
    #[must_use]
    pub fn massive(mut self, massive: bool) -> Self {
        self.massive = massive;
        self
    }

    #[must_use]
    pub fn battle(&self) -> &'a dyn BattleQuery {
        self.battle
    }

    #[must_use]
    pub fn caster(&self) -> &'a dyn Caster {
        self.caster
    }

    #[must_use]
    pub fn caster_side(&self) -> BattleSide {
        self.caster_side
    }

    #[must_use]
    pub fn is_smart(&self) -> bool {
        self.smart
    }

    #[must_use]
    pub fn is_massive(&self) -> bool {
        self.massive
    }

    /// Report why the effect cannot be cast.
    ///
    /// Always returns `false` so `applicable` can end with
    /// `return m.adapt_problem(..)`.
    pub fn adapt_problem(&self, kind: ProblemKind, problem: &mut dyn Problem) -> bool {
        debug!(side = %self.caster_side, reason = %kind, "effect not applicable");
        problem.add(kind.to_string());
        false
    }
}

impl fmt::Debug for Mechanics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mechanics")
            .field("caster", &self.caster.caster_unit_id())
            .field("caster_side", &self.caster_side)
            .field("smart", &self.smart)
            .field("massive", &self.massive)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::BattleState;

    #[test]
    fn test_defaults() {
        let battle = BattleState::field();
        let hero = HeroCaster::new(BattleSide::Attacker);
        let m = Mechanics::new(&battle, &hero);

        assert!(m.is_smart());
        assert!(!m.is_massive());
        assert_eq!(m.caster_side(), BattleSide::Attacker);
        assert_eq!(m.caster().caster_unit_id(), None);
    }

    #[test]
    fn test_unit_caster() {
        let battle = BattleState::field();
        let crossbow = Unit::new(UnitId::new(9), BattleSide::Defender, 1);
        let m = Mechanics::new(&battle, &crossbow).smart(false).massive(true);

        assert!(!m.is_smart());
        assert!(m.is_massive());
        assert_eq!(m.caster_side(), BattleSide::Defender);
        assert_eq!(m.caster().caster_unit_id(), Some(UnitId::new(9)));
    }

    #[test]
    fn test_adapt_problem() {
        let battle = BattleState::field();
        let hero = HeroCaster::new(BattleSide::Defender);
        let m = Mechanics::new(&battle, &hero);
        let mut problems = Problems::new();

        assert!(!m.adapt_problem(ProblemKind::OwnFortifications, &mut problems));
        assert_eq!(problems.reasons(), ["cannot bombard your own walls"]);
    }
}

//! Catapult: bombard the defended town's walls.
//!
//! ## Resolution
//!
//! Each invocation fires `targetsToAttack` shots. Per shot:
//!
//! 1. Pick a wall part. An aimed shot lands on the aimed part with the
//!    part's hit chance, otherwise it falls back to the potential targets:
//!    walls first, the gate once no wall is left, towers last. Massive casts
//!    spray over every attackable part.
//! 2. Roll `chanceToNormalHit`. On success the part takes one step of damage.
//!
//! Parts destroyed by an earlier shot of the same invocation are never
//! picked again. A destroyed tower takes its turret crew with it.
//!
//! ## Draw order
//!
//! Per shot: one aim roll if the aimed part is attackable, then one
//! candidate draw if the aim roll failed or there was none and the
//! selection is random, then one damage roll. No draws once nothing is left.

use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::effect::Effect;
use super::mechanics::{Mechanics, Problem, ProblemKind};
use super::target::{Destination, EffectTarget};
use crate::battle::{BattleQuery, CatapultAttack, FortLevel, UnitsChanged, WallPart, WallState};
use crate::core::{BattleSide, CatapultConfig, EffectError, RandomSource, TargetSelection};
use crate::server::ServerCallback;

/// Registry id of the catapult.
pub const CATAPULT: &str = "core:catapult";

/// The catapult effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catapult {
    config: CatapultConfig,
}

impl Catapult {
    #[must_use]
    pub fn new(config: CatapultConfig) -> Self {
        Self { config }
    }

    /// Registry factory.
    pub fn from_config(block: &Value) -> Result<Box<dyn Effect>, EffectError> {
        Ok(Box::new(Self::new(CatapultConfig::from_value(CATAPULT, block)?)))
    }

    #[must_use]
    pub fn config(&self) -> &CatapultConfig {
        &self.config
    }

    /// Chance an aimed shot lands on `part`.
    fn hit_chance(&self, part: WallPart) -> u8 {
        match part {
            WallPart::Keep => self.config.chance_to_hit_keep,
            WallPart::Gate => self.config.chance_to_hit_gate,
            WallPart::BottomTower | WallPart::UpperTower => self.config.chance_to_hit_tower,
            WallPart::BottomWall
            | WallPart::BelowGate
            | WallPart::OverGate
            | WallPart::UpperWall => self.config.chance_to_hit_wall,
        }
    }

    fn choose_part(
        &self,
        rng: &mut dyn RandomSource,
        walls: &WallView,
        aimed: Option<WallPart>,
        massive: bool,
    ) -> Option<WallPart> {
        if let Some(part) = aimed.filter(|part| walls.is_attackable(*part)) {
            if rng.roll_chance(self.hit_chance(part)) {
                return Some(part);
            }
            trace!(%part, "aimed shot strayed");
        }

        let candidates = if massive {
            walls.attackable()
        } else {
            walls.potential_targets()
        };
        self.pick(rng, &candidates)
    }

    fn pick(&self, rng: &mut dyn RandomSource, candidates: &[WallPart]) -> Option<WallPart> {
        match self.config.selection {
            TargetSelection::Ordered => candidates.first().copied(),
            TargetSelection::Random => {
                let last = candidates.len().checked_sub(1)?;
                let index = rng.roll_uniform(0, last as i64);
                candidates.get(index as usize).copied()
            }
        }
    }

    fn remove_turret_crew(&self, server: &mut dyn ServerCallback, battle: &dyn BattleQuery, part: WallPart) {
        let removed: SmallVec<[_; 4]> = battle
            .units()
            .into_iter()
            .filter(|unit| unit.turret == Some(part))
            .map(|unit| unit.id)
            .collect();

        if removed.is_empty() {
            return;
        }

        debug!(%part, crew = removed.len(), "turret crew lost");
        server.apply(UnitsChanged { removed }.into());
    }
}

impl Effect for Catapult {
    fn name(&self) -> &'static str {
        CATAPULT
    }

    fn applicable(&self, problem: &mut dyn Problem, m: &Mechanics<'_>) -> bool {
        let battle = m.battle();

        let Some(town) = battle.defended_town() else {
            return m.adapt_problem(ProblemKind::NoDefendedTown, problem);
        };

        if town.fort_level() == FortLevel::None {
            return m.adapt_problem(ProblemKind::NoFortifications, problem);
        }

        if m.is_smart() && m.caster_side() == BattleSide::Defender {
            return m.adapt_problem(ProblemKind::OwnFortifications, problem);
        }

        if !WallPart::ALL.into_iter().any(|part| battle.is_wall_part_attackable(part)) {
            return m.adapt_problem(ProblemKind::NoAttackableParts, problem);
        }

        true
    }

    fn apply(&self, server: &mut dyn ServerCallback, m: &Mechanics<'_>, target: &EffectTarget) {
        let battle = m.battle();
        let attacker = m.caster().caster_unit_id();
        let massive = m.is_massive();
        let aimed = if massive {
            None
        } else {
            target.first().and_then(Destination::wall_part)
        };

        let mut walls = WallView::capture(battle);

        for shot in 1..=self.config.targets_to_attack {
            let Some(part) = self.choose_part(server.rng(), &walls, aimed, massive) else {
                debug!(shot, "no attackable wall parts left");
                break;
            };

            trace!(shot, %part, "catapult shot");

            if !server.rng().roll_chance(self.config.chance_to_normal_hit) {
                trace!(shot, %part, "shot did no damage");
                continue;
            }

            let from = walls.get(part);
            let Some(to) = from.damaged() else {
                continue;
            };
            walls.set(part, to);

            debug!(shot, %part, %from, %to, "wall hit");
            server.apply(
                CatapultAttack {
                    attacker,
                    part,
                    from,
                    to,
                }
                .into(),
            );

            if to == WallState::Destroyed && part.is_tower() {
                self.remove_turret_crew(server, battle, part);
            }
        }
    }
}

/// Wall states as this invocation has left them so far.
struct WallView {
    states: [WallState; 8],
}

impl WallView {
    fn capture(battle: &dyn BattleQuery) -> Self {
        let mut states = [WallState::Absent; 8];
        for part in WallPart::ALL {
            states[part.index()] = battle.wall_state(part).unwrap_or(WallState::Absent);
        }
        Self { states }
    }

    fn get(&self, part: WallPart) -> WallState {
        self.states[part.index()]
    }

    fn set(&mut self, part: WallPart, state: WallState) {
        self.states[part.index()] = state;
    }

    fn is_attackable(&self, part: WallPart) -> bool {
        self.get(part).is_attackable()
    }

    fn attackable(&self) -> Vec<WallPart> {
        self.filter(&WallPart::ALL)
    }

    /// Walls, then the gate once no wall stands, then towers once nothing else does.
    fn potential_targets(&self) -> Vec<WallPart> {
        let walls = self.filter(&WallPart::WALLS);
        if !walls.is_empty() {
            return walls;
        }
        if self.is_attackable(WallPart::Gate) {
            return vec![WallPart::Gate];
        }
        self.filter(&WallPart::TOWERS)
    }

    fn filter(&self, parts: &[WallPart]) -> Vec<WallPart> {
        parts.iter().copied().filter(|part| self.is_attackable(*part)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BattlePack, BattleState, BuildingId, DefendedTown, Unit};
    use crate::core::UnitId;
    use crate::effects::{HeroCaster, Problems};
    use std::collections::VecDeque;

    /// Replays scripted draws; `roll_chance` goes through the default method.
    struct Scripted(VecDeque<i64>);

    impl RandomSource for Scripted {
        fn roll_uniform(&mut self, min: i64, max: i64) -> i64 {
            let value = self.0.pop_front().expect("script exhausted");
            assert!((min..=max).contains(&value), "scripted {value} outside {min}..={max}");
            value
        }
    }

    struct Recorder {
        rng: Scripted,
        packs: Vec<BattlePack>,
    }

    impl Recorder {
        fn new(draws: &[i64]) -> Self {
            Self {
                rng: Scripted(draws.iter().copied().collect()),
                packs: Vec::new(),
            }
        }

        fn attacks(&self) -> Vec<CatapultAttack> {
            self.packs.iter().filter_map(|p| p.as_catapult_attack().copied()).collect()
        }
    }

    impl ServerCallback for Recorder {
        fn rng(&mut self) -> &mut dyn RandomSource {
            &mut self.rng
        }

        fn apply(&mut self, pack: BattlePack) {
            self.packs.push(pack);
        }
    }

    fn castle() -> BattleState {
        BattleState::siege(DefendedTown::new("Castle").with_building(BuildingId::Castle))
    }

    fn only_standing(part: WallPart) -> BattleState {
        WallPart::ALL
            .into_iter()
            .filter(|p| *p != part)
            .fold(castle(), |battle, p| battle.with_wall_state(p, WallState::Destroyed))
    }

    #[test]
    fn test_hit_chance_per_part() {
        let catapult = Catapult::default();
        assert_eq!(catapult.hit_chance(WallPart::Keep), 5);
        assert_eq!(catapult.hit_chance(WallPart::Gate), 25);
        assert_eq!(catapult.hit_chance(WallPart::UpperTower), 10);
        assert_eq!(catapult.hit_chance(WallPart::OverGate), 50);
    }

    #[test]
    fn test_potential_targets_priority() {
        let battle = castle();
        assert_eq!(WallView::capture(&battle).potential_targets(), WallPart::WALLS.to_vec());

        let battle = WallPart::WALLS
            .into_iter()
            .fold(castle(), |b, p| b.with_wall_state(p, WallState::Destroyed));
        assert_eq!(WallView::capture(&battle).potential_targets(), vec![WallPart::Gate]);

        let battle = battle.with_wall_state(WallPart::Gate, WallState::Destroyed);
        assert_eq!(WallView::capture(&battle).potential_targets(), WallPart::TOWERS.to_vec());
    }

    #[test]
    fn test_aimed_shot_lands() {
        let battle = castle();
        let hero = HeroCaster::new(BattleSide::Attacker);
        let m = Mechanics::new(&battle, &hero);
        let catapult = Catapult::default();
        // aim roll 0 < 25 lands on the gate, damage roll 0 < 60
        let mut server = Recorder::new(&[0, 0]);

        catapult.apply(&mut server, &m, &EffectTarget::single(Destination::WallPart(WallPart::Gate)));

        assert_eq!(
            server.attacks(),
            vec![CatapultAttack {
                attacker: None,
                part: WallPart::Gate,
                from: WallState::Intact,
                to: WallState::Damaged,
            }]
        );
    }

    #[test]
    fn test_aimed_shot_strays_to_walls() {
        let battle = castle();
        let hero = HeroCaster::new(BattleSide::Attacker);
        let m = Mechanics::new(&battle, &hero);
        let catapult = Catapult::default();
        // aim roll misses the gate, candidate 2 of the walls, damage roll hits
        let mut server = Recorder::new(&[99, 2, 10]);

        catapult.apply(&mut server, &m, &EffectTarget::single(Destination::WallPart(WallPart::Gate)));

        assert_eq!(server.attacks()[0].part, WallPart::OverGate);
        assert!(server.rng.0.is_empty());
    }

    #[test]
    fn test_aimed_at_destroyed_part_skips_aim_roll() {
        let battle = castle().with_wall_state(WallPart::Gate, WallState::Destroyed);
        let hero = HeroCaster::new(BattleSide::Attacker);
        let m = Mechanics::new(&battle, &hero);
        let catapult = Catapult::default();
        let mut server = Recorder::new(&[0, 0]);

        catapult.apply(&mut server, &m, &EffectTarget::single(Destination::WallPart(WallPart::Gate)));

        assert_eq!(server.attacks()[0].part, WallPart::BottomWall);
    }

    #[test]
    fn test_missed_damage_roll_emits_nothing() {
        let battle = castle();
        let hero = HeroCaster::new(BattleSide::Attacker);
        let m = Mechanics::new(&battle, &hero);
        let catapult = Catapult::default();
        let mut server = Recorder::new(&[0, 60]);

        catapult.apply(&mut server, &m, &EffectTarget::single(Destination::Empty));

        assert!(server.packs.is_empty());
    }

    #[test]
    fn test_shots_never_revisit_destroyed_part() {
        let battle = only_standing(WallPart::BelowGate).with_wall_state(WallPart::BelowGate, WallState::Damaged);
        let hero = HeroCaster::new(BattleSide::Attacker);
        let m = Mechanics::new(&battle, &hero);
        let catapult = Catapult::new(CatapultConfig::default().with_targets(3).with_normal_hit(100));
        // first shot destroys the part, the rest find nothing and draw nothing
        let mut server = Recorder::new(&[0, 0]);

        catapult.apply(&mut server, &m, &EffectTarget::single(Destination::Empty));

        assert_eq!(server.attacks().len(), 1);
        assert_eq!(server.attacks()[0].to, WallState::Destroyed);
        assert!(server.rng.0.is_empty());
    }

    #[test]
    fn test_ordered_selection_draws_no_candidate() {
        let battle = castle();
        let hero = HeroCaster::new(BattleSide::Attacker);
        let m = Mechanics::new(&battle, &hero);
        let catapult = Catapult::new(
            CatapultConfig::default()
                .with_targets(2)
                .with_selection(TargetSelection::Ordered),
        );
        let mut server = Recorder::new(&[0, 0]);

        catapult.apply(&mut server, &m, &EffectTarget::single(Destination::Empty));

        let attacks = server.attacks();
        assert_eq!(attacks.len(), 2);
        assert!(attacks.iter().all(|a| a.part == WallPart::BottomWall));
        assert_eq!(attacks[1].from, WallState::Damaged);
        assert_eq!(attacks[1].to, WallState::Destroyed);
    }

    #[test]
    fn test_destroyed_tower_loses_crew() {
        let battle = only_standing(WallPart::Keep)
            .with_wall_state(WallPart::Keep, WallState::Damaged)
            .with_unit(Unit::new(UnitId::new(7), BattleSide::Defender, 1).manning(WallPart::Keep))
            .with_unit(Unit::new(UnitId::new(8), BattleSide::Defender, 1).manning(WallPart::UpperTower));
        let shooter = Unit::new(UnitId::new(1), BattleSide::Attacker, 1);
        let m = Mechanics::new(&battle, &shooter);
        let catapult = Catapult::new(CatapultConfig::default().with_normal_hit(100));
        let mut server = Recorder::new(&[0, 0]);

        catapult.apply(&mut server, &m, &EffectTarget::single(Destination::Empty));

        assert_eq!(server.packs.len(), 2);
        assert_eq!(server.attacks()[0].attacker, Some(UnitId::new(1)));
        match &server.packs[1] {
            BattlePack::UnitsChanged(change) => assert_eq!(change.removed.as_slice(), [UnitId::new(7)]),
            other => panic!("Expected UnitsChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_applicable_reports_one_problem() {
        let battle = castle();
        let hero = HeroCaster::new(BattleSide::Defender);
        let m = Mechanics::new(&battle, &hero);
        let mut problems = Problems::new();

        assert!(!Catapult::default().applicable(&mut problems, &m));
        assert_eq!(problems.len(), 1);

        let mut problems = Problems::new();
        assert!(Catapult::default().applicable(&mut problems, &m.smart(false)));
        assert!(problems.is_empty());
    }

    #[test]
    fn test_applicable_without_attackable_parts() {
        let battle = only_standing(WallPart::Keep).with_wall_state(WallPart::Keep, WallState::Destroyed);
        let hero = HeroCaster::new(BattleSide::Attacker);
        let m = Mechanics::new(&battle, &hero);
        let mut problems = Problems::new();

        assert!(!Catapult::default().applicable(&mut problems, &m));
        assert_eq!(problems.reasons(), [ProblemKind::NoAttackableParts.to_string()]);
    }

    #[test]
    fn test_factory() {
        let effect = Catapult::from_config(&serde_json::json!({ "targetsToAttack": 2 })).unwrap();
        assert_eq!(effect.name(), CATAPULT);
        assert!(Catapult::from_config(&serde_json::json!({ "targetsToAttack": 0 })).is_err());
    }
}

//! Effect configuration.
//!
//! Effect tunables come from a structured document keyed by effect id:
//!
//! ```json
//! {
//!   "core:catapult": { "targetsToAttack": 2, "chanceToNormalHit": 100 }
//! }
//! ```
//!
//! - `EffectConfig`: the whole document, one raw JSON block per effect id
//! - `CatapultConfig`: the typed tunables of the catapult effect
//!
//! Absent ids and absent keys fall back to built-in defaults. Configuration
//! is immutable once an effect has been built from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::EffectError;

/// Effect-type-keyed configuration document.
///
/// Ordered by id so that loading every configured effect is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectConfig {
    entries: BTreeMap<String, Value>,
}

impl EffectConfig {
    /// Create an empty configuration (every effect uses its defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration document.
    pub fn from_json(text: &str) -> Result<Self, EffectError> {
        serde_json::from_str(text).map_err(EffectError::MalformedConfig)
    }

    /// Set the configuration block of one effect.
    #[must_use]
    pub fn with_effect(mut self, id: impl Into<String>, block: Value) -> Self {
        self.entries.insert(id.into(), block);
        self
    }

    /// Get the configuration block of an effect, if one was provided.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    /// Iterate over the configured effect ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of configured effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no effect is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How an effect picks among several equally eligible wall parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSelection {
    /// One uniform draw among the candidates.
    #[default]
    Random,
    /// First candidate in priority order, no draw.
    Ordered,
}

/// Tunables of the catapult effect.
///
/// Chances are percentages. Out-of-range values are clamped into `0..=100`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatapultConfig {
    /// Shots fired per invocation.
    pub targets_to_attack: u32,

    /// Chance a shot aimed at the keep lands on it.
    #[serde(deserialize_with = "percent")]
    pub chance_to_hit_keep: u8,

    /// Chance a shot aimed at the gate lands on it.
    #[serde(deserialize_with = "percent")]
    pub chance_to_hit_gate: u8,

    /// Chance a shot aimed at a side tower lands on it.
    #[serde(deserialize_with = "percent")]
    pub chance_to_hit_tower: u8,

    /// Chance a shot aimed at a wall section lands on it.
    #[serde(deserialize_with = "percent")]
    pub chance_to_hit_wall: u8,

    /// Chance a shot that reached its part actually damages it.
    #[serde(deserialize_with = "percent")]
    pub chance_to_normal_hit: u8,

    /// Tie-break among several eligible parts.
    pub selection: TargetSelection,
}

impl Default for CatapultConfig {
    fn default() -> Self {
        Self {
            targets_to_attack: 1,
            chance_to_hit_keep: 5,
            chance_to_hit_gate: 25,
            chance_to_hit_tower: 10,
            chance_to_hit_wall: 50,
            chance_to_normal_hit: 60,
            selection: TargetSelection::Random,
        }
    }
}

impl CatapultConfig {
    /// Build from an effect's configuration block.
    pub fn from_value(effect: &str, block: &Value) -> Result<Self, EffectError> {
        let config: Self =
            serde_json::from_value(block.clone()).map_err(|source| EffectError::InvalidConfig {
                effect: effect.to_string(),
                source,
            })?;

        if config.targets_to_attack == 0 {
            return Err(EffectError::InvalidTargetsToAttack(0));
        }

        Ok(config)
    }

    /// Set the number of shots (builder pattern).
    #[must_use]
    pub fn with_targets(mut self, targets: u32) -> Self {
        self.targets_to_attack = targets;
        self
    }

    /// Set the damage chance (builder pattern).
    #[must_use]
    pub fn with_normal_hit(mut self, percent: u8) -> Self {
        self.chance_to_normal_hit = percent.min(100);
        self
    }

    /// Set the selection policy (builder pattern).
    #[must_use]
    pub fn with_selection(mut self, selection: TargetSelection) -> Self {
        self.selection = selection;
        self
    }
}

fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, 100) as u8)
}

//! Effect registry: effect ids to factories.
//!
//! The `EffectRegistry` builds effects by id from their configuration
//! blocks. `load` turns a whole [`EffectConfig`] into a ready `EffectSet`.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::catapult::{Catapult, CATAPULT};
use super::effect::Effect;
use crate::core::{EffectConfig, EffectError};

/// Builds an effect from its configuration block.
pub type EffectFactory = fn(&Value) -> Result<Box<dyn Effect>, EffectError>;

/// Registry of effect factories.
///
/// ## Example
///
/// ```
/// use battle_effects::effects::{Effect, EffectRegistry};
///
/// let registry = EffectRegistry::with_builtin();
///
/// let catapult = registry.create("core:catapult", None).unwrap();
/// assert_eq!(catapult.name(), "core:catapult");
/// assert!(registry.create("core:fireball", None).is_err());
/// ```
#[derive(Clone, Default)]
pub struct EffectRegistry {
    factories: FxHashMap<&'static str, EffectFactory>,
}

impl EffectRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in effect.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(CATAPULT, Catapult::from_config);
        registry
    }

    /// Register a factory.
    ///
    /// Panics if a factory with the same id already exists.
    pub fn register(&mut self, id: &'static str, factory: EffectFactory) {
        if self.factories.contains_key(id) {
            panic!("Effect with ID {id:?} already registered");
        }
        self.factories.insert(id, factory);
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build one effect. A missing block means built-in defaults.
    pub fn create(&self, id: &str, block: Option<&Value>) -> Result<Box<dyn Effect>, EffectError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| EffectError::UnknownEffect(id.to_string()))?;

        match block {
            Some(block) => factory(block),
            None => factory(&Value::Object(Map::new())),
        }
    }

    /// Build every registered effect, configured from `config`.
    ///
    /// Fails on the first configured id nothing is registered under, and on
    /// the first block its factory rejects.
    pub fn load(&self, config: &EffectConfig) -> Result<EffectSet, EffectError> {
        if let Some(unknown) = config.ids().find(|id| !self.contains(id)) {
            return Err(EffectError::UnknownEffect(unknown.to_string()));
        }

        let mut ids: Vec<&'static str> = self.factories.keys().copied().collect();
        ids.sort_unstable();

        let mut effects = BTreeMap::new();
        for id in ids {
            let effect = self.create(id, config.get(id))?;
            effects.insert(id.to_string(), effect);
        }

        debug!(effects = effects.len(), "effects loaded");
        Ok(EffectSet { effects })
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.factories.keys().collect();
        ids.sort_unstable();
        f.debug_struct("EffectRegistry").field("effects", &ids).finish()
    }
}

/// Effects ready to cast, by id.
#[derive(Debug, Default)]
pub struct EffectSet {
    effects: BTreeMap<String, Box<dyn Effect>>,
}

impl EffectSet {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Effect> {
        self.effects.get(id).map(Box::as_ref)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.effects.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

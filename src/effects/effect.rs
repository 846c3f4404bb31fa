//! The effect contract.

use std::fmt;

use super::mechanics::{Mechanics, Problem};
use super::target::EffectTarget;
use crate::server::ServerCallback;

/// A battle effect.
///
/// The caller always asks [`applicable`](Effect::applicable) first and only
/// calls [`apply`](Effect::apply) after it returned `true`. `apply` does not
/// re-check.
///
/// Effects hold no battle state. They read through [`Mechanics::battle`],
/// draw randomness from [`ServerCallback::rng`] and describe every change as
/// a pack handed to [`ServerCallback::apply`]. Given the same battle, target
/// and draws, an effect emits the same packs.
pub trait Effect: fmt::Debug {
    /// Registry id of this effect.
    fn name(&self) -> &'static str;

    /// Can this effect be cast right now?
    ///
    /// Read-only. Reports exactly one reason through `problem` when it
    /// returns `false`.
    fn applicable(&self, problem: &mut dyn Problem, m: &Mechanics<'_>) -> bool;

    /// Resolve the effect, emitting zero or more packs.
    fn apply(&self, server: &mut dyn ServerCallback, m: &Mechanics<'_>, target: &EffectTarget);
}

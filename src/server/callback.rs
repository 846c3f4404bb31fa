//! The channel effects emit through.

use tracing::trace;

use crate::battle::BattlePack;
use crate::core::RandomSource;

/// The server side of an effect invocation.
///
/// Packs are accepted in the order `apply` is called, and that order is
/// the order they are committed and broadcast in.
pub trait ServerCallback {
    /// Random source for this invocation.
    fn rng(&mut self) -> &mut dyn RandomSource;

    /// Accept one pack.
    fn apply(&mut self, pack: BattlePack);
}

/// Records every pack of one invocation.
///
/// Borrows the battle's RNG so that draws advance the shared stream.
pub struct BattleServer<'r> {
    rng: &'r mut dyn RandomSource,
    packs: Vec<BattlePack>,
}

impl<'r> BattleServer<'r> {
    pub fn new(rng: &'r mut dyn RandomSource) -> Self {
        Self {
            rng,
            packs: Vec::new(),
        }
    }

    /// Packs accepted so far, in emission order.
    #[must_use]
    pub fn packs(&self) -> &[BattlePack] {
        &self.packs
    }

    #[must_use]
    pub fn apply_count(&self) -> usize {
        self.packs.len()
    }

    #[must_use]
    pub fn into_packs(self) -> Vec<BattlePack> {
        self.packs
    }
}

impl ServerCallback for BattleServer<'_> {
    fn rng(&mut self) -> &mut dyn RandomSource {
        &mut *self.rng
    }

    fn apply(&mut self, pack: BattlePack) {
        trace!(index = self.packs.len(), ?pack, "pack accepted");
        self.packs.push(pack);
    }
}

//! Successor generation: the topmost-disc scan.

use crate::rules::{MoveRules, RodSet};
use crate::state::{CodecError, StateId, StateSpace};

/// Expands single states into their legal one-move successors.
///
/// The scan works from a decoded vector and a per-rod `movable` mask
/// instead of explicit stacks. Visiting discs smallest-first, a disc whose
/// rod is still unclaimed is the topmost occupant of that rod; a rod
/// already claimed by a smaller disc can neither be moved from nor landed
/// on. Each disc claims its rod once processed, so the mask reconstructs
/// the stacking constraint exactly.
pub struct Expander<'a, R: ?Sized> {
    space: &'a StateSpace,
    rules: &'a R,
}

impl<'a, R: MoveRules + ?Sized> Expander<'a, R> {
    pub fn new(space: &'a StateSpace, rules: &'a R) -> Self {
        Expander { space, rules }
    }

    /// Decode `id` into `scratch` and feed every legal successor id to
    /// `sink`, in deterministic order.
    ///
    /// Pure aside from the sink: the same id under the same rules always
    /// produces the same successors.
    pub fn expand(
        &self,
        id: StateId,
        scratch: &mut Vec<u8>,
        mut sink: impl FnMut(StateId),
    ) -> Result<(), CodecError> {
        self.space.decode_into(id, scratch)?;
        let mut movable = RodSet::all(self.space.rods());
        for disc in 0..scratch.len() {
            let rod = scratch[disc];
            if movable.contains(rod) {
                let targets = self.rules.legal_targets_in(scratch, disc) & movable;
                if !targets.is_empty() {
                    let w = self.space.weight(disc);
                    let base = id - rod as u64 * w;
                    for to in targets.iter() {
                        sink(base + to as u64 * w);
                    }
                }
            }
            movable.remove(rod);
        }
        Ok(())
    }

    /// Convenience for tests and callers that want the set directly.
    pub fn successors(&self, id: StateId) -> Result<Vec<StateId>, CodecError> {
        let mut scratch = Vec::new();
        let mut out = Vec::new();
        self.expand(id, &mut scratch, |succ| out.push(succ))?;
        Ok(out)
    }
}

//! Move-legality capability: which rods a disc may move to.
//!
//! The search engine is generic over a [`MoveRules`] value; every variant
//! difference lives in a rule table, never in engine branching. Most
//! variants are a plain rod digraph ([`RodGraph`]); variants that couple
//! the options of one disc to the position of another override the
//! state-aware hook.

use std::fmt;
use std::ops::BitAnd;

/// Largest rod count a [`RodSet`] can represent.
pub const MAX_RODS: u8 = 16;

/// Set of rods packed as a bitmask: bit `r` set ⇔ rod `r` is a member.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RodSet(u16);

impl RodSet {
    /// The empty set.
    pub const EMPTY: RodSet = RodSet(0);

    /// Every rod in `[0, rods)`.
    #[inline]
    pub fn all(rods: u8) -> Self {
        debug_assert!(rods <= MAX_RODS);
        RodSet(((1u32 << rods) - 1) as u16)
    }

    /// The one-element set `{rod}`.
    #[inline]
    pub fn single(rod: u8) -> Self {
        RodSet(1 << rod)
    }

    /// Set built from a rod list.
    #[inline]
    pub fn of(rods: &[u8]) -> Self {
        let mut set = RodSet::EMPTY;
        for &r in rods {
            set.insert(r);
        }
        set
    }

    #[inline]
    pub fn insert(&mut self, rod: u8) {
        self.0 |= 1 << rod;
    }

    #[inline]
    pub fn remove(&mut self, rod: u8) {
        self.0 &= !(1 << rod);
    }

    #[inline]
    pub fn contains(self, rod: u8) -> bool {
        self.0 & (1 << rod) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of member rods.
    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Member rods in ascending order.
    #[inline]
    pub fn iter(self) -> impl Iterator<Item = u8> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let rod = bits.trailing_zeros() as u8;
                bits &= bits - 1;
                Some(rod)
            }
        })
    }
}

impl BitAnd for RodSet {
    type Output = RodSet;

    #[inline]
    fn bitand(self, rhs: RodSet) -> RodSet {
        RodSet(self.0 & rhs.0)
    }
}

impl fmt::Debug for RodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Per-variant move-legality capability consumed by the search engine.
///
/// Implementations must be pure and stateless: the same inputs always
/// yield the same target set, and a target set never includes the disc's
/// current rod.
pub trait MoveRules: Sync {
    /// Rods a disc on `rod` may move to directly.
    fn legal_targets(&self, rod: u8, disc: usize) -> RodSet;

    /// State-aware hook; `state[disc]` is the disc's current rod. The
    /// default ignores the rest of the state. Variants whose legality for
    /// one disc depends on where other discs sit override this.
    #[inline]
    fn legal_targets_in(&self, state: &[u8], disc: usize) -> RodSet {
        self.legal_targets(state[disc], disc)
    }
}

impl<T: MoveRules + ?Sized> MoveRules for &T {
    #[inline]
    fn legal_targets(&self, rod: u8, disc: usize) -> RodSet {
        (**self).legal_targets(rod, disc)
    }

    #[inline]
    fn legal_targets_in(&self, state: &[u8], disc: usize) -> RodSet {
        (**self).legal_targets_in(state, disc)
    }
}

/// Uniform rod-adjacency table: every disc follows the same rod digraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RodGraph {
    adj: Vec<RodSet>,
}

impl RodGraph {
    /// Table from explicit per-rod target sets.
    pub fn new(adj: Vec<RodSet>) -> Self {
        RodGraph { adj }
    }

    /// Complete graph: any rod to any other.
    pub fn complete(rods: u8) -> Self {
        let everything = RodSet::all(rods);
        let adj = (0..rods)
            .map(|r| {
                let mut set = everything;
                set.remove(r);
                set
            })
            .collect();
        RodGraph { adj }
    }

    /// Star with `hub` at the center: leaves exchange discs only with the
    /// hub, the hub reaches every leaf.
    pub fn star(rods: u8, hub: u8) -> Self {
        let mut spokes = RodSet::all(rods);
        spokes.remove(hub);
        let adj = (0..rods)
            .map(|r| if r == hub { spokes } else { RodSet::single(hub) })
            .collect();
        RodGraph { adj }
    }

    /// Symmetric graph from an undirected edge list.
    pub fn from_edges(rods: u8, edges: &[(u8, u8)]) -> Self {
        let mut adj = vec![RodSet::EMPTY; rods as usize];
        for &(a, b) in edges {
            adj[a as usize].insert(b);
            adj[b as usize].insert(a);
        }
        RodGraph { adj }
    }

    /// Number of rods covered by the table.
    #[inline]
    pub fn rods(&self) -> u8 {
        self.adj.len() as u8
    }

    /// True when every edge has its reverse.
    pub fn is_symmetric(&self) -> bool {
        (0..self.rods()).all(|a| {
            self.adj[a as usize]
                .iter()
                .all(|b| self.adj[b as usize].contains(a))
        })
    }
}

impl MoveRules for RodGraph {
    #[inline]
    fn legal_targets(&self, rod: u8, _disc: usize) -> RodSet {
        self.adj[rod as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rod_set_ops() {
        let mut set = RodSet::EMPTY;
        assert!(set.is_empty());
        set.insert(0);
        set.insert(3);
        assert!(set.contains(0) && set.contains(3) && !set.contains(1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 3]);
        set.remove(0);
        assert_eq!(set, RodSet::single(3));
        assert_eq!(RodSet::of(&[1, 2]) & RodSet::of(&[2, 3]), RodSet::single(2));
        assert_eq!(RodSet::all(4), RodSet::of(&[0, 1, 2, 3]));
        assert_eq!(RodSet::all(16).len(), 16);
    }

    #[test]
    fn complete_graph_targets() {
        let g = RodGraph::complete(3);
        assert_eq!(g.legal_targets(0, 0), RodSet::of(&[1, 2]));
        assert_eq!(g.legal_targets(2, 5), RodSet::of(&[0, 1]));
        assert!(g.is_symmetric());
    }

    #[test]
    fn star_graph_targets() {
        let g = RodGraph::star(4, 0);
        assert_eq!(g.legal_targets(0, 0), RodSet::of(&[1, 2, 3]));
        assert_eq!(g.legal_targets(1, 0), RodSet::single(0));
        assert_eq!(g.legal_targets(3, 9), RodSet::single(0));
        assert!(g.is_symmetric());
    }

    #[test]
    fn edge_list_graph() {
        // Path 0-3-2-1.
        let g = RodGraph::from_edges(4, &[(0, 3), (3, 2), (2, 1)]);
        assert_eq!(g.legal_targets(0, 0), RodSet::single(3));
        assert_eq!(g.legal_targets(3, 0), RodSet::of(&[0, 2]));
        assert_eq!(g.legal_targets(2, 0), RodSet::of(&[1, 3]));
        assert_eq!(g.legal_targets(1, 0), RodSet::single(2));
        assert!(g.is_symmetric());
    }

    #[test]
    fn asymmetry_detected() {
        let g = RodGraph::new(vec![RodSet::single(1), RodSet::EMPTY]);
        assert!(!g.is_symmetric());
    }

    #[test]
    fn default_state_hook_uses_own_rod() {
        let g = RodGraph::star(4, 0);
        let state = [2u8, 0, 1];
        assert_eq!(g.legal_targets_in(&state, 0), RodSet::single(0));
        assert_eq!(g.legal_targets_in(&state, 1), RodSet::of(&[1, 2, 3]));
    }
}

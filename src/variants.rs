//! The named puzzle presets: rod tables plus start/goal constructions.
//!
//! Family naming follows the underlying rod graph, always over four rods:
//! `K13` is the star K1,3 with rod 0 as the hub; `K13e` adds the 2-3 edge
//! to the star; `P4` is the path 0-3-2-1; `C4` the cycle 0-2-1-3; `K4e`
//! the complete graph minus the 2-3 edge. The digit suffix names the
//! start and goal rods, e.g. `K13e_12` carries the tower from rod 1 to
//! rod 2.
//!
//! Every preset is pure data consumed by the generic engine; the only
//! non-table rule set is [`StarAnchored`], which couples the two largest
//! discs of `K13_01`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::rules::{MoveRules, RodGraph, RodSet};
use crate::search::DedupPolicy;
use crate::state::{CodecError, StateId, StateSpace};

/// Rod count shared by every preset.
pub const RODS: u8 = 4;

/// The named puzzle presets.
#[allow(non_camel_case_types)] // names follow the published puzzle families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    K13_01,
    K13_12,
    K13e_01,
    K13e_12,
    K13e_23,
    K13e_30,
    P4_01,
    P4_12,
    P4_23,
    P4_31,
    C4_01,
    C4_12,
    K4e_01,
    K4e_12,
    K4e_23,
}

/// A variant name that matched none of the presets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown variant {0:?} (expected one of K13_01, K13_12, K13e_01, K13e_12, K13e_23, K13e_30, P4_01, P4_12, P4_23, P4_31, C4_01, C4_12, K4e_01, K4e_12, K4e_23)")]
pub struct UnknownVariant(String);

impl Variant {
    pub const ALL: [Variant; 15] = [
        Variant::K13_01,
        Variant::K13_12,
        Variant::K13e_01,
        Variant::K13e_12,
        Variant::K13e_23,
        Variant::K13e_30,
        Variant::P4_01,
        Variant::P4_12,
        Variant::P4_23,
        Variant::P4_31,
        Variant::C4_01,
        Variant::C4_12,
        Variant::K4e_01,
        Variant::K4e_12,
        Variant::K4e_23,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::K13_01 => "K13_01",
            Variant::K13_12 => "K13_12",
            Variant::K13e_01 => "K13e_01",
            Variant::K13e_12 => "K13e_12",
            Variant::K13e_23 => "K13e_23",
            Variant::K13e_30 => "K13e_30",
            Variant::P4_01 => "P4_01",
            Variant::P4_12 => "P4_12",
            Variant::P4_23 => "P4_23",
            Variant::P4_31 => "P4_31",
            Variant::C4_01 => "C4_01",
            Variant::C4_12 => "C4_12",
            Variant::K4e_01 => "K4e_01",
            Variant::K4e_12 => "K4e_12",
            Variant::K4e_23 => "K4e_23",
        }
    }

    /// Rods the tower starts on and must reach.
    pub fn endpoints_rods(self) -> (u8, u8) {
        match self {
            Variant::K13_01 => (0, 1),
            Variant::K13_12 => (2, 1),
            Variant::K13e_01 => (0, 1),
            Variant::K13e_12 => (1, 2),
            Variant::K13e_23 => (2, 3),
            Variant::K13e_30 => (3, 0),
            Variant::P4_01 => (0, 1),
            Variant::P4_12 => (1, 2),
            Variant::P4_23 => (2, 3),
            Variant::P4_31 => (3, 1),
            Variant::C4_01 => (0, 1),
            Variant::C4_12 => (1, 2),
            Variant::K4e_01 => (0, 1),
            Variant::K4e_12 => (1, 2),
            Variant::K4e_23 => (2, 3),
        }
    }

    /// Rule table for `discs` discs.
    pub fn rules(self, discs: u8) -> VariantRules {
        match self {
            Variant::K13_01 => VariantRules::StarAnchored(StarAnchored::new(discs)),
            Variant::K13_12 => VariantRules::Graph(star()),
            Variant::K13e_01 | Variant::K13e_12 | Variant::K13e_23 | Variant::K13e_30 => {
                VariantRules::Graph(star_plus())
            }
            Variant::P4_01 | Variant::P4_12 | Variant::P4_23 | Variant::P4_31 => {
                VariantRules::Graph(path())
            }
            Variant::C4_01 | Variant::C4_12 => VariantRules::Graph(cycle()),
            Variant::K4e_01 | Variant::K4e_12 | Variant::K4e_23 => {
                VariantRules::Graph(k4_minus_edge())
            }
        }
    }

    /// State space for `discs` discs over the preset's four rods.
    pub fn space(self, discs: u8) -> Result<StateSpace, CodecError> {
        StateSpace::new(RODS, discs)
    }

    /// Initial and target identifiers in `space`.
    pub fn endpoints(self, space: &StateSpace) -> Result<(StateId, StateId), CodecError> {
        let (from, to) = self.endpoints_rods();
        Ok((space.uniform(from)?, space.uniform(to)?))
    }

    /// Deduplication policy that is both sound and economical for this
    /// preset. The single-level filter pays off only when every move
    /// flips a two-coloring of the rod graph, so frontiers never echo;
    /// the star-with-extra-edge and near-complete families contain odd
    /// cycles, and `K13_01` has a one-way move, so they keep the full
    /// visited set.
    pub fn recommended_dedup(self) -> DedupPolicy {
        match self {
            Variant::K13_12
            | Variant::P4_01
            | Variant::P4_12
            | Variant::P4_23
            | Variant::P4_31
            | Variant::C4_01
            | Variant::C4_12 => DedupPolicy::PreviousFrontier,
            _ => DedupPolicy::FullVisited,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

fn star() -> RodGraph {
    RodGraph::star(RODS, 0)
}

fn star_plus() -> RodGraph {
    RodGraph::from_edges(RODS, &[(0, 1), (0, 2), (0, 3), (2, 3)])
}

fn path() -> RodGraph {
    RodGraph::from_edges(RODS, &[(0, 3), (3, 2), (2, 1)])
}

fn cycle() -> RodGraph {
    RodGraph::from_edges(RODS, &[(0, 2), (2, 1), (1, 3), (3, 0)])
}

fn k4_minus_edge() -> RodGraph {
    RodGraph::from_edges(RODS, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3)])
}

/// Rule table of a preset: a plain rod graph, or the star with the two
/// largest discs anchored.
#[derive(Debug, Clone)]
pub enum VariantRules {
    Graph(RodGraph),
    StarAnchored(StarAnchored),
}

impl MoveRules for VariantRules {
    #[inline]
    fn legal_targets(&self, rod: u8, disc: usize) -> RodSet {
        match self {
            VariantRules::Graph(g) => g.legal_targets(rod, disc),
            VariantRules::StarAnchored(s) => s.legal_targets(rod, disc),
        }
    }

    #[inline]
    fn legal_targets_in(&self, state: &[u8], disc: usize) -> RodSet {
        match self {
            VariantRules::Graph(g) => g.legal_targets_in(state, disc),
            VariantRules::StarAnchored(s) => s.legal_targets_in(state, disc),
        }
    }
}

/// Star rules with the two largest discs anchored: the largest disc makes
/// at most one move, hub to rod 1, and the second-largest disc's options
/// depend on where the largest currently sits.
#[derive(Debug, Clone)]
pub struct StarAnchored {
    base: RodGraph,
    discs: u8,
}

impl StarAnchored {
    pub fn new(discs: u8) -> Self {
        StarAnchored { base: star(), discs }
    }
}

impl MoveRules for StarAnchored {
    /// Base star table; the anchored discs are resolved in
    /// [`MoveRules::legal_targets_in`], which the engine consults.
    #[inline]
    fn legal_targets(&self, rod: u8, disc: usize) -> RodSet {
        self.base.legal_targets(rod, disc)
    }

    fn legal_targets_in(&self, state: &[u8], disc: usize) -> RodSet {
        let n = self.discs as usize;
        if n < 2 {
            return self.base.legal_targets(state[disc], disc);
        }
        if disc == n - 1 {
            // One-shot move of the largest disc off the hub.
            return if state[disc] == 0 { RodSet::single(1) } else { RodSet::EMPTY };
        }
        if disc == n - 2 {
            return match (state[disc], state[n - 1]) {
                (0, 0) => RodSet::of(&[2, 3]),
                (0, 1) => RodSet::single(1),
                (rod, 1) if rod > 1 => RodSet::single(0),
                _ => RodSet::EMPTY,
            };
        }
        self.base.legal_targets(state[disc], disc)
    }
}

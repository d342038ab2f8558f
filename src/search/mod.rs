//! Level-synchronous breadth-first search over the implicit move graph.
//!
//! The engine never materializes the graph: each level, every state of the
//! current frontier is expanded in parallel through the rule capability,
//! successors are collected into a shared concurrent set, and the drained
//! set becomes the next frontier. The reported distance is deterministic
//! regardless of thread count, because level composition has set semantics.
//!
//! Quick start
//! ```
//! use hanoi_search::rules::RodGraph;
//! use hanoi_search::search::{Bfs, Outcome};
//! use hanoi_search::state::StateSpace;
//!
//! let space = StateSpace::new(3, 3).unwrap();
//! let rules = RodGraph::complete(3);
//! let initial = space.uniform(0).unwrap();
//! let target = space.uniform(1).unwrap();
//! match Bfs::new().search(&space, &rules, initial, target).unwrap() {
//!     Outcome::Found { distance, .. } => assert_eq!(distance, 7),
//!     Outcome::Exhausted { .. } => unreachable!("complete graph"),
//! }
//! ```

mod engine;
mod expand;
mod memory;

pub use engine::Bfs;
pub use expand::Expander;
pub use memory::{resident_bytes, MemoryMonitor};

use serde::Serialize;
use thiserror::Error;

use crate::state::CodecError;

/// Candidate-deduplication history kept while levels advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Filter successors against every state seen so far. Always sound,
    /// and the only policy that guarantees exhaustion is detected when the
    /// target is unreachable.
    #[default]
    FullVisited,
    /// Filter only against the immediately preceding level, discarding
    /// older history. Uses far less memory, but is only sound for move
    /// relations that are symmetric with no skip-level edges; opt in per
    /// rule set.
    PreviousFrontier,
}

impl DedupPolicy {
    /// Short name used in CLI output and logs.
    pub fn name(self) -> &'static str {
        match self {
            DedupPolicy::FullVisited => "visited",
            DedupPolicy::PreviousFrontier => "last-level",
        }
    }
}

/// Engine knobs. The default favors correctness over memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsConfig {
    /// Deduplication history policy.
    pub dedup: DedupPolicy,
}

/// Diagnostics accumulated across one search. Purely observational; the
/// search never consults them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Largest frontier cardinality reached.
    pub peak_frontier: usize,
    /// Largest per-level resident-memory sample, in bytes (0 on platforms
    /// without a memory probe).
    pub peak_memory_bytes: u64,
    /// Completed expansion passes.
    pub levels: u64,
}

/// Terminal result of a search. An unreachable target is an outcome, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The target lies `distance` moves from the initial state.
    Found { distance: u64, stats: SearchStats },
    /// The frontier emptied without reaching the target.
    Exhausted { stats: SearchStats },
}

impl Outcome {
    /// The distance when the target was found.
    pub fn distance(&self) -> Option<u64> {
        match *self {
            Outcome::Found { distance, .. } => Some(distance),
            Outcome::Exhausted { .. } => None,
        }
    }

    /// Diagnostics regardless of how the search ended.
    pub fn stats(&self) -> SearchStats {
        match *self {
            Outcome::Found { stats, .. } | Outcome::Exhausted { stats } => stats,
        }
    }
}

/// Fatal search failures. These abort the search with no partial result;
/// an unreachable target is reported through [`Outcome::Exhausted`]
/// instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// A state or identifier outside the space.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The level counter would wrap. Surfaced explicitly; move counts grow
    /// exponentially in the disc count for several variants.
    #[error("search distance exceeded the representable range")]
    DistanceOverflow,
}

/// Level-boundary observation passed to [`Bfs::search_observed`]
/// subscribers after each completed level.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelReport {
    /// Distance of the states in the new frontier.
    pub distance: u64,
    /// Cardinality of the new frontier.
    pub frontier: usize,
    /// Resident-memory sample taken at this boundary, in bytes.
    pub resident_bytes: u64,
}

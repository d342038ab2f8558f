//! hanoi-search: shortest move counts for generalized Tower of Hanoi
//! puzzles, computed by parallel breadth-first search.
//!
//! This crate provides:
//! - A compact state codec (`state` module) packing a disc-position
//!   vector into a single base-R integer
//! - A pluggable move-legality capability (`rules` module): rod digraphs
//!   and per-disc overrides, consumed generically by the engine
//! - A level-synchronous parallel BFS engine (`search` module) with
//!   per-level diagnostics and a choice of deduplication policy
//! - The fifteen published puzzle presets (`variants` module) as pure
//!   data
//!
//! Quick start:
//! ```
//! use hanoi_search::search::{Bfs, Outcome};
//! use hanoi_search::variants::Variant;
//!
//! // The star-plus-one-edge puzzle, one disc, rod 0 to rod 1.
//! let variant: Variant = "K13e_01".parse().unwrap();
//! let space = variant.space(1).unwrap();
//! let rules = variant.rules(1);
//! let (initial, target) = variant.endpoints(&space).unwrap();
//! let outcome = Bfs::new().search(&space, &rules, initial, target).unwrap();
//! assert_eq!(outcome.distance(), Some(1));
//! ```
//!
//! The distance reported is deterministic for any rayon worker count;
//! pin a pool with `rayon::ThreadPoolBuilder` and `install` when you
//! need a specific level of parallelism.

pub mod rules;
pub mod search;
pub mod state;
pub mod variants;

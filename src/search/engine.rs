//! The level-synchronous search loop.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use ahash::RandomState as AHasher;
use dashmap::DashSet;
use log::{debug, info};
use rayon::prelude::*;

use super::expand::Expander;
use super::memory::MemoryMonitor;
use super::{BfsConfig, DedupPolicy, LevelReport, Outcome, SearchError, SearchStats};
use crate::rules::MoveRules;
use crate::state::{StateId, StateSpace};

type IdSet = HashSet<StateId, AHasher>;

/// Breadth-first shortest-distance driver.
///
/// Owns nothing but its configuration; every search call is independent.
/// One search holds at most three levels of states at a time under
/// [`DedupPolicy::PreviousFrontier`] (previous, current, candidates), or
/// the full visited set under the default policy.
#[derive(Debug, Clone, Default)]
pub struct Bfs {
    cfg: BfsConfig,
}

impl Bfs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: BfsConfig) -> Self {
        Bfs { cfg }
    }

    pub fn config(&self) -> &BfsConfig {
        &self.cfg
    }

    /// Distance from `initial` to `target` under `rules`.
    ///
    /// Runs on the current rayon pool; wrap the call in
    /// `ThreadPool::install` to pin a worker count. The distance is
    /// identical for any worker count.
    pub fn search<R>(
        &self,
        space: &StateSpace,
        rules: &R,
        initial: StateId,
        target: StateId,
    ) -> Result<Outcome, SearchError>
    where
        R: MoveRules + ?Sized,
    {
        self.search_observed(space, rules, initial, target, |_| {})
    }

    /// Like [`Bfs::search`], invoking `observe` after every completed
    /// level with the new distance, frontier cardinality, and memory
    /// sample. The observer is for reporting only; it cannot influence
    /// the search.
    pub fn search_observed<R, F>(
        &self,
        space: &StateSpace,
        rules: &R,
        initial: StateId,
        target: StateId,
        mut observe: F,
    ) -> Result<Outcome, SearchError>
    where
        R: MoveRules + ?Sized,
        F: FnMut(LevelReport),
    {
        space.validate_id(initial)?;
        space.validate_id(target)?;
        info!(
            "searching {} discs over {} rods ({} states, dedup {})",
            space.discs(),
            space.rods(),
            space.capacity(),
            self.cfg.dedup.name()
        );

        let expander = Expander::new(space, rules);
        let mut memory = MemoryMonitor::new();
        let mut stats = SearchStats::default();

        let mut previous = IdSet::default();
        let mut current = IdSet::default();
        current.insert(initial);
        // Under FullVisited this accumulates every discovered state and
        // doubles as the dedup filter; under PreviousFrontier it stays
        // empty and `previous` is the filter.
        let mut visited = IdSet::default();
        if self.cfg.dedup == DedupPolicy::FullVisited {
            visited.insert(initial);
        }

        let mut distance: u64 = 0;

        loop {
            stats.peak_frontier = stats.peak_frontier.max(current.len());

            if current.contains(&target) {
                memory.sample();
                stats.peak_memory_bytes = memory.peak();
                info!("found at distance {} ({} levels expanded)", distance, stats.levels);
                return Ok(Outcome::Found { distance, stats });
            }

            let candidates: DashSet<StateId, AHasher> =
                DashSet::with_capacity_and_hasher(current.len(), AHasher::new());
            // Monotonic false→true flag, written with relaxed ordering and
            // read only after the parallel pass joins.
            let target_seen = AtomicBool::new(false);
            let filter: &IdSet = match self.cfg.dedup {
                DedupPolicy::FullVisited => &visited,
                DedupPolicy::PreviousFrontier => &previous,
            };

            current.par_iter().try_for_each_init(
                || Vec::with_capacity(space.discs() as usize),
                |scratch, &id| -> Result<(), SearchError> {
                    expander.expand(id, scratch, |succ| {
                        if succ == target {
                            target_seen.store(true, Ordering::Relaxed);
                        }
                        if !filter.contains(&succ) {
                            candidates.insert(succ);
                        }
                    })?;
                    Ok(())
                },
            )?;

            stats.levels += 1;
            let next_distance = distance
                .checked_add(1)
                .ok_or(SearchError::DistanceOverflow)?;
            let resident = memory.sample();
            stats.peak_memory_bytes = memory.peak();

            if target_seen.load(Ordering::Relaxed) {
                info!("found at distance {} ({} levels expanded)", next_distance, stats.levels);
                return Ok(Outcome::Found { distance: next_distance, stats });
            }

            previous = std::mem::take(&mut current);
            current = candidates.into_iter().collect();
            distance = next_distance;

            if current.is_empty() {
                info!("frontier exhausted at distance {}", distance);
                return Ok(Outcome::Exhausted { stats });
            }

            if self.cfg.dedup == DedupPolicy::FullVisited {
                visited.extend(current.iter().copied());
            }

            debug!(
                "distance {} frontier {} resident {}B",
                distance,
                current.len(),
                resident
            );
            observe(LevelReport { distance, frontier: current.len(), resident_bytes: resident });
        }
    }
}

//! Transposition table for caching search results.

use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::{BuildHasherDefault, Hash};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug)]
pub struct TTEntry<M: Clone> {
    pub score: i16,
    pub depth: u8,
    pub bound_type: BoundType,
    pub best_move: Option<M>,
}

/// How a stored score relates to the true value of the position.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BoundType {
    /// The search finished inside its window.
    Exact,
    /// Failed high: the true value is at least the score.
    Lower,
    /// Failed low: the true value is at most the score.
    Upper,
}

impl BoundType {
    /// Classifies a fail-soft result against the window it was searched with.
    pub fn classify(score: i16, original_alpha: i16, original_beta: i16) -> Self {
        if score <= original_alpha {
            BoundType::Upper
        } else if score >= original_beta {
            BoundType::Lower
        } else {
            BoundType::Exact
        }
    }
}

pub const DEFAULT_TT_CAPACITY: usize = 1 << 16;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Sharded concurrent map from position keys to search results. Each probe
/// and each store is atomic with respect to other threads.
pub struct TranspositionTable<K: Eq + Hash, M: Clone> {
    table: DashMap<K, TTEntry<M>, FxBuildHasher>,
    hits: AtomicUsize,
    depth_rejected: AtomicUsize,
    bound_rejected: AtomicUsize,
    overwrites: AtomicUsize,
}

impl<K: Eq + Hash, M: Clone> Default for TranspositionTable<K, M> {
    fn default() -> Self {
        Self::new(DEFAULT_TT_CAPACITY)
    }
}

impl<K: Eq + Hash, M: Clone> TranspositionTable<K, M> {
    pub fn new(capacity: usize) -> Self {
        Self {
            table: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            hits: AtomicUsize::new(0),
            depth_rejected: AtomicUsize::new(0),
            bound_rejected: AtomicUsize::new(0),
            overwrites: AtomicUsize::new(0),
        }
    }

    pub fn store(
        &self,
        key: K,
        score: i16,
        depth: u8,
        bound_type: BoundType,
        best_move: Option<M>,
    ) {
        let entry = TTEntry {
            score,
            depth,
            bound_type,
            best_move,
        };

        // Always replace.
        if self.table.insert(key, entry).is_some() {
            self.overwrites.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Probe for a cutoff at `depth` inside the `(alpha, beta)` window.
    ///
    /// Returns `(Some(score), best_move)` when the stored result may replace a
    /// search: it was computed at the same remaining depth, and it is exact or
    /// a bound that already falls outside the window. Otherwise the stored
    /// move (if any) is still returned for move ordering.
    ///
    /// Depths must match exactly rather than "at least as deep": a deeper
    /// result would make the same request answer differently depending on
    /// what was searched before it.
    pub fn probe_with_move(
        &self,
        key: &K,
        depth: u8,
        alpha: i16,
        beta: i16,
    ) -> (Option<i16>, Option<M>) {
        let entry = match self.table.get(key) {
            Some(entry) => entry,
            None => return (None, None),
        };
        let best_move = entry.best_move.clone();

        if entry.depth != depth {
            self.depth_rejected.fetch_add(1, Ordering::Relaxed);
            return (None, best_move);
        }

        let usable = match entry.bound_type {
            BoundType::Exact => true,
            BoundType::Lower => entry.score >= beta,
            BoundType::Upper => entry.score <= alpha,
        };
        if usable {
            self.hits.fetch_add(1, Ordering::Relaxed);
            (Some(entry.score), best_move)
        } else {
            self.bound_rejected.fetch_add(1, Ordering::Relaxed);
            (None, best_move)
        }
    }

    pub fn probe(&self, key: &K, depth: u8, alpha: i16, beta: i16) -> Option<(i16, Option<M>)> {
        match self.probe_with_move(key, depth, alpha, beta) {
            (Some(score), best_move) => Some((score, best_move)),
            (None, _) => None,
        }
    }

    pub fn get_move(&self, key: &K) -> Option<M> {
        self.table
            .get(key)
            .and_then(|entry| entry.best_move.clone())
    }

    pub fn clear(&self) {
        self.table.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.depth_rejected.store(0, Ordering::Relaxed);
        self.bound_rejected.store(0, Ordering::Relaxed);
        self.overwrites.store(0, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn depth_rejected(&self) -> usize {
        self.depth_rejected.load(Ordering::Relaxed)
    }

    pub fn bound_rejected(&self) -> usize {
        self.bound_rejected.load(Ordering::Relaxed)
    }

    pub fn overwrites(&self) -> usize {
        self.overwrites.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_entries_hit_inside_any_window() {
        let table = TranspositionTable::<u64, u8>::new(16);
        table.store(1, 10, 3, BoundType::Exact, Some(2));

        assert_eq!(table.probe(&1, 3, i16::MIN, i16::MAX), Some((10, Some(2))));
        assert_eq!(table.probe(&1, 3, 20, 30), Some((10, Some(2))));
        assert_eq!(table.hits(), 2);
    }

    #[test]
    fn test_lower_bound_only_cuts_at_or_above_beta() {
        let table = TranspositionTable::<u64, u8>::new(16);
        table.store(1, 10, 3, BoundType::Lower, Some(4));

        assert_eq!(table.probe(&1, 3, 0, 10), Some((10, Some(4))));
        assert_eq!(table.probe_with_move(&1, 3, 0, 20), (None, Some(4)));
        assert_eq!(table.bound_rejected(), 1);
    }

    #[test]
    fn test_upper_bound_only_cuts_at_or_below_alpha() {
        let table = TranspositionTable::<u64, u8>::new(16);
        table.store(1, -5, 2, BoundType::Upper, None);

        assert_eq!(table.probe(&1, 2, -5, 10), Some((-5, None)));
        assert_eq!(table.probe(&1, 2, -10, 10), None);
    }

    #[test]
    fn test_depth_must_match() {
        let table = TranspositionTable::<u64, u8>::new(16);
        table.store(7, 3, 4, BoundType::Exact, Some(1));

        assert_eq!(table.probe_with_move(&7, 3, i16::MIN, i16::MAX), (None, Some(1)));
        assert_eq!(table.probe_with_move(&7, 5, i16::MIN, i16::MAX), (None, Some(1)));
        assert_eq!(table.depth_rejected(), 2);
        assert_eq!(table.get_move(&7), Some(1));
    }

    #[test]
    fn test_store_overwrites_and_clear_resets() {
        let table = TranspositionTable::<u64, u8>::new(16);
        table.store(1, 1, 1, BoundType::Exact, None);
        table.store(1, 2, 1, BoundType::Exact, None);
        assert_eq!(table.overwrites(), 1);
        assert_eq!(table.size(), 1);
        assert_eq!(table.probe(&1, 1, i16::MIN, i16::MAX), Some((2, None)));

        table.clear();
        assert_eq!(table.size(), 0);
        assert_eq!(table.hits(), 0);
        assert_eq!(table.probe(&1, 1, i16::MIN, i16::MAX), None);
    }

    #[test]
    fn test_classify_bounds() {
        assert_eq!(BoundType::classify(5, 5, 10), BoundType::Upper);
        assert_eq!(BoundType::classify(10, 5, 10), BoundType::Lower);
        assert_eq!(BoundType::classify(7, 5, 10), BoundType::Exact);
    }
}

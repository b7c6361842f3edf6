//! Single-slot per-seed cache for derived generation tables.

use std::sync::{Arc, PoisonError, RwLock};

/// Caches a value derived from the world seed, rebuilding it when the seed changes.
///
/// The slot holds at most one `(seed, value)` pair. Readers share the cached
/// value through an [`Arc`]. When the seed differs, the value is built outside
/// the lock and then stored, overwriting whatever a concurrent builder stored.
/// Both builders run the same deterministic function of the seed, so the race
/// is benign.
pub struct SeedCache<T> {
    slot: RwLock<Option<(u64, Arc<T>)>>,
}

impl<T> SeedCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Returns the value for `seed`, building it with `build` on a miss.
    pub fn get_or_build(&self, seed: u64, build: impl FnOnce(u64) -> T) -> Arc<T> {
        if let Some(hit) = self.cached(seed) {
            return hit;
        }

        tracing::debug!(
            seed,
            table = std::any::type_name::<T>(),
            "building per-seed tables"
        );
        let built = Arc::new(build(seed));

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some((seed, Arc::clone(&built)));
        built
    }

    /// Returns the cached value if it was built for `seed`.
    pub fn cached(&self, seed: u64) -> Option<Arc<T>> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some((cached_seed, value)) if *cached_seed == seed => Some(Arc::clone(value)),
            _ => None,
        }
    }

    /// Seed of the currently cached value, if any.
    pub fn seed(&self) -> Option<u64> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|(seed, _)| *seed)
    }

    /// Drops the cached value so the next lookup rebuilds it.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

impl<T> Default for SeedCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builds_once_per_seed() {
        let cache = SeedCache::new();
        let builds = AtomicUsize::new(0);
        let build = |seed: u64| {
            builds.fetch_add(1, Ordering::SeqCst);
            seed * 2
        };

        assert_eq!(*cache.get_or_build(21, build), 42);
        assert_eq!(*cache.get_or_build(21, build), 42);
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rebuilds_when_seed_changes() {
        let cache = SeedCache::new();
        assert_eq!(*cache.get_or_build(1, |s| s + 100), 101);
        assert_eq!(*cache.get_or_build(2, |s| s + 100), 102);
        assert_eq!(cache.seed(), Some(2));
        assert!(cache.cached(1).is_none());
    }

    #[test]
    fn test_invalidate_forces_rebuild() {
        let cache = SeedCache::new();
        cache.get_or_build(5, |s| s);
        cache.invalidate();
        assert_eq!(cache.seed(), None);

        let builds = AtomicUsize::new(0);
        cache.get_or_build(5, |s| {
            builds.fetch_add(1, Ordering::SeqCst);
            s
        });
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_lookups_agree() {
        let cache = Arc::new(SeedCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_build(77, |s| vec![s; 64]).to_vec())
            })
            .collect();
        let results: Vec<Vec<u64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|r| r == &vec![77; 64]));
        assert_eq!(cache.seed(), Some(77));
    }
}

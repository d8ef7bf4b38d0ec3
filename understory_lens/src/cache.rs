// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::error::HostError;
use crate::host::ContentSource;

/// Holds the single live content snapshot shown inside the lens.
///
/// Capturing scene content is expensive; recomputing the lens transform is
/// not. The cache therefore only re-captures when it is marked dirty (on
/// activation, or through [`ContentCache::invalidate`]) or when it is empty.
/// Ordinary pointer moves reuse the existing snapshot.
#[derive(Debug)]
pub struct ContentCache<S> {
    snapshot: Option<S>,
    dirty: bool,
    captures: u64,
}

impl<S> Default for ContentCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ContentCache<S> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshot: None,
            dirty: true,
            captures: 0,
        }
    }

    /// Marks the cached snapshot stale; the next [`ensure_snapshot`](Self::ensure_snapshot)
    /// captures a fresh one.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Returns `true` if the next update will capture.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.snapshot.is_none()
    }

    /// Returns the current snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&S> {
        self.snapshot.as_ref()
    }

    /// Number of snapshots captured over the cache's lifetime.
    #[must_use]
    pub fn captures(&self) -> u64 {
        self.captures
    }

    /// Returns a snapshot, capturing a new one from `source` if `dirty`, if
    /// the cache was invalidated, or if it is empty.
    ///
    /// The previous snapshot is handed back through [`ContentSource::release`]
    /// before the new one is captured, so at most one snapshot is ever live.
    /// A failed capture leaves the cache empty and dirty.
    pub fn ensure_snapshot<C>(&mut self, dirty: bool, source: &mut C) -> Result<&S, HostError>
    where
        C: ContentSource<Snapshot = S> + ?Sized,
    {
        let reuse = !dirty && !self.dirty;
        match self.snapshot.take() {
            Some(current) if reuse => Ok(self.snapshot.insert(current)),
            previous => {
                self.dirty = true;
                if let Some(old) = previous {
                    source.release(old);
                }
                let fresh = source.capture()?;
                self.dirty = false;
                self.captures += 1;
                tracing::debug!(captures = self.captures, "captured lens snapshot");
                Ok(self.snapshot.insert(fresh))
            }
        }
    }

    /// Releases the current snapshot (if any) and marks the cache dirty.
    pub fn clear<C>(&mut self, source: &mut C)
    where
        C: ContentSource<Snapshot = S> + ?Sized,
    {
        if let Some(old) = self.snapshot.take() {
            source.release(old);
        }
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::ContentCache;
    use crate::error::HostError;
    use crate::host::ContentSource;

    #[derive(Default)]
    struct Counter {
        next: u32,
        released: Vec<u32>,
        fail: bool,
        live: u32,
        peak_live: u32,
    }

    impl ContentSource for Counter {
        type Snapshot = u32;

        fn capture(&mut self) -> Result<u32, HostError> {
            if self.fail {
                return Err(HostError::new("clone failed"));
            }
            self.next += 1;
            self.live += 1;
            self.peak_live = self.peak_live.max(self.live);
            Ok(self.next)
        }

        fn release(&mut self, snapshot: u32) {
            self.live -= 1;
            self.released.push(snapshot);
        }
    }

    #[test]
    fn clean_cache_returns_same_snapshot() {
        let mut source = Counter::default();
        let mut cache = ContentCache::new();

        assert_eq!(cache.ensure_snapshot(false, &mut source), Ok(&1));
        assert_eq!(cache.ensure_snapshot(false, &mut source), Ok(&1));
        assert_eq!(cache.ensure_snapshot(false, &mut source), Ok(&1));
        assert_eq!(cache.captures(), 1);
        assert!(source.released.is_empty());
    }

    #[test]
    fn dirty_request_always_recaptures_and_releases_previous() {
        let mut source = Counter::default();
        let mut cache = ContentCache::new();

        assert_eq!(cache.ensure_snapshot(true, &mut source), Ok(&1));
        assert_eq!(cache.ensure_snapshot(true, &mut source), Ok(&2));
        assert_eq!(cache.ensure_snapshot(true, &mut source), Ok(&3));
        assert_eq!(source.released, [1, 2]);
        assert_eq!(cache.captures(), 3);
    }

    #[test]
    fn previous_snapshot_is_released_before_recapture() {
        let mut source = Counter::default();
        let mut cache = ContentCache::new();

        for _ in 0..4 {
            cache.ensure_snapshot(true, &mut source).unwrap();
        }
        assert_eq!(source.live, 1);
        assert_eq!(source.peak_live, 1, "two snapshots were live at once");
    }

    #[test]
    fn invalidate_forces_next_capture() {
        let mut source = Counter::default();
        let mut cache = ContentCache::new();
        cache.ensure_snapshot(false, &mut source).unwrap();
        assert!(!cache.is_dirty());

        cache.invalidate();
        assert!(cache.is_dirty());
        assert_eq!(cache.ensure_snapshot(false, &mut source), Ok(&2));
        assert!(!cache.is_dirty());
    }

    #[test]
    fn failed_capture_empties_cache() {
        let mut source = Counter::default();
        let mut cache = ContentCache::new();
        cache.ensure_snapshot(false, &mut source).unwrap();

        source.fail = true;
        assert!(cache.ensure_snapshot(true, &mut source).is_err());
        assert!(cache.snapshot().is_none());
        assert!(cache.is_dirty());
        assert_eq!(source.released, [1]);

        source.fail = false;
        assert_eq!(cache.ensure_snapshot(false, &mut source), Ok(&2));
    }

    #[test]
    fn clear_releases_snapshot() {
        let mut source = Counter::default();
        let mut cache = ContentCache::new();
        cache.ensure_snapshot(false, &mut source).unwrap();
        cache.clear(&mut source);
        assert!(cache.snapshot().is_none());
        assert_eq!(source.released, [1]);
    }
}

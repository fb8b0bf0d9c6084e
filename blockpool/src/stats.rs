use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters for a pool, updated with relaxed atomics.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    rented: AtomicU64,
    reused: AtomicU64,
    allocated: AtomicU64,
    recycled: AtomicU64,
    dropped: AtomicU64,
}

impl PoolCounters {
    pub(crate) fn record_rent(&self, reused: bool) {
        self.rented.fetch_add(1, Ordering::Relaxed);
        if reused {
            self.reused.fetch_add(1, Ordering::Relaxed);
        } else {
            self.allocated.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_recycle(&self, retained: bool) {
        self.recycled.fetch_add(1, Ordering::Relaxed);
        if !retained {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_dropped(&self, count: u64) {
        self.dropped.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, retained: u64) -> PoolStats {
        PoolStats {
            rented: self.rented.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            recycled: self.recycled.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            retained,
        }
    }
}

/// Point-in-time snapshot of pool activity.
///
/// Counters are cumulative over the pool's lifetime except `retained`, which
/// is the number of blocks currently sitting on the shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Blocks handed out by `rent`
    pub rented: u64,
    /// Rents satisfied from a shelf instead of a fresh allocation
    pub reused: u64,
    /// Rents that required a fresh allocation
    pub allocated: u64,
    /// Blocks given back via `recycle`
    pub recycled: u64,
    /// Recycled or purged blocks that were dropped instead of shelved
    pub dropped: u64,
    /// Blocks currently shelved
    pub retained: u64,
}

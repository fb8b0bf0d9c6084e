use std::iter::repeat_with;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

use crate::error::BlockPoolError;
use crate::stats::{PoolCounters, PoolStats};

/// Smallest block length the pool hands out; smaller requests round up.
const MIN_BLOCK_LEN: usize = 8;
const DEFAULT_MAX_BLOCK_LEN: usize = 1 << 24;
const DEFAULT_MAX_RETAINED: usize = 16;

/// An owned, contiguous run of `T` slots rented from a [`BlockPool`].
///
/// A block dereferences to a slice of its slots. Its length is fixed at rent
/// time and is always one of the pool's power-of-two size classes.
#[derive(Debug)]
pub struct Block<T> {
    slots: Box<[T]>,
}

impl<T> Block<T> {
    fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self {
            slots: repeat_with(T::default).take(len).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// The empty placeholder block; never produced by a pool.
impl<T> Default for Block<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new().into_boxed_slice(),
        }
    }
}

impl<T> Deref for Block<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.slots
    }
}

impl<T> DerefMut for Block<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

struct PoolShared<T> {
    /// One shelf per size class, smallest class first.
    shelves: Vec<Mutex<Vec<Block<T>>>>,
    max_block_len: usize,
    max_retained: usize,
    counters: PoolCounters,
}

/// A shared pool of [`Block`]s, organized into power-of-two size classes.
///
/// Cloning the pool clones a handle; all clones share the same shelves and
/// counters. `rent` and `recycle` are safe to call concurrently from many
/// threads.
pub struct BlockPool<T> {
    shared: Arc<PoolShared<T>>,
}

impl<T> Clone for BlockPool<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> std::fmt::Debug for BlockPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockPool")
            .field("max_block_len", &self.shared.max_block_len)
            .field("max_retained", &self.shared.max_retained)
            .finish()
    }
}

impl<T> BlockPool<T> {
    /// Creates a pool with the default limits (16M-slot maximum blocks,
    /// 16 retained blocks per size class).
    #[must_use]
    pub fn new() -> Self {
        Self::build(DEFAULT_MAX_BLOCK_LEN, DEFAULT_MAX_RETAINED)
    }

    /// Creates a pool with explicit limits.
    ///
    /// `max_block_len` is rounded up to the next power of two (at least the
    /// minimum class size). `max_retained_per_class` may be zero, in which
    /// case every recycled block is dropped.
    ///
    /// # Errors
    ///
    /// Returns `BlockPoolError::InvalidLimit` if `max_block_len` is zero or
    /// too large to round up to a power of two.
    pub fn with_limits(
        max_block_len: usize,
        max_retained_per_class: usize,
    ) -> Result<Self, BlockPoolError> {
        if max_block_len == 0 {
            return Err(BlockPoolError::InvalidLimit {
                parameter: "max_block_len",
                value: 0,
            });
        }
        let rounded = max_block_len
            .max(MIN_BLOCK_LEN)
            .checked_next_power_of_two()
            .ok_or(BlockPoolError::InvalidLimit {
                parameter: "max_block_len",
                value: max_block_len,
            })?;
        Ok(Self::build(rounded, max_retained_per_class))
    }

    fn build(max_block_len: usize, max_retained: usize) -> Self {
        let classes = class_of(max_block_len) + 1;
        let shelves = (0..classes).map(|_| Mutex::new(Vec::new())).collect();
        Self {
            shared: Arc::new(PoolShared {
                shelves,
                max_block_len,
                max_retained,
                counters: PoolCounters::default(),
            }),
        }
    }

    /// Gives a block back to the pool for reuse.
    ///
    /// The block is shelved as-is; its contents are not touched. Blocks
    /// beyond the per-class retention limit, and blocks this pool could not
    /// have produced (wrong length), are dropped instead.
    #[allow(clippy::expect_used)]
    pub fn recycle(&self, block: Block<T>) {
        let len = block.len();
        if len < MIN_BLOCK_LEN || !len.is_power_of_two() || len > self.shared.max_block_len {
            self.shared.counters.record_recycle(false);
            return;
        }
        let mut shelf = self.shared.shelves[class_of(len)]
            .lock()
            .expect("pool shelf lock poisoned");
        if shelf.len() >= self.shared.max_retained {
            self.shared.counters.record_recycle(false);
            return;
        }
        shelf.push(block);
        self.shared.counters.record_recycle(true);
    }

    /// Drops every shelved block and returns how many were dropped.
    #[allow(clippy::expect_used)]
    pub fn purge(&self) -> usize {
        let mut dropped = 0;
        for shelf in &self.shared.shelves {
            let mut shelf = shelf.lock().expect("pool shelf lock poisoned");
            dropped += shelf.len();
            shelf.clear();
        }
        self.shared.counters.record_dropped(dropped as u64);
        dropped
    }

    /// Returns a snapshot of the pool's activity counters.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn stats(&self) -> PoolStats {
        let retained: usize = self
            .shared
            .shelves
            .iter()
            .map(|shelf| shelf.lock().expect("pool shelf lock poisoned").len())
            .sum();
        self.shared.counters.snapshot(retained as u64)
    }
}

impl<T: Default> BlockPool<T> {
    /// Rents a block of at least `min_len` slots.
    ///
    /// The returned block's length is `min_len` rounded up to the pool's next
    /// power-of-two size class. Contents are unspecified: a recycled block
    /// keeps whatever its previous owner left in it.
    ///
    /// # Errors
    ///
    /// Returns `BlockPoolError::BlockTooLarge` if `min_len` exceeds the
    /// pool's maximum block length.
    #[allow(clippy::expect_used)]
    pub fn rent(&self, min_len: usize) -> Result<Block<T>, BlockPoolError> {
        if min_len > self.shared.max_block_len {
            return Err(BlockPoolError::BlockTooLarge {
                requested: min_len,
                max: self.shared.max_block_len,
            });
        }
        let class = class_of(min_len);
        let shelved = self.shared.shelves[class]
            .lock()
            .expect("pool shelf lock poisoned")
            .pop();
        if let Some(block) = shelved {
            self.shared.counters.record_rent(true);
            return Ok(block);
        }
        self.shared.counters.record_rent(false);
        Ok(Block::with_len(class_len(class)))
    }
}

impl<T> Default for BlockPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn class_of(len: usize) -> usize {
    let size = len.max(MIN_BLOCK_LEN).next_power_of_two();
    (size.trailing_zeros() - MIN_BLOCK_LEN.trailing_zeros()) as usize
}

fn class_len(class: usize) -> usize {
    MIN_BLOCK_LEN << class
}

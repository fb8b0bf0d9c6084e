use std::fmt;
use std::mem;

use blockpool::{Block, BlockPool};

use crate::error::DeqBufError;
use crate::iter::{DeqBufIter, DeqBufRevIter};

/// Capacity rented for buffers constructed without an explicit capacity.
pub(crate) const DEFAULT_CAPACITY: usize = 16;

/// A growable double-ended sequence buffer over a pooled block.
///
/// The buffer owns exactly one [`Block`] rented from a [`BlockPool`] and two
/// cursors `head <= tail` delimiting the live region `block[head..tail]`.
/// Logical index `i` maps to physical slot `head + i`. Slack on either side
/// of the live region always holds `T::default()`; every operation that moves
/// elements away from a slot restores the default in it.
///
/// Dropping the buffer recycles its block into the pool it was rented from.
pub struct DeqBuf<T> {
    pub(crate) pool: BlockPool<T>,
    pub(crate) block: Block<T>,
    pub(crate) head: usize,
    pub(crate) tail: usize,
    pub(crate) generation: u64,
    pub(crate) moved: u64,
    pub(crate) reallocations: u64,
}

impl<T> DeqBuf<T> {
    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tail - self.head
    }

    /// Returns `true` if the buffer holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Length of the backing block.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    /// Current mutation generation. Bumped by every mutating operation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns a snapshot of the buffer's movement counters.
    #[must_use]
    pub fn stats(&self) -> BufStats {
        BufStats {
            moved_slots: self.moved,
            reallocations: self.reallocations,
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DeqBufError::IndexOutOfBounds` if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, DeqBufError> {
        if index >= self.len() {
            return Err(DeqBufError::IndexOutOfBounds {
                index,
                length: self.len(),
            });
        }
        Ok(&self.block[self.head + index])
    }

    /// Overwrites the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DeqBufError::IndexOutOfBounds` if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), DeqBufError> {
        if index >= self.len() {
            return Err(DeqBufError::IndexOutOfBounds {
                index,
                length: self.len(),
            });
        }
        self.block[self.head + index] = value;
        self.bump();
        Ok(())
    }

    /// Returns a reference to the first element, if any.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_view().first()
    }

    /// Returns a reference to the last element, if any.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_view().last()
    }

    /// Zero-copy view over the live region.
    ///
    /// The view borrows the buffer; it cannot outlive the next mutation.
    #[must_use]
    pub fn as_view(&self) -> &[T] {
        &self.block[self.head..self.tail]
    }

    /// Mutable zero-copy view over the live region.
    ///
    /// Handing out the view bumps the generation, since element edits through
    /// it cannot be observed individually.
    #[must_use]
    pub fn as_mut_view(&mut self) -> &mut [T] {
        self.bump();
        &mut self.block[self.head..self.tail]
    }

    /// Returns an iterator over the live elements.
    #[must_use]
    pub fn iter(&self) -> DeqBufIter<'_, T> {
        self.into_iter()
    }

    /// Returns a reverse iterator over the live elements.
    #[must_use]
    pub fn iter_rev(&self) -> DeqBufRevIter<'_, T> {
        DeqBufRevIter::new(self)
    }

    pub(crate) fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T: Default> DeqBuf<T> {
    /// Creates an empty buffer with the default starting capacity.
    ///
    /// # Errors
    ///
    /// Propagates pool failure.
    pub fn new(pool: &BlockPool<T>) -> Result<Self, DeqBufError> {
        Self::with_capacity(pool, DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer whose block holds at least `capacity` slots.
    ///
    /// The cursors start at the block midpoint so the first appends and
    /// prepends both have room.
    ///
    /// # Errors
    ///
    /// Propagates pool failure.
    pub fn with_capacity(pool: &BlockPool<T>, capacity: usize) -> Result<Self, DeqBufError> {
        let block = rent_cleared(pool, capacity)?;
        let mid = block.len() / 2;
        Ok(Self {
            pool: pool.clone(),
            block,
            head: mid,
            tail: mid,
            generation: 0,
            moved: 0,
            reallocations: 0,
        })
    }

    /// Appends a single element.
    ///
    /// # Errors
    ///
    /// Propagates growth failure; the buffer is unchanged on error.
    pub fn append(&mut self, value: T) -> Result<(), DeqBufError> {
        self.ensure_append_space(1)?;
        self.block[self.tail] = value;
        self.tail += 1;
        self.bump();
        Ok(())
    }

    /// Prepends a single element.
    ///
    /// # Errors
    ///
    /// Propagates growth failure; the buffer is unchanged on error.
    pub fn prepend(&mut self, value: T) -> Result<(), DeqBufError> {
        self.ensure_prepend_space(1)?;
        self.block[self.head - 1] = value;
        self.head -= 1;
        self.bump();
        Ok(())
    }

    /// Inserts a single element before logical index `at` (`0 <= at <= len`).
    ///
    /// # Errors
    ///
    /// Returns `DeqBufError::IndexOutOfBounds` if `at > len`; propagates
    /// growth failure. The buffer is unchanged on error.
    pub fn insert(&mut self, at: usize, value: T) -> Result<(), DeqBufError> {
        let gap = self.open_gap(at, 1)?;
        self.block[gap] = value;
        self.bump();
        Ok(())
    }

    /// Removes `count` elements starting at logical index `at`.
    ///
    /// Shrinks from whichever boundary is nearer to the live region, per the
    /// `head <= capacity - tail` rule, and clears the vacated slots.
    ///
    /// # Errors
    ///
    /// Returns `DeqBufError::RangeOutOfBounds` if `at + count > len`. The
    /// buffer is unchanged on error.
    pub fn remove(&mut self, at: usize, count: usize) -> Result<(), DeqBufError> {
        let len = self.len();
        if at > len || count > len - at {
            return Err(DeqBufError::RangeOutOfBounds {
                start: at,
                end: at.saturating_add(count),
                length: len,
            });
        }
        if count == 0 {
            return Ok(());
        }
        let gap_start = self.head + at;
        if self.head <= self.capacity() - self.tail {
            // Shrink from the start: shift [head, gap_start) right by count.
            for idx in (self.head..gap_start).rev() {
                self.block.swap(idx + count, idx);
            }
            self.moved += at as u64;
            for idx in self.head..self.head + count {
                self.block[idx] = T::default();
            }
            self.head += count;
        } else {
            // Shrink from the end: shift [gap_start + count, tail) left.
            for idx in gap_start + count..self.tail {
                self.block.swap(idx - count, idx);
            }
            self.moved += (self.tail - gap_start - count) as u64;
            for idx in self.tail - count..self.tail {
                self.block[idx] = T::default();
            }
            self.tail -= count;
        }
        self.bump();
        Ok(())
    }

    /// Logically empties the buffer without releasing the block.
    ///
    /// Live slots are cleared and both cursors reset to the block midpoint.
    pub fn clear(&mut self) {
        for idx in self.head..self.tail {
            self.block[idx] = T::default();
        }
        let mid = self.capacity() / 2;
        self.head = mid;
        self.tail = mid;
        self.bump();
    }

    /// Guarantees `n` free slots after `tail`, reallocating tail-biased if
    /// needed (`head` keeps its offset in the new block).
    pub(crate) fn ensure_append_space(&mut self, n: usize) -> Result<(), DeqBufError> {
        if self.capacity() - self.tail >= n {
            return Ok(());
        }
        let min_capacity = grown_capacity(self.capacity(), n)?;
        let keep = self.head;
        self.reallocate(min_capacity, move |_, _| keep)
    }

    /// Guarantees `n` free slots before `head`.
    ///
    /// With enough total slack the live region slides right in place, giving
    /// the head side the larger of `n` and half the slack; otherwise the
    /// buffer reallocates with the post-prepend slack split evenly.
    pub(crate) fn ensure_prepend_space(&mut self, n: usize) -> Result<(), DeqBufError> {
        if self.head >= n {
            return Ok(());
        }
        let slack = self.capacity() - self.len();
        if slack >= n {
            self.relocate_within(n.max(slack / 2));
            return Ok(());
        }
        let min_capacity = grown_capacity(self.capacity(), n)?;
        self.reallocate(min_capacity, move |cap, len| n + (cap - len - n) / 2)
    }

    /// Guarantees `n` free slots on both sides of the live region.
    ///
    /// No-op when both sides already have the room; recenters in place when
    /// the total slack allows; reallocates centered otherwise.
    pub(crate) fn ensure_uniform_space(&mut self, n: usize) -> Result<(), DeqBufError> {
        let head_slack = self.head;
        let tail_slack = self.capacity() - self.tail;
        if head_slack >= n && tail_slack >= n {
            return Ok(());
        }
        let slack = head_slack + tail_slack;
        if n.checked_mul(2).is_some_and(|need| slack >= need) {
            self.relocate_within((self.capacity() - self.len()) / 2);
            return Ok(());
        }
        let min_capacity = self
            .len()
            .checked_add(n)
            .and_then(|total| total.checked_mul(2))
            .and_then(usize::checked_next_power_of_two)
            .ok_or(DeqBufError::CapacityOverflow {
                requested: self.len().saturating_add(n),
            })?;
        self.reallocate(min_capacity, |cap, len| (cap - len) / 2)
    }

    /// Opens a `k`-slot gap before logical index `at` and returns the
    /// physical index of its first slot. Grows from whichever side has more
    /// slack, per the `head >= capacity - tail` rule.
    pub(crate) fn open_gap(&mut self, at: usize, k: usize) -> Result<usize, DeqBufError> {
        debug_assert!(k > 0);
        if at > self.len() {
            return Err(DeqBufError::IndexOutOfBounds {
                index: at,
                length: self.len(),
            });
        }
        self.ensure_uniform_space(k)?;
        let split = self.head + at;
        if self.head >= self.capacity() - self.tail {
            // Grow from the start: shift [head, split) left by k.
            for offset in 0..at {
                self.block.swap(self.head - k + offset, self.head + offset);
            }
            self.moved += at as u64;
            self.head -= k;
            Ok(split - k)
        } else {
            // Grow from the end: shift [split, tail) right by k.
            for idx in (split..self.tail).rev() {
                self.block.swap(idx + k, idx);
            }
            self.moved += (self.tail - split) as u64;
            self.tail += k;
            Ok(split)
        }
    }

    /// Moves the live region so it starts at `new_head`, staying inside the
    /// current block. Slack slots hold defaults, so swapping both moves each
    /// element and clears the slot it came from.
    pub(crate) fn relocate_within(&mut self, new_head: usize) {
        let len = self.len();
        debug_assert!(new_head + len <= self.capacity());
        if new_head == self.head {
            return;
        }
        if new_head < self.head {
            for offset in 0..len {
                self.block.swap(new_head + offset, self.head + offset);
            }
        } else {
            for offset in (0..len).rev() {
                self.block.swap(new_head + offset, self.head + offset);
            }
        }
        self.moved += len as u64;
        self.head = new_head;
        self.tail = new_head + len;
    }

    /// Rents a block of at least `min_capacity`, moves the live region to the
    /// head position chosen by `place(new_capacity, len)`, then recycles the
    /// old block. The old block is released only after the new one is fully
    /// populated.
    pub(crate) fn reallocate(
        &mut self,
        min_capacity: usize,
        place: impl FnOnce(usize, usize) -> usize,
    ) -> Result<(), DeqBufError> {
        let mut fresh = rent_cleared(&self.pool, min_capacity)?;
        let len = self.len();
        let new_head = place(fresh.len(), len);
        debug_assert!(new_head + len <= fresh.len());
        for offset in 0..len {
            fresh[new_head + offset] = mem::take(&mut self.block[self.head + offset]);
        }
        self.moved += len as u64;
        self.reallocations += 1;
        let retired = mem::replace(&mut self.block, fresh);
        self.pool.recycle(retired);
        self.head = new_head;
        self.tail = new_head + len;
        Ok(())
    }
}

impl<T: Default + Clone> DeqBuf<T> {
    /// Creates a buffer pre-populated by copying `values`, centered in its
    /// block.
    ///
    /// # Errors
    ///
    /// Propagates pool failure.
    pub fn from_slice(pool: &BlockPool<T>, values: &[T]) -> Result<Self, DeqBufError> {
        let mut buf = Self::with_capacity(pool, values.len().max(DEFAULT_CAPACITY))?;
        let head = (buf.capacity() - values.len()) / 2;
        for (offset, value) in values.iter().enumerate() {
            buf.block[head + offset] = value.clone();
        }
        buf.head = head;
        buf.tail = head + values.len();
        Ok(buf)
    }

    /// Appends every element of `values`, in order.
    ///
    /// # Errors
    ///
    /// Propagates growth failure; the buffer is unchanged on error.
    pub fn append_slice(&mut self, values: &[T]) -> Result<(), DeqBufError> {
        if values.is_empty() {
            return Ok(());
        }
        self.ensure_append_space(values.len())?;
        for (offset, value) in values.iter().enumerate() {
            self.block[self.tail + offset] = value.clone();
        }
        self.tail += values.len();
        self.bump();
        Ok(())
    }

    /// Prepends every element of `values`, preserving their order.
    ///
    /// # Errors
    ///
    /// Propagates growth failure; the buffer is unchanged on error.
    pub fn prepend_slice(&mut self, values: &[T]) -> Result<(), DeqBufError> {
        if values.is_empty() {
            return Ok(());
        }
        self.ensure_prepend_space(values.len())?;
        let start = self.head - values.len();
        for (offset, value) in values.iter().enumerate() {
            self.block[start + offset] = value.clone();
        }
        self.head = start;
        self.bump();
        Ok(())
    }

    /// Inserts every element of `values` before logical index `at`.
    ///
    /// # Errors
    ///
    /// Returns `DeqBufError::IndexOutOfBounds` if `at > len`; propagates
    /// growth failure. The buffer is unchanged on error.
    pub fn insert_slice(&mut self, at: usize, values: &[T]) -> Result<(), DeqBufError> {
        if values.is_empty() {
            if at > self.len() {
                return Err(DeqBufError::IndexOutOfBounds {
                    index: at,
                    length: self.len(),
                });
            }
            return Ok(());
        }
        let gap = self.open_gap(at, values.len())?;
        for (offset, value) in values.iter().enumerate() {
            self.block[gap + offset] = value.clone();
        }
        self.bump();
        Ok(())
    }

    /// Copies the live region into an owned, independent `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.as_view().to_vec()
    }
}

impl<T> Drop for DeqBuf<T> {
    fn drop(&mut self) {
        let block = mem::take(&mut self.block);
        if !block.is_empty() {
            self.pool.recycle(block);
        }
    }
}

impl<T> fmt::Debug for DeqBuf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DeqBuf {{ len: {}, capacity: {}, head: {}, tail: {}, generation: {} }}",
            self.len(),
            self.capacity(),
            self.head,
            self.tail,
            self.generation
        )
    }
}

/// Movement counters for a buffer, for asserting copy-work bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufStats {
    /// Total element slots moved by shifts, relocations and reallocations
    pub moved_slots: u64,
    /// Number of times the buffer adopted a new block
    pub reallocations: u64,
}

/// A captured generation, for detecting edits made after a point in time.
///
/// Take a mark, hold on to logical positions, then check `is_changed` before
/// trusting them again.
pub struct EditMark {
    generation: u64,
}

impl EditMark {
    #[must_use]
    pub fn new<T>(buf: &DeqBuf<T>) -> Self {
        Self {
            generation: buf.generation,
        }
    }

    #[must_use]
    pub fn is_changed<T>(&self, buf: &DeqBuf<T>) -> bool {
        self.generation != buf.generation
    }
}

/// Rents a block and clears every slot: rented contents are unspecified, and
/// the buffer's shift machinery relies on slack slots holding defaults.
fn rent_cleared<T: Default>(pool: &BlockPool<T>, min_len: usize) -> Result<Block<T>, DeqBufError> {
    let mut block = pool.rent(min_len)?;
    for slot in block.iter_mut() {
        *slot = T::default();
    }
    Ok(block)
}

fn grown_capacity(capacity: usize, extra: usize) -> Result<usize, DeqBufError> {
    capacity
        .checked_add(extra)
        .and_then(usize::checked_next_power_of_two)
        .ok_or(DeqBufError::CapacityOverflow {
            requested: capacity.saturating_add(extra),
        })
}

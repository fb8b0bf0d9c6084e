//! `BlockPool`: a shared pool of contiguous slot blocks.
//!
//! The pool hands out owned [`Block`]s — contiguous runs of `T` slots sized to
//! power-of-two classes — and takes them back for reuse, so that buffers which
//! repeatedly grow and shrink do not churn the allocator. A pool handle is
//! cheaply cloneable and safe to share across threads; every clone rents from
//! and recycles into the same shelves.
//!
//! Rented block contents are unspecified: a recycled block keeps whatever its
//! previous owner left in it. Callers that need a known state must clear the
//! region they intend to use.
//!
//! ```
//! use blockpool::BlockPool;
//!
//! let pool: BlockPool<u8> = BlockPool::new();
//!
//! // Requests are rounded up to the next size class.
//! let block = pool.rent(100).unwrap();
//! assert!(block.len() >= 100);
//!
//! // Recycled blocks are reused by later rents of the same class.
//! pool.recycle(block);
//! let again = pool.rent(100).unwrap();
//! assert_eq!(pool.stats().reused, 1);
//! pool.recycle(again);
//! ```
//!
//! # Limits
//!
//! A pool refuses requests above its maximum block length and retains at most
//! a fixed number of blocks per size class; both limits are configurable via
//! [`BlockPool::with_limits`]. Excess recycled blocks are simply dropped.
//!
//! ```
//! use blockpool::{BlockPool, BlockPoolError};
//!
//! let pool: BlockPool<u8> = BlockPool::with_limits(1024, 4).unwrap();
//! let err = pool.rent(2048).unwrap_err();
//! assert_eq!(err, BlockPoolError::BlockTooLarge { requested: 2048, max: 1024 });
//! ```

mod core;
mod error;
mod stats;

pub use crate::core::{Block, BlockPool};
pub use error::BlockPoolError;
pub use stats::PoolStats;

//! `DeqBuf`: a growable double-ended sequence buffer over pooled blocks.
//!
//! `DeqBuf` keeps its elements in a single contiguous block rented from a
//! shared [`blockpool::BlockPool`], delimited by a `head` and a `tail`
//! cursor. Appends, prepends and middle edits decide dynamically whether to
//! shift elements, recenter them within the block, or rent a larger block,
//! which keeps interleaved front/back insertion at amortized O(1) element
//! moves while middle edits cost only the distance to the nearer boundary.
//!
//! Every mutating operation validates its arguments before touching the
//! buffer, so a failed call leaves the content exactly as it was. Dropping a
//! buffer recycles its block back into the pool.
//!
//! ```
//! use blockpool::BlockPool;
//! use deqbuf::DeqBuf;
//!
//! let pool = BlockPool::new();
//! let mut buf = DeqBuf::new(&pool).unwrap();
//!
//! buf.append_slice(&[1, 2, 3]).unwrap();
//! buf.prepend(0).unwrap();
//! buf.insert_slice(2, &[9, 9]).unwrap();
//! assert_eq!(buf.as_view(), &[0, 1, 9, 9, 2, 3]);
//!
//! buf.remove(2, 2).unwrap();
//! buf.pad_start(6, -1).unwrap();
//! assert_eq!(buf.as_view(), &[-1, -1, 0, 1, 2, 3]);
//! ```
//!
//! # Bulk editing
//!
//! The derived operations cover the common text-utility edits: padding to a
//! width (single fill or repeating pattern), whitespace-style run
//! normalization, adjacent-duplicate collapsing, in-place filtering,
//! reversal, shuffling and repetition.
//!
//! ```
//! use blockpool::BlockPool;
//! use deqbuf::DeqBuf;
//!
//! let pool = BlockPool::new();
//! let text: Vec<char> = "  a   b  ".chars().collect();
//! let mut buf = DeqBuf::from_slice(&pool, &text).unwrap();
//!
//! buf.normalize_runs(' ', |c| c.is_whitespace());
//! assert_eq!(buf.to_vec(), vec!['a', ' ', 'b']);
//! ```
//!
//! # Detecting intervening edits
//!
//! Zero-copy views ([`DeqBuf::as_view`]) borrow the buffer and therefore
//! cannot outlive a mutation. For callers that instead hold logical positions
//! across edits, an [`EditMark`] captures the buffer's generation and reports
//! whether anything changed since:
//!
//! ```
//! use blockpool::BlockPool;
//! use deqbuf::{DeqBuf, EditMark};
//!
//! let pool = BlockPool::new();
//! let mut buf = DeqBuf::from_slice(&pool, &[1, 2, 3]).unwrap();
//!
//! let mark = EditMark::new(&buf);
//! assert!(!mark.is_changed(&buf));
//!
//! buf.append(4).unwrap();
//! assert!(mark.is_changed(&buf));
//! ```

mod core;
mod error;
mod iter;
mod ops;
mod rng;

pub use crate::core::{BufStats, DeqBuf, EditMark};
pub use error::DeqBufError;
pub use iter::{DeqBufIter, DeqBufRevIter};
pub use rng::{RandomSource, SeededRandom};

pub use blockpool;

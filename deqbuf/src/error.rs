use blockpool::BlockPoolError;
use thiserror::Error;

/// Error types for `DeqBuf` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DeqBufError {
    /// Index is beyond the current buffer length
    #[error("index out of bounds: index {index} is beyond length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the buffer
        length: usize,
    },
    /// Range extends beyond the current buffer length
    #[error("range out of bounds: {start}..{end} is beyond length {length}")]
    RangeOutOfBounds {
        /// Start of the requested range
        start: usize,
        /// End of the requested range
        end: usize,
        /// Current length of the buffer
        length: usize,
    },
    /// Range start is past its end
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange {
        /// Start of the requested range
        start: usize,
        /// End of the requested range
        end: usize,
    },
    /// Empty padding pattern where at least one element is required
    #[error("empty padding pattern")]
    EmptyPattern,
    /// Capacity arithmetic overflowed `usize`
    #[error("capacity overflow: cannot grow to {requested} slots")]
    CapacityOverflow {
        /// Capacity that was requested
        requested: usize,
    },
    /// The backing pool could not satisfy an allocation
    #[error(transparent)]
    Pool(#[from] BlockPoolError),
}

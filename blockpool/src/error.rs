use thiserror::Error;

/// Error types for `BlockPool` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum BlockPoolError {
    /// The requested block length exceeds the pool's maximum
    #[error("block too large: requested {requested} slots, but the pool limit is {max}")]
    BlockTooLarge {
        /// Number of slots requested
        requested: usize,
        /// Maximum block length this pool hands out
        max: usize,
    },
    /// Invalid limit passed to `BlockPool::with_limits`
    #[error("invalid pool limit: {parameter} = {value}")]
    InvalidLimit {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Provided value
        value: usize,
    },
}

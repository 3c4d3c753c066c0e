//! NDR error types

use thiserror::Error;

/// Upper bound on the number of bytes a single decoded array or string may
/// allocate, independent of what the size fields claim.
pub const MAX_NDR_ALLOCATION_SIZE: usize = 16 * 1024 * 1024;

/// Upper bound on the element count of a single decoded array.
pub const MAX_NDR_ARRAY_ELEMENTS: usize = 1024 * 1024;

/// NDR encoding/decoding errors
#[derive(Debug, Error)]
pub enum NdrError {
    /// Buffer underflow - not enough data
    #[error("buffer underflow: needed {needed} bytes, have {have}")]
    BufferUnderflow { needed: usize, have: usize },

    /// A transmitted size field claims more elements than the stub has bytes left
    #[error("buffer overflow for size {size} of array {field}: {remaining} bytes remaining")]
    SizeOverflow {
        field: &'static str,
        size: u64,
        remaining: usize,
    },

    /// Invalid string - bad offset or encoding
    #[error("invalid string: {0}")]
    InvalidString(String),

    /// Invalid pointer - unexpected referent ID
    #[error("invalid pointer: referent ID {0}")]
    InvalidPointer(u32),

    /// Varying header does not fit inside the conformant maximum
    #[error("conformance mismatch: max_count={max_count}, offset={offset}, actual_count={actual_count}")]
    ConformanceMismatch {
        max_count: u32,
        offset: u32,
        actual_count: u32,
    },

    /// A `[range]` constrained value is outside its bounds
    #[error("{field} is out of range: {value} not in {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// Decoded size exceeds the allocation limit
    #[error("allocation limit exceeded: requested {requested}, limit {limit}")]
    AllocationLimitExceeded { requested: usize, limit: usize },

    /// Size arithmetic overflowed
    #[error("integer overflow in size computation")]
    IntegerOverflow,
}

impl NdrError {
    /// Short-read error for a field that needs `needed` bytes.
    pub(crate) fn underflow(needed: usize, have: usize) -> Self {
        Self::BufferUnderflow { needed, have }
    }
}

/// Result type for NDR operations
pub type Result<T> = std::result::Result<T, NdrError>;

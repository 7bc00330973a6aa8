use thiserror::Error;

use crate::partition::VectorBackend;

/// Contract violations reported by the checked entry points.
///
/// Every check runs before the first element is moved, an `Err` always leaves the buffer as it
/// was passed in.
#[derive(Debug, Error)]
pub enum SortError {
    #[error("length {len} exceeds buffer of {buffer_len} elements")]
    LengthOutOfBounds { len: usize, buffer_len: usize },
    #[error("thread count must be at least 1")]
    ZeroThreads,
    #[error("invalid range {left}..={right} for buffer of {len} elements")]
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },
    #[error("pivot estimation needs a non-empty range")]
    EmptyRange,
    #[error("vector backend {0:?} is not supported by this CPU")]
    BackendUnavailable(VectorBackend),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SortError>;

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors reported by the fallible list and queue operations.
///
/// A failed operation never leaves a partial effect behind: storage that
/// was obtained before the failure is released again, and the list is
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The global allocator could not provide storage for a node (or the
    /// sentinel node of a new list).
    #[error("failed to allocate a list node of {size} bytes")]
    NodeAlloc {
        /// Size in bytes of the rejected allocation.
        size: usize,
    },
    /// The payload could not be duplicated into owned storage.
    #[error("failed to duplicate the payload: {0}")]
    PayloadAlloc(#[from] TryReserveError),
    /// The operation was given no queue to work on.
    #[error("queue is absent")]
    AbsentQueue,
}

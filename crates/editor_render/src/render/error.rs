//! Errors raised by the vertex array

use crate::scene::ObjectId;

/// Result type for batching operations
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that can occur while building or patching the vertex array
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// A partial update would change the size of an object's vertex run.
    /// Structural changes need a full rebuild.
    #[error("vertex count of {object:?} changed from {expected} to {actual}; rebuild required")]
    VertexCountChanged {
        /// Object being patched
        object: ObjectId,
        /// Vertices recorded at the last rebuild
        expected: u32,
        /// Vertices the codec produced now
        actual: usize,
    },

    /// A rebuild produced more vertices than the configured limit
    #[error("vertex buffer overflow: {vertices} vertices exceed the limit of {limit}")]
    BufferOverflow {
        /// Vertex count that overflowed
        vertices: usize,
        /// [`BatcherConfig::max_vertices`](crate::config::BatcherConfig::max_vertices)
        limit: u32,
    },
}

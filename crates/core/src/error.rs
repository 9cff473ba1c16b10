//! Construction-time validation errors.

use thiserror::Error;

/// Errors raised while building geometry from external data.
///
/// Queries never fail; only malformed inputs are rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Ray direction has zero length or contains NaN/inf.
    #[error("ray direction must be finite and non-zero, got {0:?}")]
    DegenerateDirection([f32; 3]),
    /// Index buffer length is not a multiple of three.
    #[error("index buffer length {0} is not a multiple of 3")]
    IndexCount(usize),
    /// An index points past the end of the vertex buffer.
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value.
        index: u32,
        /// Position of the index inside the buffer.
        position: usize,
        /// Length of the vertex buffer.
        vertex_count: usize,
    },
    /// A vertex coordinate is NaN or infinite.
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
}

use thiserror::Error;

use crate::geometry::Segment;
use crate::math::Point3;

/// Top-level error type for boundary-loop reconstruction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoopError {
    /// Fewer than two segments were supplied; no polygon can be formed.
    #[error("at least 2 segments are required to form a loop, got {count}")]
    InsufficientInput { count: usize },

    /// An endpoint could not be connected to any other segment, so the soup
    /// does not close into a single polygon. This usually means the upstream
    /// intersection was computed without exact constructions.
    #[error(
        "no adjacent segment found at endpoint ({}, {}, {}) of segment {segment}",
        .endpoint.x, .endpoint.y, .endpoint.z
    )]
    IncompleteLoop { segment: Segment, endpoint: Point3 },

    /// The soup closed into one loop but segments were left over, meaning it
    /// contains more than one connected intersection component.
    #[error("segment soup contains more than one closed loop ({leftover} segments left over)")]
    DisjointLoops { leftover: usize },
}

/// Convenience type alias for results using [`LoopError`].
pub type Result<T> = std::result::Result<T, LoopError>;

use crate::math::Point3;

use super::Segment;

/// A triangle defined by three ordered vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3; 3],
}

impl Triangle {
    /// Creates a new triangle from three vertices.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns vertex `i`, indexed modulo 3.
    #[must_use]
    pub fn vertex(&self, i: usize) -> Point3 {
        self.vertices[i % 3]
    }

    /// Returns edge `e`, the segment from `vertex(e)` to `vertex(e + 1)`.
    #[must_use]
    pub fn edge(&self, e: usize) -> Segment {
        Segment::new(self.vertex(e), self.vertex(e + 1))
    }
}

use std::fmt;

use crate::math::{Point3, Vector3};

/// An oriented line segment between two points.
///
/// All predicates on segments are exact comparisons; no tolerance is applied
/// anywhere. Two points are equal only if their coordinates are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    source: Point3,
    target: Point3,
}

impl Segment {
    /// Creates a new segment from source to target.
    #[must_use]
    pub fn new(source: Point3, target: Point3) -> Self {
        Self { source, target }
    }

    /// Returns the source endpoint.
    #[must_use]
    pub fn source(&self) -> Point3 {
        self.source
    }

    /// Returns the target endpoint.
    #[must_use]
    pub fn target(&self) -> Point3 {
        self.target
    }

    /// Returns the same segment with source and target swapped.
    #[must_use]
    pub fn opposite(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    /// Returns whether `other` is the same segment, in either orientation.
    #[must_use]
    pub fn is_duplicate_of(&self, other: &Self) -> bool {
        self == other || *self == other.opposite()
    }

    /// Returns whether `p` is one of the two endpoints.
    #[must_use]
    pub fn has_endpoint(&self, p: &Point3) -> bool {
        self.source == *p || self.target == *p
    }

    /// Returns whether `p` lies on the segment (endpoints included).
    ///
    /// Exact test: `p` must be collinear with the segment (zero cross
    /// product) and its projection parameter must fall within the segment's
    /// extent.
    #[must_use]
    pub fn has_on(&self, p: &Point3) -> bool {
        let d = self.target - self.source;
        if d == Vector3::zeros() {
            // degenerate segment
            return *p == self.source;
        }
        let ap = p - self.source;
        if ap.cross(&d) != Vector3::zeros() {
            return false;
        }
        let t = ap.dot(&d);
        t >= 0.0 && t <= d.dot(&d)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) -> ({}, {}, {})",
            self.source.x, self.source.y, self.source.z, self.target.x, self.target.y, self.target.z
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn opposite_swaps_endpoints() {
        let s = Segment::new(p(0.0, 0.0, 0.0), p(1.0, 2.0, 3.0));
        let o = s.opposite();
        assert_eq!(o.source(), s.target());
        assert_eq!(o.target(), s.source());
        assert_eq!(o.opposite(), s);
    }

    #[test]
    fn duplicate_detects_both_orientations() {
        let s = Segment::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        assert!(s.is_duplicate_of(&s));
        assert!(s.is_duplicate_of(&s.opposite()));
        assert!(!s.is_duplicate_of(&Segment::new(p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0))));
    }

    #[test]
    fn endpoint_test_matches_both_ends() {
        let s = Segment::new(p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0));
        assert!(s.has_endpoint(&p(0.0, 0.0, 0.0)));
        assert!(s.has_endpoint(&p(4.0, 0.0, 0.0)));
        assert!(!s.has_endpoint(&p(2.0, 0.0, 0.0)));
    }

    #[test]
    fn has_on_interior_and_endpoints() {
        let s = Segment::new(p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0));
        assert!(s.has_on(&p(0.0, 0.0, 0.0)));
        assert!(s.has_on(&p(4.0, 0.0, 0.0)));
        assert!(s.has_on(&p(1.0, 0.0, 0.0)));
        assert!(!s.has_on(&p(5.0, 0.0, 0.0)));
        assert!(!s.has_on(&p(-1.0, 0.0, 0.0)));
        assert!(!s.has_on(&p(1.0, 1.0, 0.0)));
    }

    #[test]
    fn has_on_degenerate_segment() {
        let s = Segment::new(p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0));
        assert!(s.has_on(&p(1.0, 1.0, 1.0)));
        assert!(!s.has_on(&p(1.0, 1.0, 2.0)));
    }
}

use std::collections::VecDeque;

use crate::error::{LoopError, Result};
use crate::geometry::Segment;
use crate::math::Point3;

/// Orders a deduplicated segment soup into a closed polygon loop by exact
/// endpoint matching.
///
/// Grows a double-ended point chain: each step consumes one segment from the
/// pool that shares an endpoint with the chain's front or back and extends
/// the chain on that side with the segment's other endpoint. The returned
/// points form a closed loop, with the last point implicitly connected back
/// to the first.
///
/// When a segment endpoint matches both ends of the chain (a self-touching
/// loop), the front match wins; which loop is produced in that degenerate
/// case is unspecified. The repeated closing point is dropped only once,
/// after the pool is exhausted, so a self-touching chain keeps matching
/// against its closure point while segments remain.
///
/// # Errors
///
/// - [`LoopError::InsufficientInput`] if fewer than two segments are given.
/// - [`LoopError::IncompleteLoop`] if no segment continues the chain, or the
///   pool is exhausted before the chain closes.
/// - [`LoopError::DisjointLoops`] if the chain closes while segments remain.
pub fn chain_segments(segments: &[Segment]) -> Result<Vec<Point3>> {
    let Some((seed, rest)) = segments.split_first() else {
        return Err(LoopError::InsufficientInput { count: 0 });
    };
    if rest.is_empty() {
        return Err(LoopError::InsufficientInput { count: 1 });
    }

    let mut pool: Vec<Segment> = rest.to_vec();
    let mut points: VecDeque<Point3> = VecDeque::with_capacity(segments.len() + 1);
    points.push_back(seed.source());
    points.push_back(seed.target());

    // The segments that contributed the current front/back points, kept for
    // error reporting.
    let mut front_segment = *seed;
    let mut back_segment = *seed;

    while !pool.is_empty() {
        let Some((&front, &back)) = points.front().zip(points.back()) else {
            break;
        };

        let mut matched = None;
        for (idx, segment) in pool.iter().enumerate() {
            if segment.source() == front {
                points.push_front(segment.target());
                front_segment = *segment;
            } else if segment.source() == back {
                points.push_back(segment.target());
                back_segment = *segment;
            } else if segment.target() == front {
                points.push_front(segment.source());
                front_segment = *segment;
            } else if segment.target() == back {
                points.push_back(segment.source());
                back_segment = *segment;
            } else {
                continue;
            }
            matched = Some(idx);
            break;
        }

        match matched {
            Some(idx) => {
                pool.remove(idx);
            }
            None if front == back => {
                // The chain already closed; whatever remains belongs to a
                // second component.
                return Err(LoopError::DisjointLoops {
                    leftover: pool.len(),
                });
            }
            None => {
                return Err(LoopError::IncompleteLoop {
                    segment: front_segment,
                    endpoint: front,
                });
            }
        }
    }

    // A closed loop repeats its first point at the back; drop the duplicate.
    if points.front() == points.back() {
        points.pop_front();
    } else if let Some(&endpoint) = points.back() {
        // Every segment was consumed but the two chain ends never met.
        return Err(LoopError::IncompleteLoop {
            segment: back_segment,
            endpoint,
        });
    }

    Ok(points.into_iter().collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::boundary::dedup_segments;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn seg(a: Point3, b: Point3) -> Segment {
        Segment::new(a, b)
    }

    /// Compares two loops up to rotation and reversal.
    fn same_loop(a: &[Point3], b: &[Point3]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        let n = a.len();
        (0..n).any(|offset| {
            (0..n).all(|k| a[k] == b[(offset + k) % n])
                || (0..n).all(|k| a[k] == b[(offset + n - k) % n])
        })
    }

    /// Checks the closed-loop invariants against the segments that built it.
    fn assert_is_loop_of(points: &[Point3], segments: &[Segment]) {
        assert_eq!(points.len(), segments.len());
        let n = points.len();
        for k in 0..n {
            let a = points[k];
            let b = points[(k + 1) % n];
            assert_ne!(a, b, "consecutive loop points must differ");
            assert!(
                segments.iter().any(|s| s.is_duplicate_of(&seg(a, b))),
                "loop edge has no matching input segment"
            );
        }
    }

    #[test]
    fn triangle_soup_yields_triangle_loop() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(4.0, 0.0, 0.0);
        let c = p(0.0, 3.0, 0.0);
        let segments = [seg(a, b), seg(b, c), seg(c, a)];
        let points = chain_segments(&segments).unwrap();
        assert!(same_loop(&points, &[a, b, c]));
        assert_is_loop_of(&points, &segments);
    }

    #[test]
    fn reversed_segment_is_handled() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(4.0, 0.0, 0.0);
        let c = p(0.0, 3.0, 0.0);
        // (a, c) instead of (c, a); dedup keeps all three.
        let segments = [seg(a, b), seg(b, c), seg(a, c)];
        assert_eq!(dedup_segments(&segments).len(), 3);
        let points = chain_segments(&segments).unwrap();
        assert!(same_loop(&points, &[a, b, c]));
        assert_is_loop_of(&points, &segments);
    }

    #[test]
    fn quad_loop_perimeter() {
        let corners = [
            p(0.0, 0.0, 0.0),
            p(4.0, 0.0, 0.0),
            p(4.0, 3.0, 0.0),
            p(0.0, 3.0, 0.0),
        ];
        let segments: Vec<Segment> =
            (0..4).map(|i| seg(corners[i], corners[(i + 1) % 4])).collect();
        let points = chain_segments(&segments).unwrap();
        assert!(same_loop(&points, &corners));

        let perimeter: f64 = (0..points.len())
            .map(|k| (points[(k + 1) % points.len()] - points[k]).norm())
            .sum();
        approx::assert_relative_eq!(perimeter, 14.0);
    }

    #[test]
    fn order_independent_up_to_rotation_and_reversal() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(4.0, 0.0, 0.0);
        let c = p(4.0, 3.0, 0.0);
        let d = p(0.0, 3.0, 0.0);
        let reference = chain_segments(&[seg(a, b), seg(b, c), seg(c, d), seg(d, a)]).unwrap();

        let shuffled = [
            vec![seg(c, d), seg(a, b), seg(d, a), seg(b, c)],
            vec![seg(d, a), seg(c, d), seg(b, c), seg(a, b)],
            vec![seg(b, a), seg(c, b), seg(c, d), seg(a, d)],
        ];
        for segments in &shuffled {
            let points = chain_segments(segments).unwrap();
            assert!(same_loop(&points, &reference));
        }
    }

    #[test]
    fn empty_input_is_insufficient() {
        assert_eq!(
            chain_segments(&[]),
            Err(LoopError::InsufficientInput { count: 0 })
        );
    }

    #[test]
    fn single_segment_is_insufficient() {
        let s = seg(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        assert_eq!(
            chain_segments(&[s]),
            Err(LoopError::InsufficientInput { count: 1 })
        );
    }

    #[test]
    fn duplicate_pair_collapses_then_fails() {
        let s = seg(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let deduped = dedup_segments(&[s, s]);
        assert_eq!(deduped, vec![s]);
        assert_eq!(
            chain_segments(&deduped),
            Err(LoopError::InsufficientInput { count: 1 })
        );
    }

    #[test]
    fn unconnected_segment_is_incomplete() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(4.0, 0.0, 0.0);
        let c = p(0.0, 3.0, 0.0);
        // (c, e) shares c but e continues nowhere.
        let segments = [seg(a, b), seg(b, c), seg(c, p(9.0, 9.0, 9.0))];
        assert!(matches!(
            chain_segments(&segments),
            Err(LoopError::IncompleteLoop { .. })
        ));
    }

    #[test]
    fn isolated_segment_stops_the_walk() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(4.0, 0.0, 0.0);
        let c = p(0.0, 3.0, 0.0);
        // The third segment shares no endpoint with the open chain.
        let segments = [seg(a, b), seg(b, c), seg(p(7.0, 7.0, 7.0), p(8.0, 8.0, 8.0))];
        assert!(matches!(
            chain_segments(&segments),
            Err(LoopError::IncompleteLoop { .. })
        ));
    }

    #[test]
    fn open_chain_is_incomplete() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(4.0, 0.0, 0.0);
        let c = p(0.0, 3.0, 0.0);
        let segments = [seg(a, b), seg(b, c)];
        assert!(matches!(
            chain_segments(&segments),
            Err(LoopError::IncompleteLoop { .. })
        ));
    }

    #[test]
    fn two_disjoint_triangles_are_rejected() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        let d = p(5.0, 5.0, 0.0);
        let e = p(6.0, 5.0, 0.0);
        let f = p(5.0, 6.0, 0.0);
        let segments = [
            seg(a, b),
            seg(b, c),
            seg(c, a),
            seg(d, e),
            seg(e, f),
            seg(f, d),
        ];
        assert_eq!(
            chain_segments(&segments),
            Err(LoopError::DisjointLoops { leftover: 3 })
        );
    }
}

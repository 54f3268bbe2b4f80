use crate::geometry::Segment;

/// Removes duplicate segments from a soup, keeping one representative per
/// equivalence class (two segments are equivalent if equal or mutually
/// opposite).
///
/// The first occurrence of each class is kept, in input order, so the
/// operation is exactly idempotent. O(n²), acceptable for the small segment
/// counts produced by simplex-simplex intersections.
#[must_use]
pub fn dedup_segments(segments: &[Segment]) -> Vec<Segment> {
    let mut output: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if !output.iter().any(|kept| kept.is_duplicate_of(segment)) {
            output.push(*segment);
        }
    }
    output
}

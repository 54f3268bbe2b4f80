use crate::error::{LoopError, Result};
use crate::geometry::{Segment, Triangle};
use crate::math::Point3;

/// One segment of the working arena, with ring bookkeeping.
///
/// The input segment is never modified; `reversed` records the traversal
/// direction chosen during adjacency resolution, and the effective endpoints
/// are read through it. Neighbor indices point into the arena, which is
/// allocated once and never reordered, so links stay valid for the whole
/// run.
struct RingEntry {
    segment: Segment,
    reversed: bool,
    source_dangling: bool,
    target_dangling: bool,
    source_neighbor: usize,
    target_neighbor: usize,
}

impl RingEntry {
    fn new(segment: Segment) -> Self {
        Self {
            segment,
            reversed: false,
            source_dangling: true,
            target_dangling: true,
            source_neighbor: 0,
            target_neighbor: 0,
        }
    }

    /// Effective source under the chosen traversal direction.
    fn source(&self) -> Point3 {
        if self.reversed {
            self.segment.target()
        } else {
            self.segment.source()
        }
    }

    /// Effective target under the chosen traversal direction.
    fn target(&self) -> Point3 {
        if self.reversed {
            self.segment.source()
        } else {
            self.segment.target()
        }
    }

    /// True while no link has fixed this entry's traversal direction yet.
    fn unoriented(&self) -> bool {
        self.source_dangling && self.target_dangling
    }

    fn linked(&self) -> bool {
        !self.source_dangling && !self.target_dangling
    }
}

/// Orders a deduplicated segment soup into a closed polygon loop, snapping
/// endpoints that lie on an edge of the bounding triangle.
///
/// More resilient than [`chain_segments`][super::chain_segments]: two
/// endpoints that are geometrically coincident but not equal as points (the
/// result of numerically independent construction paths) are still linked,
/// provided both lie exactly on the same edge of `triangle`, the triangle
/// the segments were produced against.
///
/// Every segment is first linked to a neighbor at each endpoint by exact
/// equality, then any endpoint left dangling is resolved through the
/// triangle-edge fallback. Once the ring is complete it is walked exactly
/// once, starting from the first segment.
///
/// # Errors
///
/// - [`LoopError::InsufficientInput`] if fewer than two segments are given.
/// - [`LoopError::IncompleteLoop`] if an endpoint remains dangling after
///   both the exact and the edge-snap pass.
/// - [`LoopError::DisjointLoops`] if the ring closes without visiting every
///   segment.
pub fn assemble_loop(segments: &[Segment], triangle: &Triangle) -> Result<Vec<Point3>> {
    if segments.len() < 2 {
        return Err(LoopError::InsufficientInput {
            count: segments.len(),
        });
    }

    let mut entries: Vec<RingEntry> = segments.iter().copied().map(RingEntry::new).collect();

    for i in (1..entries.len()).rev() {
        link_exact_neighbors(&mut entries, i);

        if entries[i].source_dangling {
            snap_source_to_edge(&mut entries, i, triangle);
        }
        if entries[i].target_dangling {
            snap_target_to_edge(&mut entries, i, triangle);
        }

        if entries[i].source_dangling {
            return Err(LoopError::IncompleteLoop {
                segment: entries[i].segment,
                endpoint: entries[i].source(),
            });
        }
        if entries[i].target_dangling {
            return Err(LoopError::IncompleteLoop {
                segment: entries[i].segment,
                endpoint: entries[i].target(),
            });
        }
    }

    // Entry 0 only ever links as a partner; once every other entry is
    // resolved it must be fully linked as well.
    if !entries[0].linked() {
        let endpoint = if entries[0].source_dangling {
            entries[0].source()
        } else {
            entries[0].target()
        };
        return Err(LoopError::IncompleteLoop {
            segment: entries[0].segment,
            endpoint,
        });
    }

    walk_ring(&entries)
}

/// Links `entries[i]`'s source to `entries[j]`'s target, making `j` the
/// predecessor of `i` in the ring.
fn link_source_to_target(entries: &mut [RingEntry], i: usize, j: usize) {
    entries[i].source_dangling = false;
    entries[i].source_neighbor = j;
    entries[j].target_dangling = false;
    entries[j].target_neighbor = i;
}

/// Links `entries[i]`'s target to `entries[j]`'s source, making `j` the
/// successor of `i` in the ring.
fn link_target_to_source(entries: &mut [RingEntry], i: usize, j: usize) {
    entries[i].target_dangling = false;
    entries[i].target_neighbor = j;
    entries[j].source_dangling = false;
    entries[j].source_neighbor = i;
}

/// Reverses the traversal direction of an entry. Only valid while the entry
/// is unoriented: once a link exists, the direction is final.
fn flip(entry: &mut RingEntry) {
    entry.reversed = !entry.reversed;
}

/// Links both endpoints of `entries[i]` to neighbors among `entries[..i]`
/// under exact point equality.
///
/// A partner that already carries a link keeps its direction; an unoriented
/// partner is flipped whenever its orientation is inconsistent with a
/// coherent source→target→source chain.
fn link_exact_neighbors(entries: &mut [RingEntry], i: usize) {
    for j in 0..i {
        if entries[i].linked() {
            return;
        }

        let i_source = entries[i].source();
        let i_target = entries[i].target();
        let j_source = entries[j].source();
        let j_target = entries[j].target();

        if entries[i].source_dangling && entries[j].target_dangling && j_target == i_source {
            link_source_to_target(entries, i, j);
        } else if entries[i].target_dangling
            && entries[j].unoriented()
            && j_target == i_target
        {
            flip(&mut entries[j]);
            link_target_to_source(entries, i, j);
        } else if entries[i].source_dangling
            && entries[j].unoriented()
            && j_source == i_source
        {
            flip(&mut entries[j]);
            link_source_to_target(entries, i, j);
        } else if entries[i].target_dangling && entries[j].source_dangling && j_source == i_target
        {
            link_target_to_source(entries, i, j);
        }
    }
}

/// Resolves a dangling source of `entries[i]` against the triangle edges.
///
/// If the point lies exactly on an edge, the first entry among
/// `entries[..i]` with a dangling endpoint on the same edge becomes its
/// predecessor. Entries past `i` are already fully linked by the time this
/// runs, so the sweep never needs to look at them.
fn snap_source_to_edge(entries: &mut [RingEntry], i: usize, triangle: &Triangle) {
    let point = entries[i].source();
    for e in 0..3 {
        let edge = triangle.edge(e);
        if !edge.has_on(&point) {
            continue;
        }
        for j in 0..i {
            if entries[j].unoriented() && edge.has_on(&entries[j].source()) {
                flip(&mut entries[j]);
                link_source_to_target(entries, i, j);
                return;
            }
            if entries[j].target_dangling && edge.has_on(&entries[j].target()) {
                link_source_to_target(entries, i, j);
                return;
            }
        }
    }
}

/// Resolves a dangling target of `entries[i]` against the triangle edges,
/// scanning `entries[..i]` for a dangling endpoint on the same edge.
fn snap_target_to_edge(entries: &mut [RingEntry], i: usize, triangle: &Triangle) {
    let point = entries[i].target();
    for e in 0..3 {
        let edge = triangle.edge(e);
        if !edge.has_on(&point) {
            continue;
        }
        for j in 0..i {
            if entries[j].source_dangling && edge.has_on(&entries[j].source()) {
                link_target_to_source(entries, i, j);
                return;
            }
            if entries[j].unoriented() && edge.has_on(&entries[j].target()) {
                flip(&mut entries[j]);
                link_target_to_source(entries, i, j);
                return;
            }
        }
    }
}

/// Walks the completed ring once from entry 0, emitting the loop points.
///
/// Each entry emits its source; the target is emitted only when the
/// successor's source does not repeat it exactly, which keeps both points of
/// a snapped (coincident but unequal) junction and drops the duplicate of an
/// exact one.
fn walk_ring(entries: &[RingEntry]) -> Result<Vec<Point3>> {
    let mut points = Vec::with_capacity(entries.len());
    let mut visited = 0;
    let mut current = 0;
    loop {
        let entry = &entries[current];
        visited += 1;
        points.push(entry.source());
        let next = entry.target_neighbor;
        if entries[next].source() != entry.target() {
            points.push(entry.target());
        }
        current = next;
        if current == 0 {
            break;
        }
    }

    if visited != entries.len() {
        return Err(LoopError::DisjointLoops {
            leftover: entries.len() - visited,
        });
    }
    Ok(points)
}

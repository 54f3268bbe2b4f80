//! Reconstruction of the ordered polygon boundary of a tetrahedron-triangle
//! intersection from an unordered, possibly redundant segment soup.
//!
//! The upstream intersection routines produce the boundary as independent
//! segments with no global ordering. [`dedup_segments`] removes exact and
//! reversed duplicates; [`chain_segments`] orders the remainder by exact
//! endpoint matching; [`assemble_loop`] does the same with an additional
//! fallback that snaps endpoints lying on an edge of the bounding triangle,
//! tolerating endpoints that are geometrically coincident but not equal as
//! points.

mod chain;
mod dedup;
mod ring;

pub use chain::chain_segments;
pub use dedup::dedup_segments;
pub use ring::assemble_loop;

pub mod segment;
pub mod triangle;

pub use segment::Segment;
pub use triangle::Triangle;

pub mod boundary;
pub mod error;
pub mod geometry;
pub mod math;

pub use error::{LoopError, Result};

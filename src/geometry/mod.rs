//! Immutable geometry value types consumed by the clipper.
//!
//! - [`Point`]: a 2D position, an alias of [`Vec2`]
//! - [`Viewport`]: the axis-aligned clip rectangle
//! - [`Segment`]: an ordered pair of points, possibly degenerate

mod segment;
mod viewport;

pub use segment::Segment;
pub use viewport::Viewport;

use crate::math::vec2::Vec2;

pub type Point = Vec2;

//! Cohen-Sutherland clipping of 2D line segments against an axis-aligned
//! viewport.
//!
//! The core is a single pure operation, [`clip`], which returns the visible
//! part of a segment, a rejection, or an input error. Everything else in
//! the crate is plumbing around it: TOML scene files, a small software
//! renderer that rasterizes clipped segments into a PNG, and the `lineclip`
//! binary.
//!
//! # Quick Start
//!
//! ```
//! use lineclip::prelude::*;
//!
//! let view = Viewport::new(0.0, 10.0, 0.0, 10.0);
//! let result = clip(Segment::from_coords(5.0, -5.0, 5.0, 15.0), &view)?;
//! assert_eq!(result, ClipResult::Accepted(Segment::from_coords(5.0, 0.0, 5.0, 10.0)));
//! # Ok::<(), lineclip::ClipError>(())
//! ```

// Public API - exposed to library consumers
pub mod clipper;
pub mod colors;
pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod scene;

// Re-export commonly needed types at crate root for convenience
pub use clipper::{classify, clip, ClipResult, LineClipper, Outcode, Region};
pub use error::{ClipError, InputField};
pub use geometry::{Point, Segment, Viewport};
pub use scene::{SceneConfig, SceneError, SceneReport};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use lineclip::prelude::*;
/// ```
pub mod prelude {
    // Clipping
    pub use crate::clipper::{classify, clip, ClipResult, LineClipper, Outcode, Region};
    pub use crate::error::ClipError;

    // Geometry
    pub use crate::geometry::{Point, Segment, Viewport};
    pub use crate::math::vec2::Vec2;

    // Rendering
    pub use crate::render::Renderer;
}

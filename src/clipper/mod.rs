//! Line clipping against an axis-aligned viewport.
//!
//! - [`outcode`]: classifies a point into one of nine regions around the
//!   viewport.
//! - [`cohen_sutherland`]: the accept/reject/clip loop built on those codes.

pub mod cohen_sutherland;
pub mod outcode;

pub use cohen_sutherland::{clip, ClipResult, LineClipper, MAX_CLIP_STEPS};
pub use outcode::{classify, Outcode, Region};

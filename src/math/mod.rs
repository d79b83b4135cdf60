//! Small vector math used by the geometry types.

pub mod vec2;

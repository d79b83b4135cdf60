//! Software preview renderer for clipped segments.
//!
//! Draws world-space segments and viewport outlines into an ARGB color
//! buffer and exports it as a PNG through the `image` crate.

mod framebuffer;
mod renderer;

pub use framebuffer::FrameBuffer;
pub use renderer::Renderer;

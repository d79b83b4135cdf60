//! ARGB8888 colors used by the preview renderer.

pub const COLOR_BACKGROUND: u32 = 0xFF1E1E1E;
pub const COLOR_GRID: u32 = 0xFF333333;
pub const COLOR_VIEWPORT: u32 = 0xFFFFFFFF;
pub const COLOR_ORIGINAL: u32 = 0xFF505050;
pub const COLOR_ACCEPTED: u32 = 0xFF00FF80;

/// Reorder ARGB into the RGBA byte layout the `image` crate expects.
#[inline]
pub fn argb_to_rgba(color: u32) -> [u8; 4] {
    let [a, r, g, b] = color.to_be_bytes();
    [r, g, b, a]
}

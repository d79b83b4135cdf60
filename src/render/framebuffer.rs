//! Frame buffer abstraction for 2D pixel access.

/// A borrowed view into an ARGB color buffer.
///
/// Wraps a 1D slice with width/height metadata to enable safe 2D pixel
/// access. Row 0 is the top of the image.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from a buffer slice and dimensions.
    ///
    /// # Panics
    /// Panics in debug builds if the buffer length doesn't match width * height
    pub fn new(color_buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            width as usize * height as usize,
            "Color buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        pixel_index(x, y, self.width, self.height)
    }

    /// Set a pixel. Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    pub fn fill(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }
}

/// Row-major buffer index of (x, y), or None outside a `width` x `height` image.
///
/// Computed in `usize`, so large images cannot wrap the index.
#[inline]
pub(super) fn pixel_index(x: i32, y: i32, width: u32, height: u32) -> Option<usize> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    let (width, height) = (width as usize, height as usize);
    (x < width && y < height).then(|| y * width + x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buffer = vec![0u32; 4 * 3];
        let mut fb = FrameBuffer::new(&mut buffer, 4, 3);
        fb.set_pixel(-1, 0, 7);
        fb.set_pixel(4, 0, 7);
        fb.set_pixel(0, 3, 7);
        fb.set_pixel(3, 2, 9);
        assert_eq!(fb.get_pixel(3, 2), Some(9));
        assert_eq!(fb.get_pixel(4, 2), None);
        assert_eq!(buffer.iter().filter(|&&c| c != 0).count(), 1);
        assert_eq!(buffer[2 * 4 + 3], 9);
    }

    #[test]
    fn index_is_row_major_and_bounded() {
        assert_eq!(pixel_index(3, 2, 4, 3), Some(11));
        assert_eq!(pixel_index(0, 0, 4, 3), Some(0));
        assert_eq!(pixel_index(-1, 0, 4, 3), None);
        assert_eq!(pixel_index(0, 3, 4, 3), None);
        assert_eq!(pixel_index(i32::MAX, 0, u32::MAX, 1), Some(i32::MAX as usize));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn index_past_u32_range_does_not_wrap() {
        assert_eq!(
            pixel_index(1, 70_000, 70_000, 70_001),
            Some(70_000 * 70_000 + 1)
        );
    }
}

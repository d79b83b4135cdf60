use std::path::Path;

use image::RgbaImage;

use super::framebuffer::{pixel_index, FrameBuffer};
use crate::clipper::{clip, ClipResult};
use crate::colors::{self, COLOR_BACKGROUND};
use crate::error::ClipError;
use crate::geometry::{Point, Segment, Viewport};

/// Owns a color buffer and draws world-space geometry into it.
///
/// World coordinates map one unit to one pixel with y pointing up, so world
/// `y = 0` lands on the bottom row. Every segment is clipped to the canvas
/// before it is rasterized, which keeps the DDA loop bounded no matter how
/// far outside the canvas the input reaches.
pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
    canvas: Viewport,
}

impl Renderer {
    /// Allocates `width * height` pixels up front; callers taking sizes from
    /// user input should bound them first.
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            color_buffer: vec![COLOR_BACKGROUND; size],
            width,
            height,
            canvas: Viewport::new(
                0.0,
                width.saturating_sub(1) as f64,
                0.0,
                height.saturating_sub(1) as f64,
            ),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The drawable area in world coordinates.
    pub fn canvas(&self) -> &Viewport {
        &self.canvas
    }

    pub fn clear(&mut self, color: u32) {
        self.as_framebuffer().fill(color);
    }

    /// Get a mutable FrameBuffer view into the color buffer.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }

    /// Color of the pixel at a screen position (row 0 at the top).
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        pixel_index(x, y, self.width, self.height).map(|idx| self.color_buffer[idx])
    }

    /// Color of the pixel under a world-space point.
    pub fn pixel_at(&self, p: Point) -> Option<u32> {
        let (x, y) = self.to_screen(p);
        self.pixel(x, y)
    }

    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        let spacing = spacing.max(1);
        let mut fb = self.as_framebuffer();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if x % spacing == 0 || y % spacing == 0 {
                    fb.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draws a line between two screen positions with a DDA walk.
    ///
    /// Steps along the longer axis one pixel at a time and advances the other
    /// axis by the slope, rounding to the nearest pixel. Both endpoints are
    /// drawn.
    pub fn draw_line_dda(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let side_length = dx.abs().max(dy.abs());

        let mut fb = self.as_framebuffer();
        if side_length == 0 {
            fb.set_pixel(x0, y0, color);
            return;
        }

        let x_increment = dx as f64 / side_length as f64;
        let y_increment = dy as f64 / side_length as f64;
        let mut current_x = x0 as f64;
        let mut current_y = y0 as f64;

        for _ in 0..=side_length {
            fb.set_pixel(current_x.round() as i32, current_y.round() as i32, color);
            current_x += x_increment;
            current_y += y_increment;
        }
    }

    /// Clip `segment` to the canvas and rasterize what remains.
    ///
    /// Returns `Ok(false)` when nothing of the segment is on the canvas.
    pub fn draw_segment(&mut self, segment: &Segment, color: u32) -> Result<bool, ClipError> {
        match clip(*segment, &self.canvas)? {
            ClipResult::Accepted(visible) => {
                let (x0, y0) = self.to_screen(visible.p0);
                let (x1, y1) = self.to_screen(visible.p1);
                self.draw_line_dda(x0, y0, x1, y1, color);
                Ok(true)
            }
            ClipResult::Rejected => Ok(false),
        }
    }

    /// Outline a viewport rectangle.
    pub fn draw_viewport(&mut self, viewport: &Viewport, color: u32) -> Result<(), ClipError> {
        let corners = viewport.corners();
        for i in 0..corners.len() {
            let edge = Segment::new(corners[i], corners[(i + 1) % corners.len()]);
            self.draw_segment(&edge, color)?;
        }
        Ok(())
    }

    /// Copy the color buffer into an RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (pixel, &color) in img.pixels_mut().zip(self.color_buffer.iter()) {
            pixel.0 = colors::argb_to_rgba(color);
        }
        img
    }

    /// Write the color buffer as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }

    fn to_screen(&self, p: Point) -> (i32, i32) {
        let x = p.x.round() as i32;
        let y = (self.canvas.ymax - p.y).round() as i32;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::COLOR_ACCEPTED;

    #[test]
    fn horizontal_line_covers_both_endpoints() {
        let mut r = Renderer::new(10, 10);
        r.draw_line_dda(2, 4, 6, 4, COLOR_ACCEPTED);
        for x in 2..=6 {
            assert_eq!(r.pixel(x, 4), Some(COLOR_ACCEPTED));
        }
        assert_eq!(r.pixel(1, 4), Some(COLOR_BACKGROUND));
        assert_eq!(r.pixel(7, 4), Some(COLOR_BACKGROUND));
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut r = Renderer::new(3, 2);
        r.clear(COLOR_ACCEPTED);
        assert!(r.to_image().pixels().all(|p| p.0 == colors::argb_to_rgba(COLOR_ACCEPTED)));
    }

    #[test]
    fn single_pixel_line() {
        let mut r = Renderer::new(4, 4);
        r.draw_line_dda(1, 1, 1, 1, COLOR_ACCEPTED);
        assert_eq!(r.pixel(1, 1), Some(COLOR_ACCEPTED));
    }

    #[test]
    fn world_y_points_up() {
        let mut r = Renderer::new(10, 10);
        let drawn = r
            .draw_segment(&Segment::from_coords(0.0, 0.0, 0.0, 0.0), COLOR_ACCEPTED)
            .unwrap();
        assert!(drawn);
        assert_eq!(r.pixel(0, 9), Some(COLOR_ACCEPTED));
        assert_eq!(r.pixel_at(Point::new(0.0, 0.0)), Some(COLOR_ACCEPTED));
    }

    #[test]
    fn far_away_segment_is_clipped_before_drawing() {
        let mut r = Renderer::new(20, 20);
        let seg = Segment::from_coords(-1.0e9, 10.0, 1.0e9, 10.0);
        assert!(r.draw_segment(&seg, COLOR_ACCEPTED).unwrap());
        for x in 0..20 {
            assert_eq!(r.pixel_at(Point::new(x as f64, 10.0)), Some(COLOR_ACCEPTED));
        }
    }

    #[test]
    fn offscreen_segment_draws_nothing() {
        let mut r = Renderer::new(8, 8);
        let seg = Segment::from_coords(-10.0, -10.0, -2.0, -1.0);
        assert!(!r.draw_segment(&seg, COLOR_ACCEPTED).unwrap());
        assert!(r.to_image().pixels().all(|p| p.0 == colors::argb_to_rgba(COLOR_BACKGROUND)));
    }

    #[test]
    fn viewport_outline_hits_corners() {
        let mut r = Renderer::new(16, 16);
        let vp = Viewport::new(2.0, 12.0, 3.0, 9.0);
        r.draw_viewport(&vp, COLOR_ACCEPTED).unwrap();
        for corner in vp.corners() {
            assert_eq!(r.pixel_at(corner), Some(COLOR_ACCEPTED));
        }
        assert_eq!(r.pixel_at(Point::new(7.0, 6.0)), Some(COLOR_BACKGROUND));
    }
}

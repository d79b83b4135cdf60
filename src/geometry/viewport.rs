use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::{ClipError, InputField};

/// An axis-aligned clip rectangle.
///
/// The bounds are inclusive: a point lying exactly on an edge is inside.
/// Construction does not validate; a viewport with `xmin > xmax` or
/// `ymin > ymax` is rejected by [`Viewport::validate`] when it is used for
/// clipping, never silently normalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Viewport {
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Corners in counter-clockwise order starting at (xmin, ymin).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.xmin, self.ymin),
            Point::new(self.xmax, self.ymin),
            Point::new(self.xmax, self.ymax),
            Point::new(self.xmin, self.ymax),
        ]
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Check that every bound is finite and that the bounds are ordered.
    ///
    /// Finiteness is checked first, so a NaN bound reports
    /// [`ClipError::InvalidInput`] rather than an ordering failure.
    pub fn validate(&self) -> Result<(), ClipError> {
        let bounds = [self.xmin, self.xmax, self.ymin, self.ymax];
        if !bounds.iter().all(|b| b.is_finite()) {
            return Err(ClipError::InvalidInput(InputField::Viewport));
        }
        if self.xmin > self.xmax || self.ymin > self.ymax {
            return Err(ClipError::InvalidViewport {
                xmin: self.xmin,
                xmax: self.xmax,
                ymin: self.ymin,
                ymax: self.ymax,
            });
        }
        Ok(())
    }
}

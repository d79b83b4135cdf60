use std::fmt;

use super::Point;
use crate::error::{ClipError, InputField};

/// An ordered pair of endpoints.
///
/// `p0 == p1` is allowed and represents a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub p0: Point,
    pub p1: Point,
}

impl Segment {
    pub const fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    /// Convenience constructor from raw coordinates.
    pub const fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    pub fn is_degenerate(&self) -> bool {
        self.p0 == self.p1
    }

    /// Fails with [`ClipError::InvalidInput`] naming the first endpoint that
    /// has a NaN or infinite coordinate.
    pub fn validate(&self) -> Result<(), ClipError> {
        if !self.p0.is_finite() {
            return Err(ClipError::InvalidInput(InputField::Start));
        }
        if !self.p1.is_finite() {
            return Err(ClipError::InvalidInput(InputField::End));
        }
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} -> {:.*}", p, self.p0, p, self.p1),
            None => write!(f, "{} -> {}", self.p0, self.p1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_segment() {
        assert!(Segment::from_coords(5.0, 5.0, 5.0, 5.0).is_degenerate());
        assert!(!Segment::from_coords(5.0, 5.0, 5.0, 5.5).is_degenerate());
    }

    #[test]
    fn validate_names_the_bad_endpoint() {
        let seg = Segment::from_coords(0.0, 0.0, f64::INFINITY, 1.0);
        assert_eq!(seg.validate(), Err(ClipError::InvalidInput(InputField::End)));

        let seg = Segment::from_coords(f64::NAN, 0.0, 1.0, 1.0);
        assert_eq!(seg.validate(), Err(ClipError::InvalidInput(InputField::Start)));
    }

    #[test]
    fn display_with_precision() {
        let seg = Segment::from_coords(1.0, 2.0, 3.25, 4.0);
        assert_eq!(format!("{seg:.2}"), "(1.00, 2.00) -> (3.25, 4.00)");
    }
}

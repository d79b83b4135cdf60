//! Cohen-Sutherland line clipping against an axis-aligned viewport.
//!
//! Each iteration either trivially accepts the segment (both endpoints
//! inside), trivially rejects it (both endpoints beyond the same edge), or
//! moves one outside endpoint onto the viewport boundary it violates and
//! tries again.
//!
//! Tie-breaks are fixed so results are reproducible:
//! - the start point `p0` is moved first whenever it is outside
//! - boundaries are clipped in [`Region::CLIP_PRIORITY`] order (TOP, BOTTOM,
//!   RIGHT, LEFT)
//!
//! Every endpoint needs at most one clip per axis, so the loop is capped at
//! [`MAX_CLIP_STEPS`]. If round-off ever keeps the loop going past that, the
//! segment is treated as rejected.

use std::fmt;

use tracing::{debug, trace, warn};

use super::outcode::{classify, Outcode, Region};
use crate::error::ClipError;
use crate::geometry::{Point, Segment, Viewport};

/// Upper bound on boundary intersections performed for a single segment.
pub const MAX_CLIP_STEPS: usize = 4;

/// Outcome of clipping one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipResult {
    /// The visible part of the segment, possibly the input unchanged.
    Accepted(Segment),
    /// No part of the segment lies inside the viewport.
    Rejected,
}

impl ClipResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    pub fn segment(&self) -> Option<Segment> {
        match self {
            Self::Accepted(segment) => Some(*segment),
            Self::Rejected => None,
        }
    }
}

/// Prints the clipped endpoints, or `REJECTED`.
impl fmt::Display for ClipResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted(segment) => fmt::Display::fmt(segment, f),
            Self::Rejected => f.write_str("REJECTED"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    Start,
    End,
}

/// Clips segments against one viewport.
///
/// The viewport is validated once in [`LineClipper::new`]; after that every
/// call only has to check the segment's own coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineClipper {
    viewport: Viewport,
}

impl LineClipper {
    /// Fails with [`ClipError::InvalidInput`] for a non-finite bound and
    /// [`ClipError::InvalidViewport`] for out-of-order bounds.
    pub fn new(viewport: Viewport) -> Result<Self, ClipError> {
        viewport.validate()?;
        Ok(Self { viewport })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn classify(&self, p: Point) -> Outcode {
        classify(p, &self.viewport)
    }

    /// Clip a single segment.
    pub fn clip(&self, segment: Segment) -> Result<ClipResult, ClipError> {
        segment.validate()?;
        Ok(self.clip_finite(segment))
    }

    /// Clip every segment in order, yielding one result per input.
    pub fn clip_all<'a, I>(
        &'a self,
        segments: I,
    ) -> impl Iterator<Item = Result<ClipResult, ClipError>> + 'a
    where
        I: IntoIterator<Item = Segment>,
        I::IntoIter: 'a,
    {
        segments.into_iter().map(move |segment| self.clip(segment))
    }

    fn clip_finite(&self, segment: Segment) -> ClipResult {
        let viewport = &self.viewport;

        if segment.is_degenerate() {
            return if self.classify(segment.p0).is_inside() {
                ClipResult::Accepted(segment)
            } else {
                ClipResult::Rejected
            };
        }

        let mut current = segment;
        let mut code0 = self.classify(current.p0);
        let mut code1 = self.classify(current.p1);
        let mut steps = 0;

        loop {
            if (code0 | code1).is_inside() {
                debug!(steps, "accepted {current}");
                return ClipResult::Accepted(current);
            }
            if code0.shares_region(code1) {
                debug!(steps, %code0, %code1, "rejected {segment}");
                return ClipResult::Rejected;
            }
            if steps == MAX_CLIP_STEPS {
                warn!(
                    %code0,
                    %code1,
                    "segment {segment} did not settle after {MAX_CLIP_STEPS} clips, rejecting"
                );
                return ClipResult::Rejected;
            }
            steps += 1;

            let (endpoint, code) = if !code0.is_inside() {
                (Endpoint::Start, code0)
            } else {
                (Endpoint::End, code1)
            };
            let Some(region) = code.clip_boundary() else {
                return ClipResult::Rejected;
            };

            let point = intersect(&current, endpoint, region, viewport);
            trace!(step = steps, ?endpoint, %region, "clipped to {point}");
            if !point.is_finite() {
                warn!(%region, "segment {segment} produced a non-finite intersection, rejecting");
                return ClipResult::Rejected;
            }

            match endpoint {
                Endpoint::Start => {
                    current.p0 = point;
                    code0 = self.classify(point);
                }
                Endpoint::End => {
                    current.p1 = point;
                    code1 = self.classify(point);
                }
            }
        }
    }
}

/// Clip `segment` to `viewport`.
///
/// Validates the viewport and the segment before doing any work. To clip
/// many segments against the same viewport, build a [`LineClipper`] once.
///
/// ```
/// use lineclip::{clip, ClipResult, Segment, Viewport};
///
/// let view = Viewport::new(2.0, 8.0, 2.0, 8.0);
/// let result = clip(Segment::from_coords(0.0, 0.0, 10.0, 10.0), &view).unwrap();
/// assert_eq!(result, ClipResult::Accepted(Segment::from_coords(2.0, 2.0, 8.0, 8.0)));
/// ```
pub fn clip(segment: Segment, viewport: &Viewport) -> Result<ClipResult, ClipError> {
    LineClipper::new(*viewport)?.clip(segment)
}

/// Intersection of the segment's line with one boundary of the viewport.
///
/// The coordinate on the boundary is set exactly, so the new endpoint never
/// drifts back outside on that axis. A line parallel to the boundary keeps
/// the moving endpoint's other coordinate and is clamped onto the boundary.
///
/// Differences are taken between halved coordinates: `p1.x - p0.x` can
/// overflow to infinity for finite endpoints near `f64::MAX`, the halves
/// cannot. Halving is exact for normal floats, so ordinary inputs round the
/// same as the direct formula.
fn intersect(segment: &Segment, endpoint: Endpoint, region: Region, viewport: &Viewport) -> Point {
    let boundary = region.boundary(viewport);
    let moving = match endpoint {
        Endpoint::Start => segment.p0,
        Endpoint::End => segment.p1,
    };
    let (p0, p1) = (segment.p0, segment.p1);
    let half_dx = p1.x * 0.5 - p0.x * 0.5;
    let half_dy = p1.y * 0.5 - p0.y * 0.5;

    if region.is_vertical() {
        if half_dx == 0.0 {
            return Point::new(boundary, moving.y);
        }
        let t = (boundary * 0.5 - p0.x * 0.5) / half_dx;
        Point::new(boundary, halved_lerp(p0.y, half_dy, t))
    } else {
        if half_dy == 0.0 {
            return Point::new(moving.x, boundary);
        }
        let t = (boundary * 0.5 - p0.y * 0.5) / half_dy;
        Point::new(halved_lerp(p0.x, half_dx, t), boundary)
    }
}

/// `start + t * 2 * half_delta`, doubled only at the end.
///
/// For `t` in `[0, 1]` the sum stays between the two halved endpoints, so
/// neither step can overflow.
fn halved_lerp(start: f64, half_delta: f64, t: f64) -> f64 {
    (start * 0.5 + t * half_delta) * 2.0
}

//! Region codes for the Cohen-Sutherland line clipper.
//!
//! The plane around a viewport is split into nine regions by extending its
//! four edges:
//!
//! ```text
//!            |        |
//!  TOP|LEFT  |  TOP   |  TOP|RIGHT
//!  ----------+--------+-----------  y = ymax
//!    LEFT    | inside |   RIGHT
//!  ----------+--------+-----------  y = ymin
//!  BOTTOM|   | BOTTOM |  BOTTOM|
//!  LEFT      |        |  RIGHT
//!        x = xmin   x = xmax
//! ```
//!
//! Each flag is set when the point lies strictly beyond that edge, so the
//! edges themselves belong to the inside region.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use enumflags2::{bitflags, BitFlags};

use crate::geometry::{Point, Viewport};

/// One of the four half-planes outside a viewport.
#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Left = 0b0001,
    Right = 0b0010,
    Bottom = 0b0100,
    Top = 0b1000,
}

impl Region {
    /// The order in which violated boundaries are clipped.
    pub const CLIP_PRIORITY: [Region; 4] = [
        Region::Top,
        Region::Bottom,
        Region::Right,
        Region::Left,
    ];

    /// True for the boundaries that are vertical lines (`x = const`).
    pub fn is_vertical(self) -> bool {
        matches!(self, Region::Left | Region::Right)
    }

    /// The coordinate of this boundary's line on `viewport`.
    pub fn boundary(self, viewport: &Viewport) -> f64 {
        match self {
            Region::Left => viewport.xmin,
            Region::Right => viewport.xmax,
            Region::Bottom => viewport.ymin,
            Region::Top => viewport.ymax,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Region::Left => "LEFT",
            Region::Right => "RIGHT",
            Region::Bottom => "BOTTOM",
            Region::Top => "TOP",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The 4-bit region code of a point. Empty means inside or on the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Outcode(BitFlags<Region>);

impl Outcode {
    pub fn inside() -> Self {
        Self::default()
    }

    pub fn is_inside(self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(self, region: Region) -> bool {
        self.0.contains(region)
    }

    /// Number of flags set: 0 inside, 1 beside an edge, 2 in a corner region.
    pub fn len(self) -> usize {
        self.0.len()
    }

    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(self) -> u8 {
        self.0.bits()
    }

    /// True when both codes share an outside half-plane, which means the
    /// segment between them cannot cross the viewport.
    pub fn shares_region(self, other: Self) -> bool {
        !(self & other).is_inside()
    }

    /// The first violated boundary in [`Region::CLIP_PRIORITY`] order.
    pub fn clip_boundary(self) -> Option<Region> {
        Region::CLIP_PRIORITY
            .into_iter()
            .find(|&region| self.contains(region))
    }

    pub fn regions(self) -> impl Iterator<Item = Region> {
        self.0.iter()
    }
}

impl From<Region> for Outcode {
    fn from(region: Region) -> Self {
        Self(region.into())
    }
}

impl BitOr for Outcode {
    type Output = Outcode;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Region> for Outcode {
    type Output = Outcode;

    fn bitor(self, rhs: Region) -> Self::Output {
        Self(self.0 | rhs)
    }
}

impl BitAnd for Outcode {
    type Output = Outcode;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for Outcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inside() {
            return f.write_str("INSIDE");
        }
        for (i, region) in self.regions().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{region}")?;
        }
        Ok(())
    }
}

/// Classify `p` against `viewport`.
///
/// Expects a validated viewport and a finite point; the clipper checks both
/// before calling this.
pub fn classify(p: Point, viewport: &Viewport) -> Outcode {
    let mut code = Outcode::inside();

    if p.x < viewport.xmin {
        code = code | Region::Left;
    }
    if p.x > viewport.xmax {
        code = code | Region::Right;
    }
    if p.y < viewport.ymin {
        code = code | Region::Bottom;
    }
    if p.y > viewport.ymax {
        code = code | Region::Top;
    }

    code
}

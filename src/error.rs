//! Error types for the clipping core.

use std::fmt;

use thiserror::Error;

/// Which input carried a non-finite coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// One of the viewport bounds.
    Viewport,
    /// The segment's first endpoint.
    Start,
    /// The segment's second endpoint.
    End,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Viewport => "viewport bound",
            Self::Start => "segment start point",
            Self::End => "segment end point",
        };
        f.write_str(name)
    }
}

/// Errors raised before any classification happens.
///
/// Neither is recoverable inside the clipper: the caller has to supply
/// different input.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ClipError {
    /// The viewport bounds are out of order.
    #[error("invalid viewport: x [{xmin}, {xmax}], y [{ymin}, {ymax}] requires xmin <= xmax and ymin <= ymax")]
    InvalidViewport {
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    },

    /// A coordinate is NaN or infinite.
    #[error("invalid input: {0} has a non-finite coordinate")]
    InvalidInput(InputField),
}

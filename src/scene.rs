//! TOML scene files: a viewport plus the segments to clip against it.
//!
//! ```toml
//! [viewport]
//! xmin = 100.0
//! xmax = 200.0
//! ymin = 100.0
//! ymax = 200.0
//!
//! [canvas]
//! width = 300
//! height = 300
//!
//! [[segments]]
//! name = "diagonal"
//! p0 = [50.0, 50.0]
//! p1 = [250.0, 250.0]
//! ```
//!
//! `[canvas]` and every field in it are optional, as is a segment's `name`.
//! Unnamed segments are reported as `#<index>`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::clipper::{ClipResult, LineClipper};
use crate::colors::{COLOR_ACCEPTED, COLOR_GRID, COLOR_ORIGINAL, COLOR_VIEWPORT};
use crate::error::ClipError;
use crate::geometry::{Point, Segment, Viewport};
use crate::render::Renderer;

/// Largest preview canvas, in pixels, a scene may ask for (256 MiB of ARGB).
pub const MAX_CANVAS_PIXELS: u32 = 1 << 26;

/// Error type for loading and running scenes.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing scene at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse scene TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The scene could not be serialized to TOML.
    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The preview canvas is empty or larger than [`MAX_CANVAS_PIXELS`].
    #[error(
        "invalid canvas size {width}x{height}: dimensions must be non-zero \
         and cover at most {max} pixels",
        max = MAX_CANVAS_PIXELS
    )]
    InvalidCanvas { width: u32, height: u32 },

    /// The scene's viewport cannot be used for clipping.
    #[error(transparent)]
    Clip(#[from] ClipError),
}

// ── Scene schema types ────────────────────────────────────────────────────────

/// Top-level scene document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub segments: Vec<SegmentEntry>,
}

/// Size of the PNG preview, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_size")]
    pub width: u32,
    #[serde(default = "default_canvas_size")]
    pub height: u32,
    /// Draw a background grid with this spacing in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_spacing: Option<i32>,
}

/// One segment to clip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub p0: [f64; 2],
    pub p1: [f64; 2],
}

fn default_canvas_size() -> u32 {
    300
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_size(),
            height: default_canvas_size(),
            grid_spacing: None,
        }
    }
}

impl SegmentEntry {
    pub fn new(name: impl Into<String>, segment: Segment) -> Self {
        Self {
            name: Some(name.into()),
            p0: [segment.p0.x, segment.p0.y],
            p1: [segment.p1.x, segment.p1.y],
        }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(Point::from(self.p0), Point::from(self.p1))
    }
}

impl SceneConfig {
    /// The built-in scene: a 100x100 window at (100, 100) with one line for
    /// each classic clipping case.
    pub fn demo() -> Self {
        let viewport = Viewport::new(100.0, 200.0, 100.0, 200.0);
        let segments = [
            ("inside", Segment::from_coords(110.0, 110.0, 190.0, 190.0)),
            ("right of window", Segment::from_coords(210.0, 110.0, 250.0, 190.0)),
            ("above window", Segment::from_coords(50.0, 250.0, 250.0, 250.0)),
            ("two corners", Segment::from_coords(50.0, 50.0, 250.0, 250.0)),
            ("left to right", Segment::from_coords(50.0, 150.0, 250.0, 150.0)),
            ("bottom to top", Segment::from_coords(150.0, 50.0, 150.0, 250.0)),
            ("corner cut", Segment::from_coords(60.0, 150.0, 140.0, 230.0)),
            ("corner miss", Segment::from_coords(40.0, 180.0, 120.0, 260.0)),
            ("single point", Segment::from_coords(150.0, 150.0, 150.0, 150.0)),
        ]
        .into_iter()
        .map(|(name, segment)| SegmentEntry::new(name, segment))
        .collect();

        Self {
            viewport,
            canvas: CanvasConfig {
                grid_spacing: Some(50),
                ..CanvasConfig::default()
            },
            segments,
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SceneError> {
        let scene: Self = toml::from_str(text)?;
        scene.validate_canvas()?;
        Ok(scene)
    }

    pub fn to_toml_string(&self) -> Result<String, SceneError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded scene from {}", path.display());
        Self::from_toml_str(&text)
    }

    fn validate_canvas(&self) -> Result<(), SceneError> {
        let CanvasConfig { width, height, .. } = self.canvas;
        match width.checked_mul(height) {
            Some(pixels) if pixels > 0 && pixels <= MAX_CANVAS_PIXELS => Ok(()),
            _ => Err(SceneError::InvalidCanvas { width, height }),
        }
    }

    /// Clip every segment against the scene viewport.
    ///
    /// An unusable viewport fails the whole scene. A segment with non-finite
    /// coordinates only fails its own entry.
    pub fn run(&self) -> Result<SceneReport, SceneError> {
        let clipper = LineClipper::new(self.viewport)?;

        let entries: Vec<ReportEntry> = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let original = entry.segment();
                let name = entry.name.clone().unwrap_or_else(|| format!("#{i}"));
                let result = clipper.clip(original);
                debug!(%name, "{original} => {result:?}");
                ReportEntry {
                    name,
                    original,
                    result,
                }
            })
            .collect();

        let report = SceneReport {
            viewport: self.viewport,
            entries,
        };
        info!(
            accepted = report.accepted(),
            rejected = report.rejected(),
            failed = report.failed(),
            "clipped {} segments",
            report.entries.len()
        );
        Ok(report)
    }

    /// Draw the originals dimmed, the viewport outline, and the clipped
    /// segments highlighted on top.
    pub fn render(&self, report: &SceneReport) -> Result<Renderer, SceneError> {
        self.validate_canvas()?;
        let mut renderer = Renderer::new(self.canvas.width, self.canvas.height);
        if let Some(spacing) = self.canvas.grid_spacing {
            renderer.draw_grid(spacing, COLOR_GRID);
        }

        for entry in &report.entries {
            if entry.result.is_ok() {
                renderer.draw_segment(&entry.original, COLOR_ORIGINAL)?;
            }
        }
        renderer.draw_viewport(&report.viewport, COLOR_VIEWPORT)?;
        for visible in report.visible_segments() {
            renderer.draw_segment(&visible, COLOR_ACCEPTED)?;
        }
        Ok(renderer)
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// The outcome of clipping one scene segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub name: String,
    pub original: Segment,
    pub result: Result<ClipResult, ClipError>,
}

/// Per-segment clip results for a whole scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneReport {
    pub viewport: Viewport,
    pub entries: Vec<ReportEntry>,
}

impl SceneReport {
    pub fn accepted(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, Ok(ClipResult::Accepted(_))))
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, Ok(ClipResult::Rejected)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_err()).count()
    }

    pub fn visible_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().ok().and_then(ClipResult::segment))
    }

    pub fn get(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl fmt::Display for SceneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vp = &self.viewport;
        writeln!(
            f,
            "viewport x [{}, {}] y [{}, {}]",
            vp.xmin, vp.xmax, vp.ymin, vp.ymax
        )?;
        for entry in &self.entries {
            write!(f, "{:<16} {:.1}  =>  ", entry.name, entry.original)?;
            match &entry.result {
                Ok(result) => writeln!(f, "{result:.1}")?,
                Err(e) => writeln!(f, "ERROR: {e}")?,
            }
        }
        write!(
            f,
            "{} accepted, {} rejected, {} failed",
            self.accepted(),
            self.rejected(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SCENE: &str = r#"
[viewport]
xmin = 0.0
xmax = 10.0
ymin = 0.0
ymax = 10.0

[[segments]]
name = "through"
p0 = [-5.0, -5.0]
p1 = [15.0, 15.0]

[[segments]]
p0 = [-5.0, 5.0]
p1 = [-1.0, 5.0]
"#;

    #[test]
    fn parses_and_defaults_canvas() {
        let scene = SceneConfig::from_toml_str(SCENE).unwrap();
        assert_eq!(scene.viewport, Viewport::new(0.0, 10.0, 0.0, 10.0));
        assert_eq!(scene.canvas, CanvasConfig::default());
        assert_eq!(scene.segments.len(), 2);
        assert_eq!(scene.segments[1].name, None);
    }

    #[test]
    fn run_reports_each_segment() {
        let report = SceneConfig::from_toml_str(SCENE).unwrap().run().unwrap();
        assert_eq!(report.accepted(), 1);
        assert_eq!(report.rejected(), 1);
        assert_eq!(report.failed(), 0);

        let through = report.get("through").unwrap();
        let seg = through.result.unwrap().segment().unwrap();
        assert_relative_eq!(seg.p0, Point::new(0.0, 0.0));
        assert_relative_eq!(seg.p1, Point::new(10.0, 10.0));

        assert_eq!(report.get("#1").unwrap().result, Ok(ClipResult::Rejected));
    }

    #[test]
    fn inverted_viewport_fails_the_scene() {
        let text = SCENE.replace("xmin = 0.0", "xmin = 20.0");
        let err = SceneConfig::from_toml_str(&text).unwrap().run().unwrap_err();
        assert!(matches!(err, SceneError::Clip(ClipError::InvalidViewport { .. })));
    }

    #[test]
    fn non_finite_segment_fails_only_its_entry() {
        let text = format!("{SCENE}\n[[segments]]\nname = \"bad\"\np0 = [nan, 0.0]\np1 = [1.0, 1.0]\n");
        let report = SceneConfig::from_toml_str(&text).unwrap().run().unwrap();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.accepted(), 1);
        assert!(report.get("bad").unwrap().result.is_err());
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let text = format!("{SCENE}\n[canvas]\nwidth = 0\n");
        let err = SceneConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, SceneError::InvalidCanvas { width: 0, height: 300 }));
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let text = format!("{SCENE}\n[canvas]\nwidth = 70000\nheight = 70000\n");
        let err = SceneConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidCanvas { width: 70000, height: 70000 }
        ));

        // built in code, the size is still checked before any buffer exists
        let mut scene = SceneConfig::demo();
        scene.canvas.width = 70000;
        scene.canvas.height = 70000;
        let report = scene.run().unwrap();
        assert!(matches!(
            scene.render(&report),
            Err(SceneError::InvalidCanvas { .. })
        ));

        scene.canvas.width = 8192;
        scene.canvas.height = 8193;
        assert!(matches!(
            scene.render(&report),
            Err(SceneError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SceneConfig::from_toml_str("[viewport]\nxmin = ").unwrap_err();
        assert!(matches!(err, SceneError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SceneConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }

    #[test]
    fn demo_scene_matches_the_classic_cases() {
        let report = SceneConfig::demo().run().unwrap();
        let segment = |name: &str| report.get(name).unwrap().result.unwrap().segment();

        assert_eq!(
            segment("inside"),
            Some(Segment::from_coords(110.0, 110.0, 190.0, 190.0))
        );
        assert_eq!(segment("right of window"), None);
        assert_eq!(segment("above window"), None);
        assert_eq!(segment("corner miss"), None);
        assert_eq!(
            segment("left to right"),
            Some(Segment::from_coords(100.0, 150.0, 200.0, 150.0))
        );
        assert_eq!(
            segment("bottom to top"),
            Some(Segment::from_coords(150.0, 100.0, 150.0, 200.0))
        );

        let corners = segment("two corners").unwrap();
        assert_relative_eq!(corners.p0, Point::new(100.0, 100.0));
        assert_relative_eq!(corners.p1, Point::new(200.0, 200.0));

        let cut = segment("corner cut").unwrap();
        assert_relative_eq!(cut.p0, Point::new(100.0, 190.0));
        assert_relative_eq!(cut.p1, Point::new(110.0, 200.0));
    }

    #[test]
    fn toml_round_trip_keeps_the_scene() {
        let scene = SceneConfig::demo();
        let text = scene.to_toml_string().unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), scene);
    }

    #[test]
    fn render_highlights_clipped_segments() {
        let scene = SceneConfig::demo();
        let report = scene.run().unwrap();
        let renderer = scene.render(&report).unwrap();
        assert_eq!(renderer.width(), 300);
        // mid-point of the clipped horizontal line
        assert_eq!(
            renderer.pixel_at(Point::new(150.0, 150.0)),
            Some(COLOR_ACCEPTED)
        );
        // the part of that line outside the window stays dimmed
        assert_eq!(
            renderer.pixel_at(Point::new(70.0, 150.0)),
            Some(COLOR_ORIGINAL)
        );
    }
}

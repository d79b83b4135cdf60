//! `lineclip` command-line front end.
//!
//! ```text
//! lineclip clip --viewport XMIN,XMAX,YMIN,YMAX --segment X0,Y0,X1,Y1
//! lineclip scene [FILE] [--png OUT]
//! ```
//!
//! `clip` prints the clipped endpoints or `REJECTED`. `scene` clips every
//! segment of a TOML scene file (the built-in demo when no file is given)
//! and can render the result to a PNG. Log verbosity comes from `RUST_LOG`,
//! or `--log-level` when given.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lineclip::{clip, SceneConfig, Segment, Viewport};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Clip 2D line segments against an axis-aligned viewport.
#[derive(Debug, Parser)]
#[command(name = "lineclip", version, about)]
struct Cli {
    /// Log filter, e.g. `info` or `lineclip=trace`.
    #[arg(long, global = true, env = "LINECLIP_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clip a single segment and print the result.
    Clip {
        /// Viewport bounds as `XMIN,XMAX,YMIN,YMAX`.
        #[arg(long, value_parser = parse_coords::<4>, allow_hyphen_values = true)]
        viewport: [f64; 4],

        /// Segment endpoints as `X0,Y0,X1,Y1`.
        #[arg(long, value_parser = parse_coords::<4>, allow_hyphen_values = true)]
        segment: [f64; 4],

        /// Decimal places to print.
        #[arg(long, default_value_t = 3)]
        precision: usize,
    },

    /// Clip every segment of a scene file.
    Scene {
        /// TOML scene file. Runs the built-in demo scene when omitted.
        file: Option<PathBuf>,

        /// Render the scene to this PNG file.
        #[arg(long)]
        png: Option<PathBuf>,

        /// Print the scene as TOML instead of clipping it.
        #[arg(long)]
        dump: bool,
    },
}

/// Parse exactly `N` comma-separated numbers.
fn parse_coords<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("`{}`: {e}", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    <[f64; N]>::try_from(values)
        .map_err(|v| format!("expected {N} comma-separated numbers, got {}", v.len()))
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_clip(viewport: [f64; 4], segment: [f64; 4], precision: usize) -> anyhow::Result<()> {
    let [xmin, xmax, ymin, ymax] = viewport;
    let [x0, y0, x1, y1] = segment;
    let viewport = Viewport::new(xmin, xmax, ymin, ymax);
    let segment = Segment::from_coords(x0, y0, x1, y1);

    let result = clip(segment, &viewport).context("clipping failed")?;
    println!("{result:.precision$}");
    Ok(())
}

fn run_scene(file: Option<PathBuf>, png: Option<PathBuf>, dump: bool) -> anyhow::Result<()> {
    let scene = match &file {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            info!("no scene file given, running the built-in demo");
            SceneConfig::demo()
        }
    };

    if dump {
        print!("{}", scene.to_toml_string()?);
        return Ok(());
    }

    let report = scene.run().context("scene could not be clipped")?;
    println!("{report}");

    if let Some(path) = png {
        let renderer = scene.render(&report)?;
        renderer
            .save_png(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}x{} preview to {}", renderer.width(), renderer.height(), path.display());
    }

    if report.failed() > 0 {
        bail!("{} segment(s) had invalid coordinates", report.failed());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Command::Clip {
            viewport,
            segment,
            precision,
        } => run_clip(viewport, segment, precision),
        Command::Scene { file, png, dump } => run_scene(file, png, dump),
    }
}

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use noisegen::{
    ColorMultiplier, DistanceMetric, FramePipeline, NoiseKind, OutputTemplate, RenderConfig,
    Size, ValueFunction, WorleySpace,
};

/// Render procedural noise into image frames.
///
/// Frame N is the slice at depth N through a 3D noise volume. A `#` run in OUTPUT is replaced by
/// the zero-padded frame index, e.g. `frame_###.png`.
#[derive(Parser, Debug)]
#[command(name = "noisegen", version)]
struct Cli {
    /// Output filename template; the extension picks the format (png, jpg, gif, tif, bmp).
    output: Option<String>,

    /// Base configuration JSON; explicit flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image size, WIDTHxHEIGHT.
    #[arg(long)]
    size: Option<Size>,

    /// Noise type: white, simplex, opensimplex, perlin, worley.
    #[arg(long = "type", value_name = "TYPE")]
    kind: Option<NoiseKind>,

    /// Worley distance function: euclidean, manhattan, chebyshev, signed-manhattan.
    #[arg(long)]
    distfunc: Option<DistanceMetric>,

    /// Colour multiplier, #RRGGBB.
    #[arg(long, visible_alias = "color")]
    colour: Option<ColorMultiplier>,

    /// Number of frames to render.
    #[arg(long)]
    frames: Option<u64>,

    /// Depth index of the first frame.
    #[arg(long)]
    offset: Option<u64>,

    /// Worker threads (default: available parallelism minus one).
    #[arg(long)]
    threads: Option<usize>,

    /// Noise seed, any 64-bit integer; negative values are taken bit-for-bit (default: random).
    #[arg(long, value_parser = parse_seed, allow_negative_numbers = true)]
    seed: Option<u64>,

    /// Worley cell edge length in pixels.
    #[arg(long)]
    cellsize: Option<u32>,

    /// Worley feature points per cell.
    #[arg(long)]
    points: Option<u32>,

    /// Worley value function: second-minus-first, closest.
    #[arg(long)]
    value: Option<ValueFunction>,

    /// Worley point field: volume (animated through depth) or plane.
    #[arg(long)]
    space: Option<WorleySpace>,

    /// Use the approximate square root for Euclidean distances.
    #[arg(long)]
    fastsqrt: bool,

    /// Log per-frame timings.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer explicit flags over `cfg`.
    fn apply(self, mut cfg: RenderConfig) -> RenderConfig {
        if let Some(v) = self.output {
            cfg.output = OutputTemplate::new(v);
        }
        if let Some(v) = self.size {
            cfg.size = v;
        }
        if let Some(v) = self.kind {
            cfg.kind = v;
        }
        if let Some(v) = self.colour {
            cfg.color = v;
        }
        if let Some(v) = self.frames {
            cfg.frames = v;
        }
        if let Some(v) = self.offset {
            cfg.offset = v;
        }
        if self.threads.is_some() {
            cfg.threads = self.threads;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(v) = self.distfunc {
            cfg.worley.metric = v;
        }
        if let Some(v) = self.cellsize {
            cfg.worley.cell_size = v;
        }
        if let Some(v) = self.points {
            cfg.worley.points_per_cell = v;
        }
        if let Some(v) = self.value {
            cfg.worley.value_fn = v;
        }
        if let Some(v) = self.space {
            cfg.worley.space = v;
        }
        if self.fastsqrt {
            cfg.worley.fast_sqrt = true;
        }
        cfg
    }
}

/// Unsigned seeds pass through; signed ones keep their two's-complement bits.
fn parse_seed(s: &str) -> Result<u64, String> {
    s.parse::<u64>()
        .or_else(|_| s.parse::<i64>().map(|v| v as u64))
        .map_err(|_| format!("invalid seed '{s}'; expected a 64-bit integer"))
}

/// Accept single-dash long flags (`-size 64x64`) alongside the usual `--size 64x64`.
///
/// Short flags (`-v`, `-h`), negative numbers (`-5`) and everything after a bare `--` pass
/// through untouched.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut out = Vec::new();
    let mut passthrough = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        let long_single_dash = arg
            .to_str()
            .and_then(|s| s.strip_prefix('-'))
            .is_some_and(|rest| {
                rest.len() > 1
                    && !rest.starts_with('-')
                    && !rest.starts_with(|c: char| c.is_ascii_digit())
            });
        if arg.to_str() == Some("--") {
            passthrough = true;
            out.push(arg);
        } else if long_single_dash {
            let mut fixed = OsString::from("-");
            fixed.push(&arg);
            out.push(fixed);
        } else {
            out.push(arg);
        }
    }
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    let base = match &cli.config {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RenderConfig::default(),
    };
    let cfg = cli.apply(base);

    let pipeline = FramePipeline::new(&cfg).context("invalid render settings")?;
    let stats = pipeline.run()?;

    eprintln!(
        "wrote {} of {} frame(s) to '{}' (seed {})",
        stats.frames_written,
        stats.frames_total,
        cfg.output.pattern(),
        pipeline.seed()
    );
    Ok(())
}

use std::path::PathBuf;
use std::time::Instant;

use crate::config::RenderConfig;
use crate::dispatch::scheduler::{DispatchStats, FrameScheduler, resolve_worker_count};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{NoiseError, NoiseResult};
use crate::render::FrameRgba;
use crate::render::assemble::assemble;
use crate::render::output::write_frame;
use crate::source::{NoiseSource, build_source};

/// Render one configuration: build the noise source once, then turn frame indices into files.
///
/// Pipeline per frame:
/// 1. [`NoiseSource::render_field`] at depth `frame`
/// 2. [`assemble`] with the configured colour
/// 3. [`write_frame`] to the templated output path
///
/// The pipeline is shared by reference across every worker thread; nothing in it mutates after
/// construction.
pub struct FramePipeline {
    config: RenderConfig,
    seed: u64,
    source: Box<dyn NoiseSource>,
}

impl FramePipeline {
    pub fn new(config: &RenderConfig) -> NoiseResult<Self> {
        config.validate()?;
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                tracing::info!(seed, "no seed given, drew a random one");
                seed
            }
        };
        let source = build_source(config.kind, seed, &config.worley)?;
        Ok(Self {
            config: config.clone(),
            seed,
            source,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The seed actually used, after resolving a missing one.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Render a frame to pixels without touching the filesystem.
    #[tracing::instrument(skip(self), fields(kind = %self.config.kind))]
    pub fn render_frame(&self, frame: FrameIndex) -> NoiseResult<FrameRgba> {
        let depth = i64::try_from(frame.0).map_err(|_| {
            NoiseError::validation(format!("frame {frame} exceeds the depth range"))
        })?;

        let t0 = Instant::now();
        let field = self.source.render_field(self.config.size, depth);
        let t_field = t0.elapsed();
        let rgba = assemble(&field, self.config.color);
        tracing::debug!(
            field_ms = t_field.as_secs_f64() * 1000.0,
            total_ms = t0.elapsed().as_secs_f64() * 1000.0,
            "frame rendered"
        );
        Ok(rgba)
    }

    /// Render `frame` and write it to its templated path.
    pub fn render_to_file(&self, worker: usize, frame: FrameIndex) -> NoiseResult<PathBuf> {
        let path = self.config.output.path_for(frame);
        tracing::info!(worker, frame = frame.0, path = %path.display(), "rendering frame");
        let rgba = self.render_frame(frame)?;
        let format = write_frame(&rgba, &path)?;
        tracing::debug!(worker, frame = frame.0, ?format, "frame written");
        Ok(path)
    }

    /// Render every configured frame across the worker pool.
    ///
    /// Frames that fail to render or write are logged and counted as skipped; the run itself only
    /// fails if the frame range cannot be built.
    pub fn run(&self) -> NoiseResult<DispatchStats> {
        let range = self.config.frame_range()?;
        let workers = resolve_worker_count(self.config.threads, range.len_frames());
        tracing::info!(
            kind = %self.config.kind,
            size = %self.config.size,
            frames = range.len_frames(),
            offset = range.start.0,
            workers,
            seed = self.seed,
            "starting render"
        );

        let t0 = Instant::now();
        let stats = FrameScheduler::new(workers).run(range, |worker, frame| {
            self.render_to_file(worker, frame).map(|_| ())
        });
        tracing::info!(
            written = stats.frames_written,
            skipped = stats.frames_skipped,
            elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
            "render finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{FrameRange, Size};
use crate::foundation::error::{NoiseError, NoiseResult};
use crate::render::assemble::ColorMultiplier;
use crate::render::output::OutputTemplate;
use crate::source::NoiseKind;
use crate::worley::engine::{WorleyConfig, WorleySpace};
use crate::worley::grid::SpatialGrid;

/// Everything a render run needs.
///
/// Loaded from JSON (every field optional) or built from command-line flags. Call
/// [`RenderConfig::validate`] before rendering; [`crate::FramePipeline::new`] does.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub size: Size,
    pub kind: NoiseKind,
    pub color: ColorMultiplier,
    /// Number of frames to render.
    pub frames: u64,
    /// Depth index of the first frame.
    pub offset: u64,
    /// Worker threads, clamped to `[1, frames]`; `None` picks one less than the available
    /// parallelism.
    pub threads: Option<usize>,
    /// `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    pub output: OutputTemplate,
    pub worley: WorleyConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: Size::default(),
            kind: NoiseKind::default(),
            color: ColorMultiplier::default(),
            frames: 1,
            offset: 0,
            threads: None,
            seed: None,
            output: OutputTemplate::default(),
            worley: WorleyConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_path(path: &Path) -> NoiseResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|e| NoiseError::serde(format!("config '{}': {e}", path.display())))
    }

    pub fn validate(&self) -> NoiseResult<()> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(NoiseError::validation(format!(
                "size must be non-zero, got {}",
                self.size
            )));
        }
        if self.frames == 0 {
            return Err(NoiseError::validation("frame count must be >= 1"));
        }
        let range = self.frame_range()?;
        // Frame indices become signed depth coordinates.
        if i64::try_from(range.end.0).is_err() {
            return Err(NoiseError::validation(format!(
                "frames {}..{} exceed the depth range",
                range.start, range.end
            )));
        }
        self.worley.validate()?;
        if self.kind == NoiseKind::Worley && self.worley.space == WorleySpace::Volume {
            let max = SpatialGrid::max_coordinate(self.worley.cell_size);
            let last = range.end.0 - 1;
            if last > max as u64 {
                return Err(NoiseError::validation(format!(
                    "frame {last} exceeds the worley depth limit {max} for cell size {}",
                    self.worley.cell_size
                )));
            }
        }
        Ok(())
    }

    pub fn frame_range(&self) -> NoiseResult<FrameRange> {
        FrameRange::from_offset(self.offset, self.frames)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;

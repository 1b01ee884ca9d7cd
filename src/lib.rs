//! noisegen renders procedural noise into image frames.
//!
//! Cellular (Worley) noise is the centrepiece; white, simplex, OpenSimplex and Perlin noise sit
//! behind the same [`NoiseSource`] interface. Frames are slices through a 3D noise volume, so a
//! run over consecutive frame indices animates smoothly. The public API is pipeline-oriented:
//!
//! - Build or load a [`RenderConfig`]
//! - Create a [`FramePipeline`]
//! - Render single frames, or [`FramePipeline::run`] the whole range across a worker pool
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod config;
pub(crate) mod dispatch;
pub(crate) mod render;
pub(crate) mod source;
pub(crate) mod worley;

pub use crate::foundation::core::{FrameIndex, FrameRange, Size};
pub use crate::foundation::error::{NoiseError, NoiseResult};

pub use crate::config::RenderConfig;
pub use crate::dispatch::cursor::{DispatchCursor, DispatchState};
pub use crate::dispatch::scheduler::{
    DispatchStats, FrameScheduler, default_worker_count, resolve_worker_count,
};
pub use crate::render::FrameRgba;
pub use crate::render::assemble::{ColorMultiplier, assemble};
pub use crate::render::output::{OutputFormat, OutputTemplate, ensure_parent_dir, write_frame};
pub use crate::render::pipeline::FramePipeline;
pub use crate::source::cellular::CellularNoise;
pub use crate::source::field::ScalarField;
pub use crate::source::gradient::GradientNoise;
pub use crate::source::white::WhiteNoise;
pub use crate::source::{NoiseKind, NoiseSource, build_source};
pub use crate::worley::engine::{WorleyConfig, WorleyEngine, WorleySpace};
pub use crate::worley::grid::{CellCoord2, CellCoord3, FeaturePoint2, FeaturePoint3, SpatialGrid};
pub use crate::worley::metric::{DistanceMetric, Measure, ValueFunction, noise_value};

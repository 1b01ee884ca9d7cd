use std::str::FromStr;

use crate::foundation::core::Size;
use crate::foundation::error::{NoiseError, NoiseResult};
use crate::source::field::ScalarField;
use crate::worley::grid::SpatialGrid;
use crate::worley::metric::{DistanceMetric, Measure, ValueFunction, noise_value};

/// Which point field a frame samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorleySpace {
    /// 2D slice through a 3D point field; frame `n` is the slice at depth `n`.
    #[default]
    Volume,
    /// Pure 2D point field; the depth index is ignored.
    Plane,
}

impl FromStr for WorleySpace {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "volume" | "3d" => Ok(Self::Volume),
            "plane" | "2d" => Ok(Self::Plane),
            other => Err(NoiseError::validation(format!(
                "invalid worley space '{other}'; expected volume or plane"
            ))),
        }
    }
}

/// Tunables for cellular noise.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorleyConfig {
    /// Edge length of a grid cell in pixels.
    pub cell_size: u32,
    /// Feature points scattered into every cell.
    pub points_per_cell: u32,
    pub metric: DistanceMetric,
    pub value_fn: ValueFunction,
    pub fast_sqrt: bool,
    pub space: WorleySpace,
}

impl Default for WorleyConfig {
    fn default() -> Self {
        Self {
            cell_size: SpatialGrid::DEFAULT_CELL_SIZE,
            points_per_cell: SpatialGrid::DEFAULT_POINTS_PER_CELL,
            metric: DistanceMetric::default(),
            value_fn: ValueFunction::default(),
            fast_sqrt: false,
            space: WorleySpace::default(),
        }
    }
}

impl WorleyConfig {
    pub fn validate(&self) -> NoiseResult<()> {
        SpatialGrid::new(0, self.cell_size, self.points_per_cell).map(|_| ())
    }
}

/// Cellular noise over a [`SpatialGrid`].
///
/// Holds nothing but the seed-derived grid and the fixed configuration, so one engine can be shared
/// by every worker thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorleyEngine {
    grid: SpatialGrid,
    measure: Measure,
    value_fn: ValueFunction,
    space: WorleySpace,
}

impl WorleyEngine {
    pub fn new(seed: u64, cfg: &WorleyConfig) -> NoiseResult<Self> {
        Ok(Self {
            grid: SpatialGrid::new(seed, cfg.cell_size, cfg.points_per_cell)?,
            measure: Measure {
                metric: cfg.metric,
                fast_sqrt: cfg.fast_sqrt,
            },
            value_fn: cfg.value_fn,
            space: cfg.space,
        })
    }

    /// Same engine, different distance metric.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.measure.metric = metric;
        self
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn space(&self) -> WorleySpace {
        self.space
    }

    pub fn value_at_2d(&self, x: i64, y: i64) -> f32 {
        let points = self.grid.nearby_points_2d(self.grid.cell_of_2d(x, y));
        let d = self.measure.sorted_distances_2d([x, y], &points);
        noise_value(&d, self.grid.cell_size(), self.value_fn)
    }

    pub fn value_at_3d(&self, x: i64, y: i64, z: i64) -> f32 {
        let points = self.grid.nearby_points_3d(self.grid.cell_of_3d(x, y, z));
        let d = self.measure.sorted_distances_3d([x, y, z], &points);
        noise_value(&d, self.grid.cell_size(), self.value_fn)
    }

    /// Render a full frame, picking the 2D or 3D grid from the configured [`WorleySpace`].
    pub fn render_field(&self, size: Size, depth: i64) -> ScalarField {
        match self.space {
            WorleySpace::Volume => self.render_slice(size, depth),
            WorleySpace::Plane => self.render_surface(size),
        }
    }

    /// Render the pure 2D surface.
    pub fn render_surface(&self, size: Size) -> ScalarField {
        let mut field = ScalarField::zeros(size);
        let mut dist = Vec::new();
        for block in CellBlocks::new(size, self.grid.cell_size()) {
            let cell = self
                .grid
                .cell_of_2d(i64::from(block.x0), i64::from(block.y0));
            let points = self.grid.nearby_points_2d(cell);
            for y in block.y0..block.y1 {
                for x in block.x0..block.x1 {
                    self.measure
                        .fill_sorted_2d(&mut dist, [i64::from(x), i64::from(y)], &points);
                    field.set(x, y, noise_value(&dist, self.grid.cell_size(), self.value_fn));
                }
            }
        }
        field
    }

    /// Render the slice at depth `z` through the 3D point field.
    pub fn render_slice(&self, size: Size, z: i64) -> ScalarField {
        let mut field = ScalarField::zeros(size);
        let mut dist = Vec::new();
        for block in CellBlocks::new(size, self.grid.cell_size()) {
            let cell = self
                .grid
                .cell_of_3d(i64::from(block.x0), i64::from(block.y0), z);
            let points = self.grid.nearby_points_3d(cell);
            for y in block.y0..block.y1 {
                for x in block.x0..block.x1 {
                    self.measure.fill_sorted_3d(
                        &mut dist,
                        [i64::from(x), i64::from(y), z],
                        &points,
                    );
                    field.set(x, y, noise_value(&dist, self.grid.cell_size(), self.value_fn));
                }
            }
        }
        field
    }
}

/// Pixel rectangle covered by one grid cell, clipped to the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellBlock {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

/// Row-major walk over the cell-aligned blocks of an image.
///
/// Every pixel in a block shares a containing cell, so the block's neighbourhood is looked up once.
struct CellBlocks {
    size: Size,
    cell: u32,
    x: u32,
    y: u32,
}

impl CellBlocks {
    fn new(size: Size, cell: u32) -> Self {
        Self {
            size,
            cell,
            x: 0,
            y: 0,
        }
    }
}

impl Iterator for CellBlocks {
    type Item = CellBlock;

    fn next(&mut self) -> Option<CellBlock> {
        if self.size.width == 0 || self.y >= self.size.height {
            return None;
        }
        let block = CellBlock {
            x0: self.x,
            y0: self.y,
            x1: self.x.saturating_add(self.cell).min(self.size.width),
            y1: self.y.saturating_add(self.cell).min(self.size.height),
        };
        self.x = block.x1;
        if self.x >= self.size.width {
            self.x = 0;
            self.y = block.y1;
        }
        Some(block)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/worley/engine.rs"]
mod tests;

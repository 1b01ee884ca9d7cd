use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::foundation::error::{NoiseError, NoiseResult};
use crate::foundation::math::floor_div;

/// Integer coordinate of a 2D grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoord2 {
    pub x: i64,
    pub y: i64,
}

/// Integer coordinate of a 3D grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoord3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// Feature point on the 2D plane, in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeaturePoint2 {
    pub x: i64,
    pub y: i64,
}

/// Feature point in 3D space, in pixel units (`z` is the frame depth axis).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeaturePoint3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// Spatial hash grid that scatters a fixed number of feature points into every cell.
///
/// Points are never stored. Each coordinate is a pure hash of `(seed, cell, point, axis)`, so
/// any thread asking for the same cell gets the same points in the same order, in this process or
/// the next one.
///
/// Lookups only visit the containing cell and its immediate neighbours (3×3 or 3×3×3). That is an
/// approximation: the true two nearest points may sit two cells away when a neighbourhood happens
/// to be sparse. Raising `points_per_cell` relative to `cell_size` makes that rarer at the cost of
/// more distance evaluations per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpatialGrid {
    seed: u64,
    cell_size: u32,
    points_per_cell: u32,
}

const DIM_2D: u8 = 2;
const DIM_3D: u8 = 3;

impl SpatialGrid {
    pub const DEFAULT_CELL_SIZE: u32 = 256;
    pub const DEFAULT_POINTS_PER_CELL: u32 = 3;

    pub fn new(seed: u64, cell_size: u32, points_per_cell: u32) -> NoiseResult<Self> {
        if cell_size == 0 {
            return Err(NoiseError::validation("worley cell size must be >= 1"));
        }
        if points_per_cell == 0 {
            return Err(NoiseError::validation("worley points per cell must be >= 1"));
        }
        Ok(Self {
            seed,
            cell_size,
            points_per_cell,
        })
    }

    /// Largest coordinate on any axis whose 3×3×3 neighbourhood (origins plus in-cell offsets)
    /// stays within `i64`.
    pub fn max_coordinate(cell_size: u32) -> i64 {
        let cs = i64::from(cell_size.max(1));
        // The centre cell must leave room for its upper neighbour.
        (i64::MAX / cs - 1) * cs - 1
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn points_per_cell(&self) -> u32 {
        self.points_per_cell
    }

    pub fn cell_of_2d(&self, x: i64, y: i64) -> CellCoord2 {
        let cs = i64::from(self.cell_size);
        CellCoord2 {
            x: floor_div(x, cs),
            y: floor_div(y, cs),
        }
    }

    /// All three axes use true floor division, so `z = -1` lands in cell `-1`, not `0`.
    pub fn cell_of_3d(&self, x: i64, y: i64, z: i64) -> CellCoord3 {
        let cs = i64::from(self.cell_size);
        CellCoord3 {
            x: floor_div(x, cs),
            y: floor_div(y, cs),
            z: floor_div(z, cs),
        }
    }

    pub fn points_in_cell_2d(&self, cell: CellCoord2) -> Vec<FeaturePoint2> {
        let cs = i64::from(self.cell_size);
        let (ox, oy) = (cell.x * cs, cell.y * cs);
        (0..self.points_per_cell)
            .map(|i| {
                let key = [cell.x, cell.y, 0];
                FeaturePoint2 {
                    x: ox + self.offset(DIM_2D, key, i, 0),
                    y: oy + self.offset(DIM_2D, key, i, 1),
                }
            })
            .collect()
    }

    pub fn points_in_cell_3d(&self, cell: CellCoord3) -> Vec<FeaturePoint3> {
        let cs = i64::from(self.cell_size);
        let (ox, oy, oz) = (cell.x * cs, cell.y * cs, cell.z * cs);
        (0..self.points_per_cell)
            .map(|i| {
                let key = [cell.x, cell.y, cell.z];
                FeaturePoint3 {
                    x: ox + self.offset(DIM_3D, key, i, 0),
                    y: oy + self.offset(DIM_3D, key, i, 1),
                    z: oz + self.offset(DIM_3D, key, i, 2),
                }
            })
            .collect()
    }

    /// Points of `center` and its 8 neighbours: `points_per_cell * 9` entries.
    pub fn nearby_points_2d(&self, center: CellCoord2) -> Vec<FeaturePoint2> {
        let mut out = Vec::with_capacity(self.points_per_cell as usize * 9);
        for x in center.x - 1..=center.x + 1 {
            for y in center.y - 1..=center.y + 1 {
                out.extend(self.points_in_cell_2d(CellCoord2 { x, y }));
            }
        }
        out
    }

    /// Points of `center` and its 26 neighbours: `points_per_cell * 27` entries.
    pub fn nearby_points_3d(&self, center: CellCoord3) -> Vec<FeaturePoint3> {
        let mut out = Vec::with_capacity(self.points_per_cell as usize * 27);
        for x in center.x - 1..=center.x + 1 {
            for y in center.y - 1..=center.y + 1 {
                for z in center.z - 1..=center.z + 1 {
                    out.extend(self.points_in_cell_3d(CellCoord3 { x, y, z }));
                }
            }
        }
        out
    }

    /// Offset in `[0, cell_size)` of one coordinate of one feature point.
    fn offset(&self, dim: u8, cell: [i64; 3], point: u32, axis: u8) -> i64 {
        let mut key = [0u8; 30];
        key[0] = dim;
        key[1] = axis;
        key[2..10].copy_from_slice(&cell[0].to_le_bytes());
        key[10..18].copy_from_slice(&cell[1].to_le_bytes());
        key[18..26].copy_from_slice(&cell[2].to_le_bytes());
        key[26..30].copy_from_slice(&point.to_le_bytes());
        let h = xxh3_64_with_seed(&key, self.seed);
        // Multiply-shift maps the high 32 bits uniformly onto the cell extent.
        (((h >> 32) * u64::from(self.cell_size)) >> 32) as i64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/worley/grid.rs"]
mod tests;

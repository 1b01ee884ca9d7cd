//! Cellular (Worley) noise.
//!
//! A pixel's value comes from its distances to the nearest feature points of a seeded
//! [`SpatialGrid`](grid::SpatialGrid). Lookups go through the 3×3 (or 3×3×3) cell neighbourhood
//! and rendering memoises that neighbourhood per cell-sized block of pixels.

pub(crate) mod engine;
pub(crate) mod grid;
pub(crate) mod metric;

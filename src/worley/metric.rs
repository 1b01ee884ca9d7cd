use std::fmt;
use std::str::FromStr;

use crate::foundation::error::NoiseError;
use crate::foundation::math::fast_sqrt;
use crate::worley::grid::{FeaturePoint2, FeaturePoint3};

/// Distance function used uniformly for a whole render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMetric {
    /// `sqrt(Σ Δ²)`.
    #[default]
    Euclidean,
    /// `Σ |Δ|` (taxicab).
    Manhattan,
    /// `max |Δ|` (chessboard).
    Chebyshev,
    /// `Σ Δ` with signed per-axis differences.
    ///
    /// Not a metric: values can be negative, so the "nearest" entries of a sorted sample are the
    /// points furthest up and to the left. Kept as an opt-in for reproducing renders that relied on
    /// it; [`DistanceMetric::Manhattan`] is the real taxicab distance.
    SignedManhattan,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 4] = [
        DistanceMetric::Euclidean,
        DistanceMetric::Manhattan,
        DistanceMetric::Chebyshev,
        DistanceMetric::SignedManhattan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Manhattan => "manhattan",
            DistanceMetric::Chebyshev => "chebyshev",
            DistanceMetric::SignedManhattan => "signed-manhattan",
        }
    }

    fn combine(self, deltas: &[f32], fast: bool) -> f32 {
        match self {
            DistanceMetric::Euclidean => {
                let sq: f32 = deltas.iter().map(|d| d * d).sum();
                if fast { fast_sqrt(sq) } else { sq.sqrt() }
            }
            DistanceMetric::Manhattan => deltas.iter().map(|d| d.abs()).sum(),
            DistanceMetric::Chebyshev => deltas.iter().fold(0.0, |m, d| m.max(d.abs())),
            DistanceMetric::SignedManhattan => deltas.iter().sum(),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "manhattan" | "taxicab" => Ok(Self::Manhattan),
            "chebyshev" | "chessboard" => Ok(Self::Chebyshev),
            "signed-manhattan" | "signedmanhattan" => Ok(Self::SignedManhattan),
            other => Err(NoiseError::validation(format!(
                "invalid distance function '{other}'; expected one of: {}",
                DistanceMetric::ALL.map(DistanceMetric::name).join(", ")
            ))),
        }
    }
}

/// How a sorted distance sample is reduced to a single noise value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueFunction {
    /// `(F2 - F1) / cell_size`: bright cell interiors, dark cell borders.
    #[default]
    SecondMinusFirst,
    /// `F1 / cell_size`: dark feature points, brightening with distance.
    ///
    /// The divisor is fixed rather than the frame's own maximum `F1`, so a pixel's value does not
    /// depend on the image size or on the other pixels of its frame, and consecutive frames share
    /// one brightness scale.
    Closest,
}

impl FromStr for ValueFunction {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second-minus-first" | "f2-f1" => Ok(Self::SecondMinusFirst),
            "closest" | "f1" => Ok(Self::Closest),
            other => Err(NoiseError::validation(format!(
                "invalid value function '{other}'; expected second-minus-first or closest"
            ))),
        }
    }
}

/// A metric plus the square-root strategy used for Euclidean distances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Measure {
    pub metric: DistanceMetric,
    /// Use the bit-trick square root. Results then differ from exact Euclidean distances by up to
    /// ~6% relative, which shows up as a small bounded error in the noise value.
    pub fast_sqrt: bool,
}

impl Measure {
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            metric,
            fast_sqrt: false,
        }
    }

    pub fn distance_2d(&self, pixel: [i64; 2], p: FeaturePoint2) -> f32 {
        let d = [(pixel[0] - p.x) as f32, (pixel[1] - p.y) as f32];
        self.metric.combine(&d, self.fast_sqrt)
    }

    pub fn distance_3d(&self, pixel: [i64; 3], p: FeaturePoint3) -> f32 {
        let d = [
            (pixel[0] - p.x) as f32,
            (pixel[1] - p.y) as f32,
            (pixel[2] - p.z) as f32,
        ];
        self.metric.combine(&d, self.fast_sqrt)
    }

    /// Distances from `pixel` to every point, ascending.
    pub fn sorted_distances_2d(&self, pixel: [i64; 2], points: &[FeaturePoint2]) -> Vec<f32> {
        let mut out = Vec::with_capacity(points.len());
        self.fill_sorted_2d(&mut out, pixel, points);
        out
    }

    /// Distances from `pixel` to every point, ascending.
    pub fn sorted_distances_3d(&self, pixel: [i64; 3], points: &[FeaturePoint3]) -> Vec<f32> {
        let mut out = Vec::with_capacity(points.len());
        self.fill_sorted_3d(&mut out, pixel, points);
        out
    }

    pub(crate) fn fill_sorted_2d(
        &self,
        out: &mut Vec<f32>,
        pixel: [i64; 2],
        points: &[FeaturePoint2],
    ) {
        out.clear();
        out.extend(points.iter().map(|p| self.distance_2d(pixel, *p)));
        out.sort_unstable_by(f32::total_cmp);
    }

    pub(crate) fn fill_sorted_3d(
        &self,
        out: &mut Vec<f32>,
        pixel: [i64; 3],
        points: &[FeaturePoint3],
    ) {
        out.clear();
        out.extend(points.iter().map(|p| self.distance_3d(pixel, *p)));
        out.sort_unstable_by(f32::total_cmp);
    }
}

/// Reduce an ascending distance sample to a value in `[0, 1]`.
///
/// With [`ValueFunction::SecondMinusFirst`], two equidistant nearest points (a cell border) give
/// exactly `0`. Samples shorter than the function needs give `0`.
pub fn noise_value(sorted: &[f32], cell_size: u32, value_fn: ValueFunction) -> f32 {
    let raw = match (value_fn, sorted) {
        (ValueFunction::SecondMinusFirst, [f1, f2, ..]) => f2 - f1,
        (ValueFunction::Closest, [f1, ..]) => *f1,
        _ => return 0.0,
    };
    let v = raw / cell_size as f32;
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/worley/metric.rs"]
mod tests;

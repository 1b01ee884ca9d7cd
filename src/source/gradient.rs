use noise::{NoiseFn, OpenSimplex, Perlin, Simplex};

use crate::source::{NoiseKind, NoiseSource};

/// Gradient noise from the `noise` crate, sampled at `pixel / scale` and remapped from `[-1, 1]`
/// to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct GradientNoise<N> {
    kind: NoiseKind,
    inner: N,
    scale: f64,
}

/// The `noise` generators take 32-bit seeds.
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

impl GradientNoise<Simplex> {
    pub const SCALE: f64 = 80.0;

    pub fn simplex(seed: u64) -> Self {
        Self {
            kind: NoiseKind::Simplex,
            inner: Simplex::new(fold_seed(seed)),
            scale: Self::SCALE,
        }
    }
}

impl GradientNoise<OpenSimplex> {
    pub const SCALE: f64 = 100.0;

    pub fn open_simplex(seed: u64) -> Self {
        Self {
            kind: NoiseKind::OpenSimplex,
            inner: OpenSimplex::new(fold_seed(seed)),
            scale: Self::SCALE,
        }
    }
}

impl GradientNoise<Perlin> {
    pub const SCALE: f64 = 100.0;

    pub fn perlin(seed: u64) -> Self {
        Self {
            kind: NoiseKind::Perlin,
            inner: Perlin::new(fold_seed(seed)),
            scale: Self::SCALE,
        }
    }
}

impl<N> NoiseSource for GradientNoise<N>
where
    N: NoiseFn<f64, 3> + Send + Sync,
{
    fn kind(&self) -> NoiseKind {
        self.kind
    }

    fn evaluate(&self, x: f64, y: f64, z: f64) -> f32 {
        let s = self.scale;
        let v = self.inner.get([x / s, y / s, z / s]);
        (((v + 1.0) * 0.5).clamp(0.0, 1.0)) as f32
    }
}

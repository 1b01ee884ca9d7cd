//! Noise sources: one type per algorithm behind the [`NoiseSource`] trait.

pub(crate) mod cellular;
pub(crate) mod field;
pub(crate) mod gradient;
pub(crate) mod white;

use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Size;
use crate::foundation::error::{NoiseError, NoiseResult};
use crate::worley::engine::WorleyConfig;

use self::cellular::CellularNoise;
use self::field::ScalarField;
use self::gradient::GradientNoise;
use self::white::WhiteNoise;

/// Noise algorithm selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    #[default]
    White,
    Simplex,
    OpenSimplex,
    Perlin,
    Worley,
}

impl NoiseKind {
    pub const ALL: [NoiseKind; 5] = [
        NoiseKind::White,
        NoiseKind::Simplex,
        NoiseKind::OpenSimplex,
        NoiseKind::Perlin,
        NoiseKind::Worley,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::White => "white",
            NoiseKind::Simplex => "simplex",
            NoiseKind::OpenSimplex => "opensimplex",
            NoiseKind::Perlin => "perlin",
            NoiseKind::Worley => "worley",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseKind {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(Self::White),
            "simplex" => Ok(Self::Simplex),
            "opensimplex" | "open-simplex" => Ok(Self::OpenSimplex),
            "perlin" => Ok(Self::Perlin),
            "worley" | "cellular" => Ok(Self::Worley),
            other => Err(NoiseError::validation(format!(
                "invalid noise type '{other}'; currently supported types: {}",
                NoiseKind::ALL.map(NoiseKind::name).join(", ")
            ))),
        }
    }
}

/// A noise algorithm sampled on the pixel lattice.
///
/// `x` and `y` are pixel coordinates and `z` is the frame depth index. Implementations are pure:
/// the same coordinates always produce the same value, from any thread.
pub trait NoiseSource: Send + Sync {
    fn kind(&self) -> NoiseKind;

    /// Value in `[0, 1]` at one point.
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f32;

    /// A whole frame at depth `z`.
    ///
    /// The default samples [`NoiseSource::evaluate`] once per pixel; sources with cheaper bulk
    /// paths override it and must return the same values.
    fn render_field(&self, size: Size, z: i64) -> ScalarField {
        let mut field = ScalarField::zeros(size);
        let zf = z as f64;
        for y in 0..size.height {
            for x in 0..size.width {
                field.set(x, y, self.evaluate(f64::from(x), f64::from(y), zf));
            }
        }
        field
    }
}

/// Build the source for `kind`. Only [`NoiseKind::Worley`] reads `worley`.
pub fn build_source(
    kind: NoiseKind,
    seed: u64,
    worley: &WorleyConfig,
) -> NoiseResult<Box<dyn NoiseSource>> {
    Ok(match kind {
        NoiseKind::White => Box::new(WhiteNoise::new(seed)),
        NoiseKind::Simplex => Box::new(GradientNoise::simplex(seed)),
        NoiseKind::OpenSimplex => Box::new(GradientNoise::open_simplex(seed)),
        NoiseKind::Perlin => Box::new(GradientNoise::perlin(seed)),
        NoiseKind::Worley => Box::new(CellularNoise::new(seed, worley)?),
    })
}

#[cfg(test)]
#[path = "../tests/unit/source/source.rs"]
mod tests;

use crate::foundation::core::Size;
use crate::foundation::error::NoiseResult;
use crate::source::field::ScalarField;
use crate::source::{NoiseKind, NoiseSource};
use crate::worley::engine::{WorleyConfig, WorleyEngine, WorleySpace};

/// [`WorleyEngine`] behind the [`NoiseSource`] interface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellularNoise {
    engine: WorleyEngine,
}

impl CellularNoise {
    pub fn new(seed: u64, cfg: &WorleyConfig) -> NoiseResult<Self> {
        Ok(Self {
            engine: WorleyEngine::new(seed, cfg)?,
        })
    }

    pub fn engine(&self) -> &WorleyEngine {
        &self.engine
    }
}

impl NoiseSource for CellularNoise {
    fn kind(&self) -> NoiseKind {
        NoiseKind::Worley
    }

    fn evaluate(&self, x: f64, y: f64, z: f64) -> f32 {
        let (x, y) = (x.floor() as i64, y.floor() as i64);
        match self.engine.space() {
            WorleySpace::Volume => self.engine.value_at_3d(x, y, z.floor() as i64),
            WorleySpace::Plane => self.engine.value_at_2d(x, y),
        }
    }

    fn render_field(&self, size: Size, z: i64) -> ScalarField {
        self.engine.render_field(size, z)
    }
}

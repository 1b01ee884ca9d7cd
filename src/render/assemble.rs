use std::fmt;
use std::str::FromStr;

use crate::foundation::error::NoiseError;
use crate::foundation::math::unit_to_u8;
use crate::render::FrameRgba;
use crate::source::field::ScalarField;

/// Per-channel tint applied as a multiplier: `#ffffff` leaves values unchanged, `#000000` blacks
/// everything out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorMultiplier {
    pub rgb: [u8; 3],
}

impl ColorMultiplier {
    pub const WHITE: ColorMultiplier = ColorMultiplier {
        rgb: [255, 255, 255],
    };

    /// Accepts `#RRGGBB`, `0xRRGGBB` or bare `RRGGBB`, case-insensitive.
    pub fn parse(s: &str) -> Result<Self, NoiseError> {
        let raw = s.trim();
        let hex = raw
            .strip_prefix('#')
            .or_else(|| raw.strip_prefix("0x"))
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);
        if hex.len() != 6 {
            return Err(NoiseError::validation(format!(
                "colour '{s}' isn't the right length; colours should be hex, like #ff3300"
            )));
        }

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(NoiseError::validation(format!(
                "invalid colour '{s}'; colours should be hex, like #ff3300"
            )));
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        Ok(Self {
            rgb: [byte(0), byte(2), byte(4)],
        })
    }

    pub fn multipliers(self) -> [f32; 3] {
        self.rgb.map(|c| f32::from(c) / 255.0)
    }
}

impl Default for ColorMultiplier {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for ColorMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for ColorMultiplier {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColorMultiplier {
    type Error = NoiseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ColorMultiplier> for String {
    fn from(c: ColorMultiplier) -> Self {
        c.to_string()
    }
}

/// Pack a noise field into opaque RGBA8, tinting each colour channel by `color`.
pub fn assemble(field: &ScalarField, color: ColorMultiplier) -> FrameRgba {
    let [mr, mg, mb] = color.multipliers();
    let mut data = Vec::with_capacity(field.values.len() * 4);
    for &v in &field.values {
        let value = f32::from(unit_to_u8(v));
        data.extend_from_slice(&[
            (value * mr) as u8,
            (value * mg) as u8,
            (value * mb) as u8,
            255,
        ]);
    }
    FrameRgba {
        width: field.width,
        height: field.height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/assemble.rs"]
mod tests;

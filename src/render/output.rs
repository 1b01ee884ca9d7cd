use std::path::{Path, PathBuf};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{NoiseError, NoiseResult};
use crate::render::FrameRgba;

/// Output filename pattern.
///
/// The first run of `#` characters is replaced by the frame index, zero-padded to the run's
/// length: `frame_###.png` becomes `frame_007.png` for frame 7 and `frame_1234.png` for frame
/// 1234. A pattern without `#` names the same file for every frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct OutputTemplate {
    pattern: String,
    run: Option<(usize, usize)>, // (byte start, len)
}

impl OutputTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let run = pattern.find('#').map(|start| {
            let len = pattern[start..].bytes().take_while(|&b| b == b'#').count();
            (start, len)
        });
        Self { pattern, run }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether each frame gets its own file.
    pub fn is_templated(&self) -> bool {
        self.run.is_some()
    }

    pub fn path_for(&self, frame: FrameIndex) -> PathBuf {
        match self.run {
            None => PathBuf::from(&self.pattern),
            Some((start, len)) => PathBuf::from(format!(
                "{}{:0len$}{}",
                &self.pattern[..start],
                frame.0,
                &self.pattern[start + len..],
            )),
        }
    }
}

impl Default for OutputTemplate {
    fn default() -> Self {
        Self::new("noise.png")
    }
}

impl From<String> for OutputTemplate {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<OutputTemplate> for String {
    fn from(t: OutputTemplate) -> Self {
        t.pattern
    }
}

/// Image container picked from the output file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
    Tiff,
    Bmp,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> NoiseResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            "tif" | "tiff" => Ok(Self::Tiff),
            "bmp" => Ok(Self::Bmp),
            _ => Err(NoiseError::unsupported_format(ext)),
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Gif => image::ImageFormat::Gif,
            Self::Tiff => image::ImageFormat::Tiff,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }

    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

pub fn ensure_parent_dir(path: &Path) -> NoiseResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode `frame` to `path`, picking the format from the extension.
///
/// Fails with [`NoiseError::UnsupportedFormat`] before touching the filesystem when the extension
/// is unknown.
pub fn write_frame(frame: &FrameRgba, path: &Path) -> NoiseResult<OutputFormat> {
    let format = OutputFormat::from_path(path)?;
    ensure_parent_dir(path)?;

    let res = if format.supports_alpha() {
        image::save_buffer_with_format(
            path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            format.image_format(),
        )
    } else {
        image::save_buffer_with_format(
            path,
            &frame.to_rgb8(),
            frame.width,
            frame.height,
            image::ColorType::Rgb8,
            format.image_format(),
        )
    };
    res.map_err(|e| NoiseError::encode(format!("write '{}': {e}", path.display())))?;
    Ok(format)
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{NoiseError, NoiseResult};

/// Depth index of a single frame. Frame `n` is the slice at `z = n`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Half-open range of frame indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> NoiseResult<Self> {
        if start.0 > end.0 {
            return Err(NoiseError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// `[offset, offset + count)`, rejecting ranges that overflow `u64`.
    pub fn from_offset(offset: u64, count: u64) -> NoiseResult<Self> {
        let end = offset
            .checked_add(count)
            .ok_or_else(|| NoiseError::validation("frame offset + frame count overflows"))?;
        Self::new(FrameIndex(offset), FrameIndex(end))
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Output image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(1024, 1024)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = NoiseError;

    /// Parses `WIDTHxHEIGHT`, e.g. `1024x768`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            NoiseError::validation(format!(
                "invalid size '{s}'; sizes should look like 1024x768"
            ))
        };
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Self { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use crate::foundation::core::Size;

/// Row-major grid of noise values, one per pixel, each in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    pub width: u32,
    pub height: u32,
    pub values: Vec<f32>,
}

impl ScalarField {
    pub fn zeros(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            values: vec![0.0; size.pixel_count()],
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, v: f32) {
        let i = self.index(x, y);
        self.values[i] = v;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

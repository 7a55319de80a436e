use std::sync::Arc;

use image::{Rgba, RgbaImage};

use super::{Palette, RawImage};
use crate::error::{MappingError, Result};

/// An image placed at a pixel location of a [`GraphicPlane`].
#[derive(Debug, Clone)]
pub struct GraphicObject {
    pub image: Arc<RawImage>,
    pub location: (u32, u32),
}

impl GraphicObject {
    pub fn new(image: Arc<RawImage>, location: (u32, u32)) -> Self {
        Self { image, location }
    }
}

/// A canvas of positioned paletted images, drawn in insertion order.
#[derive(Debug, Clone, Default)]
pub struct GraphicPlane {
    pub width: u32,
    pub height: u32,
    pub palette: Option<Palette>,
    pub objects: Vec<GraphicObject>,
}

impl GraphicPlane {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            palette: None,
            objects: Vec::new(),
        }
    }

    /// Rasterize all objects through the palette.
    ///
    /// Palette index 0 is transparent, so an overlay drawn after its underlay
    /// only covers the pixels it actually sets. Pixels falling outside the
    /// plane are clipped.
    pub fn render(&self) -> Result<RgbaImage> {
        let palette = self.palette.as_ref().ok_or(MappingError::MissingPalette)?;
        let mut img = RgbaImage::new(self.width, self.height);

        for object in &self.objects {
            let (ox, oy) = object.location;
            let image = &object.image;
            for y in 0..image.height() {
                for x in 0..image.width() {
                    let (px, py) = (ox + x, oy + y);
                    if px >= self.width || py >= self.height {
                        continue;
                    }
                    let index = match image.pixel(x, y) {
                        Some(0) | None => continue,
                        Some(i) => i,
                    };
                    if let Some([r, g, b]) = palette.color(index) {
                        img.put_pixel(px, py, Rgba([r, g, b, 255]));
                    }
                }
            }
        }

        Ok(img)
    }
}

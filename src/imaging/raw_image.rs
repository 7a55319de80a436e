use std::io::Read;

use crate::error::Result;

/// Edge length of a tile graphic in pixels.
pub const TILE_SIZE: u32 = 16;

/// Size of one stored tile graphic (one byte per pixel).
pub const TILE_IMAGE_BYTES: usize = (TILE_SIZE * TILE_SIZE) as usize;

/// An uncompressed paletted image: one palette index per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RawImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Read a `width` x `height` image. Short input is an I/O error.
    pub fn read<R: Read>(reader: &mut R, width: u32, height: u32) -> Result<Self> {
        let mut pixels = vec![0u8; (width * height) as usize];
        reader.read_exact(&mut pixels)?;
        Ok(Self::new(width, height, pixels))
    }

    /// Read one 16x16 tile graphic.
    pub fn read_tile<R: Read>(reader: &mut R) -> Result<Self> {
        Self::read(reader, TILE_SIZE, TILE_SIZE)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

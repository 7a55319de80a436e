use std::io::Read;

use super::tile::TileRecord;
use crate::error::{MappingError, Result};

/// Largest width or height a grid can have; dimensions are stored as bytes.
pub const MAX_GRID_DIMENSION: usize = u8::MAX as usize;

/// Rectangular array of tiles addressed by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileGrid {
    width: u8,
    height: u8,
    // row-major: index = y * width + x
    tiles: Vec<TileRecord>,
}

impl TileGrid {
    /// Build a grid from row-major tiles, rejecting dimensions above 255 and
    /// tile counts that do not match `width * height`.
    pub fn new(width: usize, height: usize, tiles: Vec<TileRecord>) -> Result<Self> {
        if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(MappingError::GridTooLarge { width, height });
        }
        let expected = width * height;
        if tiles.len() != expected {
            return Err(MappingError::GridShape {
                width,
                height,
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width: width as u8,
            height: height as u8,
            tiles,
        })
    }

    /// Decode `width * height` packed records, x varying fastest.
    pub fn read<R: Read>(width: u8, height: u8, reader: &mut R) -> Result<Self> {
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(TileRecord::read_at(x, y, reader)?);
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&TileRecord> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.tiles.get(y * self.width as usize + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut TileRecord> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.tiles.get_mut(y * self.width as usize + x)
    }

    /// Tiles in row-major order.
    pub fn tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileRecord> {
        self.tiles.iter()
    }
}

impl<'a> IntoIterator for &'a TileGrid {
    type Item = &'a TileRecord;
    type IntoIter = std::slice::Iter<'a, TileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn accepts_largest_grid() {
        let grid = TileGrid::new(255, 255, vec![TileRecord::default(); 255 * 255]).unwrap();
        assert_eq!((grid.width(), grid.height()), (255, 255));
    }

    #[test]
    fn rejects_oversized_dimensions() {
        for (w, h) in [(256, 1), (1, 256), (256, 256)] {
            let err = TileGrid::new(w, h, vec![TileRecord::default(); w * h]).unwrap_err();
            assert!(
                matches!(err, MappingError::GridTooLarge { width, height } if width == w && height == h),
                "{}x{} accepted",
                w,
                h
            );
        }
    }

    #[test]
    fn rejects_mismatched_tile_count() {
        let err = TileGrid::new(3, 2, vec![TileRecord::default(); 5]).unwrap_err();
        assert!(matches!(
            err,
            MappingError::GridShape {
                expected: 6,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn read_tags_positions_row_major() {
        let data: Vec<u8> = (0..6u8).flat_map(|i| [i, 0, 0]).collect();
        let grid = TileGrid::read(3, 2, &mut Cursor::new(data)).unwrap();

        let tile = grid.get(2, 1).unwrap();
        assert_eq!((tile.x, tile.y), (2, 1));
        assert_eq!(tile.overlay, 5 << 4);
        assert_eq!(grid.get(1, 0).unwrap().overlay, 1 << 4);
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
    }

    #[test]
    fn empty_grid_reads_nothing() {
        let grid = TileGrid::read(0, 7, &mut Cursor::new(Vec::<u8>::new())).unwrap();
        assert!(grid.tiles().is_empty());
    }
}

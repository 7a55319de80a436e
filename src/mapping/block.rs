use std::io::Read;

use super::grid::TileGrid;
use super::tile::{TileRecord, TILE_RECORD_BYTES};
use crate::archive::{ArchiveFamily, ArchiveSource, ResourceIndex};
use crate::error::Result;

/// A small reusable tile pattern from a `BLKLIST` archive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    tiles: TileGrid,
}

impl Block {
    /// Decode `[width][height]` followed by `width * height` tile records.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut dims = [0u8; 2];
        reader.read_exact(&mut dims)?;
        let tiles = TileGrid::read(dims[0], dims[1], reader)?;
        Ok(Self { tiles })
    }

    /// Bytes this block occupies on disk.
    pub fn encoded_len(&self) -> usize {
        2 + self.tiles.tiles().len() * TILE_RECORD_BYTES
    }

    /// Load every block of block list `id`. Blocks are stored back to back
    /// until the record ends; a block running past the record is an
    /// `UnexpectedEof`.
    pub fn load_list(archive: &dyn ArchiveSource, id: u32) -> Result<Vec<Block>> {
        let record = archive.open_record(ArchiveFamily::BlockList, ResourceIndex::new(id))?;
        let mut reader = record.reader.take(record.len as u64);
        let mut remaining = record.len as usize;
        let mut blocks = Vec::new();
        while remaining >= 2 {
            let block = Self::read(&mut reader)?;
            remaining -= block.encoded_len();
            blocks.push(block);
        }
        if remaining > 0 {
            tracing::warn!(id, remaining, "trailing bytes after last block");
        }
        tracing::debug!(id, count = blocks.len(), "loaded block list");
        Ok(blocks)
    }

    pub fn width(&self) -> u8 {
        self.tiles.width()
    }

    pub fn height(&self) -> u8 {
        self.tiles.height()
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&TileRecord> {
        self.tiles.get(x, y)
    }

    pub fn replace_tiles(&mut self, width: usize, height: usize, tiles: Vec<TileRecord>) -> Result<()> {
        self.tiles = TileGrid::new(width, height, tiles)?;
        Ok(())
    }
}

use std::io::{Cursor, Read};

use binrw::BinRead;
use serde::Serialize;

use crate::error::Result;

/// Size of a tile descriptor on disk.
pub const TILE_METADATA_BYTES: usize = 8;

/// Static description of one tile of a tileset.
///
/// `id` is not stored on disk: it is the record's position within its
/// tileset, which is also the tile's logical index.
#[derive(BinRead, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[br(little, import(id: u32))]
pub struct TileMetadata {
    #[br(calc = id)]
    pub id: u32,
    pub kind: u8,
    pub collision: u8,
    pub info: i16,
    /// Position of the tile's first frame in the tileset's storage order.
    pub raw_graphic_index: i16,
    #[br(pad_after = 1)]
    pub frame_count: u8,
}

impl TileMetadata {
    /// Decode one descriptor. The whole 8-byte record, reserved byte
    /// included, must be present.
    pub fn read<R: Read>(id: u32, reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; TILE_METADATA_BYTES];
        reader.read_exact(&mut bytes)?;
        Ok(<Self as BinRead>::read_args(&mut Cursor::new(bytes), (id,))?)
    }
}

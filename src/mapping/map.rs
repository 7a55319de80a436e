use std::io::{self, Cursor, Read, Seek};

use binrw::BinRead;
use serde::Serialize;

use super::grid::TileGrid;
use super::tile::TileRecord;
use crate::archive::{ArchiveFamily, ArchiveSource, ResourceIndex};
use crate::error::Result;

/// NPC table size when a map declares no NPCs.
const NPC_TABLE_EMPTY_BYTES: u64 = 320;
/// NPC table size when a map declares 0x40 NPCs. Does not follow the
/// per-entry size below.
const NPC_TABLE_FULL_BYTES: u64 = 960;
const NPC_TABLE_FULL_COUNT: u8 = 0x40;
const NPC_ENTRY_BYTES: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MapType {
    Unknown,
    Map3D,
    Map2D,
    /// A value the format does not define, kept as read.
    Other(u8),
}

impl From<u8> for MapType {
    fn from(raw: u8) -> Self {
        match raw {
            0 => MapType::Unknown,
            1 => MapType::Map3D,
            2 => MapType::Map2D,
            other => MapType::Other(other),
        }
    }
}

impl From<MapType> for u8 {
    fn from(t: MapType) -> u8 {
        match t {
            MapType::Unknown => 0,
            MapType::Map3D => 1,
            MapType::Map2D => 2,
            MapType::Other(raw) => raw,
        }
    }
}

#[derive(BinRead, Debug)]
#[br(little)]
struct MapHeader {
    flags: u8,
    npc_count: u8,
    #[br(map = |raw: u8| MapType::from(raw))]
    map_type: MapType,
    sound: u8,
    width: u8,
    height: u8,
    tileset: u8,
    combat_gfx: u8,
    palette: u8,
    anim_rate: u8,
}

/// Size of the NPC table that follows the header.
pub fn npc_table_len(npc_count: u8) -> u64 {
    match npc_count {
        0 => NPC_TABLE_EMPTY_BYTES,
        NPC_TABLE_FULL_COUNT => NPC_TABLE_FULL_BYTES,
        n => n as u64 * NPC_ENTRY_BYTES,
    }
}

/// Consume exactly `len` bytes, failing on truncated input.
fn skip_exact<R: Read>(reader: &mut R, len: u64) -> io::Result<()> {
    let skipped = io::copy(&mut reader.by_ref().take(len), &mut io::sink())?;
    if skipped != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("NPC table truncated: expected {} bytes, got {}", len, skipped),
        ));
    }
    Ok(())
}

/// A game map: header fields plus its tile grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    /// In-game id, absent when decoded from a bare stream.
    pub id: Option<u32>,
    /// Rest/light-environment/NPC-range switches.
    pub flags: u8,
    pub npc_count: u8,
    pub map_type: MapType,
    pub sound: u8,
    /// One-based tileset id.
    pub tileset: u8,
    /// Combat background graphics.
    pub combat_gfx: u8,
    /// One-based palette id.
    pub palette: u8,
    pub anim_rate: u8,
    tiles: TileGrid,
}

impl Map {
    /// Decode a map positioned at the start of its header.
    pub fn read<R: Read + Seek>(id: Option<u32>, reader: &mut R) -> Result<Self> {
        let header = MapHeader::read(reader)?;
        skip_exact(reader, npc_table_len(header.npc_count))?;
        let tiles = TileGrid::read(header.width, header.height, reader)?;

        Ok(Self {
            id,
            flags: header.flags,
            npc_count: header.npc_count,
            map_type: header.map_type,
            sound: header.sound,
            tileset: header.tileset,
            combat_gfx: header.combat_gfx,
            palette: header.palette,
            anim_rate: header.anim_rate,
            tiles,
        })
    }

    /// Load map `id` from the `MAPDATA` archives.
    pub fn load(archive: &dyn ArchiveSource, id: u32) -> Result<Self> {
        let record = archive.open_record(ArchiveFamily::MapData, ResourceIndex::new(id))?;
        let len = record.len as u64;
        let mut data = Vec::with_capacity(record.len as usize);
        record.reader.take(len).read_to_end(&mut data)?;
        if (data.len() as u64) < len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("map {} record truncated: expected {} bytes, got {}", id, len, data.len()),
            )
            .into());
        }
        let map = Self::read(Some(id), &mut Cursor::new(data))?;
        tracing::debug!(
            id,
            width = map.width(),
            height = map.height(),
            tileset = map.tileset,
            "loaded map"
        );
        Ok(map)
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

    /// Swap in new row-major tile data. The map is left untouched when the
    /// dimensions are invalid.
    pub fn replace_tiles(&mut self, width: usize, height: usize, tiles: Vec<TileRecord>) -> Result<()> {
        self.tiles = TileGrid::new(width, height, tiles)?;
        Ok(())
    }
}

use std::sync::Arc;

use super::cache::LazySlots;
use super::tile_data::{TileMetadata, TILE_METADATA_BYTES};
use crate::archive::{ArchiveFamily, ArchiveSource, ResourceIndex};
use crate::error::{MappingError, Result};

/// Tile descriptors per tileset, loaded from `ICONDAT` on first use and kept
/// for the lifetime of the cache.
pub struct TilesetMetadataCache {
    archive: Arc<dyn ArchiveSource>,
    tilesets: LazySlots<u16, Arc<[TileMetadata]>>,
}

impl TilesetMetadataCache {
    pub fn new(archive: Arc<dyn ArchiveSource>) -> Self {
        Self {
            archive,
            tilesets: LazySlots::default(),
        }
    }

    /// Descriptors of tileset `index` (zero-based), in id order.
    pub fn tileset(&self, index: u16) -> Result<Arc<[TileMetadata]>> {
        self.tilesets.get_or_try_init(index, || self.load(index))
    }

    /// Descriptor `index` of tileset `tileset` (zero-based).
    pub fn tile(&self, tileset: u16, index: usize) -> Result<TileMetadata> {
        let tiles = self.tileset(tileset)?;
        tiles.get(index).copied().ok_or(MappingError::TileOutOfRange {
            tileset: tileset_id(tileset),
            index,
            len: tiles.len(),
        })
    }

    /// Tileset `index` if it has already been loaded.
    pub fn cached(&self, index: u16) -> Option<Arc<[TileMetadata]>> {
        self.tilesets.get(index)
    }

    fn load(&self, index: u16) -> Result<Arc<[TileMetadata]>> {
        let resource = ResourceIndex::new(index as u32);
        let mut record = self.archive.open_record(ArchiveFamily::IconData, resource)?;

        let len = record.len as usize;
        if len % TILE_METADATA_BYTES != 0 {
            tracing::warn!(tileset = tileset_id(index), len, "tile data record has trailing bytes");
        }
        let count = len / TILE_METADATA_BYTES;

        let mut tiles = Vec::with_capacity(count);
        for id in 0..count as u32 {
            tiles.push(TileMetadata::read(id, &mut record.reader)?);
        }
        tracing::debug!(tileset = tileset_id(index), %resource, count, "loaded tile data");
        Ok(tiles.into())
    }
}

/// One-based tileset id for a zero-based cache index, as used in errors and logs.
pub(crate) fn tileset_id(index: u16) -> u32 {
    index as u32 + 1
}

impl std::fmt::Debug for TilesetMetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TilesetMetadataCache")
            .field("tilesets", &self.tilesets)
            .finish_non_exhaustive()
    }
}

use std::sync::Arc;

use super::cache::LazySlots;
use super::icon_data::{tileset_id, TilesetMetadataCache};
use super::tile::{GraphicIndex, TileRecord};
use super::tile_data::TileMetadata;
use crate::archive::{ArchiveFamily, ArchiveSource, ResourceIndex};
use crate::error::{MappingError, Result};
use crate::imaging::{RawImage, TILE_IMAGE_BYTES};

/// Shared handles to the graphics of one tileset.
pub type TilesetImages = Arc<[Arc<RawImage>]>;

/// Tile graphics per tileset.
///
/// `ICONGFX` stores graphics in an order unrelated to the tile ids used by
/// map data; every tile descriptor names the graphic it uses. Two levels
/// are cached:
///
/// * storage order: graphics exactly as decoded from the archive
/// * logical order: `logical[m.id] = storage[m.raw_graphic_index]` for every
///   descriptor `m` of the tileset
///
/// Both levels share the same `Arc<RawImage>` handles.
pub struct TilesetImageCache {
    archive: Arc<dyn ArchiveSource>,
    metadata: Arc<TilesetMetadataCache>,
    storage_order: LazySlots<u16, TilesetImages>,
    logical_order: LazySlots<u16, TilesetImages>,
}

impl TilesetImageCache {
    pub fn new(archive: Arc<dyn ArchiveSource>, metadata: Arc<TilesetMetadataCache>) -> Self {
        Self {
            archive,
            metadata,
            storage_order: LazySlots::default(),
            logical_order: LazySlots::default(),
        }
    }

    pub fn metadata(&self) -> &TilesetMetadataCache {
        &self.metadata
    }

    /// Graphics of tileset `id` (one-based) in logical order.
    pub fn tileset(&self, id: u16) -> Result<TilesetImages> {
        let index = id.checked_sub(1).ok_or(MappingError::InvalidTilesetId(id))?;
        self.logical_order.get_or_try_init(index, || {
            let storage = self
                .storage_order
                .get_or_try_init(index, || self.load_storage_order(index))?;
            let meta = self.metadata.tileset(index)?;
            let logical = reorder(id, &storage, &meta)?;
            tracing::debug!(tileset = id, graphics = storage.len(), tiles = logical.len(), "built logical tile order");
            Ok(logical)
        })
    }

    /// Graphics of tileset `id` (one-based) as stored in the archive.
    pub fn storage_order(&self, id: u16) -> Result<TilesetImages> {
        let index = id.checked_sub(1).ok_or(MappingError::InvalidTilesetId(id))?;
        self.storage_order
            .get_or_try_init(index, || self.load_storage_order(index))
    }

    /// Graphic for a raw layer value. Values 0 and 1 mean "no graphic" and
    /// return `None` without loading anything.
    pub fn tile(&self, id: u16, raw: u16) -> Result<Option<Arc<RawImage>>> {
        match GraphicIndex::from_raw(raw) {
            Some(graphic) => self.graphic(id, graphic).map(Some),
            None => Ok(None),
        }
    }

    pub fn graphic(&self, id: u16, graphic: GraphicIndex) -> Result<Arc<RawImage>> {
        let images = self.tileset(id)?;
        images
            .get(graphic.index())
            .cloned()
            .ok_or(MappingError::TileOutOfRange {
                tileset: id.into(),
                index: graphic.index(),
                len: images.len(),
            })
    }

    pub fn tile_underlay(&self, id: u16, tile: &TileRecord) -> Result<Option<Arc<RawImage>>> {
        match tile.underlay_graphic() {
            Some(graphic) => self.graphic(id, graphic).map(Some),
            None => Ok(None),
        }
    }

    pub fn tile_overlay(&self, id: u16, tile: &TileRecord) -> Result<Option<Arc<RawImage>>> {
        match tile.overlay_graphic() {
            Some(graphic) => self.graphic(id, graphic).map(Some),
            None => Ok(None),
        }
    }

    fn load_storage_order(&self, index: u16) -> Result<TilesetImages> {
        let resource = ResourceIndex::new(index as u32);
        let mut record = self
            .archive
            .open_record(ArchiveFamily::IconGraphics, resource)?;

        let len = record.len as usize;
        if len % TILE_IMAGE_BYTES != 0 {
            tracing::warn!(tileset = tileset_id(index), len, "tile graphics record has trailing bytes");
        }
        let count = len / TILE_IMAGE_BYTES;

        let mut images = Vec::with_capacity(count);
        for _ in 0..count {
            images.push(Arc::new(RawImage::read_tile(&mut record.reader)?));
        }
        tracing::debug!(tileset = tileset_id(index), %resource, count, "loaded tile graphics");
        Ok(images.into())
    }
}

/// Permute storage-order graphics into tile-id order.
fn reorder(tileset: u16, storage: &[Arc<RawImage>], meta: &[TileMetadata]) -> Result<TilesetImages> {
    let mut logical: Vec<Option<Arc<RawImage>>> = vec![None; meta.len()];
    for m in meta {
        let graphic = usize::try_from(m.raw_graphic_index)
            .ok()
            .and_then(|i| storage.get(i))
            .ok_or(MappingError::GraphicOutOfRange {
                tileset: tileset.into(),
                tile: m.id,
                graphic: m.raw_graphic_index,
                len: storage.len(),
            })?;
        let slot = logical
            .get_mut(m.id as usize)
            .ok_or(MappingError::TileOutOfRange {
                tileset: tileset.into(),
                index: m.id as usize,
                len: meta.len(),
            })?;
        *slot = Some(graphic.clone());
    }

    // ids are the descriptors' positions, so every slot has been filled
    Ok(logical.into_iter().flatten().collect())
}

impl std::fmt::Debug for TilesetImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TilesetImageCache")
            .field("storage_order", &self.storage_order)
            .field("logical_order", &self.logical_order)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: u32, raw_graphic_index: i16) -> TileMetadata {
        TileMetadata {
            id,
            kind: 0,
            collision: 0,
            info: 0,
            raw_graphic_index,
            frame_count: 1,
        }
    }

    fn images(n: u8) -> Vec<Arc<RawImage>> {
        (0..n)
            .map(|i| Arc::new(RawImage::new(1, 1, vec![i])))
            .collect()
    }

    #[test]
    fn reorder_follows_descriptors() {
        let storage = images(3);
        let order = [meta(0, 2), meta(1, 0), meta(2, 2), meta(3, 1)];
        let logical = reorder(1, &storage, &order).unwrap();

        assert_eq!(logical.len(), 4);
        for m in &order {
            assert!(Arc::ptr_eq(
                &logical[m.id as usize],
                &storage[m.raw_graphic_index as usize]
            ));
        }
    }

    #[test]
    fn reorder_rejects_missing_graphic() {
        let storage = images(2);
        for bad in [2i16, -1] {
            let err = reorder(4, &storage, &[meta(0, 0), meta(1, bad)]).unwrap_err();
            assert!(matches!(
                err,
                MappingError::GraphicOutOfRange { tileset: 4, tile: 1, len: 2, .. }
            ));
        }
    }
}

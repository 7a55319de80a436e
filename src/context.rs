use std::sync::Arc;

use crate::archive::{ArchiveSource, XldLibrary};
use crate::error::Result;
use crate::imaging::{GraphicPlane, PaletteSource};
use crate::mapping::{Block, Map, MapAssembler, TilesetImageCache, TilesetMetadataCache};
use crate::paths::AssetPaths;

/// Everything needed to turn game assets into planes: the archive, the
/// palettes and the tileset caches built on top of them.
///
/// Caches live as long as the context; clone the `Arc`s to share them.
pub struct GameData {
    archive: Arc<dyn ArchiveSource>,
    palettes: Arc<dyn PaletteSource>,
    metadata: Arc<TilesetMetadataCache>,
    images: TilesetImageCache,
}

impl GameData {
    pub fn new(archive: Arc<dyn ArchiveSource>, palettes: Arc<dyn PaletteSource>) -> Self {
        let metadata = Arc::new(TilesetMetadataCache::new(archive.clone()));
        let images = TilesetImageCache::new(archive.clone(), metadata.clone());
        Self {
            archive,
            palettes,
            metadata,
            images,
        }
    }

    /// Context reading the game's XLD archives.
    pub fn from_paths(paths: AssetPaths) -> Self {
        let library = Arc::new(XldLibrary::new(paths));
        Self::new(library.clone(), library)
    }

    pub fn metadata(&self) -> &TilesetMetadataCache {
        &self.metadata
    }

    pub fn images(&self) -> &TilesetImageCache {
        &self.images
    }

    pub fn palettes(&self) -> &dyn PaletteSource {
        self.palettes.as_ref()
    }

    pub fn load_map(&self, id: u32) -> Result<Map> {
        Map::load(self.archive.as_ref(), id)
    }

    pub fn load_blocks(&self, id: u32) -> Result<Vec<Block>> {
        Block::load_list(self.archive.as_ref(), id)
    }

    pub fn assembler(&self) -> MapAssembler<'_> {
        MapAssembler::new(&self.images, self.palettes.as_ref())
    }

    /// Load map `id` and lay out its graphics.
    pub fn combine_map(&self, id: u32) -> Result<(Map, GraphicPlane)> {
        let map = self.load_map(id)?;
        let plane = self.assembler().combine(&map)?;
        Ok((map, plane))
    }
}

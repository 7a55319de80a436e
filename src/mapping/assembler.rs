use super::icon_graphics::TilesetImageCache;
use super::map::Map;
use crate::error::Result;
use crate::imaging::{GraphicObject, GraphicPlane, PaletteSource, TILE_SIZE};

/// Lays out a map's tile graphics on a [`GraphicPlane`].
pub struct MapAssembler<'a> {
    images: &'a TilesetImageCache,
    palettes: &'a dyn PaletteSource,
}

impl<'a> MapAssembler<'a> {
    pub fn new(images: &'a TilesetImageCache, palettes: &'a dyn PaletteSource) -> Self {
        Self { images, palettes }
    }

    /// Build a `width*16 x height*16` plane holding, for every tile, its
    /// underlay followed by its overlay. Layers without a graphic are left out.
    pub fn combine(&self, map: &Map) -> Result<GraphicPlane> {
        let mut plane = GraphicPlane::new(
            map.width() as u32 * TILE_SIZE,
            map.height() as u32 * TILE_SIZE,
        );
        plane.palette = Some(self.palettes.full_palette(map.palette)?);

        let tileset = map.tileset as u16;
        for tile in map.tiles() {
            let location = (tile.x as u32 * TILE_SIZE, tile.y as u32 * TILE_SIZE);
            let underlay = self.images.tile_underlay(tileset, tile)?;
            let overlay = self.images.tile_overlay(tileset, tile)?;
            for image in [underlay, overlay].into_iter().flatten() {
                plane.objects.push(GraphicObject::new(image, location));
            }
        }

        tracing::debug!(
            map = ?map.id,
            objects = plane.objects.len(),
            width = plane.width,
            height = plane.height,
            "combined map"
        );
        Ok(plane)
    }
}

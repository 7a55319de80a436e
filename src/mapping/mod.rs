pub mod assembler;
pub mod block;
mod cache;
pub mod grid;
pub mod icon_data;
pub mod icon_graphics;
pub mod map;
pub mod tile;
pub mod tile_data;

pub use assembler::MapAssembler;
pub use block::Block;
pub use grid::{TileGrid, MAX_GRID_DIMENSION};
pub use icon_data::TilesetMetadataCache;
pub use icon_graphics::{TilesetImageCache, TilesetImages};
pub use map::{Map, MapType};
pub use tile::{GraphicIndex, TileRecord};
pub use tile_data::TileMetadata;

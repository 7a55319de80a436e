mod palette;
mod plane;
mod raw_image;

pub use palette::{Palette, PaletteSource, PALETTE_LOCAL_COLORS};
pub use plane::{GraphicObject, GraphicPlane};
pub use raw_image::{RawImage, TILE_IMAGE_BYTES, TILE_SIZE};

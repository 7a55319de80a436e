//! Decoding of Albion tile maps and tilesets.
//!
//! Assets are read from the game's XLD archives through [`archive::ArchiveSource`];
//! [`context::GameData`] wires the archive, palettes and tileset caches together.

pub mod archive;
pub mod context;
pub mod error;
pub mod imaging;
pub mod mapping;
pub mod paths;

pub use context::GameData;
pub use error::{MappingError, Result};

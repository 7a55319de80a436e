pub mod xld;

use std::fmt;
use std::io::{Read, Seek};

use crate::error::Result;

pub use xld::{seek_to_record, XldLibrary};

/// Number of records stored in one numbered archive file.
pub const RECORDS_PER_FILE: u32 = 100;

/// Archive families the decoder reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFamily {
    /// 16x16 tile graphics (`ICONGFX`), stored in storage order.
    IconGraphics,
    /// 8-byte tile descriptors (`ICONDAT`).
    IconData,
    /// Map headers and tile grids (`MAPDATA`).
    MapData,
    /// Reusable tile blocks (`BLKLIST`).
    BlockList,
    /// Per-map palettes (`PALETTE`).
    Palette,
}

impl fmt::Display for ArchiveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArchiveFamily::IconGraphics => "ICONGFX",
            ArchiveFamily::IconData => "ICONDAT",
            ArchiveFamily::MapData => "MAPDATA",
            ArchiveFamily::BlockList => "BLKLIST",
            ArchiveFamily::Palette => "PALETTE",
        };
        f.write_str(name)
    }
}

/// A global resource index split into archive file number and record number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceIndex {
    pub file: u32,
    pub record: u32,
}

impl ResourceIndex {
    pub fn new(global: u32) -> Self {
        Self {
            file: global / RECORDS_PER_FILE,
            record: global % RECORDS_PER_FILE,
        }
    }
}

impl fmt::Display for ResourceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.record)
    }
}

pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// A stream positioned at the first byte of an archive record.
pub struct ArchiveRecord {
    pub reader: Box<dyn ReadSeek>,
    /// Record length in bytes.
    pub len: u32,
}

impl fmt::Debug for ArchiveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveRecord").field("len", &self.len).finish()
    }
}

/// The "seek to the Nth logical record" service the caches are built on.
pub trait ArchiveSource: Send + Sync {
    fn open_record(&self, family: ArchiveFamily, index: ResourceIndex) -> Result<ArchiveRecord>;
}

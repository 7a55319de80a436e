use std::io;

/// Errors raised while resolving and decoding map assets.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// Short read, missing archive file or any other I/O failure.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Structural decode failure that is not an I/O error (bad archive magic, ...).
    #[error("binary decode error: {0}")]
    Binary(#[source] binrw::Error),

    #[error("tile grid {width}x{height} exceeds the 255x255 limit")]
    GridTooLarge { width: usize, height: usize },

    #[error("tile grid {width}x{height} needs {expected} tiles, got {actual}")]
    GridShape {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("archive record {record} out of range (archive holds {count} records)")]
    RecordOutOfRange { record: u32, count: u32 },

    #[error("tileset id {0} is invalid, tileset ids are one-based")]
    InvalidTilesetId(u16),

    #[error("palette id {0} is invalid, palette ids are one-based")]
    InvalidPaletteId(u8),

    /// `tileset` is the one-based tileset id.
    #[error("tileset {tileset}: tile {index} out of range ({len} tiles)")]
    TileOutOfRange {
        tileset: u32,
        index: usize,
        len: usize,
    },

    #[error("tileset {tileset}: tile {tile} points at graphic {graphic}, tileset holds {len} graphics")]
    GraphicOutOfRange {
        tileset: u32,
        tile: u32,
        graphic: i16,
        len: usize,
    },

    #[error("graphic plane has no palette")]
    MissingPalette,

    #[error("invalid path configuration: {0}")]
    Config(#[from] serde_json::Error),
}

// binrw reports short reads as its own Io variant, possibly wrapped in field
// context; unwrap it so truncated input looks the same no matter which
// decoder hit it.
impl From<binrw::Error> for MappingError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(e) => MappingError::Io(e),
            binrw::Error::Backtrace(bt) => MappingError::from(*bt.error),
            other => MappingError::Binary(other),
        }
    }
}

/// Result type for mapping operations
pub type Result<T> = std::result::Result<T, MappingError>;

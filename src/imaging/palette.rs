use std::io::Read;

use crate::error::Result;

/// Number of colors a map palette defines; the rest come from the common palette.
pub const PALETTE_LOCAL_COLORS: usize = 192;

/// RGB palette indexed by the pixel values of a [`super::RawImage`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    pub fn new(colors: Vec<[u8; 3]>) -> Self {
        Self { colors }
    }

    /// Read `count` RGB triples.
    pub fn read<R: Read>(reader: &mut R, count: usize) -> Result<Self> {
        let mut raw = vec![0u8; count * 3];
        reader.read_exact(&mut raw)?;
        let colors = raw.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Ok(Self { colors })
    }

    /// First `local` colors of `self` (black-padded), followed by `common`.
    pub fn merge_common(&self, common: &Palette, local: usize) -> Palette {
        let mut colors: Vec<[u8; 3]> = self.colors.iter().copied().take(local).collect();
        colors.resize(local, [0, 0, 0]);
        colors.extend_from_slice(&common.colors);
        colors.truncate(256);
        Palette { colors }
    }

    pub fn color(&self, index: u8) -> Option<[u8; 3]> {
        self.colors.get(index as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Palette lookup by one-based palette id.
pub trait PaletteSource: Send + Sync {
    fn full_palette(&self, id: u8) -> Result<Palette>;
}

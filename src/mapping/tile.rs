use std::io::Read;

use crate::error::Result;

/// Size of a packed tile record on disk.
pub const TILE_RECORD_BYTES: usize = 3;

/// Raw layer values below this are "no graphic".
const FIRST_GRAPHIC: u16 = 2;

/// Position of a graphic in a tileset's logical order.
///
/// Raw layer values 0 and 1 mean "no graphic" and have no `GraphicIndex`;
/// raw value 2 is logical index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphicIndex(u16);

impl GraphicIndex {
    pub fn from_raw(raw: u16) -> Option<Self> {
        raw.checked_sub(FIRST_GRAPHIC).map(GraphicIndex)
    }

    /// Index into the tileset's logical order.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The value as stored in a tile record.
    pub fn raw(self) -> u16 {
        self.0 + FIRST_GRAPHIC
    }
}

/// One map tile: an underlay and an overlay graphic, both 12 bits wide.
///
/// Packed on disk as three bytes `b0 b1 b2`:
///   overlay  = b0 << 4 | b1 >> 4
///   underlay = (b1 & 0x0F) << 8 | b2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileRecord {
    pub x: u8,
    pub y: u8,
    pub underlay: u16,
    pub overlay: u16,
}

impl TileRecord {
    /// Decode a bare record; the position is left at (0, 0).
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_bytes_at(0, 0, bytes)
    }

    pub fn from_bytes_at(x: u8, y: u8, [b0, b1, b2]: [u8; 3]) -> Self {
        let overlay = ((b0 as u16) << 4) | (((b1 & 0xF0) as u16) >> 4);
        let underlay = (b2 as u16) | (((b1 & 0x0F) as u16) << 8);
        Self {
            x,
            y,
            underlay,
            overlay,
        }
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Self::read_at(0, 0, reader)
    }

    pub fn read_at<R: Read>(x: u8, y: u8, reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; TILE_RECORD_BYTES];
        reader.read_exact(&mut bytes)?;
        Ok(Self::from_bytes_at(x, y, bytes))
    }

    pub fn underlay_graphic(&self) -> Option<GraphicIndex> {
        GraphicIndex::from_raw(self.underlay)
    }

    pub fn overlay_graphic(&self) -> Option<GraphicIndex> {
        GraphicIndex::from_raw(self.overlay)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::MappingError;

    fn pack(tile: &TileRecord) -> [u8; 3] {
        [
            (tile.overlay >> 4) as u8,
            (((tile.overlay & 0x0F) << 4) | (tile.underlay >> 8)) as u8,
            (tile.underlay & 0xFF) as u8,
        ]
    }

    #[test]
    fn decodes_both_nibbles_of_middle_byte() {
        let tile = TileRecord::from_bytes([0x20, 0x10, 0x05]);
        assert_eq!(tile.overlay, 0x201);
        assert_eq!(tile.underlay, 0x005);

        let tile = TileRecord::from_bytes([0xAB, 0xCD, 0xEF]);
        assert_eq!(tile.overlay, 0xABC);
        assert_eq!(tile.underlay, 0xDEF);
    }

    #[test]
    fn packing_round_trips_for_every_triple() {
        for b0 in 0..=255u8 {
            for b1 in 0..=255u8 {
                for b2 in 0..=255u8 {
                    let tile = TileRecord::from_bytes([b0, b1, b2]);
                    assert!(tile.overlay <= 0xFFF && tile.underlay <= 0xFFF);
                    assert_eq!(pack(&tile), [b0, b1, b2]);
                }
            }
        }
    }

    #[test]
    fn read_at_keeps_position() {
        let tile = TileRecord::read_at(7, 9, &mut Cursor::new([0x30, 0x00, 0x01])).unwrap();
        assert_eq!((tile.x, tile.y), (7, 9));
        assert_eq!(tile.overlay, 0x300);
        assert_eq!(tile.underlay, 0x001);
    }

    #[test]
    fn short_record_is_io_error() {
        let err = TileRecord::read(&mut Cursor::new([0x30, 0x00])).unwrap_err();
        assert!(matches!(err, MappingError::Io(_)));
    }

    #[test]
    fn sentinels_have_no_graphic() {
        assert_eq!(GraphicIndex::from_raw(0), None);
        assert_eq!(GraphicIndex::from_raw(1), None);
        let first = GraphicIndex::from_raw(2).unwrap();
        assert_eq!(first.index(), 0);
        assert_eq!(first.raw(), 2);
        assert_eq!(GraphicIndex::from_raw(0xFFF).unwrap().index(), 0xFFD);

        let tile = TileRecord::from_bytes([0x00, 0x10, 0x00]);
        assert_eq!(tile.overlay_graphic(), None);
        assert_eq!(tile.underlay_graphic(), None);
    }
}

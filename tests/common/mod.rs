// Common test utilities: synthetic archives and a call-counting archive stub
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{self, Cursor};
use std::sync::Mutex;

use alb_tools_lib::archive::{ArchiveFamily, ArchiveRecord, ArchiveSource, ResourceIndex};
use alb_tools_lib::imaging::{Palette, PaletteSource, TILE_IMAGE_BYTES};
use alb_tools_lib::Result;

/// Serialize records into an XLD container.
pub fn xld(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"XLD0I\0".to_vec();
    out.extend_from_slice(&(records.len() as u16).to_le_bytes());
    for r in records {
        out.extend_from_slice(&(r.len() as u32).to_le_bytes());
    }
    for r in records {
        out.extend_from_slice(r);
    }
    out
}

/// ICONDAT record: one descriptor per `raw_graphic_index`.
pub fn tile_data_record(raw_graphic_indices: &[i16]) -> Vec<u8> {
    let mut out = Vec::new();
    for (i, raw) in raw_graphic_indices.iter().enumerate() {
        out.push(i as u8); // kind
        out.push(0); // collision
        out.extend_from_slice(&0i16.to_le_bytes());
        out.extend_from_slice(&raw.to_le_bytes());
        out.push(1); // frame count
        out.push(0); // reserved
    }
    out
}

/// ICONGFX record: graphic `i` is filled with pixel value `i + 1`.
pub fn graphics_record(count: u8) -> Vec<u8> {
    (0..count)
        .flat_map(|i| std::iter::repeat(i + 1).take(TILE_IMAGE_BYTES))
        .collect()
}

/// MAPDATA record with an empty NPC table (npc_count 0, 320 bytes).
pub fn map_record(width: u8, height: u8, tileset: u8, palette: u8, tiles: &[[u8; 3]]) -> Vec<u8> {
    let mut out = vec![0, 0, 2, 0, width, height, tileset, 0, palette, 0];
    out.extend(std::iter::repeat(0).take(320));
    for t in tiles {
        out.extend_from_slice(t);
    }
    out
}

/// Pack raw overlay/underlay values into a tile record.
pub fn tile(overlay: u16, underlay: u16) -> [u8; 3] {
    [
        (overlay >> 4) as u8,
        (((overlay & 0x0F) << 4) | (underlay >> 8)) as u8,
        (underlay & 0xFF) as u8,
    ]
}

/// In-memory archive that counts how often each family is opened.
#[derive(Default)]
pub struct CountingArchive {
    records: HashMap<(ArchiveFamily, u32), Vec<u8>>,
    opens: Mutex<HashMap<ArchiveFamily, usize>>,
}

impl CountingArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, family: ArchiveFamily, global: u32, data: Vec<u8>) -> Self {
        self.records.insert((family, global), data);
        self
    }

    pub fn opens(&self, family: ArchiveFamily) -> usize {
        self.opens
            .lock()
            .unwrap()
            .get(&family)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_opens(&self) -> usize {
        self.opens.lock().unwrap().values().sum()
    }
}

impl ArchiveSource for CountingArchive {
    fn open_record(&self, family: ArchiveFamily, index: ResourceIndex) -> Result<ArchiveRecord> {
        *self.opens.lock().unwrap().entry(family).or_insert(0) += 1;
        let global = index.file * 100 + index.record;
        let data = self
            .records
            .get(&(family, global))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} {}", family, index)))?;
        Ok(ArchiveRecord {
            len: data.len() as u32,
            reader: Box::new(Cursor::new(data)),
        })
    }
}

/// Palette source returning a greyscale ramp and recording the ids asked for.
#[derive(Default)]
pub struct GreyPalettes {
    pub requested: Mutex<Vec<u8>>,
}

impl PaletteSource for GreyPalettes {
    fn full_palette(&self, id: u8) -> Result<Palette> {
        self.requested.lock().unwrap().push(id);
        Ok(Palette::new((0..=255u8).map(|v| [v, v, v]).collect()))
    }
}

//! XLD archive container.
//!
//! Layout (little-endian):
//!   magic:   b"XLD0I\0"
//!   count:   u16        number of records
//!   lengths: u32[count] byte length of every record
//!   records back to back, in index order

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use binrw::BinRead;

use super::{ArchiveFamily, ArchiveRecord, ArchiveSource, ResourceIndex};
use crate::error::{MappingError, Result};
use crate::imaging::{Palette, PaletteSource, PALETTE_LOCAL_COLORS};
use crate::paths::AssetPaths;

#[derive(BinRead, Debug)]
#[br(little, magic = b"XLD0I\0")]
struct XldHeader {
    count: u16,
    #[br(count = count)]
    lengths: Vec<u32>,
}

/// Position `reader` at the start of record `index` and return its length.
///
/// The reader must be at the start of the archive.
pub fn seek_to_record<R: Read + Seek>(reader: &mut R, index: u32) -> Result<u32> {
    let header = XldHeader::read(reader)?;
    let record = index as usize;
    if record >= header.lengths.len() {
        return Err(MappingError::RecordOutOfRange {
            record: index,
            count: header.count as u32,
        });
    }

    let skip: u64 = header.lengths[..record].iter().map(|&len| len as u64).sum();
    reader.seek(SeekFrom::Current(skip as i64))?;
    Ok(header.lengths[record])
}

/// Archives and palettes read from the files named by [`AssetPaths`].
#[derive(Debug, Clone)]
pub struct XldLibrary {
    paths: AssetPaths,
}

impl XldLibrary {
    pub fn new(paths: AssetPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    fn open(path: &Path) -> Result<BufReader<File>> {
        let file = File::open(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        Ok(BufReader::new(file))
    }
}

impl ArchiveSource for XldLibrary {
    fn open_record(&self, family: ArchiveFamily, index: ResourceIndex) -> Result<ArchiveRecord> {
        let path = self.paths.archive_path(family, index.file);
        let mut reader = Self::open(&path)?;
        let len = seek_to_record(&mut reader, index.record)?;
        tracing::debug!(%family, %index, len, path = %path.display(), "opened archive record");
        Ok(ArchiveRecord {
            reader: Box::new(reader),
            len,
        })
    }
}

impl PaletteSource for XldLibrary {
    fn full_palette(&self, id: u8) -> Result<Palette> {
        let global = id
            .checked_sub(1)
            .ok_or(MappingError::InvalidPaletteId(id))?;
        let mut record = self.open_record(ArchiveFamily::Palette, ResourceIndex::new(global as u32))?;
        let local = Palette::read(&mut record.reader, record.len as usize / 3)?;

        let mut common_file = Self::open(&self.paths.global_palette)?;
        let common_len = common_file.get_ref().metadata()?.len() as usize;
        let common = Palette::read(&mut common_file, common_len / 3)?;

        Ok(local.merge_common(&common, PALETTE_LOCAL_COLORS))
    }
}

//! Locations of the game's archive files.
//!
//! Archives are numbered: `MAPDATA1.XLD`, `MAPDATA2.XLD`, ... Each family is
//! described by a [`PathTemplate`] whose `{0}` placeholder receives the file
//! number. The defaults follow the layout of the game's `XLDLIBS` directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::ArchiveFamily;
use crate::error::Result;

const PLACEHOLDER: &str = "{0}";

/// A file path containing a `{0}` placeholder for the archive number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTemplate(String);

impl PathTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Substitute the archive number into the template.
    pub fn format(&self, number: u32) -> PathBuf {
        PathBuf::from(self.0.replace(PLACEHOLDER, &number.to_string()))
    }

    /// Glob-style pattern for the family, `{0}` replaced by `*`.
    pub fn search_pattern(&self) -> String {
        let file_name = Path::new(&self.0)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        file_name.replace(PLACEHOLDER, "*")
    }

    /// Numbered files that exist on disk, starting at 0 and stopping at the
    /// first missing number.
    pub fn existing_files(&self) -> Vec<PathBuf> {
        (0..)
            .map(|n| self.format(n))
            .take_while(|path| path.exists())
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Paths to every archive family the decoder reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPaths {
    pub icon_graphics: PathTemplate,
    pub icon_data: PathTemplate,
    pub map_data: PathTemplate,
    pub block_list: PathTemplate,
    pub palettes: PathTemplate,
    pub global_palette: PathBuf,
}

impl AssetPaths {
    /// Default file names inside an `XLDLIBS` directory.
    pub fn from_xldlibs(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let template = |name: &str| PathTemplate::new(dir.join(name).to_string_lossy().to_string());
        Self {
            icon_graphics: template("ICONGFX{0}.XLD"),
            icon_data: template("ICONDAT{0}.XLD"),
            map_data: template("MAPDATA{0}.XLD"),
            block_list: template("BLKLIST{0}.XLD"),
            palettes: template("PALETTE{0}.XLD"),
            global_palette: dir.join("PALETTE.000"),
        }
    }

    /// Read a path configuration written as JSON.
    ///
    /// ```json
    /// { "iconGraphics": "/data/ICONGFX{0}.XLD", "iconData": "...", "mapData": "...",
    ///   "blockList": "...", "palettes": "...", "globalPalette": "/data/PALETTE.000" }
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn template(&self, family: ArchiveFamily) -> &PathTemplate {
        match family {
            ArchiveFamily::IconGraphics => &self.icon_graphics,
            ArchiveFamily::IconData => &self.icon_data,
            ArchiveFamily::MapData => &self.map_data,
            ArchiveFamily::BlockList => &self.block_list,
            ArchiveFamily::Palette => &self.palettes,
        }
    }

    /// Path of archive number `file` of `family`.
    pub fn archive_path(&self, family: ArchiveFamily, file: u32) -> PathBuf {
        self.template(family).format(file)
    }
}

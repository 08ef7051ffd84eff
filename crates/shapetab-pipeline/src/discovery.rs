//! Lazy discovery of shapefiles below a directory
//!
//! Entries are visited in file-name order within each directory, so the
//! sequence is the same on every filesystem for the same tree.

use shapetab_core::error::{Result, ShapetabError};
use shapetab_core::formats::{has_extension, SHAPEFILE_EXTENSION};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories that archive tools add and that never hold real data
const SKIPPED_DIRS: &[&str] = &["__MACOSX"];

/// Walks a directory tree and yields every `.shp` file.
///
/// Each call to [`ShapefileDiscovery::iter`] starts a fresh walk.
#[derive(Debug, Clone)]
pub struct ShapefileDiscovery {
    root: PathBuf,
}

impl ShapefileDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Iterate matching paths without collecting the tree
    pub fn iter(&self) -> impl Iterator<Item = Result<PathBuf>> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry))
            .filter_map(|entry| match entry {
                Ok(entry) if is_shapefile(&entry) => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(ShapetabError::Io(e.into()))),
            })
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_shapefile(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && has_extension(entry.path(), SHAPEFILE_EXTENSION)
}

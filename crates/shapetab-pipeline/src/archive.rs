//! Zip archive extraction
//!
//! Only zip containers are supported. Entries whose names would escape the
//! destination directory are skipped.

use shapetab_core::error::{Result, ShapetabError};
use std::fs;
use std::io;
use std::path::Path;

/// Extract every entry of `archive_path` below `dest_path`.
///
/// Returns the number of files written.
pub fn extract_zip(archive_path: &Path, dest_path: &Path) -> Result<usize> {
    let archive_error = |message: String| ShapetabError::Archive {
        path: archive_path.to_path_buf(),
        message,
    };

    let file = fs::File::open(archive_path)
        .map_err(|e| archive_error(format!("Failed to open archive: {e}")))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| archive_error(format!("Invalid or corrupt ZIP: {e}")))?;

    let mut count: usize = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| archive_error(format!("Failed to read entry {i}: {e}")))?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                tracing::warn!(entry = %entry.name(), "Skipping archive entry with unsafe path");
                continue;
            }
        };

        let output_path = dest_path.join(&entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&output_path)?;
            io::copy(&mut entry, &mut outfile).map_err(|e| {
                archive_error(format!("Failed to extract {}: {e}", entry_path.display()))
            })?;
            count += 1;
        }
    }

    tracing::debug!(
        archive = %archive_path.display(),
        files = count,
        "Extracted archive"
    );

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extracts_nested_entries() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("upload.zip");
        write_zip(&archive, &[("a.txt", &b"alpha"[..]), ("nested/deeper/b.txt", &b"beta"[..])]);

        let dest = dir.path().join("out");
        let count = extract_zip(&archive, &dest).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read(dest.join("a.txt")).unwrap(), &b"alpha"[..]);
        assert_eq!(fs::read(dest.join("nested/deeper/b.txt")).unwrap(), &b"beta"[..]);
    }

    #[test]
    fn test_skips_entries_escaping_destination() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("evil.zip");
        write_zip(&archive, &[("../escape.txt", &b"nope"[..]), ("ok.txt", &b"fine"[..])]);

        let dest = dir.path().join("out");
        let count = extract_zip(&archive, &dest).unwrap();

        assert_eq!(count, 1);
        assert!(!dir.path().join("escape.txt").exists());
        assert!(dest.join("ok.txt").exists());
    }

    #[test]
    fn test_not_a_zip_is_archive_error() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("upload.zip");
        fs::write(&archive, b"plain text pretending to be a zip").unwrap();

        let result = extract_zip(&archive, &dir.path().join("out"));
        assert!(matches!(result, Err(ShapetabError::Archive { .. })));
    }

    #[test]
    fn test_missing_archive_is_archive_error() {
        let dir = TempDir::new().unwrap();
        let result = extract_zip(&dir.path().join("absent.zip"), dir.path());
        assert!(matches!(result, Err(ShapetabError::Archive { .. })));
    }
}

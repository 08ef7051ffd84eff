//! Archive to spreadsheet orchestration

use shapetab_core::config::LayeredConfig;
use shapetab_core::error::Result;
use shapetab_core::models::{ConversionSummary, OutputTable};
use shapetab_geo::{build_transform, CoordinateTransform, DEFAULT_TOLERANCE, WEB_MERCATOR};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::archive::extract_zip;
use crate::discovery::ShapefileDiscovery;
use crate::export::write_xlsx;
use crate::extractor::FeatureExtractor;

/// Default spreadsheet file name inside the output directory
pub const DEFAULT_OUTPUT_FILE: &str = "output.xlsx";

/// Archive to spreadsheet conversion: extract, discover, extract features, export.
///
/// Every run extracts into its own scratch directory, which is removed when
/// the run ends whether or not it succeeded.
#[derive(Clone)]
pub struct ArchivePipeline {
    transform: Arc<dyn CoordinateTransform>,
    tolerance: f64,
    output_file: String,
}

impl ArchivePipeline {
    /// Create a pipeline with the given transform and simplification tolerance
    pub fn new(transform: Arc<dyn CoordinateTransform>, tolerance: f64) -> Self {
        Self {
            transform,
            tolerance,
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }

    /// Build a pipeline from resolved configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        let transform = build_transform(config.transform.value)?;
        Ok(Self::new(transform, config.tolerance.value)
            .with_output_file(config.output_file.value.clone()))
    }

    pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
        self.output_file = output_file.into();
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    /// Convert every shapefile inside a zip archive into one table.
    pub fn process(&self, archive: &Path) -> Result<OutputTable> {
        let scratch = tempfile::Builder::new().prefix("shapetab-").tempdir()?;

        let files = extract_zip(archive, scratch.path())?;
        tracing::info!(
            archive = %archive.display(),
            files,
            "Extracted archive"
        );

        self.process_dir(scratch.path())
    }

    /// Convert every shapefile below an already extracted directory.
    ///
    /// Rows are concatenated in discovery order. The first failing shapefile
    /// aborts the run.
    pub fn process_dir(&self, root: &Path) -> Result<OutputTable> {
        let extractor = FeatureExtractor::new(self.transform.as_ref(), self.tolerance);
        let mut table = OutputTable::new();

        for path in ShapefileDiscovery::new(root).iter() {
            let path = path?;
            let rows = extractor.extract(&path)?;
            let source = path.strip_prefix(root).unwrap_or(&path).to_path_buf();

            tracing::debug!(path = %source.display(), rows = rows.len(), "Converted shapefile");
            table.extend_from(source, rows);
        }

        tracing::info!(
            rows = table.len(),
            shapefiles = table.sources.len(),
            transform = self.transform.name(),
            "Conversion complete"
        );

        Ok(table)
    }

    /// Write `table` into `output_dir`, creating the directory if needed.
    ///
    /// Existing files in the directory are left alone apart from a previous
    /// output of the same name, which is overwritten.
    pub fn export(&self, table: &OutputTable, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(&self.output_file);
        write_xlsx(table, &path)?;
        Ok(path)
    }

    /// Process and export in one step. No archive means nothing to do.
    pub fn run(
        &self,
        archive: Option<&Path>,
        output_dir: &Path,
    ) -> Result<Option<ConversionSummary>> {
        let Some(archive) = archive else {
            tracing::debug!("No archive supplied; nothing to convert");
            return Ok(None);
        };

        let table = self.process(archive)?;
        let output_path = self.export(&table, output_dir)?;

        Ok(Some(ConversionSummary {
            output_path,
            rows: table.len(),
            shapefiles: table.sources.len(),
        }))
    }
}

impl Default for ArchivePipeline {
    fn default() -> Self {
        Self::new(Arc::new(WEB_MERCATOR), DEFAULT_TOLERANCE)
    }
}

impl std::fmt::Debug for ArchivePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchivePipeline")
            .field("transform", &self.transform.name())
            .field("tolerance", &self.tolerance)
            .field("output_file", &self.output_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapetab_core::error::ShapetabError;
    use tempfile::TempDir;

    #[test]
    fn test_run_without_archive_is_noop() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("out");

        let summary = ArchivePipeline::default().run(None, &output_dir).unwrap();

        assert!(summary.is_none());
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_from_config_uses_output_file() {
        let mut config = LayeredConfig::with_defaults();
        config.output_file.value = "centroids.xlsx".to_string();
        config.tolerance.value = 0.01;

        let pipeline = ArchivePipeline::from_config(&config).unwrap();

        assert_eq!(pipeline.output_file(), "centroids.xlsx");
        assert_eq!(pipeline.tolerance(), 0.01);
    }

    #[test]
    fn test_export_creates_directory_and_keeps_other_files() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("nested").join("out");
        let pipeline = ArchivePipeline::default();

        let first = pipeline.export(&OutputTable::new(), &output_dir).unwrap();
        fs::write(output_dir.join("keep.txt"), b"keep").unwrap();
        let second = pipeline.export(&OutputTable::new(), &output_dir).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, output_dir.join(DEFAULT_OUTPUT_FILE));
        assert!(output_dir.join("keep.txt").exists());
    }

    #[test]
    fn test_process_dir_without_shapefiles_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.txt"), b"no data here").unwrap();

        let table = ArchivePipeline::default().process_dir(dir.path()).unwrap();

        assert!(table.is_empty());
        assert!(table.sources.is_empty());
    }

    #[test]
    fn test_process_invalid_archive_fails() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("upload.zip");
        fs::write(&archive, b"not a zip").unwrap();

        let result = ArchivePipeline::default().process(&archive);
        assert!(matches!(result, Err(ShapetabError::Archive { .. })));
    }
}

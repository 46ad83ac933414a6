use std::fs;
use std::path::{Path, PathBuf};

use image::ImageReader;
use tracing::{debug, info, warn};

use crate::{
    config::ConverterConfig,
    error::{MaskError, Result},
    pipeline::Pipeline,
};

/// A mask that could not be converted
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: MaskError,
}

/// Outcome of a directory run
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Annotation files written, in processing order
    pub written: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl ConversionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Converts every mask in a source directory into LabelMe JSON files
pub struct MaskConverter {
    config: ConverterConfig,
    pipeline: Pipeline,
}

impl MaskConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_pipeline(config, Pipeline::default())
    }

    pub fn with_pipeline(config: ConverterConfig, pipeline: Pipeline) -> Self {
        Self { config, pipeline }
    }

    /// Convert the whole source directory.
    ///
    /// Creating the destination or listing the source is fatal. A file that
    /// fails to convert is logged, recorded in the report and skipped.
    pub fn run(&self) -> Result<ConversionReport> {
        fs::create_dir_all(&self.config.dest_dir)?;

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.config.source_dir)? {
            entries.push(entry?.path());
        }
        // read_dir order is platform dependent
        entries.sort();

        let mut report = ConversionReport::default();
        for path in entries {
            if path.is_dir() {
                debug!(path = %path.display(), "skipping directory");
                continue;
            }

            match self.convert_file(&path) {
                Ok(json_path) => report.written.push(json_path),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping mask");
                    report.failures.push(FileFailure { path, error });
                }
            }
        }

        Ok(report)
    }

    /// Convert one mask and write `<stem>.json` into the destination folder
    pub fn convert_file(&self, path: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| MaskError::InvalidFileName(path.to_path_buf()))?;
        let stem = path
            .file_stem()
            .ok_or_else(|| MaskError::InvalidFileName(path.to_path_buf()))?;

        // decode by content, not extension
        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        let record = self.pipeline.process(&image, &file_name)?;

        let json_path = self
            .config
            .dest_dir
            .join(format!("{}.json", stem.to_string_lossy()));
        record.save_labelme(&json_path)?;

        info!(
            shapes = record.shapes.len(),
            vertices = record.vertex_count(),
            "Saved to {}",
            json_path.display()
        );
        Ok(json_path)
    }
}

/// Run a conversion with the default pipeline
pub fn convert_directory(config: &ConverterConfig) -> Result<ConversionReport> {
    MaskConverter::new(config.clone()).run()
}

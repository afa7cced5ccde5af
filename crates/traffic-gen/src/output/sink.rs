//! Destinations for finished datasets.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{Dataset, OutputError};

/// Something a dataset can be persisted to.
pub trait DatasetSink {
    fn write(&mut self, dataset: &Dataset) -> Result<(), OutputError>;
}

/// Writes the dataset as a JSON file, creating parent directories.
pub struct JsonFileSink {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: false,
        }
    }

    /// Sets pretty-printed output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSink for JsonFileSink {
    fn write(&mut self, dataset: &Dataset) -> Result<(), OutputError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, dataset.to_json(self.pretty)?)?;
        info!(
            "Saved {} vehicle and {} foot trips to {}",
            dataset.vehicles.len(),
            dataset.foot.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Writes compact JSON to any byte stream.
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DatasetSink for WriterSink<W> {
    fn write(&mut self, dataset: &Dataset) -> Result<(), OutputError> {
        serde_json::to_writer(&mut self.writer, dataset)?;
        self.writer.flush()?;
        Ok(())
    }
}

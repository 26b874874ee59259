//! File-backed host capabilities: the snapshot document and the output sink.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;

use cameo::{
    ImageSink,
    host::{DocumentSource, HostError},
};

/// An SVG snapshot read from disk each time the renderer asks for it.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    /// Creates a document source for the SVG file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for FileDocument {
    async fn save_svg(&self) -> Result<String, HostError> {
        debug!(path = self.path.display().to_string(); "Reading SVG snapshot");
        tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            HostError::with_source(format!("cannot read {}", self.path.display()), err)
        })
    }
}

/// Writes images to a file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ImageSink for FileSink {
    fn write_image(&mut self, mime_type: &str, data: &[u8]) -> io::Result<()> {
        debug!(
            path = self.path.display().to_string(),
            mime_type = mime_type,
            bytes = data.len();
            "Writing image"
        );
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_sink_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("copy.png");

        FileSink::new(&path)
            .write_image("image/png", b"\x89PNG")
            .unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_missing_snapshot_is_host_error() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let document = FileDocument::new("does/not/exist.svg");

        let err = runtime.block_on(document.save_svg()).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.svg"));
    }
}

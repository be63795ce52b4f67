use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Field name to textual value mapping extracted from one file.
pub type FileMetadata = HashMap<String, String>;

/// A long-lived handle to a metadata extraction backend.
///
/// One handle is owned by one classifier worker for the worker's whole
/// lifetime and released when the worker exits; starting the backend per file
/// would dominate the per-file extraction cost.
pub trait MetadataSource {
    /// Extracts all metadata fields of `path`. An error fails the whole
    /// extraction for that file, never the handle.
    fn extract(&mut self, path: &Path) -> Result<FileMetadata>;
}

/// Creates one [`MetadataSource`] per classifier worker. Shared across the
/// pool, so it must be callable from several threads.
pub trait MetadataSourceFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn MetadataSource + Send>>;
}

impl<F> MetadataSourceFactory for F
where
    F: Fn() -> Result<Box<dyn MetadataSource + Send>> + Send + Sync,
{
    fn create(&self) -> Result<Box<dyn MetadataSource + Send>> {
        self()
    }
}

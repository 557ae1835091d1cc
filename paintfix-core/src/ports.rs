//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use paintfix_types::document::Document;

pub use paintfix_edit::{DocumentHost, HostWriteError};

/// Source of a serialized document.
pub trait DocumentSource {
    fn load_document(&self) -> anyhow::Result<Document>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}

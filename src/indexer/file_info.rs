//! File information structure for indexed files

use crate::types::SourceFile;
use std::path::PathBuf;

/// Information about a discovered file
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated
    pub relative_path: String,
    /// Lowercase, without the leading dot; empty when the file has none
    pub extension: String,
    pub language: Option<String>,
    pub content: String,
    /// SHA-256 of the content, lowercase hex
    pub hash: String,
    /// Size on disk in bytes
    pub size: usize,
}

impl FileInfo {
    /// The chunker's view of this file
    pub fn to_source_file(&self) -> SourceFile {
        SourceFile::with_extension(&self.path, &self.extension, self.content.clone())
    }
}

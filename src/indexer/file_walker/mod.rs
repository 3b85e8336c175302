//! File walking functionality for directory traversal

use super::file_info::FileInfo;
use super::language::detect_language;
use crate::error::{ChunkerError, IndexingError};
use crate::glob_utils::PathFilter;
use ignore::WalkBuilder;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Share of control bytes above which a file is treated as binary
const BINARY_THRESHOLD: f64 = 0.3;

/// Files found by a walk, plus how many candidates were rejected
#[derive(Debug, Default)]
pub struct WalkedFiles {
    pub files: Vec<FileInfo>,
    /// Files dropped by the extension, size, binary or UTF-8 checks
    pub skipped: usize,
}

pub struct FileWalker {
    pub(crate) root: PathBuf,
    pub(crate) max_file_size: usize,
    /// Lowercase, without dots. Empty accepts every extension.
    pub(crate) extensions: Vec<String>,
    pub(crate) include_patterns: Vec<String>,
    pub(crate) exclude_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: impl AsRef<Path>, max_file_size: usize) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_file_size,
            extensions: vec![],
            include_patterns: vec![],
            exclude_patterns: vec![],
        }
    }

    /// Only accept files with one of these extensions (leading dot optional)
    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_patterns(
        mut self,
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
    ) -> Self {
        self.include_patterns = include_patterns;
        self.exclude_patterns = exclude_patterns;
        self
    }

    /// Walk the directory and collect all eligible files.
    ///
    /// Respects `.gitignore` and `.ignore` files. Excluded directories are
    /// pruned without being descended into.
    pub fn walk(&self) -> Result<WalkedFiles, ChunkerError> {
        if !self.root.exists() {
            return Err(IndexingError::DirectoryNotFound(self.root.display().to_string()).into());
        }
        if !self.root.is_dir() {
            return Err(IndexingError::NotADirectory(self.root.display().to_string()).into());
        }

        let filter = PathFilter::new(&self.include_patterns, &self.exclude_patterns)?;
        let mut walked = WalkedFiles::default();

        let prune_filter = filter.clone();
        let prune_root = self.root.clone();
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(true)
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .git_global(true)
            .require_git(false)
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                // Hidden files are walked, but never git internals
                entry.file_name() != ".git"
                    && !prune_filter.is_excluded(&relative_path(&prune_root, entry.path()))
            })
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let relative = relative_path(&self.root, path);

            if !filter.is_included(&relative) {
                continue;
            }

            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .unwrap_or_default();

            if !self.accepts_extension(&extension) {
                tracing::debug!("Skipping unsupported extension: {:?}", path);
                walked.skipped += 1;
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len() as usize,
                Err(e) => {
                    tracing::debug!("Skipping unreadable file {:?}: {}", path, e);
                    walked.skipped += 1;
                    continue;
                }
            };
            if size > self.max_file_size {
                tracing::debug!("Skipping large file: {:?} ({} bytes)", path, size);
                walked.skipped += 1;
                continue;
            }

            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Failed to read {:?}: {}", path, e);
                    walked.skipped += 1;
                    continue;
                }
            };

            if !is_text(&bytes) {
                tracing::debug!("Skipping binary file: {:?}", path);
                walked.skipped += 1;
                continue;
            }

            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(e) => {
                    tracing::debug!(
                        "Skipping file that can't be read as UTF-8: {:?}: {}",
                        path,
                        e
                    );
                    walked.skipped += 1;
                    continue;
                }
            };

            walked.files.push(FileInfo {
                path: path.to_path_buf(),
                relative_path: relative,
                language: detect_language(&extension),
                extension,
                hash: calculate_hash(&content),
                content,
                size,
            });
        }

        // Directory order is platform dependent
        walked
            .files
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        tracing::info!(
            "Found {} files to index ({} skipped)",
            walked.files.len(),
            walked.skipped
        );
        Ok(walked)
    }

    pub(crate) fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions.is_empty() || self.extensions.iter().any(|ext| ext == extension)
    }
}

/// `/`-separated path of `path` relative to `root`
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Heuristic text check: fewer than 30% control bytes (tabs and line breaks
/// excepted). Empty content counts as text.
pub(crate) fn is_text(content: &[u8]) -> bool {
    if content.is_empty() {
        return true;
    }

    let non_printable = content
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\n' && b != b'\r' && b != b'\t')
        .count();

    (non_printable as f64 / content.len() as f64) < BINARY_THRESHOLD
}

/// SHA-256 of the content as lowercase hex
pub fn calculate_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

//! Core library client for ast-chunker
//!
//! Wraps the extractor with configuration, file I/O and per-chunk metadata
//! so the output can be handed straight to an embedding pipeline.

use crate::config::Config;
use crate::error::{ChunkerError, IndexingError};
use crate::indexer::{
    AstChunkExtractor, ChunkStrategy, ExtractionOutcome, FileInfo, FileWalker, GrammarRegistry,
    TextChunker, calculate_hash, detect_language,
};
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Main client for chunking files and directories
///
/// # Example
///
/// ```no_run
/// use ast_chunker::{ChunkClient, Config};
///
/// fn main() -> Result<(), ast_chunker::error::ChunkerError> {
///     let client = ChunkClient::with_config(Config::default())?;
///
///     let response = client.index_directory("/path/to/code")?;
///     println!(
///         "{} chunks from {} files",
///         response.stats.total_chunks(),
///         response.stats.indexed_files
///     );
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ChunkClient {
    pub(crate) config: Arc<Config>,
    pub(crate) extractor: AstChunkExtractor,
}

/// Chunks produced for one file and how extraction went
pub(crate) struct FileChunks {
    pub(crate) chunks: Vec<IndexedChunk>,
    pub(crate) outcome: ExtractionOutcome,
}

impl ChunkClient {
    /// Create a client from the default config sources
    /// (config file, then `AST_CHUNKER_*` environment overrides)
    pub fn new() -> Result<Self, ChunkerError> {
        Self::with_config(Config::new()?)
    }

    /// Create a client with custom configuration
    pub fn with_config(config: Config) -> Result<Self, ChunkerError> {
        config.validate()?;

        tracing::debug!(
            "Chunking: max_depth={}, window_lines={}, include_file_root={}",
            config.chunking.max_depth,
            config.chunking.window_lines,
            config.chunking.include_file_root
        );

        let registry = Arc::new(GrammarRegistry::new());
        let extractor = AstChunkExtractor::from_config(registry, &config.chunking);

        Ok(Self {
            config: Arc::new(config),
            extractor,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn extractor(&self) -> &AstChunkExtractor {
        &self.extractor
    }

    /// Chunk in-memory source
    pub fn chunk_source(&self, source: &SourceFile) -> Vec<Chunk> {
        self.extractor.extract(source)
    }

    /// Read one file and chunk it.
    ///
    /// `extension` overrides the file's own extension when choosing a grammar.
    pub fn chunk_path(
        &self,
        path: impl AsRef<Path>,
        extension: Option<&str>,
    ) -> Result<Vec<IndexedChunk>, ChunkerError> {
        let path = path.as_ref();
        let read_failed = |reason: String| IndexingError::FileReadFailed {
            file: path.display().to_string(),
            reason,
        };

        let metadata = std::fs::metadata(path).map_err(|e| read_failed(e.to_string()))?;
        let size = metadata.len() as usize;
        if size > self.config.indexing.max_file_size {
            return Err(IndexingError::FileTooLarge {
                size,
                max: self.config.indexing.max_file_size,
            }
            .into());
        }

        let bytes = std::fs::read(path).map_err(|e| read_failed(e.to_string()))?;
        let content = String::from_utf8(bytes).map_err(|e| read_failed(e.to_string()))?;

        let extension = extension
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .or_else(|| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase())
            })
            .unwrap_or_default();

        let file = FileInfo {
            path: path.to_path_buf(),
            relative_path: path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            language: detect_language(&extension),
            extension,
            hash: calculate_hash(&content),
            content,
            size,
        };

        let repo_name = path
            .parent()
            .map(repo_name_of)
            .unwrap_or_default();

        Ok(self.chunk_file(&file, &repo_name).chunks)
    }

    /// Walk a directory and chunk every eligible file in parallel
    pub fn index_directory(&self, root: impl AsRef<Path>) -> Result<IndexResponse, ChunkerError> {
        let start = Instant::now();
        let root = root.as_ref();
        let indexing = &self.config.indexing;

        tracing::info!("Indexing directory: {}", root.display());

        let walked = FileWalker::new(root, indexing.max_file_size)
            .with_extensions(&indexing.extensions)
            .with_patterns(
                indexing.include_patterns.clone(),
                indexing.exclude_patterns.clone(),
            )
            .walk()?;

        let repo_name = repo_name_of(root);

        let per_file: Vec<FileChunks> = walked
            .files
            .par_iter()
            .map(|file| self.chunk_file(file, &repo_name))
            .collect();

        let mut stats = IndexStats {
            total_files: walked.files.len(),
            skipped_files: walked.skipped,
            ..IndexStats::default()
        };
        let mut chunks = Vec::new();

        for file in per_file {
            match file.outcome {
                ExtractionOutcome::Empty => stats.skipped_files += 1,
                ExtractionOutcome::Structural { .. } => {
                    stats.indexed_files += 1;
                    stats.structural_files += 1;
                }
                ExtractionOutcome::Fallback(_) => {
                    stats.indexed_files += 1;
                    stats.fallback_files += 1;
                }
            }

            for chunk in &file.chunks {
                match chunk.metadata.chunk_type.as_str() {
                    "ast" => stats.ast_chunks += 1,
                    "fallback" => stats.fallback_chunks += 1,
                    _ => stats.fixed_chunks += 1,
                }
            }
            chunks.extend(file.chunks);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexed {} of {} files into {} chunks ({} AST, {} fallback, {} fixed) in {} ms",
            stats.indexed_files,
            stats.total_files,
            stats.total_chunks(),
            stats.ast_chunks,
            stats.fallback_chunks,
            stats.fixed_chunks,
            duration_ms
        );

        Ok(IndexResponse {
            chunks,
            stats,
            duration_ms,
        })
    }

    /// Chunk one file and attach metadata
    pub(crate) fn chunk_file(&self, file: &FileInfo, repo_name: &str) -> FileChunks {
        let extraction = self.extractor.extract_detailed(&file.to_source_file());

        let mut chunks: Vec<IndexedChunk> = extraction
            .chunks
            .into_iter()
            .map(|chunk| to_indexed(chunk, file, repo_name))
            .collect();

        if self.config.indexing.fixed_size_chunks && extraction.outcome != ExtractionOutcome::Empty
        {
            chunks.extend(
                self.fixed_chunks(&file.content)
                    .into_iter()
                    .map(|chunk| to_indexed(chunk, file, repo_name)),
            );
        }

        FileChunks {
            chunks,
            outcome: extraction.outcome,
        }
    }

    fn fixed_chunks(&self, content: &str) -> Vec<Chunk> {
        let chunker = TextChunker::new(ChunkStrategy::FixedSize {
            size: self.config.chunking.fixed_chunk_size,
            overlap: self.config.chunking.fixed_overlap,
        });

        let mut chunks: Vec<Chunk> = chunker
            .split(content)
            .into_iter()
            .filter(|span| !span.text.trim().is_empty())
            .map(|span| Chunk::new(span.text, ChunkKind::Fixed, span.start_line, span.end_line))
            .collect();
        number_chunks(&mut chunks);
        chunks
    }
}

fn to_indexed(chunk: Chunk, file: &FileInfo, repo_name: &str) -> IndexedChunk {
    let (chunk_type, category) = match chunk.kind {
        ChunkKind::Structure(category) => ("ast", Some(category.label().to_string())),
        ChunkKind::Fallback => ("fallback", None),
        ChunkKind::Fixed => ("fixed", None),
    };

    IndexedChunk {
        metadata: ChunkMetadata {
            repo_name: repo_name.to_string(),
            file_path: file.relative_path.clone(),
            extension: (!file.extension.is_empty()).then(|| file.extension.clone()),
            language: file.language.clone(),
            file_size: file.size,
            file_hash: file.hash.clone(),
            chunk_type: chunk_type.to_string(),
            category,
            chunk_index: chunk.index,
            total_chunks: chunk.total,
            chunk_size: chunk.byte_len,
            start_line: chunk.start_line,
            end_line: chunk.end_line,
        },
        content: chunk.content,
    }
}

/// Final component of the directory, after resolving `.` and `..`
fn repo_name_of(root: &Path) -> String {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| resolved.display().to_string())
}

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Coarse structural bucket a syntax node can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureCategory {
    Function,
    TypeOrClass,
    Module,
    Interface,
    Enum,
    Comment,
    Import,
    /// Not structurally significant
    None,
}

impl StructureCategory {
    /// Plural label used in chunk headers and footers (e.g. "functions")
    pub fn label(self) -> &'static str {
        match self {
            StructureCategory::Function => "functions",
            StructureCategory::TypeOrClass => "classes",
            StructureCategory::Module => "modules",
            StructureCategory::Interface => "interfaces",
            StructureCategory::Enum => "enums",
            StructureCategory::Comment => "comments",
            StructureCategory::Import => "imports",
            StructureCategory::None => "none",
        }
    }

    pub fn is_significant(self) -> bool {
        self != StructureCategory::None
    }
}

/// A classified node captured during tree traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureMatch {
    pub category: StructureCategory,
    /// Raw node kind as reported by the grammar
    pub kind: String,
    /// Verbatim source text spanned by the node
    pub text: String,
    /// 1-based
    pub start_line: usize,
    /// 1-based, inclusive
    pub end_line: usize,
    pub start_byte: usize,
    pub end_byte: usize,
    /// Distance from the root node (root = 0)
    pub depth: usize,
}

/// What produced a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// A classified syntax node
    Structure(StructureCategory),
    /// A line window emitted when structural extraction was not possible
    Fallback,
    /// A fixed-size character window
    Fixed,
}

impl ChunkKind {
    /// Short tag suitable for metadata fields
    pub fn tag(self) -> &'static str {
        match self {
            ChunkKind::Structure(category) => category.label(),
            ChunkKind::Fallback => "fallback",
            ChunkKind::Fixed => "fixed",
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, ChunkKind::Fallback)
    }
}

/// A self-contained, labeled excerpt of a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text, including any header/footer framing
    pub content: String,
    pub kind: ChunkKind,
    /// Dense 0-based position among the chunks produced for the file
    pub index: usize,
    /// Number of chunks produced for the file by the same strategy
    pub total: usize,
    /// Byte length of `content`
    pub byte_len: usize,
    /// First source line covered (1-based)
    pub start_line: usize,
    /// Last source line covered (1-based, inclusive)
    pub end_line: usize,
}

impl Chunk {
    /// Create an unnumbered chunk; call [`number_chunks`] once the file's list is complete
    pub fn new(content: String, kind: ChunkKind, start_line: usize, end_line: usize) -> Self {
        let byte_len = content.len();
        Self {
            content,
            kind,
            index: 0,
            total: 0,
            byte_len,
            start_line,
            end_line,
        }
    }
}

/// Assign dense indices and the shared total to a per-file chunk list
pub fn number_chunks(chunks: &mut [Chunk]) {
    let total = chunks.len();
    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.index = index;
        chunk.total = total;
    }
}

/// An immutable source file handed to the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Extension without the leading dot, as found on disk (may be empty)
    pub extension: String,
    pub content: String,
}

impl SourceFile {
    /// Build a source file, deriving the extension from the path
    pub fn new(path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref().to_path_buf();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            path,
            extension,
            content: content.into(),
        }
    }

    /// Build a source file with an explicit extension (leading dot optional)
    pub fn with_extension(
        path: impl AsRef<Path>,
        extension: &str,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
            content: content.into(),
        }
    }

    pub fn byte_len(&self) -> usize {
        self.content.len()
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Metadata attached to each chunk handed to the embedding pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Name of the indexed root directory
    pub repo_name: String,
    /// File path relative to the indexed root
    pub file_path: String,
    pub extension: Option<String>,
    /// Human readable language name, if known
    pub language: Option<String>,
    /// Size of the source file in bytes
    pub file_size: usize,
    /// SHA256 hash of the file content
    pub file_hash: String,
    /// Chunking strategy: "ast", "fallback" or "fixed"
    pub chunk_type: String,
    /// Structural category label for AST chunks
    pub category: Option<String>,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub chunk_size: usize,
    pub start_line: usize,
    pub end_line: usize,
}

/// A chunk plus its per-file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub content: String,
    pub metadata: ChunkMetadata,
}

/// Summary of a directory indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Files that passed the walker's filters
    pub total_files: usize,
    /// Files that produced at least one chunk
    pub indexed_files: usize,
    /// Files rejected by the walker (extension, size, binary, UTF-8) or
    /// holding only whitespace
    pub skipped_files: usize,
    /// Files chunked structurally
    pub structural_files: usize,
    /// Files that went through fallback windowing
    pub fallback_files: usize,
    pub ast_chunks: usize,
    pub fallback_chunks: usize,
    pub fixed_chunks: usize,
}

impl IndexStats {
    pub fn total_chunks(&self) -> usize {
        self.ast_chunks + self.fallback_chunks + self.fixed_chunks
    }
}

/// Response from a directory indexing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub chunks: Vec<IndexedChunk>,
    pub stats: IndexStats,
    /// Time taken in milliseconds
    pub duration_ms: u64,
}

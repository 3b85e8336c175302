//! # ast-chunker - Structural Chunking of Source Files
//!
//! Splits source files into self-describing chunks along their syntax tree
//! (functions, classes, imports, comments and so on) for embedding and
//! retrieval pipelines. Files that cannot be parsed, or whose tree holds
//! nothing worth keeping, are split into fixed-size line windows instead.
//!
//! ## Key Features
//!
//! - **Tree-sitter parsing** for 13 grammars (Python, JavaScript, TypeScript,
//!   TSX, Java, Go, C, C++, Rust, Ruby, PHP, Swift, C#)
//! - **Data-driven classification**: one node-kind table per grammar
//! - **Never fails**: every structural failure becomes a fallback chunk
//! - **Lazy, shared grammar cache** safe for parallel use
//! - **Directory indexing** with gitignore support, glob filters and
//!   per-chunk metadata, processed in parallel with rayon
//!
//! ## Architecture
//!
//! ```text
//!  SourceFile (text + extension)
//!          │
//!  language::resolve ──── None ───────────────┐
//!          │                                  │
//!  GrammarRegistry::get ── load error ────────┤
//!          │                                  │
//!  AstParser + walker::walk ── failure/empty ─┤
//!          │                                  ▼
//!  formatter::format_match            chunker::fallback_chunks
//!          │                                  │
//!          └────────────► Vec<Chunk> ◄────────┘
//! ```
//!
//! ## Modules
//!
//! - [`indexer`]: resolver, grammar registry, classifier, walker, formatter,
//!   fallback windower, extractor and file walker
//! - [`client`]: file and directory chunking with metadata
//! - [`config`]: configuration management with environment variable support
//! - [`types`]: chunk, match and metadata types
//! - [`error`]: error types
//! - [`paths`]: platform config locations
//! - [`glob_utils`]: include/exclude path filters
//!
//! ## Usage Example
//!
//! ```no_run
//! use ast_chunker::indexer::AstChunkExtractor;
//! use ast_chunker::types::SourceFile;
//!
//! let extractor = AstChunkExtractor::default();
//! let file = SourceFile::new("lib.rs", "fn main() {}\n");
//! for chunk in extractor.extract(&file) {
//!     println!("{}/{}: {}", chunk.index + 1, chunk.total, chunk.content);
//! }
//! ```

/// File and directory chunking with per-chunk metadata
pub mod client;

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Glob-based include/exclude filtering
pub mod glob_utils;

/// Language resolution, parsing, tree walking and chunking
pub mod indexer;

/// Platform-specific config paths
pub mod paths;

/// Chunk, match and metadata types
pub mod types;

pub use client::ChunkClient;
pub use config::Config;
pub use types::{Chunk, ChunkKind, IndexResponse, IndexedChunk, SourceFile, StructureCategory};

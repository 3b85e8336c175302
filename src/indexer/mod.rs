//! Language resolution, grammar loading, tree walking and chunking
//!
//! The pipeline for one file is:
//!
//! ```text
//! extension ─► language::resolve ─► GrammarRegistry::get ─► AstParser
//!           ─► walker::walk (classifier) ─► formatter::format_match
//! ```
//!
//! with [`chunker::fallback_chunks`] taking over whenever a step gives up.
//! [`AstChunkExtractor`] drives it and never fails.

pub mod ast_parser;
pub mod chunker;
pub mod classifier;
pub mod extractor;
mod file_info;
mod file_walker;
pub mod formatter;
pub mod grammar;
pub mod language;
pub mod walker;

pub use ast_parser::AstParser;
pub use chunker::{ChunkStrategy, TextChunker, TextSpan};
pub use extractor::{AstChunkExtractor, Extraction, ExtractionOutcome, ExtractorOptions};
pub use file_info::FileInfo;
pub use file_walker::{FileWalker, WalkedFiles, calculate_hash};
pub use grammar::{GrammarLoader, GrammarRegistry};
pub use language::{GrammarId, detect_language, resolve};
pub use walker::{StructureMap, SyntaxNode, WalkOptions};

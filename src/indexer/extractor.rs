//! Per-file orchestration: resolve, load, parse, walk, format, or fall back

use super::ast_parser::AstParser;
use super::chunker::{DEFAULT_WINDOW_LINES, fallback_chunks};
use super::formatter::format_match;
use super::grammar::GrammarRegistry;
use super::language::{GrammarId, resolve};
use super::walker::{DEFAULT_MAX_DEPTH, StructureMap, WalkOptions};
use crate::config::ChunkingConfig;
use crate::error::{ChunkingError, panic_message};
use crate::types::{Chunk, SourceFile, number_chunks};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tree_sitter::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorOptions {
    pub max_depth: usize,
    pub window_lines: usize,
    pub include_file_root: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            window_lines: DEFAULT_WINDOW_LINES,
            include_file_root: false,
        }
    }
}

impl From<&ChunkingConfig> for ExtractorOptions {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            window_lines: config.window_lines,
            include_file_root: config.include_file_root,
        }
    }
}

/// How a file's chunks were produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Blank input, no chunks
    Empty,
    /// Chunks came from classified syntax nodes
    Structural { grammar: GrammarId },
    /// Structural extraction gave up for this reason; chunks are line windows
    Fallback(ChunkingError),
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub chunks: Vec<Chunk>,
    pub outcome: ExtractionOutcome,
}

impl Extraction {
    pub fn is_structural(&self) -> bool {
        matches!(self.outcome, ExtractionOutcome::Structural { .. })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, ExtractionOutcome::Fallback(_))
    }
}

/// Turns a source file into an ordered list of chunks.
///
/// Never fails: every structural failure is absorbed into fallback windows,
/// and the only way to get zero chunks is blank input. Cheap to clone and
/// safe to share across threads; clones share the grammar cache.
#[derive(Clone)]
pub struct AstChunkExtractor {
    registry: Arc<GrammarRegistry>,
    options: ExtractorOptions,
    parse: ParseFn,
}

/// Parses one file's text into classified structures
pub(crate) type ParseFn =
    fn(GrammarId, &Language, &str, WalkOptions) -> Result<StructureMap, ChunkingError>;

impl AstChunkExtractor {
    pub fn new(registry: Arc<GrammarRegistry>) -> Self {
        Self::with_options(registry, ExtractorOptions::default())
    }

    pub fn with_options(registry: Arc<GrammarRegistry>, options: ExtractorOptions) -> Self {
        Self {
            registry,
            options,
            parse: parse_with_tree_sitter,
        }
    }

    /// Swap the parse step, for exercising the failure paths
    #[cfg(test)]
    pub(crate) fn with_parse_fn(mut self, parse: ParseFn) -> Self {
        self.parse = parse;
        self
    }

    pub fn from_config(registry: Arc<GrammarRegistry>, config: &ChunkingConfig) -> Self {
        Self::with_options(registry, ExtractorOptions::from(config))
    }

    pub fn registry(&self) -> &Arc<GrammarRegistry> {
        &self.registry
    }

    pub fn options(&self) -> ExtractorOptions {
        self.options
    }

    /// Chunk a file, discarding how the chunks were produced
    pub fn extract(&self, source: &SourceFile) -> Vec<Chunk> {
        self.extract_detailed(source).chunks
    }

    /// Chunk a file and report which path produced the chunks
    pub fn extract_detailed(&self, source: &SourceFile) -> Extraction {
        if source.is_blank() {
            return Extraction {
                chunks: Vec::new(),
                outcome: ExtractionOutcome::Empty,
            };
        }

        let (mut chunks, outcome) = match self.try_structural(source) {
            Ok((grammar, chunks)) => {
                tracing::debug!(
                    "{}: {} AST chunks ({})",
                    source.path.display(),
                    chunks.len(),
                    grammar
                );
                (chunks, ExtractionOutcome::Structural { grammar })
            }
            Err(reason) => {
                match &reason {
                    ChunkingError::ParseFailure(_) => tracing::warn!(
                        "{}: parse failed, using fallback chunking: {}",
                        source.path.display(),
                        reason
                    ),
                    _ => tracing::debug!(
                        "{}: using fallback chunking: {}",
                        source.path.display(),
                        reason
                    ),
                }
                let chunks = fallback_chunks(
                    &source.content,
                    &source.extension,
                    self.options.window_lines,
                );
                (chunks, ExtractionOutcome::Fallback(reason))
            }
        };

        number_chunks(&mut chunks);
        Extraction { chunks, outcome }
    }

    fn try_structural(
        &self,
        source: &SourceFile,
    ) -> Result<(GrammarId, Vec<Chunk>), ChunkingError> {
        let grammar = resolve(&source.extension)
            .ok_or_else(|| ChunkingError::UnsupportedLanguage(source.extension.clone()))?;
        let language = self.registry.get(grammar)?;

        let walk_options = WalkOptions {
            max_depth: self.options.max_depth,
            include_root: self.options.include_file_root,
        };

        let parse = self.parse;
        let structures = catch_unwind(AssertUnwindSafe(|| {
            parse(grammar, &language, &source.content, walk_options)
        }))
        .map_err(|panic| ChunkingError::ParseFailure(panic_message("parser", panic.as_ref())))??;

        if structures.is_empty() {
            return Err(ChunkingError::NoStructuralMatches);
        }

        let chunks = structures
            .into_matches()
            .map(|found| format_match(&found, grammar))
            .collect();

        Ok((grammar, chunks))
    }
}

impl Default for AstChunkExtractor {
    fn default() -> Self {
        Self::new(Arc::new(GrammarRegistry::new()))
    }
}

fn parse_with_tree_sitter(
    grammar: GrammarId,
    language: &Language,
    content: &str,
    options: WalkOptions,
) -> Result<StructureMap, ChunkingError> {
    let mut parser = AstParser::new(grammar, language)?;
    parser.parse_structures(content, options)
}

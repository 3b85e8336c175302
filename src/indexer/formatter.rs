//! Turns structural matches into self-describing chunks

use super::language::GrammarId;
use crate::types::{Chunk, ChunkKind, StructureMatch};

/// Frame a match with a category/line-range header and an end marker.
///
/// ```text
/// // FUNCTIONS: Lines 3-7
/// fn example() { ... }
/// // End of functions (AST chunk)
/// ```
///
/// The header and footer use the grammar's line comment token so the chunk
/// still reads as source in that language.
pub fn format_match(found: &StructureMatch, grammar: GrammarId) -> Chunk {
    let comment = grammar.line_comment();
    let label = found.category.label();

    let content = format!(
        "{comment} {}: Lines {}-{}\n{}\n{comment} End of {label} (AST chunk)",
        label.to_uppercase(),
        found.start_line,
        found.end_line,
        found.text,
    );

    Chunk::new(
        content,
        ChunkKind::Structure(found.category),
        found.start_line,
        found.end_line,
    )
}

use super::language::GrammarId;
use super::walker::{StructureMap, WalkOptions, walk};
use crate::error::ChunkingError;
use tree_sitter::{Language, Parser, Tree};

/// Tree-sitter parser bound to one grammar
pub struct AstParser {
    parser: Parser,
    grammar: GrammarId,
}

impl AstParser {
    /// Create a parser for a grammar previously obtained from the registry
    pub fn new(grammar: GrammarId, language: &Language) -> Result<Self, ChunkingError> {
        let mut parser = Parser::new();
        parser.set_language(language).map_err(|e| {
            ChunkingError::GrammarLoadFailure {
                grammar: grammar.as_str().to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self { parser, grammar })
    }

    /// Parse source code into a syntax tree
    pub fn parse(&mut self, source_code: &str) -> Result<Tree, ChunkingError> {
        self.parser.parse(source_code, None).ok_or_else(|| {
            ChunkingError::ParseFailure(format!("{} parser produced no tree", self.grammar))
        })
    }

    /// Parse and collect the classified structures in one step
    pub fn parse_structures(
        &mut self,
        source_code: &str,
        options: WalkOptions,
    ) -> Result<StructureMap, ChunkingError> {
        let tree = self.parse(source_code)?;
        Ok(walk(tree.root_node(), self.grammar, source_code, options))
    }
}

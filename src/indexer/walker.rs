//! Depth-bounded traversal that collects classified syntax nodes

use super::classifier::classify;
use super::language::GrammarId;
use crate::types::{StructureCategory, StructureMatch};
use tree_sitter::Node;

/// Deepest level visited by default (the root is level 0)
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// The view of a syntax tree node the walker needs
pub trait SyntaxNode: Sized {
    fn kind(&self) -> &str;
    fn start_byte(&self) -> usize;
    fn end_byte(&self) -> usize;
    /// 1-based
    fn start_line(&self) -> usize;
    /// 1-based, inclusive
    fn end_line(&self) -> usize;
    fn children(&self) -> Vec<Self>;
}

impl<'tree> SyntaxNode for Node<'tree> {
    fn kind(&self) -> &str {
        Node::kind(self)
    }

    fn start_byte(&self) -> usize {
        Node::start_byte(self)
    }

    fn end_byte(&self) -> usize {
        Node::end_byte(self)
    }

    fn start_line(&self) -> usize {
        // Tree-sitter uses 0-indexed rows
        self.start_position().row + 1
    }

    fn end_line(&self) -> usize {
        self.end_position().row + 1
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        Node::children(self, &mut cursor).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Nodes deeper than this are never visited
    pub max_depth: usize,
    /// Record the file-root node itself (it spans the whole file)
    pub include_root: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            include_root: false,
        }
    }
}

/// Matches grouped by category, in the order categories were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureMap {
    groups: Vec<(StructureCategory, Vec<StructureMatch>)>,
}

impl StructureMap {
    pub fn insert(&mut self, found: StructureMatch) {
        match self.groups.iter_mut().find(|(c, _)| *c == found.category) {
            Some((_, matches)) => matches.push(found),
            None => self.groups.push((found.category, vec![found])),
        }
    }

    /// Matches recorded for `category`, in appearance order
    pub fn get(&self, category: StructureCategory) -> &[StructureMatch] {
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(&[], |(_, matches)| matches.as_slice())
    }

    /// Categories in discovery order
    pub fn categories(&self) -> impl Iterator<Item = StructureCategory> + '_ {
        self.groups.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructureMatch> {
        self.groups.iter().flat_map(|(_, matches)| matches.iter())
    }

    /// Total number of matches across all categories
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, matches)| matches.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the map, yielding matches grouped by category discovery order
    pub fn into_matches(self) -> impl Iterator<Item = StructureMatch> {
        self.groups.into_iter().flat_map(|(_, matches)| matches)
    }
}

/// Pre-order walk from `root`, recording every node the grammar's table
/// classifies as significant and whose text is not blank.
///
/// Uses an explicit stack, so deep trees cost heap rather than call stack.
/// Children of matched nodes are still visited; nested matches are kept.
/// Spans that are out of range or split a UTF-8 sequence are skipped.
pub fn walk<N: SyntaxNode>(
    root: N,
    grammar: GrammarId,
    source: &str,
    options: WalkOptions,
) -> StructureMap {
    let mut structures = StructureMap::default();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        debug_assert!(depth <= options.max_depth);

        if depth > 0 || options.include_root {
            let category = classify(node.kind(), grammar);
            if category.is_significant()
                && let Some(text) = source.get(node.start_byte()..node.end_byte())
                && !text.trim().is_empty()
            {
                structures.insert(StructureMatch {
                    category,
                    kind: node.kind().to_string(),
                    text: text.to_string(),
                    start_line: node.start_line(),
                    end_line: node.end_line(),
                    start_byte: node.start_byte(),
                    end_byte: node.end_byte(),
                    depth,
                });
            }
        }

        if depth < options.max_depth {
            // Reversed so the leftmost child is popped first
            let children = node.children();
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
    }

    structures
}

use super::language::resolve;
use crate::types::{Chunk, ChunkKind};

/// Lines per fallback window
pub const DEFAULT_WINDOW_LINES: usize = 50;

/// Leading text of every fallback chunk's marker line
pub const FALLBACK_MARKER: &str = "Fallback chunk for";

/// Strategy for chunking raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStrategy {
    /// Successive windows of at most this many lines
    LineWindow(usize),
    /// Character windows with overlap, snapped back to a newline when one
    /// falls in the second half of the window
    FixedSize { size: usize, overlap: usize },
}

/// A slice of the input text with the lines it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    /// 1-based
    pub start_line: usize,
    /// 1-based, inclusive
    pub end_line: usize,
}

pub struct TextChunker {
    strategy: ChunkStrategy,
}

impl TextChunker {
    pub fn new(strategy: ChunkStrategy) -> Self {
        Self { strategy }
    }

    /// Create a chunker with the fallback strategy (50 lines per window)
    pub fn default_strategy() -> Self {
        Self::new(ChunkStrategy::LineWindow(DEFAULT_WINDOW_LINES))
    }

    pub fn strategy(&self) -> ChunkStrategy {
        self.strategy
    }

    /// Split text according to the strategy
    pub fn split(&self, text: &str) -> Vec<TextSpan> {
        match self.strategy {
            ChunkStrategy::LineWindow(max_lines) => window(text, max_lines),
            ChunkStrategy::FixedSize { size, overlap } => split_fixed_size(text, size, overlap),
        }
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::default_strategy()
    }
}

/// Split text into successive windows of at most `max_lines` lines.
///
/// Lines are split on `\n` only, so `\r` and a trailing empty line stay in
/// the windows and joining the windows with `\n` gives back the input.
/// Blank input yields no windows.
pub fn window(text: &str, max_lines: usize) -> Vec<TextSpan> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let max_lines = max_lines.max(1);
    let lines: Vec<&str> = text.split('\n').collect();

    lines
        .chunks(max_lines)
        .enumerate()
        .map(|(chunk_idx, chunk_lines)| {
            let start_line = chunk_idx * max_lines + 1;
            TextSpan {
                text: chunk_lines.join("\n"),
                start_line,
                end_line: start_line + chunk_lines.len() - 1,
            }
        })
        .collect()
}

/// Build the fallback chunks for a file.
///
/// Each chunk starts with a marker line naming the extension, followed by
/// the window body. The marker uses the language's line comment when the
/// extension is known, `//` otherwise.
pub fn fallback_chunks(text: &str, extension: &str, max_lines: usize) -> Vec<Chunk> {
    let comment = resolve(extension).map_or("//", |grammar| grammar.line_comment());
    let label = fallback_label(extension);

    window(text, max_lines)
        .into_iter()
        .map(|span| {
            let content = format!("{comment} {FALLBACK_MARKER} {label}\n{}", span.text);
            Chunk::new(content, ChunkKind::Fallback, span.start_line, span.end_line)
        })
        .collect()
}

/// Strip the marker line from a fallback chunk's content
pub fn fallback_body(content: &str) -> Option<&str> {
    let (marker, body) = content.split_once('\n')?;
    marker.contains(FALLBACK_MARKER).then_some(body)
}

fn fallback_label(extension: &str) -> String {
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() {
        "plain text".to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Split text into windows of `size` characters overlapping by `overlap`.
///
/// A window that does not reach the end of the text is cut back to its last
/// newline when that newline lies in the second half of the window. Each
/// step advances by at least one character, whatever the overlap.
pub fn split_fixed_size(text: &str, size: usize, overlap: usize) -> Vec<TextSpan> {
    if text.is_empty() {
        return Vec::new();
    }

    let size = size.max(1);
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut spans = Vec::new();

    let mut start = 0;
    // Line number of chars[start]
    let mut start_line = 1;

    loop {
        let mut end = (start + size).min(len);
        if end < len
            && let Some(pos) = chars[start..end].iter().rposition(|&c| c == '\n')
            && pos > size / 2
        {
            end = start + pos;
        }

        let window = &chars[start..end];
        let newlines = window.iter().filter(|&&c| c == '\n').count();
        spans.push(TextSpan {
            text: window.iter().collect(),
            start_line,
            end_line: start_line + newlines,
        });

        if end >= len {
            break;
        }

        let next = end.saturating_sub(overlap);
        let next = if next > start { next } else { end };
        start_line += chars[start..next].iter().filter(|&&c| c == '\n').count();
        start = next;
    }

    spans
}

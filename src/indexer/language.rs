//! Language resolution from file extensions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tree-sitter grammar known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarId {
    Python,
    JavaScript,
    TypeScript,
    Tsx,
    Java,
    Go,
    C,
    Cpp,
    Rust,
    Ruby,
    Php,
    Swift,
    CSharp,
}

impl GrammarId {
    pub const ALL: [GrammarId; 13] = [
        GrammarId::Python,
        GrammarId::JavaScript,
        GrammarId::TypeScript,
        GrammarId::Tsx,
        GrammarId::Java,
        GrammarId::Go,
        GrammarId::C,
        GrammarId::Cpp,
        GrammarId::Rust,
        GrammarId::Ruby,
        GrammarId::Php,
        GrammarId::Swift,
        GrammarId::CSharp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GrammarId::Python => "python",
            GrammarId::JavaScript => "javascript",
            GrammarId::TypeScript => "typescript",
            GrammarId::Tsx => "tsx",
            GrammarId::Java => "java",
            GrammarId::Go => "go",
            GrammarId::C => "c",
            GrammarId::Cpp => "cpp",
            GrammarId::Rust => "rust",
            GrammarId::Ruby => "ruby",
            GrammarId::Php => "php",
            GrammarId::Swift => "swift",
            GrammarId::CSharp => "c_sharp",
        }
    }

    /// Human readable language name
    pub fn display_name(self) -> &'static str {
        match self {
            GrammarId::Python => "Python",
            GrammarId::JavaScript => "JavaScript",
            GrammarId::TypeScript => "TypeScript",
            GrammarId::Tsx => "TypeScript (TSX)",
            GrammarId::Java => "Java",
            GrammarId::Go => "Go",
            GrammarId::C => "C",
            GrammarId::Cpp => "C++",
            GrammarId::Rust => "Rust",
            GrammarId::Ruby => "Ruby",
            GrammarId::Php => "PHP",
            GrammarId::Swift => "Swift",
            GrammarId::CSharp => "C#",
        }
    }

    /// Token that starts a line comment in this language
    pub fn line_comment(self) -> &'static str {
        match self {
            GrammarId::Python | GrammarId::Ruby => "#",
            _ => "//",
        }
    }
}

impl fmt::Display for GrammarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extensions with a structural grammar. `.jsx` shares the JavaScript
/// grammar and the C/C++ headers follow their source counterparts.
pub const EXTENSION_TABLE: &[(&str, GrammarId)] = &[
    ("py", GrammarId::Python),
    ("js", GrammarId::JavaScript),
    ("jsx", GrammarId::JavaScript),
    ("ts", GrammarId::TypeScript),
    ("tsx", GrammarId::Tsx),
    ("java", GrammarId::Java),
    ("go", GrammarId::Go),
    ("c", GrammarId::C),
    ("h", GrammarId::C),
    ("cpp", GrammarId::Cpp),
    ("cc", GrammarId::Cpp),
    ("cxx", GrammarId::Cpp),
    ("hpp", GrammarId::Cpp),
    ("rs", GrammarId::Rust),
    ("rb", GrammarId::Ruby),
    ("php", GrammarId::Php),
    ("swift", GrammarId::Swift),
    ("cs", GrammarId::CSharp),
];

/// Map a file extension (leading dot optional, any case) to its grammar.
///
/// Unknown extensions return `None`, which callers treat as "fallback only".
pub fn resolve(extension: &str) -> Option<GrammarId> {
    let ext = extension.trim_start_matches('.');
    EXTENSION_TABLE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|&(_, grammar)| grammar)
}

/// Detect a human readable language name for chunk metadata.
///
/// Covers every grammar-backed extension plus the text formats the indexer
/// accepts without a grammar.
pub fn detect_language(extension: &str) -> Option<String> {
    if let Some(grammar) = resolve(extension) {
        return Some(grammar.display_name().to_string());
    }

    let lang = match extension.trim_start_matches('.').to_lowercase().as_str() {
        "kt" => "Kotlin",
        "scala" => "Scala",
        "r" => "R",
        "md" => "Markdown",
        "txt" => "Text",
        "json" => "JSON",
        "yaml" | "yml" => "YAML",
        "xml" => "XML",
        "html" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "sql" => "SQL",
        "sh" | "bash" | "zsh" => "Shell",
        "ps1" => "PowerShell",
        "dockerfile" => "Dockerfile",
        "tf" | "hcl" => "HCL",
        "proto" => "Protocol Buffers",
        "graphql" => "GraphQL",
        "vue" => "Vue",
        "svelte" => "Svelte",
        "astro" => "Astro",
        _ => return None,
    };

    Some(lang.to_string())
}

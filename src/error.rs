/// Centralized error types for ast-chunker using thiserror
///
/// Structural extraction never surfaces its failures to callers: every
/// [`ChunkingError`] is a routing signal toward fallback windowing. The other
/// types cover the I/O shell around the core (config, directory indexing).
use thiserror::Error;

/// Main error type for the chunker
#[derive(Error, Debug)]
pub enum ChunkerError {
    #[error("Chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarLoadError),

    #[error("Indexing error: {0}")]
    Indexing(#[from] IndexingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Reasons structural extraction gave up on a file.
///
/// Each variant routes the file to the fallback windower.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkingError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Grammar '{grammar}' unavailable: {reason}")]
    GrammarLoadFailure { grammar: String, reason: String },

    #[error("Failed to parse code: {0}")]
    ParseFailure(String),

    #[error("No structural matches found")]
    NoStructuralMatches,
}

/// A grammar could not be loaded or is incompatible with the linked runtime
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load grammar '{grammar}': {reason}")]
pub struct GrammarLoadError {
    pub grammar: String,
    pub reason: String,
}

impl GrammarLoadError {
    pub fn new(grammar: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            grammar: grammar.into(),
            reason: reason.into(),
        }
    }
}

impl From<GrammarLoadError> for ChunkingError {
    fn from(err: GrammarLoadError) -> Self {
        ChunkingError::GrammarLoadFailure {
            grammar: err.grammar,
            reason: err.reason,
        }
    }
}

/// Errors related to directory indexing
#[derive(Error, Debug)]
pub enum IndexingError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to read file '{file}': {reason}")]
    FileReadFailed { file: String, reason: String },

    #[error("File size exceeds maximum: {size} > {max}")]
    FileTooLarge { size: usize, max: usize },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Describe a caught panic payload, e.g. `"parser panicked: boom"`
pub(crate) fn panic_message(context: &str, payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str));

    match detail {
        Some(msg) => format!("{} panicked: {}", context, msg),
        None => format!("{} panicked", context),
    }
}

// Conversion from anyhow::Error to ChunkerError
impl From<anyhow::Error> for ChunkerError {
    fn from(err: anyhow::Error) -> Self {
        ChunkerError::Other(format!("{:#}", err))
    }
}

impl ChunkerError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        ChunkerError::Other(msg.into())
    }

    /// Check if this is a user error (bad input or config) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ChunkerError::Config(ConfigError::InvalidValue { .. })
                | ChunkerError::Indexing(
                    IndexingError::DirectoryNotFound(_) | IndexingError::NotADirectory(_)
                )
        )
    }
}

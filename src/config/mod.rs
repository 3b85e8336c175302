/// Configuration system for ast-chunker
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::{ChunkerError, ConfigError};
use crate::indexer::chunker::DEFAULT_WINDOW_LINES;
use crate::indexer::walker::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "AST_CHUNKER_";

/// Hard ceiling for `chunking.max_depth`
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Structural and fallback chunking
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Directory indexing
    #[serde(default)]
    pub indexing: IndexingConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Deepest syntax tree level visited (the file root is level 0)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Lines per fallback window
    #[serde(default = "default_window_lines")]
    pub window_lines: usize,

    /// Emit the whole-file root node as a module chunk
    #[serde(default)]
    pub include_file_root: bool,

    /// Characters per fixed-size chunk
    #[serde(default = "default_fixed_chunk_size")]
    pub fixed_chunk_size: usize,

    /// Characters shared by consecutive fixed-size chunks
    #[serde(default = "default_fixed_overlap")]
    pub fixed_overlap: usize,
}

/// Indexing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Maximum file size to index (in bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// File extensions to index, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Default include patterns
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Default exclude patterns
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Also emit fixed-size chunks for every indexed file
    #[serde(default)]
    pub fixed_size_chunks: bool,
}

// Default value functions
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_window_lines() -> usize {
    DEFAULT_WINDOW_LINES
}

fn default_fixed_chunk_size() -> usize {
    1000
}

fn default_fixed_overlap() -> usize {
    200
}

fn default_max_file_size() -> usize {
    1_048_576 // 1 MB
}

fn default_extensions() -> Vec<String> {
    [
        "py", "js", "jsx", "ts", "tsx", "java", "cpp", "c", "h", "hpp", "cs", "go", "rs", "rb",
        "php", "swift", "kt", "scala", "r", "md", "txt", "json", "yaml", "yml", "xml", "html",
        "css", "scss", "sql", "sh", "bash", "zsh", "ps1", "dockerfile", "tf", "hcl", "proto",
        "graphql", "vue", "svelte", "astro",
    ]
    .iter()
    .map(|ext| ext.to_string())
    .collect()
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "__pycache__".to_string(),
        "venv".to_string(),
        "env".to_string(),
        ".venv".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "target".to_string(),
    ]
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            window_lines: default_window_lines(),
            include_file_root: false,
            fixed_chunk_size: default_fixed_chunk_size(),
            fixed_overlap: default_fixed_overlap(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            extensions: default_extensions(),
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
            fixed_size_chunks: false,
        }
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> ChunkerError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
    .into()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, ChunkerError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, ChunkerError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ChunkerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ChunkerError> {
        let chunking = &self.chunking;

        if chunking.max_depth == 0 || chunking.max_depth > MAX_DEPTH_LIMIT {
            return Err(invalid(
                "chunking.max_depth",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_DEPTH_LIMIT, chunking.max_depth
                ),
            ));
        }

        if chunking.window_lines == 0 {
            return Err(invalid("chunking.window_lines", "must be greater than 0"));
        }

        if chunking.fixed_chunk_size == 0 {
            return Err(invalid("chunking.fixed_chunk_size", "must be greater than 0"));
        }

        if chunking.fixed_overlap >= chunking.fixed_chunk_size {
            return Err(invalid(
                "chunking.fixed_overlap",
                format!(
                    "must be smaller than chunking.fixed_chunk_size ({}), got {}",
                    chunking.fixed_chunk_size, chunking.fixed_overlap
                ),
            ));
        }

        if self.indexing.max_file_size == 0 {
            return Err(invalid("indexing.max_file_size", "must be greater than 0"));
        }

        if self.indexing.extensions.is_empty() {
            return Err(invalid("indexing.extensions", "must list at least one extension"));
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`, keyed by the full variable name
    /// (`AST_CHUNKER_MAX_DEPTH`, ...). Unparsable numbers are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(depth) = var("MAX_DEPTH")
            && let Ok(depth) = depth.parse()
        {
            self.chunking.max_depth = depth;
        }

        if let Some(lines) = var("WINDOW_LINES")
            && let Ok(lines) = lines.parse()
        {
            self.chunking.window_lines = lines;
        }

        if let Some(include_root) = var("INCLUDE_FILE_ROOT")
            && let Ok(include_root) = include_root.parse()
        {
            self.chunking.include_file_root = include_root;
        }

        if let Some(size) = var("FIXED_CHUNK_SIZE")
            && let Ok(size) = size.parse()
        {
            self.chunking.fixed_chunk_size = size;
        }

        if let Some(overlap) = var("FIXED_OVERLAP")
            && let Ok(overlap) = overlap.parse()
        {
            self.chunking.fixed_overlap = overlap;
        }

        if let Some(size) = var("MAX_FILE_SIZE")
            && let Ok(size) = size.parse()
        {
            self.indexing.max_file_size = size;
        }

        if let Some(extensions) = var("EXTENSIONS") {
            self.indexing.extensions = split_list(&extensions)
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();
        }

        if let Some(patterns) = var("EXCLUDE_PATTERNS") {
            self.indexing.exclude_patterns = split_list(&patterns);
        }

        if let Some(fixed) = var("FIXED_SIZE_CHUNKS")
            && let Ok(fixed) = fixed.parse()
        {
            self.indexing.fixed_size_chunks = fixed;
        }
    }

    /// Load from an explicit file or the default location, then apply
    /// environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self, ChunkerError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::load_or_default()?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, ChunkerError> {
        Self::load(None)
    }
}

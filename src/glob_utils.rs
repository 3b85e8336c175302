//! Glob pattern matching utilities for path filtering

use crate::error::ConfigError;
use globset::{Glob, GlobMatcher};

/// Compile glob patterns into matchers for repeated matching
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<GlobMatcher>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Glob::new(pattern)
                .map(|g| g.compile_matcher())
                .map_err(|e| ConfigError::InvalidValue {
                    key: "patterns".to_string(),
                    reason: format!("invalid glob '{}': {}", pattern, e),
                })
        })
        .collect()
}

/// Whether `matcher` accepts the path, one of its suffixes, or one of its
/// components.
///
/// Suffix matching lets `lib/**` match `/project/lib/a.rs`; component
/// matching lets a bare name such as `node_modules` or `*.min.js` match
/// at any depth.
pub fn matches_path(path: &str, matcher: &GlobMatcher) -> bool {
    let path = path.trim_start_matches('/');
    if matcher.is_match(path) {
        return true;
    }

    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    parts.iter().any(|part| matcher.is_match(part))
        || (1..parts.len()).any(|i| matcher.is_match(parts[i..].join("/")))
}

/// Check if a path matches any of the precompiled glob matchers
pub fn matches_any_matcher(path: &str, matchers: &[GlobMatcher]) -> bool {
    matchers.iter().any(|matcher| matches_path(path, matcher))
}

/// Include/exclude filter over `/`-separated relative paths
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<GlobMatcher>,
    exclude: Vec<GlobMatcher>,
}

impl PathFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        matches_any_matcher(path, &self.exclude)
    }

    /// No include patterns means every path is included
    pub fn is_included(&self, path: &str) -> bool {
        self.include.is_empty() || matches_any_matcher(path, &self.include)
    }

    pub fn allows(&self, path: &str) -> bool {
        self.is_included(path) && !self.is_excluded(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &[&str], exclude: &[&str]) -> PathFilter {
        let to_vec = |p: &[&str]| p.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        PathFilter::new(&to_vec(include), &to_vec(exclude)).unwrap()
    }

    #[test]
    fn test_matches_directory_glob() {
        let f = filter(&["lib/**"], &[]);

        assert!(f.is_included("/project/lib/utils.ts"));
        assert!(f.is_included("lib/nested/file.rs"));
        assert!(!f.is_included("/project/src/main.rs"));
    }

    #[test]
    fn test_matches_extension_glob() {
        let f = filter(&["**/*.ts"], &[]);

        assert!(f.is_included("/project/src/main.ts"));
        assert!(f.is_included("utils.ts"));
        assert!(!f.is_included("/project/src/main.rs"));
    }

    #[test]
    fn test_bare_name_excludes_at_any_depth() {
        let f = filter(&[], &["node_modules", "*.min.js"]);

        assert!(f.is_excluded("node_modules/react/index.js"));
        assert!(f.is_excluded("web/node_modules/a.js"));
        assert!(f.is_excluded("static/app.min.js"));
        assert!(!f.is_excluded("src/node_modules_helper.js"));
        assert!(!f.is_excluded("static/app.js"));
    }

    #[test]
    fn test_empty_include_allows_everything() {
        let f = filter(&[], &[]);
        assert!(f.allows("/any/path.rs"));
    }

    #[test]
    fn test_include_and_exclude() {
        let f = filter(&["src/**"], &["**/generated/**"]);

        assert!(f.allows("src/lib.rs"));
        assert!(!f.allows("src/generated/schema.rs"));
        assert!(!f.allows("docs/readme.md"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = PathFilter::new(&["[invalid".to_string()], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("[invalid"));
    }

    #[test]
    fn test_compile_patterns() {
        let patterns = vec!["lib/**".to_string(), "**/*.rs".to_string()];
        let matchers = compile_patterns(&patterns).unwrap();

        assert_eq!(matchers.len(), 2);
        assert!(matches_any_matcher("/project/lib/utils.ts", &matchers));
        assert!(matches_any_matcher("/project/src/main.rs", &matchers));
        assert!(!matches_any_matcher("/project/test.txt", &matchers));
    }

    #[test]
    fn test_specific_file_pattern() {
        let matchers = compile_patterns(&["**/test.rs".to_string()]).unwrap();

        assert!(matches_any_matcher("/project/src/test.rs", &matchers));
        assert!(matches_any_matcher("test.rs", &matchers));
        assert!(!matches_any_matcher("/project/src/main.rs", &matchers));
    }
}

//! Lazily loaded, process-wide cache of tree-sitter grammars

use super::language::GrammarId;
use crate::error::{GrammarLoadError, panic_message};
use std::collections::HashMap;
use std::panic::catch_unwind;
use std::sync::{PoisonError, RwLock};
use tree_sitter::{Language, Parser};

/// Function that produces a grammar for an id
pub type GrammarLoader = fn(GrammarId) -> Result<Language, GrammarLoadError>;

/// Caches one loaded grammar per [`GrammarId`].
///
/// A grammar is loaded at most once per registry, including when the load
/// fails: the error is cached so a broken grammar is reported a single time
/// instead of once per file. Share the registry across threads behind an
/// `Arc`; lookups after warm-up only take the read lock.
pub struct GrammarRegistry {
    loader: GrammarLoader,
    cache: RwLock<HashMap<GrammarId, Result<Language, GrammarLoadError>>>,
}

impl GrammarRegistry {
    /// Registry backed by the grammars compiled into this crate
    pub fn new() -> Self {
        Self::with_loader(load_builtin)
    }

    /// Registry backed by a custom loader
    pub fn with_loader(loader: GrammarLoader) -> Self {
        Self {
            loader,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Get the grammar for `id`, loading it on first use
    pub fn get(&self, id: GrammarId) -> Result<Language, GrammarLoadError> {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = cache.get(&id) {
                return entry.clone();
            }
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have loaded it while we waited for the write lock
        if let Some(entry) = cache.get(&id) {
            return entry.clone();
        }

        // A panicking loader is cached as a failure like any other
        let loader = self.loader;
        let loaded = catch_unwind(move || loader(id)).unwrap_or_else(|panic| {
            Err(GrammarLoadError::new(
                id.as_str(),
                panic_message("loader", panic.as_ref()),
            ))
        });
        match &loaded {
            Ok(_) => tracing::debug!("Loaded grammar: {}", id),
            Err(e) => tracing::warn!(
                "Grammar '{}' failed to load, its files will use fallback chunking: {}",
                id,
                e.reason
            ),
        }
        cache.insert(id, loaded.clone());
        loaded
    }

    /// Number of grammar ids that have been requested (loaded or failed)
    pub fn cached_count(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether a load has been attempted for `id`
    pub fn is_cached(&self, id: GrammarId) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Load one of the grammars linked into this crate.
///
/// The grammar is installed into a throwaway parser so that an ABI mismatch
/// between the grammar and the tree-sitter runtime is reported here rather
/// than at parse time.
pub fn load_builtin(id: GrammarId) -> Result<Language, GrammarLoadError> {
    let language: Language = match id {
        GrammarId::Python => tree_sitter_python::LANGUAGE.into(),
        GrammarId::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        GrammarId::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        GrammarId::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        GrammarId::Java => tree_sitter_java::LANGUAGE.into(),
        GrammarId::Go => tree_sitter_go::LANGUAGE.into(),
        GrammarId::C => tree_sitter_c::LANGUAGE.into(),
        GrammarId::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        GrammarId::Rust => tree_sitter_rust::LANGUAGE.into(),
        GrammarId::Ruby => tree_sitter_ruby::LANGUAGE.into(),
        GrammarId::Php => tree_sitter_php::LANGUAGE_PHP.into(),
        GrammarId::Swift => tree_sitter_swift::LANGUAGE.into(),
        GrammarId::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
    };

    Parser::new()
        .set_language(&language)
        .map_err(|e| GrammarLoadError::new(id.as_str(), e.to_string()))?;

    Ok(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_every_builtin_grammar_loads() {
        let registry = GrammarRegistry::new();
        for id in GrammarId::ALL {
            assert!(registry.get(id).is_ok(), "grammar {} failed to load", id);
        }
        assert_eq!(registry.cached_count(), GrammarId::ALL.len());
    }

    #[test]
    fn test_lazy_loading() {
        let registry = GrammarRegistry::new();
        assert_eq!(registry.cached_count(), 0);
        assert!(!registry.is_cached(GrammarId::Rust));

        registry.get(GrammarId::Rust).unwrap();
        assert!(registry.is_cached(GrammarId::Rust));
        assert!(!registry.is_cached(GrammarId::Python));
        assert_eq!(registry.cached_count(), 1);
    }

    static FAILING_LOADS: AtomicUsize = AtomicUsize::new(0);

    fn failing_loader(id: GrammarId) -> Result<Language, GrammarLoadError> {
        FAILING_LOADS.fetch_add(1, Ordering::SeqCst);
        Err(GrammarLoadError::new(id.as_str(), "missing binding"))
    }

    #[test]
    fn test_load_failure_is_cached() {
        let registry = GrammarRegistry::with_loader(failing_loader);
        let before = FAILING_LOADS.load(Ordering::SeqCst);

        let first = registry.get(GrammarId::Go).unwrap_err();
        let second = registry.get(GrammarId::Go).unwrap_err();

        assert_eq!(first, second);
        assert_eq!(first.grammar, "go");
        assert_eq!(FAILING_LOADS.load(Ordering::SeqCst) - before, 1);
    }

    static PANICKING_LOADS: AtomicUsize = AtomicUsize::new(0);

    fn panicking_loader(_: GrammarId) -> Result<Language, GrammarLoadError> {
        PANICKING_LOADS.fetch_add(1, Ordering::SeqCst);
        panic!("corrupt grammar module");
    }

    #[test]
    fn test_loader_panic_is_cached_as_failure() {
        let registry = GrammarRegistry::with_loader(panicking_loader);

        let first = registry.get(GrammarId::Ruby).unwrap_err();
        let second = registry.get(GrammarId::Ruby).unwrap_err();

        assert_eq!(first, second);
        assert_eq!(first.grammar, "ruby");
        assert_eq!(first.reason, "loader panicked: corrupt grammar module");
        assert_eq!(PANICKING_LOADS.load(Ordering::SeqCst), 1);

        // The lock is still usable after the panic
        assert!(registry.is_cached(GrammarId::Ruby));
        assert_eq!(registry.cached_count(), 1);
    }

    static CONCURRENT_LOADS: AtomicUsize = AtomicUsize::new(0);

    fn counting_loader(id: GrammarId) -> Result<Language, GrammarLoadError> {
        CONCURRENT_LOADS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(5));
        load_builtin(id)
    }

    #[test]
    fn test_concurrent_first_use_initializes_once() {
        let registry = Arc::new(GrammarRegistry::with_loader(counting_loader));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.get(GrammarId::Python).is_ok())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(CONCURRENT_LOADS.load(Ordering::SeqCst), 1);
    }
}

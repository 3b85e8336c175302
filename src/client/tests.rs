use super::*;
use std::fs;
use tempfile::TempDir;

fn create_test_client() -> ChunkClient {
    ChunkClient::with_config(Config::default()).unwrap()
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// ===== Client Initialization Tests =====

#[test]
fn test_with_config_rejects_invalid_config() {
    let mut config = Config::default();
    config.chunking.window_lines = 0;

    let result = ChunkClient::with_config(config);
    assert!(result.is_err());
    assert!(result.err().unwrap().is_user_error());
}

#[test]
fn test_config_flows_into_extractor() {
    let mut config = Config::default();
    config.chunking.max_depth = 3;
    config.chunking.window_lines = 7;

    let client = ChunkClient::with_config(config).unwrap();
    let options = client.extractor().options();
    assert_eq!(options.max_depth, 3);
    assert_eq!(options.window_lines, 7);
    assert_eq!(client.config().chunking.window_lines, 7);
}

#[test]
fn test_client_clone_shares_registry() {
    let client = create_test_client();
    let cloned = client.clone();

    cloned.chunk_source(&SourceFile::new("a.go", "package main\n\nfunc main() {}\n"));

    assert!(
        client
            .extractor()
            .registry()
            .is_cached(crate::indexer::GrammarId::Go)
    );
}

// ===== chunk_source / chunk_path Tests =====

#[test]
fn test_chunk_source() {
    let client = create_test_client();
    let chunks = client.chunk_source(&SourceFile::new(
        "app.js",
        "import x from 'x';\nfunction run() { return x; }\n",
    ));

    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| !c.kind.is_fallback()));
}

#[test]
fn test_chunk_path_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let content = "class Greeter:\n    def greet(self):\n        return 'hi'\n";
    write(temp_dir.path(), "greeter.py", content);

    let client = create_test_client();
    let chunks = client
        .chunk_path(temp_dir.path().join("greeter.py"), None)
        .unwrap();

    // The class and the method nested in it
    assert_eq!(chunks.len(), 2);
    let first = &chunks[0].metadata;
    assert_eq!(first.file_path, "greeter.py");
    assert_eq!(first.extension.as_deref(), Some("py"));
    assert_eq!(first.language.as_deref(), Some("Python"));
    assert_eq!(first.file_size, content.len());
    assert_eq!(first.file_hash, calculate_hash(content));
    assert_eq!(first.chunk_type, "ast");
    assert_eq!(first.category.as_deref(), Some("classes"));
    assert_eq!(first.chunk_index, 0);
    assert_eq!(first.total_chunks, 2);
    assert_eq!(first.chunk_size, chunks[0].content.len());
    assert_eq!(chunks[1].metadata.category.as_deref(), Some("functions"));
    assert_eq!(chunks[1].metadata.start_line, 2);
}

#[test]
fn test_chunk_path_extension_override() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "build_script", "fn main() {}\n");

    let client = create_test_client();

    let plain = client
        .chunk_path(temp_dir.path().join("build_script"), None)
        .unwrap();
    assert_eq!(plain[0].metadata.chunk_type, "fallback");
    assert_eq!(plain[0].metadata.extension, None);

    let as_rust = client
        .chunk_path(temp_dir.path().join("build_script"), Some(".rs"))
        .unwrap();
    assert_eq!(as_rust[0].metadata.chunk_type, "ast");
    assert_eq!(as_rust[0].metadata.extension.as_deref(), Some("rs"));
}

#[test]
fn test_chunk_path_too_large() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "big.txt", &"x".repeat(200));

    let mut config = Config::default();
    config.indexing.max_file_size = 100;
    let client = ChunkClient::with_config(config).unwrap();

    let err = client
        .chunk_path(temp_dir.path().join("big.txt"), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ChunkerError::Indexing(IndexingError::FileTooLarge { size: 200, max: 100 })
    ));
}

#[test]
fn test_chunk_path_missing_file() {
    let client = create_test_client();
    let err = client
        .chunk_path("/nonexistent/file/12345.rs", None)
        .unwrap_err();
    assert!(matches!(
        err,
        ChunkerError::Indexing(IndexingError::FileReadFailed { .. })
    ));
}

#[test]
fn test_chunk_path_invalid_utf8() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bad.rs"), [0xFF, 0xFE, 0xFD]).unwrap();

    let client = create_test_client();
    let err = client
        .chunk_path(temp_dir.path().join("bad.rs"), None)
        .unwrap_err();
    assert!(err.to_string().contains("bad.rs"));
}

// ===== index_directory Tests =====

#[test]
fn test_index_directory_stats() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/lib.rs", "use std::fmt;\n\nfn a() {}\n");
    write(temp_dir.path(), "src/util.py", "x = 1\n");
    write(temp_dir.path(), "README.md", "# Title\n\nSome text\n");
    write(temp_dir.path(), "empty.go", "   \n");
    write(temp_dir.path(), "logo.png", "not really a png");
    write(temp_dir.path(), "node_modules/dep/index.js", "function dep() {}");

    let client = create_test_client();
    let response = client.index_directory(temp_dir.path()).unwrap();
    let stats = &response.stats;

    assert_eq!(stats.total_files, 4);
    assert_eq!(stats.indexed_files, 3);
    // empty.go plus logo.png (extension not allowed)
    assert_eq!(stats.skipped_files, 2);
    assert_eq!(stats.structural_files, 1);
    assert_eq!(stats.fallback_files, 2);
    assert_eq!(stats.ast_chunks, 2);
    assert_eq!(stats.fallback_chunks, 2);
    assert_eq!(stats.fixed_chunks, 0);
    assert_eq!(response.chunks.len(), stats.total_chunks());

    assert!(
        response
            .chunks
            .iter()
            .all(|c| !c.metadata.file_path.contains("node_modules"))
    );
    let repo_name = temp_dir
        .path()
        .canonicalize()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert!(response.chunks.iter().all(|c| c.metadata.repo_name == repo_name));
}

#[test]
fn test_index_directory_chunk_order_follows_files() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "b.rs", "fn b() {}\n");
    write(temp_dir.path(), "a.rs", "fn a() {}\n");

    let response = create_test_client()
        .index_directory(temp_dir.path())
        .unwrap();

    let paths: Vec<&str> = response
        .chunks
        .iter()
        .map(|c| c.metadata.file_path.as_str())
        .collect();
    assert_eq!(paths, vec!["a.rs", "b.rs"]);
}

#[test]
fn test_index_directory_with_fixed_chunks() {
    let temp_dir = TempDir::new().unwrap();
    let body: String = (0..40)
        .map(|i| format!("def f{}():\n    return {}\n\n", i, i))
        .collect();
    write(temp_dir.path(), "many.py", &body);

    let mut config = Config::default();
    config.indexing.fixed_size_chunks = true;
    config.chunking.fixed_chunk_size = 200;
    config.chunking.fixed_overlap = 20;
    let client = ChunkClient::with_config(config).unwrap();

    let response = client.index_directory(temp_dir.path()).unwrap();

    assert_eq!(response.stats.ast_chunks, 40);
    assert!(response.stats.fixed_chunks > 1);

    let fixed: Vec<_> = response
        .chunks
        .iter()
        .filter(|c| c.metadata.chunk_type == "fixed")
        .collect();
    for (i, chunk) in fixed.iter().enumerate() {
        assert_eq!(chunk.metadata.chunk_index, i);
        assert_eq!(chunk.metadata.total_chunks, fixed.len());
        assert!(chunk.content.chars().count() <= 200);
        assert_eq!(chunk.metadata.category, None);
    }
}

#[test]
fn test_index_directory_missing() {
    let err = create_test_client()
        .index_directory("/nonexistent/path/12345")
        .unwrap_err();
    assert!(err.is_user_error());
}

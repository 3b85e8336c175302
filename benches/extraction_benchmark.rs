/// Benchmarks for extraction and directory indexing
use ast_chunker::indexer::AstChunkExtractor;
use ast_chunker::indexer::chunker::window;
use ast_chunker::{ChunkClient, Config, SourceFile};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tempfile::TempDir;

fn rust_module(i: usize) -> String {
    format!(
        r#"
use std::fmt;

/// Module {i}
pub mod module_{i} {{
    pub fn function_{i}(x: i32) -> i32 {{
        x * {}
    }}

    pub struct Data{i} {{
        pub value: i32,
        pub name: String,
    }}

    impl Data{i} {{
        pub fn new(value: i32) -> Self {{
            Self {{
                value,
                name: format!("data_{{}}", value),
            }}
        }}

        pub fn process(&self) -> i32 {{
            self.value * 2
        }}
    }}
}}
"#,
        i + 1
    )
}

fn create_test_files(dir: &TempDir, count: usize) -> std::io::Result<()> {
    let src_dir = dir.path().join("src");
    std::fs::create_dir_all(&src_dir)?;

    for i in 0..count {
        std::fs::write(src_dir.join(format!("module_{}.rs", i)), rust_module(i))?;
    }

    Ok(())
}

fn benchmark_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let extractor = AstChunkExtractor::default();

    for modules in [1, 10, 50] {
        let content: String = (0..modules).map(rust_module).collect();
        let source = SourceFile::new("bench.rs", content);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_modules", modules)),
            &source,
            |b, source| b.iter(|| extractor.extract(black_box(source))),
        );
    }

    group.finish();
}

fn benchmark_fallback(c: &mut Criterion) {
    let text: String = (0..10_000)
        .map(|i| format!("plain text line number {}\n", i))
        .collect();

    c.bench_function("fallback_window_10k_lines", |b| {
        b.iter(|| window(black_box(&text), 50))
    });
}

fn benchmark_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");
    group.sample_size(10);

    for file_count in [10, 100] {
        let dir = TempDir::new().unwrap();
        create_test_files(&dir, file_count).unwrap();
        let client = ChunkClient::with_config(Config::default()).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_files", file_count)),
            &dir,
            |b, dir| b.iter(|| client.index_directory(dir.path()).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_extraction,
    benchmark_fallback,
    benchmark_indexing
);
criterion_main!(benches);

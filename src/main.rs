use anyhow::{Context, Result};
use ast_chunker::indexer::GrammarId;
use ast_chunker::indexer::language::EXTENSION_TABLE;
use ast_chunker::{ChunkClient, Config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser)]
#[command(name = "ast-chunker")]
#[command(about = "Split source files into structural chunks", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "AST_CHUNKER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging (stdout is reserved for JSON)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a single file and print the chunks as JSON
    Chunk {
        file: PathBuf,

        /// Treat the file as having this extension
        #[arg(long)]
        extension: Option<String>,
    },

    /// Chunk every eligible file under a directory
    Index {
        dir: PathBuf,

        /// Also emit fixed-size chunks
        #[arg(long)]
        fixed: bool,

        /// Write the JSON result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported languages and their extensions
    Languages,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Languages => {
            print_languages();
            Ok(())
        }
        Commands::Chunk { file, extension } => {
            let client = ChunkClient::with_config(load_config(cli.config)?)?;
            let chunks = client
                .chunk_path(&file, extension.as_deref())
                .with_context(|| format!("Failed to chunk {}", file.display()))?;
            println!("{}", serde_json::to_string_pretty(&chunks)?);
            Ok(())
        }
        Commands::Index { dir, fixed, output } => {
            let mut config = load_config(cli.config)?;
            if fixed {
                config.indexing.fixed_size_chunks = true;
            }

            let client = ChunkClient::with_config(config)?;
            let response = client
                .index_directory(&dir)
                .with_context(|| format!("Failed to index {}", dir.display()))?;
            let json = serde_json::to_string_pretty(&response)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} chunks to {}", response.chunks.len(), path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    Config::load(path.as_deref()).context("Failed to load configuration")
}

fn print_languages() {
    for grammar in GrammarId::ALL {
        let extensions: Vec<String> = EXTENSION_TABLE
            .iter()
            .filter(|(_, g)| *g == grammar)
            .map(|(ext, _)| format!(".{}", ext))
            .collect();
        println!(
            "{:<12} {:<12} {}",
            grammar.display_name(),
            grammar.as_str(),
            extensions.join(" ")
        );
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docfind_core::{BlockId, IndexEntry};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// An extracted document's content.json, as produced by the extraction
/// pipeline: one record per layout block.
#[derive(Debug, Deserialize)]
struct ContentFile {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(default)]
    id: Option<BlockId>,
    #[serde(default)]
    page_index: u32,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Parser)]
#[command(name = "docfind-indexer")]
#[command(about = "Build the search index from extracted documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build search-index.json from a directory of extracted documents
    /// (one content.json per document) or a single content.json file
    Build {
        /// Input path (directory or content.json file)
        #[arg(long)]
        input: String,
        /// Output path for the index file
        #[arg(long, default_value = "./search-index.json")]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_index(Path::new(&input), Path::new(&output)),
    }
}

fn build_index(input: &Path, output: &Path) -> Result<()> {
    let mut entries: Vec<IndexEntry> = Vec::new();
    let mut num_docs = 0usize;

    for (name, path) in collect_documents(input)? {
        let doc_entries = index_document(&name, &path)
            .with_context(|| format!("indexing {}", path.display()))?;
        tracing::info!(document = %name, blocks = doc_entries.len(), "indexed document");
        entries.extend(doc_entries);
        num_docs += 1;
    }

    let f = File::create(output)
        .with_context(|| format!("creating index file {}", output.display()))?;
    serde_json::to_writer(BufWriter::new(f), &entries)?;

    tracing::info!(num_docs, entries = entries.len(), output = %output.display(), "index build complete");
    Ok(())
}

/// A directory input holds one subdirectory per document, each with a
/// content.json; the document takes its directory's name. A file input is
/// a single document named by its file stem.
fn collect_documents(input: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut docs: Vec<(String, PathBuf)> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && p.file_name().and_then(|s| s.to_str()) == Some("content.json") {
                let name = p
                    .parent()
                    .and_then(|d| d.file_name())
                    .and_then(|s| s.to_str())
                    .unwrap_or("document")
                    .to_string();
                docs.push((name, p.to_path_buf()));
            }
        }
    } else {
        let name = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string();
        docs.push((name, input.to_path_buf()));
    }
    Ok(docs)
}

fn index_document(name: &str, path: &Path) -> Result<Vec<IndexEntry>> {
    let f = File::open(path)?;
    let content: ContentFile = serde_json::from_reader(BufReader::new(f))?;

    let mut entries = Vec::new();
    for block in content.blocks {
        let Some(text) = block.text else { continue };
        if text.is_empty() {
            continue;
        }
        entries.push(IndexEntry {
            document: name.to_string(),
            page: block.page_index,
            block_id: block.id.unwrap_or_default(),
            role: block.role,
            text,
        });
    }
    Ok(entries)
}

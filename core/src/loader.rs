use crate::IndexEntry;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// File name the index is published under, next to the rendered documents.
pub const INDEX_FILE: &str = "search-index.json";

/// Load the search index from a JSON array file. Called once at startup;
/// on error the caller logs and carries on with an empty index.
pub fn load_index<P: AsRef<Path>>(path: P) -> Result<Vec<IndexEntry>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening index file {}", path.display()))?;
    let reader = BufReader::new(f);
    let raw: Vec<serde_json::Value> =
        serde_json::from_reader(reader).context("index file is not a JSON array")?;
    Ok(parse_entries(raw))
}

/// Deserialize records one by one so a malformed record (missing `document`
/// or `text`, wrong types) is skipped with a warning instead of failing the
/// whole load.
pub fn parse_entries(raw: Vec<serde_json::Value>) -> Vec<IndexEntry> {
    let mut entries = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;
    for value in raw {
        match serde_json::from_value::<IndexEntry>(value) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                skipped += 1;
                tracing::warn!(%err, "skipping malformed index record");
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, kept = entries.len(), "index contained malformed records");
    }
    entries
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Block identifier as it appears in the index file: either a JSON string
/// or a JSON number, depending on how the extractor labelled the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockId {
    Number(u64),
    Text(String),
}

impl Default for BlockId {
    fn default() -> Self {
        BlockId::Text(String::new())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Number(n) => write!(f, "{n}"),
            BlockId::Text(s) => f.write_str(s),
        }
    }
}

/// One searchable text block of a rendered document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub document: String,
    /// Zero-based page number within the document.
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub block_id: BlockId,
    /// Block role (Title/Text/List/...) as assigned by the extractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub text: String,
}

/// A matched entry plus its highlighted preview snippet. Built per query,
/// never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub document: String,
    /// Zero-based, same as the matched entry. Presenters render `page + 1`.
    pub page: u32,
    pub block_id: BlockId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// HTML-bearing excerpt: escaped text with `<strong>` around matches.
    pub preview: String,
}

use crate::presenter::html_escape;
use crate::{IndexEntry, SearchResult};
use regex::RegexBuilder;

/// Queries shorter than this hide the panel instead of searching.
pub const MIN_QUERY_LEN: usize = 2;
/// Matches past this cap are silently dropped.
pub const RESULT_CAP: usize = 20;
/// Preview context on each side of the match, in chars.
const CONTEXT_CHARS: usize = 50;
/// Preview length when the match cannot be located (fallback only).
const FALLBACK_CHARS: usize = 100;
const ELLIPSIS: &str = "...";

/// The loaded index. Written once at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    /// Degraded mode after a failed load: every search yields zero results.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring scan over the index, in insertion order.
    /// Stops after `RESULT_CAP` matches. An unloaded index yields an empty
    /// vec, not an error.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }
        let mut results = Vec::new();
        for entry in &self.entries {
            if find_case_insensitive(&entry.text, query).is_none() {
                continue;
            }
            results.push(SearchResult {
                document: entry.document.clone(),
                page: entry.page,
                block_id: entry.block_id.clone(),
                role: entry.role.clone(),
                preview: preview(&entry.text, query),
            });
            if results.len() == RESULT_CAP {
                break;
            }
        }
        results
    }
}

/// Byte range of the first case-insensitive occurrence of `query` in `text`.
/// Char-by-char comparison, so the returned range always lies on char
/// boundaries of the original text.
pub fn find_case_insensitive(text: &str, query: &str) -> Option<(usize, usize)> {
    let q: Vec<char> = query.chars().collect();
    if q.is_empty() {
        return None;
    }
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    if q.len() > chars.len() {
        return None;
    }
    for i in 0..=chars.len() - q.len() {
        let matched = chars[i..i + q.len()]
            .iter()
            .zip(&q)
            .all(|(&(_, a), &b)| a.to_lowercase().eq(b.to_lowercase()));
        if matched {
            let start = chars[i].0;
            let end = match chars.get(i + q.len()) {
                Some(&(pos, _)) => pos,
                None => text.len(),
            };
            return Some((start, end));
        }
    }
    None
}

/// Build the HTML-bearing preview snippet for a matched text.
///
/// The window spans `CONTEXT_CHARS` before the match start to
/// `CONTEXT_CHARS` after the match end, clamped to the text, with an
/// ellipsis on each truncated side. Every occurrence of the query inside
/// the window is wrapped in `<strong>`; everything else is escaped.
pub fn preview(text: &str, query: &str) -> String {
    let Some((match_start, match_end)) = find_case_insensitive(text, query) else {
        // Unreachable via search(), which only calls this for matches.
        let head: String = text.chars().take(FALLBACK_CHARS).collect();
        return format!("{}{}", html_escape(&head), ELLIPSIS);
    };
    let window_start = step_back(text, match_start, CONTEXT_CHARS);
    let window_end = step_forward(text, match_end, CONTEXT_CHARS);

    let mut out = String::new();
    if window_start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.push_str(&highlight(&text[window_start..window_end], query));
    if window_end < text.len() {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Escape the window and wrap every case-insensitive occurrence of the
/// literal query in `<strong>`. The query is escaped with `regex::escape`,
/// so pattern metacharacters match themselves.
fn highlight(window: &str, query: &str) -> String {
    let pattern = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is a valid pattern");
    let mut out = String::with_capacity(window.len() + 16);
    let mut last = 0;
    for m in pattern.find_iter(window) {
        out.push_str(&html_escape(&window[last..m.start()]));
        out.push_str("<strong>");
        out.push_str(&html_escape(m.as_str()));
        out.push_str("</strong>");
        last = m.end();
    }
    out.push_str(&html_escape(&window[last..]));
    out
}

fn step_back(text: &str, from: usize, chars: usize) -> usize {
    let mut pos = from;
    for _ in 0..chars {
        match text[..pos].chars().next_back() {
            Some(c) => pos -= c.len_utf8(),
            None => break,
        }
    }
    pos
}

fn step_forward(text: &str, from: usize, chars: usize) -> usize {
    let mut pos = from;
    let mut rest = text[from..].chars();
    for _ in 0..chars {
        match rest.next() {
            Some(c) => pos += c.len_utf8(),
            None => break,
        }
    }
    pos
}

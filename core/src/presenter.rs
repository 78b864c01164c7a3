use crate::search::{SearchIndex, MIN_QUERY_LEN};
use crate::SearchResult;

pub const NO_RESULTS: &str = "No results found";

/// What the hosting surface should do with the results panel after a
/// keystroke. Two states only: hidden, or visible with these results.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelUpdate {
    Hide,
    Show(Vec<SearchResult>),
}

/// Pure keystroke handler. Queries shorter than `MIN_QUERY_LEN` chars hide
/// the panel without scanning; anything longer shows the panel, even when
/// the search comes back empty (the placeholder is rendered, not nothing).
pub fn on_query_changed(index: &SearchIndex, query: &str) -> PanelUpdate {
    if query.chars().count() < MIN_QUERY_LEN {
        return PanelUpdate::Hide;
    }
    PanelUpdate::Show(index.search(query))
}

/// Navigation target for a result. Must match the anchor ids the document
/// pages are generated with.
pub fn result_href(result: &SearchResult) -> String {
    format!("documents/{}.html#block-{}", result.document, result.block_id)
}

/// Display label, with the page shown 1-based.
pub fn result_label(result: &SearchResult) -> String {
    format!("{} - Page {}", result.document, result.page + 1)
}

/// Render the panel body as an HTML fragment. Previews arrive already
/// escaped and highlighted; everything else is escaped here.
pub fn render_panel(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!(r#"<div class="search-result">{NO_RESULTS}</div>"#);
    }
    let mut out = String::new();
    for result in results {
        out.push_str(&format!(
            concat!(
                r#"<div class="search-result"><a href="{href}">"#,
                r#"<div class="search-result-doc">{label}</div>"#,
                r#"<div class="search-result-preview">{preview}</div>"#,
                "</a></div>"
            ),
            href = html_escape(&result_href(result)),
            label = html_escape(&result_label(result)),
            preview = result.preview,
        ));
    }
    out
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

use docfind_core::presenter::{on_query_changed, render_panel, result_label, PanelUpdate};
use docfind_core::search::{SearchIndex, RESULT_CAP};
use docfind_core::{BlockId, IndexEntry};

fn entry(document: &str, page: u32, block_id: &str, text: &str) -> IndexEntry {
    IndexEntry {
        document: document.to_string(),
        page,
        block_id: BlockId::Text(block_id.to_string()),
        role: None,
        text: text.to_string(),
    }
}

fn strip_markup(preview: &str) -> String {
    preview.replace("<strong>", "").replace("</strong>", "")
}

#[test]
fn short_query_hides_the_panel() {
    let index = SearchIndex::new(vec![entry("doc1", 0, "b1", "aaaa")]);
    assert_eq!(on_query_changed(&index, ""), PanelUpdate::Hide);
    assert_eq!(on_query_changed(&index, "a"), PanelUpdate::Hide);
    assert!(matches!(on_query_changed(&index, "aa"), PanelUpdate::Show(_)));
}

#[test]
fn unloaded_index_yields_empty_results() {
    let index = SearchIndex::empty();
    assert!(index.search("anything").is_empty());
    // Long enough to search: the panel still shows, with no results.
    assert_eq!(on_query_changed(&index, "anything"), PanelUpdate::Show(vec![]));
}

#[test]
fn matching_is_case_insensitive_containment() {
    let index = SearchIndex::new(vec![
        entry("doc1", 0, "b1", "The QUICK brown fox"),
        entry("doc1", 0, "b2", "nothing relevant here"),
        entry("doc2", 1, "b3", "quicksilver"),
    ]);
    let results = index.search("quick");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].block_id, BlockId::Text("b1".into()));
    assert_eq!(results[1].block_id, BlockId::Text("b3".into()));
}

#[test]
fn results_keep_index_order_and_cap_at_twenty() {
    let entries: Vec<IndexEntry> = (0..30)
        .map(|i| entry("doc1", 0, &format!("b{i}"), &format!("needle number {i}")))
        .collect();
    let index = SearchIndex::new(entries);
    let results = index.search("needle");
    assert_eq!(results.len(), RESULT_CAP);
    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.block_id, BlockId::Text(format!("b{i}")));
    }
}

#[test]
fn duplicate_entries_produce_duplicate_results() {
    let index = SearchIndex::new(vec![
        entry("doc1", 0, "b1", "same text"),
        entry("doc1", 0, "b1", "same text"),
    ]);
    assert_eq!(index.search("same").len(), 2);
}

#[test]
fn search_is_idempotent() {
    let index = SearchIndex::new(vec![
        entry("doc1", 0, "b1", "alpha beta gamma"),
        entry("doc2", 2, "b2", "beta delta"),
    ]);
    assert_eq!(index.search("beta"), index.search("beta"));
}

#[test]
fn preview_windows_a_mid_string_match() {
    let text = format!("{}needle{}", "x".repeat(80), "y".repeat(80));
    let index = SearchIndex::new(vec![entry("doc1", 0, "b1", &text)]);
    let results = index.search("needle");
    assert_eq!(results.len(), 1);
    let preview = &results[0].preview;
    assert!(preview.starts_with("..."));
    assert!(preview.ends_with("..."));
    assert!(preview.contains("<strong>needle</strong>"));
    // 50 chars of context each side plus the match itself plus ellipses.
    let plain = strip_markup(preview);
    assert_eq!(plain.chars().count(), 3 + 50 + 6 + 50 + 3);
}

#[test]
fn preview_clamps_to_text_bounds() {
    let index = SearchIndex::new(vec![entry("doc1", 0, "b1", "short needle text")]);
    let results = index.search("needle");
    let preview = &results[0].preview;
    assert_eq!(strip_markup(preview), "short needle text");
}

#[test]
fn quick_brown_fox_scenario() {
    let index = SearchIndex::new(vec![entry("doc1", 0, "b1", "The quick brown fox")]);
    let results = index.search("quick");
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert!(r.preview.contains("<strong>quick</strong>"));
    assert!(!r.preview.starts_with("..."));
    assert_eq!(result_label(r), "doc1 - Page 1");
}

#[test]
fn no_match_shows_single_placeholder() {
    let index = SearchIndex::new(vec![entry("doc1", 0, "b1", "The quick brown fox")]);
    let PanelUpdate::Show(results) = on_query_changed(&index, "xyz") else {
        panic!("panel must stay visible for a searched query");
    };
    let html = render_panel(&results);
    assert_eq!(html.matches("No results found").count(), 1);
}

#[test]
fn pattern_characters_in_query_match_literally() {
    let index = SearchIndex::new(vec![
        entry("doc1", 0, "b1", "version a.b released"),
        entry("doc1", 0, "b2", "version axb released"),
    ]);
    let results = index.search("a.b");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].block_id, BlockId::Text("b1".into()));
    assert!(results[0].preview.contains("<strong>a.b</strong>"));
}

#[test]
fn preview_escapes_markup_in_source_text() {
    let index = SearchIndex::new(vec![entry("doc1", 0, "b1", "use <script> tags wisely")]);
    let results = index.search("script");
    let preview = &results[0].preview;
    assert!(!preview.contains("<script>"));
    assert!(preview.contains("&lt;<strong>script</strong>&gt;"));
}

#[test]
fn every_occurrence_in_window_is_highlighted() {
    let index = SearchIndex::new(vec![entry("doc1", 0, "b1", "Rust and rust and RUST")]);
    let results = index.search("rust");
    assert_eq!(results[0].preview.matches("<strong>").count(), 3);
}

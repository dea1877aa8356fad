use regex::Regex;
use scraper::{ElementRef, Html, Node};

use crate::document::{DocumentChunk, MetaValue, MetadataMap};

/// Text directly contained by an element, excluding any descendant's text,
/// with runs of whitespace collapsed to single spaces.
pub fn own_text(element: ElementRef) -> String {
    let mut raw = String::new();
    for child in element.children() {
        if let Node::Text(text) = child.value() {
            raw.push_str(&text.text);
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Boundary matches must cover the whole own text; a substring hit inside
// prose never opens or closes an item.
fn full_match(pattern: &Regex, text: &str) -> bool {
    pattern
        .find(text)
        .map_or(false, |m| m.start() == 0 && m.end() == text.len())
}

struct OpenItem {
    title: String,
    content: String,
}

/// Two-state scanner over a sequence of per-element own texts. Feeding it
/// the pre-order element texts of a filing yields the filing's item chunks
/// in document order; it never touches the tree itself.
pub struct ItemScanner<'a> {
    begin: &'a Regex,
    end: &'a Regex,
    base: &'a MetadataMap,
    chunks: Vec<DocumentChunk>,
    item_index: i64,
    open: Option<OpenItem>,
}

impl<'a> ItemScanner<'a> {
    pub fn new(begin: &'a Regex, end: &'a Regex, base: &'a MetadataMap) -> Self {
        ItemScanner {
            begin,
            end,
            base,
            chunks: Vec::new(),
            item_index: 0,
            open: None,
        }
    }

    /// Advances the scanner by one element's own text.
    pub fn push(&mut self, text: &str) {
        if let Some(open) = self.open.take() {
            if full_match(self.end, text) {
                let chunk = self.item_chunk(open);
                self.chunks.push(chunk);
                self.item_index += 1;
            } else {
                self.open = Some(open);
            }
        }

        if full_match(self.begin, text) {
            // A begin match while an item is already open drops that item's
            // accumulation entirely: last begin wins, items never nest.
            self.open = Some(OpenItem {
                title: text.trim().to_string(),
                content: String::new(),
            });
        }

        if let Some(open) = self.open.as_mut() {
            open.content.push(' ');
            open.content.push_str(text);
        }
    }

    /// Emits the still-open item, if any. This is how the last item of a
    /// document is captured when nothing ever matches its end boundary.
    pub fn finish(mut self) -> Vec<DocumentChunk> {
        if let Some(open) = self.open.take() {
            if !open.content.is_empty() {
                let chunk = self.item_chunk(open);
                self.chunks.push(chunk);
            }
        }
        self.chunks
    }

    fn item_chunk(&self, open: OpenItem) -> DocumentChunk {
        let mut metadata = self.base.clone();
        metadata.insert("documentType".to_string(), MetaValue::from("FORM_ITEM"));
        metadata.insert("itemIndex".to_string(), MetaValue::Int(self.item_index));
        metadata.insert("itemTitle".to_string(), MetaValue::Str(open.title));
        DocumentChunk::new(open.content.trim(), metadata)
    }
}

/// Walks every element of the stripped tree in document order and returns
/// the item chunks delimited by the begin/end boundary patterns.
pub fn extract_form_items(
    html: &Html,
    begin: &Regex,
    end: &Regex,
    base: &MetadataMap,
) -> Vec<DocumentChunk> {
    let mut scanner = ItemScanner::new(begin, end, base);
    for node in html.tree.root().descendants() {
        if let Some(element) = ElementRef::wrap(node) {
            scanner.push(&own_text(element));
        }
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::TEN_K_ITEMS_REGEX;
    use once_cell::sync::Lazy;
    use scraper::Selector;

    static ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Item \d\. [A-Za-z ]+$").unwrap());

    fn scan(texts: &[&str], begin: &Regex, end: &Regex) -> Vec<DocumentChunk> {
        let base = MetadataMap::new();
        let mut scanner = ItemScanner::new(begin, end, &base);
        for text in texts {
            scanner.push(text);
        }
        scanner.finish()
    }

    #[test]
    fn closes_and_reopens_on_the_same_boundary() {
        let chunks = scan(
            &["Item 1. Business", "body text", "Item 2. Properties", "more"],
            &ITEM,
            &ITEM,
        );

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content(), "Item 1. Business body text");
        assert_eq!(
            chunks[0].get("itemTitle").and_then(MetaValue::as_str),
            Some("Item 1. Business")
        );
        assert_eq!(chunks[0].get("itemIndex").and_then(MetaValue::as_int), Some(0));

        // Second item never sees an end boundary and is emitted at finish,
        // with the index left unincremented.
        assert_eq!(chunks[1].content(), "Item 2. Properties more");
        assert_eq!(chunks[1].get("itemIndex").and_then(MetaValue::as_int), Some(1));
    }

    #[test]
    fn distinct_end_pattern_excludes_the_closing_element() {
        let begin = Regex::new(r"^START$").unwrap();
        let end = Regex::new(r"^END$").unwrap();
        let chunks = scan(&["START", "a", "b", "END", "after"], &begin, &end);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), "START a b");
    }

    #[test]
    fn begin_while_open_discards_accumulated_content() {
        let begin = Regex::new(r"^B\d$").unwrap();
        let end = Regex::new(r"^E$").unwrap();
        let chunks = scan(&["B1", "lost", "B2", "kept", "E"], &begin, &end);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), "B2 kept");
        assert_eq!(
            chunks[0].get("itemTitle").and_then(MetaValue::as_str),
            Some("B2")
        );
    }

    #[test]
    fn substring_matches_never_transition() {
        let chunks = scan(
            &["see Item 1. Business for details", "prose"],
            &ITEM,
            &ITEM,
        );
        assert!(chunks.is_empty());
    }

    #[test]
    fn empty_own_texts_are_appended_while_open() {
        let chunks = scan(&["Item 1. Business", "", ""], &ITEM, &ITEM);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), "Item 1. Business");
    }

    #[test]
    fn item_indices_are_dense_and_zero_based() {
        let chunks = scan(
            &[
                "Item 1. Business",
                "a",
                "Item 2. Properties",
                "b",
                "Item 3. Legal Proceedings",
                "c",
            ],
            &ITEM,
            &ITEM,
        );
        let indices: Vec<_> = chunks
            .iter()
            .map(|c| c.get("itemIndex").and_then(MetaValue::as_int).unwrap())
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn own_text_excludes_descendants() {
        let html = Html::parse_document("<html><body><div>Own <span>nested</span> text</div></body></html>");
        let selector = Selector::parse("div").unwrap();
        let div = html.select(&selector).next().unwrap();
        assert_eq!(own_text(div), "Own text");
    }

    #[test]
    fn own_text_normalizes_internal_whitespace() {
        let html = Html::parse_document("<html><body><h1>\n  Item 1.\n  Business\n</h1></body></html>");
        let selector = Selector::parse("h1").unwrap();
        let h1 = html.select(&selector).next().unwrap();
        assert_eq!(own_text(h1), "Item 1. Business");
    }

    #[test]
    fn segments_sibling_headings_from_a_tree() {
        let html = Html::parse_document(
            r#"<html><body>
                <h1>Item 1. Business</h1>
                <p>This is the business section content.</p>
                <p>More business information.</p>
                <h1>Item 2. Properties</h1>
                <p>This is about properties.</p>
                <h1>Item 3. Legal Proceedings</h1>
                <p>Legal information here.</p>
            </body></html>"#,
        );

        let mut base = MetadataMap::new();
        base.insert("form".to_string(), MetaValue::from("10-K"));
        let chunks = extract_form_items(&html, &TEN_K_ITEMS_REGEX, &TEN_K_ITEMS_REGEX, &base);

        assert_eq!(chunks.len(), 3);

        assert!(chunks[0].content().contains("Item 1. Business"));
        assert!(chunks[0].content().contains("business section content"));
        assert_eq!(
            chunks[0].get("documentType").and_then(MetaValue::as_str),
            Some("FORM_ITEM")
        );
        assert_eq!(chunks[0].get("itemIndex").and_then(MetaValue::as_int), Some(0));
        assert_eq!(
            chunks[0].get("itemTitle").and_then(MetaValue::as_str),
            Some("Item 1. Business")
        );
        // Base metadata is carried into every chunk
        assert_eq!(chunks[0].get("form").and_then(MetaValue::as_str), Some("10-K"));

        assert_eq!(
            chunks[1].get("itemTitle").and_then(MetaValue::as_str),
            Some("Item 2. Properties")
        );
        assert!(chunks[1].content().contains("about properties"));
        assert_eq!(
            chunks[2].get("itemTitle").and_then(MetaValue::as_str),
            Some("Item 3. Legal Proceedings")
        );
        assert!(chunks[2].content().contains("Legal information here"));
    }
}

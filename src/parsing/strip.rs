use log::debug;
use scraper::{ElementRef, Html, Node};

/// Strips presentational noise from a parsed filing in place: inline
/// `style` and `colspan` attributes, empty elements, and anchors together
/// with their content.
pub fn strip_filing_html(html: &mut Html) {
    remove_attribute(html, "style");
    remove_attribute(html, "colspan");
    remove_empty_elements(html);
    remove_anchors(html);
}

fn remove_attribute(html: &mut Html, attribute: &str) {
    let ids: Vec<_> = html
        .tree
        .root()
        .descendants()
        .filter(|node| node.value().is_element())
        .map(|node| node.id())
        .collect();

    for id in ids {
        if let Some(mut node) = html.tree.get_mut(id) {
            if let Node::Element(element) = node.value() {
                element.attrs.retain(|name, _| &*name.local != attribute);
            }
        }
    }
}

/// Removes every element that has no child elements and whose text is empty
/// or whitespace-only. One forward pass over a snapshot of the tree: a
/// parent emptied as a side effect of this pass is not re-evaluated.
fn remove_empty_elements(html: &mut Html) {
    let ids: Vec<_> = html
        .tree
        .root()
        .descendants()
        .filter(|node| node.value().is_element())
        .map(|node| node.id())
        .collect();

    let mut removed = 0usize;
    for id in ids {
        let is_empty = match html.tree.get(id) {
            Some(node) => {
                node.children().all(|child| !child.value().is_element())
                    && ElementRef::wrap(node)
                        .map_or(false, |element| element.text().all(|t| t.trim().is_empty()))
            }
            None => false,
        };

        if is_empty {
            if let Some(mut node) = html.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
    }
    debug!("removed {} empty elements", removed);
}

fn remove_anchors(html: &mut Html) {
    let ids: Vec<_> = html
        .tree
        .root()
        .descendants()
        .filter(|node| {
            node.value()
                .as_element()
                .map_or(false, |element| element.name() == "a")
        })
        .map(|node| node.id())
        .collect();

    for id in ids {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripped(html: &str) -> String {
        let mut document = Html::parse_document(html);
        strip_filing_html(&mut document);
        document.root_element().html()
    }

    #[test]
    fn removes_style_colspan_and_anchors() {
        let html = r#"<html><body>
            <div style="color: red; font-size: 12px;" colspan="3">
                <p>Some content</p>
                <a href="http://example.com">Link</a>
                <span></span>
                <div>   </div>
            </div>
        </body></html>"#;

        let result = stripped(html);
        assert!(!result.contains("style="));
        assert!(!result.contains("colspan="));
        assert!(!result.contains("<a "));
        assert!(!result.contains("href="));
        assert!(!result.contains("Link"));
        assert!(result.contains("Some content"));
    }

    #[test]
    fn removes_whitespace_only_elements() {
        let result = stripped("<html><body><p>kept</p><span>   </span></body></html>");
        assert!(result.contains("kept"));
        assert!(!result.contains("<span>"));
    }

    #[test]
    fn keeps_parent_emptied_during_the_same_pass() {
        // The pass is not a fixed point: the outer div still holds the span
        // when it is evaluated, so only the span goes.
        let result = stripped("<html><body><div><span></span></div>x</body></html>");
        assert!(result.contains("<div></div>"));
        assert!(!result.contains("<span>"));
    }

    #[test]
    fn stripping_is_idempotent() {
        let html = r#"<html><body>
            <div style="x">
                <p>Some content</p>
                <a href="y">Link</a>
                <span></span>
            </div>
        </body></html>"#;

        let mut document = Html::parse_document(html);
        strip_filing_html(&mut document);
        let once = document.root_element().html();
        strip_filing_html(&mut document);
        let twice = document.root_element().html();
        assert_eq!(once, twice);
    }
}

use log::debug;
use scraper::{ElementRef, Html};

use super::IX_HEADER_TAG;

/// Extracts the inline XBRL header from a filing and removes it from the
/// tree. The inner markup of every `ix:header` element is concatenated in
/// document order, nested tags included. Returns empty bytes when the
/// filing carries no header.
///
/// Must run before `strip_filing_html` so that inline styling inside the
/// header survives verbatim.
pub fn extract_xbrl_header(html: &mut Html) -> Vec<u8> {
    let mut ids = Vec::new();
    let mut parts = Vec::new();

    for node in html.tree.root().descendants() {
        if let Some(element) = ElementRef::wrap(node) {
            if element.value().name() == IX_HEADER_TAG {
                parts.push(element.inner_html());
                ids.push(node.id());
            }
        }
    }

    for id in ids {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
        }
    }

    debug!("extracted {} xbrl header elements", parts.len());
    parts.join("\n").into_bytes()
}

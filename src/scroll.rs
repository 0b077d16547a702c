//! In-page anchor scrolling and the header's scroll shadow.

use crate::dom::{Document, EventKind, ScrollBehavior};
use tracing::debug;

/// Scroll distance after which the header gets its shadow.
pub const SHADOW_THRESHOLD_PX: i64 = 10;
const SHADOW_CLASS: &str = "shadow-lg";

fn header(doc: &Document) -> Option<crate::dom::NodeId> {
    doc.select_by_tag(doc.root(), "header").into_iter().next()
}

/// Make every `#fragment` link scroll smoothly to its section, leaving room
/// for the header. Returns the number of links wired.
pub fn init_smooth_scrolling(doc: &mut Document) -> usize {
    let links: Vec<_> = doc
        .select_by_tag(doc.root(), "a")
        .into_iter()
        .filter(|a| doc.attribute(*a, "href").is_some_and(|h| h.starts_with('#')))
        .collect();

    for link in &links {
        doc.add_listener(*link, EventKind::Click, |doc, event| {
            event.prevent_default();
            let Some(target_id) = doc
                .attribute(event.target, "href")
                .and_then(|h| h.strip_prefix('#'))
                .filter(|id| !id.is_empty())
                .map(str::to_string)
            else {
                return;
            };
            let Some(section) = doc.get_element_by_id(&target_id) else {
                debug!(target = %target_id, "anchor target not found");
                return;
            };
            let header_height = header(doc).map_or(0, |h| doc.offset_height(h));
            let top = doc.offset_top(section) - header_height;
            doc.scroll_to(top, ScrollBehavior::Smooth);
        });
    }
    links.len()
}

/// Toggle the header shadow on window scroll. Returns `false` without a header.
pub fn init_scroll_effects(doc: &mut Document) -> bool {
    let Some(header) = header(doc) else {
        return false;
    };
    doc.on_window(EventKind::Scroll, move |doc, _| {
        let scrolled = doc.scroll_y() > SHADOW_THRESHOLD_PX;
        doc.toggle_class(header, SHADOW_CLASS, Some(scrolled));
    });
    true
}

//! Mobile navigation menu.
//!
//! The button toggles the menu's `hidden` class. Following any link inside
//! the menu closes it, and so does a click anywhere outside both the menu
//! and the button.

use crate::dom::{Document, EventKind};
use crate::page::ids;
use tracing::warn;

const HIDDEN: &str = "hidden";

/// Wire the mobile menu. Returns `false` when its elements are missing.
pub fn init_mobile_menu(doc: &mut Document) -> bool {
    let (Some(button), Some(menu)) = (
        doc.get_element_by_id(ids::MOBILE_MENU_BUTTON),
        doc.get_element_by_id(ids::MOBILE_MENU),
    ) else {
        warn!("mobile menu elements not found");
        return false;
    };

    doc.add_listener(button, EventKind::Click, move |doc, _| {
        doc.toggle_class(menu, HIDDEN, None);
    });

    for link in doc.select_by_tag(menu, "a") {
        doc.add_listener(link, EventKind::Click, move |doc, _| {
            doc.add_class(menu, HIDDEN);
        });
    }

    doc.on_document(EventKind::Click, move |doc, event| {
        if !doc.contains(menu, event.target) && !doc.contains(button, event.target) {
            doc.add_class(menu, HIDDEN);
        }
    });

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::skeleton;

    fn wired() -> (Document, crate::dom::NodeId, crate::dom::NodeId) {
        let mut doc = skeleton();
        assert!(init_mobile_menu(&mut doc));
        let button = doc.get_element_by_id(ids::MOBILE_MENU_BUTTON).unwrap();
        let menu = doc.get_element_by_id(ids::MOBILE_MENU).unwrap();
        (doc, button, menu)
    }

    #[test]
    fn button_toggles_menu() {
        let (mut doc, button, menu) = wired();
        assert!(doc.has_class(menu, "hidden"));
        doc.click(button);
        assert!(!doc.has_class(menu, "hidden"));
        doc.click(button);
        assert!(doc.has_class(menu, "hidden"));
    }

    #[test]
    fn menu_link_closes_menu() {
        let (mut doc, button, menu) = wired();
        doc.click(button);
        let link = doc.select_by_tag(menu, "a")[0];
        doc.click(link);
        assert!(doc.has_class(menu, "hidden"));
    }

    #[test]
    fn outside_click_closes_menu() {
        let (mut doc, button, menu) = wired();
        doc.click(button);
        let main = doc.get_element_by_id(ids::BIOGRAPHY).unwrap();
        doc.click(main);
        assert!(doc.has_class(menu, "hidden"));
    }

    #[test]
    fn click_inside_menu_keeps_it_open() {
        let (mut doc, button, menu) = wired();
        doc.click(button);
        let filler = doc.append_new(menu, "span");
        doc.click(filler);
        assert!(!doc.has_class(menu, "hidden"));
    }

    #[test]
    fn missing_elements_are_reported() {
        let mut doc = Document::new();
        assert!(!init_mobile_menu(&mut doc));
    }
}

//! Dark-mode toggle.
//!
//! The preference lives in a key-value [`Storage`] under `"theme"`. On load,
//! a stored `"dark"` wins; with nothing stored the system preference decides.
//! The active theme is the `dark` class on the root element, and the sun and
//! moon icons are shown or hidden to match.

use crate::dom::{Document, EventKind, NodeId};
use crate::page::ids;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, warn};

pub const STORAGE_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";

/// Persistent key-value storage for user preferences.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Stored preference first, then the system preference.
    pub fn resolve(saved: Option<&str>, prefers_dark: bool) -> Self {
        match saved {
            Some("dark") => Theme::Dark,
            None if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// The theme currently applied to the document.
pub fn current_theme(doc: &Document) -> Theme {
    if doc.has_class(doc.root(), DARK_CLASS) {
        Theme::Dark
    } else {
        Theme::Light
    }
}

fn update_icons(doc: &mut Document, sun: NodeId, moon: NodeId) {
    let dark = current_theme(doc) == Theme::Dark;
    doc.set_style(sun, "display", if dark { "none" } else { "block" });
    doc.set_style(moon, "display", if dark { "block" } else { "none" });
}

/// Apply the initial theme and wire the toggle button.
///
/// Returns the applied theme, or `None` when the toggle or its icons are
/// missing (nothing is changed in that case).
pub fn init_theme_toggle<S>(
    doc: &mut Document,
    storage: &Rc<RefCell<S>>,
    prefers_dark: bool,
) -> Option<Theme>
where
    S: Storage + 'static,
{
    let (Some(toggle), Some(sun), Some(moon)) = (
        doc.get_element_by_id(ids::THEME_TOGGLE),
        doc.get_element_by_id(ids::THEME_ICON_SUN),
        doc.get_element_by_id(ids::THEME_ICON_MOON),
    ) else {
        warn!("theme toggle elements not found");
        return None;
    };

    let saved = storage.borrow().get_item(STORAGE_KEY);
    let theme = Theme::resolve(saved.as_deref(), prefers_dark);
    if theme == Theme::Dark {
        doc.add_class(doc.root(), DARK_CLASS);
    }
    update_icons(doc, sun, moon);

    let storage = Rc::clone(storage);
    doc.add_listener(toggle, EventKind::Click, move |doc, _| {
        let root = doc.root();
        doc.toggle_class(root, DARK_CLASS, None);
        let theme = current_theme(doc);
        storage.borrow_mut().set_item(STORAGE_KEY, theme.as_str());
        debug!(theme = theme.as_str(), "theme toggled");
        update_icons(doc, sun, moon);
    });

    Some(theme)
}

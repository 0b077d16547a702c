//! In-memory page document.
//!
//! Every page behavior in this crate works against [`Document`], an arena of
//! elements addressed by copyable [`NodeId`] handles. It carries just enough
//! of a browser document to drive the landing page: tag, id, classes,
//! attributes, inline style, text or raw inner markup, layout metrics, a
//! window scroll position, and event listeners.
//!
//! ## Events
//!
//! Listeners are stored as [`Listener`] values. Dispatch clones the
//! listener list before calling into it, so a listener is free to mutate the
//! document (including adding listeners). Dispatch order for a bubbling event:
//!
//! ```text
//! target → parent → … → root → document-level listeners
//! ```
//!
//! Non-bubbling events (`Error`) only reach the target. `Scroll` is a window
//! event and only reaches window-level listeners.
//!
//! Handles are only meaningful for the document that created them; passing a
//! foreign handle to an accessor panics like any out-of-bounds index.

use maud::{Markup, PreEscaped, html};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    /// Resource load failure (e.g. an image that could not be fetched).
    Error,
    /// Window scroll.
    Scroll,
}

impl EventKind {
    fn bubbles(self) -> bool {
        matches!(self, EventKind::Click)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// An event being dispatched.
#[derive(Debug)]
pub struct Event {
    pub kind: EventKind,
    /// The element the event was dispatched on (the root for window events).
    pub target: NodeId,
    default_prevented: bool,
}

impl Event {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
    raw: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    offset_top: i64,
    offset_height: i64,
    listeners: Vec<(EventKind, Listener)>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            text: None,
            raw: None,
            children: Vec::new(),
            parent: None,
            offset_top: 0,
            offset_height: 0,
            listeners: Vec::new(),
        }
    }
}

/// Tags serialized without a closing tag.
const VOID_TAGS: &[&str] = &["img", "input", "meta", "link", "br", "hr", "source"];

pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    body: NodeId,
    document_listeners: Vec<(EventKind, Listener)>,
    window_listeners: Vec<(EventKind, Listener)>,
    scroll_y: i64,
    last_scroll_behavior: Option<ScrollBehavior>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("scroll_y", &self.scroll_y)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with an `html` root and an attached `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            root: NodeId(0),
            body: NodeId(0),
            document_listeners: Vec::new(),
            window_listeners: Vec::new(),
            scroll_y: 0,
            last_scroll_behavior: None,
        };
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc.body = body;
        doc
    }

    /// The document element (`<html>`).
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn node(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let parent_node = self.node_mut(parent);
        parent_node.text = None;
        parent_node.raw = None;
        parent_node.children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Create an element and append it in one step.
    pub fn append_new(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old) = self.node_mut(child).parent.take() {
            self.node_mut(old).children.retain(|c| *c != child);
        }
    }

    /// Remove every child, text, and raw markup (`innerHTML = ''`).
    pub fn clear_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.node_mut(parent).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
        let node = self.node_mut(parent);
        node.text = None;
        node.raw = None;
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Whether `id` is a valid handle reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        if id.0 >= self.nodes.len() {
            return false;
        }
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.node(current).parent;
        }
        false
    }

    /// Inclusive containment, like `Node.contains`.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.node(current).parent;
        }
        false
    }

    /// Pre-order descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.node(current).children.iter().rev().copied());
        }
        out
    }

    pub fn select_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.node(*id).tag == tag)
            .collect()
    }

    pub fn select_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// Find an attached element by id.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.node(*n).id.as_deref() == Some(id))
    }

    // ------------------------------------------------------------------
    // Element data
    // ------------------------------------------------------------------

    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.node_mut(node).id = Some(id.to_string());
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.node(node).id.as_deref()
    }

    /// Replace the class list from a space-separated string (`className = …`).
    pub fn set_class_name(&mut self, id: NodeId, class_name: &str) {
        self.node_mut(id).classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        &self.node(id).classes
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.node_mut(id).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.node_mut(id).classes.retain(|c| c != class);
    }

    /// `classList.toggle(class, force)`. Returns whether the class is now present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.has_class(id, class));
        if present {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
        present
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        self.node_mut(id)
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attributes.get(name).map(String::as_str)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) {
        self.node_mut(id)
            .style
            .insert(property.to_string(), value.into());
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id).style.get(property).map(String::as_str)
    }

    /// Replace the content of `id` with plain text (`textContent = …`).
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.clear_children(id);
        self.node_mut(id).text = Some(text.into());
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    /// Replace the content of `id` with pre-rendered markup (`innerHTML = …`).
    pub fn set_inner_markup(&mut self, id: NodeId, markup: Markup) {
        self.clear_children(id);
        self.node_mut(id).raw = Some(markup.into_string());
    }

    pub fn inner_markup(&self, id: NodeId) -> Option<&str> {
        self.node(id).raw.as_deref()
    }

    /// Concatenated text of `id` and its descendants, raw markup excluded.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = self.node(id).text.clone().unwrap_or_default();
        for child in self.descendants(id) {
            if let Some(text) = &self.node(child).text {
                out.push_str(text);
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Layout and window
    // ------------------------------------------------------------------

    pub fn set_layout(&mut self, id: NodeId, offset_top: i64, offset_height: i64) {
        let node = self.node_mut(id);
        node.offset_top = offset_top;
        node.offset_height = offset_height;
    }

    pub fn offset_top(&self, id: NodeId) -> i64 {
        self.node(id).offset_top
    }

    pub fn offset_height(&self, id: NodeId) -> i64 {
        self.node(id).offset_height
    }

    pub fn scroll_y(&self) -> i64 {
        self.scroll_y
    }

    /// Behavior of the most recent [`Document::scroll_to`] call.
    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll_behavior
    }

    /// Scroll the window (clamped at the top) and fire a window scroll event.
    pub fn scroll_to(&mut self, top: i64, behavior: ScrollBehavior) {
        self.scroll_y = top.max(0);
        self.last_scroll_behavior = Some(behavior);
        self.dispatch_window(EventKind::Scroll);
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn add_listener<F>(&mut self, id: NodeId, kind: EventKind, listener: F)
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.node_mut(id).listeners.push((kind, Rc::new(listener)));
    }

    pub fn on_document<F>(&mut self, kind: EventKind, listener: F)
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.document_listeners.push((kind, Rc::new(listener)));
    }

    pub fn on_window<F>(&mut self, kind: EventKind, listener: F)
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.window_listeners.push((kind, Rc::new(listener)));
    }

    pub fn listener_count(&self, id: NodeId) -> usize {
        self.node(id).listeners.len()
    }

    /// Dispatch an element event and return it once every listener has run.
    pub fn dispatch(&mut self, target: NodeId, kind: EventKind) -> Event {
        let mut event = Event {
            kind,
            target,
            default_prevented: false,
        };

        let mut cursor = Some(target);
        while let Some(current) = cursor {
            let listeners = matching(&self.node(current).listeners, kind);
            for listener in listeners {
                listener(self, &mut event);
            }
            if !kind.bubbles() {
                return event;
            }
            cursor = self.node(current).parent;
        }

        for listener in matching(&self.document_listeners, kind) {
            listener(self, &mut event);
        }
        event
    }

    pub fn click(&mut self, target: NodeId) -> Event {
        self.dispatch(target, EventKind::Click)
    }

    pub fn dispatch_window(&mut self, kind: EventKind) -> Event {
        let mut event = Event {
            kind,
            target: self.root,
            default_prevented: false,
        };
        for listener in matching(&self.window_listeners, kind) {
            listener(self, &mut event);
        }
        event
    }

    // ------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------

    /// Serialize `id` and its subtree to HTML.
    pub fn to_markup(&self, id: NodeId) -> Markup {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        PreEscaped(out)
    }

    /// The whole document, with doctype.
    pub fn snapshot(&self) -> Markup {
        html! {
            (maud::DOCTYPE)
            (self.to_markup(self.root))
        }
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        out.push('<');
        out.push_str(&node.tag);
        if let Some(element_id) = &node.id {
            push_attribute(out, "id", element_id);
        }
        if !node.classes.is_empty() {
            push_attribute(out, "class", &node.classes.join(" "));
        }
        for (name, value) in &node.attributes {
            push_attribute(out, name, value);
        }
        if !node.style.is_empty() {
            let style = node
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v};"))
                .collect::<Vec<_>>()
                .join(" ");
            push_attribute(out, "style", &style);
        }
        out.push('>');

        if VOID_TAGS.contains(&node.tag.as_str()) {
            return;
        }

        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        if let Some(raw) = &node.raw {
            out.push_str(raw);
        }
        for child in &node.children {
            self.write_markup(*child, out);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}

fn matching(listeners: &[(EventKind, Listener)], kind: EventKind) -> Vec<Listener> {
    listeners
        .iter()
        .filter(|(k, _)| *k == kind)
        .map(|(_, l)| Rc::clone(l))
        .collect()
}

fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

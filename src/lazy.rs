//! Lazy image reveal.
//!
//! Images marked `loading="lazy"` get the `lazy-load` class and are watched
//! until they first intersect the viewport, at which point they get `loaded`
//! and are no longer watched. Intersection itself is reported by the host
//! through [`LazyImages::intersect`].

use crate::dom::{Document, NodeId};
use tracing::debug;

#[derive(Debug, Default)]
pub struct LazyImages {
    observed: Vec<NodeId>,
}

impl LazyImages {
    /// Start watching every lazy image currently in the document.
    pub fn observe(doc: &mut Document) -> Self {
        let observed: Vec<NodeId> = doc
            .select_by_tag(doc.root(), "img")
            .into_iter()
            .filter(|img| doc.attribute(*img, "loading") == Some("lazy"))
            .collect();
        for img in &observed {
            doc.add_class(*img, "lazy-load");
        }
        debug!(images = observed.len(), "observing lazy images");
        Self { observed }
    }

    /// Reveal the watched images among `visible`. Returns how many were revealed.
    pub fn intersect(&mut self, doc: &mut Document, visible: &[NodeId]) -> usize {
        let before = self.observed.len();
        self.observed.retain(|img| {
            if visible.contains(img) {
                doc.add_class(*img, "loaded");
                false
            } else {
                true
            }
        });
        before - self.observed.len()
    }

    /// Images still waiting to intersect.
    pub fn pending(&self) -> &[NodeId] {
        &self.observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_images() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let lazy_a = doc.append_new(doc.body(), "img");
        doc.set_attribute(lazy_a, "loading", "lazy");
        let eager = doc.append_new(doc.body(), "img");
        let lazy_b = doc.append_new(doc.body(), "img");
        doc.set_attribute(lazy_b, "loading", "lazy");
        (doc, lazy_a, eager, lazy_b)
    }

    #[test]
    fn only_lazy_images_are_observed() {
        let (mut doc, lazy_a, eager, lazy_b) = page_with_images();
        let lazy = LazyImages::observe(&mut doc);
        assert_eq!(lazy.pending(), &[lazy_a, lazy_b]);
        assert!(doc.has_class(lazy_a, "lazy-load"));
        assert!(!doc.has_class(eager, "lazy-load"));
    }

    #[test]
    fn intersecting_images_load_once() {
        let (mut doc, lazy_a, eager, lazy_b) = page_with_images();
        let mut lazy = LazyImages::observe(&mut doc);

        assert_eq!(lazy.intersect(&mut doc, &[lazy_b, eager]), 1);
        assert!(doc.has_class(lazy_b, "loaded"));
        assert!(!doc.has_class(eager, "loaded"));
        assert_eq!(lazy.pending(), &[lazy_a]);

        assert_eq!(lazy.intersect(&mut doc, &[lazy_b]), 0);
        assert_eq!(lazy.intersect(&mut doc, &[lazy_a]), 1);
        assert!(lazy.pending().is_empty());
    }
}

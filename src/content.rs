//! Config-driven content renderers.
//!
//! Each renderer clears one fixed container and refills it from a slice of
//! config data. Paragraph text is always inserted as text, never as markup.
//! Card markup is built with Maud, so titles and descriptions are escaped;
//! only the icon's SVG path data is trusted and inserted verbatim.
//!
//! A missing container is logged and skipped; the rest of the page renders.

use crate::config::{AnimationSettings, ClinicConfig, ServiceArea};
use crate::dom::{Document, NodeId};
use crate::page::ids;
use maud::{PreEscaped, html};
use tracing::{debug, warn};

/// Containers replaced by the error panel when the config cannot be loaded.
const CONTENT_CONTAINERS: [&str; 3] = [ids::BIOGRAPHY, ids::SERVICE_AREAS, ids::CLINIC];

/// Fill the biography container, one paragraph per entry.
pub fn render_biography(doc: &mut Document, paragraphs: &[String]) -> bool {
    let Some(container) = doc.get_element_by_id(ids::BIOGRAPHY) else {
        warn!(container = ids::BIOGRAPHY, "biography container not found");
        return false;
    };
    fill_paragraphs(doc, container, paragraphs, Some("mb-4"));
    debug!(paragraphs = paragraphs.len(), "rendered biography");
    true
}

/// Fill the service-area grid, one card per area.
pub fn render_service_areas(
    doc: &mut Document,
    areas: &[ServiceArea],
    animation: &AnimationSettings,
) -> bool {
    let Some(container) = doc.get_element_by_id(ids::SERVICE_AREAS) else {
        warn!(container = ids::SERVICE_AREAS, "service-area container not found");
        return false;
    };
    doc.clear_children(container);
    for (index, area) in areas.iter().enumerate() {
        let card = area_card(doc, area, index, animation);
        doc.append_child(container, card);
    }
    debug!(cards = areas.len(), "rendered service areas");
    true
}

/// Build a detached service-area card.
///
/// The card always carries its reveal attributes; an incomplete area yields
/// an otherwise empty card.
pub fn area_card(
    doc: &mut Document,
    area: &ServiceArea,
    index: usize,
    animation: &AnimationSettings,
) -> NodeId {
    let card = doc.create_element("div");
    doc.set_class_name(card, "area-card");
    doc.set_attribute(card, "data-aos", "fade-up");
    doc.set_attribute(
        card,
        "data-aos-delay",
        (index as u64).saturating_mul(animation.delay_step_ms).to_string(),
    );
    doc.set_attribute(card, "data-aos-duration", animation.duration_ms.to_string());
    doc.set_attribute(card, "data-aos-offset", animation.offset_px.to_string());
    doc.set_attribute(card, "data-aos-once", animation.once.to_string());

    if !area.is_complete() {
        warn!(index, title = %area.title, "service area is missing title, description, or icon");
        return card;
    }

    doc.set_inner_markup(
        card,
        html! {
            div.flex.items-center."mb-6" {
                div.icon-circle {
                    svg fill="none" viewBox="0 0 24 24" stroke="currentColor" {
                        (PreEscaped(area.icon_svg.as_str()))
                    }
                }
                h3."text-2xl".font-bold { (area.title) }
            }
            p.leading-relaxed { (area.description) }
        },
    );
    card
}

/// Fill the clinic description container.
pub fn render_clinic(doc: &mut Document, clinic: &ClinicConfig) -> bool {
    let Some(container) = doc.get_element_by_id(ids::CLINIC) else {
        warn!(container = ids::CLINIC, "clinic container not found");
        return false;
    };
    fill_paragraphs(doc, container, &clinic.description, None);
    true
}

/// Replace every content container with an error notice.
pub fn render_config_error(doc: &mut Document) {
    for id in CONTENT_CONTAINERS {
        if let Some(container) = doc.get_element_by_id(id) {
            doc.set_inner_markup(
                container,
                html! {
                    div.text-center."text-red-600"."dark:text-red-400"."p-4" {
                        p { "Could not load content. Check the config.json file." }
                    }
                },
            );
        }
    }
}

fn fill_paragraphs(
    doc: &mut Document,
    container: NodeId,
    paragraphs: &[String],
    class: Option<&str>,
) {
    doc.clear_children(container);
    for paragraph in paragraphs {
        let p = doc.append_new(container, "p");
        doc.set_text(p, paragraph.as_str());
        if let Some(class) = class {
            doc.set_class_name(p, class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::skeleton;
    use crate::test_helpers::sample_area;

    fn container(doc: &Document, id: &str) -> NodeId {
        doc.get_element_by_id(id).unwrap()
    }

    #[test]
    fn biography_renders_paragraphs_in_order() {
        let mut doc = skeleton();
        let paragraphs = vec!["First.".to_string(), "Second.".to_string()];
        assert!(render_biography(&mut doc, &paragraphs));

        let bio = container(&doc, ids::BIOGRAPHY);
        let children = doc.children(bio).to_vec();
        assert_eq!(children.len(), 2);
        assert_eq!(doc.text(children[0]), Some("First."));
        assert_eq!(doc.text(children[1]), Some("Second."));
        assert!(doc.has_class(children[0], "mb-4"));
    }

    #[test]
    fn biography_replaces_previous_content() {
        let mut doc = skeleton();
        render_biography(&mut doc, &["Old".to_string(), "Older".to_string()]);
        render_biography(&mut doc, &["New".to_string()]);
        let bio = container(&doc, ids::BIOGRAPHY);
        assert_eq!(doc.text_content(bio), "New");
    }

    #[test]
    fn paragraph_text_is_not_markup() {
        let mut doc = skeleton();
        render_biography(&mut doc, &["<b>bold</b>".to_string()]);
        let bio = container(&doc, ids::BIOGRAPHY);
        let html = doc.to_markup(bio).into_string();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn missing_container_is_reported() {
        let mut doc = Document::new();
        assert!(!render_biography(&mut doc, &["x".to_string()]));
        assert!(!render_service_areas(
            &mut doc,
            &[sample_area("A")],
            &AnimationSettings::default()
        ));
        assert!(!render_clinic(&mut doc, &ClinicConfig::default()));
    }

    #[test]
    fn cards_carry_staggered_delay() {
        let mut doc = skeleton();
        let areas = vec![sample_area("A"), sample_area("B"), sample_area("C")];
        render_service_areas(&mut doc, &areas, &AnimationSettings::default());

        let grid = container(&doc, ids::SERVICE_AREAS);
        let delays: Vec<&str> = doc
            .children(grid)
            .iter()
            .map(|c| doc.attribute(*c, "data-aos-delay").unwrap())
            .collect();
        assert_eq!(delays, vec!["0", "100", "200"]);
        assert!(
            doc.children(grid)
                .iter()
                .all(|c| doc.attribute(*c, "data-aos") == Some("fade-up"))
        );
    }

    #[test]
    fn cards_carry_animation_settings() {
        let mut doc = Document::new();
        let animation = AnimationSettings {
            duration_ms: 1234,
            offset_px: 77,
            once: false,
            delay_step_ms: 50,
        };
        let card = area_card(&mut doc, &sample_area("A"), 3, &animation);
        assert_eq!(doc.attribute(card, "data-aos-duration"), Some("1234"));
        assert_eq!(doc.attribute(card, "data-aos-offset"), Some("77"));
        assert_eq!(doc.attribute(card, "data-aos-once"), Some("false"));
        assert_eq!(doc.attribute(card, "data-aos-delay"), Some("150"));

        let defaults = area_card(&mut doc, &sample_area("B"), 0, &AnimationSettings::default());
        assert_eq!(doc.attribute(defaults, "data-aos-duration"), Some("800"));
        assert_eq!(doc.attribute(defaults, "data-aos-offset"), Some("100"));
        assert_eq!(doc.attribute(defaults, "data-aos-once"), Some("true"));
    }

    #[test]
    fn huge_delay_step_saturates() {
        let mut doc = Document::new();
        let animation = AnimationSettings {
            delay_step_ms: u64::MAX,
            ..AnimationSettings::default()
        };
        let card = area_card(&mut doc, &sample_area("A"), 2, &animation);
        let expected = u64::MAX.to_string();
        assert_eq!(doc.attribute(card, "data-aos-delay"), Some(expected.as_str()));
    }

    #[test]
    fn card_markup_escapes_text_but_keeps_icon() {
        let mut doc = Document::new();
        let area = ServiceArea {
            title: "<i>Laser</i>".to_string(),
            description: "Fast & safe".to_string(),
            icon_svg: r#"<path d="M1 1"/>"#.to_string(),
        };
        let card = area_card(&mut doc, &area, 0, &AnimationSettings::default());
        let markup = doc.inner_markup(card).unwrap();
        assert!(markup.contains(r#"<path d="M1 1"/>"#));
        assert!(markup.contains("&lt;i&gt;Laser&lt;/i&gt;"));
        assert!(markup.contains("Fast &amp; safe"));
        assert!(markup.contains("icon-circle"));
    }

    #[test]
    fn incomplete_card_is_empty() {
        let mut doc = Document::new();
        let mut area = sample_area("A");
        area.description.clear();
        let card = area_card(&mut doc, &area, 2, &AnimationSettings::default());
        assert!(doc.inner_markup(card).is_none());
        assert!(doc.children(card).is_empty());
        assert_eq!(doc.attribute(card, "data-aos-delay"), Some("200"));
    }

    #[test]
    fn clinic_paragraphs_have_no_class() {
        let mut doc = skeleton();
        let clinic = ClinicConfig {
            description: vec!["Calm.".to_string()],
            photos: vec![],
        };
        assert!(render_clinic(&mut doc, &clinic));
        let c = container(&doc, ids::CLINIC);
        let p = doc.children(c)[0];
        assert_eq!(doc.text(p), Some("Calm."));
        assert!(doc.classes(p).is_empty());
    }

    #[test]
    fn config_error_fills_all_containers() {
        let mut doc = skeleton();
        render_biography(&mut doc, &["kept?".to_string()]);
        render_config_error(&mut doc);
        for id in CONTENT_CONTAINERS {
            let c = container(&doc, id);
            assert!(doc.children(c).is_empty());
            assert!(doc.inner_markup(c).unwrap().contains("Could not load content"));
        }
    }
}

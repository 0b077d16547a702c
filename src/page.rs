//! The landing page: its fixed structure and its load sequence.
//!
//! [`skeleton`] builds the static page every behavior is keyed to (header
//! with navigation, theme toggle, mobile menu, and the about / areas /
//! clinic / contact sections). [`boot`] runs the load sequence against it:
//!
//! ```text
//! theme toggle → mobile menu → smooth scroll → lazy images → scroll shadow
//!   → content from config (or error panel) → carousel → offline cache
//! ```
//!
//! Lazy images are observed before the config-driven content is inserted,
//! so only images present in the static page are revealed on intersection;
//! carousel images rely on the browser's native `loading="lazy"`.

use crate::carousel::{self, CarouselTargets, SharedCarousel};
use crate::config::{ConfigError, OfflineSettings, SiteConfig};
use crate::content;
use crate::dom::{Document, NodeId};
use crate::lazy::LazyImages;
use crate::menu;
use crate::offline::{self, Registration, ServiceWorkers};
use crate::scroll;
use crate::theme::{self, Storage, Theme};
use crate::timer::Scheduler;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{error, info};

/// Element ids the page behaviors look up.
pub mod ids {
    pub const BIOGRAPHY: &str = "biography-content";
    pub const SERVICE_AREAS: &str = "service-areas";
    pub const CLINIC: &str = "clinic-content";
    pub const CAROUSEL_SLIDES: &str = "carousel-slides";
    pub const CAROUSEL_INDICATORS: &str = "carousel-indicators";
    pub const PREV_BUTTON: &str = "prev-btn";
    pub const NEXT_BUTTON: &str = "next-btn";
    pub const THEME_TOGGLE: &str = "theme-toggle";
    pub const THEME_ICON_SUN: &str = "theme-icon-sun";
    pub const THEME_ICON_MOON: &str = "theme-icon-moon";
    pub const MOBILE_MENU_BUTTON: &str = "mobile-menu-btn";
    pub const MOBILE_MENU: &str = "mobile-menu";
    pub const SECTION_ABOUT: &str = "about";
    pub const SECTION_AREAS: &str = "areas";
    pub const SECTION_CLINIC: &str = "clinic";
    pub const SECTION_CONTACT: &str = "contact";
}

pub const HEADER_HEIGHT_PX: i64 = 80;

/// `(section id, nav label, offset top, height)`
const SECTIONS: [(&str, &str, i64, i64); 4] = [
    (ids::SECTION_ABOUT, "About", 0, 700),
    (ids::SECTION_AREAS, "Services", 700, 800),
    (ids::SECTION_CLINIC, "Clinic", 1500, 900),
    (ids::SECTION_CONTACT, "Contact", 2400, 500),
];

fn with_id(doc: &mut Document, parent: NodeId, tag: &str, id: &str) -> NodeId {
    let node = doc.append_new(parent, tag);
    doc.set_id(node, id);
    node
}

fn nav_links(doc: &mut Document, parent: NodeId) {
    for (id, label, _, _) in SECTIONS {
        let link = doc.append_new(parent, "a");
        doc.set_attribute(link, "href", format!("#{id}"));
        doc.set_text(link, label);
    }
}

/// Build the static page structure with empty content containers.
pub fn skeleton() -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    let header = doc.append_new(body, "header");
    doc.set_class_name(header, "site-header");
    doc.set_layout(header, 0, HEADER_HEIGHT_PX);
    let nav = doc.append_new(header, "nav");
    nav_links(&mut doc, nav);

    let toggle = with_id(&mut doc, header, "button", ids::THEME_TOGGLE);
    doc.set_attribute(toggle, "aria-label", "Toggle dark mode");
    with_id(&mut doc, toggle, "span", ids::THEME_ICON_SUN);
    with_id(&mut doc, toggle, "span", ids::THEME_ICON_MOON);

    let menu_button = with_id(&mut doc, header, "button", ids::MOBILE_MENU_BUTTON);
    doc.set_attribute(menu_button, "aria-label", "Open menu");
    let menu = with_id(&mut doc, header, "div", ids::MOBILE_MENU);
    doc.set_class_name(menu, "hidden");
    nav_links(&mut doc, menu);

    let main = doc.append_new(body, "main");
    for (id, label, top, height) in SECTIONS {
        let section = with_id(&mut doc, main, "section", id);
        doc.set_layout(section, top, height);
        let heading = doc.append_new(section, "h2");
        doc.set_text(heading, label);

        match id {
            ids::SECTION_ABOUT => {
                let portrait = doc.append_new(section, "img");
                doc.set_attribute(portrait, "src", "images/portrait.jpg");
                doc.set_attribute(portrait, "alt", "Portrait");
                doc.set_attribute(portrait, "loading", "lazy");
                with_id(&mut doc, section, "div", ids::BIOGRAPHY);
            }
            ids::SECTION_AREAS => {
                let grid = with_id(&mut doc, section, "div", ids::SERVICE_AREAS);
                doc.set_class_name(grid, "areas-grid");
            }
            ids::SECTION_CLINIC => {
                with_id(&mut doc, section, "div", ids::CLINIC);
                let frame = doc.append_new(section, "div");
                doc.set_class_name(frame, "carousel");
                let track = with_id(&mut doc, frame, "div", ids::CAROUSEL_SLIDES);
                doc.set_class_name(track, "carousel-track");
                let prev = with_id(&mut doc, frame, "button", ids::PREV_BUTTON);
                doc.set_attribute(prev, "aria-label", "Previous photo");
                let next = with_id(&mut doc, frame, "button", ids::NEXT_BUTTON);
                doc.set_attribute(next, "aria-label", "Next photo");
                let indicators = with_id(&mut doc, frame, "div", ids::CAROUSEL_INDICATORS);
                doc.set_class_name(indicators, "carousel-indicators");
            }
            _ => {}
        }
    }

    doc
}

/// Host capabilities the load sequence needs.
pub struct BootOptions<'a, S> {
    pub storage: Rc<RefCell<S>>,
    pub prefers_dark: bool,
    pub service_workers: Option<&'a mut dyn ServiceWorkers>,
}

/// Everything the load sequence set up that outlives it.
#[derive(Debug)]
pub struct Site {
    pub theme: Option<Theme>,
    pub carousel: Option<SharedCarousel>,
    pub lazy_images: LazyImages,
    pub offline: Registration,
    pub content_loaded: bool,
}

impl Site {
    /// Cancel the carousel's auto-advance and drop it.
    pub fn teardown(&mut self, scheduler: &mut Scheduler) {
        if let Some(carousel) = self.carousel.take() {
            carousel.borrow_mut().teardown(scheduler);
        }
    }
}

/// Render the config-driven content and mount the carousel.
pub fn load_content(
    doc: &mut Document,
    scheduler: &mut Scheduler,
    config: &SiteConfig,
) -> Option<SharedCarousel> {
    content::render_biography(doc, &config.about.biography);
    content::render_service_areas(doc, &config.service_areas, &config.animation);
    content::render_clinic(doc, &config.clinic);

    let targets = CarouselTargets::lookup(doc);
    carousel::init_carousel(
        doc,
        scheduler,
        config.clinic.photos.clone(),
        &targets,
        &config.carousel,
    )
}

/// Run the page load sequence. Never fails: a bad config degrades to the
/// error panel and no carousel.
pub fn boot<S>(
    doc: &mut Document,
    scheduler: &mut Scheduler,
    config: Result<SiteConfig, ConfigError>,
    options: BootOptions<'_, S>,
) -> Site
where
    S: Storage + 'static,
{
    let theme = theme::init_theme_toggle(doc, &options.storage, options.prefers_dark);
    menu::init_mobile_menu(doc);
    scroll::init_smooth_scrolling(doc);
    let lazy_images = LazyImages::observe(doc);
    scroll::init_scroll_effects(doc);

    let (carousel, offline_settings, content_loaded) = match config {
        Ok(config) => {
            let carousel = load_content(doc, scheduler, &config);
            (carousel, config.offline, true)
        }
        Err(err) => {
            error!(error = %err, "could not load site config");
            content::render_config_error(doc);
            (None, OfflineSettings::default(), false)
        }
    };

    let offline = offline::register_offline_cache(options.service_workers, &offline_settings);
    info!(
        content_loaded,
        carousel = carousel.is_some(),
        offline = offline.label(),
        "site loaded"
    );

    Site {
        theme,
        carousel,
        lazy_images,
        offline,
        content_loaded,
    }
}

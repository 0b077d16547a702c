//! Shared test utilities for the clinic-site test suite.
//!
//! Provides sample config data and a carousel fixture: a minimal document
//! holding just the four carousel targets, plus a scheduler and settings.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut fx = CarouselFixture::new(&["a.jpg", "b.jpg"]);
//! let carousel = fx.init().unwrap();
//! fx.scheduler.advance(&mut fx.doc, 5000);
//! assert_eq!(fx.active_indicators(&carousel), vec![1]);
//! ```

use crate::carousel::{self, Carousel, CarouselTargets, SharedCarousel};
use crate::config::{CarouselSettings, ServiceArea, SiteConfig, parse_config};
use crate::dom::{Document, NodeId};
use crate::timer::Scheduler;

// =========================================================================
// Config samples
// =========================================================================

/// A complete service area titled `title`.
pub fn sample_area(title: &str) -> ServiceArea {
    ServiceArea {
        title: title.to_string(),
        description: format!("{title} description"),
        icon_svg: r#"<path d="M5 13l4 4L19 7"/>"#.to_string(),
    }
}

/// Two biography paragraphs, two areas, two clinic paragraphs, three photos.
pub fn sample_config() -> SiteConfig {
    parse_config(
        r#"{
            "about": { "biography": ["Trained in São Paulo.", "Fifteen years of practice."] },
            "service_areas": [
                { "title": "Clinical", "description": "Skin care.", "icon_svg": "<path/>" },
                { "title": "Surgical", "description": "Excisions.", "icon_svg": "<path/>" }
            ],
            "clinic": {
                "description": ["Calm rooms.", "Open Saturdays."],
                "photos": ["a.jpg", "b.jpg", "c.jpg"]
            }
        }"#,
    )
    .unwrap()
}

// =========================================================================
// Carousel fixture
// =========================================================================

pub struct CarouselFixture {
    pub doc: Document,
    pub scheduler: Scheduler,
    pub track: NodeId,
    pub indicators: NodeId,
    pub prev: NodeId,
    pub next: NodeId,
    pub slides: Vec<String>,
    pub settings: CarouselSettings,
}

impl CarouselFixture {
    pub fn new(slides: &[&str]) -> Self {
        let mut doc = Document::new();
        let body = doc.body();
        let track = doc.append_new(body, "div");
        let indicators = doc.append_new(body, "div");
        let prev = doc.append_new(body, "button");
        let next = doc.append_new(body, "button");
        Self {
            doc,
            scheduler: Scheduler::new(),
            track,
            indicators,
            prev,
            next,
            slides: slides.iter().map(|s| s.to_string()).collect(),
            settings: CarouselSettings::default(),
        }
    }

    pub fn targets(&self) -> CarouselTargets {
        CarouselTargets::new(self.track, self.indicators, self.prev, self.next)
    }

    /// Mount without starting auto-advance. Panics if mounting fails.
    pub fn mount(&mut self) -> SharedCarousel {
        let targets = self.targets();
        Carousel::mount(&mut self.doc, self.slides.clone(), &targets, &self.settings)
            .expect("carousel should mount")
    }

    /// Mount and start auto-advance, as the page does.
    pub fn init(&mut self) -> Option<SharedCarousel> {
        let targets = self.targets();
        carousel::init_carousel(
            &mut self.doc,
            &mut self.scheduler,
            self.slides.clone(),
            &targets,
            &self.settings,
        )
    }

    /// Positions of indicators carrying the `active` class.
    pub fn active_indicators(&self, carousel: &SharedCarousel) -> Vec<usize> {
        carousel
            .borrow()
            .indicators()
            .iter()
            .enumerate()
            .filter(|(_, id)| self.doc.has_class(**id, "active"))
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn track_transform(&self) -> Option<&str> {
        self.doc.style(self.track, "transform")
    }
}

//! Clinic photo carousel.
//!
//! Displays one slide at a time from an ordered list of image locators, with
//! previous/next buttons, one indicator per slide for direct navigation, and
//! an auto-advance interval when there is more than one slide.
//!
//! ## State
//!
//! The controller owns `current`, which is `Some(i)` with `i < len` whenever
//! slides exist and `None` for an empty carousel. It only changes through
//! [`Carousel::go_to`], [`Carousel::prev`], and [`Carousel::next`]; every
//! change re-renders the track offset and the active indicator.
//!
//! ## Rendering Targets
//!
//! The four targets (slide track, indicator group, previous button, next
//! button) are passed in explicitly through [`CarouselTargets`]. If any is
//! absent the carousel does not mount at all; [`init_carousel`] logs that
//! and the rest of the page carries on.
//!
//! ## Ownership
//!
//! Listeners and the auto-advance task hold a `Weak` reference to the
//! shared controller, so dropping the last [`SharedCarousel`] turns them
//! into no-ops. [`Carousel::teardown`] cancels the interval explicitly.

use crate::config::CarouselSettings;
use crate::dom::{Document, EventKind, NodeId};
use crate::page::ids;
use crate::timer::{Scheduler, TimerHandle};
use maud::html;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel elements not found: {}", .missing.join(", "))]
    MissingUiElement { missing: Vec<&'static str> },
    #[error("no photos configured for the carousel")]
    EmptySlideList,
    #[error("slide index {index} out of range for {len} slides")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type SharedCarousel = Rc<RefCell<Carousel>>;

/// The four elements a carousel renders into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarouselTargets {
    pub track: Option<NodeId>,
    pub indicators: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
}

impl CarouselTargets {
    pub fn new(track: NodeId, indicators: NodeId, prev: NodeId, next: NodeId) -> Self {
        Self {
            track: Some(track),
            indicators: Some(indicators),
            prev: Some(prev),
            next: Some(next),
        }
    }

    /// Resolve the targets by the page's fixed element ids.
    pub fn lookup(doc: &Document) -> Self {
        Self {
            track: doc.get_element_by_id(ids::CAROUSEL_SLIDES),
            indicators: doc.get_element_by_id(ids::CAROUSEL_INDICATORS),
            prev: doc.get_element_by_id(ids::PREV_BUTTON),
            next: doc.get_element_by_id(ids::NEXT_BUTTON),
        }
    }

    fn resolve(&self, doc: &Document) -> Result<Resolved, CarouselError> {
        let check = |target: Option<NodeId>| target.filter(|id| doc.is_attached(*id));
        let slots = [
            ("track", check(self.track)),
            ("indicators", check(self.indicators)),
            ("prev", check(self.prev)),
            ("next", check(self.next)),
        ];
        let missing: Vec<&'static str> = slots
            .iter()
            .filter(|(_, id)| id.is_none())
            .map(|(name, _)| *name)
            .collect();

        match slots {
            [(_, Some(track)), (_, Some(indicators)), (_, Some(prev)), (_, Some(next))] => {
                Ok(Resolved {
                    track,
                    indicators,
                    prev,
                    next,
                })
            }
            _ => Err(CarouselError::MissingUiElement { missing }),
        }
    }
}

struct Resolved {
    track: NodeId,
    indicators: NodeId,
    prev: NodeId,
    next: NodeId,
}

#[derive(Debug)]
pub struct Carousel {
    slides: Vec<String>,
    current: Option<usize>,
    track: NodeId,
    indicators: Vec<NodeId>,
    interval_ms: u64,
    autoplay: Option<TimerHandle>,
}

impl Carousel {
    /// Build the slides and indicators and wire the navigation controls.
    ///
    /// An empty slide list renders a placeholder slide and yields a carousel
    /// with no current slide; navigation on it does nothing.
    pub fn mount(
        doc: &mut Document,
        slides: Vec<String>,
        targets: &CarouselTargets,
        settings: &CarouselSettings,
    ) -> Result<SharedCarousel, CarouselError> {
        let resolved = targets.resolve(doc)?;

        doc.clear_children(resolved.track);
        doc.clear_children(resolved.indicators);

        if slides.is_empty() {
            warn!(error = %CarouselError::EmptySlideList, "rendering carousel placeholder");
            let placeholder = doc.append_new(resolved.track, "div");
            doc.set_class_name(placeholder, "carousel-slide");
            doc.set_inner_markup(
                placeholder,
                html! {
                    div.flex.items-center.justify-center.h-full."bg-gray-200"."dark:bg-gray-700" {
                        p."text-gray-500" { "Photos not available" }
                    }
                },
            );
            return Ok(Rc::new(RefCell::new(Self {
                slides,
                current: None,
                track: resolved.track,
                indicators: Vec::new(),
                interval_ms: settings.interval_ms,
                autoplay: None,
            })));
        }

        let mut indicators = Vec::with_capacity(slides.len());
        for (index, src) in slides.iter().enumerate() {
            let slide = doc.append_new(resolved.track, "div");
            doc.set_class_name(slide, "carousel-slide");
            let img = doc.append_new(slide, "img");
            doc.set_attribute(img, "src", src.as_str());
            doc.set_attribute(img, "alt", format!("Clinic photo {}", index + 1));
            doc.set_attribute(img, "loading", "lazy");
            let fallback = settings.fallback_image.clone();
            doc.add_listener(img, EventKind::Error, move |doc, event| {
                if doc.attribute(event.target, "src") != Some(fallback.as_str()) {
                    debug!(fallback = %fallback, "slide image failed to load");
                    doc.set_attribute(event.target, "src", fallback.as_str());
                }
            });

            let indicator = doc.append_new(resolved.indicators, "button");
            doc.set_class_name(indicator, "carousel-indicator");
            doc.set_attribute(indicator, "aria-label", format!("Go to slide {}", index + 1));
            indicators.push(indicator);
        }

        let carousel = Rc::new(RefCell::new(Self {
            slides,
            current: Some(0),
            track: resolved.track,
            indicators: indicators.clone(),
            interval_ms: settings.interval_ms,
            autoplay: None,
        }));

        let weak = Rc::downgrade(&carousel);
        doc.add_listener(resolved.prev, EventKind::Click, move |doc, _| {
            with_carousel(&weak, |c| c.prev(doc));
        });
        let weak = Rc::downgrade(&carousel);
        doc.add_listener(resolved.next, EventKind::Click, move |doc, _| {
            with_carousel(&weak, |c| c.next(doc));
        });
        for (index, indicator) in indicators.into_iter().enumerate() {
            let weak = Rc::downgrade(&carousel);
            doc.add_listener(indicator, EventKind::Click, move |doc, _| {
                with_carousel(&weak, |c| {
                    if let Err(error) = c.go_to(doc, index) {
                        debug!(%error, "indicator click ignored");
                    }
                });
            });
        }

        carousel.borrow().render(doc);
        Ok(carousel)
    }

    /// Start the auto-advance interval. Only runs with more than one slide.
    ///
    /// Returns the interval handle, or `None` when auto-advance does not apply.
    pub fn start_autoplay(
        carousel: &SharedCarousel,
        scheduler: &mut Scheduler,
    ) -> Option<TimerHandle> {
        let mut this = carousel.borrow_mut();
        if this.slides.len() < 2 {
            return None;
        }
        if let Some(handle) = this.autoplay {
            return Some(handle);
        }
        let weak = Rc::downgrade(carousel);
        let handle = scheduler.set_interval(this.interval_ms, move |doc| {
            with_carousel(&weak, |c| c.next(doc));
        });
        this.autoplay = Some(handle);
        Some(handle)
    }

    /// Cancel the auto-advance interval. Returns `false` if none was running.
    pub fn stop_autoplay(&mut self, scheduler: &mut Scheduler) -> bool {
        match self.autoplay.take() {
            Some(handle) => scheduler.cancel(handle),
            None => false,
        }
    }

    /// Release everything the carousel scheduled.
    pub fn teardown(&mut self, scheduler: &mut Scheduler) {
        self.stop_autoplay(scheduler);
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Jump to `index`. An out-of-range index is rejected and leaves the
    /// current slide unchanged.
    pub fn go_to(&mut self, doc: &mut Document, index: usize) -> Result<(), CarouselError> {
        if index >= self.slides.len() {
            return Err(CarouselError::IndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        self.current = Some(index);
        self.render(doc);
        Ok(())
    }

    pub fn prev(&mut self, doc: &mut Document) {
        let Some(current) = self.current else {
            return;
        };
        self.current = Some(if current == 0 {
            self.slides.len() - 1
        } else {
            current - 1
        });
        self.render(doc);
    }

    pub fn next(&mut self, doc: &mut Document) {
        let Some(current) = self.current else {
            return;
        };
        self.current = Some(if current == self.slides.len() - 1 {
            0
        } else {
            current + 1
        });
        self.render(doc);
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    pub fn indicators(&self) -> &[NodeId] {
        &self.indicators
    }

    /// Horizontal track offset in percent: `-current * 100`.
    pub fn offset_percent(&self) -> i64 {
        self.current.map_or(0, |c| -(c as i64) * 100)
    }

    fn render(&self, doc: &mut Document) {
        let Some(current) = self.current else {
            return;
        };
        doc.set_style(
            self.track,
            "transform",
            format!("translateX({}%)", self.offset_percent()),
        );
        for (index, indicator) in self.indicators.iter().enumerate() {
            doc.toggle_class(*indicator, "active", Some(index == current));
        }
    }
}

fn with_carousel(weak: &Weak<RefCell<Carousel>>, f: impl FnOnce(&mut Carousel)) {
    let Some(carousel) = weak.upgrade() else {
        return;
    };
    match carousel.try_borrow_mut() {
        Ok(mut carousel) => f(&mut carousel),
        Err(_) => debug!("carousel busy, skipping re-entrant navigation"),
    }
}

/// Mount the carousel and start auto-advance, logging instead of failing.
///
/// Returns `None` when the rendering targets are missing.
pub fn init_carousel(
    doc: &mut Document,
    scheduler: &mut Scheduler,
    slides: Vec<String>,
    targets: &CarouselTargets,
    settings: &CarouselSettings,
) -> Option<SharedCarousel> {
    match Carousel::mount(doc, slides, targets, settings) {
        Ok(carousel) => {
            Carousel::start_autoplay(&carousel, scheduler);
            Some(carousel)
        }
        Err(err) => {
            warn!(error = %err, "carousel not initialized");
            None
        }
    }
}

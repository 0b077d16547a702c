//! # Clinic Site
//!
//! Content rendering and page behaviors for a single-page clinic website.
//! One `config.json` supplies the biography, the service-area cards, the
//! clinic description, and the photo carousel; everything else on the page
//! is presentational behavior wired to a fixed page structure.
//!
//! # Architecture: A Page Without a Browser
//!
//! Every behavior is written against [`dom::Document`], an in-memory page
//! with explicit element handles, and [`timer::Scheduler`], a virtual-time
//! event loop. Components receive the handles they render into rather than
//! reaching for globals, so each one is testable in isolation:
//!
//! ```text
//! config.json ──► config::SiteConfig
//!                    │
//!                    ▼
//! page::skeleton() ─► page::boot ─► content renderers
//!                                 ─► carousel (+ scheduler interval)
//!                                 ─► theme / menu / scroll / lazy / offline
//! ```
//!
//! Execution is single-threaded. Event listeners and timer callbacks run to
//! completion one at a time, which is what keeps the carousel's slide index
//! race-free without any locking.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | Photo carousel: slides, indicators, wrap-around navigation, auto-advance |
//! | [`config`] | `config.json` loading and validation |
//! | [`content`] | Biography, service-area cards, clinic description, error panel |
//! | [`dom`] | In-memory document: elements, classes, style, events, markup snapshot |
//! | [`timer`] | Virtual-time scheduler with cancellable intervals |
//! | [`theme`] | Dark-mode toggle with persisted preference |
//! | [`menu`] | Mobile menu open/close behavior |
//! | [`scroll`] | Smooth anchor scrolling and header scroll shadow |
//! | [`lazy`] | Lazy image reveal on intersection |
//! | [`offline`] | Service-worker registration for the offline cache |
//! | [`page`] | Fixed page structure and the load sequence |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Rendering Targets
//!
//! The carousel takes its slide track, indicator group, and buttons as
//! [`carousel::CarouselTargets`]. A missing target means the carousel does
//! not mount; the failure is logged and the rest of the page is unaffected.
//!
//! ## Cancellable Auto-Advance
//!
//! The carousel's auto-advance is a scheduler interval owned by the
//! controller and cancelled by [`carousel::Carousel::teardown`]. Callbacks
//! hold a weak reference, so a dropped carousel never advances.
//!
//! ## Maud for Card Markup
//!
//! Service-area cards and notices are built with [Maud](https://maud.lambda.xyz/),
//! so titles and descriptions are escaped by construction. Only the icon's
//! SVG path data is inserted verbatim.

pub mod carousel;
pub mod config;
pub mod content;
pub mod dom;
pub mod lazy;
pub mod menu;
pub mod offline;
pub mod output;
pub mod page;
pub mod scroll;
pub mod theme;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_helpers;

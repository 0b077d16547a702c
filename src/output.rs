//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity (paragraph, card, photo) is shown by positional index and a
//! short preview of its content, with details on indented context lines:
//!
//! ```text
//! Biography
//!     001 Board-certified dermatologist with fifteen years of clinical...
//!
//! Service areas
//!     001 Clinical Dermatology
//!         Diagnosis and treatment of skin, hair, and nail conditions.
//!
//! Clinic
//!     001 Our clinic is designed around comfort and privacy.
//!
//! Photos (3)
//!     001 images/clinic-reception.jpg
//!
//! Carousel
//!     Interval: 5000 ms
//!     Fallback: images/placeholder.jpg
//! ```
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::config::SiteConfig;
use crate::page::Site;
use crate::theme::Theme;

/// Preview length for paragraphs and descriptions.
const PREVIEW_CHARS: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn paragraph_lines(lines: &mut Vec<String>, paragraphs: &[String]) {
    if paragraphs.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, p) in paragraphs.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            format_index(i + 1),
            truncate(p.trim(), PREVIEW_CHARS)
        ));
    }
}

/// Format the content inventory of a loaded config.
pub fn format_config_summary(config: &SiteConfig) -> Vec<String> {
    let mut lines = vec!["Biography".to_string()];
    paragraph_lines(&mut lines, &config.about.biography);

    lines.push(String::new());
    lines.push("Service areas".to_string());
    if config.service_areas.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, area) in config.service_areas.iter().enumerate() {
        let marker = if area.is_complete() { "" } else { " (incomplete)" };
        lines.push(format!(
            "{}{} {}{}",
            indent(1),
            format_index(i + 1),
            area.title,
            marker
        ));
        if !area.description.trim().is_empty() {
            lines.push(format!(
                "{}{}",
                indent(2),
                truncate(area.description.trim(), PREVIEW_CHARS)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Clinic".to_string());
    paragraph_lines(&mut lines, &config.clinic.description);

    lines.push(String::new());
    lines.push(format!("Photos ({})", config.clinic.photos.len()));
    for (i, photo) in config.clinic.photos.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), photo));
    }

    lines.push(String::new());
    lines.push("Carousel".to_string());
    lines.push(format!("{}Interval: {} ms", indent(1), config.carousel.interval_ms));
    lines.push(format!("{}Fallback: {}", indent(1), config.carousel.fallback_image));

    lines
}

pub fn print_config_summary(config: &SiteConfig) {
    for line in format_config_summary(config) {
        println!("{}", line);
    }
}

/// Format the state of a booted page after `elapsed_ms` of virtual time.
///
/// ```text
/// Page after 5000 ms
///     Theme: light
///     Content: loaded
///     Carousel: slide 2 of 3 (offset -100%, auto-advance on)
///     Offline cache: registered
/// ```
pub fn format_page_state(site: &Site, elapsed_ms: u64) -> Vec<String> {
    let theme = match site.theme {
        Some(Theme::Dark) => "dark",
        Some(Theme::Light) => "light",
        None => "unavailable",
    };
    let carousel = match &site.carousel {
        None => "not mounted".to_string(),
        Some(carousel) => {
            let carousel = carousel.borrow();
            match carousel.current() {
                None => "placeholder (no photos)".to_string(),
                Some(current) => format!(
                    "slide {} of {} (offset {}%, auto-advance {})",
                    current + 1,
                    carousel.len(),
                    carousel.offset_percent(),
                    if carousel.is_autoplaying() { "on" } else { "off" }
                ),
            }
        }
    };
    let content = if site.content_loaded { "loaded" } else { "error" };

    vec![
        format!("Page after {} ms", elapsed_ms),
        format!("{}Theme: {}", indent(1), theme),
        format!("{}Content: {}", indent(1), content),
        format!("{}Carousel: {}", indent(1), carousel),
        format!("{}Offline cache: {}", indent(1), site.offline.label()),
    ]
}

pub fn print_page_state(site: &Site, elapsed_ms: u64) {
    for line in format_page_state(site, elapsed_ms) {
        println!("{}", line);
    }
}

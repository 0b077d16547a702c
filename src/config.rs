//! Site configuration module.
//!
//! Handles loading and validating `config.json`, the single document that
//! feeds every piece of dynamic page content: the biography paragraphs, the
//! service-area cards, the clinic description, and the carousel photos.
//!
//! ## Config File
//!
//! ```json
//! {
//!   "about": { "biography": ["First paragraph.", "Second paragraph."] },
//!   "service_areas": [
//!     { "title": "Clinical", "description": "…", "icon_svg": "<path d=\"…\"/>" }
//!   ],
//!   "clinic": {
//!     "description": ["A calm, modern clinic."],
//!     "photos": ["images/clinic-1.jpg", "images/clinic-2.jpg"]
//!   },
//!   "carousel": { "interval_ms": 5000, "fallback_image": "images/placeholder.jpg" },
//!   "animation": { "duration_ms": 800, "offset_px": 100, "once": true, "delay_step_ms": 100 },
//!   "offline": { "enabled": true, "script_url": "/sw.js" }
//! }
//! ```
//!
//! Content keys also accept the Portuguese names used by existing site
//! configs (`sobre.curriculo`, `areasAtuacao`, `titulo`, `descricao`,
//! `clinica.fotos`), so those files load unchanged.
//!
//! ## Partial Configuration
//!
//! Every section is optional and falls back to its default; an empty object
//! `{}` is a valid config that renders an empty page with a placeholder
//! carousel. Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Biography section.
    #[serde(alias = "sobre")]
    pub about: AboutConfig,
    /// Cards for the service-area grid, in display order.
    #[serde(alias = "areasAtuacao")]
    pub service_areas: Vec<ServiceArea>,
    /// Clinic description and carousel photos.
    #[serde(alias = "clinica")]
    pub clinic: ClinicConfig,
    /// Carousel timing and fallback image.
    pub carousel: CarouselSettings,
    /// Scroll-reveal animation settings.
    pub animation: AnimationSettings,
    /// Offline cache (service worker) registration.
    pub offline: OfflineSettings,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be greater than 0".into(),
            ));
        }
        if self.carousel.fallback_image.trim().is_empty() {
            return Err(ConfigError::Validation(
                "carousel.fallback_image must not be empty".into(),
            ));
        }
        if let Some(pos) = self.clinic.photos.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "clinic.photos[{pos}] must not be empty"
            )));
        }
        if self.offline.enabled && self.offline.script_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "offline.script_url must not be empty when offline.enabled is true".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AboutConfig {
    /// Biography paragraphs, rendered as plain text.
    #[serde(alias = "curriculo")]
    pub biography: Vec<String>,
}

/// One card in the service-area grid.
///
/// All three fields are required for the card to render; a card missing any
/// of them is logged and left empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceArea {
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(alias = "descricao")]
    pub description: String,
    /// Inner SVG markup (paths only); inserted verbatim inside a 24×24 `<svg>`.
    pub icon_svg: String,
}

impl ServiceArea {
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.icon_svg.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClinicConfig {
    #[serde(alias = "descricao")]
    pub description: Vec<String>,
    /// Image locators for the carousel, in display order.
    #[serde(alias = "fotos")]
    pub photos: Vec<String>,
}

/// Carousel timing and image fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselSettings {
    /// Auto-advance period in milliseconds.
    pub interval_ms: u64,
    /// Image substituted when a slide image fails to load.
    pub fallback_image: String,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            fallback_image: "images/placeholder.jpg".to_string(),
        }
    }
}

/// Scroll-reveal animation settings, emitted on each service-area card as
/// `data-aos-duration`, `data-aos-offset`, `data-aos-once` and `data-aos-delay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    pub duration_ms: u64,
    /// Distance in pixels before an element's reveal triggers.
    pub offset_px: u32,
    /// Reveal only the first time an element scrolls into view.
    pub once: bool,
    /// Reveal delay added per card position in the service-area grid.
    pub delay_step_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: 800,
            offset_px: 100,
            once: true,
            delay_step_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OfflineSettings {
    pub enabled: bool,
    pub script_url: String,
}

impl Default for OfflineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            script_url: "/sw.js".to_string(),
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse and validate a config document.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `config.json` from `path`.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a stock `config.json` with sample content and every setting.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_json() -> &'static str {
    r##"{
  "about": {
    "biography": [
      "Board-certified dermatologist with fifteen years of clinical practice.",
      "Residency and fellowship in clinical and surgical dermatology."
    ]
  },
  "service_areas": [
    {
      "title": "Clinical Dermatology",
      "description": "Diagnosis and treatment of skin, hair, and nail conditions.",
      "icon_svg": "<path stroke-linecap=\"round\" stroke-linejoin=\"round\" stroke-width=\"2\" d=\"M9 12l2 2 4-4\"/>"
    },
    {
      "title": "Skin Cancer Screening",
      "description": "Full-body mole mapping and dermoscopy.",
      "icon_svg": "<path stroke-linecap=\"round\" stroke-linejoin=\"round\" stroke-width=\"2\" d=\"M15 12a3 3 0 11-6 0 3 3 0 016 0z\"/>"
    }
  ],
  "clinic": {
    "description": [
      "Our clinic is designed around comfort and privacy.",
      "Appointments are available Monday through Saturday."
    ],
    "photos": [
      "images/clinic-reception.jpg",
      "images/clinic-office.jpg",
      "images/clinic-procedure-room.jpg"
    ]
  },
  "carousel": {
    "interval_ms": 5000,
    "fallback_image": "images/placeholder.jpg"
  },
  "animation": {
    "duration_ms": 800,
    "offset_px": 100,
    "once": true,
    "delay_step_ms": 100
  },
  "offline": {
    "enabled": true,
    "script_url": "/sw.js"
  }
}
"##
}

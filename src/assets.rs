//! One-shot loading of fonts and the optional background template.

use ab_glyph::FontArc;
use image::RgbaImage;

use crate::config::LayoutConfig;
use crate::error::StoreError;

/// Drawing resources loaded once at startup and passed by reference into the
/// composer.
pub struct Assets {
    /// Regular text font.
    pub font: FontArc,
    /// Bold font for the title and prices.
    pub font_bold: FontArc,
    /// Optional background template, already decoded.
    pub template: Option<RgbaImage>,
}

impl Assets {
    /// Load fonts and the optional template named by the layout config.
    ///
    /// A missing or undecodable template degrades to the flat background
    /// fill with a warning; a missing font is fatal since no text can be
    /// drawn without one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Asset`] if either font cannot be read or parsed.
    pub fn load(layout: &LayoutConfig) -> Result<Self, StoreError> {
        let font = load_font(&layout.font)?;
        let font_bold = load_font(&layout.font_bold)?;

        let template = match &layout.template {
            Some(path) => match image::open(path) {
                Ok(img) => Some(img.to_rgba8()),
                Err(e) => {
                    tracing::warn!("failed to load template {}: {e}", path.display());
                    None
                }
            },
            None => None,
        };

        Ok(Self { font, font_bold, template })
    }
}

fn load_font(path: &std::path::Path) -> Result<FontArc, StoreError> {
    let bytes = std::fs::read(path)
        .map_err(|e| StoreError::Asset(format!("failed to read font {}: {e}", path.display())))?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| StoreError::Asset(format!("invalid font {}: {e}", path.display())))
}

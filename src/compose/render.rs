//! Store image rendering.
//!
//! `compose` is a pure function from a snapshot plus layout constants to a
//! finished raster: same inputs, pixel-identical output. It performs no I/O;
//! thumbnails arrive as bytes on the entries and fonts arrive pre-loaded in
//! [`Assets`].

use ab_glyph::PxScale;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use super::layout::{CellRect, GridLayout};
use crate::assets::Assets;
use crate::catalog::{format_price, CatalogEntry, StoreSnapshot};
use crate::config::{LayoutConfig, StoreConfig};
use crate::error::StoreError;

/// Flat fill used where a thumbnail is missing or undecodable.
pub const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([52, 54, 66, 255]);

const TEXT_BAND_COLOR: Rgba<u8> = Rgba([26, 27, 34, 255]);

/// A finished store image: one immutable RGBA buffer plus its dimensions.
pub struct ComposedImage {
    /// The rendered canvas.
    pub image: RgbaImage,
}

impl ComposedImage {
    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode the canvas as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Image`] if encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, StoreError> {
        let mut buf = std::io::Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| StoreError::Image(format!("failed to encode PNG: {e}")))?;
        Ok(buf.into_inner())
    }
}

/// Render a snapshot into a single store image.
///
/// Entries are tiled row-major in snapshot order; the last row may be
/// partial and is left-aligned with the remaining cells left as background.
/// An entry with no usable thumbnail still occupies its slot with a
/// placeholder tile and its text. An empty snapshot yields header and
/// footer only.
#[must_use]
pub fn compose(
    snapshot: &StoreSnapshot,
    cfg: &LayoutConfig,
    store: &StoreConfig,
    assets: &Assets,
) -> ComposedImage {
    let grid = GridLayout::new(snapshot.entries.len(), cfg);
    let mut canvas = RgbaImage::from_pixel(grid.width, grid.height, opaque(cfg.background));

    if let Some(template) = &assets.template {
        paste_template(&mut canvas, template);
    }

    draw_header(&mut canvas, grid.width, snapshot, cfg, store, assets);

    for (i, entry) in snapshot.entries.iter().enumerate() {
        draw_cell(&mut canvas, grid.cell_rect(i), entry, cfg, assets);
    }

    draw_footer(&mut canvas, grid.width, grid.height, cfg, store, assets);

    ComposedImage { image: canvas }
}

fn opaque(rgb: [u8; 3]) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}

/// Scale the template to the canvas width and paste it at the top.
fn paste_template(canvas: &mut RgbaImage, template: &RgbaImage) {
    if template.width() == 0 || template.height() == 0 {
        return;
    }
    let scale = f64::from(canvas.width()) / f64::from(template.width());
    let h = f64::from(template.height()) * scale;
    let h = h.ceil().max(1.0);
    let scaled = imageops::resize(
        template,
        canvas.width(),
        h as u32,
        FilterType::Triangle,
    );
    imageops::overlay(canvas, &scaled, 0, 0);
}

fn draw_header(
    canvas: &mut RgbaImage,
    width: u32,
    snapshot: &StoreSnapshot,
    cfg: &LayoutConfig,
    store: &StoreConfig,
    assets: &Assets,
) {
    let color = opaque(cfg.text_color);

    let title_scale = PxScale::from(cfg.title_size);
    let x = centered_x(width, title_scale, &assets.font_bold, &store.name);
    draw_text_mut(canvas, color, x, 24, title_scale, &assets.font_bold, &store.name);

    let date = snapshot.human_date();
    let date_scale = PxScale::from(cfg.name_size + 4.0);
    let x = centered_x(width, date_scale, &assets.font, &date);
    let y = 24 + cfg.title_size.ceil() as i32 + 10;
    draw_text_mut(canvas, color, x, y, date_scale, &assets.font, &date);
}

fn draw_footer(
    canvas: &mut RgbaImage,
    width: u32,
    height: u32,
    cfg: &LayoutConfig,
    store: &StoreConfig,
    assets: &Assets,
) {
    let Some(url) = &store.details_url else { return };
    let scale = PxScale::from(cfg.label_size + 2.0);
    let x = centered_x(width, scale, &assets.font, url);
    let y = (height - cfg.footer_height) as i32 + 16;
    draw_text_mut(canvas, opaque(cfg.text_color), x, y, scale, &assets.font, url);
}

fn draw_cell(
    canvas: &mut RgbaImage,
    rect: CellRect,
    entry: &CatalogEntry,
    cfg: &LayoutConfig,
    assets: &Assets,
) {
    let band = text_band_height(cfg).min(rect.h);
    let image_h = rect.h - band;

    // Thumbnail region: decoded bytes cover-cropped to fit, or a flat tile.
    if image_h > 0 {
        let decoded = entry
            .thumbnail
            .as_deref()
            .and_then(|bytes| match image::load_from_memory(bytes) {
                Ok(img) => Some(img.to_rgba8()),
                Err(e) => {
                    tracing::warn!("undecodable thumbnail for {}: {e}", entry.id);
                    None
                }
            });
        match decoded {
            Some(thumb) => {
                let fitted = cover(&thumb, rect.w, image_h);
                imageops::overlay(canvas, &fitted, i64::from(rect.x), i64::from(rect.y));
            }
            None => {
                let region = Rect::at(rect.x as i32, rect.y as i32).of_size(rect.w, image_h);
                draw_filled_rect_mut(canvas, region, PLACEHOLDER_COLOR);
            }
        }
    }

    // Text band under the thumbnail.
    let band_top = rect.y + image_h;
    let band_rect = Rect::at(rect.x as i32, band_top as i32).of_size(rect.w, band);
    draw_filled_rect_mut(canvas, band_rect, TEXT_BAND_COLOR);

    let text_color = opaque(cfg.text_color);
    let accent = opaque(entry.rarity.accent());
    let pad = 10;
    let max_w = rect.w.saturating_sub(20);
    let tx = rect.x as i32 + pad;
    let mut ty = band_top as i32 + 6;

    let label_scale = PxScale::from(cfg.label_size);
    let label = truncate_to_width(
        &entry.category.to_uppercase(),
        label_scale,
        &assets.font,
        max_w,
    );
    draw_text_mut(canvas, accent, tx, ty, label_scale, &assets.font, &label);
    ty += cfg.label_size.ceil() as i32 + 4;

    let name_scale = PxScale::from(cfg.name_size);
    let name = truncate_to_width(&entry.name, name_scale, &assets.font, max_w);
    draw_text_mut(canvas, text_color, tx, ty, name_scale, &assets.font, &name);
    ty += cfg.name_size.ceil() as i32 + 4;

    let price_scale = PxScale::from(cfg.price_size);
    let price = format_price(entry.price_cents);
    draw_text_mut(canvas, text_color, tx, ty, price_scale, &assets.font_bold, &price);

    // 2px rarity frame around the whole cell.
    let outer = Rect::at(rect.x as i32, rect.y as i32).of_size(rect.w, rect.h);
    draw_hollow_rect_mut(canvas, outer, accent);
    if rect.w > 2 && rect.h > 2 {
        let inner = Rect::at(rect.x as i32 + 1, rect.y as i32 + 1).of_size(rect.w - 2, rect.h - 2);
        draw_hollow_rect_mut(canvas, inner, accent);
    }
}

/// Height of the text band at the bottom of each cell.
fn text_band_height(cfg: &LayoutConfig) -> u32 {
    (cfg.label_size + cfg.name_size + cfg.price_size).ceil() as u32 + 28
}

/// Resize to cover a `w` x `h` region, then center-crop the overflow.
fn cover(src: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    let scale = f64::max(
        f64::from(w) / f64::from(src.width().max(1)),
        f64::from(h) / f64::from(src.height().max(1)),
    );
    let rw = ((f64::from(src.width()) * scale).ceil() as u32).max(w);
    let rh = ((f64::from(src.height()) * scale).ceil() as u32).max(h);
    let resized = imageops::resize(src, rw, rh, FilterType::Triangle);
    imageops::crop_imm(&resized, (rw - w) / 2, (rh - h) / 2, w, h).to_image()
}

/// X position that centers `text` horizontally on a canvas of `width`.
fn centered_x(width: u32, scale: PxScale, font: &ab_glyph::FontArc, text: &str) -> i32 {
    let (text_w, _) = text_size(scale, font, text);
    let x = (i64::from(width) - i64::from(text_w)) / 2;
    x.max(0) as i32
}

/// Shorten `text` with a trailing ellipsis until it fits `max_w` pixels.
///
/// Always returns something drawable; oversized input never errors.
fn truncate_to_width(text: &str, scale: PxScale, font: &ab_glyph::FontArc, max_w: u32) -> String {
    let fits = |s: &str| {
        let (w, _) = text_size(scale, font, s);
        i64::from(w) <= i64::from(max_w)
    };
    if fits(text) {
        return text.to_string();
    }
    let mut stem: String = text.to_string();
    while !stem.is_empty() {
        stem.pop();
        let candidate = format!("{}…", stem.trim_end());
        if fits(&candidate) {
            return candidate;
        }
    }
    "…".to_string()
}

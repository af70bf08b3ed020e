//! Image saving and media-limit compression.

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};

use crate::error::StoreError;

/// Write encoded PNG bytes to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written.
pub fn save_image(png: &[u8], path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, png)?;
    Ok(())
}

/// Re-encode the image at progressively smaller widths until the PNG fits
/// within `limit` bytes. Input that already fits is returned unchanged.
///
/// # Errors
///
/// Returns [`StoreError::Image`] if the bytes cannot be decoded or no
/// usable width fits the limit.
pub fn shrink_to_limit(png: &[u8], limit: usize) -> Result<Vec<u8>, StoreError> {
    if png.len() <= limit {
        return Ok(png.to_vec());
    }

    let full = image::load_from_memory(png)
        .map_err(|e| StoreError::Image(format!("failed to decode image for compression: {e}")))?
        .to_rgba8();

    let mut width = full.width();
    while width >= 64 {
        width = width * 3 / 4;
        let height =
            (f64::from(full.height()) * f64::from(width) / f64::from(full.width())).ceil() as u32;
        let scaled = imageops::resize(&full, width.max(1), height.max(1), FilterType::Triangle);

        let mut buf = Cursor::new(Vec::new());
        scaled
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| StoreError::Image(format!("failed to re-encode image: {e}")))?;
        let bytes = buf.into_inner();
        if bytes.len() <= limit {
            tracing::debug!("compressed image to {}x{height} ({} bytes)", width.max(1), bytes.len());
            return Ok(bytes);
        }
    }

    Err(StoreError::Image(format!("could not compress image under {limit} bytes")))
}

//! Saving captured frames.

use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::error::{RenderError, RenderResult};

fn to_image(data: &[u8], width: u32, height: u32) -> RenderResult<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    ImageBuffer::from_raw(width, height, data.to_vec()).ok_or(RenderError::InvalidImageData)
}

/// Saves RGBA8 pixel data to an image file.
///
/// The format follows the extension: `.png`, or `.jpg`/`.jpeg` (alpha is
/// dropped).
pub fn save_image(path: impl AsRef<Path>, data: &[u8], width: u32, height: u32) -> RenderResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let img = to_image(data, width, height)?;
    match extension.as_str() {
        "png" => img.save_with_format(path, image::ImageFormat::Png)?,
        "jpg" | "jpeg" => {
            image::DynamicImage::ImageRgba8(img)
                .to_rgb8()
                .save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => return Err(RenderError::UnsupportedFormat(extension)),
    }

    log::info!("saved {width}x{height} image to {}", path.display());
    Ok(())
}

/// Encodes RGBA8 pixel data as PNG in memory.
pub fn encode_png(data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let img = to_image(data, width, height)?;
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

//! Static image shown on the landing page.
//!
use std::{io::Cursor, path::Path};

use anyhow::Result;
use bytes::Bytes;
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, ColorType};

/// Display width of the presentation image in pixels.
pub const PRESENTATION_WIDTH: u32 = 350;

pub const PRESENTATION_CAPTION: &str = "Visual recognition system";

/// Load the presentation image, scaled to [`PRESENTATION_WIDTH`] and encoded as JPEG.
///
/// The image is cosmetic: failures are logged and yield `None`.
pub fn load_presentation(path: impl AsRef<Path>) -> Option<Bytes> {
    let path = path.as_ref();
    match encode_presentation(path) {
        Ok(bytes) => {
            log::info!("Loaded presentation image {}", path.display());
            Some(bytes)
        }
        Err(e) => {
            log::warn!("Could not load presentation image {}: {e:#}", path.display());
            None
        }
    }
}

fn encode_presentation(path: &Path) -> Result<Bytes> {
    let image = image::open(path)?;
    let scaled = image
        .resize(PRESENTATION_WIDTH, u32::MAX, FilterType::Triangle)
        .to_rgb8();
    let (width, height) = scaled.dimensions();

    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, 85).encode(&scaled, width, height, ColorType::Rgb8)?;

    Ok(Bytes::from(buf.into_inner()))
}

//! Image reader backed by the `image` crate.
//!
//! Any format the crate decodes (PNG, JPEG, TIFF, BMP, ...) is accepted and
//! converted to 8-bit RGB before being split into B, G, R planes.

use tracing::debug;
use crate::dehazing::common::error::{DehazeError, Result};
use crate::dehazing::image::BgrImage;
use crate::dehazing::io::reader::ImageReader;

pub struct ImageCrateReader;

impl ImageReader for ImageCrateReader {
    /// Decodes an encoded image from a byte array.
    ///
    /// Images with more than 8 bits per sample or with alpha are reduced to
    /// 8-bit RGB; alpha is dropped.
    fn read_image(&self, data: &[u8]) -> Result<BgrImage> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| DehazeError::DecodeError(e.to_string()))?;
        let color = decoded.color();
        let rgb = decoded.into_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);

        debug!("Decoded image: {}x{} ({:?})", width, height, color);

        BgrImage::from_rgb_interleaved(width, height, rgb.as_raw())
    }
}

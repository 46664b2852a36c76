use std::io::{Cursor, Write};
use tracing::debug;
use crate::dehazing::common::error::{DehazeError, Result};
use crate::dehazing::config::DehazeConfig;
use crate::dehazing::image::BgrImage;
use crate::dehazing::io::writer::ImageWriter;

/// 8-bit RGB PNG output. Compression settings in the config are TIFF-only.
pub struct PngWriter;

impl ImageWriter for PngWriter {
    fn write_image(&self, image: &BgrImage, output: &mut dyn Write, _config: &DehazeConfig) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", image.width(), image.height());

        let rgb = image::RgbImage::from_raw(
            image.width() as u32,
            image.height() as u32,
            image.to_rgb_interleaved(),
        )
        .ok_or_else(|| DehazeError::EncodeError("RGB buffer does not match image size".to_string()))?;

        let mut buffer = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(|e| DehazeError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}

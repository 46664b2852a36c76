use std::io::Write;
use tracing::debug;
use crate::dehazing::common::error::{DehazeError, Result};
use crate::dehazing::config::{DehazeConfig, TiffCompression};
use crate::dehazing::image::BgrImage;
use crate::dehazing::io::writer::ImageWriter;

pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &BgrImage, output: &mut dyn Write, config: &DehazeConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| DehazeError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if config.horizontal_predictor {
            encoder = encoder.with_predictor(tiff::tags::Predictor::Horizontal);
        }

        let rgb = image.to_rgb_interleaved();
        encoder.write_image::<tiff::encoder::colortype::RGB8>(
            image.width() as u32,
            image.height() as u32,
            &rgb,
        ).map_err(|e| DehazeError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

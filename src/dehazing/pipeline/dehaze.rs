use rayon::prelude::*;
use tracing::{info, instrument};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::dehazing::{
    common::error::{DehazeError, Result},
    config::DehazeConfig,
    image::{grayscale_plane, saturation_plane, BgrImage},
    io::{ImageCrateReader, ImageReader, ImageWriter, StandardTiffWriter},
    stages::{
        bright_channel, clamp_light, estimate_atmospheric_light, max_color_difference,
        recover_scene_radiance, rectify, saturation_lambda, transmittance, LightSample,
    },
};

/// Result of a dehazing run together with the intermediate estimates.
#[derive(Debug, Clone)]
pub struct DehazeReport {
    pub restored: BgrImage,
    /// Light sample as read from the image, before clamping
    pub light: LightSample,
    /// True when a light channel was 255 and got clamped for the transmittance
    pub light_clamped: bool,
    /// Peak saturation weight used by the rectifier
    pub lambda: f64,
    pub window_size: usize,
}

/// Dehaze `image` with default parameters and the given window size.
pub fn restore(image: &BgrImage, window_size: usize) -> Result<BgrImage> {
    let config = DehazeConfig::builder().window_size(window_size).build();
    run(image, &config).map(|report| report.restored)
}

fn validate_window(size: usize, width: usize, height: usize) -> Result<()> {
    if size == 0 || size % 2 == 0 || size > width.min(height) {
        return Err(DehazeError::InvalidWindowSize { size, width, height });
    }
    Ok(())
}

fn run(image: &BgrImage, config: &DehazeConfig) -> Result<DehazeReport> {
    config.validate()?;

    let (width, height) = (image.width(), image.height());
    if config.validate_dimensions && (width == 0 || height == 0) {
        return Err(DehazeError::InvalidDimensions(width, height));
    }
    let size = config.window.resolve(width, height);
    validate_window(size, width, height)?;

    let bright = {
        let _span = tracing::info_span!("bright_channel", size).entered();
        bright_channel(image, size)
    };

    let mcd = {
        let _span = tracing::info_span!("max_color_difference").entered();
        max_color_difference(image)
    };

    let (rectified, lambda) = {
        let _span = tracing::info_span!("rectify").entered();
        let saturation = saturation_plane(image);
        (rectify(&saturation, &bright, &mcd)?, saturation_lambda(&saturation))
    };
    drop(bright);
    drop(mcd);

    let light = {
        let _span = tracing::info_span!("atmospheric_light").entered();
        estimate_atmospheric_light(
            &grayscale_plane(image),
            size,
            &rectified,
            image,
            config.dark_fraction,
            config.variance_border,
            config.spread,
        )?
    };

    let trans = {
        let _span = tracing::info_span!("transmittance").entered();
        transmittance(&rectified, light.light)
    };
    let (clamped_light, light_clamped) = clamp_light(light.light);

    let restored = {
        let _span = tracing::info_span!("scene_radiance").entered();
        recover_scene_radiance(image, clamped_light, &trans, config.min_transmittance)?
    };

    info!(
        width,
        height,
        size,
        lambda,
        light = ?light.light.0,
        row = light.row,
        col = light.col,
        "Dehazing complete"
    );

    Ok(DehazeReport {
        restored,
        light,
        light_clamped,
        lambda,
        window_size: size,
    })
}

pub struct DehazePipeline<R: ImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: DehazeConfig,
}

impl DehazePipeline<ImageCrateReader, StandardTiffWriter> {
    pub fn new(config: DehazeConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: ImageReader, W: ImageWriter> DehazePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: DehazeConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn dehaze(&self, image: &BgrImage) -> Result<BgrImage> {
        run(image, &self.config).map(|report| report.restored)
    }

    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn dehaze_with_report(&self, image: &BgrImage) -> Result<DehazeReport> {
        run(image, &self.config)
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting dehazing conversion");

        let image = {
            let _span = tracing::info_span!("decode_image").entered();
            self.reader.read_image(input_data)?
        };

        let report = run(&image, &self.config)?;

        {
            let _span = tracing::info_span!("encode_image").entered();
            self.writer.write_image(&report.restored, output, &self.config)?;
        }

        info!(
            width = image.width(),
            height = image.height(),
            "Conversion complete"
        );
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                DehazeError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // Encode fully before touching the output so a failed run leaves no file.
        let mut encoded = Vec::new();
        self.convert(&input_data, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                DehazeError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(())
    }

    pub fn config(&self) -> &DehazeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DehazeConfig) {
        self.config = config;
    }
}

impl<R, W> DehazePipeline<R, W>
where
    R: ImageReader + Sync,
    W: ImageWriter + Sync,
{
    /// Dehaze many images, one full single-threaded run per rayon task.
    #[instrument(skip(self, images), fields(count = images.len()))]
    pub fn dehaze_batch(&self, images: &[BgrImage]) -> Vec<Result<BgrImage>> {
        images.par_iter().map(|image| self.dehaze(image)).collect()
    }

    /// Convert `(input, output)` file pairs in parallel. Results keep job order.
    #[instrument(skip(self, jobs), fields(count = jobs.len()))]
    pub fn convert_files(&self, jobs: &[(PathBuf, PathBuf)]) -> Vec<Result<()>> {
        jobs.par_iter()
            .map(|(input, output)| self.convert_file(input, output))
            .collect()
    }
}

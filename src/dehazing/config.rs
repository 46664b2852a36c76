//! Dehazing configuration types

use crate::dehazing::common::error::{DehazeError, Result};
use crate::dehazing::filters::{BorderMode, LocalSpread};

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// How the filter window is chosen for an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSize {
    /// Use exactly this size; it must be odd and fit the image.
    Fixed(usize),
    /// Fraction of the shorter image side, forced odd and at least 3,
    /// then capped to the image.
    Proportional(f32),
}

impl WindowSize {
    /// Resolve to a concrete window size for a `width × height` image.
    pub fn resolve(&self, width: usize, height: usize) -> usize {
        match *self {
            WindowSize::Fixed(size) => size,
            WindowSize::Proportional(fraction) => {
                let short = width.min(height);
                let mut size = ((short as f32) * fraction).round().max(3.0) as usize;
                if size % 2 == 0 {
                    size += 1;
                }
                // largest odd size that still fits
                let cap = if short % 2 == 0 { short.saturating_sub(1) } else { short };
                size.min(cap.max(1))
            }
        }
    }
}

/// Configuration for a dehazing run
#[derive(Debug, Clone)]
pub struct DehazeConfig {
    /// Window for the bright channel dilation and the local spread filter
    pub window: WindowSize,
    /// Share of the darkest rectified pixels searched for the atmospheric light
    pub dark_fraction: f64,
    /// Lower bound on normalized transmittance before inverting the haze model
    pub min_transmittance: f32,
    /// Border policy of the local spread box filter
    pub variance_border: BorderMode,
    /// Statistic used to rank candidate light samples
    pub spread: LocalSpread,
    /// Whether to reject zero-sized images before processing
    pub validate_dimensions: bool,
    /// Compression method for TIFF output
    pub compression: TiffCompression,
    /// Horizontal differencing predictor for TIFF output.
    /// Note: only useful together with LZW or Deflate
    pub horizontal_predictor: bool,
}

impl Default for DehazeConfig {
    fn default() -> Self {
        Self {
            window: WindowSize::Fixed(15),
            dark_fraction: 0.01,
            min_transmittance: 1.0 / 255.0,
            variance_border: BorderMode::Replicate,
            spread: LocalSpread::SecondMoment,
            validate_dimensions: true,
            compression: TiffCompression::None,
            horizontal_predictor: false,
        }
    }
}

impl DehazeConfig {
    pub fn builder() -> DehazeConfigBuilder {
        DehazeConfigBuilder::default()
    }

    /// Check numeric parameters that do not depend on the image.
    pub fn validate(&self) -> Result<()> {
        if !(self.dark_fraction > 0.0 && self.dark_fraction <= 1.0) {
            return Err(DehazeError::InvalidParameter(format!(
                "dark_fraction must be in (0, 1], got {}",
                self.dark_fraction
            )));
        }
        if !(self.min_transmittance > 0.0 && self.min_transmittance <= 1.0) {
            return Err(DehazeError::InvalidParameter(format!(
                "min_transmittance must be in (0, 1], got {}",
                self.min_transmittance
            )));
        }
        if let WindowSize::Proportional(fraction) = self.window {
            if !(fraction.is_finite() && fraction > 0.0) {
                return Err(DehazeError::InvalidParameter(format!(
                    "window fraction must be positive, got {fraction}"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for DehazeConfig
#[derive(Default)]
pub struct DehazeConfigBuilder {
    window: Option<WindowSize>,
    dark_fraction: Option<f64>,
    min_transmittance: Option<f32>,
    variance_border: Option<BorderMode>,
    spread: Option<LocalSpread>,
    validate_dimensions: Option<bool>,
    compression: Option<TiffCompression>,
    horizontal_predictor: Option<bool>,
}

impl DehazeConfigBuilder {
    pub fn window_size(mut self, size: usize) -> Self {
        self.window = Some(WindowSize::Fixed(size));
        self
    }

    pub fn proportional_window(mut self, fraction: f32) -> Self {
        self.window = Some(WindowSize::Proportional(fraction));
        self
    }

    pub fn dark_fraction(mut self, fraction: f64) -> Self {
        self.dark_fraction = Some(fraction);
        self
    }

    pub fn min_transmittance(mut self, floor: f32) -> Self {
        self.min_transmittance = Some(floor);
        self
    }

    pub fn variance_border(mut self, border: BorderMode) -> Self {
        self.variance_border = Some(border);
        self
    }

    pub fn spread(mut self, spread: LocalSpread) -> Self {
        self.spread = Some(spread);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn horizontal_predictor(mut self, enable: bool) -> Self {
        self.horizontal_predictor = Some(enable);
        self
    }

    pub fn build(self) -> DehazeConfig {
        let default = DehazeConfig::default();
        DehazeConfig {
            window: self.window.unwrap_or(default.window),
            dark_fraction: self.dark_fraction.unwrap_or(default.dark_fraction),
            min_transmittance: self.min_transmittance.unwrap_or(default.min_transmittance),
            variance_border: self.variance_border.unwrap_or(default.variance_border),
            spread: self.spread.unwrap_or(default.spread),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            compression: self.compression.unwrap_or(default.compression),
            horizontal_predictor: self.horizontal_predictor.unwrap_or(default.horizontal_predictor),
        }
    }
}

//! Underwater image dehazing module
//!
//! Restores visibility in underwater images with the bright channel prior:
//! a haze model is estimated from a single image and inverted to recover
//! scene radiance. Stages live in `stages`, windowed filters in `filters`,
//! and `pipeline` ties them to the reader/writer seams in `io`.

pub mod common;
pub mod config;
pub mod filters;
pub mod image;
pub mod io;
pub mod pipeline;
pub mod stages;
#[doc(hidden)]
pub mod testing;

pub use common::{
    DehazeError,
    Result,
};

pub use config::{
    DehazeConfig,
    DehazeConfigBuilder,
    TiffCompression,
    WindowSize,
};

pub use filters::{
    BorderMode,
    LocalSpread,
};

pub use image::{
    BgrImage,
    Plane,
};

pub use io::{
    ImageReader,
    ImageWriter,
    ImageCrateReader,
    StandardTiffWriter,
    PngWriter,
};

pub use stages::{
    AtmosphericLight,
    LightSample,
};

pub use pipeline::{
    restore,
    DehazePipeline,
    DehazeReport,
};

//! Image decoding and encoding module
//!
//! Reader and writer traits keep the pipeline independent of concrete formats.

mod reader;
mod writer;
mod image_reader;
mod standard_tiff_writer;
mod png_writer;

pub use reader::ImageReader;
pub use writer::ImageWriter;
pub use image_reader::ImageCrateReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use png_writer::PngWriter;

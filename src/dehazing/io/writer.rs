use std::io::Write;
use crate::dehazing::common::error::Result;
use crate::dehazing::config::DehazeConfig;
use crate::dehazing::image::BgrImage;

pub trait ImageWriter {
    fn write_image(&self, image: &BgrImage, output: &mut dyn Write, config: &DehazeConfig) -> Result<()>;
}

use crate::dehazing::common::error::Result;
use crate::dehazing::image::BgrImage;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<BgrImage>;
}

use crate::dehazing::common::error::Result;
use crate::dehazing::image::Plane;
use crate::dehazing::image::types::saturate_u8;
use crate::dehazing::stages::{BrightChannelMap, MaxColorDifferenceMap};

/// Saturation-weighted blend of the bright channel and max color difference,
/// rounded half to even and saturated to 8 bits.
pub type RectifiedMap = Plane<u8>;

/// Peak saturation normalized to `[0, 1]`.
pub fn saturation_lambda(saturation: &Plane<u8>) -> f64 {
    f64::from(saturation.max_value()) / 255.0
}

/// `lambda * bright + (1 - lambda) * mcd`, elementwise.
///
/// All three planes must share the bright channel's dimensions.
pub fn rectify(
    saturation: &Plane<u8>,
    bright: &BrightChannelMap,
    mcd: &MaxColorDifferenceMap,
) -> Result<RectifiedMap> {
    let expected = bright.dimensions();
    bright.check_dimensions(expected, 0)?;
    mcd.check_dimensions(expected, 1)?;
    saturation.check_dimensions(expected, 2)?;

    let lambda = saturation_lambda(saturation) as f32;
    let data = bright
        .data
        .iter()
        .zip(&mcd.data)
        .map(|(&bc, &mcd)| saturate_u8(f32::from(bc) * lambda + f32::from(mcd) * (1.0 - lambda)))
        .collect();
    Ok(Plane {
        width: bright.width,
        height: bright.height,
        data,
    })
}

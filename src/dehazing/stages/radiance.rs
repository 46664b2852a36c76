use tracing::debug;

use crate::dehazing::image::{BgrImage, Plane, BLUE, GREEN, RED};
use crate::dehazing::image::types::saturate_u8;
use crate::dehazing::common::error::Result;
use crate::dehazing::stages::{AtmosphericLight, TransmittanceMap};

/// Invert the haze model per channel.
///
/// Blue and green use the subtractive form `255 - (I - A(1 - t)) / t`, red the
/// additive form `(I - A) / t + A`. `t` is the transmittance normalized to
/// `[0, 1]` and floored at `min_transmittance`.
pub fn recover_scene_radiance(
    image: &BgrImage,
    light: AtmosphericLight,
    trans: &TransmittanceMap,
    min_transmittance: f32,
) -> Result<BgrImage> {
    let t: Vec<f32> = trans
        .data
        .iter()
        .map(|&v| (f32::from(v) / 255.0).max(min_transmittance))
        .collect();
    let floored = trans
        .data
        .iter()
        .filter(|&&v| f32::from(v) / 255.0 < min_transmittance)
        .count();
    if floored > 0 {
        debug!(pixels = floored, floor = min_transmittance, "Transmittance floored");
    }

    let (w, h) = (image.width(), image.height());
    let restore = |c: usize, f: &dyn Fn(f32, f32, f32) -> f32| -> Plane<u8> {
        let a = f32::from(light.channel(c));
        let data = image
            .channel(c)
            .data
            .iter()
            .zip(&t)
            .map(|(&i, &t)| saturate_u8(f(f32::from(i), a, t)))
            .collect();
        Plane { width: w, height: h, data }
    };

    let subtractive = |i: f32, a: f32, t: f32| 255.0 - (i - a * (1.0 - t)) / t;
    let additive = |i: f32, a: f32, t: f32| (i - a) / t + a;

    let blue = restore(BLUE, &subtractive);
    let green = restore(GREEN, &subtractive);
    let red = restore(RED, &additive);
    BgrImage::from_planes([blue, green, red])
}

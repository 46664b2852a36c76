use tracing::warn;

use crate::dehazing::image::Plane;
use crate::dehazing::stages::{AtmosphericLight, RectifiedMap};

/// Averaged transmittance scaled to `[0, 255]`.
pub type TransmittanceMap = Plane<u8>;

/// Highest light value the transmittance divisor `255 - A` tolerates.
pub const MAX_LIGHT: u8 = 254;

/// Clamp light channels at 255 down to [`MAX_LIGHT`]. Returns whether any moved.
pub fn clamp_light(light: AtmosphericLight) -> (AtmosphericLight, bool) {
    let clamped = AtmosphericLight(light.0.map(|a| a.min(MAX_LIGHT)));
    (clamped, clamped != light)
}

/// `mean_i 255 * (R - A_i) / (255 - A_i)`, saturated to 8 bits.
///
/// This is the only place the light is clamped and reported.
pub fn transmittance(rectified: &RectifiedMap, light: AtmosphericLight) -> TransmittanceMap {
    let (light, clamped) = clamp_light(light);
    if clamped {
        warn!(light = ?light.0, "Atmospheric light channel at 255, clamped to {}", MAX_LIGHT);
    }
    let rectified = rectified.to_f32();
    let a = light.0.map(f32::from);
    let mut acc = Plane::<f32>::new(rectified.width, rectified.height);
    for &a_i in &a {
        let divisor = 255.0 - a_i;
        for (sum, &r) in acc.data.iter_mut().zip(&rectified.data) {
            *sum += 255.0 * ((r - a_i) / divisor);
        }
    }
    acc.map(|v| v / 3.0).to_u8_saturating()
}

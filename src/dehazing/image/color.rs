//! Color-space helpers feeding the rectifier and the light estimator.

use crate::dehazing::image::types::{BgrImage, Plane, BLUE, GREEN, RED};

/// Saturation channel of the HSV representation on an 8-bit scale.
///
/// `S = 255 * (V - min) / V` with `V = max(B, G, R)`; black pixels have zero
/// saturation.
pub fn saturation_plane(image: &BgrImage) -> Plane<u8> {
    let [b, g, r] = image.channels();
    let data = b
        .data
        .iter()
        .zip(&g.data)
        .zip(&r.data)
        .map(|((&b, &g), &r)| {
            let v = b.max(g).max(r);
            if v == 0 {
                return 0;
            }
            let diff = v - b.min(g).min(r);
            ((255.0 * f32::from(diff)) / f32::from(v)).round() as u8
        })
        .collect();
    Plane {
        width: image.width(),
        height: image.height(),
        data,
    }
}

// BT.601 luma weights in Q14 fixed point.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// BT.601 grayscale conversion with fixed-point rounding.
pub fn grayscale_plane(image: &BgrImage) -> Plane<u8> {
    let (b, g, r) = (image.channel(BLUE), image.channel(GREEN), image.channel(RED));
    let data = b
        .data
        .iter()
        .zip(&g.data)
        .zip(&r.data)
        .map(|((&b, &g), &r)| {
            let y = u32::from(r) * LUMA_R
                + u32::from(g) * LUMA_G
                + u32::from(b) * LUMA_B
                + (1 << (LUMA_SHIFT - 1));
            (y >> LUMA_SHIFT).min(255) as u8
        })
        .collect();
    Plane {
        width: image.width(),
        height: image.height(),
        data,
    }
}

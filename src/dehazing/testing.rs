//! Deterministic synthetic images for tests and benches.

use crate::dehazing::image::{BgrImage, Plane};

/// Cheap integer hash (xorshift-multiply) used as a reproducible noise source.
pub fn hash_noise(x: usize, y: usize, seed: u32) -> u8 {
    let mut h = (x as u32).wrapping_mul(0x9E37_79B1)
        ^ (y as u32).wrapping_mul(0x85EB_CA77)
        ^ seed.wrapping_mul(0xC2B2_AE3D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    (h & 0xFF) as u8
}

/// Textured image with a distinct mean per channel: each channel is noise
/// squeezed into `[offset, offset + 127]`.
pub fn synthetic_image(width: usize, height: usize, seed: u32) -> BgrImage {
    let offsets = [20u8, 60, 110];
    let planes = [0usize, 1, 2].map(|c| {
        let mut plane = Plane::<u8>::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let n = hash_noise(x, y, seed.wrapping_add(c as u32)) / 2;
                plane.set(x, y, offsets[c] + n);
            }
        }
        plane
    });
    BgrImage::from_planes(planes).expect("planes share dimensions")
}

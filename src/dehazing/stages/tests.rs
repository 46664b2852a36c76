use crate::dehazing::common::error::DehazeError;
use crate::dehazing::filters::{BorderMode, LocalSpread};
use crate::dehazing::image::{grayscale_plane, saturation_plane, BgrImage, Plane};
use crate::dehazing::testing::synthetic_image;

use super::*;

fn rectified_for(image: &BgrImage, size: usize) -> RectifiedMap {
    let bright = bright_channel(image, size);
    let mcd = max_color_difference(image);
    rectify(&saturation_plane(image), &bright, &mcd).unwrap()
}

fn light_for(image: &BgrImage, size: usize) -> LightSample {
    let rectified = rectified_for(image, size);
    estimate_atmospheric_light(
        &grayscale_plane(image),
        size,
        &rectified,
        image,
        0.01,
        BorderMode::Replicate,
        LocalSpread::SecondMoment,
    )
    .unwrap()
}

fn planes(width: usize, height: usize, b: Vec<u8>, g: Vec<u8>, r: Vec<u8>) -> BgrImage {
    BgrImage::from_planes([
        Plane::from_vec(width, height, b).unwrap(),
        Plane::from_vec(width, height, g).unwrap(),
        Plane::from_vec(width, height, r).unwrap(),
    ])
    .unwrap()
}

#[test]
fn test_max_color_takes_brightest_channel() {
    let image = planes(3, 1, vec![10, 90, 0], vec![50, 20, 0], vec![30, 40, 255]);
    assert_eq!(max_color(&image).data, vec![50, 90, 255]);
}

#[test]
fn test_bright_channel_dilates_peak() {
    let mut image = BgrImage::uniform(7, 7, [10, 10, 10]).into_planes();
    image[2].set(3, 3, 240);
    let image = BgrImage::from_planes(image).unwrap();

    let bright = bright_channel(&image, 5);
    for y in 0..7 {
        for x in 0..7 {
            let inside = (1..=5).contains(&x) && (1..=5).contains(&y);
            assert_eq!(bright.get(x, y), if inside { 240 } else { 10 });
        }
    }
}

#[test]
fn test_bright_channel_monotonic_in_window_size() {
    let image = synthetic_image(31, 23, 7);
    let mut previous = bright_channel(&image, 1);
    for size in [3, 5, 9, 15, 23] {
        let current = bright_channel(&image, size);
        for (i, (&small, &large)) in previous.data.iter().zip(&current.data).enumerate() {
            assert!(large >= small, "pixel {i} shrank from {small} to {large} at size {size}");
        }
        previous = current;
    }
}

#[test]
fn test_max_color_difference_uniform() {
    // means B < G < R, so a = 190, b = 40
    let image = BgrImage::uniform(4, 4, [10, 50, 200]);
    let mcd = max_color_difference(&image);
    assert!(mcd.data.iter().all(|&v| v == 65));
}

#[test]
fn test_max_color_difference_saturates_below_zero() {
    // Per-pixel values may invert the global ranking; differences clamp at 0.
    let image = planes(2, 1, vec![0, 100], vec![100, 110], vec![200, 90]);
    // means: B 50, G 105, R 145
    let mcd = max_color_difference(&image);
    assert_eq!(mcd.data, vec![255 - 200, 255 - 10]);
}

#[test]
fn test_max_color_difference_permutation_invariant() {
    let image = synthetic_image(17, 13, 3);
    let expected = max_color_difference(&image);

    let [b, g, r] = image.clone().into_planes();
    for permuted in [
        [r.clone(), b.clone(), g.clone()],
        [g.clone(), r.clone(), b.clone()],
        [r.clone(), g.clone(), b.clone()],
    ] {
        let permuted = BgrImage::from_planes(permuted).unwrap();
        assert_eq!(max_color_difference(&permuted), expected);
    }
}

#[test]
fn test_rank_ties_keep_channel_order() {
    let image = BgrImage::uniform(3, 3, [80, 80, 80]);
    assert_eq!(rank_channels_by_mean(&image), [0, 1, 2]);

    let image = BgrImage::uniform(3, 3, [90, 10, 90]);
    assert_eq!(rank_channels_by_mean(&image), [1, 0, 2]);
}

#[test]
fn test_rectify_interpolates_by_peak_saturation() {
    let bright = Plane::filled(2, 2, 200u8);
    let mcd = Plane::filled(2, 2, 100u8);

    let flat = rectify(&Plane::filled(2, 2, 0u8), &bright, &mcd).unwrap();
    assert!(flat.data.iter().all(|&v| v == 100));

    let mut saturation = Plane::filled(2, 2, 0u8);
    saturation.set(1, 1, 255);
    let full = rectify(&saturation, &bright, &mcd).unwrap();
    assert!(full.data.iter().all(|&v| v == 200));

    saturation.set(1, 1, 51);
    assert!((saturation_lambda(&saturation) - 0.2).abs() < 1e-12);
    let partial = rectify(&saturation, &bright, &mcd).unwrap();
    assert!(partial.data.iter().all(|&v| v == 120));
}

#[test]
fn test_rectify_rounds_fractional_blend() {
    // lambda 0.2: 0.2 * 242 + 0.8 * 240 = 240.4
    let mut saturation = Plane::filled(1, 1, 0u8);
    saturation.set(0, 0, 51);
    let rectified = rectify(&saturation, &Plane::filled(1, 1, 242u8), &Plane::filled(1, 1, 240u8)).unwrap();
    assert_eq!(rectified.data, vec![240]);

    // (240 - 230) / 25 * 255 = 102
    let trans = transmittance(&rectified, AtmosphericLight([230, 230, 230]));
    assert_eq!(trans.data, vec![102]);
}

#[test]
fn test_rectify_rejects_mismatched_planes() {
    let saturation = Plane::filled(3, 2, 0u8);
    let bright = Plane::filled(3, 2, 10u8);
    let mcd = Plane::filled(2, 3, 10u8);
    assert!(matches!(
        rectify(&saturation, &bright, &mcd).unwrap_err(),
        DehazeError::MismatchedChannels { channel: 1, expected: (3, 2), found: (2, 3) }
    ));

    let short = Plane { width: 3, height: 2, data: vec![0u8; 5] };
    assert!(matches!(
        rectify(&saturation, &bright, &short).unwrap_err(),
        DehazeError::BufferLength { expected: 6, found: 5 }
    ));
}

#[test]
fn test_dark_sample_count() {
    assert_eq!(dark_sample_count(1, 0.01), 1);
    assert_eq!(dark_sample_count(49, 0.01), 1);
    assert_eq!(dark_sample_count(160, 0.01), 2);
    assert_eq!(dark_sample_count(10_000, 0.01), 100);
    assert_eq!(dark_sample_count(10, 1.0), 10);
}

#[test]
fn test_light_locates_homogeneous_dark_patch() {
    let (w, h) = (20, 20);
    let mut channels = [0usize, 1, 2].map(|_| Plane::<u8>::new(w, h));
    for y in 0..h {
        for x in 0..w {
            let in_patch = (10..15).contains(&y) && (3..8).contains(&x);
            let px = if in_patch {
                [30, 40, 50]
            } else if (x + y) % 2 == 0 {
                [200, 200, 200]
            } else {
                [255, 255, 255]
            };
            for c in 0..3 {
                channels[c].set(x, y, px[c]);
            }
        }
    }
    let image = BgrImage::from_planes(channels).unwrap();

    let sample = light_for(&image, 3);
    assert!((10..15).contains(&sample.row), "row {}", sample.row);
    assert!((3..8).contains(&sample.col), "col {}", sample.col);
    assert_eq!(sample.light, AtmosphericLight([30, 40, 50]));
}

#[test]
fn test_light_prefers_lowest_spread_candidate() {
    let (w, h) = (10, 10);
    let mut rectified = Plane::filled(w, h, 100u8);
    rectified.set(2, 2, 5);
    rectified.set(7, 7, 5);

    // texture around (2, 2) only
    let mut gray = Plane::<u8>::new(w, h);
    gray.set(1, 1, 200);
    gray.set(3, 2, 200);

    let mut image = BgrImage::uniform(w, h, [1, 2, 3]).into_planes();
    image[0].set(7, 7, 9);
    let image = BgrImage::from_planes(image).unwrap();

    let sample = estimate_atmospheric_light(
        &gray,
        3,
        &rectified,
        &image,
        0.02,
        BorderMode::Replicate,
        LocalSpread::SecondMoment,
    )
    .unwrap();
    assert_eq!((sample.row, sample.col), (7, 7));
    assert_eq!(sample.light, AtmosphericLight([9, 2, 3]));
}

#[test]
fn test_light_spread_tie_picks_first_darkest() {
    let (w, h) = (10, 10);
    let mut rectified = Plane::filled(w, h, 100u8);
    rectified.set(6, 1, 5);
    rectified.set(2, 8, 5);
    let gray = Plane::<u8>::new(w, h);
    let image = BgrImage::uniform(w, h, [1, 2, 3]);

    let sample = estimate_atmospheric_light(
        &gray,
        3,
        &rectified,
        &image,
        0.02,
        BorderMode::Reflect101,
        LocalSpread::Variance,
    )
    .unwrap();
    // flat index 16 comes before 82
    assert_eq!((sample.row, sample.col), (1, 6));
}

#[test]
fn test_light_row_major_decoding() {
    let (w, h) = (7, 3);
    let mut rectified = Plane::filled(w, h, 50u8);
    rectified.data[16] = 0;
    let gray = Plane::<u8>::new(w, h);
    let image = synthetic_image(w, h, 11);

    let sample = estimate_atmospheric_light(
        &gray,
        3,
        &rectified,
        &image,
        0.01,
        BorderMode::Replicate,
        LocalSpread::SecondMoment,
    )
    .unwrap();
    assert_eq!((sample.row, sample.col), (2, 2));
    assert_eq!(sample.light.0, image.pixel(2, 2));
}

#[test]
fn test_light_rejects_mismatched_inputs() {
    let image = BgrImage::uniform(4, 4, [1, 2, 3]);
    let gray = Plane::<u8>::new(4, 4);

    let rectified = Plane::<u8>::new(4, 3);
    let result = estimate_atmospheric_light(
        &gray, 3, &rectified, &image, 0.01, BorderMode::Replicate, LocalSpread::SecondMoment,
    );
    assert!(matches!(
        result.unwrap_err(),
        DehazeError::MismatchedChannels { channel: 0, expected: (4, 4), found: (4, 3) }
    ));

    let rectified = Plane::<u8>::new(4, 4);
    let gray = Plane::<u8>::new(3, 4);
    let result = estimate_atmospheric_light(
        &gray, 3, &rectified, &image, 0.01, BorderMode::Replicate, LocalSpread::SecondMoment,
    );
    assert!(matches!(result.unwrap_err(), DehazeError::MismatchedChannels { channel: 1, .. }));
}

#[test]
fn test_light_rejects_empty_image() {
    let image = BgrImage::uniform(0, 0, [0, 0, 0]);
    let empty = Plane::<u8>::new(0, 0);
    let result = estimate_atmospheric_light(
        &empty, 1, &empty, &image, 0.01, BorderMode::Replicate, LocalSpread::SecondMoment,
    );
    assert!(matches!(result.unwrap_err(), DehazeError::InvalidDimensions(0, 0)));
}

#[test]
fn test_single_pixel_light() {
    let image = BgrImage::uniform(1, 1, [12, 34, 56]);
    let sample = light_for(&image, 1);
    assert_eq!((sample.row, sample.col), (0, 0));
    assert_eq!(sample.light, AtmosphericLight([12, 34, 56]));
}

#[test]
fn test_uniform_image_transmittance_is_maximal() {
    for value in [0u8, 37, 128, 254, 255] {
        let image = BgrImage::uniform(9, 7, [value; 3]);
        let rectified = rectified_for(&image, 3);
        let sample = light_for(&image, 3);
        assert_eq!(sample.light, AtmosphericLight([value; 3]));

        let trans = transmittance(&rectified, sample.light);
        assert!(trans.data.iter().all(|&t| t == 255), "value {value}");
    }
}

#[test]
fn test_clamp_light() {
    let (light, clamped) = clamp_light(AtmosphericLight([255, 10, 255]));
    assert!(clamped);
    assert_eq!(light, AtmosphericLight([MAX_LIGHT, 10, MAX_LIGHT]));

    let (light, clamped) = clamp_light(AtmosphericLight([254, 0, 3]));
    assert!(!clamped);
    assert_eq!(light, AtmosphericLight([254, 0, 3]));
}

#[test]
fn test_transmittance_saturates() {
    let rectified = Plane::from_vec(3, 1, vec![0u8, 128, 255]).unwrap();
    let trans = transmittance(&rectified, AtmosphericLight([200, 200, 200]));
    // (0 - 200) * 255 / 55 < 0 ; (255 - 200) * 255 / 55 = 255
    assert_eq!(trans.data[0], 0);
    assert_eq!(trans.data[2], 255);

    let trans = transmittance(&rectified, AtmosphericLight([0, 0, 0]));
    assert_eq!(trans.data, vec![0, 128, 255]);
}

#[test]
fn test_transmittance_with_saturated_light_is_finite() {
    let rectified = Plane::from_vec(2, 1, vec![255u8, 100]).unwrap();
    let trans = transmittance(&rectified, AtmosphericLight([255, 255, 255]));
    assert_eq!(trans.data, vec![255, 0]);
}

// Stage-level inverse with a known light and transmittance. The whole
// pipeline variant lives in pipeline/tests.rs.
#[test]
fn test_radiance_inverts_forward_model() {
    let (w, h) = (16, 12);
    let scene = synthetic_image(w, h, 5);
    let light = AtmosphericLight([60, 90, 30]);

    let mut trans = TransmittanceMap::new(w, h);
    for (i, t) in trans.data.iter_mut().enumerate() {
        *t = 128 + (i % 128) as u8;
    }

    // blue and green are stored inverted, red directly
    let mut hazy = scene.clone().into_planes();
    for c in 0..3 {
        let a = f32::from(light.channel(c));
        for (i, v) in hazy[c].data.iter_mut().enumerate() {
            let t = f32::from(trans.data[i]) / 255.0;
            let j = f32::from(*v);
            let j = if c == 2 { j } else { 255.0 - j };
            *v = (j * t + a * (1.0 - t)).round() as u8;
        }
    }
    let hazy = BgrImage::from_planes(hazy).unwrap();

    let restored = recover_scene_radiance(&hazy, light, &trans, 1.0 / 255.0).unwrap();
    for c in 0..3 {
        for (i, (&got, &want)) in restored.channel(c).data.iter().zip(&scene.channel(c).data).enumerate() {
            assert!(
                (i16::from(got) - i16::from(want)).abs() <= 2,
                "channel {c} pixel {i}: got {got}, want {want}"
            );
        }
    }
}

#[test]
fn test_radiance_with_zero_transmittance_stays_in_range() {
    let image = synthetic_image(8, 8, 9);
    let trans = TransmittanceMap::new(8, 8);
    let light = AtmosphericLight([100, 100, 100]);
    let restored = recover_scene_radiance(&image, light, &trans, 1.0 / 255.0).unwrap();
    assert_eq!(restored.width(), 8);
    assert_eq!(restored.height(), 8);

    // red passes exactly through A when I == A
    let flat = BgrImage::uniform(2, 2, [100, 100, 100]);
    let restored = recover_scene_radiance(&flat, light, &trans, 1.0 / 255.0).unwrap();
    assert!(restored.channel(2).data.iter().all(|&v| v == 100));
}

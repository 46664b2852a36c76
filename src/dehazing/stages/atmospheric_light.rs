use std::cmp::Ordering;

use tracing::debug;

use crate::dehazing::common::error::{DehazeError, Result};
use crate::dehazing::filters::{local_spread, BorderMode, LocalSpread};
use crate::dehazing::image::{BgrImage, Plane};
use crate::dehazing::stages::RectifiedMap;

/// Estimated veiling light, one intensity per channel in B, G, R order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtmosphericLight(pub [u8; 3]);

impl AtmosphericLight {
    #[inline]
    pub fn channel(&self, c: usize) -> u8 {
        self.0[c]
    }
}

/// The light triple and the pixel it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightSample {
    pub light: AtmosphericLight,
    pub row: usize,
    pub col: usize,
}

/// Number of darkest pixels inspected: `round(total * fraction)`, at least 1.
pub fn dark_sample_count(total: usize, fraction: f64) -> usize {
    ((total as f64 * fraction).round() as usize).clamp(1, total.max(1))
}

/// Locate the atmospheric light.
///
/// The darkest `fraction` of the rectified map (row-major, ties by index) is
/// searched for the pixel with the lowest local spread of `gray`; the first
/// such pixel in darkness order wins. Its original channel values are the
/// light.
///
/// `gray`, `rectified` and `image` must share non-zero dimensions.
pub fn estimate_atmospheric_light(
    gray: &Plane<u8>,
    size: usize,
    rectified: &RectifiedMap,
    image: &BgrImage,
    fraction: f64,
    border: BorderMode,
    spread: LocalSpread,
) -> Result<LightSample> {
    let expected = (image.width(), image.height());
    if expected.0 == 0 || expected.1 == 0 {
        return Err(DehazeError::InvalidDimensions(expected.0, expected.1));
    }
    rectified.check_dimensions(expected, 0)?;
    gray.check_dimensions(expected, 1)?;

    let spread_map = local_spread(gray, size, border, spread);

    let total = rectified.len();
    let count = dark_sample_count(total, fraction);
    let values = &rectified.data;
    let cmp = |a: &usize, b: &usize| -> Ordering { values[*a].cmp(&values[*b]).then(a.cmp(b)) };
    let mut order: Vec<usize> = (0..total).collect();
    if count < total {
        order.select_nth_unstable_by(count, &cmp);
        order.truncate(count);
    }
    order.sort_unstable_by(&cmp);

    let mut best = order[0];
    for &i in &order[1..] {
        if spread_map.data[i] < spread_map.data[best] {
            best = i;
        }
    }

    let (row, col) = rectified.coords(best);
    let light = AtmosphericLight(image.pixel(row, col));
    debug!(
        candidates = count,
        row,
        col,
        spread = spread_map.data[best],
        light = ?light.0,
        "Atmospheric light sample selected"
    );
    Ok(LightSample { light, row, col })
}

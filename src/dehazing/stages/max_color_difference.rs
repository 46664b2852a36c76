use crate::dehazing::image::{BgrImage, Plane};

/// `255 - max(Cmax - Cmin, Cmid - Cmin)`, values in `[0, 255]`.
pub type MaxColorDifferenceMap = Plane<u8>;

/// Channel indices ordered by ascending global mean.
///
/// Equal means keep channel index order.
pub fn rank_channels_by_mean(image: &BgrImage) -> [usize; 3] {
    let means = image.channels().each_ref().map(|plane| plane.mean());
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| means[a].total_cmp(&means[b]));
    order
}

pub fn max_color_difference(image: &BgrImage) -> MaxColorDifferenceMap {
    let [lo, mid, hi] = rank_channels_by_mean(image);
    let (c_min, c_mid, c_max) = (image.channel(lo), image.channel(mid), image.channel(hi));
    let data = c_min
        .data
        .iter()
        .zip(&c_mid.data)
        .zip(&c_max.data)
        .map(|((&min, &mid), &max)| {
            let a = max.saturating_sub(min);
            let b = mid.saturating_sub(min);
            255 - a.max(b)
        })
        .collect();
    Plane {
        width: image.width(),
        height: image.height(),
        data,
    }
}

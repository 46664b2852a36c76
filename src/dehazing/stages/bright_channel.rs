use crate::dehazing::filters::max_filter;
use crate::dehazing::image::{BgrImage, Plane};

/// Dilated per-pixel channel maximum, values in `[0, 255]`.
pub type BrightChannelMap = Plane<u8>;

/// Per-pixel maximum over the three channels.
pub fn max_color(image: &BgrImage) -> Plane<u8> {
    let [b, g, r] = image.channels();
    let data = b
        .data
        .iter()
        .zip(&g.data)
        .zip(&r.data)
        .map(|((&b, &g), &r)| b.max(g).max(r))
        .collect();
    Plane {
        width: image.width(),
        height: image.height(),
        data,
    }
}

/// Bright channel: the maximum color image dilated with a `size × size` window.
pub fn bright_channel(image: &BgrImage, size: usize) -> BrightChannelMap {
    max_filter(&max_color(image), size)
}

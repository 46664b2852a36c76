//! Plane and image types

use crate::dehazing::common::error::{DehazeError, Result};

/// Channel index of blue in a [`BgrImage`].
pub const BLUE: usize = 0;
/// Channel index of green in a [`BgrImage`].
pub const GREEN: usize = 1;
/// Channel index of red in a [`BgrImage`].
pub const RED: usize = 2;

/// Owned single-channel image in row-major layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T> {
    /// Width of the plane in pixels
    pub width: usize,
    /// Height of the plane in pixels
    pub height: usize,
    /// Samples in row-major order, `width * height` long
    pub data: Vec<T>,
}

impl<T: Copy + Default> Plane<T> {
    /// Zero-initialized plane of size `width × height`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Copy> Plane<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major buffer, checking its length.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(DehazeError::BufferLength {
                expected: width * height,
                found: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Check that this plane is `expected` (width, height) and that its
    /// buffer matches; `channel` labels the error.
    pub fn check_dimensions(&self, expected: (usize, usize), channel: usize) -> Result<()> {
        if self.dimensions() != expected {
            return Err(DehazeError::MismatchedChannels {
                channel,
                expected,
                found: self.dimensions(),
            });
        }
        if self.len() != self.width * self.height {
            return Err(DehazeError::BufferLength {
                expected: self.width * self.height,
                found: self.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Row and column of a row-major flat index.
    #[inline]
    pub fn coords(&self, flat_index: usize) -> (usize, usize) {
        (flat_index / self.width, flat_index % self.width)
    }

    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Plane<U> {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl Plane<u8> {
    pub fn to_f32(&self) -> Plane<f32> {
        self.map(f32::from)
    }

    pub fn max_value(&self) -> u8 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.data.iter().map(|&v| u64::from(v)).sum();
        sum as f64 / self.data.len() as f64
    }
}

impl Plane<f32> {
    /// Round half to even and saturate into `[0, 255]`. NaN maps to 0.
    pub fn to_u8_saturating(&self) -> Plane<u8> {
        self.map(saturate_u8)
    }
}

#[inline]
pub(crate) fn saturate_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Three 8-bit planes of equal size, ordered Blue, Green, Red.
#[derive(Debug, Clone, PartialEq)]
pub struct BgrImage {
    planes: [Plane<u8>; 3],
}

impl BgrImage {
    /// Build from planes in B, G, R order. Rejects planes of unequal size.
    pub fn from_planes(planes: [Plane<u8>; 3]) -> Result<Self> {
        let expected = planes[BLUE].dimensions();
        for (channel, plane) in planes.iter().enumerate() {
            plane.check_dimensions(expected, channel)?;
        }
        Ok(Self { planes })
    }

    /// Uniform image where every channel holds its entry of `bgr`.
    pub fn uniform(width: usize, height: usize, bgr: [u8; 3]) -> Self {
        Self {
            planes: bgr.map(|v| Plane::filled(width, height, v)),
        }
    }

    /// Split an interleaved `[R, G, B, R, G, B, ...]` buffer.
    pub fn from_rgb_interleaved(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        if data.len() != width * height * 3 {
            return Err(DehazeError::BufferLength {
                expected: width * height * 3,
                found: data.len(),
            });
        }
        let mut planes = [
            Plane::new(width, height),
            Plane::new(width, height),
            Plane::new(width, height),
        ];
        for (i, px) in data.chunks_exact(3).enumerate() {
            planes[RED].data[i] = px[0];
            planes[GREEN].data[i] = px[1];
            planes[BLUE].data[i] = px[2];
        }
        Ok(Self { planes })
    }

    /// Interleave back to `[R, G, B, ...]` for encoders.
    pub fn to_rgb_interleaved(&self) -> Vec<u8> {
        let [b, g, r] = &self.planes;
        r.data
            .iter()
            .zip(&g.data)
            .zip(&b.data)
            .flat_map(|((&r, &g), &b)| [r, g, b])
            .collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.planes[BLUE].width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.planes[BLUE].height
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    pub fn channel(&self, c: usize) -> &Plane<u8> {
        &self.planes[c]
    }

    #[inline]
    pub fn channels(&self) -> &[Plane<u8>; 3] {
        &self.planes
    }

    /// Channel values at (row, col) in B, G, R order.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [0, 1, 2].map(|c| self.planes[c].get(col, row))
    }

    pub fn into_planes(self) -> [Plane<u8>; 3] {
        self.planes
    }
}

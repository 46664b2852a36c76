//! Windowed reductions over planes.
//!
//! Both filters are separable: a horizontal pass into a scratch plane followed
//! by a vertical pass. Out-of-image taps are resolved through [`BorderMode`].

use crate::dehazing::image::Plane;

/// How a window tap outside the image is mapped back inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// `aaa|abcd|ddd`
    #[default]
    Replicate,
    /// `dcb|abcd|cba`
    Reflect101,
}

impl BorderMode {
    /// Map a possibly out-of-range coordinate into `0..len`.
    #[inline]
    pub fn resolve(self, i: isize, len: usize) -> usize {
        let last = len as isize - 1;
        if last <= 0 {
            return 0;
        }
        let mapped = match self {
            BorderMode::Replicate => i.clamp(0, last),
            BorderMode::Reflect101 => {
                let mut j = i;
                while j < 0 || j > last {
                    j = if j < 0 { -j } else { 2 * last - j };
                }
                j
            }
        };
        mapped as usize
    }
}

/// Statistic used as the local "flatness" score for the light estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalSpread {
    /// Box-filtered mean of squares, `E[x²]`.
    #[default]
    SecondMoment,
    /// Centered variance, `E[x²] - E[x]²`.
    Variance,
}

/// Local maximum (grayscale dilation) with a centered `size × size` window.
///
/// Out-of-image taps are replicated edge pixels, which never exceed the
/// in-image maximum, so the result equals a dilation that ignores them.
pub fn max_filter(input: &Plane<u8>, size: usize) -> Plane<u8> {
    let (w, h) = input.dimensions();
    let r = (size / 2) as isize;
    let mut tmp = Plane::<u8>::new(w, h);
    for y in 0..h {
        let row = input.row(y);
        for x in 0..w {
            let lo = BorderMode::Replicate.resolve(x as isize - r, w);
            let hi = BorderMode::Replicate.resolve(x as isize + r, w);
            let m = row[lo..=hi].iter().copied().max().unwrap_or(0);
            tmp.set(x, y, m);
        }
    }
    let mut out = Plane::<u8>::new(w, h);
    for y in 0..h {
        let lo = BorderMode::Replicate.resolve(y as isize - r, h);
        let hi = BorderMode::Replicate.resolve(y as isize + r, h);
        for x in 0..w {
            let m = (lo..=hi).map(|yy| tmp.get(x, yy)).max().unwrap_or(0);
            out.set(x, y, m);
        }
    }
    out
}

/// Normalized box filter: mean over a centered `size × size` window.
pub fn box_mean(input: &Plane<f64>, size: usize, border: BorderMode) -> Plane<f64> {
    let (w, h) = input.dimensions();
    let r = (size / 2) as isize;
    let norm = 1.0 / (size * size) as f64;
    let mut tmp = Plane::<f64>::new(w, h);
    for y in 0..h {
        let row = input.row(y);
        for x in 0..w {
            let sum: f64 = (-r..=r)
                .map(|d| row[border.resolve(x as isize + d, w)])
                .sum();
            tmp.set(x, y, sum);
        }
    }
    let mut out = Plane::<f64>::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let sum: f64 = (-r..=r)
                .map(|d| tmp.get(x, border.resolve(y as isize + d, h)))
                .sum();
            out.set(x, y, sum * norm);
        }
    }
    out
}

/// Per-pixel spread of `gray` over `size × size` windows.
pub fn local_spread(gray: &Plane<u8>, size: usize, border: BorderMode, spread: LocalSpread) -> Plane<f32> {
    let squares = gray.map(|v| f64::from(v) * f64::from(v));
    let second_moment = box_mean(&squares, size, border);
    match spread {
        LocalSpread::SecondMoment => second_moment.map(|v| v as f32),
        LocalSpread::Variance => {
            let mean = box_mean(&gray.map(f64::from), size, border);
            let data = second_moment
                .data
                .iter()
                .zip(&mean.data)
                .map(|(&sq, &m)| (sq - m * m).max(0.0) as f32)
                .collect();
            Plane {
                width: gray.width,
                height: gray.height,
                data,
            }
        }
    }
}

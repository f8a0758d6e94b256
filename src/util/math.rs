//! Numeric helpers for scale sampling and coordinate mapping.

/// Returns `steps` evenly spaced values covering `[start, stop]` inclusively.
///
/// A single step yields `start`. The last sample is pinned to `stop` so the
/// upper bound is hit exactly regardless of accumulated rounding.
pub(crate) fn linspace(start: f32, stop: f32, steps: usize) -> Vec<f32> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let start = f64::from(start);
            let stop = f64::from(stop);
            let step = (stop - start) / (steps - 1) as f64;
            (0..steps)
                .map(|i| {
                    if i == steps - 1 {
                        stop as f32
                    } else {
                        (start + step * i as f64) as f32
                    }
                })
                .collect()
        }
    }
}

/// Scales a pixel dimension and rounds to the nearest integer, minimum 0.
pub(crate) fn scaled_dim(dim: usize, scale: f32) -> usize {
    let scaled = (dim as f64 * f64::from(scale)).round();
    if scaled <= 0.0 {
        0
    } else {
        scaled as usize
    }
}

/// Maps a coordinate from a resized image back to the original grid.
///
/// Truncates toward zero, matching integer casting of the scaled value.
pub(crate) fn map_back(coord: usize, ratio: f64) -> usize {
    (coord as f64 * ratio) as usize
}

//! Window curves used by the Paulstretch engine.

use std::f32::consts::PI;

/// Paulstretch analysis/synthesis window: `(1 - x²)^1.25` for `x` spanning
/// `[-1, 1]` inclusive.
///
/// Zero at both ends, one in the middle. Steeper shoulders than Hann, which
/// keeps the smeared frames from bleeding into each other.
pub fn paulstretch_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    let last = (size - 1) as f32;
    (0..size)
        .map(|i| {
            let x = 2.0 * i as f32 / last - 1.0;
            (1.0 - x * x).max(0.0).powf(1.25)
        })
        .collect()
}

/// Gain curve applied after overlap-adding two half frames.
///
/// The squared window does not sum to a constant at 50% overlap; this
/// raised-cosine curve flattens the dip at the frame seams.
pub fn overlap_compensation(len: usize) -> Vec<f32> {
    let centre = (1.0 + 0.5f32.sqrt()) * 0.5;
    let span = (len.max(2) - 1) as f32;
    (0..len)
        .map(|i| centre - (1.0 - centre) * (2.0 * PI * i as f32 / span).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_shape() {
        let window = paulstretch_window(1025);
        assert_eq!(window.len(), 1025);
        assert!(window[0] < 1e-6);
        assert!(window[1024] < 1e-6);
        assert_relative_eq!(window[512], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_window_symmetric() {
        let window = paulstretch_window(512);
        for i in 0..256 {
            assert_relative_eq!(window[i], window[511 - i], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_degenerate_window() {
        assert!(paulstretch_window(0).is_empty());
        assert_eq!(paulstretch_window(1), vec![1.0]);
    }

    #[test]
    fn test_compensation_range() {
        let curve = overlap_compensation(256);
        let centre = (1.0 + 0.5f32.sqrt()) * 0.5;
        // ends sit at 2c - 1, middle peaks near 1
        assert_relative_eq!(curve[0], 2.0 * centre - 1.0, epsilon = 1e-5);
        assert!(curve.iter().all(|&g| g > 0.0 && g <= 1.0 + 1e-5));
    }
}

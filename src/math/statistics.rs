//! Summary statistics over scalar samples
//!
//! Generic over `num_traits::Float` so grids of `f32` and `f64` share the
//! same helpers. Empty inputs yield `None` rather than NaN.

use num_traits::{Float, FromPrimitive};

/// Arithmetic mean
pub fn mean<T: Float + FromPrimitive>(samples: &[T]) -> Option<T> {
    if samples.is_empty() {
        return None;
    }
    let total = samples.iter().fold(T::zero(), |acc, &value| acc + value);
    T::from_usize(samples.len()).map(|count| total / count)
}

/// Population standard deviation
pub fn std_dev<T: Float + FromPrimitive>(samples: &[T]) -> Option<T> {
    let centre = mean(samples)?;
    let squares: Vec<T> = samples
        .iter()
        .map(|&value| (value - centre).powi(2))
        .collect();
    mean(&squares).map(Float::sqrt)
}

/// Percentile with linear interpolation between closest ranks
///
/// `percentile` is clamped to [0, 100]. NaN samples are ignored.
pub fn percentile<T: Float + FromPrimitive>(samples: &[T], percentile: f64) -> Option<T> {
    let mut sorted: Vec<T> = samples.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = percentile.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = T::from_f64(rank - lower as f64)?;

    let low = *sorted.get(lower)?;
    let high = *sorted.get(upper)?;
    Some(low + (high - low) * fraction)
}

/// Minimum and maximum, ignoring NaN
pub fn min_max<T: Float>(samples: &[T]) -> Option<(T, T)> {
    samples
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
}

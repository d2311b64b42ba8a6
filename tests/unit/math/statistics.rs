//! Tests for the summary statistics helpers

#[cfg(test)]
mod tests {
    use grainseg::math::statistics::{mean, min_max, percentile, std_dev};

    // Mean of a small sample
    // Verified by dividing by len - 1
    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean::<f64>(&[]), None);
        assert_eq!(mean(&[2.0_f32, 4.0]), Some(3.0));
    }

    // Population standard deviation
    // Verified by using the sample variance
    #[test]
    fn test_std_dev() {
        let samples = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sigma = std_dev(&samples).unwrap();
        assert!((sigma - 2.0).abs() < 1e-12);
        assert_eq!(std_dev::<f64>(&[]), None);
    }

    // Percentiles interpolate between ranks and clamp their argument
    // Verified by rounding the rank instead of interpolating
    #[test]
    fn test_percentile() {
        let samples = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(percentile(&samples, 0.0), Some(1.0));
        assert_eq!(percentile(&samples, 50.0), Some(2.5));
        assert_eq!(percentile(&samples, 100.0), Some(4.0));
        assert_eq!(percentile(&samples, 150.0), Some(4.0));
        assert_eq!(percentile(&samples, -5.0), Some(1.0));
    }

    // NaN samples do not take part in ranking
    // Verified by keeping NaN in the sorted buffer
    #[test]
    fn test_nan_ignored() {
        assert_eq!(percentile(&[f64::NAN, 3.0, 1.0], 100.0), Some(3.0));
        assert_eq!(percentile(&[f64::NAN], 50.0), None);
        assert_eq!(min_max(&[f64::NAN, 2.0, -1.0]), Some((-1.0, 2.0)));
    }

    // Range of a sample
    // Verified by swapping min and max
    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[3.0, 8.0, 5.0]), Some((3.0, 8.0)));
        assert_eq!(min_max::<f64>(&[]), None);
    }
}

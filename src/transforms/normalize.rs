/// Computes the arithmetic mean of a slice of values. Returns NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the sample standard deviation (n - 1 denominator) given a
/// pre-computed mean. Undefined, and so NaN, for fewer than two values.
pub fn sample_stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// True when every element equals the first. Checked directly because the
/// computed variance of a constant non-integer series is rarely exactly zero.
pub fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Standardizes a series to zero mean and unit sample standard deviation.
///
/// A constant series has zero spread, so every element comes back NaN; the
/// charts draw that as a gap rather than inventing a flat zero line.
pub fn zscore(series: &[f64]) -> Vec<f64> {
    if is_constant(series) {
        return vec![f64::NAN; series.len()];
    }
    let mean = mean(series);
    let sd = sample_stddev(series, mean);

    if sd == 0.0 || sd.is_nan() {
        return vec![f64::NAN; series.len()];
    }

    series.iter().map(|x| (x - mean) / sd).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_sample_stddev_uses_n_minus_one() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        // population stddev would be exactly 2.0
        assert!((sample_stddev(&values, m) - (32.0f64 / 7.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn test_zscore_has_zero_mean_and_unit_stddev() {
        let z = zscore(&[3.0, 17.0, 40.0, 8.0, 1.0, 95.0]);
        let m = mean(&z);
        assert!(m.abs() < EPS);
        assert!((sample_stddev(&z, m) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_zscore_two_values() {
        let z = zscore(&[10.0, 20.0]);
        let half = std::f64::consts::FRAC_1_SQRT_2;
        assert!((z[0] + half).abs() < EPS);
        assert!((z[1] - half).abs() < EPS);
    }

    #[test]
    fn test_zscore_constant_series_is_all_nan() {
        let z = zscore(&[5.0, 5.0, 5.0, 5.0]);
        assert_eq!(z.len(), 4);
        assert!(z.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_zscore_fractional_constant_series_is_all_nan() {
        for (value, n) in [(0.1, 3), (0.2, 24), (0.24, 24), (0.2194, 731)] {
            let z = zscore(&vec![value; n]);
            assert_eq!(z.len(), n);
            assert!(z.iter().all(|v| v.is_nan()), "{value} x {n}");
        }
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[0.24; 5]));
        assert!(is_constant(&[]));
        assert!(!is_constant(&[0.24, 0.25]));
    }

    #[test]
    fn test_zscore_single_value_is_nan() {
        let z = zscore(&[42.0]);
        assert_eq!(z.len(), 1);
        assert!(z[0].is_nan());
    }

    #[test]
    fn test_zscore_empty() {
        assert!(zscore(&[]).is_empty());
    }

    #[test]
    fn test_zscore_does_not_touch_input() {
        let input = vec![1.0, 2.0, 3.0];
        let _ = zscore(&input);
        assert_eq!(input, vec![1.0, 2.0, 3.0]);
    }
}

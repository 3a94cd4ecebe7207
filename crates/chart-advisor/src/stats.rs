// File: crates/chart-advisor/src/stats.rs
// Summary: Small population statistics over f64 slices.

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() { return None; }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by n); `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// (min, max) of the slice; `None` when empty.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() { return None; }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_have_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn population_std_dev_divides_by_n() {
        // mean 5, squared deviations sum to 32 over 8 samples
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), Some(5.0));
        assert!((population_std_dev(&v).unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(min_max(&v), Some((2.0, 9.0)));
    }
}

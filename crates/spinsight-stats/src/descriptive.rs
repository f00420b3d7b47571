/// Descriptive statistics summarizing a dataset of `f64` samples.
///
/// Empty datasets yield `None` rather than propagating NaN into downstream
/// ranking arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The population variance of the dataset.
    pub variance: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics over `values`.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use spinsight_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.variance, 2.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            min,
            max,
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Mean absolute deviation of `values` from a fixed `center`.
///
/// Used by the cycle analyzer to measure how far phase-bucket peaks sit from
/// the uniform baseline. Returns `None` for empty input.
///
/// # Examples
///
/// ```
/// # use spinsight_stats::descriptive::mean_abs_deviation;
/// let mad = mean_abs_deviation([1.0, 3.0], 2.0).unwrap();
/// assert_eq!(mad, 1.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_abs_deviation<I>(values: I, center: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0_usize;
    for v in values {
        sum += (v - center).abs();
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        assert!(DescriptiveStats::new([]).is_none());
        assert!(mean_abs_deviation([], 0.0).is_none());
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([42.0]).unwrap();
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_std_dev() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_abs_deviation_about_center() {
        let mad = mean_abs_deviation([0.0, 10.0, 20.0], 10.0).unwrap();
        assert!((mad - 20.0 / 3.0).abs() < 1e-12);
    }
}

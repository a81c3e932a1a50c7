//! Small descriptive statistics used by the layout stages.
//!
//! Quantiles use the lower-index convention of the rest of the pipeline:
//! the first quartile of `n` sorted values is element `(n - 1) / 4`, the
//! median of the descending-sorted values is element `(n - 1) / 2`.

use crate::utils::safe_float_cmp;

/// Arithmetic mean. Returns `0.0` for an empty slice.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    (sum / values.len() as f64) as f32
}

/// Unbiased sample variance (denominator `n - 1`).
///
/// Returns `0.0` when fewer than two values are given.
pub fn sample_variance(values: &[f32]) -> f32 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values) as f64;
    let squares: f64 = values.iter().map(|&v| (v as f64 - m).powi(2)).sum();
    (squares / (n - 1) as f64) as f32
}

/// Sample standard deviation.
pub fn std_dev(values: &[f32]) -> f32 {
    sample_variance(values).sqrt()
}

/// Silverman's rule-of-thumb bandwidth for a Gaussian kernel:
/// `h = (4/3)^(1/5) * sigma * n^(-1/5)`.
///
/// # Examples
///
/// ```
/// use wordlist_oxide::statistics::silverman_bandwidth;
///
/// assert_eq!(silverman_bandwidth(&[0.2, 0.2, 0.2]), 0.0);
/// assert!(silverman_bandwidth(&[0.1, 0.2, 0.4]) > 0.0);
/// ```
pub fn silverman_bandwidth(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f32;
    (4.0f32 / 3.0).powf(0.2) * std_dev(values) * n.powf(-0.2)
}

/// Gaussian kernel density evaluated at every sample.
///
/// Entry `i` is `1/(n h) * sum_j phi((x_i - x_j) / h)`. Returns an empty
/// vector when `h` is not positive.
pub fn gaussian_kde(values: &[f32], h: f32) -> Vec<f32> {
    if !(h > 0.0) || values.is_empty() {
        return Vec::new();
    }
    let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * values.len() as f64 * h as f64);
    values
        .iter()
        .map(|&xi| {
            let sum: f64 = values
                .iter()
                .map(|&xj| {
                    let u = (xi as f64 - xj as f64) / h as f64;
                    (-0.5 * u * u).exp()
                })
                .sum();
            (sum * norm) as f32
        })
        .collect()
}

/// The sample with the highest Gaussian KDE density (Silverman bandwidth).
///
/// Ties go to the earliest sample. When the bandwidth collapses to zero all
/// samples are equal and the first one is returned.
///
/// # Examples
///
/// ```
/// use wordlist_oxide::statistics::kde_mode;
///
/// let offsets = [0.40, 0.41, 0.40, 0.39, 0.90];
/// let mode = kde_mode(&offsets).unwrap();
/// assert!((mode - 0.40).abs() < 0.02);
/// assert!(kde_mode(&[]).is_none());
/// ```
pub fn kde_mode(values: &[f32]) -> Option<f32> {
    let first = *values.first()?;
    let h = silverman_bandwidth(values);
    let densities = gaussian_kde(values, h);
    if densities.is_empty() {
        return Some(first);
    }

    let mut best = 0;
    for (i, &density) in densities.iter().enumerate() {
        if density > densities[best] {
            best = i;
        }
    }
    Some(values[best])
}

/// Median taken as element `(n - 1) / 2` of the values sorted descending,
/// i.e. the upper middle element for even counts.
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| safe_float_cmp(*b, *a));
    Some(sorted[(sorted.len() - 1) / 2])
}

/// First quartile taken as element `(n - 1) / 4` of the ascending values.
pub fn first_quartile(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| safe_float_cmp(*a, *b));
    Some(sorted[(sorted.len() - 1) / 4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let values = [0.25, 0.5, 0.75];
        assert!((mean(&values) - 0.5).abs() < 1e-6);
        assert!((sample_variance(&values) - 0.0625).abs() < 1e-6);
        assert!((std_dev(&values) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_empty_and_single_values() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_variance(&[0.3]), 0.0);
        assert_eq!(silverman_bandwidth(&[]), 0.0);
        assert!(median(&[]).is_none());
        assert!(first_quartile(&[]).is_none());
        assert_eq!(kde_mode(&[0.7]), Some(0.7));
    }

    #[test]
    fn test_kde_rejects_zero_bandwidth() {
        assert!(gaussian_kde(&[0.1, 0.2], 0.0).is_empty());
    }

    #[test]
    fn test_kde_integrates_to_density_scale() {
        // A single sample evaluated at itself is the kernel peak 1/(sqrt(2pi) h)
        let density = gaussian_kde(&[0.5], 0.1);
        assert!((density[0] - 3.989_423).abs() < 1e-3);
    }

    #[test]
    fn test_kde_mode_prefers_cluster_over_outlier() {
        let values = [0.9, 0.2, 0.21, 0.19, 0.2];
        let mode = kde_mode(&values).unwrap();
        assert!((mode - 0.2).abs() < 0.011);
    }

    #[test]
    fn test_kde_mode_ties_take_first() {
        assert_eq!(kde_mode(&[0.3, 0.3, 0.3]), Some(0.3));
        // Symmetric pair: both densities are equal, first wins
        assert_eq!(kde_mode(&[0.1, 0.5]), Some(0.1));
    }

    #[test]
    fn test_median_upper_middle() {
        assert_eq!(median(&[0.1, 0.3, 0.2]), Some(0.2));
        assert_eq!(median(&[0.1, 0.2, 0.3, 0.4]), Some(0.3));
    }

    #[test]
    fn test_first_quartile_index() {
        assert_eq!(first_quartile(&[0.5, 0.1, 0.4, 0.2, 0.3]), Some(0.2));
        assert_eq!(first_quartile(&[0.9, 0.8]), Some(0.8));
    }
}

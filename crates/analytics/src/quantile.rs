//! Empirical quantiles.
//!
//! Both historical VaR and the simulator's percentile bands go through these
//! functions so the two sets of figures are directly comparable. The rule is
//! linear interpolation between closest ranks: for `n` sorted values and
//! probability `p`, take position `h = (n - 1) * p` and interpolate between
//! `sorted[floor(h)]` and `sorted[ceil(h)]`. This is the numpy/pandas default.

/// Quantile of an ascending-sorted slice. `None` when the slice is empty.
///
/// `p` is clamped to `[0, 1]`.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    // Bounded by the bracketing ranks so rounding cannot break monotonicity in `p`.
    let value = sorted[lo] + (sorted[hi] - sorted[lo]) * frac;
    Some(value.max(sorted[lo]).min(sorted[hi]))
}

/// Sorts a copy of `values` and takes its quantile.
pub fn quantile_unsorted(values: &[f64], p: f64) -> Option<f64> {
    let sorted = sorted_copy(values);
    quantile(&sorted, p)
}

pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(1.0, 5.0)]
    #[case(0.5, 3.0)]
    #[case(0.25, 2.0)]
    #[case(0.1, 1.4)]
    #[case(0.95, 4.8)]
    fn interpolates_linearly(#[case] p: f64, #[case] expected: f64) {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(quantile(&sorted, p).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn empty_has_no_quantile() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn single_value_is_every_quantile() {
        assert_eq!(quantile(&[7.0], 0.05), Some(7.0));
        assert_eq!(quantile(&[7.0], 0.95), Some(7.0));
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        assert_eq!(quantile_unsorted(&[5.0, 1.0, 3.0], 0.5), Some(3.0));
    }
}

//! NaN substitution for invalid parameter sets and input positions.
//!
//! Float arithmetic never traps, so overflow and invalid operations inside a
//! formula resolve to `inf`/NaN on their own. The helpers here apply the
//! explicit domain checks on top of that result; the explicit check wins.

use crate::traits::Scalar;
use ndarray::{Array, ArrayBase, Data, Dimension, Zip};

/// An all-NaN array shaped like `input`. Used when a parameter set is invalid.
pub fn fill_invalid<T, S, D>(input: &ArrayBase<S, D>) -> Array<T, D>
where
    T: Scalar,
    S: Data,
    D: Dimension,
{
    Array::from_elem(input.raw_dim(), T::nan())
}

/// Replaces every position of `output` whose `valid` flag is false with NaN.
///
/// # Panics
/// If `output` and `valid` differ in shape.
pub fn mask_invalid<T, S, D>(mut output: Array<T, D>, valid: &ArrayBase<S, D>) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = bool>,
    D: Dimension,
{
    Zip::from(&mut output).and(valid).for_each(|y, &ok| {
        if !ok {
            *y = T::nan();
        }
    });
    output
}

/// `1 / denom`, computed only where `denom != 0`. Zero divisors yield NaN
/// rather than `inf`.
pub fn reciprocal_where_nonzero<T, S, D>(denom: &ArrayBase<S, D>) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    denom.mapv(|d| if d != T::zero() { d.recip() } else { T::nan() })
}

/// Flags `domain > 0` elementwise. NaN compares false and is therefore invalid.
pub(crate) fn positive_mask<T, S, D>(domain: &ArrayBase<S, D>) -> Array<bool, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    domain.mapv(|d| d > T::zero())
}

pub(crate) fn log_masked<D: Dimension>(curve: &str, valid: &Array<bool, D>) {
    if log::log_enabled!(log::Level::Trace) {
        let masked = valid.iter().filter(|ok| !**ok).count();
        if masked > 0 {
            log::trace!("{curve}: {masked} of {} positions outside the domain", valid.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn fill_invalid_keeps_shape() {
        let input = Array2::<f64>::zeros((2, 3));
        let out: Array2<f64> = fill_invalid(&input);
        assert_eq!(out.shape(), &[2, 3]);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn mask_invalid_only_touches_flagged_positions() {
        let out = mask_invalid(array![1.0_f64, 2.0, 3.0], &array![true, false, true]);
        assert_eq!(out[0], 1.0);
        assert!(out[1].is_nan());
        assert_eq!(out[2], 3.0);
    }

    #[test]
    #[should_panic]
    fn mask_invalid_requires_matching_shapes() {
        mask_invalid(array![1.0_f64, 2.0], &array![true, false, true]);
    }

    #[test]
    fn reciprocal_of_zero_is_nan_not_inf() {
        let out = reciprocal_where_nonzero(&array![2.0_f64, 0.0, -0.0, -4.0]);
        assert_eq!(out[0], 0.5);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert_eq!(out[3], -0.25);
    }

    #[test]
    fn positive_mask_rejects_nan_and_zero() {
        let mask = positive_mask(&array![1.0_f64, 0.0, -1.0, f64::NAN]);
        assert_eq!(mask, array![true, false, false, false]);
    }
}

//! Outlier cut-offs for one-dimensional samples.
//!
//! Two classic rules are provided:
//!
//! - [`Method::StdDev`]: anything further than `k` standard deviations from the mean is an
//!   outlier (`k = 3` by default).
//! - [`Method::Iqr`]: Tukey's fences, `q25 - k * IQR` and `q75 + k * IQR` (`k = 1.5` by default).
//!
//! ```
//! use outlier_fences::{classify, compute_bounds, Method};
//!
//! let sample = [10., 12., 12., 13., 12., 11., 14., 13., 15., 10., 10., 100.];
//! let bounds = compute_bounds(&sample, Method::Iqr, 1.5).unwrap();
//! assert_eq!((bounds.lower, bounds.upper), (7.0, 17.0));
//!
//! let (outliers, inliers) = classify(&sample, bounds.lower, bounds.upper).into_parts();
//! assert_eq!(outliers, vec![100.]);
//! assert_eq!(inliers.len(), 11);
//! ```
//!
//! A value sitting exactly on a bound is *not* an outlier.

#![allow(clippy::float_cmp)]

use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

mod detector;
mod error;
mod format;
#[cfg(feature = "plotters")]
pub mod plot;

pub mod cli;
pub mod report;
pub mod source;
pub mod stats;

pub use crate::detector::{Analysis, OutlierDetector};
pub use crate::error::{DomainError, Error, Result};
pub use crate::stats::univariate::outliers::{Bounds, Classification, Label};
pub use crate::stats::univariate::Sample;
pub use crate::stats::Float;

use crate::stats::univariate::outliers::{partition, sigma, tukey};

/// Rule used to derive the outlier bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `mean ± k * std_dev`, population standard deviation
    StdDev,
    /// `[q25 - k * IQR, q75 + k * IQR]`, percentiles by linear interpolation
    Iqr,
}

impl Method {
    /// The conventional cut-off factor: 3 for `StdDev`, 1.5 for `Iqr`
    pub fn default_cut_off(self) -> f64 {
        match self {
            Method::StdDev => sigma::DEFAULT_CUT_OFF,
            Method::Iqr => tukey::DEFAULT_CUT_OFF,
        }
    }

    /// Smallest sample the method accepts
    pub fn min_points(self) -> usize {
        match self {
            Method::StdDev => sigma::MIN_POINTS,
            Method::Iqr => 1,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Method::StdDev => "stddev",
            Method::Iqr => "iqr",
        }
    }
}

impl Default for Method {
    fn default() -> Method {
        Method::Iqr
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Method, String> {
        match s.to_ascii_lowercase().as_str() {
            "stddev" | "std-dev" | "sigma" => Ok(Method::StdDev),
            "iqr" | "tukey" => Ok(Method::Iqr),
            other => Err(format!(
                "unknown method {:?}, expected `stddev` or `iqr`",
                other
            )),
        }
    }
}

/// Computes the outlier bounds of `sample`
///
/// # Errors
///
/// - [`DomainError::InvalidCutOff`] if `k` is negative, `NaN` or infinite
/// - [`DomainError::EmptySample`] / [`DomainError::NonFinite`] if `sample` is not a valid
///   [`Sample`]
/// - [`DomainError::TooFewPoints`] if `sample` is smaller than [`Method::min_points`]
/// - [`DomainError::BoundsOverflow`] if a bound doesn't fit in `A`, e.g. when the sample spans
///   most of the floating point range
///
/// The returned bounds are always finite and satisfy `lower <= upper`.
pub fn compute_bounds<A>(
    sample: &[A],
    method: Method,
    k: A,
) -> ::std::result::Result<Bounds<A>, DomainError>
where
    A: Float,
{
    check_cut_off(k)?;

    let sample = Sample::new(sample)?;

    let bounds = match method {
        Method::StdDev => sigma::fences(sample, k)?,
        Method::Iqr => tukey::fences(sample, k),
    };

    checked_bounds(method, k, sample.len(), bounds)
}

fn check_cut_off<A>(k: A) -> ::std::result::Result<(), DomainError>
where
    A: Float,
{
    if !k.is_finite() || k < A::cast(0) {
        return Err(DomainError::InvalidCutOff(k.as_f64()));
    }

    Ok(())
}

/// Rejects bounds that overflowed while being computed
pub(crate) fn checked_bounds<A>(
    method: Method,
    k: A,
    size: usize,
    bounds: Bounds<A>,
) -> ::std::result::Result<Bounds<A>, DomainError>
where
    A: Float,
{
    // NB also catches `NaN`s, which compare false
    if !(bounds.lower.is_finite() && bounds.upper.is_finite() && bounds.lower <= bounds.upper) {
        tracing::debug!(
            "{} bounds with k = {} over {} points overflowed: [{}, {}]",
            method,
            k,
            size,
            bounds.lower,
            bounds.upper
        );

        return Err(DomainError::BoundsOverflow {
            method,
            cut_off: k.as_f64(),
        });
    }

    tracing::debug!(
        "{} bounds with k = {} over {} points: [{}, {}]",
        method,
        k,
        size,
        bounds.lower,
        bounds.upper
    );

    Ok(bounds)
}

/// Splits `sample` into `(outliers, inliers)`
///
/// `x` is an outlier iff `x < lower` or `x > upper`. Both halves keep the order of `sample`.
pub fn classify<A>(sample: &[A], lower: A, upper: A) -> Classification<A>
where
    A: Float,
{
    partition(sample, Bounds { lower, upper })
}

#[cfg(test)]
mod tests {
    use approx::relative_eq;
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::stats::test::scaled_vec;

    const EXAMPLE: [f64; 12] = [
        10., 12., 12., 13., 12., 11., 14., 13., 15., 10., 10., 100.,
    ];

    #[test]
    fn iqr_example() {
        let bounds = compute_bounds(&EXAMPLE, Method::Iqr, 1.5).unwrap();

        assert!(relative_eq!(bounds.lower, 7.0));
        assert!(relative_eq!(bounds.upper, 17.0));

        let (outliers, inliers) = classify(&EXAMPLE, bounds.lower, bounds.upper).into_parts();
        assert_eq!(outliers, vec![100.]);
        assert_eq!(inliers, EXAMPLE[..11].to_vec());
    }

    #[test]
    fn stddev_bounds_are_inclusive() {
        let bounds = compute_bounds(&[45., 55.], Method::StdDev, 3.).unwrap();
        assert_eq!((bounds.lower, bounds.upper), (35., 65.));

        let classification = classify(&[35., 65.0, 65.0001, 34.9999], bounds.lower, bounds.upper);
        assert_eq!(classification.inliers, vec![35., 65.]);
        assert_eq!(classification.outliers, vec![65.0001, 34.9999]);
    }

    #[test]
    fn values_on_the_bounds_are_inliers() {
        for &method in &[Method::StdDev, Method::Iqr] {
            let mut sample = scaled_vec(50, 7, 10.);
            let bounds = compute_bounds(&sample, method, 1.).unwrap();
            sample.push(bounds.lower);
            sample.push(bounds.upper);

            let classification = classify(&sample, bounds.lower, bounds.upper);
            assert!(!classification.outliers.contains(&bounds.lower));
            assert!(!classification.outliers.contains(&bounds.upper));
        }
    }

    #[test]
    fn identical_values_collapse_the_bounds() {
        let sample = [4.5; 9];

        for &method in &[Method::StdDev, Method::Iqr] {
            let bounds = compute_bounds(&sample, method, method.default_cut_off()).unwrap();
            assert_eq!((bounds.lower, bounds.upper), (4.5, 4.5));
            assert!(classify(&sample, bounds.lower, bounds.upper)
                .outliers
                .is_empty());
        }
    }

    #[test]
    fn zero_cut_off() {
        let sample = [1., 2., 3., 4., 5.];

        let bounds = compute_bounds(&sample, Method::StdDev, 0.).unwrap();
        assert_eq!((bounds.lower, bounds.upper), (3., 3.));

        let bounds = compute_bounds(&sample, Method::Iqr, 0.).unwrap();
        assert_eq!((bounds.lower, bounds.upper), (2., 4.));
    }

    #[test]
    fn domain_errors() {
        let empty: [f64; 0] = [];

        assert_eq!(
            compute_bounds(&empty, Method::Iqr, 1.5),
            Err(DomainError::EmptySample)
        );
        assert_eq!(
            compute_bounds(&[1.], Method::StdDev, 3.),
            Err(DomainError::TooFewPoints {
                method: Method::StdDev,
                required: 2,
                actual: 1,
            })
        );
        assert_eq!(
            compute_bounds(&[1., 2.], Method::Iqr, -1.),
            Err(DomainError::InvalidCutOff(-1.))
        );
        assert!(compute_bounds(&[1., 2.], Method::Iqr, f64::NAN).is_err());
        assert_eq!(
            compute_bounds(&[1., f64::INFINITY], Method::Iqr, 1.5),
            Err(DomainError::NonFinite { index: 1 })
        );
        assert!(compute_bounds(&[1.], Method::Iqr, 1.5).is_ok());
    }

    #[test]
    fn extreme_samples_never_give_nan_bounds() {
        let max = f64::MAX;

        for &method in &[Method::StdDev, Method::Iqr] {
            assert_eq!(
                compute_bounds(&[-max, max], method, 1.5),
                Err(DomainError::BoundsOverflow {
                    method,
                    cut_off: 1.5,
                })
            );
        }

        assert_eq!(
            compute_bounds(&[max, max, -max, 0.], Method::StdDev, 3.),
            Err(DomainError::BoundsOverflow {
                method: Method::StdDev,
                cut_off: 3.,
            })
        );
    }

    #[test]
    fn extreme_samples_with_representable_bounds() {
        let max = f64::MAX;

        let bounds = compute_bounds(&[max, max, -max, 0.], Method::StdDev, 0.).unwrap();
        assert_eq!((bounds.lower, bounds.upper), (max / 4., max / 4.));

        let bounds = compute_bounds(&[-max, max], Method::Iqr, 0.).unwrap();
        assert!(bounds.lower.is_finite() && bounds.upper.is_finite());
        assert!(bounds.lower <= bounds.upper);
        assert!(relative_eq!(bounds.upper, max / 2., max_relative = 1e-12));

        // q25 and q75 are about -max / 16 and max / 16, so the fences stay near -max / 4 and max / 4
        let eighth = max / 8.;
        let bounds = compute_bounds(&[-eighth, eighth], Method::Iqr, 1.5).unwrap();
        assert!(bounds.lower.is_finite() && bounds.upper.is_finite());
        let (outliers, inliers) =
            classify(&[-eighth, eighth], bounds.lower, bounds.upper).into_parts();
        assert!(outliers.is_empty());
        assert_eq!(inliers.len(), 2);
    }

    #[test]
    fn deterministic() {
        let sample = scaled_vec(200, 3, 100.);

        for &method in &[Method::StdDev, Method::Iqr] {
            let a = compute_bounds(&sample, method, 2.).unwrap();
            let b = compute_bounds(&sample, method, 2.).unwrap();
            assert_eq!(a, b);
            assert_eq!(
                classify(&sample, a.lower, a.upper),
                classify(&sample, b.lower, b.upper)
            );
        }
    }

    #[test]
    fn method_names() {
        assert_eq!("stddev".parse(), Ok(Method::StdDev));
        assert_eq!("IQR".parse(), Ok(Method::Iqr));
        assert!("median".parse::<Method>().is_err());
        assert_eq!(Method::StdDev.to_string(), "stddev");
        assert_eq!(Method::default(), Method::Iqr);
    }

    #[test]
    fn smallest_accepted_samples() {
        for &method in &[Method::StdDev, Method::Iqr] {
            let sample = vec![1.; method.min_points()];
            assert!(compute_bounds(&sample, method, 1.).is_ok());
            assert!(compute_bounds(&sample[1..], method, 1.).is_err());
        }
    }

    quickcheck! {
        fn classification_is_a_partition(seed: u64, size: u8) -> TestResult {
            if size < 2 {
                return TestResult::discard();
            }

            let sample = scaled_vec(size as usize, seed, 1000.);
            let bounds = compute_bounds(&sample, Method::Iqr, 1.5).unwrap();
            let classification = classify(&sample, bounds.lower, bounds.upper);

            let mut joined = classification.outliers.clone();
            joined.extend_from_slice(&classification.inliers);
            joined.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let mut expected = sample.clone();
            expected.sort_by(|a, b| a.partial_cmp(b).unwrap());

            TestResult::from_bool(joined == expected)
        }
    }

    quickcheck! {
        fn wider_cut_off_finds_fewer_outliers(seed: u64, k1: u8, k2: u8) -> TestResult {
            if k1 >= k2 {
                return TestResult::discard();
            }
            let (k1, k2) = (f64::from(k1) / 10., f64::from(k2) / 10.);

            let mut sample = scaled_vec(100, seed, 10.);
            sample.extend_from_slice(&[50., -80., 120.]);

            for &method in &[Method::StdDev, Method::Iqr] {
                let narrow = compute_bounds(&sample, method, k1).unwrap();
                let wide = compute_bounds(&sample, method, k2).unwrap();
                let narrow = classify(&sample, narrow.lower, narrow.upper).outliers;
                let wide = classify(&sample, wide.lower, wide.upper).outliers;

                if !wide.iter().all(|x| narrow.contains(x)) {
                    return TestResult::failed();
                }
            }

            TestResult::passed()
        }
    }
}

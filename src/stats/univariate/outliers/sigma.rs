//! Standard deviation ("sigma") method
//!
//! Data points further than `k` population standard deviations away from the mean are outliers:
//!
//! ``` ignore
//! let (lower, upper) = (mean - k * std_dev, mean + k * std_dev);
//! ```
//!
//! This assumes a roughly Gaussian sample. With `k = 3` about 0.3% of normally distributed data
//! ends up outside the bounds. Because the outliers themselves inflate the standard deviation,
//! Tukey's method is usually the better choice for skewed or heavy-tailed data.

use crate::error::DomainError;
use crate::stats::float::Float;
use crate::stats::univariate::outliers::Bounds;
use crate::stats::univariate::Sample;
use crate::Method;

/// The classic "three sigma" rule
pub const DEFAULT_CUT_OFF: f64 = 3.0;

/// The standard deviation of a single point carries no information
pub const MIN_POINTS: usize = 2;

/// Computes `mean ± k * std_dev`
///
/// # Errors
///
/// Fails if the sample has fewer than [`MIN_POINTS`] data points
///
/// The bounds are not finite if `mean ± k * std_dev` doesn't fit in `A`.
///
/// - Time: `O(length)`
pub fn fences<A>(sample: &Sample<A>, k: A) -> Result<Bounds<A>, DomainError>
where
    A: Float,
{
    let required = Method::StdDev.min_points();
    if sample.len() < required {
        return Err(DomainError::TooFewPoints {
            method: Method::StdDev,
            required,
            actual: sample.len(),
        });
    }

    let mean = sample.mean();
    let spread = k * sample.std_dev(Some(mean));

    Ok(Bounds {
        lower: mean - spread,
        upper: mean + spread,
    })
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::relative_eq;
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use crate::error::DomainError;
            use crate::stats::univariate::outliers::sigma;
            use crate::stats::univariate::Sample;
            use crate::Method;

            quickcheck! {
                fn bounds_are_centered_on_the_mean(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;

                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]).unwrap();
                        let bounds = sigma::fences(sample, 2.).unwrap();
                        let mean = sample.mean();

                        TestResult::from_bool(relative_eq!(
                            mean - bounds.lower,
                            bounds.upper - mean,
                            epsilon = 1e-4
                        ))
                    } else {
                        TestResult::discard()
                    }
                }
            }

            #[test]
            fn three_sigma() {
                // mean = 50, population std dev = 5
                let data: [$ty; 2] = [45., 55.];
                let bounds = sigma::fences(Sample::new(&data).unwrap(), 3.).unwrap();

                assert!(relative_eq!(bounds.lower, 35.));
                assert!(relative_eq!(bounds.upper, 65.));
                assert!(!bounds.is_outlier(65.));
                assert!(bounds.is_outlier(65.01));
            }

            #[test]
            fn needs_two_points() {
                let data: [$ty; 1] = [1.];

                assert_eq!(
                    sigma::fences(Sample::new(&data).unwrap(), 3.),
                    Err(DomainError::TooFewPoints {
                        method: Method::StdDev,
                        required: 2,
                        actual: 1,
                    })
                );
            }
        }
    };
}

#[cfg(test)]
mod test {
    test!(f32);
    test!(f64);
}

//! Tukey's method
//!
//! The method uses two "fences" to classify the data. All the observations "inside" the fences are
//! considered "normal", and the rest are considered outliers.
//!
//! The fences are computed from the quartiles of the sample, according to the following formula:
//!
//! ``` ignore
//! // q1, q3 are the first and third quartiles, k is the cut-off factor (1.5 by default)
//! let iqr = q3 - q1;  // The interquartile range
//! let (f1, f2) = (q1 - k * iqr, q3 + k * iqr);  // the "fences"
//!
//! let is_outlier = |x| x < f1 || x > f2;
//! ```
//!
//! Some ASCII art for the visually oriented people:
//!
//! ``` ignore
//!          LOW                    NORMAL                      HIGH
//!         x   x    |  o o  o  [  o o  o  o  ]  o  o  |    x       x
//!                  f1         q1            q3       f2
//!
//! Legend:
//! o: "normal" data (not an outlier)
//! x: outlier
//! ```

use crate::stats::float::Float;
use crate::stats::univariate::outliers::Bounds;
use crate::stats::univariate::Sample;

/// The cut-off factor used by Tukey's original box plots
pub const DEFAULT_CUT_OFF: f64 = 1.5;

/// Computes the fences of the sample with cut-off factor `k`
///
/// A single data point is enough; the fences then collapse onto it.
///
/// - Time: `O(N log N) where N = length`
pub fn fences<A>(sample: &Sample<A>, k: A) -> Bounds<A>
where
    A: Float,
{
    let (q1, _, q3) = sample.percentiles().quartiles();

    from_quartiles(q1, q3, k)
}

/// Computes the fences from already known first and third quartiles
///
/// The result is not finite if the fences don't fit in `A`.
pub fn from_quartiles<A>(q1: A, q3: A, k: A) -> Bounds<A>
where
    A: Float,
{
    // NB `0 * inf` is `NaN`
    if k == A::cast(0) {
        return Bounds {
            lower: q1,
            upper: q3,
        };
    }

    let iqr = q3 - q1;

    Bounds {
        lower: q1 - k * iqr,
        upper: q3 + k * iqr,
    }
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::relative_eq;
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use crate::stats::univariate::outliers::{label, tukey};
            use crate::stats::univariate::Sample;

            quickcheck! {
                fn fences_contain_the_quartiles(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;

                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]).unwrap();
                        let (q1, _, q3) = sample.percentiles().quartiles();
                        let bounds = tukey::fences(sample, 1.5);

                        TestResult::from_bool(bounds.lower <= q1 && q3 <= bounds.upper)
                    } else {
                        TestResult::discard()
                    }
                }
            }

            #[test]
            fn textbook_example() {
                let data: [$ty; 12] = [10., 12., 12., 13., 12., 11., 14., 13., 15., 10., 10., 100.];
                let sample = Sample::new(&data).unwrap();
                let bounds = tukey::fences(sample, 1.5);

                assert!(relative_eq!(bounds.lower, 7.));
                assert!(relative_eq!(bounds.upper, 17.));

                let labeled = label(sample, bounds);
                assert_eq!(labeled.count(), (0, 11, 1));
                assert_eq!(labeled.partition().outliers, vec![100.]);
            }

            #[test]
            fn zero_cut_off_gives_the_quartiles() {
                let data: [$ty; 5] = [1., 2., 3., 4., 5.];
                let bounds = tukey::fences(Sample::new(&data).unwrap(), 0.);

                assert_eq!((bounds.lower, bounds.upper), (2., 4.));
            }

            #[test]
            fn zero_cut_off_survives_an_infinite_iqr() {
                let max = $ty::MAX;
                let bounds = tukey::from_quartiles(-max, max, 0.);

                assert_eq!((bounds.lower, bounds.upper), (-max, max));
                assert!(!tukey::from_quartiles(-max, max, 1.5).lower.is_finite());
            }
        }
    };
}

#[cfg(test)]
mod test {
    test!(f32);
    test!(f64);
}

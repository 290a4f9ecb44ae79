use std::ops::Add;
use std::{mem, ops};

use crate::error::DomainError;
use crate::stats::float::Float;
use crate::stats::univariate::Percentiles;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A collection of data points drawn from a population
///
/// Invariants:
///
/// - The sample contains at least 1 data point
/// - The sample contains no `NaN`s or infinities
#[repr(transparent)]
pub struct Sample<A>([A]);

impl<A> Sample<A>
where
    A: Float,
{
    /// Creates a new sample from an existing slice
    ///
    /// # Errors
    ///
    /// Fails if `slice` is empty or contains a non-finite value
    #[allow(clippy::new_ret_no_self)]
    pub fn new(slice: &[A]) -> Result<&Sample<A>, DomainError> {
        if slice.is_empty() {
            return Err(DomainError::EmptySample);
        }

        if let Some(index) = slice.iter().position(|x| !x.is_finite()) {
            return Err(DomainError::NonFinite { index });
        }

        // NB `Sample` is `repr(transparent)` over `[A]`
        Ok(unsafe { mem::transmute::<&[A], &Sample<A>>(slice) })
    }

    /// Returns the biggest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn max(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&head) => elems.fold(head, |a, &b| a.max(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns the arithmetic average of the sample
    ///
    /// - Time: `O(length)`
    pub fn mean(&self) -> A {
        let n = A::cast(self.len());
        let sum = self.sum();

        if sum.is_finite() {
            return sum / n;
        }

        // NB the sum overflowed, so at least one point is non-zero
        let scale = self.scale();
        self.iter()
            .map(|&x| x / scale)
            .fold(A::cast(0), Add::add)
            / n
            * scale
    }

    /// Returns the smallest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn min(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&elem) => elems.fold(elem, |a, &b| a.min(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns a "view" into the percentiles of the sample
    ///
    /// This "view" makes consecutive computations of percentiles much faster (`O(1)`)
    ///
    /// - Time: `O(N log N) where N = length`
    /// - Memory: `O(length)`
    pub fn percentiles(&self) -> Percentiles<A> {
        use std::cmp::Ordering;

        // NB `Sample` never contains `NaN`s, so the fallback is never taken
        fn cmp<T>(a: &T, b: &T) -> Ordering
        where
            T: PartialOrd,
        {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }

        let mut v = self.to_vec().into_boxed_slice();
        #[cfg(feature = "rayon")]
        v.par_sort_unstable_by(cmp);
        #[cfg(not(feature = "rayon"))]
        v.sort_unstable_by(cmp);

        Percentiles::from_sorted(v)
    }

    /// Returns the population standard deviation of the sample
    ///
    /// The `mean` can be optionally passed along to speed up (2X) the computation
    ///
    /// - Time: `O(length)`
    pub fn std_dev(&self, mean: Option<A>) -> A {
        let mean = mean.unwrap_or_else(|| self.mean());
        let var = self.var(Some(mean));

        if var.is_finite() {
            return var.sqrt();
        }

        // The population standard deviation never exceeds half the range, so it is representable
        // even when the variance is not
        let scale = self.scale();
        self.scaled_var(mean, scale).sqrt() * scale
    }

    /// Returns the sum of all the elements of the sample
    ///
    /// - Time: `O(length)`
    pub fn sum(&self) -> A {
        crate::stats::sum(self)
    }

    /// Returns the population variance of the sample (the squared deviations are divided by `N`,
    /// not `N - 1`)
    ///
    /// The `mean` can be optionally passed along to speed up (2X) the computation
    ///
    /// - Time: `O(length)`
    pub fn var(&self, mean: Option<A>) -> A {
        let mean = mean.unwrap_or_else(|| self.mean());

        self.scaled_var(mean, A::cast(1))
    }

    /// Variance of the sample divided by `scale`
    fn scaled_var(&self, mean: A, scale: A) -> A {
        let mean = mean / scale;

        let sum = self
            .iter()
            .map(|&x| (x / scale - mean).powi(2))
            .fold(A::cast(0), Add::add);

        sum / A::cast(self.len())
    }

    /// Largest absolute value in the sample
    fn scale(&self) -> A {
        self.iter().fold(A::cast(0), |m, &x| m.max(x.abs()))
    }
}

impl<A> ops::Deref for Sample<A> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.0
    }
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::relative_eq;
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use crate::error::DomainError;
            use crate::stats::univariate::Sample;

            quickcheck! {
                fn mean_lies_between_min_and_max(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;

                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]).unwrap();
                        let mean = sample.mean();
                        let eps = 1e-4;

                        TestResult::from_bool(sample.min() - eps <= mean && mean <= sample.max() + eps)
                    } else {
                        TestResult::discard()
                    }
                }
            }

            quickcheck! {
                fn variance_is_non_negative(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;

                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]).unwrap();

                        TestResult::from_bool(sample.var(None) >= 0.)
                    } else {
                        TestResult::discard()
                    }
                }
            }

            #[test]
            fn population_std_dev() {
                let data: [$ty; 8] = [2., 4., 4., 4., 5., 5., 7., 9.];
                let sample = Sample::new(&data).unwrap();

                assert!(relative_eq!(sample.mean(), 5.));
                assert!(relative_eq!(sample.var(None), 4.));
                assert!(relative_eq!(sample.std_dev(None), 2.));
                assert!(relative_eq!(sample.std_dev(Some(5.)), 2.));
            }

            #[test]
            fn single_point() {
                let data: [$ty; 1] = [42.];
                let sample = Sample::new(&data).unwrap();

                assert_eq!(sample.min(), 42.);
                assert_eq!(sample.max(), 42.);
                assert_eq!(sample.mean(), 42.);
                assert_eq!(sample.var(None), 0.);
            }

            #[test]
            fn extreme_values_do_not_overflow() {
                let max = $ty::MAX;

                let data: [$ty; 4] = [max, max, -max, 0.];
                let sample = Sample::new(&data).unwrap();
                assert_eq!(sample.mean(), max / 4.);
                // the points divided by `max` are [1, 1, -1, 0], whose variance is 0.6875
                let std_dev = sample.std_dev(None);
                assert!(std_dev.is_finite());
                assert!(relative_eq!(
                    std_dev / max,
                    (0.6875 as $ty).sqrt(),
                    max_relative = 1e-5
                ));

                let data: [$ty; 2] = [-max, max];
                let sample = Sample::new(&data).unwrap();
                assert_eq!(sample.mean(), 0.);
                assert_eq!(sample.std_dev(None), max);
            }

            #[test]
            fn rejects_empty() {
                let data: [$ty; 0] = [];

                assert_eq!(Sample::new(&data).err(), Some(DomainError::EmptySample));
            }

            #[test]
            fn rejects_non_finite() {
                let data: [$ty; 3] = [1., $ty::NAN, 3.];
                assert_eq!(
                    Sample::new(&data).err(),
                    Some(DomainError::NonFinite { index: 1 })
                );

                let data: [$ty; 2] = [1., $ty::INFINITY];
                assert_eq!(
                    Sample::new(&data).err(),
                    Some(DomainError::NonFinite { index: 1 })
                );
            }
        }
    };
}

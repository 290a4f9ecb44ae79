use crate::stats::float::Float;

/// A "view" into the percentiles of a sample
///
/// Percentiles are computed by linear interpolation between the two closest order statistics:
/// the `p`th percentile of `N` sorted points sits at rank `p / 100 * (N - 1)`.
pub struct Percentiles<A>(Box<[A]>)
where
    A: Float;

impl<A> Percentiles<A>
where
    A: Float,
{
    /// Wraps an already sorted, non-empty, `NaN`-free slice
    pub(crate) fn from_sorted(sorted: Box<[A]>) -> Percentiles<A> {
        debug_assert!(!sorted.is_empty());
        debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        Percentiles(sorted)
    }

    /// Returns the percentile at `p`%
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the closed `[0, 100]` range
    pub fn at(&self, p: A) -> A {
        let _0 = A::cast(0);
        let _100 = A::cast(100);

        assert!(p >= _0 && p <= _100);
        assert!(!self.0.is_empty());

        let len = self.0.len() - 1;

        if p == _100 {
            return self.0[len];
        }

        let rank = (p / _100) * A::cast(len);
        let integer = rank.floor();
        let fraction = rank - integer;
        // NB `0 <= rank < len` here, so the cast can't fail
        let n = integer.to_usize().unwrap_or(0);
        let floor = self.0[n];

        if fraction == _0 {
            return floor;
        }

        let ceiling = self.0[n + 1];
        if floor == ceiling {
            return floor;
        }

        // NB `ceiling - floor` can overflow, the weighted sum can't; rounding may still nudge the
        // result out of `[floor, ceiling]`
        let interpolated = floor * (A::cast(1) - fraction) + ceiling * fraction;
        interpolated.max(floor).min(ceiling)
    }

    /// Returns the interquartile range
    pub fn iqr(&self) -> A {
        let q1 = self.at(A::cast(25));
        let q3 = self.at(A::cast(75));

        q3 - q1
    }

    /// Returns the 50th percentile
    pub fn median(&self) -> A {
        self.at(A::cast(50))
    }

    /// Returns the 25th, 50th and 75th percentiles
    pub fn quartiles(&self) -> (A, A, A) {
        (
            self.at(A::cast(25)),
            self.at(A::cast(50)),
            self.at(A::cast(75)),
        )
    }
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::relative_eq;
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use crate::stats::univariate::Sample;

            quickcheck! {
                fn percentiles_are_monotonic(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;

                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]).unwrap();
                        let percentiles = sample.percentiles();
                        let (q1, q2, q3) = percentiles.quartiles();
                        let eps = 1e-5;

                        TestResult::from_bool(
                            sample.min() == percentiles.at(0.)
                                && percentiles.at(0.) <= q1 + eps
                                && q1 <= q2 + eps
                                && q2 <= q3 + eps
                                && q3 <= percentiles.at(100.) + eps
                                && percentiles.at(100.) == sample.max(),
                        )
                    } else {
                        TestResult::discard()
                    }
                }
            }

            #[test]
            fn interpolates_between_order_statistics() {
                let data: [$ty; 12] = [10., 12., 12., 13., 12., 11., 14., 13., 15., 10., 10., 100.];
                let percentiles = Sample::new(&data).unwrap().percentiles();
                let (q1, median, q3) = percentiles.quartiles();

                assert!(relative_eq!(q1, 10.75));
                assert!(relative_eq!(median, 12.));
                assert!(relative_eq!(q3, 13.25));
                assert!(relative_eq!(percentiles.iqr(), 2.5));
            }

            #[test]
            fn even_length_median() {
                let data: [$ty; 4] = [4., 1., 3., 2.];
                let percentiles = Sample::new(&data).unwrap().percentiles();

                assert!(relative_eq!(percentiles.median(), 2.5));
                assert!(relative_eq!(percentiles.at(10.), 1.3, epsilon = 1e-5));
            }

            #[test]
            fn single_point() {
                let data: [$ty; 1] = [7.];
                let percentiles = Sample::new(&data).unwrap().percentiles();

                assert_eq!(percentiles.quartiles(), (7., 7., 7.));
                assert_eq!(percentiles.at(100.), 7.);
                assert_eq!(percentiles.iqr(), 0.);
            }

            #[test]
            fn extreme_values_do_not_overflow() {
                let max = $ty::MAX;
                let data: [$ty; 2] = [max, -max];
                let percentiles = Sample::new(&data).unwrap().percentiles();
                let (q1, median, q3) = percentiles.quartiles();

                assert!(relative_eq!(q1, -max / 2., max_relative = 1e-5));
                assert_eq!(median, 0.);
                assert!(relative_eq!(q3, max / 2., max_relative = 1e-5));
                assert!(q1 <= median && median <= q3);
            }

            #[test]
            #[should_panic]
            fn out_of_range() {
                let data: [$ty; 2] = [1., 2.];
                let percentiles = Sample::new(&data).unwrap().percentiles();

                percentiles.at(100.5);
            }
        }
    };
}

//! Classification of outliers
//!
//! WARNING: There's no formal/mathematical definition of what an outlier actually is. Therefore,
//! all outlier classifiers are *subjective*, however some classifiers that have become *de facto*
//! standard are provided here.
//!
//! Every classifier boils down to a pair of [`Bounds`]. A data point is an outlier when it lies
//! *strictly* outside them; a point sitting exactly on a bound is normal data.

pub mod sigma;
pub mod tukey;

use std::ops::Deref;
use std::slice;

use serde_derive::Serialize;

use crate::stats::float::Float;
use crate::stats::univariate::Sample;

use self::Label::*;

/// The closed interval `[lower, upper]` outside of which data points are outliers
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds<A>
where
    A: Float,
{
    pub lower: A,
    pub upper: A,
}

impl<A> Bounds<A>
where
    A: Float,
{
    /// Labels a single data point
    pub fn label(&self, x: A) -> Label {
        if x < self.lower {
            Low
        } else if x > self.upper {
            High
        } else {
            NotAnOutlier
        }
    }

    /// Checks if `x` falls outside the bounds
    pub fn is_outlier(&self, x: A) -> bool {
        self.label(x).is_outlier()
    }
}

/// A classified/labeled sample.
///
/// The labeled data can be accessed by iterating over it. The order of the data points is
/// retained.
#[derive(Clone, Copy)]
pub struct LabeledSample<'a, A>
where
    A: Float,
{
    bounds: Bounds<A>,
    sample: &'a Sample<A>,
}

impl<'a, A> LabeledSample<'a, A>
where
    A: Float,
{
    /// Returns the number of data points per label: `(low, normal, high)`
    ///
    /// - Time: `O(length)`
    pub fn count(&self) -> (usize, usize, usize) {
        let (mut low, mut normal, mut high) = (0, 0, 0);

        for (_, label) in self {
            match label {
                Low => low += 1,
                NotAnOutlier => normal += 1,
                High => high += 1,
            }
        }

        (low, normal, high)
    }

    /// Returns the bounds used to classify the outliers
    pub fn bounds(&self) -> Bounds<A> {
        self.bounds
    }

    /// Returns an iterator over the labeled data
    pub fn iter(&self) -> Iter<'a, A> {
        Iter {
            bounds: self.bounds,
            iter: self.sample.iter(),
        }
    }

    /// Splits the sample into outliers and normal data
    pub fn partition(&self) -> Classification<A> {
        partition(self.sample, self.bounds)
    }
}

impl<'a, A> Deref for LabeledSample<'a, A>
where
    A: Float,
{
    type Target = Sample<A>;

    fn deref(&self) -> &Sample<A> {
        self.sample
    }
}

impl<'a, A> IntoIterator for &LabeledSample<'a, A>
where
    A: Float,
{
    type Item = (A, Label);
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Iter<'a, A> {
        self.iter()
    }
}

/// Iterator over the labeled data
pub struct Iter<'a, A>
where
    A: Float,
{
    bounds: Bounds<A>,
    iter: slice::Iter<'a, A>,
}

impl<'a, A> Iterator for Iter<'a, A>
where
    A: Float,
{
    type Item = (A, Label);

    fn next(&mut self) -> Option<(A, Label)> {
        let bounds = self.bounds;

        self.iter.next().map(|&x| (x, bounds.label(x)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Labels used to classify outliers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// Below the lower bound
    Low,
    /// Above the upper bound
    High,
    /// A normal data point
    NotAnOutlier,
}

impl Label {
    /// Checks if the data point is labeled as an outlier
    pub fn is_outlier(&self) -> bool {
        !matches!(*self, NotAnOutlier)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Low => "low",
            High => "high",
            NotAnOutlier => "normal",
        }
    }
}

/// A sample split in two, each half in the original order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification<A> {
    pub outliers: Vec<A>,
    pub inliers: Vec<A>,
}

impl<A> Classification<A> {
    /// Returns `(outliers, inliers)`
    pub fn into_parts(self) -> (Vec<A>, Vec<A>) {
        (self.outliers, self.inliers)
    }

    pub fn len(&self) -> usize {
        self.outliers.len() + self.inliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Attaches `bounds` to `sample`
pub fn label<A>(sample: &Sample<A>, bounds: Bounds<A>) -> LabeledSample<'_, A>
where
    A: Float,
{
    LabeledSample { bounds, sample }
}

/// Splits any slice (including an empty one) according to `bounds`
///
/// - Time: `O(length)`
pub fn partition<A>(data: &[A], bounds: Bounds<A>) -> Classification<A>
where
    A: Float,
{
    let (outliers, inliers) = data.iter().copied().partition(|&x| bounds.is_outlier(x));

    Classification { outliers, inliers }
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use super::super::{label, partition, Bounds, Label};
            use crate::stats::univariate::Sample;

            quickcheck! {
                fn partition_loses_nothing(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;

                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let data = &v[start..];
                        let bounds = Bounds { lower: 0.25, upper: 0.75 };
                        let classification = partition(data, bounds);

                        let mut joined = classification.outliers.clone();
                        joined.extend_from_slice(&classification.inliers);
                        joined.sort_by(|a, b| a.partial_cmp(b).unwrap());
                        let mut expected = data.to_vec();
                        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());

                        TestResult::from_bool(joined == expected)
                    } else {
                        TestResult::discard()
                    }
                }
            }

            #[test]
            fn bounds_are_inclusive() {
                let bounds: Bounds<$ty> = Bounds { lower: 1., upper: 2. };

                assert_eq!(bounds.label(1.), Label::NotAnOutlier);
                assert_eq!(bounds.label(2.), Label::NotAnOutlier);
                assert_eq!(bounds.label(0.5), Label::Low);
                assert_eq!(bounds.label(2.5), Label::High);
            }

            #[test]
            fn keeps_order() {
                let data: [$ty; 6] = [5., -3., 1., 9., 2., -7.];
                let classification = partition(&data, Bounds { lower: 0., upper: 3. });

                assert_eq!(classification.outliers, vec![5., -3., 9., -7.]);
                assert_eq!(classification.inliers, vec![1., 2.]);
            }

            #[test]
            fn empty_input() {
                let data: [$ty; 0] = [];
                let classification = partition(&data, Bounds { lower: 0., upper: 1. });

                assert!(classification.is_empty());
            }

            #[test]
            fn counts() {
                let data: [$ty; 7] = [-10., -5., 0., 1., 2., 8., 9.];
                let sample = Sample::new(&data).unwrap();
                let labeled = label(sample, Bounds { lower: -1., upper: 5. });

                assert_eq!(labeled.count(), (2, 3, 2));
                assert_eq!(labeled.len(), 7);

                let labels: Vec<_> = labeled.iter().map(|(_, l)| l).collect();
                assert_eq!(labels[0], Label::Low);
                assert_eq!(labels[6], Label::High);
                assert_eq!(labeled.partition().len(), 7);
            }
        }
    };
}

#[cfg(test)]
mod test {
    test!(f32);
    test!(f64);
}

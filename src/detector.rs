use serde_derive::Serialize;

use crate::cli::Args;
use crate::error::DomainError;
use crate::stats::univariate::outliers::{self, sigma, tukey, Bounds};
use crate::stats::univariate::Sample;
use crate::{checked_bounds, compute_bounds, Method};

/// The outlier detector, configured with a method and a cut-off factor.
///
/// ```
/// use outlier_fences::{Method, OutlierDetector};
///
/// let detector = OutlierDetector::default().method(Method::StdDev);
/// assert_eq!(detector.get_cut_off(), 3.0);
///
/// let detector = detector.cut_off(1.5);
/// let analysis = detector.analyze(&[1., 2., 3., 4., 100.]).unwrap();
/// assert_eq!(analysis.high, 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutlierDetector {
    method: Method,
    cut_off: Option<f64>,
}

impl OutlierDetector {
    /// Changes the method used to compute the bounds
    ///
    /// Unless a cut-off factor was set explicitly, the method's conventional one is used.
    pub fn method(mut self, method: Method) -> OutlierDetector {
        self.method = method;
        self
    }

    /// Changes the cut-off factor
    ///
    /// # Panics
    ///
    /// Panics if `k` is negative, `NaN` or infinite
    pub fn cut_off(mut self, k: f64) -> OutlierDetector {
        assert!(k.is_finite() && k >= 0.0, "cut-off factor must be >= 0, got {}", k);

        self.cut_off = Some(k);
        self
    }

    pub fn get_method(&self) -> Method {
        self.method
    }

    pub fn get_cut_off(&self) -> f64 {
        self.cut_off
            .unwrap_or_else(|| self.method.default_cut_off())
    }

    /// Applies the overrides given on the command line
    pub fn configure_from_args(mut self, args: &Args) -> OutlierDetector {
        if let Some(method) = args.method {
            self = self.method(method);
        }
        if let Some(k) = args.cut_off {
            self = self.cut_off(k);
        }

        self
    }

    /// Computes the bounds for `data`
    pub fn bounds(&self, data: &[f64]) -> Result<Bounds<f64>, DomainError> {
        compute_bounds(data, self.method, self.get_cut_off())
    }

    /// Computes the bounds for `data` and summarizes the sample around them
    ///
    /// The sample is sorted once; the IQR bounds reuse the reported quartiles.
    pub fn analyze(&self, data: &[f64]) -> Result<Analysis, DomainError> {
        let k = self.get_cut_off();
        let sample = Sample::new(data)?;

        let mean = sample.mean();
        let (q25, median, q75) = sample.percentiles().quartiles();

        let bounds = match self.method {
            Method::StdDev => sigma::fences(sample, k)?,
            Method::Iqr => tukey::from_quartiles(q25, q75, k),
        };
        let bounds = checked_bounds(self.method, k, sample.len(), bounds)?;
        let (low, inliers, high) = outliers::label(sample, bounds).count();

        Ok(Analysis {
            method: self.method,
            cut_off: k,
            size: sample.len(),
            mean,
            std_dev: sample.std_dev(Some(mean)),
            min: sample.min(),
            max: sample.max(),
            q25,
            median,
            q75,
            bounds,
            low,
            high,
            inliers,
        })
    }
}

/// Everything one detector run found out about a sample
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    pub method: Method,
    pub cut_off: f64,
    pub size: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub bounds: Bounds<f64>,
    /// Points below `bounds.lower`
    pub low: usize,
    /// Points above `bounds.upper`
    pub high: usize,
    pub inliers: usize,
}

impl Analysis {
    pub fn outliers(&self) -> usize {
        self.low + self.high
    }

    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }
}

//! Float trait

use std::fmt;

use cast::From;
use num_traits::float;

/// This is an extension of `num_traits::float::Float` that adds safe
/// casting, Sync + Send, and the formatting needed to report values.
pub trait Float:
    float::Float
    + From<usize, Output = Self>
    + From<f32, Output = Self>
    + fmt::Debug
    + fmt::Display
    + Sync
    + Send
{
    /// Lossless view used when a value has to leave the generic code (errors, reports)
    fn as_f64(self) -> f64 {
        // NB `f32` and `f64` always convert
        self.to_f64().unwrap_or(::std::f64::NAN)
    }
}

impl Float for f32 {}
impl Float for f64 {}

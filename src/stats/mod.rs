//! Descriptive statistics and outlier classification
//!
//! Everything in here works on borrowed [`Sample`](univariate::Sample)s of `f32` or `f64` and never
//! allocates more than one sorted copy of the data.

#[cfg(test)]
pub(crate) mod test;

pub mod univariate;

mod float;

pub use self::float::Float;

fn sum<A>(xs: &[A]) -> A
where
    A: Float,
{
    use std::ops::Add;

    xs.iter().cloned().fold(A::cast(0), Add::add)
}

use rand::distributions::{Distribution, Standard};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Random vector of `size` elements, or `None` when fewer than 3 would remain after skipping the
/// first `start`
pub fn vec<T>(size: usize, start: usize) -> Option<Vec<T>>
where
    Standard: Distribution<T>,
{
    if size > start + 2 {
        let mut rng = StdRng::from_entropy();

        Some((0..size).map(|_| rng.gen()).collect())
    } else {
        None
    }
}

/// Like `vec` but scaled to `[-scale, scale)` and reproducible from `seed`
pub fn scaled_vec(size: usize, seed: u64, scale: f64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..size)
        .map(|_| (rng.gen::<f64>() * 2. - 1.) * scale)
        .collect()
}

//! Sampling-function adapters over a caller-owned random generator.
//!
//! The noise entry points take any `FnMut(nominal, spread) -> value`; these
//! adapters build the two shapes the rolling-horizon workflow actually uses
//! from the `rand` ecosystem. Both borrow the caller's generator, so a fixed
//! seed and call order reproduce the same noise sequence exactly.

use rand::Rng;
use rand_distr::StandardNormal;

/// Gaussian sampler: `(mean, std_dev) -> mean + std_dev * N(0, 1)`.
///
/// A zero or negative `std_dev` degenerates gracefully (zero collapses to
/// the mean); no draw can fail.
pub fn gaussian<R: Rng>(rng: &mut R) -> impl FnMut(f64, f64) -> f64 + '_ {
    move |mean, std_dev| {
        let z: f64 = rng.sample(StandardNormal);
        mean + std_dev * z
    }
}

/// Uniform-radius sampler: `(mean, radius) -> U(mean - radius, mean + radius)`.
pub fn uniform_radius<R: Rng>(rng: &mut R) -> impl FnMut(f64, f64) -> f64 + '_ {
    move |mean, radius| rng.gen_range(mean - radius..=mean + radius)
}

//! Standard normal helpers and truncated normal sampling
//!
//! Built on the complementary error function from `statrs` so tail
//! probabilities keep their precision far from the mean.

use rand::Rng;
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::SQRT_2;

/// Standard normal cumulative distribution function Φ(z)
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Standard normal upper tail probability 1 - Φ(z)
pub fn standard_normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

/// Standard normal quantile Φ⁻¹(p)
///
/// Returns `-inf` at 0, `+inf` at 1 and `NaN` outside `[0, 1]`
pub fn standard_normal_quantile(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Draw from a normal distribution restricted to `[low, high]`
///
/// Uses inverse-CDF sampling over `[Φ(a), Φ(b)]`. The problem is mirrored so the
/// mean sits at or below the interval midpoint. When the whole interval lies above
/// the mean the draw is inverted in survival space over `[Q(b), Q(a)]` instead,
/// so intervals deep in the tail keep their exponential shape near the bound.
/// Only an interval with no representable mass collapses onto the nearest bound.
pub fn sample_truncated_normal<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f64,
    std_dev: f64,
    low: f64,
    high: f64,
) -> f64 {
    let mirrored = mean > 0.5 * (low + high);
    let centre = if mirrored { low + high - mean } else { mean };

    let a = (low - centre) / std_dev;
    let b = (high - centre) / std_dev;

    let z = if a > 0.0 {
        let upper_tail = standard_normal_sf(a);
        let lower_tail = standard_normal_sf(b);
        (upper_tail > lower_tail)
            .then(|| -standard_normal_quantile(rng.random_range(lower_tail..upper_tail)))
    } else {
        let lower_mass = standard_normal_cdf(a);
        let upper_mass = standard_normal_cdf(b);
        (upper_mass > lower_mass)
            .then(|| standard_normal_quantile(rng.random_range(lower_mass..upper_mass)))
    };

    let draw = match z.map(|z| std_dev.mul_add(z, centre)) {
        Some(value) if !value.is_nan() => value.clamp(low, high),
        _ => centre.clamp(low, high),
    };

    if mirrored { low + high - draw } else { draw }
}

//! Shapiro-Wilk normality test
//!
//! Royston's approximation (Applied Statistics algorithm AS R94): the Shapiro-Wilk
//! coefficients come from a polynomial correction of the expected normal order
//! statistics, and the statistic W is mapped onto a standard normal deviate
//! whose upper tail gives the p-value. Valid for 3 to 5000 observations.

use crate::io::configuration::{SHAPIRO_WILK_MIN_SAMPLES, SHAPIRO_WILK_RELIABLE_SAMPLES};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::math::probability::{standard_normal_quantile, standard_normal_sf};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_3, PI};
use tracing::debug;

// Polynomial approximations of the two largest coefficients
const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_190, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];

// Normalising transform of W for 4 <= n <= 11
const C3: [f64; 4] = [0.5440, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const G: [f64; 2] = [-2.273, 0.459];

// Normalising transform of W for n >= 12
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];

// Exact null distribution of W for n = 3
const PI6: f64 = 6.0 / PI;
const STQR: f64 = FRAC_PI_3;

/// Ranges below this are treated as a constant sample
const SMALL_RANGE: f64 = 1e-19;
/// P-value reported when W lies beyond the transform's support
const SMALLEST_P_VALUE: f64 = 1e-99;

/// Result of a Shapiro-Wilk test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    /// The W statistic in `[0, 1]`; values near 1 indicate normality
    pub statistic: f64,
    /// Probability of a W at least this small under normality
    pub p_value: f64,
}

impl ShapiroWilk {
    /// Outcome reported for samples that carry no evidence against normality
    pub const NO_EVIDENCE: Self = Self {
        statistic: 1.0,
        p_value: 1.0,
    };
}

/// Evaluate `c[0] + c[1] x + c[2] x² + ...`
fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc.mul_add(x, c))
}

/// Lower-half Shapiro-Wilk coefficients `a_1 >= a_2 >= ... >= a_{n/2}`
fn coefficients(n: usize) -> Vec<f64> {
    if n == 3 {
        return vec![FRAC_1_SQRT_2];
    }

    let half = n / 2;
    let an25 = n as f64 + 0.25;
    let expected: Vec<f64> = (1..=half)
        .map(|i| standard_normal_quantile((i as f64 - 0.375) / an25))
        .collect();

    let summ2 = 2.0 * expected.iter().map(|m| m * m).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let m0 = expected.first().copied().unwrap_or(0.0);
    let a1 = polynomial(&C1, rsn) - m0 / ssumm2;

    let mut weights = Vec::with_capacity(half);
    weights.push(a1);

    if n > 5 {
        let m1 = expected.get(1).copied().unwrap_or(0.0);
        let a2 = polynomial(&C2, rsn) - m1 / ssumm2;
        let numerator = (-2.0 * m1).mul_add(m1, (-2.0 * m0).mul_add(m0, summ2));
        let denominator = (-2.0 * a2).mul_add(a2, (-2.0 * a1).mul_add(a1, 1.0));
        let fac = (numerator / denominator).sqrt();
        weights.push(a2);
        weights.extend(expected.iter().skip(2).map(|m| -m / fac));
    } else {
        let fac = ((-2.0 * m0).mul_add(m0, summ2) / (-2.0 * a1).mul_add(a1, 1.0)).sqrt();
        weights.extend(expected.iter().skip(1).map(|m| -m / fac));
    }

    weights
}

/// Antisymmetric coefficient paired with the `index`-th smallest observation
fn order_weight(half_weights: &[f64], n: usize, index: usize) -> f64 {
    let half = half_weights.len();
    if index < half {
        -half_weights.get(index).copied().unwrap_or(0.0)
    } else if index >= n - half {
        half_weights.get(n - 1 - index).copied().unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Map W onto its p-value
fn p_value(statistic: f64, n: usize) -> f64 {
    if n == 3 {
        return (PI6 * (statistic.sqrt().asin() - STQR)).clamp(0.0, 1.0);
    }
    if statistic >= 1.0 {
        return 1.0;
    }

    let w1 = (1.0 - statistic).ln();
    let size = n as f64;

    let (deviate, mean, spread) = if n <= 11 {
        let gamma = polynomial(&G, size);
        if w1 >= gamma {
            return SMALLEST_P_VALUE;
        }
        (
            -(gamma - w1).ln(),
            polynomial(&C3, size),
            polynomial(&C4, size).exp(),
        )
    } else {
        let log_size = size.ln();
        (
            w1,
            polynomial(&C5, log_size),
            polynomial(&C6, log_size).exp(),
        )
    };

    standard_normal_sf((deviate - mean) / spread)
}

/// Run the Shapiro-Wilk test on `data`
///
/// Constant samples have no spread to test and report `W = 1, p = 1`.
///
/// # Errors
///
/// Returns an error if:
/// - Fewer than 3 observations are supplied
/// - Any observation is not finite
/// - The computed statistic or p-value is not finite
pub fn shapiro_wilk(data: &[f64]) -> Result<ShapiroWilk> {
    let n = data.len();
    if n < SHAPIRO_WILK_MIN_SAMPLES {
        return Err(invalid_parameter(
            "sample size",
            &n,
            &format!("Shapiro-Wilk needs at least {SHAPIRO_WILK_MIN_SAMPLES} observations"),
        ));
    }
    if data.iter().any(|value| !value.is_finite()) {
        return Err(computation_error(
            "shapiro_wilk",
            &"sample contains non-finite values",
        ));
    }
    if n > SHAPIRO_WILK_RELIABLE_SAMPLES {
        debug!("Shapiro-Wilk p-value may be inaccurate for {n} observations");
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let first = sorted.first().copied().unwrap_or(0.0);
    let last = sorted.last().copied().unwrap_or(0.0);
    let range = last - first;
    if range < SMALL_RANGE {
        return Ok(ShapiroWilk::NO_EVIDENCE);
    }

    let half_weights = coefficients(n);

    // W is the squared correlation between the order statistics and the coefficients.
    // Scaling by the range keeps the sums well conditioned.
    let size = n as f64;
    let weight_mean = (0..n)
        .map(|i| order_weight(&half_weights, n, i))
        .sum::<f64>()
        / size;
    let value_mean = sorted.iter().map(|x| x / range).sum::<f64>() / size;

    let mut ssa = 0.0;
    let mut ssx = 0.0;
    let mut sax = 0.0;
    for (i, x) in sorted.iter().enumerate() {
        let centred_weight = order_weight(&half_weights, n, i) - weight_mean;
        let centred_value = x / range - value_mean;
        ssa = centred_weight.mul_add(centred_weight, ssa);
        ssx = centred_value.mul_add(centred_value, ssx);
        sax = centred_weight.mul_add(centred_value, sax);
    }

    let statistic = ((sax * sax) / (ssa * ssx)).clamp(0.0, 1.0);
    let p = p_value(statistic, n);

    if !statistic.is_finite() || !p.is_finite() {
        return Err(computation_error(
            "shapiro_wilk",
            &format!("non-finite result (W = {statistic}, p = {p})"),
        ));
    }

    Ok(ShapiroWilk {
        statistic,
        p_value: p.clamp(0.0, 1.0),
    })
}

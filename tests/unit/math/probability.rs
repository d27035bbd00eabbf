//! Tests for standard normal helpers and truncated normal sampling

#[cfg(test)]
mod tests {
    use pixelstat::math::probability::{
        sample_truncated_normal, standard_normal_cdf, standard_normal_quantile,
        standard_normal_sf,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Tests well-known values of the normal CDF and its tail
    // Verified by dropping the 1/sqrt(2) scaling
    #[test]
    fn test_cdf_and_survival_values() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((standard_normal_cdf(1.959_964) - 0.975).abs() < 1e-6);
        assert!((standard_normal_sf(1.959_964) - 0.025).abs() < 1e-6);
        assert!(standard_normal_sf(10.0) > 0.0);
        assert!(standard_normal_sf(10.0) < 1e-22);
    }

    // Tests that the quantile inverts the CDF and handles its domain
    // Verified by negating the quantile
    #[test]
    fn test_quantile_inverts_cdf() {
        for &p in &[0.001, 0.1, 0.375, 0.5, 0.9, 0.999] {
            let z = standard_normal_quantile(p);
            assert!((standard_normal_cdf(z) - p).abs() < 1e-9, "p = {p}");
        }
        assert!(standard_normal_quantile(-0.1).is_nan());
        assert!(standard_normal_quantile(1.1).is_nan());
        assert!(standard_normal_quantile(0.0).is_infinite());
    }

    // Tests that draws never leave the truncation interval
    // Verified by removing the final clamp
    #[test]
    fn test_truncated_draws_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(mean, std_dev) in &[(300.0, 50.0), (-40.0, 30.0), (128.0, 500.0), (5.0, 0.5)] {
            for _ in 0..500 {
                let value = sample_truncated_normal(&mut rng, mean, std_dev, 0.0, 255.0);
                assert!(
                    (0.0..=255.0).contains(&value),
                    "mean {mean}, sd {std_dev} drew {value}"
                );
            }
        }
    }

    // Tests that a mean far outside the interval collapses onto the nearest bound
    // Verified by clamping to the opposite bound
    #[test]
    fn test_mass_free_interval_collapses_to_nearest_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!((sample_truncated_normal(&mut rng, 1000.0, 1.0, 0.0, 255.0) - 255.0).abs() < 1e-9);
        assert!(sample_truncated_normal(&mut rng, -1000.0, 1.0, 0.0, 255.0).abs() < 1e-9);
    }

    // Tests that an untruncated region keeps the normal location and spread
    // Verified by sampling uniformly over the mass interval
    #[test]
    fn test_interior_mean_is_preserved() {
        let mut rng = StdRng::seed_from_u64(99);
        let draws: Vec<f64> = (0..4000)
            .map(|_| sample_truncated_normal(&mut rng, 100.0, 10.0, 0.0, 255.0))
            .collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let variance =
            draws.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / draws.len() as f64;

        assert!((mean - 100.0).abs() < 1.0, "mean {mean}");
        assert!((variance.sqrt() - 10.0).abs() < 1.0, "sd {}", variance.sqrt());
    }

    // Tests that an interval deep in the upper tail keeps an exponential fall-off
    // Verified by collapsing every mass-starved draw onto the bound
    #[test]
    fn test_far_tail_draws_spread_below_bound() {
        let mut rng = StdRng::seed_from_u64(5);
        let draws: Vec<f64> = (0..2000)
            .map(|_| sample_truncated_normal(&mut rng, 1000.0, 50.0, 0.0, 255.0))
            .collect();

        assert!(draws.iter().all(|v| (0.0..=255.0).contains(v)));
        assert!(draws.iter().any(|&v| v < 254.0));

        // Distance below the bound is close to exponential with scale sd^2 / 745
        let gap = draws.iter().map(|v| 255.0 - v).sum::<f64>() / draws.len() as f64;
        assert!((2.8..=4.0).contains(&gap), "mean gap {gap}");
    }
}

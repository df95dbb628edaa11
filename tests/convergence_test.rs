// tests/convergence_test.rs
use gbm_pricer::analysis::{run_convergence_study, DistributionSummary, Histogram};
use gbm_pricer::{price_analytical, price_simulation, OptionContract};

fn atm() -> OptionContract {
    OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.2).expect("Valid contract")
}

#[test]
fn test_error_shrinks_from_100_to_5_million() {
    let c = atm();
    let analytic = price_analytical(&c).unwrap();

    // Across several seeds the large run must always win; a single seed
    // could in principle get lucky at N=100.
    let mut wins = 0;
    for seed in [42u64, 7, 1234] {
        let small = price_simulation(&c, 100, Some(seed)).unwrap();
        let large = price_simulation(&c, 5_000_000, Some(seed)).unwrap();
        let small_err = (small.price_estimate - analytic).abs();
        let large_err = (large.price_estimate - analytic).abs();
        println!(
            "seed {}: error N=100 {:.6}, N=5e6 {:.6}",
            seed, small_err, large_err
        );
        if large_err < small_err {
            wins += 1;
        }
        assert!(large_err < 0.03, "N=5e6 error too large: {}", large_err);
    }
    assert!(wins >= 2, "large N beat small N on only {} of 3 seeds", wins);
}

#[test]
fn test_standard_error_scales_like_inverse_sqrt_n() {
    let c = atm();
    let small = price_simulation(&c, 10_000, Some(5)).unwrap();
    let large = price_simulation(&c, 1_000_000, Some(5)).unwrap();
    let ratio = small.standard_error / large.standard_error;
    println!("stderr ratio: {}", ratio);
    assert!((8.0..12.0).contains(&ratio), "ratio {} not near 10", ratio);
}

#[test]
fn test_convergence_study_table() {
    let sizes = [100, 10_000, 1_000_000];
    let study = run_convergence_study(&atm(), &sizes, Some(42)).unwrap();

    assert_eq!(study.points.len(), sizes.len());
    assert!((study.analytical_price - 10.4506).abs() < 1e-3);
    assert!(study.final_error().unwrap() < 0.1);
    for p in &study.points {
        assert!(p.mc_price >= 0.0);
        assert!(p.standard_error > 0.0);
    }
}

#[test]
fn test_terminal_distribution_is_lognormal() {
    let c = atm();
    let result = price_simulation(&c, 1_000_000, Some(42)).unwrap();
    let summary = DistributionSummary::from_samples(&result.terminal_prices, &c).unwrap();

    // E[S_T] = S0 e^(rT), sd = E[S_T] * sqrt(e^(σ²T) - 1)
    let expected_sd = summary.theoretical_mean * (0.04f64.exp() - 1.0).sqrt();
    assert!((summary.mean - summary.theoretical_mean).abs() < 0.1);
    assert!((summary.std_dev - expected_sd).abs() < 0.2);
    // P(S_T > K) = Φ(d₂) = Φ(0.15)
    assert!((summary.fraction_in_the_money - 0.559_618).abs() < 0.003);
    assert!(summary.min > 0.0);

    let histogram = Histogram::from_samples(&result.terminal_prices, 100).unwrap();
    assert_eq!(histogram.counts.iter().sum::<u64>(), 1_000_000);
    // right skew: the modal bin sits below the mean
    let (mode_bin, _) = histogram
        .counts
        .iter()
        .enumerate()
        .max_by_key(|(_, &count)| count)
        .unwrap();
    assert!(histogram.bin_centers()[mode_bin] < summary.mean);
}

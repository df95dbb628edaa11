// tests/integration_test.rs
use approx::assert_abs_diff_eq;
use gbm_pricer::mc::mc_engine::simulate;
use gbm_pricer::{price_analytical, price_simulation, OptionContract, PricingError, RandomStream};

fn contract(s0: f64, k: f64) -> OptionContract {
    OptionContract::new(s0, k, 1.0, 0.05, 0.2).expect("Valid contract")
}

#[test]
fn test_bs_reference_price() {
    let price = price_analytical(&contract(100.0, 100.0)).expect("Finite price");
    println!("\nAnalytic Price: {}", price);
    assert_abs_diff_eq!(price, 10.4506, epsilon = 1e-3);
}

#[test]
fn test_bs_monotone_in_spot_and_strike() {
    let grid = [60.0, 80.0, 95.0, 100.0, 105.0, 120.0, 150.0];

    let by_spot: Vec<f64> = grid
        .iter()
        .map(|&s0| price_analytical(&contract(s0, 100.0)).unwrap())
        .collect();
    assert!(
        by_spot.windows(2).all(|w| w[0] < w[1]),
        "price not increasing in S0: {:?}",
        by_spot
    );

    let by_strike: Vec<f64> = grid
        .iter()
        .map(|&k| price_analytical(&contract(100.0, k)).unwrap())
        .collect();
    assert!(
        by_strike.windows(2).all(|w| w[0] > w[1]),
        "price not decreasing in K: {:?}",
        by_strike
    );
}

#[test]
fn test_mc_vs_analytic() {
    let c = contract(100.0, 100.0);
    let result = price_simulation(&c, 1_000_000, Some(42)).expect("Valid configuration");
    let analytic_price = price_analytical(&c).unwrap();

    let abs_error = (result.price_estimate - analytic_price).abs();
    let rel_error = abs_error / analytic_price;

    println!("\nMC Price: {}", result.price_estimate);
    println!("Analytic Price: {}", analytic_price);
    println!("Standard Error: {}", result.standard_error);
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
    assert!(
        abs_error < 5.0 * result.standard_error,
        "Error {} outside 5 standard errors ({})",
        abs_error,
        result.standard_error
    );
}

#[test]
fn test_same_seed_same_terminal_prices() {
    let c = contract(100.0, 100.0);
    let a = price_simulation(&c, 200_000, Some(2024)).unwrap();
    let b = price_simulation(&c, 200_000, Some(2024)).unwrap();
    assert_eq!(a.terminal_prices, b.terminal_prices);
    assert_eq!(a.price_estimate.to_bits(), b.price_estimate.to_bits());

    let stream = RandomStream::from_seed(2024);
    let c2 = simulate(&c, 200_000, &stream).unwrap();
    assert_eq!(a.terminal_prices, c2.terminal_prices);
}

#[test]
fn test_different_seeds_differ() {
    let c = contract(100.0, 100.0);
    let a = price_simulation(&c, 1_000, Some(1)).unwrap();
    let b = price_simulation(&c, 1_000, Some(2)).unwrap();
    assert_ne!(a.terminal_prices, b.terminal_prices);
}

#[test]
fn test_unseeded_runs_are_valid() {
    let c = contract(100.0, 100.0);
    let result = price_simulation(&c, 10_000, None).unwrap();
    assert_eq!(result.terminal_prices.len(), 10_000);
    assert!(result.price_estimate > 0.0);
}

#[test]
fn test_non_negativity() {
    for &(s0, k) in &[(100.0, 100.0), (50.0, 200.0), (200.0, 50.0)] {
        let result = price_simulation(&contract(s0, k), 100_000, Some(9)).unwrap();
        assert!(result.terminal_prices.iter().all(|&s| s > 0.0));
        assert!(result.price_estimate >= 0.0);
    }
}

#[test]
fn test_far_out_of_the_money_prices_zero() {
    let result = price_simulation(&contract(1.0, 1_000.0), 10_000, Some(3)).unwrap();
    assert_eq!(result.price_estimate, 0.0);
    assert_eq!(result.standard_error, 0.0);
}

#[test]
fn test_invalid_sample_count() {
    let c = contract(100.0, 100.0);
    for n in [0, -5] {
        match price_simulation(&c, n, Some(42)) {
            Err(PricingError::InvalidSampleCount { requested, .. }) => assert_eq!(requested, n),
            other => panic!("expected InvalidSampleCount for {}, got {:?}", n, other),
        }
    }
}

#[test]
fn test_invalid_contract() {
    let cases = [
        (100.0, 0.0, 1.0, 0.05, 0.2, "k"),
        (-1.0, 100.0, 1.0, 0.05, 0.2, "s0"),
        (100.0, 100.0, 1.0, 0.05, 0.0, "sigma"),
        (100.0, 100.0, 0.0, 0.05, 0.2, "t"),
    ];
    for (s0, k, t, r, sigma, field) in cases {
        match OptionContract::new(s0, k, t, r, sigma) {
            Err(PricingError::InvalidContract { parameter, .. }) => assert_eq!(parameter, field),
            other => panic!("expected InvalidContract on {}, got {:?}", field, other),
        }
    }
}

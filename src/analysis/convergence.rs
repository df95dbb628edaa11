// src/analysis/convergence.rs
//! Convergence of the Monte Carlo estimator to the Black-Scholes price
//!
//! Every sample size is run with the same seed so that the table isolates
//! the effect of N.

use crate::analytics::price_analytical;
use crate::contract::OptionContract;
use crate::error::{validation::validate_sample_count, PricingError, PricingResult};
use crate::math_utils::Timer;
use crate::mc::mc_engine::simulate;
use crate::rng::RandomStream;
use tracing::info;

/// Sample sizes used by the command-line driver when none are given
pub const DEFAULT_SAMPLE_SIZES: [i64; 8] = [
    100, 1_000, 10_000, 50_000, 100_000, 500_000, 1_000_000, 5_000_000,
];

#[derive(Debug, Clone, PartialEq)]
pub struct ConvergencePoint {
    pub sample_count: i64,
    pub mc_price: f64,
    pub abs_error: f64,
    pub standard_error: f64,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone)]
pub struct ConvergenceStudy {
    pub contract: OptionContract,
    pub analytical_price: f64,
    pub base_seed: u64,
    pub points: Vec<ConvergencePoint>,
}

impl ConvergenceStudy {
    pub fn final_error(&self) -> Option<f64> {
        self.points.last().map(|p| p.abs_error)
    }

    /// Largest sample size ends closer to the benchmark than the smallest
    pub fn is_error_shrinking(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => last.abs_error < first.abs_error,
            _ => false,
        }
    }
}

/// Price `contract` analytically, then by simulation at each of `sizes`
///
/// All sizes are validated before any simulation runs. With `seed = None`
/// a single entropy seed is drawn and shared by every size.
pub fn run_convergence_study(
    contract: &OptionContract,
    sizes: &[i64],
    seed: Option<u64>,
) -> PricingResult<ConvergenceStudy> {
    if sizes.is_empty() {
        return Err(PricingError::InvalidConfiguration {
            field: "sizes".to_string(),
            reason: "at least one sample size is required".to_string(),
        });
    }
    for &n in sizes {
        validate_sample_count(n)?;
    }

    let analytical_price = price_analytical(contract)?;
    let stream = RandomStream::new(seed);
    let mut points = Vec::with_capacity(sizes.len());

    for &n in sizes {
        let timer = Timer::start();
        let result = simulate(contract, n, &stream)?;
        let elapsed_ms = timer.elapsed_ms();

        let point = ConvergencePoint {
            sample_count: n,
            mc_price: result.price_estimate,
            abs_error: (result.price_estimate - analytical_price).abs(),
            standard_error: result.standard_error,
            elapsed_ms,
        };
        info!(
            n,
            mc_price = point.mc_price,
            abs_error = point.abs_error,
            elapsed_ms,
            "convergence point"
        );
        points.push(point);
    }

    Ok(ConvergenceStudy {
        contract: *contract,
        analytical_price,
        base_seed: stream.base_seed(),
        points,
    })
}

// src/mc/mc_engine.rs
use crate::contract::OptionContract;
use crate::error::{validation::validate_sample_count, PricingError, PricingResult};
use crate::mc::payoffs;
use crate::models::gbm::Gbm;
use crate::rng::{RandomStream, CHUNK_SIZE};
use rayon::prelude::*;
use tracing::debug;

/// Output of one Monte Carlo pricing run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Discounted mean payoff
    pub price_estimate: f64,
    /// Discounted sample standard deviation of the payoff over √N
    pub standard_error: f64,
    /// One simulated S_T per sample, in sample order
    pub terminal_prices: Vec<f64>,
}

impl SimulationResult {
    pub fn sample_count(&self) -> usize {
        self.terminal_prices.len()
    }

    /// Normal-approximation confidence interval `price ± z * stderr`
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let half_width = z * self.standard_error;
        (
            self.price_estimate - half_width,
            self.price_estimate + half_width,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ChunkMoments {
    sum: f64,
    degenerate: usize,
}

/// Monte Carlo price of a European call under Geometric Brownian Motion
///
/// # Math Framework
///
/// Samples the exact solution of
/// ```text
/// dS_t = r S_t dt + σ S_t dW_t
/// ```
/// at maturity in a single step:
/// ```text
/// S_T = S_0 * exp((r - σ²/2)T + σ√T * Z)
/// ```
/// where Z ~ N(0,1). There is no time discretisation, hence no bias:
/// the only error is statistical and shrinks like 1/√N.
///
/// # Parameters
/// - `contract`: validated contract
/// - `sample_count`: number of terminal prices N (must be > 0)
/// - `seed`: fixes the draws when given; otherwise OS entropy is used
///
/// # Errors
///
/// - `InvalidSampleCount` for N ≤ 0 or N above the engine maximum
/// - `NumericalInstability` if a terminal price under/overflows or the
///   estimate is not finite
pub fn price_simulation(
    contract: &OptionContract,
    sample_count: i64,
    seed: Option<u64>,
) -> PricingResult<SimulationResult> {
    let n = validate_sample_count(sample_count)?;
    run(contract, n, &RandomStream::new(seed))
}

/// Same as [`price_simulation`] with a caller-built [`RandomStream`]
pub fn simulate(
    contract: &OptionContract,
    sample_count: i64,
    stream: &RandomStream,
) -> PricingResult<SimulationResult> {
    let n = validate_sample_count(sample_count)?;
    run(contract, n, stream)
}

fn run(
    contract: &OptionContract,
    n: usize,
    stream: &RandomStream,
) -> PricingResult<SimulationResult> {
    let gbm = Gbm::from_contract(contract);
    let k = contract.strike();

    debug!(
        samples = n,
        chunks = (n + CHUNK_SIZE - 1) / CHUNK_SIZE,
        base_seed = stream.base_seed(),
        deterministic = stream.is_deterministic(),
        "starting GBM terminal-price simulation"
    );

    // Draw → transform → payoff per chunk. Chunk c always uses generator c,
    // and the collected partial sums keep chunk order.
    let mut terminal_prices = vec![0.0; n];
    let partials: Vec<ChunkMoments> = terminal_prices
        .par_chunks_mut(CHUNK_SIZE)
        .enumerate()
        .map(|(chunk, block)| {
            stream.fill_standard_normal(chunk as u64, block);
            gbm.transform_in_place(block);
            let sum = payoffs::european_call_sum(block, k);
            let degenerate = block
                .iter()
                .filter(|s_t| !(s_t.is_finite() && **s_t > 0.0))
                .count();
            ChunkMoments { sum, degenerate }
        })
        .collect();

    let totals = partials
        .iter()
        .fold(ChunkMoments::default(), |acc, c| ChunkMoments {
            sum: acc.sum + c.sum,
            degenerate: acc.degenerate + c.degenerate,
        });

    if totals.degenerate > 0 {
        return Err(PricingError::NumericalInstability {
            method: "GBM terminal sampling".to_string(),
            reason: format!(
                "{} of {} terminal prices under/overflowed (σ√T = {})",
                totals.degenerate,
                n,
                contract.volatility() * contract.maturity().sqrt()
            ),
        });
    }

    let n_f = n as f64;
    let discount = contract.discount_factor();
    let mean_payoff = totals.sum / n_f;
    let price_estimate = discount * mean_payoff;

    // Second pass over the stored prices: deviations are centred on the
    // mean, so large payoffs with a small spread keep their precision.
    let standard_error = if n > 1 {
        let partial_sq_dev: Vec<f64> = terminal_prices
            .par_chunks(CHUNK_SIZE)
            .map(|block| payoffs::european_call_sq_dev(block, k, mean_payoff))
            .collect();
        let sq_dev: f64 = partial_sq_dev.iter().sum();
        let variance = sq_dev / (n_f - 1.0);
        discount * (variance / n_f).sqrt()
    } else {
        0.0
    };

    if !price_estimate.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Price estimate is not finite: {}", price_estimate),
        });
    }

    if !standard_error.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Standard error is not finite: {}", standard_error),
        });
    }

    debug!(price_estimate, standard_error, "simulation finished");

    Ok(SimulationResult {
        price_estimate,
        standard_error,
        terminal_prices,
    })
}

//! Option Payoff Functions
//!
//! European call: max(S_T - K, 0), the right to buy at strike K.
//! Only the terminal price enters the payoff, so the engine never stores
//! intermediate path points.

/// European call payoff for one terminal price
#[inline]
pub fn european_call(s_t: f64, k: f64) -> f64 {
    (s_t - k).max(0.0)
}

/// Sum of call payoffs over a block of terminal prices
///
/// Kept per block so the engine can combine partial sums in a fixed order.
pub fn european_call_sum(terminal_prices: &[f64], k: f64) -> f64 {
    terminal_prices.iter().map(|&s_t| european_call(s_t, k)).sum()
}

/// Sum of squared deviations of call payoffs from `mean` over a block
pub fn european_call_sq_dev(terminal_prices: &[f64], k: f64, mean: f64) -> f64 {
    terminal_prices
        .iter()
        .map(|&s_t| {
            let d = european_call(s_t, k) - mean;
            d * d
        })
        .sum()
}

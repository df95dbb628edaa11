// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes price for European calls
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For a European call this has a closed-form solution involving
//! the cumulative normal distribution function Φ(x).

use crate::contract::OptionContract;
use crate::error::{PricingError, PricingResult};
use crate::math_utils::norm_cdf;
use tracing::debug;

/// The `d₁`, `d₂` terms of the Black-Scholes formula
///
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// Evaluated as `x ± σ√T/2` with `x = [ln(S/K) + rT] / (σ√T)`, so σ² is
/// never formed and very large volatilities do not overflow to NaN.
pub fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let x = ((s / k).ln() + r * t) / vol_sqrt_t;
    let half_vol = 0.5 * vol_sqrt_t;
    (x + half_vol, x - half_vol)
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// ```
///
/// # Parameters
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `r`: Risk-free rate
/// - `sigma`: Volatility
/// - `t`: Time to expiration
///
/// Inputs are not validated; `t = 0` or `sigma = 0` yield NaN.
/// Use [`price_analytical`] with a validated contract instead.
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Closed-form price of a validated contract
///
/// # Errors
/// `NumericalInstability` if the result is not finite (only reachable
/// with extreme magnitudes, e.g. `S0` near `f64::MAX`).
pub fn price_analytical(contract: &OptionContract) -> PricingResult<f64> {
    let price = bs_call_price(
        contract.initial_price(),
        contract.strike(),
        contract.risk_free_rate(),
        contract.volatility(),
        contract.maturity(),
    );

    if !price.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: "Black-Scholes".to_string(),
            reason: format!("Price is not finite: {}", price),
        });
    }

    // Φ(d₁) and Φ(d₂) cancel for deep OTM calls; the exact value is >= 0
    let price = price.max(0.0);
    debug!(price, "analytical price");
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn contract(s0: f64, k: f64) -> OptionContract {
        OptionContract::new(s0, k, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_reference_price() {
        let price = price_analytical(&contract(100.0, 100.0)).unwrap();
        assert_abs_diff_eq!(price, 10.450_583_572_185_565, epsilon = 1e-6);
    }

    #[test]
    fn test_d1_d2_atm() {
        let (d1, d2) = d1_d2(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_abs_diff_eq!(d1, 0.35, epsilon = 1e-12);
        assert_abs_diff_eq!(d2, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_huge_volatility_tends_to_spot() {
        // As σ → ∞, Φ(d₁) → 1 and Φ(d₂) → 0, so C → S
        let c = OptionContract::new(100.0, 100.0, 1.0, 0.05, 1e155).unwrap();
        let price = price_analytical(&c).unwrap();
        assert_abs_diff_eq!(price, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_put_call_parity_bounds() {
        // max(S - K e^(-rT), 0) <= C <= S
        for &(s0, k) in &[(50.0, 100.0), (100.0, 100.0), (150.0, 100.0)] {
            let c = contract(s0, k);
            let price = price_analytical(&c).unwrap();
            let lower = (s0 - k * c.discount_factor()).max(0.0);
            assert!(price >= lower - 1e-10, "{} < lower bound {}", price, lower);
            assert!(price <= s0);
        }
    }

    #[test]
    fn test_deep_out_of_the_money_is_non_negative() {
        let price = price_analytical(&contract(1.0, 1_000.0)).unwrap();
        assert!(price >= 0.0);
        assert!(price < 1e-12);
    }
}

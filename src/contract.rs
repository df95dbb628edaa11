// src/contract.rs
//! European call contract parameters
//!
//! An [`OptionContract`] is validated once, at construction, and is
//! immutable afterwards. Both pricers take it by reference and never
//! re-check domain constraints on their own.

use crate::error::{validation::*, PricingResult};

/// Immutable European call contract under the Black-Scholes model
///
/// # Invariants
/// - `s0`, `k`, `t`, `sigma` are finite and strictly positive
/// - `r` is finite (negative rates are allowed)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionContract {
    s0: f64,
    k: f64,
    t: f64,
    r: f64,
    sigma: f64,
}

impl OptionContract {
    /// Build a contract, rejecting degenerate or non-finite inputs
    ///
    /// # Parameters
    /// - `s0`: Initial asset price
    /// - `k`: Strike price
    /// - `t`: Time to maturity in years
    /// - `r`: Continuously compounded risk-free rate
    /// - `sigma`: Volatility
    ///
    /// # Errors
    /// `PricingError::InvalidContract` naming the first offending field.
    /// `t = 0` and `sigma = 0` are rejected rather than priced at the
    /// intrinsic-value limit.
    pub fn new(s0: f64, k: f64, t: f64, r: f64, sigma: f64) -> PricingResult<Self> {
        validate_positive("s0", s0)?;
        validate_positive("k", k)?;
        validate_positive("t", t)?;
        validate_finite("r", r)?;
        validate_positive("sigma", sigma)?;
        Ok(OptionContract { s0, k, t, r, sigma })
    }

    pub fn initial_price(&self) -> f64 {
        self.s0
    }

    pub fn strike(&self) -> f64 {
        self.k
    }

    pub fn maturity(&self) -> f64 {
        self.t
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.r
    }

    pub fn volatility(&self) -> f64 {
        self.sigma
    }

    /// `e^(-rT)`
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }

    /// Risk-neutral expected terminal price, `S_0 e^(rT)`
    pub fn forward_price(&self) -> f64 {
        self.s0 * (self.r * self.t).exp()
    }
}

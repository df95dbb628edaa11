// src/models/gbm.rs
use crate::contract::OptionContract;

/// Risk-neutral geometric Brownian motion sampled at maturity
///
/// Holds the per-contract constants of the exact solution
/// ```text
/// S_T = S_0 * exp((r - σ²/2)T + σ√T * Z)
/// ```
/// so the per-sample work is one fused multiply-add and one `exp`.
#[derive(Debug, Clone, Copy)]
pub struct Gbm {
    s0: f64,
    drift: f64,
    vol_sqrt_t: f64,
}

impl Gbm {
    pub fn new(s0: f64, r: f64, sigma: f64, t: f64) -> Self {
        Gbm {
            s0,
            drift: (r - 0.5 * sigma * sigma) * t,
            vol_sqrt_t: sigma * t.sqrt(),
        }
    }

    pub fn from_contract(contract: &OptionContract) -> Self {
        Gbm::new(
            contract.initial_price(),
            contract.risk_free_rate(),
            contract.volatility(),
            contract.maturity(),
        )
    }

    /// Terminal price for one standard normal draw
    #[inline]
    pub fn terminal_price(&self, normal_draw: f64) -> f64 {
        self.s0 * self.vol_sqrt_t.mul_add(normal_draw, self.drift).exp()
    }

    /// Map a buffer of N(0,1) draws to terminal prices in place
    pub fn transform_in_place(&self, draws: &mut [f64]) {
        for x in draws.iter_mut() {
            *x = self.terminal_price(*x);
        }
    }
}

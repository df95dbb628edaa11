//! # gbm-pricer: European Call Pricing, Closed Form and Monte Carlo
//!
//! Prices a European call two ways and lets you watch one converge to the
//! other:
//!
//! - **Analytical**: the Black-Scholes closed form
//! - **Simulation**: exact single-step sampling of geometric Brownian motion
//!   at maturity, discounted mean payoff over N samples
//!
//! ## Key Features
//!
//! - **Reproducible**: a caller-owned [`RandomStream`] replaces global seeding;
//!   the same seed gives bit-identical terminal prices on any thread count
//! - **Parallel**: draws, transform and payoff run chunk-wise with Rayon
//! - **Validated inputs**: degenerate contracts never produce NaN prices
//!
//! ## Quick Start
//!
//! ```rust
//! use gbm_pricer::{price_analytical, price_simulation, OptionContract};
//!
//! let contract = OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.2)
//!     .expect("Valid contract");
//!
//! let exact = price_analytical(&contract).expect("Finite price");
//! let mc = price_simulation(&contract, 200_000, Some(42)).expect("Valid sample count");
//!
//! println!("Black-Scholes: {:.4}", exact);
//! println!("Monte Carlo:   {:.4} ± {:.4}", mc.price_estimate, mc.standard_error);
//! assert!((mc.price_estimate - exact).abs() < 5.0 * mc.standard_error);
//! ```

// Module declarations
pub mod analysis;
pub mod analytics;
pub mod contract;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;

// Re-export commonly used types for convenience
pub use analytics::price_analytical;
pub use contract::OptionContract;
pub use error::{PricingError, PricingResult};
pub use mc::{price_simulation, SimulationResult};
pub use rng::RandomStream;

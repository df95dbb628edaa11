// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::SQRT_2;
use std::time::Instant;

/// Standard normal CDF Φ(x) via the error function
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

/// Wall-clock stopwatch for timing pricing runs
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start_time: Instant,
}

impl Timer {
    pub fn start() -> Timer {
        Timer {
            start_time: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

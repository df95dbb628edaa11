// src/analysis/distribution.rs
//! Empirical distribution of simulated terminal prices
//!
//! Under GBM, `ln S_T` is normal, so the histogram of `S_T` should show a
//! right-skewed log-normal shape with mean `S_0 e^(rT)`.

use crate::contract::OptionContract;
use crate::error::{PricingError, PricingResult};
use statrs::statistics::Statistics;

/// Equal-width, density-normalised histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
    /// `count / (total * width)`; integrates to 1
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin `samples` into `bins` equal intervals over `[min, max]`
    ///
    /// The last bin is closed on the right so the maximum is counted.
    /// When all samples are equal the range is widened to `[x - h, x + h]`
    /// with `h = max(0.5, 1e-9·|x|)`, so large constants still get a
    /// representable width.
    pub fn from_samples(samples: &[f64], bins: usize) -> PricingResult<Self> {
        if bins == 0 {
            return Err(PricingError::InvalidConfiguration {
                field: "bins".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if samples.is_empty() {
            return Err(PricingError::InvalidConfiguration {
                field: "samples".to_string(),
                reason: "cannot build a histogram from no samples".to_string(),
            });
        }
        if let Some(bad) = samples.iter().find(|x| !x.is_finite()) {
            return Err(PricingError::InvalidConfiguration {
                field: "samples".to_string(),
                reason: format!("contains non-finite value {}", bad),
            });
        }

        let (mut lo, mut hi) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        if lo == hi {
            let half = 0.5f64.max(lo.abs() * 1e-9);
            lo -= half;
            hi += half;
        }

        let width = (hi - lo) / bins as f64;
        if !(width.is_finite() && width > 0.0) {
            return Err(PricingError::InvalidConfiguration {
                field: "samples".to_string(),
                reason: format!(
                    "range [{}, {}] cannot be split into {} bins",
                    lo, hi, bins
                ),
            });
        }
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0u64; bins];
        for &x in samples {
            let idx = (((x - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let norm = samples.len() as f64 * width;
        let densities = counts.iter().map(|&c| c as f64 / norm).collect();

        Ok(Histogram {
            edges,
            counts,
            densities,
        })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}

/// Moments of the terminal-price sample, compared with theory
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    pub sample_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Fraction of samples with `S_T > K`
    pub fraction_in_the_money: f64,
    /// `S_0 e^(rT)`
    pub theoretical_mean: f64,
}

impl DistributionSummary {
    pub fn from_samples(samples: &[f64], contract: &OptionContract) -> PricingResult<Self> {
        if samples.is_empty() {
            return Err(PricingError::InvalidConfiguration {
                field: "samples".to_string(),
                reason: "cannot summarise an empty sample".to_string(),
            });
        }

        let k = contract.strike();
        let in_the_money = samples.iter().filter(|&&s| s > k).count();
        let std_dev = if samples.len() > 1 {
            samples.iter().std_dev()
        } else {
            0.0
        };

        Ok(DistributionSummary {
            sample_count: samples.len(),
            mean: samples.iter().mean(),
            std_dev,
            min: Statistics::min(samples.iter()),
            max: Statistics::max(samples.iter()),
            fraction_in_the_money: in_the_money as f64 / samples.len() as f64,
            theoretical_mean: contract.forward_price(),
        })
    }
}

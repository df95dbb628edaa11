pub mod convergence;
pub mod distribution;

pub use convergence::{run_convergence_study, ConvergencePoint, ConvergenceStudy};
pub use distribution::{DistributionSummary, Histogram};

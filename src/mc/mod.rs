pub mod mc_engine;
pub mod payoffs;

pub use mc_engine::{price_simulation, simulate, SimulationResult};

//! High-level runtime engine settings
//!
//! Selects the force strategy, integrator, and Barnes-Hut options
//! used when building and running a `Scenario`

use crate::configuration::config::{IntegratorConfig, StrategyConfig};

#[derive(Debug, Clone)]
pub struct Engine {
    pub strategy: StrategyConfig, // standard pairwise or barnes-hut
    pub integrator: IntegratorConfig, // verlet or euler
    pub theta: f64, // opening-angle ratio below which a region stands in as one point mass
}

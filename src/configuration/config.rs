//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – global engine options (force strategy, integrator, theta)
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`BodyConfig`]       – explicit initial state for individual bodies
//! - [`StarFieldConfig`]  – randomly generated star population
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   strategy: "barnes_hut"  # or "standard" for exact pairwise forces
//!   integrator: "verlet"    # or "euler"
//!   theta: 0.7              # Barnes-Hut opening-angle ratio
//!
//! parameters:
//!   t_end: 10.0             # total simulation time
//!   h0: 0.01                # fixed step size
//!   size: 100.0             # side length of the square region
//!   G: 1.0                  # gravitational constant
//!   min_dist: 0.5           # force floor distance
//!   merge_dist: 0.1         # merge distance threshold
//!   seed: 42                # deterministic seed
//!
//! bodies:
//!   - x: [ 45.0, 50.0 ]
//!     v: [  0.0,  1.0 ]
//!     m: 1.0
//!   - x: [ 55.0, 50.0 ]
//!     v: [  0.0, -1.0 ]
//!     m: 1.0
//!
//! stars:
//!   count: 500
//!   distribution: "uniform" # or "disc"
//!   mass: 1.0
//! ```
//!
//! The engine then maps this configuration into its internal runtime scenario
//! representation, which may use different structs optimized for performance.

use serde::Deserialize;

/// Which force-computation strategy the engine runs
/// `strategy: "standard"` (exact pairwise) or `strategy: "barnes_hut"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyConfig {
    #[serde(rename = "standard")] // Exact O(n^2) pairwise summation
    Standard,

    #[serde(rename = "barnes_hut")] // Approximate O(n log n) quadtree traversal
    BarnesHut,
}

/// Which integrator method used by the engine
/// `integrator: "verlet"` or `integrator: "euler"`
#[derive(Deserialize, Debug, Clone, Copy)]
pub enum IntegratorConfig {
    #[serde(rename = "verlet")] // Velocity Verlet, symplectic, two force evaluations per step
    Verlet,

    #[serde(rename = "euler")] // Symplectic Euler, one force evaluation per step
    Euler,
}

/// Placement distribution for randomly generated stars
#[derive(Deserialize, Debug, Clone, Copy)]
pub enum DistributionConfig {
    #[serde(rename = "uniform")] // Uniform over the square region
    Uniform,

    #[serde(rename = "disc")] // Uniform over the disc inscribed in the region
    Disc,
}

/// High-level engine configuration
/// Controls the structure of the simulation
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub strategy: StrategyConfig, // force strategy: exact pairwise or Barnes-Hut tree
    pub integrator: IntegratorConfig, // time integrator used for advancing the system state
    pub theta: Option<f64>, // opening-angle ratio: a region with width/distance below it is taken as one point mass
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64,      // time end
    pub h0: f64,         // time step size
    pub size: f64,       // side length of the square region
    pub G: f64,          // gravitational constant
    pub min_dist: f64,   // force floor - clamps the force denominator at small separations
    pub merge_dist: f64, // merge threshold
    pub seed: u64,       // deterministic seed to make runs reproducable
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position in simulation units
    pub v: [f64; 2], // initial velocity in simulation units per time unit
    pub m: f64,      // mass of the body
}

/// Configuration for a randomly generated star population
#[derive(Deserialize, Debug)]
pub struct StarFieldConfig {
    pub count: usize, // number of stars to generate
    pub distribution: DistributionConfig, // placement distribution over the region
    pub mass: Option<f64>, // per-star mass, defaults to 1.0
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // engine-level configuration (strategy, integrator, theta)
    pub parameters: ParametersConfig, // global numerical and physical parameters
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // explicitly placed bodies
    pub stars: Option<StarFieldConfig>, // randomly generated star population
}

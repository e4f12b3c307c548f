//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size and end time,
//! - region size and gravitational constant (`size`, `G`),
//! - force floor distance, merge threshold and random seed

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub h0: f64, // step size
    pub size: f64, // side length of the square region
    pub G: f64, // gravitational constant
    pub min_dist: f64, // force floor distance, clamps the force denominator
    pub merge_dist: f64, // merge threshold
    pub seed: u64, // deterministic seed
}

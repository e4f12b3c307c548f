//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//!
//! The bundle exposes the three operations a driver loop needs:
//! `compute_forces`, `advance`, and `merge_colliding`

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::{ScenarioConfig, BodyConfig, StrategyConfig, IntegratorConfig, DistributionConfig};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{System, Body, NVec2};
use crate::simulation::forces::{AccelSet, NewtonianGravity, NewtonianGravityBarnesHut};
use crate::simulation::integrator::{verlet_integrator, euler_integrator};

/// A fully-initialized simulation scenario
///
/// This is the main runtime bundle constructed from a [`ScenarioConfig`]:
/// it owns the engine settings, parameters, current system state, and the
/// set of active force laws. An external loop drives it one tick at a time
/// through [`Scenario::advance`] and [`Scenario::merge_colliding`].
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            size: p_cfg.size,
            G: p_cfg.G,
            min_dist: p_cfg.min_dist,
            merge_dist: p_cfg.merge_dist,
            seed: p_cfg.seed,
        };

        // Bodies: explicitly placed ones first, then the generated star
        // population (deterministic under the configured seed)
        let mut bodies: Vec<Body> = cfg.bodies.iter().map(|bc: &BodyConfig| Body {
            x: NVec2::new(bc.x[0], bc.x[1]),
            v: NVec2::new(bc.v[0], bc.v[1]),
            m: bc.m,
        }).collect();

        if let Some(sf) = &cfg.stars {
            let mut rng = ChaCha8Rng::seed_from_u64(parameters.seed);
            let mass = sf.mass.unwrap_or(1.0);
            for _ in 0..sf.count {
                bodies.push(generate_body(parameters.size, sf.distribution, mass, &mut rng));
            }
        }

        // Initial system state: bodies at t = 0
        let system = System {
            bodies,
            t: 0.0,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            strategy: e_cfg.strategy,
            integrator: e_cfg.integrator,
            theta: e_cfg.theta.unwrap_or(0.7),
        };

        // Forces: construct an AccelSet and register the gravity term
        // matching the configured strategy
        let forces = match engine.strategy {
            StrategyConfig::Standard => AccelSet::new().with(NewtonianGravity {
                G: parameters.G,
                min_dist: parameters.min_dist,
            }),
            StrategyConfig::BarnesHut => AccelSet::new().with(NewtonianGravityBarnesHut {
                G: parameters.G,
                min_dist: parameters.min_dist,
                theta: engine.theta,
                extent: parameters.size,
            }),
        };

        Self {
            engine,
            parameters,
            system,
            forces,
        }
    }

    /// Accumulate accelerations for the current state into `out`
    /// The buffer is zeroed first; `out.len()` must match the body count
    pub fn compute_forces(&self, out: &mut [NVec2]) {
        self.forces.accumulate_accels(self.system.t, &self.system, out);
    }

    /// Advance the system by one step with the configured integrator
    pub fn advance(&mut self) {
        match self.engine.integrator {
            IntegratorConfig::Verlet => verlet_integrator(&mut self.system, &self.forces, &self.parameters),
            IntegratorConfig::Euler => euler_integrator(&mut self.system, &self.forces, &self.parameters),
        }
    }

    /// Merge at most one pair of bodies closer than the configured merge
    /// threshold; returns whether a merge happened
    pub fn merge_colliding(&mut self) -> bool {
        self.system.merge_closer_than(self.parameters.merge_dist)
    }
}

/// Generate one star inside the square region `[0, size]²`.
///
/// `uniform` places it uniformly over the square, `disc` uniformly over the
/// inscribed disc (area-uniform, hence the sqrt on the radius). Generated
/// stars start at rest.
fn generate_body(size: f64, distribution: DistributionConfig, mass: f64, rng: &mut ChaCha8Rng) -> Body {
    let x = match distribution {
        DistributionConfig::Uniform => NVec2::new(
            rng.gen_range(0.0..size),
            rng.gen_range(0.0..size),
        ),
        DistributionConfig::Disc => {
            let radius = 0.5 * size * rng.gen_range(0.0_f64..1.0).sqrt();
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            NVec2::new(
                0.5 * size + radius * angle.cos(),
                0.5 * size + radius * angle.sin(),
            )
        }
    };

    Body {
        x,
        v: NVec2::zeros(),
        m: mass,
    }
}

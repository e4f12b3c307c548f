pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, NewtonianGravityBarnesHut};
pub use simulation::barnes_hut::{QuadTree, QuadNode};
pub use simulation::integrator::{verlet_integrator, euler_integrator};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{StrategyConfig, IntegratorConfig, DistributionConfig, EngineConfig, ParametersConfig, BodyConfig, StarFieldConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_verlet};

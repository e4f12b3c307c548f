use std::time::Instant;
use crate::simulation::states::{Body, System, NVec2};
use crate::simulation::params::Parameters;
use crate::simulation::forces::{AccelSet, Acceleration, NewtonianGravity, NewtonianGravityBarnesHut};
use crate::simulation::integrator::verlet_integrator;

/// Time one direct pass against one Barnes-Hut pass for growing body counts
pub fn bench_gravity() {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400]; //, 12800, 25600, 51200];

    for n in ns {
        let params = bench_params();
        let sys = make_system(n, params.size);

        let mut out = vec![NVec2::zeros(); n];

        // Set up gravity models
        let direct = NewtonianGravity {
            G: params.G,
            min_dist: params.min_dist,
        };

        let bh = NewtonianGravityBarnesHut {
            G: params.G,
            min_dist: params.min_dist,
            theta: 0.7,
            extent: params.size,
        };

        // Warm up
        direct.acceleration(0.0, &sys, &mut out);
        bh.acceleration(0.0, &sys, &mut out);

        // Time direct
        let t0 = Instant::now();
        direct.acceleration(0.0, &sys, &mut out);
        let dt_direct = t0.elapsed().as_secs_f64();

        // Time barnes-hut
        let t1 = Instant::now();
        bh.acceleration(0.0, &sys, &mut out);
        let dt_bh = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, direct = {:8.6} s, BH = {:8.6} s", dt_direct, dt_bh);
    }
}

/// Time full verlet steps under both strategies for growing body counts
pub fn bench_verlet() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let steps = 4; // integrator steps per model (tune as needed)

    for n in ns {
        let params = bench_params();
        let sys_template = make_system(n, params.size);

        // Direct gravity benchmark
        let mut sys_direct = sys_template.clone();
        let forces_direct = AccelSet::new().with(NewtonianGravity {
            G: params.G,
            min_dist: params.min_dist,
        });

        // Warm-up
        verlet_integrator(&mut sys_direct, &forces_direct, &params);

        let t0 = Instant::now();
        for _ in 0..steps {
            verlet_integrator(&mut sys_direct, &forces_direct, &params);
        }
        let direct_per_step = t0.elapsed().as_secs_f64() / steps as f64;

        // Barnes-Hut benchmark
        let mut sys_bh = sys_template.clone();
        let forces_bh = AccelSet::new().with(NewtonianGravityBarnesHut {
            G: params.G,
            min_dist: params.min_dist,
            theta: 0.7,
            extent: params.size,
        });

        // Warm-up
        verlet_integrator(&mut sys_bh, &forces_bh, &params);

        let t1 = Instant::now();
        for _ in 0..steps {
            verlet_integrator(&mut sys_bh, &forces_bh, &params);
        }
        let bh_per_step = t1.elapsed().as_secs_f64() / steps as f64;

        println!("N = {:5}, direct step = {:8.6} s,   BH step = {:8.6} s", n, direct_per_step, bh_per_step);
    }
}

fn bench_params() -> Parameters {
    Parameters {
        t_end: 100.0,
        h0: 0.001,
        size: 10.0,
        G: 0.1,
        min_dist: 0.01,
        merge_dist: 1.0e-3,
        seed: 42,
    }
}

/// Helper to build a deterministic System of size `n`, no rand needed
fn make_system(n: usize, size: f64) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new(
            0.5 * size + (i_f * 0.37).sin() * 0.45 * size,
            0.5 * size + (i_f * 0.13).cos() * 0.45 * size,
        );

        bodies.push(Body {
            x,
            v: NVec2::zeros(),
            m: 1.0,
        });
    }

    System { bodies, t: 0.0 }
}

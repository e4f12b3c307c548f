//! Fixed-step time integrators for the star field
//!
//! Provides a velocity-Verlet step and a single-force-eval symplectic
//! Euler step, both driven by `AccelSet` and `Parameters`

use super::states::{System, NVec2};
use super::forces::AccelSet;
use super::params::Parameters;

/// Advance the system by one step using velocity-Verlet
/// Uses two force evaluations per step and updates positions, velocities,
/// and `sys.t` in-place based on `params.h0`
pub fn verlet_integrator(sys: &mut System, forces: &AccelSet, params: &Parameters) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.h0; // time step dt
    let half_dt = 0.5 * dt; // half step dt/2, half update for verlet

    // a_n from x_n at time t_n
    let mut a_old = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a_old);

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    for (b, a) in sys.bodies.iter_mut().zip(a_old.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    // advance time: t_n+1 = t_n + dt
    sys.t += dt;

    // a_n+1 from x_n+1 at time t_n+1
    let mut a_new = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a_new);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(a_new.iter()) {
        b.v += half_dt * *a;
    }
}

/// Advance the system by one step using symplectic Euler
/// Uses one force evaluation per step: kick the velocities with a_n,
/// then drift the positions with the updated velocities
pub fn euler_integrator(sys: &mut System, forces: &AccelSet, params: &Parameters) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.h0; // time step dt

    // a_n from x_n at time t_n
    let mut a = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a);

    // Kick: v_n+1 = v_n + dt * a_n
    for (b, a) in sys.bodies.iter_mut().zip(a.iter()) {
        b.v += dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    sys.t += dt;
}

//! Core state types for the 2D star simulation.
//!
//! Defines the body/system structs:
//! - `Body` using `NVec2` (position, velocity, mass)
//! - `System` holding the list of bodies and the current simulation time `t`
//!
//! Accumulated accelerations are not stored on the body; force passes write
//! into a step-scoped buffer that is zeroed before every accumulation
//! (see `AccelSet::accumulate_accels`), so no stale acceleration can carry
//! between steps.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
}

impl Body {
    /// Merge two bodies into one combined body.
    ///
    /// Mass is summed, velocity is the momentum-conserving mass-weighted
    /// average, and the position is the pair's center of mass.
    pub fn combine(&self, other: &Body) -> Body {
        let m = self.m + other.m;
        Body {
            x: (self.x * self.m + other.x * other.m) / m,
            v: (self.v * self.m + other.v * other.m) / m,
            m,
        }
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub t: f64, // time
}

impl System {
    /// Merge the first pair of bodies closer than `threshold`.
    ///
    /// Scans unordered pairs in index order (i < j), replaces the first
    /// qualifying pair with `Body::combine` (pushed at the end of the
    /// collection) and returns `true`. At most one merge per call; callers
    /// wanting to drain all close pairs call this in a loop. Returns `false`
    /// when no pair is closer than the threshold.
    pub fn merge_closer_than(&mut self, threshold: f64) -> bool {
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let d = (self.bodies[i].x - self.bodies[j].x).norm();
                if d < threshold {
                    let merged = self.bodies[i].combine(&self.bodies[j]);
                    // j sits after i, remove it first
                    self.bodies.remove(j);
                    self.bodies.remove(i);
                    self.bodies.push(merged);
                    return true;
                }
            }
        }
        false
    }
}

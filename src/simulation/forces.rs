//! Force / acceleration contributors for the star-field engine
//!
//! Defines the 2D acceleration trait, direct pairwise
//! Newtonian gravity and a Barnes-Hut quadtree variant

use crate::simulation::states::{System, NVec2};
use crate::simulation::barnes_hut::QuadTree;

/// Collection of 2D acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer, no acceleration survives from a previous pass
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

/// Trait for 2D acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Acceleration felt at `pos` from a point mass `src_mass` at `src`.
///
/// The force magnitude is `G * m * src_mass / max(d, min_dist)`, resolved
/// along the separation; dividing out the target mass leaves
/// `G * src_mass / max(d, min_dist)`. The floor is a designed clamp, not an
/// error path. A source exactly at `pos` contributes nothing; coincident
/// pairs are the merge rule's job.
pub(crate) fn accel_from_point(pos: NVec2, src: NVec2, src_mass: f64, g: f64, min_dist: f64) -> NVec2 {
    let r = src - pos;
    let dist = r.norm();
    if dist == 0.0 {
        return NVec2::zeros();
    }
    let a = g * src_mass / dist.max(min_dist);
    a * r / dist
}

/// 2D Newtonian gravity with a force floor
/// The force denominator is clamped to `min_dist` to smooth close
/// encounters and avoid singularities at small separations
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_dist: f64, // force floor distance
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();
        if n == 0 { // No bodies, return
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            // bi: body i (left side of the pair)
            let bi = &sys.bodies[i];
            let xi = bi.x;      // position of body i
            let mi = bi.m;      // mass of body i

            for j in (i + 1)..n {
                // bj: body j (right side of the pair)
                let bj = &sys.bodies[j];
                let xj = bj.x;  // position of body j
                let mj = bj.m;  // mass of body j

                // r is the displacement vector from i to j
                // If r points from i to j, then i feels a pull along +r,
                // j feels a pull along -r
                let r = xj - xi;
                let dist = r.norm();

                // Coincident bodies have no defined direction; the merge
                // pass is responsible for collapsing them
                if dist == 0.0 {
                    continue;
                }

                // Scalar force magnitude with the clamped denominator:
                // F = G * m_i * m_j / max(d, min_dist)
                let f = self.G * mi * mj / dist.max(self.min_dist);

                // Unit vector from i toward j
                let dir = r / dist;

                // Equal and opposite accelerations: a = F / m
                out[i] += f / mi * dir;
                out[j] -= f / mj * dir;
            }
        }
    }
}

/// 2D Newtonian gravity evaluated via a Barnes-Hut quadtree
/// Wraps [`QuadTree`] to get approximate O(N log N) accelerations
/// controlled by `theta` (opening-angle ratio) and the same force floor
/// as [`NewtonianGravity`]
pub struct NewtonianGravityBarnesHut {
    pub G: f64,
    pub min_dist: f64,
    pub theta: f64,
    pub extent: f64, // side length of the simulated square region
}

impl Acceleration for NewtonianGravityBarnesHut {
    /// Compute accelerations using a quadtree rebuilt from `sys`
    /// The tree is step-scoped; it is dropped when this call returns
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        if sys.bodies.is_empty() {
            return;
        }
        let tree = QuadTree::build(sys, self.extent);
        for i in 0..sys.bodies.len() {
            out[i] += tree.force_on_body(i, sys, self.G, self.min_dist, self.theta);
        }
    }
}

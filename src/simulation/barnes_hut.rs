//! # Barnes-Hut Quadtree (2D)
//!
//! This module implements the 2D Barnes-Hut quadtree used to approximate
//! gravitational acceleration in the star field. It replaces the naive
//! `O(N²)` all-pairs force calculation with an approximate `O(N log N)`
//! method while preserving good accuracy for distant interactions.
//!
//! The key idea is to treat a group of distant bodies as a single
//! pseudo-body located at their center of mass. For sufficiently far
//! clusters, evaluating one interaction is drastically cheaper than
//! computing many individual forces.
//!
//! - The square region is recursively subdivided into 4 quadrants.
//! - Each quadrant becomes a node of the quadtree; an empty quadrant is
//!   simply absent (`None`).
//! - Leaf nodes hold zero or one body (more only when bodies are exactly
//!   coincident and no subdivision can separate them).
//! - Each node stores the total mass of its subtree, its center of mass,
//!   and its bounding box (for the opening criterion).
//!
//! The tree is rebuilt from scratch on every force evaluation and owns no
//! state across steps.

use crate::simulation::states::{System, NVec2};
use crate::simulation::forces::accel_from_point;

/// A single quadtree node.
///
/// Each node represents a square region of space that may contain:
/// - zero bodies (only the empty root),
/// - exactly one body (ordinary leaf),
/// - several exactly coincident bodies (degenerate leaf),
/// - multiple bodies (internal node with children).
pub struct QuadNode {
    pub mass: f64,
    pub com: NVec2, // center of mass of the subtree
    pub bbox_min: NVec2,
    pub bbox_max: NVec2,
    pub children: [Option<usize>; 4], // indices into QuadTree::nodes, one per quadrant
    pub bodies: Vec<usize>, // indices of directly held bodies when a leaf
}

impl QuadNode {
    /// Side length of the node's square region
    pub fn width(&self) -> f64 {
        self.bbox_max.x - self.bbox_min.x
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }
}

/// A complete Barnes-Hut quadtree built over the current body set.
pub struct QuadTree {
    pub nodes: Vec<QuadNode>,
    pub root: usize,
}

impl QuadTree {
    /// Build a quadtree from the current state of the system.
    ///
    /// The root covers the configured square region `[0, extent]²`, grown
    /// (and re-squared) to enclose any body that has drifted outside it.
    /// Construction recursively partitions the body set:
    ///
    /// - 0 or 1 bodies make a leaf whose mass and center of mass are the
    ///   body's own (or zero for the empty root).
    /// - Larger sets are split at the region midpoint into four quadrants;
    ///   each body lands in exactly one quadrant (`>=` midpoint goes
    ///   right/bottom), non-empty quadrants become children, and the node's
    ///   mass and center of mass aggregate the children's.
    /// - A set of two or more exactly coincident bodies becomes a
    ///   degenerate leaf, since no amount of subdivision separates it.
    pub fn build(sys: &System, extent: f64) -> Self {
        let (bbox_min, bbox_max) = root_bbox(sys, extent);

        let mut tree = QuadTree {
            nodes: Vec::new(),
            root: 0,
        };
        let indices: Vec<usize> = (0..sys.bodies.len()).collect();
        tree.root = tree.build_node(sys, indices, bbox_min, bbox_max);
        tree
    }

    /// Compute the net gravitational acceleration on body `i` using the tree.
    ///
    /// Traverses from the root: distant nodes (by the `theta` opening
    /// criterion) contribute as single point masses at their center of mass,
    /// near nodes are descended into, and leaves interact exactly with an
    /// explicit skip of the target body itself. The region is never a real
    /// participant, so no reciprocal acceleration is applied anywhere.
    pub fn force_on_body(&self, i: usize, sys: &System, G: f64, min_dist: f64, theta: f64) -> NVec2 {
        let pos_i = sys.bodies[i].x;
        let mut acc = NVec2::zeros();
        self.traverse_node(self.root, i, pos_i, sys, G, min_dist, theta, &mut acc);
        acc
    }

    // helpers ==============================================================================

    /// Recursively build the node covering `indices` over the given bounds,
    /// returning its index in the arena.
    fn build_node(&mut self, sys: &System, indices: Vec<usize>, bbox_min: NVec2, bbox_max: NVec2) -> usize {
        // Leaf: at most one body, or a coincident cluster subdivision
        // cannot separate
        if indices.len() <= 1 || all_coincident(sys, &indices) {
            let mut mass = 0.0;
            let mut com = NVec2::zeros();
            for &i in &indices {
                let b = &sys.bodies[i];
                mass += b.m;
                com += b.x * b.m;
            }
            if mass > 0.0 {
                com /= mass;
            }
            let idx = self.nodes.len();
            self.nodes.push(QuadNode {
                mass,
                com,
                bbox_min,
                bbox_max,
                children: [None; 4],
                bodies: indices,
            });
            return idx;
        }

        // Partition the set into the four quadrants around the midpoint;
        // the >= tie-break puts every body in exactly one bucket
        let center = (bbox_min + bbox_max) * 0.5;
        let mut buckets: [Vec<usize>; 4] = Default::default();
        for &i in &indices {
            buckets[quadrant_for_point(&sys.bodies[i].x, &center)].push(i);
        }

        // Build children for non-empty quadrants and aggregate mass / com
        let mut children = [None; 4];
        let mut mass = 0.0;
        let mut com = NVec2::zeros();
        for (q, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let (cmin, cmax) = child_bbox(&bbox_min, &bbox_max, q);
            let child_idx = self.build_node(sys, bucket, cmin, cmax);
            children[q] = Some(child_idx);

            let cn = &self.nodes[child_idx];
            mass += cn.mass;
            com += cn.com * cn.mass;
        }
        if mass > 0.0 {
            com /= mass;
        }

        let idx = self.nodes.len();
        self.nodes.push(QuadNode {
            mass,
            com,
            bbox_min,
            bbox_max,
            children,
            bodies: Vec::new(),
        });
        idx
    }

    /// Recursively traverse a subtree to accumulate acceleration on the
    /// body at `pos_i`.
    ///
    /// - Empty node: no contribution.
    /// - Leaf: exact interaction with each held body, skipping `body_idx`
    ///   itself. Leaves always interact exactly, regardless of the opening
    ///   criterion; this is what makes the approximation converge to the
    ///   pairwise result as `theta` goes to zero.
    /// - Internal node with `width / distance < theta`: the whole subtree
    ///   stands in as one point mass at its center of mass.
    /// - Otherwise: recurse into present children.
    fn traverse_node(&self, node_idx: usize, body_idx: usize, pos_i: NVec2, sys: &System, G: f64, min_dist: f64, theta: f64, acc: &mut NVec2) {
        let node = &self.nodes[node_idx];

        // Skip empty nodes
        if node.mass == 0.0 {
            return;
        }

        // Leaf: direct interaction with explicit self-skip
        if node.is_leaf() {
            for &b in &node.bodies {
                if b == body_idx {
                    continue; // don't self-interact
                }
                let body = &sys.bodies[b];
                *acc += accel_from_point(pos_i, body.x, body.m, G, min_dist);
            }
            return;
        }

        // Internal node: decide whether to approximate or descend
        let r = node.com - pos_i;
        let dist = r.norm();

        // dist == 0 makes width/dist infinite (or NaN), which fails the
        // criterion and falls through to recursion
        if dist > 0.0 && node.width() / dist < theta {
            // Far enough away: approximate this node as a single mass at
            // its center of mass; the target alone is accelerated
            *acc += accel_from_point(pos_i, node.com, node.mass, G, min_dist);
            return;
        }

        // Too close: recurse into children
        for &child_idx in node.children.iter().flatten() {
            self.traverse_node(child_idx, body_idx, pos_i, sys, G, min_dist, theta, acc);
        }
    }
}

// helpers ===========================================================================

/// Compute the square root bounds for the tree.
///
/// Starts from the configured region `[0, extent]²` and grows it to enclose
/// every body, then re-squares around the center so the node width used by
/// the opening criterion is well-defined at every level.
fn root_bbox(sys: &System, extent: f64) -> (NVec2, NVec2) {
    let mut min = NVec2::new(0.0, 0.0);
    let mut max = NVec2::new(extent, extent);

    for b in &sys.bodies {
        min.x = min.x.min(b.x.x);
        min.y = min.y.min(b.x.y);
        max.x = max.x.max(b.x.x);
        max.y = max.y.max(b.x.y);
    }

    // Expand to a square so width is well-defined
    let center = (min + max) * 0.5;
    let half = (max - min) * 0.5;
    let max_half = half.x.max(half.y);
    let half = NVec2::new(max_half, max_half);

    (center - half, center + half)
}

/// Compute the quadrant index for a point relative to the region midpoint.
///
/// The index is encoded using 2 bits, and the `>=` comparisons are the
/// single consistent tie-break for bodies exactly on a midpoint line:
///
/// - Bit 0 (value 1): x axis, 0 for left (x < center.x), 1 for right (x >= center.x)
/// - Bit 1 (value 2): y axis, 0 for top (y < center.y), 1 for bottom (y >= center.y)
///
/// This encoding matches the layout of `children[0..4]` in the tree nodes
/// (top-left, top-right, bottom-left, bottom-right).
fn quadrant_for_point(p: &NVec2, center: &NVec2) -> usize {
    let mut idx = 0;

    if p.x >= center.x { idx |= 1; } // bit 0
    if p.y >= center.y { idx |= 2; } // bit 1

    idx
}

/// Compute the bounding box for a given child quadrant.
///
/// The parent box is split at its center along each axis and the child box
/// picked by the same 2-bit encoding as `quadrant_for_point`.
fn child_bbox(parent_min: &NVec2, parent_max: &NVec2, quadrant: usize) -> (NVec2, NVec2) {
    let center = (parent_min + parent_max) * 0.5;

    let mut min = *parent_min;
    let mut max = *parent_max;

    // x: bit 0
    if (quadrant & 1) == 0 {
        max.x = center.x;
    } else {
        min.x = center.x;
    }

    // y: bit 1
    if (quadrant & 2) == 0 {
        max.y = center.y;
    } else {
        min.y = center.y;
    }

    (min, max)
}

/// True when every body in `indices` sits at exactly the same position.
fn all_coincident(sys: &System, indices: &[usize]) -> bool {
    let first = sys.bodies[indices[0]].x;
    indices[1..].iter().all(|&i| sys.bodies[i].x == first)
}

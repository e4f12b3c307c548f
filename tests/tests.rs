use starsim::simulation::states::{Body, System, NVec2};
use starsim::simulation::params::Parameters;
use starsim::simulation::forces::{AccelSet, NewtonianGravity, NewtonianGravityBarnesHut};
use starsim::simulation::barnes_hut::QuadTree;
use starsim::simulation::integrator::verlet_integrator;
use starsim::simulation::scenario::Scenario;
use starsim::configuration::config::{ScenarioConfig, StrategyConfig};

/// Build a simple 2-body System separated along the x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    let b1 = Body {
        x: NVec2::new(-dist / 2.0, 0.0),
        v: NVec2::zeros(),
        m: m1,
    };
    let b2 = Body {
        x: NVec2::new(dist / 2.0, 0.0),
        v: NVec2::zeros(),
        m: m2,
    };
    System {
        bodies: vec![b1, b2],
        t: 0.0,
    }
}

/// Deterministic scattered system, positions spread over a 10x10 region
pub fn scattered_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);
    for i in 0..n {
        let i_f = i as f64;
        bodies.push(Body {
            x: NVec2::new(
                5.0 + (i_f * 0.37).sin() * 4.5,
                5.0 + (i_f * 0.13).cos() * 4.5,
            ),
            v: NVec2::zeros(),
            m: 1.0 + (i % 5) as f64 * 0.25,
        });
    }
    System { bodies, t: 0.0 }
}

/// Build a direct gravity term + AccelSet
pub fn gravity_set(g: f64, min_dist: f64) -> AccelSet {
    AccelSet::new().with(NewtonianGravity { G: g, min_dist })
}

/// Build a Barnes-Hut gravity term + AccelSet
pub fn barnes_hut_set(g: f64, min_dist: f64, theta: f64, extent: f64) -> AccelSet {
    AccelSet::new().with(NewtonianGravityBarnesHut {
        G: g,
        min_dist,
        theta,
        extent,
    })
}

// ==================================================================================
// Pairwise gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let forces = gravity_set(0.1, 0.0);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    // momentum rates must cancel exactly
    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(0.1, 0.0);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    let a1 = acc[0];

    assert!(dx.norm() > 0.0);
    assert!(a1.dot(&dx) > 0.0, "Acceleration is not toward second body");
}

#[test]
fn gravity_two_body_exact_magnitude() {
    // Unit masses at distance 10, G = 1, no floor:
    // F = G m m / max(d, min_dist) = 1 / 10
    let sys = two_body_system(10.0, 1.0, 1.0);
    let forces = gravity_set(1.0, 0.0);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    assert!((acc[0].norm() - 0.1).abs() < 1e-12, "got {}", acc[0].norm());
    assert!((acc[1].norm() - 0.1).abs() < 1e-12);

    // along the connecting line, oppositely directed
    assert_eq!(acc[0].y, 0.0);
    assert_eq!(acc[1].y, 0.0);
    assert!((acc[0] + acc[1]).norm() < 1e-12);
}

#[test]
fn gravity_zero_and_one_body_noop() {
    let forces = gravity_set(1.0, 0.0);

    let empty = System { bodies: vec![], t: 0.0 };
    let mut acc: Vec<NVec2> = vec![];
    forces.accumulate_accels(empty.t, &empty, &mut acc);

    let single = System {
        bodies: vec![Body { x: NVec2::new(1.0, 2.0), v: NVec2::zeros(), m: 1.0 }],
        t: 0.0,
    };
    let mut acc = vec![NVec2::new(9.0, 9.0); 1]; // stale values must be cleared
    forces.accumulate_accels(single.t, &single, &mut acc);

    assert_eq!(acc[0], NVec2::zeros());
}

#[test]
fn gravity_force_floor_clamps_close_pairs() {
    let sys = two_body_system(1e-6, 1.0, 1.0);
    let forces = gravity_set(1.0, 0.5);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    // denominator clamped at 0.5, so |a| = G * m / 0.5 = 2
    assert!(acc[0].norm().is_finite());
    assert!((acc[0].norm() - 2.0).abs() < 1e-9, "got {}", acc[0].norm());
}

#[test]
fn gravity_coincident_pair_contributes_nothing() {
    let b = Body { x: NVec2::new(3.0, 4.0), v: NVec2::zeros(), m: 1.0 };
    let sys = System { bodies: vec![b.clone(), b], t: 0.0 };
    let forces = gravity_set(1.0, 0.5);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    // no defined direction at zero separation; must not produce NaN
    assert_eq!(acc[0], NVec2::zeros());
    assert_eq!(acc[1], NVec2::zeros());
}

// ==================================================================================
// Quadtree tests
// ==================================================================================

#[test]
fn quadtree_root_mass_matches_total() {
    let sys = scattered_system(50);
    let tree = QuadTree::build(&sys, 10.0);

    let total: f64 = sys.bodies.iter().map(|b| b.m).sum();
    let root_mass = tree.nodes[tree.root].mass;

    assert!((root_mass - total).abs() < 1e-9 * total, "root {} vs total {}", root_mass, total);
}

#[test]
fn quadtree_root_com_is_weighted_centroid() {
    let sys = scattered_system(50);
    let tree = QuadTree::build(&sys, 10.0);

    let total: f64 = sys.bodies.iter().map(|b| b.m).sum();
    let expected: NVec2 = sys.bodies.iter().map(|b| b.x * b.m).sum::<NVec2>() / total;
    let com = tree.nodes[tree.root].com;

    assert!((com - expected).norm() < 1e-9, "com {:?} vs expected {:?}", com, expected);
}

#[test]
fn quadtree_assigns_each_body_exactly_once() {
    // Scattered bodies plus positions exactly on quadrant boundaries
    let mut sys = scattered_system(20);
    for pos in [
        NVec2::new(5.0, 5.0),   // region center
        NVec2::new(5.0, 2.0),   // on the vertical midline
        NVec2::new(8.0, 5.0),   // on the horizontal midline
        NVec2::new(0.0, 0.0),   // region corner
        NVec2::new(10.0, 10.0), // opposite corner
    ] {
        sys.bodies.push(Body { x: pos, v: NVec2::zeros(), m: 1.0 });
    }

    let tree = QuadTree::build(&sys, 10.0);

    let mut seen: Vec<usize> = tree.nodes.iter().flat_map(|n| n.bodies.iter().copied()).collect();
    seen.sort_unstable();

    let expected: Vec<usize> = (0..sys.bodies.len()).collect();
    assert_eq!(seen, expected, "bodies duplicated or dropped by the partition");
}

#[test]
fn quadtree_terminates_on_coincident_bodies() {
    let b = Body { x: NVec2::new(5.0, 5.0), v: NVec2::zeros(), m: 1.0 };
    let sys = System { bodies: vec![b.clone(), b.clone(), b], t: 0.0 };

    let tree = QuadTree::build(&sys, 10.0);

    assert!((tree.nodes[tree.root].mass - 3.0).abs() < 1e-12);

    // coincident cluster sits in one degenerate leaf
    let mut seen: Vec<usize> = tree.nodes.iter().flat_map(|n| n.bodies.iter().copied()).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2]);

    // traversal stays finite: the other two occupants are at distance zero
    let acc = tree.force_on_body(0, &sys, 1.0, 0.5, 0.7);
    assert_eq!(acc, NVec2::zeros());
}

// ==================================================================================
// Barnes-Hut tests
// ==================================================================================

/// Total L2 difference between Barnes-Hut and direct accelerations
fn barnes_hut_error(sys: &System, theta: f64) -> f64 {
    let n = sys.bodies.len();
    let direct = gravity_set(0.1, 0.1);
    let bh = barnes_hut_set(0.1, 0.1, theta, 10.0);

    let mut acc_direct = vec![NVec2::zeros(); n];
    let mut acc_bh = vec![NVec2::zeros(); n];
    direct.accumulate_accels(sys.t, sys, &mut acc_direct);
    bh.accumulate_accels(sys.t, sys, &mut acc_bh);

    acc_direct
        .iter()
        .zip(acc_bh.iter())
        .map(|(a, b)| (a - b).norm_squared())
        .sum::<f64>()
        .sqrt()
}

#[test]
fn barnes_hut_matches_direct_at_zero_theta() {
    // theta = 0 never opens a region early, every interaction is exact
    let sys = scattered_system(32);
    assert!(barnes_hut_error(&sys, 0.0) < 1e-9);
}

#[test]
fn barnes_hut_converges_with_decreasing_theta() {
    let sys = scattered_system(64);

    let err_coarse = barnes_hut_error(&sys, 1.0);
    let err_fine = barnes_hut_error(&sys, 0.1);

    assert!(err_coarse > 0.0, "coarse theta should actually approximate");
    assert!(err_fine <= err_coarse, "fine {} vs coarse {}", err_fine, err_coarse);
}

#[test]
fn barnes_hut_two_body_equals_direct() {
    // two bodies land in separate leaves, so even a coarse theta is exact
    let sys = two_body_system(4.0, 1.0, 2.0);

    let direct = gravity_set(1.0, 0.0);
    let bh = barnes_hut_set(1.0, 0.0, 0.9, 10.0);

    let mut acc_direct = vec![NVec2::zeros(); 2];
    let mut acc_bh = vec![NVec2::zeros(); 2];
    direct.accumulate_accels(sys.t, &sys, &mut acc_direct);
    bh.accumulate_accels(sys.t, &sys, &mut acc_bh);

    for i in 0..2 {
        assert!((acc_direct[i] - acc_bh[i]).norm() < 1e-12);
    }
}

#[test]
fn barnes_hut_single_body_feels_no_self_force() {
    let sys = System {
        bodies: vec![Body { x: NVec2::new(2.0, 3.0), v: NVec2::zeros(), m: 5.0 }],
        t: 0.0,
    };
    let bh = barnes_hut_set(1.0, 0.0, 0.7, 10.0);

    let mut acc = vec![NVec2::zeros(); 1];
    bh.accumulate_accels(sys.t, &sys, &mut acc);

    assert_eq!(acc[0], NVec2::zeros());
}

// ==================================================================================
// Merge tests
// ==================================================================================

#[test]
fn combine_conserves_mass_and_momentum() {
    let a = Body { x: NVec2::new(0.0, 0.0), v: NVec2::new(1.0, 0.0), m: 1.0 };
    let b = Body { x: NVec2::new(2.0, 0.0), v: NVec2::new(-1.0, 2.0), m: 3.0 };

    let merged = a.combine(&b);

    assert!((merged.m - 4.0).abs() < 1e-12);

    let p_before = a.v * a.m + b.v * b.m;
    let p_after = merged.v * merged.m;
    assert!((p_before - p_after).norm() < 1e-12);

    // merged body sits at the pair's center of mass
    let com = (a.x * a.m + b.x * b.m) / 4.0;
    assert!((merged.x - com).norm() < 1e-12);
}

#[test]
fn merge_one_pair_per_call() {
    let mut sys = System {
        bodies: vec![
            Body { x: NVec2::new(0.0, 0.0), v: NVec2::zeros(), m: 1.0 },
            Body { x: NVec2::new(0.01, 0.0), v: NVec2::zeros(), m: 1.0 },
            Body { x: NVec2::new(0.0, 0.01), v: NVec2::zeros(), m: 1.0 },
        ],
        t: 0.0,
    };

    assert!(sys.merge_closer_than(0.1));
    assert_eq!(sys.bodies.len(), 2);

    assert!(sys.merge_closer_than(0.1));
    assert_eq!(sys.bodies.len(), 1);

    // one body left: no pairs, must be a no-op
    assert!(!sys.merge_closer_than(0.1));
    assert_eq!(sys.bodies.len(), 1);

    assert!((sys.bodies[0].m - 3.0).abs() < 1e-12);
}

#[test]
fn merge_without_close_pairs_is_noop() {
    let mut sys = two_body_system(10.0, 1.0, 1.0);

    assert!(!sys.merge_closer_than(0.1));
    assert_eq!(sys.bodies.len(), 2);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn verlet_conserves_momentum() {
    let mut sys = scattered_system(8);
    // unit masses keep the pairwise accelerations exactly antisymmetric
    for b in sys.bodies.iter_mut() {
        b.m = 1.0;
    }
    let forces = gravity_set(0.1, 0.1);
    let params = Parameters {
        t_end: 1.0,
        h0: 0.01,
        size: 10.0,
        G: 0.1,
        min_dist: 0.1,
        merge_dist: 0.0,
        seed: 42,
    };

    for _ in 0..100 {
        verlet_integrator(&mut sys, &forces, &params);
    }

    let p: NVec2 = sys.bodies.iter().map(|b| b.v * b.m).sum();
    assert!(p.norm() < 1e-9, "momentum drifted: {:?}", p);
    assert!((sys.t - 1.0).abs() < 1e-9);
}

#[test]
fn integrator_skips_empty_system() {
    let mut sys = System { bodies: vec![], t: 0.0 };
    let forces = gravity_set(1.0, 0.0);
    let params = Parameters {
        t_end: 1.0,
        h0: 0.01,
        size: 10.0,
        G: 1.0,
        min_dist: 0.0,
        merge_dist: 0.0,
        seed: 0,
    };

    verlet_integrator(&mut sys, &forces, &params);
    assert_eq!(sys.t, 0.0);
}

// ==================================================================================
// Scenario / config tests
// ==================================================================================

const TEST_YAML: &str = r#"
engine:
  strategy: "barnes_hut"
  integrator: "verlet"
  theta: 0.5

parameters:
  t_end: 1.0
  h0: 0.01
  size: 100.0
  G: 1.0
  min_dist: 0.5
  merge_dist: 0.1
  seed: 42

bodies:
  - x: [ 45.0, 50.0 ]
    v: [  0.0,  1.0 ]
    m: 2.0

stars:
  count: 10
  distribution: "disc"
  mass: 1.0
"#;

#[test]
fn scenario_builds_from_yaml() {
    let cfg: ScenarioConfig = serde_yaml::from_str(TEST_YAML).expect("yaml should parse");
    let scenario = Scenario::build_scenario(cfg);

    // one explicit body plus ten generated stars
    assert_eq!(scenario.system.bodies.len(), 11);
    assert_eq!(scenario.engine.strategy, StrategyConfig::BarnesHut);
    assert!((scenario.engine.theta - 0.5).abs() < 1e-12);
    assert!((scenario.system.bodies[0].m - 2.0).abs() < 1e-12);

    // generated stars stay inside the region
    for b in &scenario.system.bodies[1..] {
        assert!(b.x.x >= 0.0 && b.x.x <= 100.0);
        assert!(b.x.y >= 0.0 && b.x.y <= 100.0);
    }
}

#[test]
fn scenario_generation_is_deterministic() {
    let cfg_a: ScenarioConfig = serde_yaml::from_str(TEST_YAML).unwrap();
    let cfg_b: ScenarioConfig = serde_yaml::from_str(TEST_YAML).unwrap();

    let a = Scenario::build_scenario(cfg_a);
    let b = Scenario::build_scenario(cfg_b);

    for (ba, bb) in a.system.bodies.iter().zip(b.system.bodies.iter()) {
        assert_eq!(ba.x, bb.x);
        assert_eq!(ba.v, bb.v);
    }
}

#[test]
fn scenario_advance_and_merge() {
    let cfg: ScenarioConfig = serde_yaml::from_str(TEST_YAML).unwrap();
    let mut scenario = Scenario::build_scenario(cfg);
    let n0 = scenario.system.bodies.len();

    scenario.advance();
    assert!(scenario.system.t > 0.0);

    // draining merges never increases the body count
    while scenario.merge_colliding() {}
    assert!(scenario.system.bodies.len() <= n0);
}
